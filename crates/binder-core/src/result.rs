use crate::error::BinderError;

pub type BinderResult<T> = Result<T, BinderError>;
