use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinderError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Could not read {name}: {reason}")]
    Read { name: String, reason: String },

    #[error("Read abandoned before completion: {0}")]
    Abandoned(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

