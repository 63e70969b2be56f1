pub mod config;
pub mod error;
pub mod ids;
pub mod result;

pub use config::AppConfig;
pub use error::BinderError;
pub use ids::IdIssuer;
pub use result::BinderResult;
