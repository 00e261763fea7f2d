use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing calculation strategy: {0} must be provided")]
    MissingStrategy(&'static str),
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        AnalyticsError::InvalidInput(err.to_string())
    }
}
