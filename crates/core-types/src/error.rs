use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid sales batch field `{0}`: {1}")]
    InvalidInput(String, String),
}

impl CoreError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput(field.to_string(), reason.into())
    }
}
