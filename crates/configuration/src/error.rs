use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load report settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid report settings: {0}")]
    ValidationError(String),
}
