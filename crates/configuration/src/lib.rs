use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{BonusSettings, OutputFormat, OutputSettings, ReportSettings, Settings};

/// Prefix for environment overrides, e.g. `SALES_REPORT__BONUS__PODIUM_PCT=12`.
const ENV_PREFIX: &str = "SALES_REPORT";

/// Loads the application configuration from `path`.
///
/// The file is optional: when it does not exist every value falls back to its
/// default. Environment variables prefixed with `SALES_REPORT__` override the
/// file. The result is validated before it is returned.
pub fn load_config(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let path = path.as_ref();

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(path = %path.display(), ?settings, "Configuration loaded");

    Ok(settings)
}
