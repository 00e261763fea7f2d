use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; omitted values fall back to the
/// standard report policy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub report: ReportSettings,
    pub bonus: BonusSettings,
    pub output: OutputSettings,
}

/// Shapes the per-seller report entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// How many best-selling SKUs are kept per seller.
    pub top_products_limit: usize,
    /// Fractional digits kept on revenue, profit and bonus.
    pub decimal_places: u32,
}

/// Percentages of profit paid out per rank tier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BonusSettings {
    /// Paid to the most profitable seller.
    pub first_place_pct: Decimal,
    /// Paid to the second and third places.
    pub podium_pct: Decimal,
    /// Paid to everyone else except the last place, who gets nothing.
    pub default_pct: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// How the binary renders a finished report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still get the standard report.

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_products_limit: 10,
            decimal_places: 2,
        }
    }
}

impl Default for BonusSettings {
    fn default() -> Self {
        Self {
            first_place_pct: dec!(15),
            podium_pct: dec!(10),
            default_pct: dec!(5),
        }
    }
}

/// `rust_decimal` refuses to rescale beyond 28 digits; anything past a
/// handful is a typo anyway.
const MAX_DECIMAL_PLACES: u32 = 10;

impl Settings {
    /// Rejects values the report pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.top_products_limit == 0 {
            return Err(ConfigError::ValidationError(
                "report.top_products_limit must be at least 1".to_string(),
            ));
        }

        if self.report.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::ValidationError(format!(
                "report.decimal_places must be at most {}, got {}",
                MAX_DECIMAL_PLACES, self.report.decimal_places
            )));
        }

        let tiers = [
            ("bonus.first_place_pct", self.bonus.first_place_pct),
            ("bonus.podium_pct", self.bonus.podium_pct),
            ("bonus.default_pct", self.bonus.default_pct),
        ];
        for (name, pct) in tiers {
            if pct < Decimal::ZERO {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be negative, got {}",
                    name, pct
                )));
            }
        }

        Ok(())
    }
}
