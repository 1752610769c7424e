//! Shift Service
//!
//! This crate provides shift and tip income tracking: recorded shifts
//! carry derived income figures, and per-user summary statistics are
//! aggregated on demand.

pub mod guard;
pub mod income;
pub mod models;
pub mod repository;
pub mod service;
pub mod stats;

pub use models::{Shift, ShiftDraft, User};
pub use service::{ServiceError, ShiftService};
pub use stats::{ShiftStats, DEFAULT_TAX_RATE};

/// Service configuration
#[derive(Debug, Clone)]
pub struct ShiftConfig {
    /// Fraction of total income withheld as tax, in `[0, 1]`
    pub tax_rate: f64,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            tax_rate: stats::DEFAULT_TAX_RATE,
        }
    }
}

impl ShiftConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(rate) = std::env::var("TAX_RATE") {
            if let Ok(value) = rate.parse::<f64>() {
                if (0.0..=1.0).contains(&value) {
                    config.tax_rate = value;
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShiftConfig::default();
        assert_eq!(config.tax_rate, 0.08);
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("TAX_RATE", "0.25");
        assert_eq!(ShiftConfig::from_env().tax_rate, 0.25);

        std::env::set_var("TAX_RATE", "1.5");
        assert_eq!(ShiftConfig::from_env().tax_rate, 0.08);

        std::env::remove_var("TAX_RATE");
    }
}
