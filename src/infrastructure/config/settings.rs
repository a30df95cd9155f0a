//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. The
//! configuration is read from a TOML file and validated before use.
//!
//! # Example
//!
//! ```no_run
//! use tripwire::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use alloy_primitives::Address;
use serde::Deserialize;

use super::engine::EngineConfig;
use super::logging::LoggingConfig;
use super::oracle::{OracleConfig, MAX_DECIMAL_GAP};
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Engine identities and expiry policy.
    pub engine: EngineConfig,

    /// Oracles, one per routed family.
    #[serde(default)]
    pub oracles: Vec<OracleConfig>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.engine.expiration_period_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "expiration_period_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.engine.admin == Address::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "admin",
                reason: "must not be the zero address".to_string(),
            }
            .into());
        }
        if self.engine.trusted_caller == Address::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "trusted_caller",
                reason: "must not be the zero address".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for oracle in &self.oracles {
            if !seen.insert(oracle.family) {
                return Err(ConfigError::InvalidValue {
                    field: "oracles",
                    reason: format!("family {} configured more than once", oracle.family),
                }
                .into());
            }
            if oracle.raw_decimals < oracle.decimals {
                return Err(ConfigError::InvalidValue {
                    field: "raw_decimals",
                    reason: format!(
                        "{} oracle: raw_decimals ({}) must be >= decimals ({})",
                        oracle.family, oracle.raw_decimals, oracle.decimals
                    ),
                }
                .into());
            }
            if oracle.raw_decimals - oracle.decimals > MAX_DECIMAL_GAP {
                return Err(ConfigError::InvalidValue {
                    field: "raw_decimals",
                    reason: format!(
                        "{} oracle: precision gap must be at most {MAX_DECIMAL_GAP}",
                        oracle.family
                    ),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderFamily;
    use crate::error::Error;
    use alloy_primitives::U256;

    const BASE: &str = r#"
        [engine]
        admin = "0x0101010101010101010101010101010101010101"
        trusted_caller = "0x0202020202020202020202020202020202020202"
    "#;

    fn invalid_field(err: Error) -> &'static str {
        match err {
            Error::Config(ConfigError::InvalidValue { field, .. }) => field,
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse_toml(BASE).unwrap();
        assert_eq!(config.engine.expiration_period_secs, 5_184_000);
        assert_eq!(config.logging, LoggingConfig::default());
        assert!(config.oracles.is_empty());
    }

    #[test]
    fn oracle_entries_parse() {
        let toml = format!(
            r#"{BASE}
            [[oracles]]
            family = "leveraged_short"
            decimals = 6
            smoothed = "101_000000"
            max_sample = "0xffff"
            "#
        );
        let config = Config::parse_toml(&toml).unwrap();
        let oracle = &config.oracles[0];

        assert_eq!(oracle.family, OrderFamily::LeveragedShort);
        assert_eq!(oracle.raw_decimals, 18);
        assert_eq!(oracle.smoothed, Some(U256::from(101_000000u64)));
        assert_eq!(oracle.max_sample, Some(U256::from(0xffffu64)));
    }

    #[test]
    fn zero_expiration_period_is_rejected() {
        let toml = r#"
            [engine]
            admin = "0x0101010101010101010101010101010101010101"
            trusted_caller = "0x0202020202020202020202020202020202020202"
            expiration_period_secs = 0
        "#;
        let err = Config::parse_toml(toml).unwrap_err();
        assert_eq!(invalid_field(err), "expiration_period_secs");
    }

    #[test]
    fn zero_trusted_caller_is_rejected() {
        let toml = r#"
            [engine]
            admin = "0x0101010101010101010101010101010101010101"
            trusted_caller = "0x0000000000000000000000000000000000000000"
        "#;
        let err = Config::parse_toml(toml).unwrap_err();
        assert_eq!(invalid_field(err), "trusted_caller");
    }

    #[test]
    fn duplicate_family_is_rejected() {
        let toml = format!(
            r#"{BASE}
            [[oracles]]
            family = "perpetual"
            decimals = 6

            [[oracles]]
            family = "perpetual"
            decimals = 8
            "#
        );
        let err = Config::parse_toml(&toml).unwrap_err();
        assert_eq!(invalid_field(err), "oracles");
    }

    #[test]
    fn raw_precision_below_oracle_precision_is_rejected() {
        let toml = format!(
            r#"{BASE}
            [[oracles]]
            family = "leveraged_long"
            decimals = 8
            raw_decimals = 6
            "#
        );
        let err = Config::parse_toml(&toml).unwrap_err();
        assert_eq!(invalid_field(err), "raw_decimals");
    }

    #[test]
    fn unknown_family_is_a_parse_error() {
        let toml = format!(
            r#"{BASE}
            [[oracles]]
            family = "spot"
            decimals = 6
            "#
        );
        assert!(matches!(
            Config::parse_toml(&toml),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            Config::load("/nonexistent/tripwire.toml"),
            Err(Error::Config(ConfigError::ReadFile(_)))
        ));
    }
}
