use crate::configuration::error::ConfigError;
use crate::configuration::types::ValidationConfig;

/// Validates loaded configuration. The validator's own consensus behavior
/// never depends on this, only logging level and which ruleset
/// (`use_testnet_rules`) are settable here.
pub fn validate(config: &ValidationConfig) -> Result<(), ConfigError> {
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        other => Err(ConfigError::InvalidConfig(format!("unknown logging level: {other}"))),
    }
}
