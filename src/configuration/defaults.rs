use crate::configuration::types::{ChainConfig, LoggingConfig, ValidationConfig};

/// Default configuration: mainnet rules, info-level logging to stderr.
pub fn default_configuration() -> ValidationConfig {
    ValidationConfig {
        chain: ChainConfig { use_testnet_rules: false },
        logging: LoggingConfig { level: "info".to_string(), file: None },
    }
}
