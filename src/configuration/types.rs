use serde::{Deserialize, Serialize};

/// Runtime-tunable validator configuration. Deliberately excludes anything
/// consensus-sensitive, those live as `pub const`s in
/// [`crate::consensus_params`] and must never be overridable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub chain: ChainConfig,
    pub logging: LoggingConfig,
}

/// Non-consensus chain-connection settings: which network ruleset this
/// validator instance is wired to and how eagerly it logs rejections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChainConfig {
    pub use_testnet_rules: bool,
}

/// Logging verbosity and destination, consumed by [`crate::tracing::Tracing`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}
