use thiserror::Error;

/// Configuration load/validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load configuration file: {0}")]
    FileLoadError(String),
}
