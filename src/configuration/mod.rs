pub mod defaults;
pub mod error;
pub mod types;
pub mod validation;

pub use defaults::default_configuration;
pub use error::ConfigError;
pub use types::{ChainConfig, LoggingConfig, ValidationConfig};

/// Loads validator configuration from an optional YAML file, falling back
/// to [`default_configuration`] when `path` is `None`. A single file
/// source, with no CLI/env layering: the validator is embedded as a
/// library, not its own process.
pub fn load_configuration(path: Option<&std::path::Path>) -> Result<ValidationConfig, ConfigError> {
    let config = match path {
        #[cfg(feature = "serde_yaml")]
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::FileLoadError(format!("{}: {e}", path.display())))?;
            serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::FileLoadError(format!("{}: {e}", path.display())))?
        }
        #[cfg(not(feature = "serde_yaml"))]
        Some(_) => return Err(ConfigError::InvalidConfig("file-based configuration requires the serde_yaml feature".into())),
        None => default_configuration(),
    };

    validation::validate(&config)?;
    Ok(config)
}
