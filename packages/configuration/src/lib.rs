//! Configuration data structures for [Peermap](https://docs.rs/peermap).
//!
//! The configuration is loaded from a TOML document and can be overridden
//! with environment variables:
//!
//! - `PEERMAP_CONFIG_TOML`: the whole TOML document. It has priority over the
//!   configuration file.
//! - `PEERMAP_CONFIG_TOML_PATH`: location of the configuration file.
//! - `PEERMAP_<SECTION>__<OPTION>`: one option, for example
//!   `PEERMAP_POLLER__INTERVAL_MS=1000`.
//!
//! Every option has a default value, so an empty document is a valid
//! configuration.
//!
//! The current version for configuration is [`v1`].
pub mod v1;
pub mod validator;

use std::env;
use std::sync::Arc;

use thiserror::Error;

/// The whole `peermap.toml` file content. It has priority over the config file.
/// Even if the file is not on the default path.
pub const ENV_VAR_CONFIG_TOML: &str = "PEERMAP_CONFIG_TOML";

/// The `peermap.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "PEERMAP_CONFIG_TOML_PATH";

/// Prefix for the environment variables overriding single options.
pub const ENV_VAR_PREFIX: &str = "PEERMAP_";

pub type Configuration = v1::Configuration;
pub type Logging = v1::logging::Logging;
pub type Threshold = v1::logging::Threshold;
pub type Source = v1::source::Source;
pub type Poller = v1::poller::Poller;
pub type Selection = v1::selection::Selection;
pub type Bootstrap = v1::bootstrap::Bootstrap;

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    ///
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            println!("Loading configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }

    /// Info for an in-memory TOML document, bypassing the environment.
    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: String::new(),
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to parse or extract the configuration.
    #[error("Failed processing the configuration: {source}")]
    ConfigError {
        source: Arc<figment::Error>,
    },

    /// The configuration was parsed but some option values are not usable.
    #[error("Invalid configuration: {source}")]
    Invalid {
        #[from]
        source: validator::SemanticValidationError,
    },
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigError { source: Arc::new(err) }
    }
}
