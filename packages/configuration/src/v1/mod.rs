//! Version `1` of the configuration.
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [source]
//! base_url = "http://127.0.0.1:8443/"
//! world_map_path = "update_world_map"
//! aggregate_series_path = "default_map_data"
//! totals_path = "current_totals"
//! request_timeout_secs = 5
//!
//! [poller]
//! interval_ms = 500
//!
//! [selection]
//! debounce_ms = 1000
//!
//! [bootstrap]
//! timeline_path = "./share/default/timeline.json"
//! ```
pub mod bootstrap;
pub mod logging;
pub mod poller;
pub mod selection;
pub mod source;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::bootstrap::Bootstrap;
use self::logging::Logging;
use self::poller::Poller;
use self::selection::Selection;
use self::source::Source;
use crate::validator::{SemanticValidationError, Validator};
use crate::{Error, Info, ENV_VAR_PREFIX};

/// Dashboard configuration.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    /// Logging configuration.
    #[serde(default)]
    pub logging: Logging,

    /// Data endpoints.
    #[serde(default)]
    pub source: Source,

    /// Periodic refresh of the world map.
    #[serde(default)]
    pub poller: Poller,

    /// Country selection behavior.
    #[serde(default)]
    pub selection: Selection,

    /// Data available before the first fetch.
    #[serde(default)]
    pub bootstrap: Bootstrap,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct. When the whole
    /// configuration is given as a TOML string it is used instead of the file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the document has a bad configuration or if the
    /// resulting values do not pass validation.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = match &info.config_toml {
            Some(config_toml) => Figment::from(Toml::string(config_toml)),
            None => Figment::from(Toml::file(&info.config_toml_path)),
        }
        .merge(Env::prefixed(ENV_VAR_PREFIX).split("__"));

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if the configuration cannot be encoded to TOML.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string(self).expect("Could not encode TOML value")
    }
}

impl Validator for Configuration {
    fn validate(&self) -> Result<(), SemanticValidationError> {
        self.source.validate()?;
        self.poller.validate()
    }
}
