//! Initialize configuration from file or env var.
//!
//! All environment variables are prefixed with `PEERMAP_`.
use peermap_configuration::{Configuration, Info};

// Default values
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/peermap.toml";

/// It loads the application configuration from the environment.
///
/// There are two methods to inject the configuration:
///
/// 1. By using a config file: `peermap.toml`.
/// 2. Environment variable: `PEERMAP_CONFIG_TOML`. The variable contains the same contents as the `peermap.toml` file.
///
/// Environment variable has priority over the config file. Single values can
/// be overridden with `PEERMAP_<SECTION>__<OPTION>` variables.
///
/// # Panics
///
/// Will panic if it can't load the configuration from either
/// `./share/default/config/peermap.toml` file or the env var `PEERMAP_CONFIG_TOML`.
#[must_use]
pub fn initialize_configuration() -> Configuration {
    let info = Info::new(DEFAULT_PATH_CONFIG.to_string()).expect("the configuration info should be available");

    Configuration::load(&info).expect("the configuration should be loaded")
}
