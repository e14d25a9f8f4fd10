//! Dashboard configurations used in tests.
use std::env;

use camino::Utf8PathBuf;
use peermap_configuration::{Configuration, Threshold};
use url::Url;

use crate::random;

/// This configuration is used for testing. Logging is off, the timers are
/// short and the timeline path is unique, so several dashboards can run at the
/// same time.
///
/// # Panics
///
/// Will panic if the temp directory is not a valid UTF-8 path.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `Debug` for tests debugging

    config.poller.interval_ms = 50;
    config.selection.debounce_ms = 100;
    config.source.request_timeout_secs = 2;

    let temp_directory = Utf8PathBuf::from_path_buf(env::temp_dir()).expect("temp dir should be a valid UTF-8 path");
    config.bootstrap.timeline_path = temp_directory.join(format!("timeline_{}.json", random::string(16)));

    config
}

/// Same as [`ephemeral`] but pointing the data source to `base_url`.
#[must_use]
pub fn ephemeral_with_source(base_url: Url) -> Configuration {
    let mut config = ephemeral();
    config.source.base_url = base_url;
    config
}
