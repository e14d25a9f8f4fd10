use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::validator::{SemanticValidationError, Validator};

/// Where the dashboard fetches its data from.
///
/// Paths are resolved against `base_url`, so the base url should end with a
/// slash when the endpoints live under a sub path.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Source {
    /// Base URL of the backend serving the data endpoints.
    #[serde(default = "Source::default_base_url")]
    pub base_url: Url,

    /// Latest per-country snapshot.
    #[serde(default = "Source::default_world_map_path")]
    pub world_map_path: String,

    /// Aggregate world series used by the line chart.
    #[serde(default = "Source::default_aggregate_series_path")]
    pub aggregate_series_path: String,

    /// Current world totals shown in the metric buttons.
    #[serde(default = "Source::default_totals_path")]
    pub totals_path: String,

    /// Timeout in seconds for a single request.
    #[serde(default = "Source::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            world_map_path: Self::default_world_map_path(),
            aggregate_series_path: Self::default_aggregate_series_path(),
            totals_path: Self::default_totals_path(),
            request_timeout_secs: Self::default_request_timeout_secs(),
        }
    }
}

impl Source {
    #[allow(clippy::missing_panics_doc)]
    fn default_base_url() -> Url {
        Url::parse("http://127.0.0.1:8443/").expect("the default base url should be valid")
    }

    fn default_world_map_path() -> String {
        String::from("update_world_map")
    }

    fn default_aggregate_series_path() -> String {
        String::from("default_map_data")
    }

    fn default_totals_path() -> String {
        String::from("current_totals")
    }

    fn default_request_timeout_secs() -> u64 {
        5
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Validator for Source {
    fn validate(&self) -> Result<(), SemanticValidationError> {
        if self.base_url.cannot_be_a_base() {
            return Err(SemanticValidationError::CannotBeABaseUrl(self.base_url.to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(SemanticValidationError::ZeroRequestTimeout);
        }
        Ok(())
    }
}
