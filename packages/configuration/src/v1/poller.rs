use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::validator::{SemanticValidationError, Validator};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Poller {
    /// Period in milliseconds between two refreshes of the world map and the
    /// totals.
    #[serde(default = "Poller::default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for Poller {
    fn default() -> Self {
        Self {
            interval_ms: Self::default_interval_ms(),
        }
    }
}

impl Poller {
    fn default_interval_ms() -> u64 {
        500
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Validator for Poller {
    fn validate(&self) -> Result<(), SemanticValidationError> {
        if self.interval_ms == 0 {
            return Err(SemanticValidationError::ZeroPollerInterval);
        }
        Ok(())
    }
}
