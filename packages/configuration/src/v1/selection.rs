use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Selection {
    /// Delay in milliseconds between a country selection and the refresh of
    /// the chart with that country's series. A new selection within the delay
    /// restarts it, so panning or zooming through several countries only
    /// refreshes the chart once.
    #[serde(default = "Selection::default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            debounce_ms: Self::default_debounce_ms(),
        }
    }
}

impl Selection {
    fn default_debounce_ms() -> u64 {
        1000
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
