use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The value shown by the bubbles and by the visible chart series.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// `awaitingPeers - usedPorts`.
    #[default]
    All,
    AwaitingPeers,
    UsedPorts,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown metric: {0:?}, expected one of `all`, `awaitingPeers` or `usedPorts`")]
pub struct UnknownMetric(pub String);

impl Metric {
    pub const VARIANTS: [Metric; 3] = [Metric::All, Metric::AwaitingPeers, Metric::UsedPorts];

    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Metric::All => "all",
            Metric::AwaitingPeers => "awaitingPeers",
            Metric::UsedPorts => "usedPorts",
        }
    }

    /// Button caption: the field name with its first letter capitalized.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::All => "All",
            Metric::AwaitingPeers => "AwaitingPeers",
            Metric::UsedPorts => "UsedPorts",
        }
    }

    /// Series and bubble color.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Metric::All => "#ff8726",
            Metric::AwaitingPeers => "#d21a1a",
            Metric::UsedPorts => "#45d21a",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::VARIANTS
            .into_iter()
            .find(|metric| metric.field_name() == s)
            .ok_or_else(|| UnknownMetric(s.to_owned()))
    }
}
