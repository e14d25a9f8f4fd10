//! Snapshot shapes exchanged with the data endpoints and stored in the
//! bootstrap timeline.
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

use crate::counters::Counters;
use crate::country::CountryCode;

/// Counters for one country at one time index.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Constructor)]
pub struct CountrySnapshot {
    pub id: CountryCode,
    #[serde(flatten)]
    pub counters: Counters,
}

/// A dated point of the chart series.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Constructor)]
pub struct TimeSeriesPoint {
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub counters: Counters,
}

/// All the countries reported at one time index of the world timeline.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default, Constructor)]
pub struct TimelineEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub list: Vec<CountrySnapshot>,
}

impl TimelineEntry {
    /// Finds the snapshot of `id`, trying the position `hint` first.
    ///
    /// The hint comes from the index map built on the first timeline entry.
    /// Later entries may list countries in another order, so a stale hint
    /// falls back to a lookup by id.
    #[must_use]
    pub fn find(&self, id: &CountryCode, hint: Option<usize>) -> Option<&CountrySnapshot> {
        hint.and_then(|position| self.list.get(position))
            .filter(|snapshot| &snapshot.id == id)
            .or_else(|| self.list.iter().find(|snapshot| &snapshot.id == id))
    }

    /// Aggregate of every country at this time index.
    #[must_use]
    pub fn totals(&self) -> Counters {
        self.list.iter().map(|snapshot| &snapshot.counters).sum()
    }
}
