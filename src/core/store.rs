//! In-memory snapshot store.
//!
//! It holds the world timeline (every country at every time index), the
//! index map built from its first entry and the aggregate world series used by
//! the chart. The timeline is loaded once at startup and never replaced nor
//! appended to.
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use peermap_primitives::{CountryCode, CountrySnapshot, Counters, Metric, TimeSeriesPoint, TimelineEntry};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("the world timeline has no time index")]
    EmptyTimeline,

    #[error("unable to read the world timeline from `{path}`: {source}")]
    Read { path: Utf8PathBuf, source: Arc<std::io::Error> },

    #[error("unable to decode the world timeline from `{path}`: {source}")]
    Decode {
        path: Utf8PathBuf,
        source: Arc<serde_json::Error>,
    },
}

/// A position on the timeline requested by the selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TimeIndex {
    /// Live data: the bubbles follow the poller.
    #[default]
    Latest,
    At(usize),
}

/// Ordered, non-empty sequence of per-country lists, one per time index.
#[derive(Clone, Debug)]
pub struct WorldTimeline {
    entries: Vec<TimelineEntry>,
}

impl WorldTimeline {
    /// # Errors
    ///
    /// Will return `Err` if `entries` is empty.
    pub fn new(entries: Vec<TimelineEntry>) -> Result<Self, Error> {
        if entries.is_empty() {
            return Err(Error::EmptyTimeline);
        }
        Ok(Self { entries })
    }

    /// Loads the timeline from a JSON file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be read, is not a timeline or is
    /// an empty timeline.
    pub fn load(path: &Utf8Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path).map_err(|err| Error::Read {
            path: path.to_owned(),
            source: Arc::new(err),
        })?;

        let entries: Vec<TimelineEntry> = serde_json::from_str(&json).map_err(|err| Error::Decode {
            path: path.to_owned(),
            source: Arc::new(err),
        })?;

        Self::new(entries)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: an empty timeline cannot be built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn first(&self) -> &TimelineEntry {
        &self.entries[0]
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Out of range indexes fall back to the last time index.
    #[must_use]
    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    /// Resolves a requested time index to an existing one and its entry.
    #[must_use]
    pub fn resolve(&self, index: TimeIndex) -> (usize, &TimelineEntry) {
        let index = match index {
            TimeIndex::Latest => self.last_index(),
            TimeIndex::At(index) => self.clamp(index),
        };
        (index, &self.entries[index])
    }

    /// Maps a slider position in `[0, 1]` to a time index.
    #[must_use]
    pub fn slider_index(&self, position: f64) -> usize {
        let position = if position.is_nan() { 0.0 } else { position.clamp(0.0, 1.0) };

        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (self.last_index() as f64 * position).round() as usize;

        self.clamp(index)
    }
}

/// Position of every country in the list of the first timeline entry.
#[derive(Clone, Debug, Default)]
pub struct CountryIndexMap {
    positions: HashMap<CountryCode, usize>,
}

impl CountryIndexMap {
    #[must_use]
    pub fn from_entry(entry: &TimelineEntry) -> Self {
        let mut positions = HashMap::with_capacity(entry.list.len());
        for (position, snapshot) in entry.list.iter().enumerate() {
            positions.insert(snapshot.id.clone(), position);
        }
        Self { positions }
    }

    #[must_use]
    pub fn position(&self, id: &CountryCode) -> Option<usize> {
        self.positions.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Highest value of each metric over the countries of one time index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct MetricMaxima {
    pub awaiting_peers: u32,
    pub used_ports: u32,
    pub all: i64,
}

impl MetricMaxima {
    #[must_use]
    pub fn of(list: &[CountrySnapshot]) -> Self {
        list.iter().fold(Self::default(), |max, snapshot| Self {
            awaiting_peers: max.awaiting_peers.max(snapshot.counters.awaiting_peers()),
            used_ports: max.used_ports.max(snapshot.counters.used_ports()),
            all: max.all.max(snapshot.counters.all()),
        })
    }

    /// Heat rule ceiling for `metric`. Negative maxima map to zero.
    #[must_use]
    pub fn ceiling(&self, metric: Metric) -> u64 {
        match metric {
            Metric::All => u64::try_from(self.all).unwrap_or(0),
            Metric::AwaitingPeers => u64::from(self.awaiting_peers),
            Metric::UsedPorts => u64::from(self.used_ports),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SnapshotStore {
    timeline: WorldTimeline,
    index_map: CountryIndexMap,
    aggregate_series: Vec<TimeSeriesPoint>,
}

impl SnapshotStore {
    #[must_use]
    pub fn new(timeline: WorldTimeline) -> Self {
        let index_map = CountryIndexMap::from_entry(timeline.first());
        Self {
            timeline,
            index_map,
            aggregate_series: Vec::new(),
        }
    }

    #[must_use]
    pub fn timeline(&self) -> &WorldTimeline {
        &self.timeline
    }

    #[must_use]
    pub fn index_map(&self) -> &CountryIndexMap {
        &self.index_map
    }

    /// Last aggregate world series fetched from the backend.
    #[must_use]
    pub fn aggregate_series(&self) -> &[TimeSeriesPoint] {
        &self.aggregate_series
    }

    pub fn set_aggregate_series(&mut self, series: Vec<TimeSeriesPoint>) {
        self.aggregate_series = series;
    }

    /// Counters of `country` at every time index, `None` where the country is
    /// not reported.
    #[must_use]
    pub fn country_series(&self, country: &CountryCode) -> Vec<Option<Counters>> {
        let hint = self.index_map.position(country);
        (0..self.timeline.len())
            .map(|index| {
                self.timeline
                    .get(index)
                    .and_then(|entry| entry.find(country, hint))
                    .map(|snapshot| snapshot.counters)
            })
            .collect()
    }
}
