//! Payloads of the data endpoints.
use derive_more::Display;
use peermap_primitives::{Counters, TimeSeriesPoint};
use serde::Deserialize;

/// The two shapes the aggregate endpoints answer with.
///
/// The backend tells them apart only by their JSON shape: a list of dated
/// points for the series, a single object for the totals.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum DefaultMapData {
    WorldAggregateSeries(Vec<TimeSeriesPoint>),
    CurrentTotals(Counters),
}

impl DefaultMapData {
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            DefaultMapData::WorldAggregateSeries(_) => Shape::WorldAggregateSeries,
            DefaultMapData::CurrentTotals(_) => Shape::CurrentTotals,
        }
    }
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    #[display("aggregate world series")]
    WorldAggregateSeries,
    #[display("current totals")]
    CurrentTotals,
}
