//! Primitive types for [Peermap](https://docs.rs/peermap).
//!
//! This module contains the basic data structures shared by the Peermap
//! packages: the counter pair reported per country, country codes, the
//! displayable metrics and the snapshot shapes exchanged with the data
//! endpoints.
pub mod counters;
pub mod country;
pub mod metric;
pub mod snapshot;

pub use counters::Counters;
pub use country::CountryCode;
pub use metric::Metric;
pub use snapshot::{CountrySnapshot, TimeSeriesPoint, TimelineEntry};
