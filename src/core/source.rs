//! Where fresh snapshots come from.
use std::future::Future;

use peermap_primitives::{CountrySnapshot, Counters, TimeSeriesPoint};

use crate::client::{self, Client};

/// The data endpoints, as seen by the dashboard.
pub trait SnapshotSource: Sync + Send {
    /// Per-country counters for the latest time index.
    fn latest_world_map(&self) -> impl Future<Output = Result<Vec<CountrySnapshot>, client::Error>> + Send;

    /// Aggregate world counters for every time index.
    fn world_aggregate_series(&self) -> impl Future<Output = Result<Vec<TimeSeriesPoint>, client::Error>> + Send;

    /// Current aggregate world counters.
    fn current_totals(&self) -> impl Future<Output = Result<Counters, client::Error>> + Send;
}

impl SnapshotSource for Client {
    async fn latest_world_map(&self) -> Result<Vec<CountrySnapshot>, client::Error> {
        Client::latest_world_map(self).await
    }

    async fn world_aggregate_series(&self) -> Result<Vec<TimeSeriesPoint>, client::Error> {
        Client::world_aggregate_series(self).await
    }

    async fn current_totals(&self) -> Result<Counters, client::Error> {
        Client::current_totals(self).await
    }
}
