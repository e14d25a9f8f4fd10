//! Peermap application.
//!
//! The application renders the dashboard once at setup and then keeps it in
//! sync with the backend.
//!
//! Jobs executed always:
//!
//! - Poller: merges the latest world map and totals into the dashboard on
//!   every interval.
use peermap_configuration::Configuration;
use tracing::info;

use crate::bootstrap::jobs::poller::{self, PollerHandle};
use crate::core::render::RenderAdapter;
use crate::core::source::SnapshotSource;
use crate::core::Dashboard;

/// The running jobs.
#[derive(Debug)]
pub struct Jobs {
    pub poller: PollerHandle,
}

impl Jobs {
    /// Stops every job.
    pub async fn stop(self) {
        self.poller.stop().await;
        info!("All jobs stopped");
    }
}

/// It starts the application jobs.
#[must_use]
pub fn start<S, R>(config: &Configuration, dashboard: &Dashboard<S, R>) -> Jobs
where
    S: SnapshotSource + 'static,
    R: RenderAdapter + 'static,
{
    Jobs {
        poller: poller::start_job(&config.poller, dashboard),
    }
}
