//! Job that refreshes the dashboard on intervals.
//!
//! Every tick fetches the latest world map and the current totals and merges
//! them into the bound view state. A tick awaits its refresh before the next
//! one can fire: ticks missed while a refresh is in flight are skipped, so
//! refreshes never overlap.
//!
//! Refer to [`peermap-configuration`](peermap_configuration::Poller) for the interval option.
use chrono::Utc;
use peermap_configuration::Poller;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::core::render::RenderAdapter;
use crate::core::source::SnapshotSource;
use crate::core::Dashboard;
use crate::signals::Halted;

/// Handle of the running poller.
#[derive(Debug)]
pub struct PollerHandle {
    halt: Option<oneshot::Sender<Halted>>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stops the poller and waits for the running refresh, if any, to finish.
    pub async fn stop(mut self) {
        if let Some(halt) = self.halt.take() {
            if halt.send(Halted::Normal).is_err() {
                warn!("Poller already stopped");
            }
        }

        if let Err(err) = (&mut self.task).await {
            warn!(%err, "Poller job did not finish cleanly");
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// It starts the job refreshing the dashboard.
///
/// The first refresh happens one interval after the start: the dashboard was
/// just rendered by its initialization.
#[must_use]
pub fn start_job<S, R>(config: &Poller, dashboard: &Dashboard<S, R>) -> PollerHandle
where
    S: SnapshotSource + 'static,
    R: RenderAdapter + 'static,
{
    let dashboard = dashboard.clone();
    let period = config.interval();
    let (tx_halt, mut rx_halt) = oneshot::channel::<Halted>();

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await;

        info!("Poller started, refreshing every {}ms", period.as_millis());

        loop {
            tokio::select! {
                halted = &mut rx_halt => {
                    match halted {
                        Ok(signal) => info!("Stopping poller: {signal}"),
                        Err(_) => info!("Stopping poller: handle dropped"),
                    }
                    break;
                }
                _ = interval.tick() => {
                    let start_time = Utc::now().time();
                    dashboard.refresh().await;
                    debug!("Refreshed in: {}ms", (Utc::now().time() - start_time).num_milliseconds());
                }
            }
        }
    });

    PollerHandle {
        halt: Some(tx_halt),
        task,
    }
}
