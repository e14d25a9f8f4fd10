//! A dashboard wired to a fake backend.
use peermap::client::Client;
use peermap::core::store::{SnapshotStore, WorldTimeline};
use peermap::core::Dashboard;
use peermap_configuration::Configuration;
use peermap_primitives::TimelineEntry;
use peermap_test_helpers::configuration;
use peermap_test_helpers::fixtures::aggregate_series;

use super::renderer::RecordingRenderer;
use super::server::FakeBackend;

pub struct Environment {
    pub config: Configuration,
    pub backend: FakeBackend,
    pub dashboard: Dashboard<Client, RecordingRenderer>,
}

impl Environment {
    /// Starts a backend serving the latest slide of `timeline` and its
    /// aggregates, and an initialized dashboard bound to it.
    pub async fn start(timeline: Vec<TimelineEntry>) -> Self {
        Self::start_with(timeline, |_| {}).await
    }

    /// Same as [`Environment::start`] but lets `configure` change the backend
    /// replies before the dashboard is initialized.
    pub async fn start_with(timeline: Vec<TimelineEntry>, configure: impl FnOnce(&FakeBackend)) -> Self {
        let backend = FakeBackend::start().await;

        let series = aggregate_series(&timeline);
        let latest = timeline.last().expect("the timeline should not be empty");
        backend.reply_json("update_world_map", &latest.list);
        backend.reply_json("default_map_data", &series);
        backend.reply_json("current_totals", &latest.totals());

        configure(&backend);

        let config = configuration::ephemeral_with_source(backend.base_url());

        let client = Client::new(&config.source).expect("the client should be built");
        let store = SnapshotStore::new(WorldTimeline::new(timeline).expect("the timeline should not be empty"));
        let dashboard = Dashboard::new(store, client, RecordingRenderer::default(), config.selection.debounce());

        dashboard.initialize().await;

        Self {
            config,
            backend,
            dashboard,
        }
    }

    pub async fn stop(self) {
        self.dashboard.dispose().await;
        self.backend.stop();
    }
}
