//! Setup for the main dashboard application.
//!
//! The application setup has two main stages:
//!
//! 1. Load the configuration and set up logging.
//! 2. Build the dashboard: load the bootstrap timeline, connect the data
//!    client and render the dashboard once.
use anyhow::Context;
use peermap_configuration::Configuration;
use tracing::info;

use super::config::initialize_configuration;
use crate::bootstrap;
use crate::client::Client;
use crate::core::render::TracingRenderer;
use crate::core::store::{SnapshotStore, WorldTimeline};
use crate::core::Dashboard;

/// The dashboard wired to the HTTP backend and rendered as log lines.
pub type HeadlessDashboard = Dashboard<Client, TracingRenderer>;

/// It loads the configuration and builds the initialized dashboard.
///
/// # Panics
///
/// Will panic if the configuration can't be loaded or the dashboard can't be
/// built from it.
pub async fn setup() -> (Configuration, HeadlessDashboard) {
    let configuration = initialize_configuration();

    initialize_logging(&configuration);

    let dashboard = initialize_dashboard(&configuration)
        .await
        .expect("the dashboard should be built from the configuration");

    (configuration, dashboard)
}

/// It builds the dashboard and renders it once.
///
/// # Errors
///
/// Will return an error if the bootstrap timeline can't be loaded or the data
/// client can't be built.
pub async fn initialize_dashboard(config: &Configuration) -> anyhow::Result<HeadlessDashboard> {
    let timeline_path = &config.bootstrap.timeline_path;

    let timeline = WorldTimeline::load(timeline_path)
        .with_context(|| format!("unable to load the bootstrap timeline from `{timeline_path}`"))?;

    info!(time_indexes = timeline.len(), "Bootstrap timeline loaded from {timeline_path}");

    let client = Client::new(&config.source).context("unable to build the data client")?;

    let dashboard = Dashboard::new(
        SnapshotStore::new(timeline),
        client,
        TracingRenderer,
        config.selection.debounce(),
    );

    dashboard.initialize().await;

    Ok(dashboard)
}

pub fn initialize_logging(config: &Configuration) {
    bootstrap::logging::setup(config);
}
