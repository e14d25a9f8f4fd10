use peermap::{app, bootstrap, signals};
use tracing::info;

#[tokio::main]
async fn main() {
    let (config, dashboard) = bootstrap::app::setup().await;

    let jobs = app::start(&config, &dashboard);

    // handle the signals
    signals::global_shutdown_signal().await;

    info!("Peermap shutting down..");

    jobs.stop().await;
    dashboard.dispose().await;

    info!("Peermap successfully shutdown.");
}
