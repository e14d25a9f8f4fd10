use peermap::app;
use peermap::bootstrap::app::initialize_dashboard;
use peermap::core::selection::{Entity, Projection};
use peermap::core::store::TimeIndex;
use peermap_primitives::{Counters, Metric, TimeSeriesPoint};
use peermap_test_helpers::configuration;
use peermap_test_helpers::fixtures::{aggregate_series, country, snapshot, two_country_timeline, us_timeline};
use tracing::level_filters::LevelFilter;

use crate::common::environment::Environment;
use crate::common::logging::{tracing_stderr_init, INIT};
use crate::common::server::unreachable_base_url;

fn all_values(points: &[TimeSeriesPoint]) -> Vec<i64> {
    points.iter().map(|point| point.counters.all()).collect()
}

#[tokio::test]
async fn it_should_render_the_world_on_startup() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Environment::start(two_country_timeline()).await;

    let surface = env.dashboard.renderer().surface();
    assert_eq!(all_values(&surface.chart), vec![8, 7, 17]);
    assert_eq!(surface.bubbles.len(), 2);
    assert_eq!(surface.metric, Some(Metric::All));
    assert_eq!(surface.totals, Some(Counters::new(26, 9)));
    assert_eq!(surface.label, Some(Entity::World));

    env.stop().await;
}

#[tokio::test]
async fn the_poller_should_zero_the_countries_missing_from_the_live_map() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Environment::start(two_country_timeline()).await;
    env.backend.reply_json("update_world_map", &vec![snapshot("US", 30, 10)]);

    let jobs = app::start(&env.config, &env.dashboard);
    tokio::time::sleep(env.config.poller.interval() * 6).await;
    jobs.stop().await;

    {
        let state = env.dashboard.state().await;
        assert_eq!(state.view.bubbles.get(&country("US")).unwrap().counters, Counters::new(30, 10));
        assert!(state.view.bubbles.get(&country("DE")).unwrap().counters.is_zero());
    }

    env.stop().await;
}

#[tokio::test]
async fn the_poller_should_bind_the_chart_once_the_series_endpoint_recovers() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Environment::start_with(two_country_timeline(), |backend| {
        backend.reply("default_map_data", reqwest::StatusCode::SERVICE_UNAVAILABLE, "{}");
    })
    .await;
    assert!(env.dashboard.renderer().surface().chart.is_empty());

    env.backend
        .reply_json("default_map_data", &aggregate_series(&two_country_timeline()));

    let jobs = app::start(&env.config, &env.dashboard);
    tokio::time::sleep(env.config.poller.interval() * 4).await;
    jobs.stop().await;

    assert_eq!(all_values(&env.dashboard.renderer().surface().chart), vec![8, 7, 17]);

    env.stop().await;
}

#[tokio::test]
async fn hovering_and_switching_to_the_globe_should_reach_the_renderer() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Environment::start(two_country_timeline()).await;

    env.dashboard.hover_country(country("DE")).await;
    assert_eq!(env.dashboard.renderer().surface().hovered, Some(country("DE")));

    env.dashboard.toggle_projection().await;
    env.dashboard.select_entity(country("DE")).await;

    let surface = env.dashboard.renderer().surface();
    assert_eq!(surface.hovered, None);
    assert_eq!(surface.projection, Projection::Globe);

    env.stop().await;
}

#[tokio::test]
async fn selecting_a_country_should_chart_its_series_and_selecting_it_again_should_go_back_to_the_world() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Environment::start(us_timeline()).await;

    env.dashboard.select_entity(country("US")).await;
    tokio::time::sleep(env.config.selection.debounce() * 3).await;

    let surface = env.dashboard.renderer().surface();
    assert_eq!(all_values(&surface.chart), vec![6, 7]);
    assert_eq!(surface.label, Some(Entity::Country(country("US"))));

    env.dashboard.select_entity(country("US")).await;

    let surface = env.dashboard.renderer().surface();
    assert_eq!(all_values(&surface.chart), vec![6, 7]);
    assert_eq!(surface.label, Some(Entity::World));
    assert_eq!(env.dashboard.selection().await.entity, Entity::World);

    env.stop().await;
}

#[tokio::test]
async fn rapid_selections_should_chart_only_the_last_country() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Environment::start(two_country_timeline()).await;
    let refreshes_on_startup = env.dashboard.renderer().surface().chart_refreshes;

    env.dashboard.select_entity(country("US")).await;
    env.dashboard.select_entity(country("DE")).await;
    tokio::time::sleep(env.config.selection.debounce() * 3).await;

    let surface = env.dashboard.renderer().surface();
    assert_eq!(surface.chart_refreshes, refreshes_on_startup + 1);
    assert_eq!(all_values(&surface.chart), vec![2, 0, 4]);

    env.stop().await;
}

#[tokio::test]
async fn a_past_time_index_should_survive_the_poller() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Environment::start(two_country_timeline()).await;

    assert_eq!(env.dashboard.select_time_index(7).await, 2);
    env.dashboard.select_time_index(0).await;

    let jobs = app::start(&env.config, &env.dashboard);
    tokio::time::sleep(env.config.poller.interval() * 4).await;
    jobs.stop().await;

    {
        let state = env.dashboard.state().await;
        assert_eq!(state.selection.time_index, TimeIndex::At(0));
        assert_eq!(state.view.bubbles.get(&country("US")).unwrap().counters, Counters::new(10, 4));
        assert_eq!(state.view.totals, Counters::new(13, 5));
    }

    env.stop().await;
}

mod on_bootstrap {
    use super::*;

    #[tokio::test]
    async fn the_dashboard_should_start_even_if_the_backend_is_down() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let config = configuration::ephemeral_with_source(unreachable_base_url().await);
        std::fs::write(
            &config.bootstrap.timeline_path,
            serde_json::to_string(&two_country_timeline()).unwrap(),
        )
        .unwrap();

        let dashboard = initialize_dashboard(&config).await.unwrap();

        let state = dashboard.state().await;
        assert!(!state.view.chart.is_bound());
        assert_eq!(state.view.bubbles.len(), 2);
        assert_eq!(state.store.timeline().len(), 3);
    }

    #[tokio::test]
    async fn it_should_fail_without_a_bootstrap_timeline() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let config = configuration::ephemeral();

        assert!(initialize_dashboard(&config).await.is_err());
    }

    #[tokio::test]
    async fn it_should_fail_with_an_empty_bootstrap_timeline() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let config = configuration::ephemeral();
        std::fs::write(&config.bootstrap.timeline_path, "[]").unwrap();

        assert!(initialize_dashboard(&config).await.is_err());
    }
}

#[tokio::test]
async fn the_jobs_should_run_until_stopped() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Environment::start(us_timeline()).await;

    let jobs = app::start(&env.config, &env.dashboard);
    assert!(!jobs.poller.is_finished());
    jobs.stop().await;

    env.stop().await;
}
