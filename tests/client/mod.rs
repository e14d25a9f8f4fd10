use peermap::client::responses::Shape;
use peermap::client::{Client, Error};
use peermap_configuration::Source;
use peermap_primitives::Counters;
use peermap_test_helpers::fixtures::{aggregate_series, country, snapshot, two_country_timeline};
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::common::logging::{tracing_stderr_init, INIT};
use crate::common::server::{unreachable_base_url, FakeBackend};

fn client_for(base_url: Url) -> Client {
    Client::new(&Source {
        base_url,
        request_timeout_secs: 2,
        ..Source::default()
    })
    .unwrap()
}

#[tokio::test]
async fn it_should_fetch_the_latest_world_map() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let backend = FakeBackend::start().await;
    backend.reply_json("update_world_map", &vec![snapshot("US", 20, 7), snapshot("DE", 6, 2)]);

    let list = client_for(backend.base_url()).latest_world_map().await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, country("US"));
    assert_eq!(list[0].counters, Counters::new(20, 7));

    backend.stop();
}

#[tokio::test]
async fn it_should_recompute_the_derived_value_sent_by_the_backend() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let backend = FakeBackend::start().await;
    backend.reply(
        "update_world_map",
        reqwest::StatusCode::OK,
        r#"[{"id": "US", "awaitingPeers": 3, "usedPorts": 1, "all": 9999}]"#,
    );

    let list = client_for(backend.base_url()).latest_world_map().await.unwrap();

    assert_eq!(list[0].counters.all(), 2);

    backend.stop();
}

#[tokio::test]
async fn it_should_fetch_the_aggregate_world_series() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let backend = FakeBackend::start().await;
    let series = aggregate_series(&two_country_timeline());
    backend.reply_json("default_map_data", &series);

    let fetched = client_for(backend.base_url()).world_aggregate_series().await.unwrap();

    assert_eq!(fetched, series);

    backend.stop();
}

#[tokio::test]
async fn it_should_fetch_the_current_totals() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let backend = FakeBackend::start().await;
    backend.reply_json("current_totals", &Counters::new(26, 9));

    let totals = client_for(backend.base_url()).current_totals().await.unwrap();

    assert_eq!(totals, Counters::new(26, 9));

    backend.stop();
}

mod it_should_fail {
    use super::*;

    #[tokio::test]
    async fn when_the_series_endpoint_answers_with_the_totals() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let backend = FakeBackend::start().await;
        backend.reply_json("default_map_data", &Counters::new(1, 1));

        let err = client_for(backend.base_url()).world_aggregate_series().await.unwrap_err();

        assert!(matches!(
            err,
            Error::UnexpectedShape {
                expected: Shape::WorldAggregateSeries,
                found: Shape::CurrentTotals,
                ..
            }
        ));

        backend.stop();
    }

    #[tokio::test]
    async fn when_the_totals_endpoint_answers_with_a_series() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let backend = FakeBackend::start().await;
        backend.reply_json("current_totals", &aggregate_series(&two_country_timeline()));

        let err = client_for(backend.base_url()).current_totals().await.unwrap_err();

        assert!(matches!(
            err,
            Error::UnexpectedShape {
                expected: Shape::CurrentTotals,
                found: Shape::WorldAggregateSeries,
                ..
            }
        ));

        backend.stop();
    }

    #[tokio::test]
    async fn when_the_backend_answers_with_an_error_status() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let backend = FakeBackend::start().await;
        backend.reply("update_world_map", reqwest::StatusCode::INTERNAL_SERVER_ERROR, "{}");

        let err = client_for(backend.base_url()).latest_world_map().await.unwrap_err();

        assert!(matches!(err, Error::Status { status, .. } if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR));

        backend.stop();
    }

    #[tokio::test]
    async fn when_the_endpoint_does_not_exist() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let backend = FakeBackend::start().await;

        let err = client_for(backend.base_url()).current_totals().await.unwrap_err();

        assert!(matches!(err, Error::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND));

        backend.stop();
    }

    #[tokio::test]
    async fn when_the_body_is_not_json() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let backend = FakeBackend::start().await;
        backend.reply("update_world_map", reqwest::StatusCode::OK, "<html>maintenance</html>");

        let err = client_for(backend.base_url()).latest_world_map().await.unwrap_err();

        assert!(matches!(err, Error::Decode { .. }));

        backend.stop();
    }

    #[tokio::test]
    async fn when_the_backend_is_unreachable() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let err = client_for(unreachable_base_url().await).latest_world_map().await.unwrap_err();

        assert!(matches!(err, Error::Request { .. }));
    }
}
