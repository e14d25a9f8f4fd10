//! A fake backend serving the data endpoints.
//!
//! Every endpoint answers with the reply registered for its path, or with a
//! `404 Not Found` when nothing was registered.
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde::Serialize;
use tokio::task::JoinHandle;
use url::Url;

#[derive(Clone, Debug)]
struct Reply {
    status: StatusCode,
    body: String,
}

type Replies = Arc<RwLock<HashMap<String, Reply>>>;

pub struct FakeBackend {
    address: SocketAddr,
    replies: Replies,
    task: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("it should bind an ephemeral port");
        let address = listener.local_addr().expect("it should have a local address");

        let replies = Replies::default();

        let app = Router::new().fallback(reply).with_state(replies.clone());

        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("the fake backend should run");
        });

        Self { address, replies, task }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.address)).expect("it should be a valid url")
    }

    /// Answers `200 OK` with `body` serialized as JSON.
    pub fn reply_json<T: Serialize>(&self, path: &str, body: &T) {
        let body = serde_json::to_string(body).expect("the body should be serializable");
        self.reply(path, StatusCode::OK, &body);
    }

    pub fn reply(&self, path: &str, status: StatusCode, body: &str) {
        self.replies.write().expect("the replies lock should not be poisoned").insert(
            path.to_owned(),
            Reply {
                status,
                body: body.to_owned(),
            },
        );
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

async fn reply(State(replies): State<Replies>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    let reply = replies
        .read()
        .expect("the replies lock should not be poisoned")
        .get(path)
        .cloned();

    match reply {
        Some(reply) => (reply.status, [(header::CONTENT_TYPE, "application/json")], reply.body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A url nobody listens on.
pub async fn unreachable_base_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("it should bind an ephemeral port");
    let address = listener.local_addr().expect("it should have a local address");
    drop(listener);

    Url::parse(&format!("http://{address}/")).expect("it should be a valid url")
}
