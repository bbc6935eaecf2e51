#![allow(dead_code)]
use super::dns_server_mock::build_response;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DohBehavior {
    /// Answers POST directly.
    Post,
    /// Rejects POST with 405 and answers GET.
    GetOnly,
    /// Fails every request with 500.
    ServerError,
    /// Answers with bytes that are not a DNS message.
    Garbage,
}

#[derive(Clone)]
struct MockState {
    behavior: DohBehavior,
    posts: Arc<AtomicUsize>,
    gets: Arc<AtomicUsize>,
}

/// Plain-HTTP DoH endpoint on loopback.
pub struct MockDohServer {
    addr: SocketAddr,
    posts: Arc<AtomicUsize>,
    gets: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl MockDohServer {
    pub async fn start(behavior: DohBehavior) -> Self {
        let posts = Arc::new(AtomicUsize::new(0));
        let gets = Arc::new(AtomicUsize::new(0));

        let state = MockState {
            behavior,
            posts: posts.clone(),
            gets: gets.clone(),
        };

        let app = Router::new()
            .route("/dns-query", get(handle_get).post(handle_post))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            posts,
            gets,
            task,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/dns-query", self.addr)
    }

    pub fn posts(&self) -> usize {
        self.posts.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

impl Drop for MockDohServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn dns_message(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/dns-message")],
        bytes,
    )
        .into_response()
}

fn answer(state: &MockState, query: &[u8]) -> Response {
    match state.behavior {
        DohBehavior::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        DohBehavior::Garbage => dns_message(vec![0xde, 0xad]),
        DohBehavior::Post | DohBehavior::GetOnly => dns_message(build_response(query, false, false)),
    }
}

async fn handle_post(State(state): State<MockState>, body: Bytes) -> Response {
    state.posts.fetch_add(1, Ordering::SeqCst);
    if state.behavior == DohBehavior::GetOnly {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    answer(&state, &body)
}

async fn handle_get(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.gets.fetch_add(1, Ordering::SeqCst);
    let Some(query) = params
        .get("dns")
        .and_then(|encoded| URL_SAFE_NO_PAD.decode(encoded).ok())
    else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    answer(&state, &query)
}
