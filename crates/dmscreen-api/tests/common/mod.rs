//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use dmscreen_api::state::AppState;
use dmscreen_core::event::ServerEvent;
use dmscreen_core::repository::AdventureRepository;
use dmscreen_session::application::hub::SessionHub;
use dmscreen_test_support::{StaticAdventureRepository, sample_adventure};
use futures_util::{SinkExt, StreamExt};
use http_body_util::BodyExt;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tower::ServiceExt;

/// Upper bound on any single wait in these tests.
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Client side of a raw WebSocket connection.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Default adventure repository: serves `sample_adventure()` as id "1".
pub fn adventures() -> Arc<dyn AdventureRepository> {
    Arc::new(StaticAdventureRepository::with("1", sample_adventure()))
}

/// Build the full app router with the given hub. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(hub: Arc<SessionHub>) -> Router {
    dmscreen_api::app(AppState::new(hub, adventures(), "1"))
}

/// A server listening on an ephemeral local port.
pub struct TestServer {
    /// Bound address.
    pub addr: SocketAddr,
    /// The hub behind the server, for inspecting session state.
    pub hub: Arc<SessionHub>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// HTTP base URL.
    pub fn http_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// WebSocket URL for `path`.
    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start the app on 127.0.0.1 with a fresh hub.
pub async fn spawn_server() -> TestServer {
    let hub = Arc::new(SessionHub::new());
    let app = build_test_app(hub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let task = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer { addr, hub, task }
}

/// Open a raw WebSocket connection to `path`.
pub async fn ws_connect(server: &TestServer, path: &str) -> WsStream {
    let (stream, _) = connect_async(server.ws_url(path)).await.unwrap();
    stream
}

/// Send a JSON value as a text frame.
pub async fn send_json(ws: &mut WsStream, value: &serde_json::Value) {
    ws.send(Message::Text(value.to_string().into())).await.unwrap();
}

/// Wait for the next event frame.
pub async fn recv_event(ws: &mut WsStream) -> ServerEvent {
    loop {
        let frame = tokio::time::timeout(TIMEOUT, ws.next())
            .await
            .expect("timed out waiting for server event")
            .expect("connection closed")
            .unwrap();
        if let Message::Text(text) = frame {
            return ServerEvent::decode(&text).unwrap();
        }
    }
}

/// Assert that no event arrives within a short grace period.
pub async fn assert_silent(ws: &mut WsStream) {
    let result = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(result.is_err(), "unexpected frame: {result:?}");
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
