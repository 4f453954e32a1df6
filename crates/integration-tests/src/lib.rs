//! In-process mock rule service for end-to-end tests
//!
//! Binds an axum server to an ephemeral localhost port, records every request
//! it receives and answers with per-path scripted replies. Unscripted paths
//! answer 404.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the service sends back for one path
#[derive(Debug, Clone)]
pub enum ReplyBody {
    Text(String),
    /// Send the request body back unchanged
    Echo,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: ReplyBody,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: ReplyBody::Text(body.into()),
            delay: None,
        }
    }

    pub fn echo() -> Self {
        Self {
            status: 200,
            body: ReplyBody::Echo,
            delay: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// One request as seen by the service
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ReceivedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Clone, Default)]
struct ServiceState {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

pub struct MockRuleService {
    addr: SocketAddr,
    state: ServiceState,
    server: tokio::task::JoinHandle<()>,
}

impl MockRuleService {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock rule service");
        let addr = listener.local_addr().expect("mock service address");

        let state = ServiceState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock rule service stopped");
            }
        });

        Self {
            addr,
            state,
            server,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Script the reply for a request path (with leading `/`)
    pub fn on(&self, path: &str, reply: Reply) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(path.to_string(), reply);
        self
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.state.received.lock().unwrap().clone()
    }

    pub fn received_count(&self) -> usize {
        self.state.received.lock().unwrap().len()
    }
}

impl Drop for MockRuleService {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<ServiceState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.received.lock().unwrap().push(ReceivedRequest {
        method,
        path: path.clone(),
        content_type,
        body: body.to_vec(),
    });

    let reply = state.replies.lock().unwrap().get(&path).cloned();
    let Some(reply) = reply else {
        return (StatusCode::NOT_FOUND, "no such rule").into_response();
    };

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match reply.body {
        ReplyBody::Text(text) => Bytes::from(text),
        ReplyBody::Echo => body,
    };

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
