//! In-process mock of the commerce API.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A request received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub client_id: Option<String>,
    pub authorization: Option<String>,
    pub cache_control: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Decoded query pairs.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Canned reply body.
#[derive(Clone)]
enum Reply {
    Json(Value),
    /// Sent as-is with a `text/html` content type
    Raw(String),
}

#[derive(Default)]
struct MockState {
    responses: HashMap<(Method, String), (StatusCode, Reply)>,
    requests: Vec<RecordedRequest>,
}

/// Mock commerce API that records every request.
///
/// Routes answer with whatever was registered through [`respond`]; anything
/// else gets a 404 `{ "ok": 0 }` envelope, like the real API.
///
/// [`respond`]: MockCommerceApi::respond
#[derive(Clone)]
pub struct MockCommerceApi {
    state: Arc<Mutex<MockState>>,
    addr: SocketAddr,
}

impl MockCommerceApi {
    /// Bind to an ephemeral port and start serving.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock commerce API");
        let addr = listener.local_addr().expect("Mock has no local address");

        let state = Arc::new(Mutex::new(MockState::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock commerce API stopped");
        });

        Self { state, addr }
    }

    /// Base URL to configure the client with.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `method path` with a 200 and `body`.
    pub fn respond(&self, method: Method, path: &str, body: Value) {
        self.respond_with(method, path, StatusCode::OK, body);
    }

    pub fn respond_with(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.reply(method, path, status, Reply::Json(body));
    }

    /// Answer `method path` with a body that is not an envelope.
    pub fn respond_raw(&self, method: Method, path: &str, status: StatusCode, body: &str) {
        self.reply(method, path, status, Reply::Raw(body.to_string()));
    }

    fn reply(&self, method: Method, path: &str, status: StatusCode, reply: Reply) {
        self.state
            .lock()
            .responses
            .insert((method, path.to_string()), (status, reply));
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Requests received for `method path`.
    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| &r.method == method && r.path == path)
            .collect()
    }

    pub fn clear(&self) {
        self.state.lock().requests.clear();
    }
}

async fn handle(
    State(state): State<Arc<Mutex<MockState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
    };

    let request = RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        client_id: header("client-id"),
        authorization: header("authorization"),
        cache_control: header("cache-control"),
        body: serde_json::from_slice(&body).ok(),
    };

    let mut state = state.lock();
    let (status, reply) = state
        .responses
        .get(&(method, request.path.clone()))
        .cloned()
        .unwrap_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Reply::Json(json!({ "ok": 0, "message": "존재하지 않는 리소스입니다." })),
            )
        });
    state.requests.push(request);

    match reply {
        Reply::Json(body) => (status, Json(body)).into_response(),
        Reply::Raw(body) => (status, [(header::CONTENT_TYPE, "text/html")], body).into_response(),
    }
}
