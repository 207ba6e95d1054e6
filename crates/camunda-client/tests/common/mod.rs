//! Mock engine for integration tests.
//!
//! Serves canned responses keyed by method and path on a random local port and
//! records every request it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use camunda_client::{CamundaClient, ConnectionProfile};

/// One request as seen by the mock engine.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct MockEngine {
    routes: Arc<Mutex<HashMap<(String, String), Canned>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a status and raw body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            Canned {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    /// Answer `method path` with 200 and the given body after a delay.
    pub fn respond_slowly(&self, method: &str, path: &str, delay: Duration) -> &Self {
        self.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            Canned {
                status: StatusCode::OK,
                body: "{}".to_string(),
                delay: Some(delay),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Bind to a random port and serve in the background.
    ///
    /// Returns the engine REST base URL, with a trailing slash.
    pub async fn start(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/engine-rest/", addr)
    }
}

async fn handle(
    State(engine): State<MockEngine>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/engine-rest")
        .unwrap_or(uri.path())
        .to_string();

    engine.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let canned = engine
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned();

    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            (
                canned.status,
                [(header::CONTENT_TYPE, "application/json")],
                canned.body,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            r#"{"type":"RestException","message":"no such route"}"#,
        )
            .into_response(),
    }
}

/// A client pointed at `base_url` with default settings.
pub fn client_for(base_url: &str) -> CamundaClient {
    CamundaClient::new(ConnectionProfile {
        base_url: base_url.to_string(),
        ..Default::default()
    })
    .unwrap()
}

/// A base URL on which nothing is listening.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/engine-rest", addr)
}
