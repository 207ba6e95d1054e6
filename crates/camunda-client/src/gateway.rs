//! HTTP gateway to the engine REST API.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::config::ConnectionProfile;
use crate::error::ClientError;
use crate::query::QueryParams;

/// Optional parts of a request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: QueryParams,
    pub json_body: Option<Value>,
}

impl RequestOptions {
    pub fn with_query(query: QueryParams) -> Self {
        Self {
            query,
            json_body: None,
        }
    }

    pub fn with_body(body: Value) -> Self {
        Self {
            query: QueryParams::default(),
            json_body: Some(body),
        }
    }
}

/// Join a base URL and a path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Issues single-attempt requests against one engine.
///
/// The inner `reqwest::Client` is kept for connection reuse only.
pub struct HttpGateway {
    inner: reqwest::Client,
    profile: ConnectionProfile,
}

impl HttpGateway {
    /// Create a gateway whose requests all use the profile's timeout.
    pub fn new(profile: ConnectionProfile) -> Result<Self, ClientError> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(profile.timeout_secs))
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self { inner, profile })
    }

    pub fn profile(&self) -> &ConnectionProfile {
        &self.profile
    }

    /// Send one request and return the parsed JSON response.
    ///
    /// A 204 status or an empty body yields an empty JSON object.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        let url = join_url(&self.profile.base_url, path);
        debug!(method = %method, url = %url, "Engine request");

        let mut request = self.inner.request(method.clone(), &url);
        if !options.query.is_empty() {
            request = request.query(options.query.as_pairs());
        }
        if let Some(body) = &options.json_body {
            request = request.json(body);
        }
        if let Some((username, password)) = self.profile.basic_credentials() {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await.map_err(|e| {
            error!(method = %method, url = %url, error = %e, "Engine request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!(method = %method, url = %url, error = %e, "Failed to read engine response");
            ClientError::Transport(e)
        })?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            error!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                "Engine returned error status"
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT || body.is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_slice(&body).map_err(|e| {
            error!(method = %method, url = %url, error = %e, "Engine returned invalid JSON");
            ClientError::MalformedBody(e)
        })
    }
}
