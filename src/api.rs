//! Authenticated access to the clinic REST backend.
//!
//! [`ApiClient`] prefixes the configured base URL, attaches the bearer token
//! and flattens every outcome into an [`ApiResponse`] envelope: either a JSON
//! payload in `data` or a message in `error`. It never fails on its own;
//! repositories decide what an envelope means for their resource.

use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, Method, StatusCode};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::http_client::{HttpClient, HttpRequest};

/// Outcome of a single API call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    /// Decoded JSON body of a successful response.
    pub data: Option<Value>,
    /// Message describing a transport or HTTP-level failure.
    pub error: Option<String>,
    /// Status code, when a response was received at all.
    pub status: Option<StatusCode>,
}

impl ApiResponse {
    pub fn success(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: Some(StatusCode::OK),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
            status: None,
        }
    }
}

/// HTTP client bound to a base URL and optional bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient<C> {
    http: C,
    base_url: String,
    token: Option<String>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: None,
        }
    }

    /// Attaches `token` as `Authorization: Bearer` on every request. Blank
    /// tokens are ignored.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Full URL for `path` with the encoded `query` appended.
    pub fn url(&self, path: &str, query: &[(String, String)]) -> Result<String, String> {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if !query.is_empty() {
            let encoded = serde_html_form::to_string(query)
                .map_err(|e| format!("Failed to encode query string: {e}"))?;
            url.push('?');
            url.push_str(&encoded);
        }
        Ok(url)
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> ApiResponse {
        match self.url(path, query) {
            Ok(url) => self.send(Method::GET, url, None).await,
            Err(message) => ApiResponse::failure(message),
        }
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> ApiResponse
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> ApiResponse
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_json(Method::PUT, path, body).await
    }

    async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> ApiResponse
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = match serde_json::to_vec(body) {
            Ok(body) => Bytes::from(body),
            Err(e) => return ApiResponse::failure(format!("Failed to encode request body: {e}")),
        };
        match self.url(path, &[]) {
            Ok(url) => self.send(method, url, Some(body)).await,
            Err(message) => ApiResponse::failure(message),
        }
    }

    fn headers(&self, has_body: bool) -> Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| "API token contains invalid characters".to_string())?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn send(&self, method: Method, url: String, body: Option<Bytes>) -> ApiResponse {
        let headers = match self.headers(body.is_some()) {
            Ok(headers) => headers,
            Err(message) => return ApiResponse::failure(message),
        };
        debug!("{method} {url}");

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };

        let response = match self.http.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request failed: {e}");
                return ApiResponse::failure(e.to_string());
            }
        };

        let status = response.status;
        let body = if response.body.is_empty() {
            None
        } else {
            match serde_json::from_slice::<Value>(&response.body) {
                Ok(value) => Some(value),
                Err(e) if status.is_success() => {
                    return ApiResponse {
                        data: None,
                        error: Some(format!("Invalid JSON in response: {e}")),
                        status: Some(status),
                    };
                }
                Err(_) => None,
            }
        };

        if status.is_success() {
            ApiResponse {
                data: body,
                error: None,
                status: Some(status),
            }
        } else {
            ApiResponse {
                data: None,
                error: Some(error_message(status, body.as_ref())),
                status: Some(status),
            }
        }
    }
}

/// Best message for a non-2xx response: the body's `message` or `error`
/// field, otherwise the status line.
fn error_message(status: StatusCode, body: Option<&Value>) -> String {
    body.and_then(|b| {
        ["message", "error"]
            .iter()
            .filter_map(|key| b.get(*key).and_then(Value::as_str))
            .find(|m| !m.trim().is_empty())
            .map(str::to_string)
    })
    .unwrap_or_else(|| format!("HTTP {status}"))
}
