//! The seam between the client and the network.
//!
//! [`HttpTransport`] talks to a running server with [`reqwest`]; tests plug in
//! their own [`Transport`] to count and script calls.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::ClientError;

/// One API call, with `path` relative to the `/api` root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and decoded JSON body of a response. An empty body reads as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`ClientError::Api`], reading the
    /// server's `{ "error", "code" }` body when present.
    pub fn into_result(self) -> Result<Value, ClientError> {
        if self.is_success() {
            return Ok(self.body);
        }
        let text = |key: &str| {
            self.body
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Err(ClientError::Api {
            status: self.status,
            code: text("code"),
            message: text("error"),
        })
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// [`Transport`] over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
}

impl HttpTransport {
    /// * `base_url` - Server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            api_url: format!("{}/api", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = format!("{}/{}", self.api_url, request.path.trim_start_matches('/'));
        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = decode_body(status, &bytes)?;
        tracing::debug!(method = %request.method, %url, status, "API call");
        Ok(ApiResponse { status, body })
    }
}

/// Decode a response body. An error status with a body that is not JSON
/// (e.g. a proxy's HTML page) decodes to `Null` so the status survives.
fn decode_body(status: u16, bytes: &[u8]) -> Result<Value, ClientError> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_slice(bytes) {
        Ok(body) => Ok(body),
        Err(err) if !(200..300).contains(&status) => {
            tracing::debug!(status, error = %err, "Error response body is not JSON");
            Ok(Value::Null)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn error_body_becomes_api_error() {
        let response = ApiResponse {
            status: 404,
            body: serde_json::json!({ "error": "News with id 3 not found", "code": "NOT_FOUND" }),
        };
        assert_matches!(
            response.into_result(),
            Err(ClientError::Api { status: 404, ref code, .. }) if code == "NOT_FOUND"
        );
    }

    #[test]
    fn error_without_body_still_carries_status() {
        let response = ApiResponse { status: 500, body: Value::Null };
        let err = response.into_result().unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn html_error_page_keeps_its_status() {
        let body = decode_body(502, b"<html>Bad Gateway</html>").unwrap();
        assert_eq!(body, Value::Null);
        let err = ApiResponse { status: 502, body }.into_result().unwrap_err();
        assert_matches!(err, ClientError::Api { status: 502, .. });
    }

    #[test]
    fn non_json_success_body_is_a_decode_error() {
        assert_matches!(decode_body(200, b"<html>").unwrap_err(), ClientError::Decode(_));
        assert_eq!(decode_body(204, b"").unwrap(), Value::Null);
    }

    #[test]
    fn request_builder_collects_query() {
        let request = ApiRequest::get("team-members").with_query("category", "student");
        assert_eq!(request.query, vec![("category".to_string(), "student".to_string())]);
        assert_eq!(request.method, Method::GET);
    }
}
