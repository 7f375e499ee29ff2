use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {status}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Shared HTTP client every service issues its requests through.
///
/// Requests are sent once and the result is handed back untouched: no retries,
/// no timeout policy, no local validation of payloads.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<R>(&self, path: &str) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        Self::send(self.http.get(&url)).await
    }

    /// POST `body` as JSON to `path`, relative to the base URL.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        Self::send(self.http.post(&url).json(body)).await
    }

    async fn send<R>(request: RequestBuilder) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Failed to read error body: {:?}", e);
                    String::new()
                }
            };
            tracing::debug!("Request rejected with {}: {}", status, body);
            return Err(ClientError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://example.com/api/");
        assert_eq!(client.url("/events/1/archive"), "http://example.com/api/events/1/archive");
    }

    #[tokio::test]
    async fn test_post_sends_json_and_decodes_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/echo")
                    .header("content-type", "application/json")
                    .json_body(json!({ "hello": "world" }));
                then.status(200).json_body(json!({ "ok": true }));
            })
            .await;

        let client = ApiClient::new(server.base_url());
        let result: Value = client.post("/echo", &json!({ "hello": "world" })).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_null() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/noop");
                then.status(204);
            })
            .await;

        let client = ApiClient::new(server.base_url());
        let result: Value = client.post("/noop", &json!({})).await.unwrap();
        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn test_error_status_is_returned() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/missing");
                then.status(404).json_body(json!({ "error": "Event not found" }));
            })
            .await;

        let client = ApiClient::new(server.base_url());
        let err = client
            .post::<_, Value>("/missing", &json!({}))
            .await
            .unwrap_err();

        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(body.contains("Event not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/garbage");
                then.status(200).body("not json");
            })
            .await;

        let client = ApiClient::new(server.base_url());
        let err = client.get::<Value>("/garbage").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
