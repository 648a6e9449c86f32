// Venice API client
// Author: kelexine (https://github.com/kelexine)

use crate::config::{ApiKey, VeniceConfig};
use crate::error::{ProxyError, Result};
use crate::models::venice::{ImageGenerateRequest, ImageGenerateResponse, ModelList, StyleList};
use crate::utils::logging::sanitize;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Detail returned to WebUI clients when a listing call fails.
pub const LISTING_ERROR: &str = "Error accessing venice api.";

/// Client for the Venice REST API.
///
/// Every call is a single attempt: failures surface to the WebUI client
/// immediately, which is what WebUI tooling expects from a local server.
/// Anything other than `200 OK` counts as a failure, other 2xx codes included.
#[derive(Clone)]
pub struct VeniceClient {
    http_client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl VeniceClient {
    pub fn new(config: &VeniceConfig, api_key: ApiKey) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls();

        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created Venice HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /models`, optionally narrowed to image models on the Venice side.
    pub async fn list_models(&self, image_only: bool) -> Result<ModelList> {
        let url = format!("{}/models", self.base_url);
        let mut request = self.http_client.get(&url);
        if image_only {
            request = request.query(&[("type", "image")]);
        }

        let response = self.send(request).await?;
        if response.status() != StatusCode::OK {
            Self::log_failure("list models", response).await;
            return Err(ProxyError::Upstream(LISTING_ERROR.to_string()));
        }

        Self::parse(response).await
    }

    /// `GET /image/styles`
    pub async fn list_styles(&self) -> Result<StyleList> {
        let url = format!("{}/image/styles", self.base_url);

        let response = self.send(self.http_client.get(&url)).await?;
        if response.status() != StatusCode::OK {
            Self::log_failure("list styles", response).await;
            return Err(ProxyError::Upstream(LISTING_ERROR.to_string()));
        }

        Self::parse(response).await
    }

    /// `POST /image/generate`. Non-200 bodies are passed back to the caller.
    pub async fn generate_image(&self, request: &ImageGenerateRequest) -> Result<ImageGenerateResponse> {
        let url = format!("{}/image/generate", self.base_url);
        debug!("Calling image/generate for model: {}", request.model);

        let response = self
            .send(
                self.http_client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .json(request),
            )
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Venice API error: HTTP {} - Response body: {}",
                status,
                sanitize(&error_text)
            );
            return Err(ProxyError::Upstream(format!(
                "Error accessing venice api: {}.",
                error_text
            )));
        }

        let generated: ImageGenerateResponse = Self::parse(response).await?;
        debug!("Venice returned {} image(s)", generated.images.len());
        Ok(generated)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .bearer_auth(self.api_key.expose())
            .send()
            .await
            .map_err(|e| {
                error!("Venice request failed: {}", e);
                ProxyError::Http(e)
            })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response_text = response
            .text()
            .await
            .map_err(|e| ProxyError::UpstreamResponse(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Venice response: {}", e);
            debug!(
                "Response body (first 500 chars): {}",
                response_text.chars().take(500).collect::<String>()
            );
            ProxyError::UpstreamResponse(e.to_string())
        })
    }

    async fn log_failure(operation: &str, response: Response) {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(
            "Venice {} failed: HTTP {} - {}",
            operation,
            status,
            sanitize(&body)
        );
    }
}

impl std::fmt::Debug for VeniceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VeniceClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> VeniceClient {
        let config = VeniceConfig {
            api_base_url: server.url(),
            ..VeniceConfig::default()
        };
        VeniceClient::new(&config, ApiKey::new("test-key")).unwrap()
    }

    fn generate_request() -> ImageGenerateRequest {
        ImageGenerateRequest {
            model: "fluently-xl".to_string(),
            prompt: "a cat".to_string(),
            negative_prompt: String::new(),
            width: 1024,
            height: 1024,
            steps: 30,
            hide_watermark: true,
            return_binary: false,
            style_preset: None,
        }
    }

    #[tokio::test]
    async fn test_list_models_sends_filter_and_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/models")
            .match_query(Matcher::UrlEncoded("type".into(), "image".into()))
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[{"id":"fluently-xl","type":"image"}]}"#)
            .create_async()
            .await;

        let list = client_for(&server).list_models(true).await.unwrap();

        mock.assert_async().await;
        assert_eq!(list.data[0].id, "fluently-xl");
    }

    #[tokio::test]
    async fn test_list_styles_failure_uses_fixed_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/image/styles")
            .with_status(500)
            .with_body("internal details")
            .create_async()
            .await;

        let err = client_for(&server).list_styles().await.unwrap_err();

        assert!(matches!(err, ProxyError::Upstream(_)));
        assert_eq!(err.to_string(), LISTING_ERROR);
    }

    #[tokio::test]
    async fn test_generate_image_posts_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/image/generate")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "fluently-xl",
                "hide_watermark": true,
                "return_binary": false
            })))
            .with_status(200)
            .with_body(r#"{"images":["aW1n"]}"#)
            .create_async()
            .await;

        let resp = client_for(&server).generate_image(&generate_request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(resp.images, vec![json!("aW1n")]);
    }

    #[tokio::test]
    async fn test_generate_image_error_carries_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/image/generate")
            .with_status(402)
            .with_body(r#"{"error":"Insufficient balance"}"#)
            .create_async()
            .await;

        let err = client_for(&server).generate_image(&generate_request()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            r#"Error accessing venice api: {"error":"Insufficient balance"}."#
        );
    }

    #[tokio::test]
    async fn test_generate_image_other_2xx_is_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/image/generate")
            .with_status(201)
            .with_body(r#"{"images":["aW1n"]}"#)
            .create_async()
            .await;

        let err = client_for(&server).generate_image(&generate_request()).await.unwrap_err();

        assert!(matches!(err, ProxyError::Upstream(_)));
        assert_eq!(
            err.to_string(),
            r#"Error accessing venice api: {"images":["aW1n"]}."#
        );
    }

    #[tokio::test]
    async fn test_list_models_no_content_is_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/models")
            .match_query(Matcher::Any)
            .with_status(204)
            .create_async()
            .await;

        let err = client_for(&server).list_models(true).await.unwrap_err();
        assert_eq!(err.to_string(), LISTING_ERROR);
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/image/generate")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client_for(&server).generate_image(&generate_request()).await.unwrap_err();
        assert!(matches!(err, ProxyError::UpstreamResponse(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let client = VeniceClient::new(&VeniceConfig::default(), ApiKey::new("vk-secret")).unwrap();
        assert!(!format!("{:?}", client).contains("vk-secret"));
    }
}
