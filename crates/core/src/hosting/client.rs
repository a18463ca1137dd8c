//! ImgBB upload client.

use std::future::Future;

use base64::{Engine, engine::general_purpose::STANDARD};
use pixstash_shared::ImageId;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{error, info};

use super::config::HostingConfig;
use super::error::HostingError;

/// An image stored by the remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedImage {
    /// Public URL of the image.
    pub url: String,
    /// URL that removes the image, when the host provides one.
    pub delete_url: Option<String>,
}

/// Remote image host.
///
/// Implemented by [`ImgbbClient`]; tests substitute their own.
pub trait ImageHost: Send + Sync {
    /// Upload `bytes` under the name `{image_id}_{filename}`.
    ///
    /// A single attempt is made.
    fn upload(
        &self,
        bytes: &[u8],
        filename: &str,
        image_id: &ImageId,
    ) -> impl Future<Output = Result<HostedImage, HostingError>> + Send;

    /// Short provider name for logs and health output.
    fn provider_name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct ImgbbResponse {
    #[serde(default)]
    success: bool,
    data: Option<ImgbbData>,
    error: Option<ImgbbErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ImgbbData {
    url: String,
    delete_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImgbbErrorBody {
    message: Option<String>,
}

/// ImgBB API client.
pub struct ImgbbClient {
    client: reqwest::Client,
    config: HostingConfig,
}

impl ImgbbClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: HostingConfig) -> Result<Self, HostingError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HostingError::Configuration(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &HostingConfig {
        &self.config
    }

    /// Remote name for an upload.
    #[must_use]
    pub fn upload_name(image_id: &ImageId, filename: &str) -> String {
        format!("{image_id}_{filename}")
    }

    async fn send_upload(&self, encoded: String, name: String) -> Result<HostedImage, HostingError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .form(&[
                ("key", self.config.api_key.as_str()),
                ("image", encoded.as_str()),
                ("name", name.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(HostingError::UnexpectedStatus(status.as_u16()));
        }

        let body: ImgbbResponse = response.json().await?;
        Self::interpret(body)
    }

    fn interpret(body: ImgbbResponse) -> Result<HostedImage, HostingError> {
        if !body.success {
            return Err(HostingError::api(body.error.and_then(|e| e.message)));
        }
        let data = body
            .data
            .ok_or_else(|| HostingError::invalid_response("success response without data"))?;
        Ok(HostedImage {
            url: data.url,
            delete_url: data.delete_url.filter(|u| !u.is_empty()),
        })
    }
}

impl ImageHost for ImgbbClient {
    async fn upload(
        &self,
        bytes: &[u8],
        filename: &str,
        image_id: &ImageId,
    ) -> Result<HostedImage, HostingError> {
        let encoded = STANDARD.encode(bytes);
        let name = Self::upload_name(image_id, filename);

        info!(image_id = %image_id, size = bytes.len(), "Uploading to ImgBB");

        let result = self.send_upload(encoded, name).await;

        match &result {
            Ok(hosted) => info!(image_id = %image_id, url = %hosted.url, "Uploaded to ImgBB"),
            Err(e) => error!(image_id = %image_id, error = %e, "ImgBB upload failed"),
        }
        result
    }

    fn provider_name(&self) -> &'static str {
        "ImgBB"
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use mockito::Matcher;

    fn client_for(url: String) -> ImgbbClient {
        let config = HostingConfig::new("test-key").with_api_url(url);
        ImgbbClient::from_config(config).expect("client should build")
    }

    fn image_id() -> ImageId {
        ImageId::parse("abc123").expect("valid id")
    }

    #[test]
    fn test_upload_name() {
        assert_eq!(
            ImgbbClient::upload_name(&image_id(), "cat.png"),
            "abc123_cat.png"
        );
    }

    #[tokio::test]
    async fn test_upload_success() {
        let mut server = mockito::Server::new_async().await;
        let bytes = b"\x89PNG fake image";
        let mock = server
            .mock("POST", "/1/upload")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "test-key".into()),
                Matcher::UrlEncoded("name".into(), "abc123_cat.png".into()),
                Matcher::UrlEncoded("image".into(), STANDARD.encode(bytes)),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"status":200,"data":{"url":"https://x/cat.png","delete_url":"https://x/del/1"}}"#,
            )
            .create_async()
            .await;

        let client = client_for(format!("{}/1/upload", server.url()));
        let hosted = client
            .upload(bytes, "cat.png", &image_id())
            .await
            .expect("upload should succeed");

        mock.assert_async().await;
        assert_eq!(hosted.url, "https://x/cat.png");
        assert_eq!(hosted.delete_url.as_deref(), Some("https://x/del/1"));
    }

    #[tokio::test]
    async fn test_upload_api_failure_flag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/1/upload")
            .with_status(200)
            .with_body(r#"{"success":false,"error":{"message":"Invalid API v1 key."}}"#)
            .create_async()
            .await;

        let client = client_for(format!("{}/1/upload", server.url()));
        let err = client
            .upload(b"data", "cat.png", &image_id())
            .await
            .unwrap_err();

        assert!(matches!(err, HostingError::Api(ref m) if m == "Invalid API v1 key."));
    }

    #[tokio::test]
    async fn test_upload_failure_without_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/1/upload")
            .with_status(200)
            .with_body(r#"{"success":false}"#)
            .create_async()
            .await;

        let client = client_for(format!("{}/1/upload", server.url()));
        let err = client
            .upload(b"data", "cat.png", &image_id())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Unknown error");
    }

    #[tokio::test]
    async fn test_upload_unexpected_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/1/upload")
            .with_status(400)
            .with_body(r#"{"status_code":400,"error":{"message":"Empty upload source."}}"#)
            .create_async()
            .await;

        let client = client_for(format!("{}/1/upload", server.url()));
        let err = client
            .upload(b"data", "cat.png", &image_id())
            .await
            .unwrap_err();

        assert!(matches!(err, HostingError::UnexpectedStatus(400)));
    }

    #[tokio::test]
    async fn test_upload_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/1/upload")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = client_for(format!("{}/1/upload", server.url()));
        let err = client
            .upload(b"data", "cat.png", &image_id())
            .await
            .unwrap_err();

        assert!(matches!(err, HostingError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_upload_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client = client_for(format!("http://{addr}/1/upload"));
        let err = client
            .upload(b"data", "cat.png", &image_id())
            .await
            .unwrap_err();

        assert!(matches!(err, HostingError::Network(_)));
    }

    #[tokio::test]
    async fn test_upload_timeout() {
        // Accept connections but never answer.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        let holder = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = HostingConfig::new("test-key")
            .with_api_url(format!("http://{addr}/1/upload"))
            .with_timeout(Duration::from_millis(200));
        let client = ImgbbClient::from_config(config).expect("client should build");

        let err = client
            .upload(b"data", "cat.png", &image_id())
            .await
            .unwrap_err();

        assert!(matches!(err, HostingError::Timeout));
        holder.abort();
    }
}
