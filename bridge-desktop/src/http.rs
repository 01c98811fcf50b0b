//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpRequest, HttpResponse},
};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Reqwest-based HTTP client implementation
///
/// Provides `HEAD` requests with:
/// - Connection pooling via reqwest
/// - TLS support by default
/// - A client-wide timeout, narrowed per request by `HttpRequest::timeout`
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("clinic-media-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                Client::new()
            });

        Self::with_client(client)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn map_send_error(e: reqwest::Error) -> BridgeError {
        if e.is_timeout() {
            BridgeError::OperationFailed("Request timed out".to_string())
        } else if e.is_connect() {
            BridgeError::OperationFailed(format!("Connection failed: {}", e))
        } else {
            BridgeError::OperationFailed(e.to_string())
        }
    }

    fn collect_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect()
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut req = self.client.head(&request.url);
        for (key, value) in &request.headers {
            req = req.header(key, value);
        }
        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await.map_err(Self::map_send_error)?;
        let status = response.status().as_u16();
        debug!(status, "HEAD request answered");

        Ok(HttpResponse {
            status,
            headers: Self::collect_headers(&response),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    /// Answer one connection with `status` and `content_type`, keeping the raw
    /// request text.
    async fn serve_once(
        status: u16,
        content_type: &'static str,
    ) -> (String, Arc<Mutex<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(String::new()));
        let captured = Arc::clone(&seen);

        tokio::spawn(async move {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = [0u8; 2048];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            *captured.lock().await = String::from_utf8_lossy(&buf[..n]).into_owned();
            let reply = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: {content_type}\r\n\
                 content-length: 0\r\nconnection: close\r\n\r\n"
            );
            let _ = socket.write_all(reply.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        (format!("http://{addr}/api/video-proxy"), seen)
    }

    #[tokio::test]
    async fn test_head_request_reports_status_and_type() {
        let (url, seen) = serve_once(200, "video/mp4").await;
        let client = ReqwestHttpClient::new();

        let response = client
            .execute(
                HttpRequest::head(url)
                    .header("Accept", "video/*")
                    .timeout(Duration::from_secs(5)),
            )
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.content_type().as_deref(), Some("video/mp4"));

        let raw = seen.lock().await.to_ascii_lowercase();
        assert!(raw.starts_with("head /api/video-proxy"));
        assert!(raw.contains("accept: video/*"));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let (url, _) = serve_once(404, "text/html").await;
        let client = ReqwestHttpClient::new();

        let response = client.execute(HttpRequest::head(url)).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without answering
            let held = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(held);
        });

        let client = ReqwestHttpClient::new();
        let result = client
            .execute(
                HttpRequest::head(format!("http://{addr}/slow"))
                    .timeout(Duration::from_millis(100)),
            )
            .await;

        assert!(matches!(
            result,
            Err(BridgeError::OperationFailed(msg)) if msg.contains("timed out")
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ReqwestHttpClient::with_timeout(Duration::from_secs(2));
        let result = client
            .execute(HttpRequest::head(format!("http://{addr}/missing")))
            .await;

        assert!(matches!(result, Err(BridgeError::OperationFailed(_))));
    }
}
