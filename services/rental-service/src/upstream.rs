//! Upstream first-name service
//!
//! `/bonjour-php` depends on a [`NameSource`]. In production that is
//! [`HttpNameSource`], which issues a single GET per call with no retry
//! and no caching.

use crate::error::BonjourError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

/// Provides the name composed into the greeting.
#[async_trait]
pub trait NameSource: Send + Sync {
    /// Fetch one name. Called exactly once per inbound request.
    async fn fetch_name(&self) -> Result<String, BonjourError>;
}

/// Fetches the name as the text body of a GET to the configured URL.
#[derive(Debug, Clone)]
pub struct HttpNameSource {
    http_client: Client,
    url: Url,
}

impl HttpNameSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self { http_client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl NameSource for HttpNameSource {
    async fn fetch_name(&self) -> Result<String, BonjourError> {
        debug!("Fetching name from {}", self.url);

        let resp = self
            .http_client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| BonjourError::UpstreamUnavailable(format!("request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BonjourError::UpstreamUnavailable(format!(
                "upstream returned {}",
                status
            )));
        }

        // Decoded with the charset from Content-Type, falling back to UTF-8.
        resp.text()
            .await
            .map_err(|e| BonjourError::UpstreamUnavailable(format!("failed to read body: {}", e)))
    }
}

/// Local upstream for tests: serves `body` with `status` and `content_type`
/// at `/firstname` on a random port, counting hits.
#[cfg(test)]
pub(crate) async fn spawn_upstream(
    status: axum::http::StatusCode,
    content_type: &'static str,
    body: &'static [u8],
) -> (Url, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
    use axum::{http::header, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/firstname",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, [(header::CONTENT_TYPE, content_type)], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let url = Url::parse(&format!("http://{}/firstname", addr)).unwrap();
    (url, hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::sync::atomic::Ordering;

    const TEXT: &str = "text/plain; charset=utf-8";

    fn source(url: Url) -> HttpNameSource {
        HttpNameSource::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_raw_body() {
        let (url, hits) = spawn_upstream(StatusCode::OK, TEXT, b"Alice").await;

        let name = source(url).fetch_name().await.unwrap();

        assert_eq!(name, "Alice");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_body_is_not_trimmed() {
        let (url, _) = spawn_upstream(StatusCode::OK, TEXT, b"  Bob\n").await;

        let name = source(url).fetch_name().await.unwrap();

        assert_eq!(name, "  Bob\n");
    }

    #[tokio::test]
    async fn test_empty_body() {
        let (url, _) = spawn_upstream(StatusCode::OK, TEXT, b"").await;

        let name = source(url).fetch_name().await.unwrap();

        assert_eq!(name, "");
    }

    #[tokio::test]
    async fn test_non_success_status_fails() {
        let (url, hits) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, TEXT, b"down").await;

        let result = source(url).fetch_name().await;

        assert!(matches!(result, Err(BonjourError::UpstreamUnavailable(_))));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_decodes_declared_charset() {
        let (url, _) =
            spawn_upstream(StatusCode::OK, "text/plain; charset=ISO-8859-1", b"Zo\xe9").await;

        let name = source(url).fetch_name().await.unwrap();

        assert_eq!(name, "Zo\u{e9}");
    }

    #[tokio::test]
    async fn test_undeclared_charset_falls_back_to_utf8() {
        let (url, _) =
            spawn_upstream(StatusCode::OK, "text/plain", "Zo\u{e9}".as_bytes()).await;

        let name = source(url).fetch_name().await.unwrap();

        assert_eq!(name, "Zo\u{e9}");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let (url, _) = spawn_upstream(StatusCode::OK, "text/plain", &[0xff, 0x41]).await;

        let name = source(url).fetch_name().await.unwrap();

        assert_eq!(name, "\u{fffd}A");
    }

    #[tokio::test]
    async fn test_connection_refused_fails() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{}/firstname", addr)).unwrap();

        let result = source(url).fetch_name().await;

        assert!(matches!(result, Err(BonjourError::UpstreamUnavailable(_))));
    }
}
