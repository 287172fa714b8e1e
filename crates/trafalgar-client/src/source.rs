//! # Catalog Sources
//!
//! Where the product catalog comes from.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     HttpCatalogSource::fetch_catalog                    │
//! │                                                                         │
//! │   GET {catalog.url}                                                     │
//! │        │                                                                │
//! │        ├── connect error / reset ───────────► ClientError::Network      │
//! │        ├── no response within timeout ──────► ClientError::Timeout      │
//! │        ▼                                                                │
//! │   status 2xx? ── no ────────────────────────► ClientError::Status       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   parse_catalog(body)                                                   │
//! │        ├── not an array of records ─────────► ClientError::Parse        │
//! │        ├── duplicate id / negative price ───► ClientError::InvalidCatalog│
//! │        ▼                                                                │
//! │   Ok(Vec<Product>)                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;
use url::Url;

use trafalgar_core::{parse_catalog, Product};

use crate::config::CatalogSettings;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Catalog Source Trait
// =============================================================================

/// The external catalog endpoint.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches one catalog snapshot.
    async fn fetch_catalog(&self) -> ClientResult<Vec<Product>>;

    /// Short description used in log records.
    fn describe(&self) -> String {
        "catalog source".to_string()
    }
}

// =============================================================================
// HTTP Catalog Source
// =============================================================================

/// Fetches the catalog with a single HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
    timeout: Option<Duration>,
}

impl HttpCatalogSource {
    /// Creates a source for `url` with an optional request timeout.
    pub fn new(url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let url = Url::parse(url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(HttpCatalogSource {
            client,
            url,
            timeout,
        })
    }

    /// Creates a source from the `[catalog]` config section.
    pub fn from_settings(settings: &CatalogSettings) -> ClientResult<Self> {
        Self::new(&settings.url, settings.request_timeout())
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout.map(|t| t.as_secs()).unwrap_or_default())
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> ClientResult<Vec<Product>> {
        debug!(url = %self.url, "Requesting product catalog");

        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let items = parse_catalog(&body)?;

        debug!(count = items.len(), "Catalog payload parsed");
        Ok(items)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use axum::routing::get;
    use axum::Router;

    const CATALOG: &str =
        r#"[{"id":1,"name":"Milk","price":2.5},{"id":2,"name":"Bread","price":1.8}]"#;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/products", addr)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve(Router::new().route(
            "/api/products",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], CATALOG) }),
        ))
        .await;

        let source = HttpCatalogSource::new(&url, Some(Duration::from_secs(5))).unwrap();
        let items = source.fetch_catalog().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Milk");
        assert_eq!(items[1].price.cents(), 180);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let url = serve(Router::new().route(
            "/api/products",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        ))
        .await;

        let source = HttpCatalogSource::new(&url, None).unwrap();
        let err = source.fetch_catalog().await.unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 503 }));
        assert_eq!(err.user_message(), "Failed to fetch products (HTTP 503)");
    }

    #[tokio::test]
    async fn test_fetch_unparseable_body() {
        let url = serve(Router::new().route(
            "/api/products",
            get(|| async { "<html>not json</html>" }),
        ))
        .await;

        let source = HttpCatalogSource::new(&url, None).unwrap();
        let err = source.fetch_catalog().await.unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_catalog() {
        let url = serve(Router::new().route(
            "/api/products",
            get(|| async { r#"[{"id":1,"name":"Milk","price":-2.5}]"# }),
        ))
        .await;

        let source = HttpCatalogSource::new(&url, None).unwrap();
        let err = source.fetch_catalog().await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidCatalog(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source =
            HttpCatalogSource::new(&format!("http://{}/api/products", addr), None).unwrap();
        let err = source.fetch_catalog().await.unwrap_err();

        assert!(matches!(err, ClientError::Network(_)));
        assert!(err
            .user_message()
            .starts_with("Could not reach the product catalog"));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let url = serve(Router::new().route(
            "/api/products",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                CATALOG
            }),
        ))
        .await;

        let source = HttpCatalogSource::new(&url, Some(Duration::from_millis(200))).unwrap();
        let err = source.fetch_catalog().await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout(_)));
    }

    #[test]
    fn test_rejects_malformed_url() {
        assert!(HttpCatalogSource::new("::not a url::", None).is_err());
    }
}
