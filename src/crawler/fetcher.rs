//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests bounded by a per-request timeout
//! - Error classification into [`FetchError`]
//!
//! There is no retry: a single failure is reported to the caller, which
//! abandons that page and carries on with the rest of the pass.

use crate::config::UserAgentConfig;
use crate::FetchError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Raw response of a successful fetch
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Page body content
    pub body: String,
}

impl FetchedPage {
    /// Builds a 200 `text/html` page, mostly useful for stub fetchers
    pub fn html(url: Url, body: impl Into<String>) -> Self {
        Self {
            final_url: url,
            status: 200,
            content_type: "text/html; charset=utf-8".to_string(),
            body: body.into(),
        }
    }
}

/// Retrieves the content behind a URL
///
/// The crawler is generic over this trait so tests can substitute an
/// in-memory site for the network.
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, failing with [`FetchError`] on timeout, network error,
    /// or a non-success status
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Upper bound for a whole request, body included
///
/// # Example
///
/// ```no_run
/// use knowledge_index::config::UserAgentConfig;
/// use knowledge_index::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "KnowledgeIndex".to_string(),
///     crawler_version: "0.1.0".to_string(),
///     contact_url: "https://example.com/bot".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, timeout)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
        }
    }

    fn fetcher(timeout: Duration) -> HttpFetcher {
        HttpFetcher::new(&create_test_config(), timeout).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&create_test_config(), Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/condeco"))
            .and(header(
                "user-agent",
                "TestCrawler/1.0 (+https://example.com/about)",
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<title>Condeco</title>", "text/html"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/condeco", server.uri())).unwrap();
        let page = fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(page.content_type, "text/html");
        assert_eq!(page.body, "<title>Condeco</title>");
        assert_eq!(page.final_url, url);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let result = fetcher(Duration::from_secs(5)).fetch(&url).await;

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();
        let result = fetcher(Duration::from_millis(300)).fetch(&url).await;

        assert!(matches!(result, Err(FetchError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Reserve a free port, then close it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = Url::parse(&format!("http://127.0.0.1:{}/gone", port)).unwrap();
        let result = fetcher(Duration::from_secs(2)).fetch(&url).await;

        assert!(matches!(result, Err(FetchError::Network { .. })));
    }
}
