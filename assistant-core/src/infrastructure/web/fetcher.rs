use super::html::{extract_title, html_to_text};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: StatusCode },
}

/// Text content of a fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub title: Option<String>,
    pub content: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Plain `GET` fetcher. HTML bodies are reduced to text, anything else is
/// returned as-is.
#[derive(Clone, Default)]
pub struct HttpPageFetcher {
    http: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        info!(url, "Fetching web page");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let is_html = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("html"))
            .unwrap_or(true);
        let body = response.text().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        debug!(url, bytes = body.len(), is_html, "Fetched web page body");

        let (title, content) = if is_html {
            (extract_title(&body), html_to_text(&body))
        } else {
            (None, body)
        };
        Ok(FetchedPage {
            url: url.to_string(),
            title,
            content,
        })
    }
}
