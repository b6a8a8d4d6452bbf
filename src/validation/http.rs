use log::debug;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Desktop browser user agent; several school sites refuse unknown clients
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/67.0.3396.87 Safari/537.36";

/// Why a page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("malformed response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Source of page bodies for the content gate
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

/// Basic auth credentials attached to every page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

/// Fetches pages over HTTP with a fixed timeout and user agent
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    credentials: Option<Credentials>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, credentials: Option<Credentials>) -> reqwest::Result<Self> {
        Ok(Self {
            client: create_page_client(timeout)?,
            credentials,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut request = self.client.get(url);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.user, Some(&creds.password));
        }

        let resp = request.send().await?;
        debug!("GET {} -> {}", url, resp.status());

        Ok(resp.text().await?)
    }
}

/// Create an HTTP client configured for school page fetches
pub fn create_page_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
