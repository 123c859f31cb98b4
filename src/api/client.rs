//! Authenticated HTTP access to the remote content store.

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

const VERSION_HEADER: &str = "Notion-Version";
const VERSION_PIN: &str = "2022-06-28";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Server(String),
    #[error("invalid credential: {0}")]
    Credential(String),
}

/// Handle on the remote store carrying the base URL and credential.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
    key: String,
}

impl ApiClient {
    pub fn new(base: &str, key: String) -> Result<Self, ApiError> {
        let base = Url::parse(base)?.join("/")?;
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base, key })
    }

    pub fn user_agent() -> &'static str {
        concat!("quaderno/", env!("CARGO_PKG_VERSION"))
    }

    fn auth_header(&self) -> Result<HeaderValue, ApiError> {
        HeaderValue::from_str(&format!("Bearer {}", self.key))
            .map_err(|e| ApiError::Credential(e.to_string()))
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(ApiError::Url)
    }

    /// Issue an authenticated JSON request against an API path.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let mut url = self.url(path)?;
        if let Some(q) = query {
            url.set_query(None);
            let mut qp = url.query_pairs_mut();
            for (k, v) in q {
                qp.append_pair(k, v);
            }
        }

        let mut req = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, self.auth_header()?)
            .header(VERSION_HEADER, VERSION_PIN);
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = req.send().await?;
        Self::handle(resp).await
    }

    /// Fetch a binary payload from an absolute URL.
    ///
    /// Asset URLs are pre-signed by the remote store, so no credential is
    /// attached.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Bytes, ApiError> {
        let url = Url::parse(url)?;
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ApiError::Server(format!("status {status} body {text}")));
        }
        Ok(bytes)
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ApiError::Server(format!("status {status} body {text}")));
        }
        let val = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Server(format!("failed to parse body: {e}")))?;
        Ok(val)
    }
}
