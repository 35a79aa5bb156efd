use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::{Error, FetchError, Result};

/// A single retrieval of one scan. Implementations never retry.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> std::result::Result<Vec<u8>, FetchError>;
}

pub struct HttpFetcher {
    pub client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> std::result::Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        match response.status() {
            status if status.is_success() => {
                let body = response.bytes().await.map_err(FetchError::Transport)?;
                Ok(body.to_vec())
            }
            status => Err(FetchError::Http { status }),
        }
    }
}
