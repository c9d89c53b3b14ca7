use reqwest::Client;
use thiserror::Error;
use url::Url;
use tokio::time::Duration;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to request the listing page")]
    Request(#[from] reqwest::Error),
    #[error("listing page body is not valid UTF-8")]
    Decode(#[from] std::string::FromUtf8Error),
}

/// Thin HTTP boundary: one GET per call, body decoded as UTF-8 text.
/// No retries and no caching; timeouts surface as [`FetchError::Request`].
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        PageFetcher {
            client: Client::builder()
                .gzip(true)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }

    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let res = self.client.get(url.clone()).send().await?;
        let res = res.error_for_status()?;
        let body = res.bytes().await?;
        let text = String::from_utf8(body.to_vec())?;

        Ok(text)
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
