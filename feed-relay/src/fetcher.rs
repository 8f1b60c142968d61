use crate::traits::FeedSource;
use crate::types::{FetchConfig, RelayError, Result};
use async_trait::async_trait;
use backoff::backoff::{Backoff, Constant};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// HTTP feed source. Retries only on 429, after a fixed delay.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn fetch_feed(&self, url: &str, label: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url)?;
        let mut backoff = Constant::new(Duration::from_secs(self.config.rate_limit_retry_delay_seconds));
        let mut retries = 0;

        loop {
            debug!("Fetching {} from {}", label, url);

            let response = self
                .client
                .get(url.clone())
                .header(ACCEPT, self.config.accept.as_str())
                .send()
                .await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS && retries < self.config.rate_limit_retries {
                // Drain the body so the connection can be reused.
                let _ = response.bytes().await;
                retries += 1;
                if let Some(delay) = backoff.next_backoff() {
                    warn!("{} rate limited, retrying in {:?}", label, delay);
                    tokio::time::sleep(delay).await;
                }
                continue;
            }

            if !status.is_success() {
                return Err(RelayError::Status {
                    label: label.to_string(),
                    status,
                });
            }

            let body = response.bytes().await?;
            info!("Fetched {} ({} bytes)", label, body.len());
            return Ok(body.to_vec());
        }
    }
}

#[async_trait]
impl FeedSource for Fetcher {
    async fn fetch(&self, url: &str, label: &str) -> Result<Vec<u8>> {
        self.fetch_feed(url, label).await
    }
}
