// HTTP sample feed - polls the retrieval endpoint
use crate::application::sample_feed::{FeedError, SampleFeed};
use crate::domain::position::PositionSample;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSampleFeed {
    client: reqwest::Client,
    url: String,
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpSampleFeed {
    pub fn new(url: String, limit: usize, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the sample feed")?;

        Ok(Self { client, url, limit })
    }
}

#[async_trait]
impl SampleFeed for HttpSampleFeed {
    async fn fetch_recent(&self) -> Result<Vec<PositionSample>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("limit", self.limit)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(FeedError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let mut samples: Vec<PositionSample> =
            serde_json::from_slice(&body).map_err(|e| FeedError::Malformed(e.to_string()))?;

        if samples.len() > self.limit {
            let excess = samples.len() - self.limit;
            samples.drain(..excess);
        }

        tracing::debug!("Fetched {} samples from {}", samples.len(), self.url);
        Ok(samples)
    }
}
