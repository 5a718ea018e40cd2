// Sample feed trait - where the refresh loop gets its batches from
use crate::domain::position::PositionSample;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("position source unreachable: {0}")]
    Unavailable(String),
    #[error("position source answered {status}: {message}")]
    UpstreamStatus { status: u16, message: String },
    #[error("malformed position payload: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait SampleFeed: Send + Sync {
    /// Most recent samples, oldest first
    async fn fetch_recent(&self) -> Result<Vec<PositionSample>, FeedError>;
}
