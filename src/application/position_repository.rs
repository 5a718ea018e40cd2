// Repository trait for position store access
use crate::domain::position::PositionSample;
use async_trait::async_trait;

#[async_trait]
pub trait PositionRepository: Send + Sync {
    /// Newest samples first, at most `limit` rows
    async fn latest_positions(&self, limit: usize) -> anyhow::Result<Vec<PositionSample>>;

    /// Total number of stored samples, used as a connectivity probe
    async fn count_positions(&self) -> anyhow::Result<u64>;
}
