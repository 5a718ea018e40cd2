// Position service - Use case behind the retrieval endpoint
use crate::application::position_repository::PositionRepository;
use crate::domain::position::{MAX_FETCH, PositionSample};
use std::sync::Arc;

#[derive(Clone)]
pub struct PositionService {
    repository: Arc<dyn PositionRepository>,
}

impl PositionService {
    pub fn new(repository: Arc<dyn PositionRepository>) -> Self {
        Self { repository }
    }

    /// Most recent samples in chronological order (oldest first)
    pub async fn recent_positions(&self, limit: usize) -> anyhow::Result<Vec<PositionSample>> {
        let limit = limit.clamp(1, MAX_FETCH);
        let mut samples = self.repository.latest_positions(limit).await?;
        samples.truncate(limit);
        samples.reverse();
        Ok(samples)
    }

    pub async fn store_status(&self) -> anyhow::Result<u64> {
        self.repository.count_positions().await
    }
}
