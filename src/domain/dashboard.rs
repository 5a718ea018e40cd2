// Dashboard domain model - what one accepted refresh produces
use super::scene::Scene;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableRow {
    Placeholder { message: String },
    Reading { position: String, time: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub scene: Scene,
    pub rows: Vec<TableRow>,
    pub last_timestamp: Option<String>,
    pub rendered_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    pub fn new(
        scene: Scene,
        rows: Vec<TableRow>,
        last_timestamp: Option<String>,
        rendered_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            scene,
            rows,
            last_timestamp,
            rendered_at,
        }
    }
}
