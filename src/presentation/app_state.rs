// Application state for HTTP handlers
use crate::application::position_service::PositionService;
use crate::domain::dashboard::DashboardSnapshot;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    pub position_service: PositionService,
    pub snapshots: watch::Receiver<DashboardSnapshot>,
    pub refresh_interval: Duration,
}
