// Router assembly
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_page, dashboard_snapshot, health_check, list_positions, stream_dashboard,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/positions", get(list_positions))
        .route("/api/dashboard", get(dashboard_snapshot))
        .route("/api/dashboard/stream", get(stream_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::position_repository::PositionRepository;
    use crate::application::position_service::PositionService;
    use crate::domain::dashboard::DashboardSnapshot;
    use crate::domain::grid::GridConfig;
    use crate::domain::position::PositionSample;
    use crate::domain::scene::Scene;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::watch;

    struct FixedRepository {
        rows: Option<Vec<PositionSample>>,
    }

    #[async_trait]
    impl PositionRepository for FixedRepository {
        async fn latest_positions(&self, limit: usize) -> anyhow::Result<Vec<PositionSample>> {
            match &self.rows {
                Some(rows) => Ok(rows.iter().take(limit).cloned().collect()),
                None => anyhow::bail!("connection refused"),
            }
        }

        async fn count_positions(&self) -> anyhow::Result<u64> {
            match &self.rows {
                Some(rows) => Ok(rows.len() as u64),
                None => anyhow::bail!("connection refused"),
            }
        }
    }

    async fn serve(
        rows: Option<Vec<PositionSample>>,
    ) -> (String, watch::Sender<DashboardSnapshot>) {
        let scene = Scene::new(&GridConfig::default());
        let snapshot = DashboardSnapshot::new(scene, Vec::new(), None, None);
        let (tx, rx) = watch::channel(snapshot);
        let state = Arc::new(AppState {
            position_service: PositionService::new(Arc::new(FixedRepository { rows })),
            snapshots: rx,
            refresh_interval: Duration::from_secs(1),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        (format!("http://{}", addr), tx)
    }

    fn newest_first() -> Vec<PositionSample> {
        vec![
            PositionSample::new(7.75, 7.75, "2025-06-12 10:15:02"),
            PositionSample::new(0.25, 0.25, "2025-06-12 10:15:01"),
        ]
    }

    #[tokio::test]
    async fn test_positions_endpoint_returns_oldest_first() {
        let (base, _tx) = serve(Some(newest_first())).await;

        let body: serde_json::Value = reqwest::get(format!("{}/api/positions", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(
            body,
            serde_json::json!([
                { "x": 0.25, "y": 0.25, "time": "2025-06-12 10:15:01" },
                { "x": 7.75, "y": 7.75, "time": "2025-06-12 10:15:02" }
            ])
        );
    }

    #[tokio::test]
    async fn test_positions_endpoint_reports_store_failure() {
        let (base, _tx) = serve(None).await;

        let response = reqwest::get(format!("{}/api/positions", base)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Database connection error"));
    }

    #[tokio::test]
    async fn test_health_check_follows_store() {
        let (up, _tx_up) = serve(Some(Vec::new())).await;
        let (down, _tx_down) = serve(None).await;

        let ok = reqwest::get(format!("{}/healthz", up)).await.unwrap();
        assert_eq!(ok.status(), reqwest::StatusCode::OK);

        let failed = reqwest::get(format!("{}/healthz", down)).await.unwrap();
        assert_eq!(failed.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_dashboard_endpoints_serve_latest_snapshot() {
        let (base, tx) = serve(Some(Vec::new())).await;
        let mut updated = tx.borrow().clone();
        updated.last_timestamp = Some("T9".to_string());
        tx.send_replace(updated);

        let body: serde_json::Value = reqwest::get(format!("{}/api/dashboard", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["last_timestamp"], "T9");

        let page = reqwest::get(format!("{}/", base)).await.unwrap().text().await.unwrap();
        assert!(page.contains("Latest sample: T9"));
    }
}
