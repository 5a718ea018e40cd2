// Main entry point - Dependency injection, refresh task and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::position_service::PositionService;
use crate::application::refresh_loop::RefreshLoop;
use crate::application::scene_renderer::SceneRenderer;
use crate::application::table_presenter::TablePresenter;
use crate::domain::scene::Scene;
use crate::infrastructure::config::{load_dashboard_config, load_influx_config};
use crate::infrastructure::http_feed::HttpSampleFeed;
use crate::infrastructure::influx_repository::InfluxRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let influx_config = load_influx_config().context("Failed to load config/influx")?;
    let dashboard_config = load_dashboard_config().context("Failed to load config/dashboard")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(InfluxRepository::new(influx_config.influx));
    let position_service = PositionService::new(repository);

    // Build the refresh pipeline; sensors are drawn once here
    let grid = dashboard_config.grid;
    let mapper = grid.mapper().context("Invalid grid configuration")?;
    let scene = SceneRenderer::new(mapper, Scene::new(&grid), &dashboard_config.sensors);
    let table = TablePresenter::new(dashboard_config.table.display_offset()?);
    let feed = Arc::new(HttpSampleFeed::new(
        dashboard_config.feed.url.clone(),
        dashboard_config.feed.limit(),
        dashboard_config.feed.timeout(),
    )?);
    let refresh_interval = dashboard_config.feed.refresh_interval();
    let (refresh_loop, snapshots) = RefreshLoop::new(feed, scene, table);

    // Create application state
    let state = Arc::new(AppState {
        position_service,
        snapshots,
        refresh_interval,
    });

    let router = build_router(state);

    let addr: SocketAddr = dashboard_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", dashboard_config.server.bind))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting sound position dashboard on {}", addr);

    // The feed polls our own endpoint by default, so start it once the listener is bound
    let refresh_task = tokio::spawn(refresh_loop.run(refresh_interval));

    let served = axum::serve(listener, router).await;
    refresh_task.abort();
    served?;

    Ok(())
}
