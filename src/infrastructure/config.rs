use crate::domain::grid::GridConfig;
use crate::domain::position::{MAX_FETCH, SensorMarker};
use chrono::FixedOffset;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxConfig {
    pub influx: InfluxSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    pub host: String,
    pub token: String,
    pub database: String,
    pub retention_policy: String,
    #[serde(default = "default_measurement")]
    pub measurement: String,
    #[serde(default = "default_x_field")]
    pub x_field: String,
    #[serde(default = "default_y_field")]
    pub y_field: String,
}

fn default_measurement() -> String {
    "positions".to_string()
}

fn default_x_field() -> String {
    "pos_x".to_string()
}

fn default_y_field() -> String {
    "pos_y".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default = "default_sensors")]
    pub sensors: Vec<SensorMarker>,
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub table: TableSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_sensors() -> Vec<SensorMarker> {
    vec![
        SensorMarker { id: 1, x: 0.25, y: 0.25 },
        SensorMarker { id: 2, x: 0.25, y: 7.75 },
        SensorMarker { id: 3, x: 7.75, y: 7.75 },
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    /// Retrieval endpoint polled by the refresh loop
    #[serde(default = "default_feed_url")]
    pub url: String,
    #[serde(default = "default_feed_limit")]
    pub limit: usize,
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            limit: default_feed_limit(),
            refresh_interval_ms: default_refresh_interval_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl FeedSettings {
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, MAX_FETCH)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_feed_url() -> String {
    "http://127.0.0.1:8080/api/positions".to_string()
}

fn default_feed_limit() -> usize {
    MAX_FETCH
}

fn default_refresh_interval_ms() -> u64 {
    1000
}

fn default_timeout_ms() -> u64 {
    900
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TableSettings {
    /// Display offset for zoned timestamps; local time when absent
    pub utc_offset_minutes: Option<i32>,
}

impl TableSettings {
    pub fn display_offset(&self) -> anyhow::Result<Option<FixedOffset>> {
        match self.utc_offset_minutes {
            None => Ok(None),
            Some(minutes) => FixedOffset::east_opt(minutes * 60)
                .map(Some)
                .ok_or_else(|| anyhow::anyhow!("utc_offset_minutes out of range: {}", minutes)),
        }
    }
}

pub fn load_influx_config() -> anyhow::Result<InfluxConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/influx"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace template variables in a query string
pub fn prepare_query(query: &str, vars: &HashMap<String, String>) -> String {
    let mut result = query.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
