// HTML views rendered with askama
use crate::domain::dashboard::{DashboardSnapshot, TableRow};
use crate::domain::scene::{PointGlyph, SensorGlyph};
use askama::Template;

pub struct RowView {
    pub placeholder: bool,
    pub position: String,
    pub time: String,
}

impl From<&TableRow> for RowView {
    fn from(row: &TableRow) -> Self {
        match row {
            TableRow::Placeholder { message } => RowView {
                placeholder: true,
                position: message.clone(),
                time: String::new(),
            },
            TableRow::Reading { position, time } => RowView {
                placeholder: false,
                position: position.clone(),
                time: time.clone(),
            },
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub width_px: f64,
    pub grid_lines: Vec<f64>,
    pub marker_radius: f64,
    pub sensors: Vec<SensorGlyph>,
    pub points: Vec<PointGlyph>,
    pub rows: Vec<RowView>,
    pub last_timestamp: Option<String>,
    pub refresh_seconds: u64,
}

impl DashboardPage {
    pub fn new(snapshot: &DashboardSnapshot, refresh_seconds: u64) -> Self {
        let scene = &snapshot.scene;
        Self {
            width_px: scene.width_px,
            grid_lines: scene.grid_lines(),
            marker_radius: scene.cell_size_px / 4.0,
            sensors: scene.sensors.clone(),
            points: scene.points.clone(),
            rows: snapshot.rows.iter().map(RowView::from).collect(),
            last_timestamp: snapshot.last_timestamp.clone(),
            refresh_seconds: refresh_seconds.max(1),
        }
    }
}
