// Table presenter - newest-first rows for the last few readings
use crate::domain::dashboard::TableRow;
use crate::domain::position::{PositionSample, trailing_window};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};

pub const PLACEHOLDER_MESSAGE: &str = "Waiting for data...";

const TIME_OF_DAY: &str = "%H:%M:%S";

pub struct TablePresenter {
    /// Offset used for RFC 3339 timestamps; local time when unset
    display_offset: Option<FixedOffset>,
    rows: Vec<TableRow>,
}

impl TablePresenter {
    pub fn new(display_offset: Option<FixedOffset>) -> Self {
        Self {
            display_offset,
            rows: vec![placeholder()],
        }
    }

    pub fn render(&mut self, samples: &[PositionSample]) {
        let window = trailing_window(samples);
        if window.is_empty() {
            self.rows = vec![placeholder()];
            return;
        }

        let rows = window
            .iter()
            .rev()
            .map(|sample| TableRow::Reading {
                position: format!("({:.2}, {:.2})", sample.x, sample.y),
                time: self.format_time(&sample.time),
            })
            .collect();
        self.rows = rows;
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Time of day as `HH:MM:SS`; unparseable timestamps are shown verbatim
    pub fn format_time(&self, timestamp: &str) -> String {
        if let Ok(instant) = DateTime::parse_from_rfc3339(timestamp) {
            return match self.display_offset {
                Some(offset) => instant.with_timezone(&offset).format(TIME_OF_DAY).to_string(),
                None => instant.with_timezone(&Local).format(TIME_OF_DAY).to_string(),
            };
        }

        // SQL DATETIME values carry no zone and are already wall-clock time
        ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
            .map(|naive| naive.format(TIME_OF_DAY).to_string())
            .unwrap_or_else(|| timestamp.to_string())
    }
}

fn placeholder() -> TableRow {
    TableRow::Placeholder {
        message: PLACEHOLDER_MESSAGE.to_string(),
    }
}
