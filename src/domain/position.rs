// Position domain models
use serde::{Deserialize, Serialize};

/// Number of most recent samples shown on the map and in the table
pub const WINDOW_SIZE: usize = 4;

/// Upper bound on samples returned by a single fetch
pub const MAX_FETCH: usize = 50;

/// One timestamped position estimate produced by the localization process.
///
/// `time` is kept as the store's string form; it is only compared for
/// equality and formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub x: f64,
    pub y: f64,
    pub time: String,
}

impl PositionSample {
    pub fn new(x: f64, y: f64, time: impl Into<String>) -> Self {
        Self {
            x,
            y,
            time: time.into(),
        }
    }
}

/// A sample projected into display space
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPoint {
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub sample: PositionSample,
}

/// A fixed microphone location in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorMarker {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

/// The last `WINDOW_SIZE` samples of an ascending sequence (or fewer)
pub fn trailing_window(samples: &[PositionSample]) -> &[PositionSample] {
    let start = samples.len().saturating_sub(WINDOW_SIZE);
    &samples[start..]
}

/// Timestamp of the newest sample of an ascending sequence
pub fn latest_timestamp(samples: &[PositionSample]) -> Option<&str> {
    samples.last().map(|s| s.time.as_str())
}
