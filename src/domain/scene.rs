// Scene model - the visual surface the map renderer draws on
use super::grid::GridConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorGlyph {
    pub id: u32,
    pub pixel_x: f64,
    pub pixel_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGlyph {
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub opacity: f64,
    /// Marks the newest position of the window
    pub current: bool,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub grid_size: u32,
    pub width_px: f64,
    pub cell_size_px: f64,
    pub sensors: Vec<SensorGlyph>,
    pub points: Vec<PointGlyph>,
}

impl Scene {
    pub fn new(grid: &GridConfig) -> Self {
        Self {
            grid_size: grid.grid_size,
            width_px: grid.container_px,
            cell_size_px: grid.cell_size_px(),
            sensors: Vec::new(),
            points: Vec::new(),
        }
    }

    pub fn add_sensor(&mut self, glyph: SensorGlyph) {
        self.sensors.push(glyph);
    }

    pub fn add_point(&mut self, glyph: PointGlyph) {
        self.points.push(glyph);
    }

    /// Removes position markers; sensors stay
    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    pub fn current_point(&self) -> Option<&PointGlyph> {
        self.points.iter().find(|p| p.current)
    }

    /// Pixel offsets of the interior grid lines
    pub fn grid_lines(&self) -> Vec<f64> {
        (1..self.grid_size)
            .map(|i| i as f64 * self.cell_size_px)
            .collect()
    }
}
