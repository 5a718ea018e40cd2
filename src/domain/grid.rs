// Grid geometry and meter-to-pixel conversion
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid_size must be at least 1")]
    EmptyGrid,
    #[error("container_px must be positive, got {0}")]
    ContainerSize(f64),
    #[error("cell_size_m must be positive, got {0}")]
    CellSize(f64),
}

/// Room discretization shared by the map and the mapper
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cells per side
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    /// Side of the square map in pixels
    #[serde(default = "default_container_px")]
    pub container_px: f64,
    /// Side of one cell in meters
    #[serde(default = "default_cell_size_m")]
    pub cell_size_m: f64,
}

fn default_grid_size() -> u32 {
    16
}

fn default_container_px() -> f64 {
    640.0
}

fn default_cell_size_m() -> f64 {
    0.5
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            container_px: default_container_px(),
            cell_size_m: default_cell_size_m(),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.grid_size == 0 {
            return Err(GridError::EmptyGrid);
        }
        if !(self.container_px > 0.0) {
            return Err(GridError::ContainerSize(self.container_px));
        }
        if !(self.cell_size_m > 0.0) {
            return Err(GridError::CellSize(self.cell_size_m));
        }
        Ok(())
    }

    pub fn cell_size_px(&self) -> f64 {
        self.container_px / self.grid_size as f64
    }

    pub fn mapper(&self) -> Result<CoordinateMapper, GridError> {
        self.validate()?;
        Ok(CoordinateMapper::new(self.cell_size_m, self.cell_size_px()))
    }
}

/// Snaps physical coordinates to the center of their grid cell in pixels.
///
/// The cell index is `round(v / cell_size_m - 0.5)` with ties rounded up
/// (toward positive infinity), so a coordinate exactly on a cell boundary
/// belongs to the upper cell. Results are not clamped to the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    cell_size_m: f64,
    cell_size_px: f64,
}

impl CoordinateMapper {
    pub fn new(cell_size_m: f64, cell_size_px: f64) -> Self {
        Self {
            cell_size_m,
            cell_size_px,
        }
    }

    pub fn cell_index(&self, meters: f64) -> i64 {
        round_half_up(meters / self.cell_size_m - 0.5) as i64
    }

    pub fn to_display(&self, x_m: f64, y_m: f64) -> (f64, f64) {
        (self.axis_to_pixel(x_m), self.axis_to_pixel(y_m))
    }

    fn axis_to_pixel(&self, meters: f64) -> f64 {
        self.cell_index(meters) as f64 * self.cell_size_px + self.cell_size_px / 2.0
    }
}

fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}
