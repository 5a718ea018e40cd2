// Scene renderer - draws sensors once and the trailing positions on every update
use crate::domain::grid::CoordinateMapper;
use crate::domain::position::{DisplayPoint, PositionSample, SensorMarker, trailing_window};
use crate::domain::scene::{PointGlyph, Scene, SensorGlyph};

pub struct SceneRenderer {
    mapper: CoordinateMapper,
    scene: Scene,
}

impl SceneRenderer {
    /// Creates the renderer and draws the fixed sensor markers
    pub fn new(mapper: CoordinateMapper, mut scene: Scene, sensors: &[SensorMarker]) -> Self {
        for sensor in sensors {
            let (pixel_x, pixel_y) = mapper.to_display(sensor.x, sensor.y);
            scene.add_sensor(SensorGlyph {
                id: sensor.id,
                pixel_x,
                pixel_y,
            });
        }
        Self { mapper, scene }
    }

    /// Redraws the trailing window, oldest faintest, newest fully opaque and current
    pub fn render(&mut self, samples: &[PositionSample]) {
        self.scene.clear_points();

        let window = trailing_window(samples);
        let len = window.len();
        for (index, sample) in window.iter().enumerate() {
            let point = self.project(sample);
            self.scene.add_point(PointGlyph {
                pixel_x: point.pixel_x,
                pixel_y: point.pixel_y,
                opacity: (index + 1) as f64 / len as f64,
                current: index + 1 == len,
                time: point.sample.time,
            });
        }

        tracing::debug!(
            "Scene redrawn with {} position markers, current at {:?}",
            len,
            self.scene.current_point().map(|p| (p.pixel_x, p.pixel_y))
        );
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn project(&self, sample: &PositionSample) -> DisplayPoint {
        let (pixel_x, pixel_y) = self.mapper.to_display(sample.x, sample.y);
        DisplayPoint {
            pixel_x,
            pixel_y,
            sample: sample.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::GridConfig;

    fn renderer() -> SceneRenderer {
        let grid = GridConfig::default();
        let sensors = [
            SensorMarker { id: 1, x: 0.25, y: 0.25 },
            SensorMarker { id: 2, x: 0.25, y: 7.75 },
            SensorMarker { id: 3, x: 7.75, y: 7.75 },
        ];
        SceneRenderer::new(grid.mapper().unwrap(), Scene::new(&grid), &sensors)
    }

    fn samples(n: usize) -> Vec<PositionSample> {
        (0..n)
            .map(|i| PositionSample::new(0.25 + i as f64 * 0.5, 0.25, format!("T{}", i)))
            .collect()
    }

    #[test]
    fn test_sensors_drawn_at_creation() {
        let r = renderer();
        let sensors = &r.scene().sensors;
        assert_eq!(sensors.len(), 3);
        assert_eq!((sensors[1].pixel_x, sensors[1].pixel_y), (20.0, 620.0));
        assert!(r.scene().points.is_empty());
    }

    #[test]
    fn test_single_sample_is_opaque_and_current() {
        let mut r = renderer();
        r.render(&samples(1));

        let points = &r.scene().points;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].opacity, 1.0);
        assert!(points[0].current);
    }

    #[test]
    fn test_window_opacity_increases_with_recency() {
        let mut r = renderer();
        r.render(&samples(6));

        let points = &r.scene().points;
        let opacities: Vec<f64> = points.iter().map(|p| p.opacity).collect();
        assert_eq!(opacities, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(points[0].time, "T2");
        assert_eq!(points.iter().filter(|p| p.current).count(), 1);
        assert_eq!(r.scene().current_point().unwrap().time, "T5");
        assert_eq!(r.scene().current_point().unwrap().pixel_x, 5.0 * 40.0 + 20.0);
    }

    #[test]
    fn test_render_replaces_previous_points() {
        let mut r = renderer();
        r.render(&samples(4));
        r.render(&samples(2));

        assert_eq!(r.scene().points.len(), 2);
        assert_eq!(r.scene().points[0].opacity, 0.5);
        assert_eq!(r.scene().sensors.len(), 3);
    }

    #[test]
    fn test_empty_render_clears_points() {
        let mut r = renderer();
        r.render(&samples(3));
        r.render(&[]);
        assert!(r.scene().points.is_empty());
    }
}
