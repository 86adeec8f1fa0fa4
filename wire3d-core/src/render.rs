/// Scene walk that turns polylines into 2D line draw requests
use nalgebra::Point3;

use crate::camera::Camera;
use crate::geometry::Scene;
use crate::projection::Perspective;
use crate::screen::{ScreenPoint, Viewport};

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const PINK: Rgb = Rgb::new(255, 105, 180);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// How segments are stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: Rgb,
    /// Stroke width in pixels
    pub width: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgb::PINK,
            width: 2,
        }
    }
}

/// Something that can draw a straight 2D line between two pixels
pub trait LineSink {
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, style: &LineStyle);
}

/// Per-frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Stateless renderer: matrices are rebuilt from the camera on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneRenderer {
    pub viewport: Viewport,
    pub perspective: Perspective,
    pub style: LineStyle,
}

impl SceneRenderer {
    pub fn new(viewport: Viewport, style: LineStyle) -> Self {
        Self {
            viewport,
            perspective: Perspective::default(),
            style,
        }
    }

    /// Draw every segment of every polyline in scene order.
    ///
    /// There is no depth test; later segments overdraw earlier ones.
    pub fn render<S: LineSink + ?Sized>(&self, scene: &Scene, sink: &mut S) -> RenderStats {
        self.render_with_camera(scene, &scene.camera, sink)
    }

    pub fn render_with_camera<S: LineSink + ?Sized>(
        &self,
        scene: &Scene,
        camera: &Camera,
        sink: &mut S,
    ) -> RenderStats {
        let projection = self.perspective.matrix(camera.fov);
        let map = |point: &Point3<f64>| {
            let projected = self.perspective.project_with(&projection, camera, point);
            self.viewport.to_screen(&projected)
        };
        let mut stats = RenderStats::default();

        for polyline in scene.polylines() {
            for (start, end) in polyline.segments() {
                match (map(start), map(end)) {
                    (Some(from), Some(to)) => {
                        sink.draw_line(from, to, &self.style);
                        stats.drawn += 1;
                    }
                    _ => {
                        log::trace!(
                            "skipping segment {:?} -> {:?}: zero projected depth or non-finite",
                            start,
                            end
                        );
                        stats.skipped += 1;
                    }
                }
            }
        }

        stats
    }

    /// Map one world point to the screen with the given camera
    pub fn project(&self, camera: &Camera, point: &Point3<f64>) -> Option<ScreenPoint> {
        let projected = self.perspective.project_point(camera, point);
        self.viewport.to_screen(&projected)
    }
}
