/// Scene geometry: open polylines and the scene that owns them
use nalgebra::Point3;

use crate::camera::Camera;

/// Ordered sequence of points joined by straight segments.
///
/// The path is open: the last point does not connect back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point3<f64>>,
}

impl Polyline {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Point3<f64>) {
        self.points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Number of segments drawn for this polyline
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Consecutive point pairs in order
    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

impl FromIterator<Point3<f64>> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A camera plus the polylines it looks at.
///
/// Geometry is fixed after load; only the camera changes between frames.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub camera: Camera,
    polylines: Vec<Polyline>,
}

impl Scene {
    pub fn new(polylines: Vec<Polyline>) -> Self {
        Self::with_camera(Camera::default(), polylines)
    }

    pub fn with_camera(camera: Camera, polylines: Vec<Polyline>) -> Self {
        Self { camera, polylines }
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn segment_count(&self) -> usize {
        self.polylines.iter().map(Polyline::segment_count).sum()
    }
}
