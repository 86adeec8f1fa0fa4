/// Perspective projection of camera-relative points into homogeneous space
use nalgebra::{Matrix4, Point3, Vector4};

use crate::camera::{Camera, DEFAULT_FOV};
use crate::transform::Transform;

pub const DEFAULT_NEAR: f64 = 10.0;
pub const DEFAULT_FAR: f64 = 1000.0;

/// Narrowest field of view the projection accepts, in degrees
pub const MIN_FOV: f64 = 1.0;
/// Widest field of view the projection accepts, in degrees
pub const MAX_FOV: f64 = 179.0;

/// Restrict a field of view to the range where `tan(fov / 2)` is finite and positive
pub fn clamp_fov(fov: f64) -> f64 {
    if fov.is_nan() {
        return DEFAULT_FOV;
    }
    fov.clamp(MIN_FOV, MAX_FOV)
}

/// Perspective frustum parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub near: f64,
    pub far: f64,
    pub aspect: f64,
}

impl Perspective {
    pub fn new(near: f64, far: f64, aspect: f64) -> Self {
        Self { near, far, aspect }
    }

    /// Build the projection matrix for `fov` degrees.
    ///
    /// The `-1` in the third row feeds `w` into the projected z, which the
    /// screen mapper divides by.
    pub fn matrix(&self, fov: f64) -> Matrix4<f64> {
        let f = 1.0 / (clamp_fov(fov).to_radians() / 2.0).tan();
        let depth = self.far - self.near;

        #[rustfmt::skip]
        let matrix = Matrix4::new(
            f / self.aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, -self.far / depth, -1.0,
            0.0, 0.0, -self.far * self.near / depth, 0.0,
        );
        matrix
    }

    /// Run one scene point through translation, rotation and projection
    pub fn project_point(&self, camera: &Camera, point: &Point3<f64>) -> Vector4<f64> {
        self.project_with(&self.matrix(camera.fov), camera, point)
    }

    /// Same as [`Perspective::project_point`] with a prebuilt projection matrix
    pub fn project_with(
        &self,
        projection: &Matrix4<f64>,
        camera: &Camera,
        point: &Point3<f64>,
    ) -> Vector4<f64> {
        let translated = Transform::translate_point(point, &camera.position.coords);
        let rotated = Transform::rotate_point(&translated, &camera.rotation);

        projection * rotated.to_homogeneous()
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self::new(DEFAULT_NEAR, DEFAULT_FAR, 1.0)
    }
}
