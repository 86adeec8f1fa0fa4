/// Homogeneous transformation matrices driven by the camera orientation
use nalgebra::{Matrix4, Point3, Vector3};

/// Accumulated camera orientation in degrees
///
/// Angles grow without wraparound; only their sine and cosine are consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Principal rotation axis of the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Rotation about X
    Pitch,
    /// Rotation about Y
    Yaw,
    /// Rotation about Z
    Roll,
}

impl Orientation {
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Add `delta` degrees to the angle of `axis`
    pub fn rotate(&mut self, axis: Axis, delta: f64) {
        match axis {
            Axis::Pitch => self.pitch += delta,
            Axis::Yaw => self.yaw += delta,
            Axis::Roll => self.roll += delta,
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about X by `degrees`
    pub fn rotation_x(degrees: f64) -> Matrix4<f64> {
        Matrix4::new_rotation(Vector3::new(degrees.to_radians(), 0.0, 0.0))
    }

    /// Rotation about Y by `degrees`
    pub fn rotation_y(degrees: f64) -> Matrix4<f64> {
        Matrix4::new_rotation(Vector3::new(0.0, degrees.to_radians(), 0.0))
    }

    /// Rotation about Z by `degrees`
    pub fn rotation_z(degrees: f64) -> Matrix4<f64> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, degrees.to_radians()))
    }

    /// Composite camera rotation.
    ///
    /// X is applied first, then Y, then Z: `Rz · (Ry · (Rx · p))`. The order
    /// is not commutative and must not change.
    pub fn rotation_matrix(orientation: &Orientation) -> Matrix4<f64> {
        let rx = Self::rotation_x(orientation.pitch);
        let ry = Self::rotation_y(orientation.yaw);
        let rz = Self::rotation_z(orientation.roll);

        rz * (ry * rx)
    }

    /// Create a translation matrix
    pub fn translation_matrix(offset: &Vector3<f64>) -> Matrix4<f64> {
        Matrix4::new_translation(offset)
    }

    /// Shift `point` by `offset`
    pub fn translate_point(point: &Point3<f64>, offset: &Vector3<f64>) -> Point3<f64> {
        Self::translation_matrix(offset).transform_point(point)
    }

    /// Rotate `point` about the origin by the camera orientation
    pub fn rotate_point(point: &Point3<f64>, orientation: &Orientation) -> Point3<f64> {
        Self::rotation_matrix(orientation).transform_point(point)
    }
}
