/// Fly-through camera state and its movement/rotation operations
use nalgebra::{Point3, Vector3};

use crate::transform::{Axis, Orientation};

pub const DEFAULT_POSITION: [f64; 3] = [100.0, 100.0, 800.0];
pub const DEFAULT_FOV: f64 = 60.0;
pub const DEFAULT_MOVE_SPEED: f64 = 10.0;
pub const DEFAULT_ROTATION_SPEED: f64 = 2.0;
pub const FOV_STEP: f64 = 1.0;

/// One camera mutation, issued once per held input key per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraCommand {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    FovDecrease,
    FovIncrease,
}

/// Camera configuration for the wireframe viewer.
///
/// The position is added to every scene point before rotation, so it models
/// a displacement of the world rather than the eye location. `fov` is in
/// degrees and unbounded here; the projection clamps it when building its
/// matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f64>,
    pub rotation: Orientation,
    pub fov: f64,
    pub move_speed: f64,
    pub rotation_speed: f64,
}

impl Camera {
    pub fn new(position: Point3<f64>, fov: f64) -> Self {
        Self {
            position,
            rotation: Orientation::zero(),
            fov,
            move_speed: DEFAULT_MOVE_SPEED,
            rotation_speed: DEFAULT_ROTATION_SPEED,
        }
    }

    pub fn move_forward(&mut self) {
        let delta = self.travel(self.rotation.yaw, self.move_speed);
        self.position += delta;
    }

    pub fn move_backward(&mut self) {
        let delta = self.travel(self.rotation.yaw, self.move_speed);
        self.position -= delta;
    }

    /// Strafe left; stays level whatever the pitch
    pub fn move_left(&mut self) {
        let delta = Self::strafe(self.rotation.yaw + 90.0, self.move_speed);
        self.position += delta;
    }

    /// Strafe right; stays level whatever the pitch
    pub fn move_right(&mut self) {
        let delta = Self::strafe(self.rotation.yaw - 90.0, self.move_speed);
        self.position += delta;
    }

    /// Move along world +Y, independent of orientation
    pub fn move_up(&mut self) {
        self.position += Vector3::y() * self.move_speed;
    }

    /// Move along world -Y, independent of orientation
    pub fn move_down(&mut self) {
        self.position -= Vector3::y() * self.move_speed;
    }

    /// Add `delta` degrees to one axis, no clamping
    pub fn rotate(&mut self, axis: Axis, delta: f64) {
        self.rotation.rotate(axis, delta);
    }

    /// Narrow the field of view by one step
    pub fn zoom_in(&mut self) {
        self.fov -= FOV_STEP;
    }

    /// Widen the field of view by one step
    pub fn zoom_out(&mut self) {
        self.fov += FOV_STEP;
    }

    pub fn apply(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::MoveForward => self.move_forward(),
            CameraCommand::MoveBackward => self.move_backward(),
            CameraCommand::MoveLeft => self.move_left(),
            CameraCommand::MoveRight => self.move_right(),
            CameraCommand::MoveUp => self.move_up(),
            CameraCommand::MoveDown => self.move_down(),
            CameraCommand::PitchUp => self.rotate(Axis::Pitch, self.rotation_speed),
            CameraCommand::PitchDown => self.rotate(Axis::Pitch, -self.rotation_speed),
            CameraCommand::YawLeft => self.rotate(Axis::Yaw, self.rotation_speed),
            CameraCommand::YawRight => self.rotate(Axis::Yaw, -self.rotation_speed),
            CameraCommand::FovDecrease => self.zoom_in(),
            CameraCommand::FovIncrease => self.zoom_out(),
        }
    }

    /// Forward displacement for `yaw` degrees, with pitch driving the vertical part
    fn travel(&self, yaw: f64, speed: f64) -> Vector3<f64> {
        let mut delta = Self::strafe(yaw, speed);
        delta.y = -self.rotation.pitch.to_radians().sin() * speed;
        delta
    }

    /// Level displacement along the heading `yaw` degrees
    fn strafe(yaw: f64, speed: f64) -> Vector3<f64> {
        let yaw = yaw.to_radians();
        Vector3::new(yaw.sin() * speed, 0.0, -yaw.cos() * speed)
    }
}

impl Default for Camera {
    fn default() -> Self {
        let [x, y, z] = DEFAULT_POSITION;
        Self::new(Point3::new(x, y, z), DEFAULT_FOV)
    }
}
