/// Wire3D Core Library - Camera, projection and scene logic
///
/// This library holds the stateless projection pipeline for the wireframe
/// viewer together with the camera state that drives it, the scene model and
/// its text loader. Drawing is delegated through the `LineSink` trait.

pub mod camera;
pub mod geometry;
pub mod projection;
pub mod render;
pub mod scene_file;
pub mod screen;
pub mod transform;

// Re-export commonly used types
pub use camera::{Camera, CameraCommand};
pub use geometry::{Polyline, Scene};
pub use projection::{clamp_fov, Perspective};
pub use render::{LineSink, LineStyle, RenderStats, Rgb, SceneRenderer};
pub use scene_file::{load_scene, parse_polylines, SceneError};
pub use screen::{ScreenPoint, Viewport};
pub use transform::{Axis, Orientation, Transform};
