/// Example: Print the screen-space segments of a scene without a terminal UI
///
/// Usage: cargo run --example dump_segments -- path/to/scene.txt [frames]
///
/// Each extra frame moves the camera forward once, the same as holding W.
use std::env;
use std::io;
use wire3d_core::{load_scene, CameraCommand, LineSink, LineStyle, SceneRenderer, ScreenPoint};

struct Printer {
    frame: usize,
}

impl LineSink for Printer {
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, _style: &LineStyle) {
        println!("{}: ({}, {}) -> ({}, {})", self.frame, from.x, from.y, to.x, to.y);
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <scene-file> [frames]", args[0]);
        return Ok(());
    }

    let frames = match args.get(2) {
        Some(value) => value.parse::<usize>().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("Invalid frame count: {}", e))
        })?,
        None => 1,
    };

    let mut scene = load_scene(&args[1]).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Failed to load scene: {}", e))
    })?;
    let renderer = SceneRenderer::default();

    for frame in 0..frames {
        if frame > 0 {
            scene.camera.apply(CameraCommand::MoveForward);
        }
        let stats = renderer.render(&scene, &mut Printer { frame });
        println!("{}: {} drawn, {} skipped", frame, stats.drawn, stats.skipped);
    }

    Ok(())
}
