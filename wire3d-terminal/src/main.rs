/// Wire3D Terminal Viewer - Fly through a wireframe scene
///
/// Controls:
///   - W/S: Move forward/backward along the view heading
///   - A/D: Strafe left/right
///   - Space/C: Move up/down
///   - Arrow keys: Pitch and yaw
///   - Z/X: Narrow/widen the field of view
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use wire3d_core::load_scene;
use wire3d_terminal::{Cli, TerminalApp, ViewerConfig};

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = ViewerConfig::from(&cli);
    let scene = load_scene(&config.scene_path)
        .with_context(|| format!("Failed to load scene {}", config.scene_path.display()))?;
    log::info!(
        "Loaded {} polylines, {} segments",
        scene.polylines().len(),
        scene.segment_count()
    );

    // Run the terminal app
    let mut app = TerminalApp::new(scene, &config).context("Failed to query terminal")?;
    app.run().context("Terminal viewer failed")?;

    Ok(())
}
