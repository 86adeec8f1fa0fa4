/// Command-line interface and viewer configuration
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use wire3d_core::{LineStyle, Rgb, Viewport};

#[derive(Parser, Debug, Clone)]
#[command(name = "wire3d")]
#[command(about = "Fly a camera through a wireframe scene in the terminal", long_about = None)]
pub struct Cli {
    /// Scene description: `#` lines start a polyline, other lines are `x y z`
    #[arg(default_value = "objects.txt")]
    pub scene: PathBuf,

    /// Logical viewport width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Logical viewport height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Stroke width in logical pixels
    #[arg(long = "line-width", default_value_t = 2)]
    pub line_width: u32,

    /// Stroke colour as `R,G,B`
    #[arg(long, default_value = "255,105,180", value_parser = parse_rgb)]
    pub color: Rgb,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

/// Parse an `R,G,B` triple of 0-255 components
pub fn parse_rgb(value: &str) -> Result<Rgb, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(format!("expected R,G,B, got {value:?}"));
    };

    let component = |part: &str| {
        part.parse::<u8>()
            .map_err(|e| format!("invalid colour component {part:?}: {e}"))
    };

    Ok(Rgb::new(component(*r)?, component(*g)?, component(*b)?))
}

/// Everything the viewer needs besides the scene itself
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub scene_path: PathBuf,
    pub viewport: Viewport,
    pub style: LineStyle,
    pub frame_time: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scene_path: PathBuf::from("objects.txt"),
            viewport: Viewport::default(),
            style: LineStyle::default(),
            frame_time: Duration::from_secs(1) / 60,
        }
    }
}

impl From<&Cli> for ViewerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            scene_path: cli.scene.clone(),
            viewport: Viewport::new(cli.width.max(1), cli.height.max(1)),
            style: LineStyle {
                color: cli.color,
                width: cli.line_width.max(1),
            },
            frame_time: Duration::from_secs(1) / cli.fps.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["wire3d"]);
        let config = ViewerConfig::from(&cli);
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.viewport, Viewport::new(800, 800));
        assert_eq!(config.style.color, Rgb::new(255, 105, 180));
        assert_eq!(config.style.width, 2);
        assert_eq!(config.frame_time, Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "wire3d",
            "scenes/cubes.txt",
            "--width",
            "640",
            "--height",
            "480",
            "--fps",
            "30",
            "--line-width",
            "3",
            "--color",
            "0, 255,0",
        ]);
        let config = ViewerConfig::from(&cli);
        assert_eq!(config.scene_path, PathBuf::from("scenes/cubes.txt"));
        assert_eq!(config.viewport, Viewport::new(640, 480));
        assert_eq!(config.style, LineStyle { color: Rgb::new(0, 255, 0), width: 3 });
        assert_eq!(config.frame_time, Duration::from_secs(1) / 30);
    }

    #[test]
    fn test_parse_rgb_rejects_bad_input() {
        assert!(parse_rgb("1,2").is_err());
        assert!(parse_rgb("1,2,3,4").is_err());
        assert!(parse_rgb("256,0,0").is_err());
        assert!(parse_rgb("a,b,c").is_err());
    }

    #[test]
    fn test_fps_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["wire3d", "--fps", "0"]).is_err());
    }
}
