/// Terminal front end for the wireframe viewer
use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{RenderStats, Scene, SceneRenderer};

pub mod config;
pub mod input;
pub mod renderer;

pub use config::{Cli, ViewerConfig};
pub use input::{HeldKeys, KeyMap};
pub use renderer::TerminalCanvas;

/// Keep the earliest failure among steps that have all already run
fn first_error(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    steps.into_iter().collect()
}

/// Rows above the canvas reserved for the status line
const STATUS_ROWS: u16 = 1;

/// Main application struct for the terminal wireframe viewer
pub struct TerminalApp {
    scene: Scene,
    renderer: SceneRenderer,
    canvas: TerminalCanvas,
    keys: HeldKeys,
    keymap: KeyMap,
    frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    last_stats: RenderStats,
}

impl TerminalApp {
    pub fn new(scene: Scene, config: &ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
        log::debug!(
            "terminal {}x{}, key release reporting: {}",
            width,
            height,
            reports_release
        );

        Ok(Self {
            scene,
            renderer: SceneRenderer::new(config.viewport, config.style),
            canvas: TerminalCanvas::new(
                width as usize,
                height.saturating_sub(STATUS_ROWS) as usize,
                config.viewport,
            ),
            keys: HeldKeys::new(reports_release),
            keymap: KeyMap::default(),
            frame_time: config.frame_time,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            last_stats: RenderStats::default(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        let result = self.enter_screen().and_then(|()| self.main_loop());

        // Cleanup always runs
        first_error([result, self.leave_screen()])
    }

    fn enter_screen(&self) -> io::Result<()> {
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableFocusChange
        )?;
        if self.keys.reports_release() {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        Ok(())
    }

    /// Undo `enter_screen` and raw mode, attempting every step
    fn leave_screen(&self) -> io::Result<()> {
        let mut stdout = stdout();
        let pop_flags = if self.keys.reports_release() {
            execute!(stdout, PopKeyboardEnhancementFlags)
        } else {
            Ok(())
        };
        first_error([
            pop_flags,
            execute!(stdout, DisableFocusChange),
            terminal::disable_raw_mode(),
            execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show),
        ])
    }

    fn main_loop(&mut self) -> io::Result<()> {
        log::info!(
            "viewer started with {} polylines",
            self.scene.polylines().len()
        );

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            self.handle_input()?;

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        log::info!("viewer stopped");
        Ok(())
    }

    /// Drain pending terminal events into the held-key snapshot
    fn handle_input(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(&key),
                Event::Resize(columns, rows) => {
                    log::debug!("terminal resized to {}x{}", columns, rows);
                    self.canvas
                        .resize(columns as usize, rows.saturating_sub(STATUS_ROWS) as usize);
                }
                Event::FocusLost => {
                    // Releases made in another window never reach us
                    log::debug!("focus lost, releasing held keys");
                    self.keys.clear();
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let interrupt =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if key.kind == KeyEventKind::Press && (interrupt || KeyMap::is_quit(key.code)) {
            self.running = false;
            return;
        }
        self.keys.process(key);
    }

    /// Apply one camera command per held key
    fn update(&mut self) {
        for command in self.keymap.commands(&self.keys) {
            self.scene.camera.apply(command);
        }
        self.keys.end_frame();
    }

    fn render(&mut self) -> io::Result<()> {
        self.canvas.clear();
        self.last_stats = self.renderer.render(&self.scene, &mut self.canvas);

        let mut stdout = stdout();
        self.canvas.draw(&mut stdout, STATUS_ROWS)?;

        // Draw UI overlay
        let status: String = self.status_line().chars().take(self.canvas.columns()).collect();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        let camera = &self.scene.camera;
        format!(
            "Wire3D | FPS: {:.1} | pos ({:.0}, {:.0}, {:.0}) | pitch {:.0} yaw {:.0} | FOV {:.0} | {} drawn {} skipped | WASD Space/C move, arrows turn, Z/X zoom, Q quit",
            self.fps,
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.rotation.pitch,
            camera.rotation.yaw,
            camera.fov,
            self.last_stats.drawn,
            self.last_stats.skipped,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(ran: &mut Vec<&'static str>, name: &'static str, ok: bool) -> io::Result<()> {
        ran.push(name);
        if ok {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::Other, name))
        }
    }

    #[test]
    fn test_cleanup_runs_every_step_and_keeps_first_error() {
        let mut ran = Vec::new();
        let result = first_error([
            step(&mut ran, "main loop", false),
            step(&mut ran, "pop flags", true),
            step(&mut ran, "raw mode", false),
            step(&mut ran, "leave screen", true),
        ]);

        assert_eq!(ran, vec!["main loop", "pop flags", "raw mode", "leave screen"]);
        assert_eq!(result.unwrap_err().to_string(), "main loop");
    }

    #[test]
    fn test_cleanup_error_surfaces_after_clean_exit() {
        let result = first_error([Ok(()), Err(io::Error::new(io::ErrorKind::Other, "raw mode"))]);
        assert_eq!(result.unwrap_err().to_string(), "raw mode");
        assert!(first_error([Ok(()), Ok(())]).is_ok());
    }
}
