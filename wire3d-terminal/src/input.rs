/// Keyboard snapshot and key bindings for the camera
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::collections::HashSet;
use wire3d_core::CameraCommand;

/// Keys currently held down.
///
/// Terminals that cannot report key releases only deliver presses and
/// auto-repeats, so in that mode every key is forgotten at the end of a frame.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    pressed: HashSet<KeyCode>,
    reports_release: bool,
}

impl HeldKeys {
    pub fn new(reports_release: bool) -> Self {
        Self {
            pressed: HashSet::new(),
            reports_release,
        }
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    /// Fold one key event into the snapshot
    pub fn process(&mut self, event: &KeyEvent) {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.pressed.insert(code);
            }
            KeyEventKind::Release => {
                self.pressed.remove(&code);
            }
        }
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.pressed.contains(&normalize(code))
    }

    /// Called once the frame has consumed the snapshot
    pub fn end_frame(&mut self) {
        if !self.reports_release {
            self.pressed.clear();
        }
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

/// Shifted letters arrive upper-case; bindings are lower-case
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Ordered key to camera command bindings
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<(KeyCode, CameraCommand)>,
}

impl KeyMap {
    pub fn new(bindings: Vec<(KeyCode, CameraCommand)>) -> Self {
        Self { bindings }
    }

    /// One command per held bound key, in binding order
    pub fn commands(&self, keys: &HeldKeys) -> Vec<CameraCommand> {
        self.bindings
            .iter()
            .filter(|(code, _)| keys.is_held(*code))
            .map(|&(_, command)| command)
            .collect()
    }

    pub fn is_quit(code: KeyCode) -> bool {
        matches!(normalize(code), KeyCode::Char('q') | KeyCode::Esc)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(vec![
            (KeyCode::Char('w'), CameraCommand::MoveForward),
            (KeyCode::Char('s'), CameraCommand::MoveBackward),
            (KeyCode::Char('a'), CameraCommand::MoveLeft),
            (KeyCode::Char('d'), CameraCommand::MoveRight),
            (KeyCode::Char(' '), CameraCommand::MoveUp),
            (KeyCode::Char('c'), CameraCommand::MoveDown),
            (KeyCode::Up, CameraCommand::PitchUp),
            (KeyCode::Down, CameraCommand::PitchDown),
            (KeyCode::Left, CameraCommand::YawLeft),
            (KeyCode::Right, CameraCommand::YawRight),
            (KeyCode::Char('z'), CameraCommand::FovDecrease),
            (KeyCode::Char('x'), CameraCommand::FovIncrease),
        ])
    }
}
