use crate::engine::input::KeyState;

const ACCELERATE_KEYS: &[&str] = &["w", "arrowup"];
const BRAKE_KEYS: &[&str] = &["s", "arrowdown"];
const LEFT_KEYS: &[&str] = &["a", "arrowleft"];
const RIGHT_KEYS: &[&str] = &["d", "arrowright"];

/// Driving intents sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlIntents {
    pub accelerate: bool,
    pub brake: bool,
    pub left: bool,
    pub right: bool,
}

impl ControlIntents {
    pub fn from_keys(keys: &KeyState) -> Self {
        Self {
            accelerate: keys.any_held(ACCELERATE_KEYS),
            brake: keys.any_held(BRAKE_KEYS),
            left: keys.any_held(LEFT_KEYS),
            right: keys.any_held(RIGHT_KEYS),
        }
    }
}

/// Held camera controls: Q/E orbit, R/F zoom in/out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraIntents {
    pub orbit_left: bool,
    pub orbit_right: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

impl CameraIntents {
    pub fn from_keys(keys: &KeyState) -> Self {
        Self {
            orbit_left: keys.is_held("q"),
            orbit_right: keys.is_held("e"),
            zoom_in: keys.is_held("r"),
            zoom_out: keys.is_held("f"),
        }
    }
}

/// One-shot commands bound to fresh key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Reset,
    Quit,
    ToggleHud,
    GravityDown,
    GravityUp,
    PowerDown,
    PowerUp,
    CameraLower,
    CameraRaise,
}

impl Command {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "p" => Some(Command::TogglePause),
            "backspace" => Some(Command::Reset),
            "escape" => Some(Command::Quit),
            "f3" => Some(Command::ToggleHud),
            "[" => Some(Command::GravityDown),
            "]" => Some(Command::GravityUp),
            "-" => Some(Command::PowerDown),
            "=" => Some(Command::PowerUp),
            "," => Some(Command::CameraLower),
            "." => Some(Command::CameraRaise),
            _ => None,
        }
    }
}
