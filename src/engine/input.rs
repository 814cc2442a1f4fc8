use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::EventPump;
use std::collections::HashSet;

/// Level-triggered set of held keys, keyed by lowercase identifier
/// (`"w"`, `"arrowup"`, `"q"`, ...).
#[derive(Clone, Debug, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was not already held.
    pub fn press(&mut self, key: &str) -> bool {
        self.held.insert(key.to_lowercase())
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_held(k))
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Discrete events collected during one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Fresh key-down (OS auto-repeat filtered out).
    KeyPressed(String),
    Resized(u32, u32),
}

/// Translate a physical key to the identifier used by the bindings.
/// Arrow keys follow the DOM naming, everything else is the lowercased
/// SDL scancode name.
pub fn key_identifier(sc: Scancode) -> String {
    match sc {
        Scancode::Up => "arrowup".to_string(),
        Scancode::Down => "arrowdown".to_string(),
        Scancode::Left => "arrowleft".to_string(),
        Scancode::Right => "arrowright".to_string(),
        other => other.name().to_lowercase(),
    }
}

pub struct InputState {
    pub keys: KeyState,
    pub events: Vec<InputEvent>,
    pub quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: KeyState::new(),
            events: Vec::new(),
            quit: false,
        }
    }

    pub fn update(&mut self, event_pump: &mut EventPump) {
        self.events.clear();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => self.quit = true,
                Event::KeyDown {
                    scancode: Some(sc),
                    repeat,
                    ..
                } => {
                    let key = key_identifier(sc);
                    if self.keys.press(&key) && !repeat {
                        self.events.push(InputEvent::KeyPressed(key));
                    }
                }
                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    self.keys.release(&key_identifier(sc));
                }
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } => {
                    self.events
                        .push(InputEvent::Resized(w.max(1) as u32, h.max(1) as u32));
                }
                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => {
                    // Key-ups are not delivered to unfocused windows.
                    self.keys.clear();
                }
                _ => {}
            }
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
