use thiserror::Error;

/// Failures while bringing up the window and GL surface.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("SDL init failed: {0}")]
    Sdl(String),
    #[error("SDL video subsystem unavailable: {0}")]
    Video(String),
    #[error("window creation failed: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("GL context creation failed: {0}")]
    GlContext(String),
    #[error("{kind} shader compile error: {log}")]
    ShaderCompile { kind: &'static str, log: String },
    #[error("shader link error: {0}")]
    ShaderLink(String),
}

impl InitError {
    /// True when there is no surface to draw on at all. The app treats
    /// this as "nothing to show" rather than a crash.
    pub fn is_missing_surface(&self) -> bool {
        matches!(
            self,
            InitError::Video(_) | InitError::Window(_) | InitError::GlContext(_)
        )
    }
}
