use sdl2::video::{GLContext, GLProfile, Window};
use sdl2::Sdl;

use crate::camera::Viewport;
use crate::error::InitError;

pub struct GameWindow {
    _gl_context: GLContext,
    window: Window,
}

impl GameWindow {
    pub fn new(sdl: &Sdl, title: &str, width: u32, height: u32) -> Result<Self, InitError> {
        let video = sdl.video().map_err(InitError::Video)?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_multisample_buffers(1);
        gl_attr.set_multisample_samples(4);

        let window = video
            .window(title, width, height)
            .opengl()
            .resizable()
            .position_centered()
            .build()?;

        let gl_context = window.gl_create_context().map_err(InitError::GlContext)?;

        gl::load_with(|s| video.gl_get_proc_address(s) as *const _);

        if let Err(e) = video.gl_set_swap_interval(1) {
            tracing::warn!("vsync unavailable: {e}");
        }

        Ok(Self {
            _gl_context: gl_context,
            window,
        })
    }

    pub fn swap(&self) {
        self.window.gl_swap_window();
    }

    /// Drawable size in pixels (differs from window size on HiDPI displays).
    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.window.drawable_size();
        Viewport::new(w.max(1), h.max(1))
    }

    pub fn set_title(&mut self, title: &str) {
        if let Err(e) = self.window.set_title(title) {
            tracing::trace!("title update failed: {e}");
        }
    }
}
