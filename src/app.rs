use sdl2::Sdl;

use crate::controls::Command;
use crate::engine::input::{InputEvent, InputState};
use crate::engine::time::{FixedTimestep, FrameLoop, FrameTimer};
use crate::engine::window::GameWindow;
use crate::error::InitError;
use crate::renderer::Canvas;
use crate::session::{CommandOutcome, Session};
use crate::systems::PHYSICS_DT;
use crate::ui::Hud;

/// Most fixed ticks run in one frame before the backlog is dropped.
const MAX_TICKS_PER_FRAME: usize = 5;

pub struct GameApp {
    session: Session,
    window: GameWindow,
    canvas: Canvas,
    hud: Hud,
    timestep: FixedTimestep,
    frame_loop: FrameLoop,
}

impl GameApp {
    pub fn new(session: Session, window: GameWindow) -> Result<Self, InitError> {
        let canvas = Canvas::new(window.viewport())?;
        Ok(Self {
            session,
            window,
            canvas,
            hud: Hud::new(),
            timestep: FixedTimestep::new(PHYSICS_DT, MAX_TICKS_PER_FRAME),
            frame_loop: FrameLoop::new(),
        })
    }

    pub fn run(&mut self, sdl: &Sdl) -> Result<(), InitError> {
        let mut event_pump = sdl.event_pump().map_err(InitError::Sdl)?;
        let mut input = InputState::new();
        let mut timer = FrameTimer::new();

        tracing::info!("entering frame loop");
        while self.frame_loop.next_frame() {
            timer.tick();
            input.update(&mut event_pump);

            if input.should_quit() {
                self.frame_loop.stop();
                break;
            }
            self.handle_events(&input.events);

            for _ in 0..self.timestep.advance(timer.dt) {
                self.session.tick(&input.keys);
            }

            self.hud.update(timer.dt);
            self.render();
            self.window.swap();
        }
        tracing::info!(frames = self.frame_loop.frames(), "frame loop stopped");
        Ok(())
    }

    fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match event {
                InputEvent::KeyPressed(key) => {
                    let Some(command) = Command::from_key(key) else {
                        continue;
                    };
                    match self.session.apply(command) {
                        CommandOutcome::Quit => self.frame_loop.stop(),
                        CommandOutcome::ToggleHud => self.hud.toggle(),
                        CommandOutcome::Handled => {}
                    }
                }
                InputEvent::Resized(w, h) => {
                    let viewport = self.window.viewport();
                    tracing::debug!(w, h, "surface resized");
                    self.canvas.resize(viewport);
                }
            }
        }
    }

    fn render(&mut self) {
        let telemetry = self.session.telemetry();
        let mut list = self.session.draw_list(self.canvas.viewport());
        self.hud.draw(&mut list, &telemetry);
        self.canvas.draw(&list);

        if let Some(title) = self.hud.title(&telemetry, self.session.is_paused()) {
            self.window.set_title(&title);
        }
    }
}
