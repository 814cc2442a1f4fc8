use hecs::{Entity, World};

use crate::camera::{CameraPose, OrbitCamera, Viewport};
use crate::components::Vehicle;
use crate::controls::{CameraIntents, Command, ControlIntents};
use crate::engine::input::KeyState;
use crate::params::SimParams;
use crate::renderer::{draw_scene, DrawList};
use crate::scene::spawn_arena;
use crate::systems::{physics_step, StepReport};

/// Read-only display values derived from the vehicle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Telemetry {
    /// Horizontal speed in display units.
    pub speed: f32,
    /// Damage percentage, 0..=100.
    pub damage: f32,
}

/// What a command asks of the frame loop beyond the session itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Handled,
    Quit,
    ToggleHud,
}

/// Simulation context: owns the arena world, tuning parameters, camera rig
/// and pause gate. Everything a tick needs is read from here at the top of
/// the tick.
pub struct Session {
    world: World,
    player: Entity,
    pub params: SimParams,
    /// Values the camera returns to on reset.
    camera_defaults: OrbitCamera,
    pub camera: OrbitCamera,
    paused: bool,
    telemetry: Telemetry,
}

impl Session {
    pub fn new(params: SimParams, camera: OrbitCamera) -> Self {
        let mut world = World::new();
        let player = spawn_arena(&mut world);
        Self {
            world,
            player,
            params,
            camera_defaults: camera,
            camera,
            paused: false,
            telemetry: Telemetry::default(),
        }
    }

    /// Snapshot of the vehicle state.
    pub fn vehicle(&self) -> Vehicle {
        self.world
            .get::<&Vehicle>(self.player)
            .map(|v| *v)
            .unwrap_or_default()
    }

    pub fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            tracing::info!(paused, "pause toggled");
        }
        self.paused = paused;
    }

    /// One fixed tick. Camera controls stay live while paused; vehicle
    /// physics does not run.
    pub fn tick(&mut self, keys: &KeyState) -> Option<StepReport> {
        self.camera.apply(&CameraIntents::from_keys(keys));
        if self.paused {
            return None;
        }

        let intents = ControlIntents::from_keys(keys);
        let report = physics_step(&mut self.world, &intents, &self.params)?;
        for contact in &report.contacts {
            tracing::debug!(
                obstacle = contact.obstacle,
                impact_speed = contact.impact_speed,
                damage = contact.damage,
                "collision"
            );
        }
        if report.fall_damage > 0.0 {
            tracing::debug!(damage = report.fall_damage, "hard landing");
        }

        self.telemetry = Telemetry {
            speed: report.speed,
            damage: self.vehicle().damage,
        };
        Some(report)
    }

    /// Put the vehicle back at the start, zero the telemetry and restore the
    /// camera rig. Safe to call repeatedly.
    pub fn reset(&mut self) {
        if let Ok(mut vehicle) = self.world.get::<&mut Vehicle>(self.player) {
            *vehicle = Vehicle::new();
        }
        self.camera = self.camera_defaults;
        self.telemetry = Telemetry::default();
        tracing::info!("session reset");
    }

    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::TogglePause => self.set_paused(!self.paused),
            Command::Reset => self.reset(),
            Command::Quit => return CommandOutcome::Quit,
            Command::ToggleHud => return CommandOutcome::ToggleHud,
            Command::GravityDown | Command::GravityUp => {
                let steps = if command == Command::GravityUp { 1.0 } else { -1.0 };
                self.params.nudge_gravity(steps);
                tracing::debug!(gravity = self.params.gravity(), "gravity changed");
            }
            Command::PowerDown | Command::PowerUp => {
                let steps = if command == Command::PowerUp { 1.0 } else { -1.0 };
                self.params.nudge_engine_power(steps);
                tracing::debug!(engine_power = self.params.engine_power(), "engine power changed");
            }
            Command::CameraLower | Command::CameraRaise => {
                let steps = if command == Command::CameraRaise { 1.0 } else { -1.0 };
                self.camera.nudge_height(steps);
                tracing::debug!(camera_height = self.camera.height(), "camera height changed");
            }
        }
        CommandOutcome::Handled
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose(&self.vehicle())
    }

    pub fn draw_list(&self, viewport: Viewport) -> DrawList {
        draw_scene(&self.world, &self.camera_pose(), viewport)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SimParams::default(), OrbitCamera::default())
    }
}
