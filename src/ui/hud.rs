use crate::math::Rgba;
use crate::renderer::{vehicle_color, DrawList};
use crate::session::Telemetry;
use crate::systems::MAX_DAMAGE;

const HUD_MARGIN: f32 = 16.0;
const BAR_WIDTH: f32 = 200.0;
const BAR_HEIGHT: f32 = 12.0;
const BAR_GAP: f32 = 8.0;
const PANEL_PADDING: f32 = 8.0;
const PANEL_COLOR: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.7);
const TRACK_COLOR: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.12);
const SPEED_COLOR: Rgba = Rgba::new(0.055, 0.647, 0.914, 1.0);

/// Speed (display units) at which the speed bar is full.
const SPEED_FULL_SCALE: f32 = 200.0;
/// Seconds between window title refreshes.
const TITLE_INTERVAL: f32 = 0.5;

const FPS_SAMPLES: usize = 60;

/// Telemetry overlay: speed and damage bars plus a window-title readout.
pub struct Hud {
    visible: bool,
    fps_ring: [f32; FPS_SAMPLES],
    fps_index: usize,
    fps_count: usize,
    since_title: f32,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            visible: true,
            fps_ring: [0.0; FPS_SAMPLES],
            fps_index: 0,
            fps_count: 0,
            since_title: TITLE_INTERVAL,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Push a frame delta into the rolling FPS buffer.
    pub fn update(&mut self, dt: f32) {
        self.fps_ring[self.fps_index] = dt;
        self.fps_index = (self.fps_index + 1) % FPS_SAMPLES;
        if self.fps_count < FPS_SAMPLES {
            self.fps_count += 1;
        }
        self.since_title += dt;
    }

    pub fn fps(&self) -> f32 {
        let sum: f32 = self.fps_ring[..self.fps_count].iter().sum();
        if sum <= 0.0 {
            0.0
        } else {
            self.fps_count as f32 / sum
        }
    }

    /// Window title text, at most every `TITLE_INTERVAL` seconds.
    pub fn title(&mut self, telemetry: &Telemetry, paused: bool) -> Option<String> {
        if self.since_title < TITLE_INTERVAL {
            return None;
        }
        self.since_title = 0.0;
        Some(format_title(telemetry, paused, self.fps()))
    }

    /// Append the overlay to the frame's draw list.
    pub fn draw(&self, list: &mut DrawList, telemetry: &Telemetry) {
        if !self.visible {
            return;
        }
        let x = HUD_MARGIN + PANEL_PADDING;
        let y = HUD_MARGIN + PANEL_PADDING;

        list.fill_rect(
            HUD_MARGIN,
            HUD_MARGIN,
            BAR_WIDTH + PANEL_PADDING * 2.0,
            BAR_HEIGHT * 2.0 + BAR_GAP + PANEL_PADDING * 2.0,
            PANEL_COLOR,
        );

        let speed_frac = (telemetry.speed / SPEED_FULL_SCALE).clamp(0.0, 1.0);
        bar(list, x, y, speed_frac, SPEED_COLOR);

        let damage_frac = (telemetry.damage / MAX_DAMAGE).clamp(0.0, 1.0);
        let damage_color = vehicle_color(telemetry.damage).into();
        bar(list, x, y + BAR_HEIGHT + BAR_GAP, damage_frac, damage_color);
    }
}

fn bar(list: &mut DrawList, x: f32, y: f32, fraction: f32, color: Rgba) {
    list.fill_rect(x, y, BAR_WIDTH, BAR_HEIGHT, TRACK_COLOR);
    if fraction > 0.0 {
        list.fill_rect(x, y, BAR_WIDTH * fraction, BAR_HEIGHT, color);
    }
}

pub fn format_title(telemetry: &Telemetry, paused: bool, fps: f32) -> String {
    let mut title = format!(
        "crashbox | speed {:.0} km/h | damage {:.0}% | {:.0} fps",
        telemetry.speed, telemetry.damage, fps
    );
    if paused {
        title.push_str(" | PAUSED");
    }
    title
}
