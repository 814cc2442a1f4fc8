use std::ops::RangeInclusive;

pub const GRAVITY_RANGE: RangeInclusive<f32> = 0.0..=20.0;
pub const ENGINE_POWER_RANGE: RangeInclusive<f32> = 0.0..=200.0;

pub const DEFAULT_GRAVITY: f32 = 9.8;
pub const DEFAULT_ENGINE_POWER: f32 = 100.0;

/// Slider step sizes for keyboard tuning.
pub const GRAVITY_STEP: f32 = 0.1;
pub const ENGINE_POWER_STEP: f32 = 10.0;

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

/// User-tunable physics parameters, sampled at the top of every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimParams {
    gravity: f32,
    engine_power: f32,
}

impl SimParams {
    pub fn new(gravity: f32, engine_power: f32) -> Self {
        Self {
            gravity: clamp_to(gravity, &GRAVITY_RANGE),
            engine_power: clamp_to(engine_power, &ENGINE_POWER_RANGE),
        }
    }

    /// Downward acceleration in m/s².
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Engine power in percent of nominal.
    pub fn engine_power(&self) -> f32 {
        self.engine_power
    }

    /// Engine power as a multiplier on the base acceleration.
    pub fn power_factor(&self) -> f32 {
        self.engine_power / 100.0
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = clamp_to(gravity, &GRAVITY_RANGE);
    }

    pub fn set_engine_power(&mut self, engine_power: f32) {
        self.engine_power = clamp_to(engine_power, &ENGINE_POWER_RANGE);
    }

    pub fn nudge_gravity(&mut self, steps: f32) {
        // Round to the slider grid so repeated nudges don't drift.
        let next = ((self.gravity + steps * GRAVITY_STEP) * 10.0).round() / 10.0;
        self.set_gravity(next);
    }

    pub fn nudge_engine_power(&mut self, steps: f32) {
        self.set_engine_power(self.engine_power + steps * ENGINE_POWER_STEP);
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY, DEFAULT_ENGINE_POWER)
    }
}
