use hecs::World;

use super::collision::{collision_system, Contact};
use crate::components::{Obstacle, Player, Vehicle, GROUND_CONTACT_Y};
use crate::controls::ControlIntents;
use crate::math::{heading, horizontal_len};
use crate::params::SimParams;
use crate::scene::ordered_obstacles;

pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Velocity added per tick at full throttle and 100% engine power.
const ACCELERATION: f32 = 1.2;
/// Reverse/brake push per tick, a bit over half the forward one.
const BRAKE_ACCELERATION: f32 = 0.7;
/// Yaw change per tick while steering.
const STEER_STEP: f32 = 0.04;
/// Below this horizontal speed steering does nothing.
const STEER_MIN_SPEED: f32 = 0.1;
/// Per-tick horizontal velocity retention (rolling + air resistance).
const DAMPING: f32 = 0.98;
/// Landing faster than this (downward) hurts.
const FALL_DAMAGE_SPEED: f32 = -5.0;
const FALL_DAMAGE_FACTOR: f32 = 2.0;
pub const MAX_DAMAGE: f32 = 100.0;
/// Horizontal speed to dashboard units.
pub const SPEED_DISPLAY_SCALE: f32 = 20.0;

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub contacts: Vec<Contact>,
    pub fall_damage: f32,
    /// Horizontal speed in display units after the tick.
    pub speed: f32,
}

/// Advance `vehicle` by one fixed tick.
pub fn step_vehicle(
    vehicle: &mut Vehicle,
    intents: &ControlIntents,
    params: &SimParams,
    obstacles: &[Obstacle],
) -> StepReport {
    let power = params.power_factor();
    let forward = heading(vehicle.rotation);

    if intents.accelerate {
        vehicle.velocity += forward * (ACCELERATION * power);
    }
    if intents.brake {
        vehicle.velocity -= forward * (BRAKE_ACCELERATION * power);
    }

    // No spinning in place.
    if horizontal_len(vehicle.velocity) > STEER_MIN_SPEED {
        if intents.left {
            vehicle.rotation += STEER_STEP;
        }
        if intents.right {
            vehicle.rotation -= STEER_STEP;
        }
    }

    vehicle.velocity.x *= DAMPING;
    vehicle.velocity.z *= DAMPING;
    vehicle.velocity.y -= params.gravity() * PHYSICS_DT;

    vehicle.position += vehicle.velocity * PHYSICS_DT;

    let mut fall_damage = 0.0;
    if vehicle.position.y < GROUND_CONTACT_Y {
        vehicle.position.y = GROUND_CONTACT_Y;
        if vehicle.velocity.y < FALL_DAMAGE_SPEED {
            fall_damage = vehicle.velocity.y.abs() * FALL_DAMAGE_FACTOR;
            vehicle.damage += fall_damage;
        }
        vehicle.velocity.y = 0.0;
    }

    let contacts = collision_system(vehicle, obstacles);

    vehicle.damage = vehicle.damage.clamp(0.0, MAX_DAMAGE);

    StepReport {
        contacts,
        fall_damage,
        speed: horizontal_len(vehicle.velocity) * SPEED_DISPLAY_SCALE,
    }
}

/// Step the player vehicle in `world` against the arena obstacles.
/// Returns `None` when the world has no player.
pub fn physics_step(
    world: &mut World,
    intents: &ControlIntents,
    params: &SimParams,
) -> Option<StepReport> {
    let obstacles = ordered_obstacles(world);
    let (_entity, (vehicle, _player)) = world
        .query_mut::<(&mut Vehicle, &Player)>()
        .into_iter()
        .next()?;
    Some(step_vehicle(vehicle, intents, params, &obstacles))
}
