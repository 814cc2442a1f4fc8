use glam::Vec3;

use crate::math::Rgb;

/// Footprint of the player vehicle (width, height, length).
pub const VEHICLE_SIZE: Vec3 = Vec3::new(2.0, 1.5, 4.0);

/// Ride height of the vehicle anchor when resting on the ground plane.
pub const GROUND_CONTACT_Y: f32 = 1.0;

const VEHICLE_MASS: f32 = 1500.0;

/// The player-controlled vehicle. Single rotational degree of freedom (yaw).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vehicle {
    /// Center-bottom anchor; y is ride height.
    pub position: Vec3,
    pub velocity: Vec3,
    /// Yaw in radians. 0 faces -Z.
    pub rotation: f32,
    /// Descriptive only, not used by the force model.
    #[allow(dead_code)]
    pub mass: f32,
    /// Accumulated damage, 0..=100.
    pub damage: f32,
}

impl Vehicle {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, GROUND_CONTACT_Y, 0.0),
            velocity: Vec3::ZERO,
            rotation: 0.0,
            mass: VEHICLE_MASS,
            damage: 0.0,
        }
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new()
    }
}

/// Cosmetic obstacle tag. Physics treats every kind as a solid box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Wall,
    Ramp,
    Barrier,
}

/// Static arena geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    /// Center of the base.
    pub position: Vec3,
    /// Full extents.
    pub size: Vec3,
    pub kind: ObstacleKind,
    pub color: Rgb,
}

/// Position of an obstacle in the arena table. Collision resolution walks
/// obstacles in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegistryIndex(pub usize);

/// Marker: this entity is the player vehicle.
pub struct Player;
