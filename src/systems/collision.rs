use glam::Vec3;

use crate::components::{Obstacle, Vehicle, VEHICLE_SIZE};
use crate::math::horizontal_len;

/// Impacts slower than this leave the vehicle undamaged.
pub const DAMAGE_SPEED_THRESHOLD: f32 = 3.0;
/// Damage dealt per unit of horizontal impact speed.
pub const IMPACT_DAMAGE_FACTOR: f32 = 5.0;
/// Extra clearance added to the boundary when pushing the vehicle out.
pub const SEPARATION_EPSILON: f32 = 0.1;
/// Below this center distance the push-out direction is undefined.
pub const MIN_SEPARATION_DISTANCE: f32 = 0.1;
/// Horizontal velocity multiplier applied on contact.
pub const BOUNCE_FACTOR: f32 = -0.5;

/// A resolved vehicle/obstacle contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Registry position of the obstacle that was hit.
    pub obstacle: usize,
    /// Horizontal speed at the moment of impact.
    pub impact_speed: f32,
    pub damage: f32,
}

/// Footprint test on the x/z plane, gated by the obstacle's height envelope.
pub fn footprint_overlap(position: Vec3, size: Vec3, obstacle: &Obstacle) -> bool {
    (position.x - obstacle.position.x).abs() < (size.x + obstacle.size.x) / 2.0
        && (position.z - obstacle.position.z).abs() < (size.z + obstacle.size.z) / 2.0
        && position.y <= obstacle.size.y
}

/// Test the vehicle against one obstacle and resolve the hit in place:
/// impact damage, push-out along the center-to-center direction onto the
/// nearest footprint boundary, and a flat velocity bounce that ignores the
/// contact normal.
pub fn resolve_obstacle(vehicle: &mut Vehicle, obstacle: &Obstacle, index: usize) -> Option<Contact> {
    if !footprint_overlap(vehicle.position, VEHICLE_SIZE, obstacle) {
        return None;
    }

    let impact_speed = horizontal_len(vehicle.velocity);
    let damage = if impact_speed > DAMAGE_SPEED_THRESHOLD {
        impact_speed * IMPACT_DAMAGE_FACTOR
    } else {
        0.0
    };
    vehicle.damage += damage;

    let dx = vehicle.position.x - obstacle.position.x;
    let dz = vehicle.position.z - obstacle.position.z;
    let distance = (dx * dx + dz * dz).sqrt();
    // Centered on the obstacle: no usable direction, leave the position alone.
    if distance > MIN_SEPARATION_DISTANCE {
        let reach_x = (VEHICLE_SIZE.x + obstacle.size.x) / 2.0 + SEPARATION_EPSILON;
        let reach_z = (VEHICLE_SIZE.z + obstacle.size.z) / 2.0 + SEPARATION_EPSILON;
        // Stretch the offset until one axis sits exactly at its reach.
        let stretch = 1.0 / (dx.abs() / reach_x).max(dz.abs() / reach_z);
        vehicle.position.x = obstacle.position.x + dx * stretch;
        vehicle.position.z = obstacle.position.z + dz * stretch;
    }

    vehicle.velocity.x *= BOUNCE_FACTOR;
    vehicle.velocity.z *= BOUNCE_FACTOR;

    Some(Contact {
        obstacle: index,
        impact_speed,
        damage,
    })
}

/// Resolve every obstacle in registry order. Later obstacles see the
/// position and velocity left by earlier ones.
pub fn collision_system(vehicle: &mut Vehicle, obstacles: &[Obstacle]) -> Vec<Contact> {
    obstacles
        .iter()
        .enumerate()
        .filter_map(|(i, obstacle)| resolve_obstacle(vehicle, obstacle, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ObstacleKind;
    use crate::math::Rgb;

    fn pillar(x: f32, z: f32) -> Obstacle {
        Obstacle {
            position: Vec3::new(x, 0.0, z),
            size: Vec3::new(4.0, 3.0, 4.0),
            kind: ObstacleKind::Barrier,
            color: Rgb::hex(0xEF4444),
        }
    }

    fn vehicle_at(x: f32, y: f32, z: f32, velocity: Vec3) -> Vehicle {
        Vehicle {
            position: Vec3::new(x, y, z),
            velocity,
            ..Vehicle::new()
        }
    }

    #[test]
    fn overlap_is_gated_by_obstacle_height() {
        let p = pillar(0.0, 0.0);
        assert!(footprint_overlap(Vec3::new(2.5, 1.0, 0.0), VEHICLE_SIZE, &p));
        assert!(footprint_overlap(Vec3::new(0.0, 3.0, 0.0), VEHICLE_SIZE, &p));
        assert!(!footprint_overlap(Vec3::new(0.0, 3.01, 0.0), VEHICLE_SIZE, &p));
        // Exactly on the boundary is not an overlap.
        assert!(!footprint_overlap(Vec3::new(3.0, 1.0, 0.0), VEHICLE_SIZE, &p));
    }

    #[test]
    fn fast_hit_damages_pushes_out_and_bounces() {
        let mut v = vehicle_at(-2.5, 1.0, 0.0, Vec3::new(8.0, 0.0, 0.0));
        let contact = resolve_obstacle(&mut v, &pillar(0.0, 0.0), 4).unwrap();

        assert_eq!(contact.obstacle, 4);
        assert_eq!(contact.impact_speed, 8.0);
        assert_eq!(contact.damage, 40.0);
        assert_eq!(v.damage, 40.0);
        assert!((v.position.x - -3.1).abs() < 1e-5);
        assert_eq!(v.position.z, 0.0);
        assert_eq!(v.velocity, Vec3::new(-4.0, 0.0, 0.0));
    }

    #[test]
    fn slow_contact_corrects_without_damage() {
        let mut v = vehicle_at(2.9, 1.0, 0.0, Vec3::new(-3.0, 0.0, 0.0));
        let contact = resolve_obstacle(&mut v, &pillar(0.0, 0.0), 0).unwrap();

        assert_eq!(contact.damage, 0.0);
        assert_eq!(v.damage, 0.0);
        assert!((v.position.x - 3.1).abs() < 1e-5);
        assert_eq!(v.velocity.x, 1.5);
    }

    fn wall(x: f32, z: f32, size_x: f32, size_z: f32) -> Obstacle {
        Obstacle {
            position: Vec3::new(x, 0.0, z),
            size: Vec3::new(size_x, 5.0, size_z),
            kind: ObstacleKind::Wall,
            color: Rgb::hex(0x8B5CF6),
        }
    }

    #[test]
    fn off_center_east_wall_hit_lands_on_the_near_face() {
        let east = wall(30.0, 0.0, 2.0, 40.0);
        let mut v = vehicle_at(28.063, 1.0, 10.0, Vec3::new(9.8, 0.0, 0.0));
        resolve_obstacle(&mut v, &east, 0).unwrap();

        assert!(!footprint_overlap(v.position, VEHICLE_SIZE, &east));
        // Out through the west face, not slid along the wall.
        assert!((v.position.x - (30.0 - 2.1)).abs() < 1e-4);
        assert!((v.position.z - 10.0).abs() < 1.0);
    }

    #[test]
    fn off_center_north_wall_hit_lands_on_the_near_face() {
        let north = wall(0.0, -40.0, 40.0, 2.0);
        let mut v = vehicle_at(8.0, 1.0, -37.5, Vec3::new(0.0, 0.0, -9.0));
        resolve_obstacle(&mut v, &north, 2).unwrap();

        assert!(!footprint_overlap(v.position, VEHICLE_SIZE, &north));
        assert!((v.position.z - (-40.0 + 3.1)).abs() < 1e-4);
        assert!((v.position.x - 8.0).abs() < 2.0);
        assert_eq!(v.velocity.z, 4.5);
    }

    #[test]
    fn centered_vehicle_skips_push_out() {
        let mut v = vehicle_at(0.05, 1.0, 0.0, Vec3::new(0.0, 0.0, 1.0));
        resolve_obstacle(&mut v, &pillar(0.0, 0.0), 0).unwrap();

        assert_eq!(v.position, Vec3::new(0.05, 1.0, 0.0));
        assert!(v.position.is_finite());
        assert_eq!(v.velocity.z, -0.5);
    }

    #[test]
    fn obstacles_resolve_in_registry_order() {
        let obstacles = [pillar(0.0, 0.0), pillar(30.0, 0.0), pillar(0.0, 0.0)];
        let mut v = vehicle_at(-2.5, 1.0, 0.0, Vec3::new(10.0, 0.0, 0.0));
        let contacts = collision_system(&mut v, &obstacles);

        // The first copy pushes the vehicle clear, so the duplicate misses.
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].obstacle, 0);
    }
}
