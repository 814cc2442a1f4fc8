use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{Obstacle, ObstacleKind, Player, RegistryIndex, Vehicle};
use crate::math::Rgb;

const WALL_COLOR: Rgb = Rgb::hex(0x8B5CF6);

/// The fixed arena: four perimeter walls, two barriers and a ramp.
/// Order matters, collisions are resolved first-match-first.
pub const ARENA: [Obstacle; 7] = [
    Obstacle {
        position: Vec3::new(30.0, 0.0, 0.0),
        size: Vec3::new(2.0, 5.0, 40.0),
        kind: ObstacleKind::Wall,
        color: WALL_COLOR,
    },
    Obstacle {
        position: Vec3::new(-30.0, 0.0, 0.0),
        size: Vec3::new(2.0, 5.0, 40.0),
        kind: ObstacleKind::Wall,
        color: WALL_COLOR,
    },
    Obstacle {
        position: Vec3::new(0.0, 0.0, -40.0),
        size: Vec3::new(40.0, 5.0, 2.0),
        kind: ObstacleKind::Wall,
        color: WALL_COLOR,
    },
    Obstacle {
        position: Vec3::new(0.0, 0.0, 40.0),
        size: Vec3::new(40.0, 5.0, 2.0),
        kind: ObstacleKind::Wall,
        color: WALL_COLOR,
    },
    Obstacle {
        position: Vec3::new(10.0, 0.0, 10.0),
        size: Vec3::new(4.0, 3.0, 4.0),
        kind: ObstacleKind::Barrier,
        color: Rgb::hex(0xEF4444),
    },
    Obstacle {
        position: Vec3::new(-15.0, 0.0, 5.0),
        size: Vec3::new(8.0, 1.5, 6.0),
        kind: ObstacleKind::Ramp,
        color: Rgb::hex(0xF97316),
    },
    Obstacle {
        position: Vec3::new(-10.0, 0.0, -10.0),
        size: Vec3::new(3.0, 4.0, 3.0),
        kind: ObstacleKind::Barrier,
        color: Rgb::hex(0x10B981),
    },
];

/// Populate `world` with the arena obstacles and the player vehicle.
/// Returns the vehicle entity.
pub fn spawn_arena(world: &mut World) -> Entity {
    for (i, obstacle) in ARENA.iter().enumerate() {
        tracing::trace!(index = i, kind = ?obstacle.kind, "spawning obstacle");
        world.spawn((*obstacle, RegistryIndex(i)));
    }
    let vehicle = world.spawn((Vehicle::new(), Player));
    tracing::debug!(obstacles = ARENA.len(), "arena spawned");
    vehicle
}

/// All obstacles in registry order.
pub fn ordered_obstacles(world: &World) -> Vec<Obstacle> {
    let mut entries: Vec<(RegistryIndex, Obstacle)> = world
        .query::<(&Obstacle, &RegistryIndex)>()
        .iter()
        .map(|(_e, (obstacle, index))| (*index, *obstacle))
        .collect();
    entries.sort_by_key(|(index, _)| *index);
    entries.into_iter().map(|(_, obstacle)| obstacle).collect()
}
