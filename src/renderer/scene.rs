use glam::{Vec2, Vec3};
use hecs::World;

use crate::camera::{CameraPose, Projected, Viewport};
use crate::components::{Player, Vehicle, VEHICLE_SIZE};
use crate::math::{rotate_y, Rgb, Rgba};
use crate::scene::ordered_obstacles;

pub const SKY_TOP: Rgb = Rgb::hex(0x0A1128);
pub const SKY_BOTTOM: Rgb = Rgb::hex(0x1A2F4F);
pub const ACCENT: Rgb = Rgb::hex(0x0EA5E9);
pub const ALERT: Rgb = Rgb::hex(0xEF4444);

/// Damage at which the vehicle switches to the alert color.
pub const ALERT_DAMAGE: f32 = 50.0;

const EDGE_STROKE: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.3);
const GRID_ALPHA: f32 = 0.3;
const GRID_EXTENT: i32 = 50;
const GRID_CELL: i32 = 5;

/// A face is dropped when all of its corners are at or behind this depth.
pub const FACE_CULL_DEPTH: f32 = -100.0;
/// A ground cell is dropped when all of its corners are at or behind the camera.
const GRID_CULL_DEPTH: f32 = 0.0;

/// Box corner indices: 0-3 bottom ring, 4-7 top ring, starting at (-x, -z).
const FACES: [([usize; 4], f32); 6] = [
    ([4, 5, 6, 7], 1.2), // top
    ([0, 1, 5, 4], 1.0), // front (-z)
    ([2, 3, 7, 6], 0.9), // back (+z)
    ([0, 3, 7, 4], 0.8), // left (-x)
    ([1, 2, 6, 5], 0.8), // right (+x)
    ([0, 1, 2, 3], 0.6), // bottom
];

/// One 2D drawing instruction, in screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Full-surface vertical gradient.
    Gradient { top: Rgba, bottom: Rgba },
    /// Closed convex polygon, filled and/or outlined with 1px lines.
    Polygon {
        points: Vec<Vec2>,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
    },
}

/// Everything to paint for one frame, back to front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.push(DrawCmd::Polygon {
            points: vec![
                Vec2::new(x, y),
                Vec2::new(x + w, y),
                Vec2::new(x + w, y + h),
                Vec2::new(x, y + h),
            ],
            fill: Some(color),
            stroke: None,
        });
    }
}

/// Axis-aligned (or yawed) box standing on its base center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxShape {
    pub base: Vec3,
    pub size: Vec3,
    pub yaw: f32,
    pub color: Rgb,
}

impl BoxShape {
    pub fn corners(&self) -> [Vec3; 8] {
        let hx = self.size.x / 2.0;
        let hz = self.size.z / 2.0;
        let h = self.size.y;
        let local = [
            Vec3::new(-hx, 0.0, -hz),
            Vec3::new(hx, 0.0, -hz),
            Vec3::new(hx, 0.0, hz),
            Vec3::new(-hx, 0.0, hz),
            Vec3::new(-hx, h, -hz),
            Vec3::new(hx, h, -hz),
            Vec3::new(hx, h, hz),
            Vec3::new(-hx, h, hz),
        ];
        local.map(|p| self.base + rotate_y(p, self.yaw))
    }
}

/// Vehicle paint color for a damage level.
pub fn vehicle_color(damage: f32) -> Rgb {
    if damage < ALERT_DAMAGE {
        ACCENT
    } else {
        ALERT
    }
}

/// A projected box face waiting for depth ordering.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadedFace {
    pub points: [Vec2; 4],
    pub color: Rgb,
    /// Mean depth of the corners.
    pub depth: f32,
}

/// Project a box and shade its faces. Faces entirely past the cull depth
/// are left out; the rest are returned unsorted.
pub fn shade_box(shape: &BoxShape, pose: &CameraPose, viewport: Viewport) -> Vec<ShadedFace> {
    let projected: [Projected; 8] = shape.corners().map(|c| pose.project(c, viewport));

    FACES
        .iter()
        .filter(|(face, _)| face.iter().any(|&i| projected[i].depth > FACE_CULL_DEPTH))
        .map(|(face, brightness)| ShadedFace {
            points: face.map(|i| projected[i].screen),
            color: shape.color.adjust_brightness(*brightness),
            depth: face.iter().map(|&i| projected[i].depth).sum::<f32>() / 4.0,
        })
        .collect()
}

fn draw_ground(list: &mut DrawList, pose: &CameraPose, viewport: Viewport) {
    let stroke = ACCENT.with_alpha(GRID_ALPHA);
    for z in (-GRID_EXTENT..GRID_EXTENT).step_by(GRID_CELL as usize) {
        for x in (-GRID_EXTENT..GRID_EXTENT).step_by(GRID_CELL as usize) {
            let (x0, z0) = (x as f32, z as f32);
            let (x1, z1) = ((x + GRID_CELL) as f32, (z + GRID_CELL) as f32);
            let corners = [
                pose.project(Vec3::new(x0, 0.0, z0), viewport),
                pose.project(Vec3::new(x1, 0.0, z0), viewport),
                pose.project(Vec3::new(x1, 0.0, z1), viewport),
                pose.project(Vec3::new(x0, 0.0, z1), viewport),
            ];
            if corners.iter().all(|p| p.depth <= GRID_CULL_DEPTH) {
                continue;
            }
            list.push(DrawCmd::Polygon {
                points: corners.iter().map(|p| p.screen).collect(),
                fill: None,
                stroke: Some(stroke),
            });
        }
    }
}

/// Build the frame: sky, ground grid, then every obstacle and the vehicle
/// as shaded boxes painted far to near.
pub fn draw_scene(world: &World, pose: &CameraPose, viewport: Viewport) -> DrawList {
    let mut list = DrawList::new();
    list.push(DrawCmd::Gradient {
        top: SKY_TOP.into(),
        bottom: SKY_BOTTOM.into(),
    });
    draw_ground(&mut list, pose, viewport);

    let mut shapes: Vec<BoxShape> = ordered_obstacles(world)
        .iter()
        .map(|o| BoxShape {
            base: o.position,
            size: o.size,
            yaw: 0.0,
            color: o.color,
        })
        .collect();
    for (_e, (vehicle, _player)) in world.query::<(&Vehicle, &Player)>().iter() {
        shapes.push(BoxShape {
            base: vehicle.position,
            size: VEHICLE_SIZE,
            yaw: vehicle.rotation,
            color: vehicle_color(vehicle.damage),
        });
    }

    let mut faces: Vec<ShadedFace> = shapes
        .iter()
        .flat_map(|shape| shade_box(shape, pose, viewport))
        .collect();
    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    for face in faces {
        list.push(DrawCmd::Polygon {
            points: face.points.to_vec(),
            fill: Some(face.color.into()),
            stroke: Some(EDGE_STROKE),
        });
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use crate::scene::spawn_arena;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn default_pose() -> CameraPose {
        OrbitCamera::default().pose(&Vehicle::new())
    }

    fn unit_box(base: Vec3) -> BoxShape {
        BoxShape {
            base,
            size: Vec3::new(2.0, 2.0, 2.0),
            yaw: 0.0,
            color: Rgb::hex(0x808080),
        }
    }

    #[test]
    fn color_flips_at_half_damage() {
        assert_eq!(vehicle_color(0.0), ACCENT);
        assert_eq!(vehicle_color(49.9), ACCENT);
        assert_eq!(vehicle_color(50.0), ALERT);
        assert_eq!(vehicle_color(100.0), ALERT);
    }

    #[test]
    fn box_in_view_yields_six_shaded_faces() {
        let faces = shade_box(&unit_box(Vec3::new(0.0, 0.0, -10.0)), &default_pose(), VIEW);
        assert_eq!(faces.len(), 6);

        let top = &faces[0];
        assert_eq!(top.color, Rgb::hex(0x808080).adjust_brightness(1.2));
        assert_eq!(faces[5].color, Rgb::hex(0x808080).adjust_brightness(0.6));
        for face in &faces {
            assert!(face.points.iter().all(|p| p.is_finite()));
        }
    }

    #[test]
    fn box_far_behind_camera_is_culled() {
        // Camera sits at z = 25 looking toward -z.
        let faces = shade_box(&unit_box(Vec3::new(0.0, 0.0, 200.0)), &default_pose(), VIEW);
        assert!(faces.is_empty());
    }

    #[test]
    fn straddling_box_keeps_only_visible_faces() {
        // Near face sits just past the cull depth, far face just inside it.
        let pose = default_pose();
        let base = Vec3::new(0.0, 0.0, pose.position.z - FACE_CULL_DEPTH);
        let faces = shade_box(&unit_box(base), &pose, VIEW);
        assert!(!faces.is_empty() && faces.len() < 6);
        assert!(faces.iter().all(|f| f.depth > FACE_CULL_DEPTH - 2.0));
    }

    #[test]
    fn yawed_box_corners_rotate_about_base() {
        let shape = BoxShape {
            yaw: std::f32::consts::FRAC_PI_2,
            ..unit_box(Vec3::new(5.0, 0.0, 5.0))
        };
        let corners = shape.corners();
        // (-1, 0, -1) rotated a quarter turn lands on (-1, 0, 1).
        assert!((corners[0] - Vec3::new(4.0, 0.0, 6.0)).length() < 1e-5);
    }

    #[test]
    fn scene_paints_sky_first_with_finite_faces() {
        let mut world = World::new();
        spawn_arena(&mut world);
        let pose = default_pose();
        let list = draw_scene(&world, &pose, VIEW);

        assert!(matches!(list.commands[0], DrawCmd::Gradient { .. }));

        let filled: Vec<&Vec<Vec2>> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Polygon {
                    points,
                    fill: Some(_),
                    ..
                } => Some(points),
                _ => None,
            })
            .collect();
        assert!(!filled.is_empty());
        assert!(filled.iter().all(|pts| pts.iter().all(|p| p.is_finite())));
    }

    #[test]
    fn farther_box_is_painted_before_nearer_box() {
        use crate::components::{Obstacle, ObstacleKind, RegistryIndex};

        let far = Rgb::hex(0x00C800);
        let near = Rgb::hex(0x0000C8);
        let pillar = |z: f32, color: Rgb| Obstacle {
            position: Vec3::new(0.0, 0.0, z),
            size: Vec3::new(2.0, 2.0, 2.0),
            kind: ObstacleKind::Barrier,
            color,
        };
        // Registry order puts the near box first so sorting has to reorder.
        let mut world = World::new();
        world.spawn((pillar(-5.0, near), RegistryIndex(0)));
        world.spawn((pillar(-30.0, far), RegistryIndex(1)));

        let list = draw_scene(&world, &default_pose(), VIEW);
        let fills: Vec<Rgba> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Polygon { fill: Some(f), .. } => Some(*f),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 12);

        let far_last = fills.iter().rposition(|f| f.g > 0.0).unwrap();
        let near_first = fills.iter().position(|f| f.b > 0.0).unwrap();
        assert!(far_last < near_first, "far face {far_last} after near face {near_first}");
    }

    #[test]
    fn ground_cells_behind_camera_are_skipped() {
        let world = World::new();
        let pose = default_pose();
        let list = draw_scene(&world, &pose, VIEW);
        let cells = list.commands.len() - 1;

        // Camera at z = 25 looking to -z: the 5 rows with z >= 25 are behind it.
        let total = ((2 * GRID_EXTENT / GRID_CELL) * (2 * GRID_EXTENT / GRID_CELL)) as usize;
        let behind_rows = 5 * (2 * GRID_EXTENT / GRID_CELL) as usize;
        assert_eq!(cells, total - behind_rows);
    }

    #[test]
    fn damaged_vehicle_is_drawn_in_alert_color() {
        let alert_top: Rgba = ALERT.adjust_brightness(1.2).into();
        let count_alert_tops = |world: &World| {
            draw_scene(world, &default_pose(), VIEW)
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCmd::Polygon { fill: Some(f), .. } if *f == alert_top))
                .count()
        };

        let mut world = World::new();
        let player = spawn_arena(&mut world);
        let clean = count_alert_tops(&world);

        world.get::<&mut Vehicle>(player).unwrap().damage = 75.0;
        // The red barrier shares the alert color; the vehicle adds one more top.
        assert_eq!(count_alert_tops(&world), clean + 1);
    }
}
