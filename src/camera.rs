use glam::{Vec2, Vec3};

use crate::components::Vehicle;
use crate::controls::CameraIntents;

pub const DISTANCE_RANGE: (f32, f32) = (10.0, 50.0);
pub const HEIGHT_RANGE: (f32, f32) = (5.0, 30.0);
pub const DEFAULT_DISTANCE: f32 = 25.0;
pub const DEFAULT_HEIGHT: f32 = 12.0;

/// Orbit step per frame while Q/E is held.
const ORBIT_STEP: f32 = 0.03;
/// Zoom step per frame while R/F is held.
const ZOOM_STEP: f32 = 0.5;
/// Height change per raise/lower command.
pub const HEIGHT_STEP: f32 = 1.0;

/// Focal scale of the projection in pixels per unit at the reference depth.
const FOCAL: f32 = 400.0 * 20.0;
/// Added to view depth before the perspective divide. Large enough that the
/// perspective stays gentle across the whole arena.
const DEPTH_BIAS: f32 = 300.0;
/// Smallest allowed perspective denominator, keeps far-behind points finite.
const MIN_DENOMINATOR: f32 = 5.0;
/// Horizon line as a fraction of the viewport height.
const HORIZON: f32 = 0.65;

/// Pixel size of the output surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// A world point mapped to the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Signed distance in front of the camera along its view direction.
    /// Negative means behind the camera.
    pub depth: f32,
}

/// Pixels per world unit at a view depth. The denominator is clamped, so
/// this stays finite for any finite depth.
pub fn perspective_scale(depth: f32) -> f32 {
    FOCAL / (depth + DEPTH_BIAS).max(MIN_DENOMINATOR)
}

/// Free camera orbiting the vehicle. Only these scalars persist between
/// frames; the pose is rebuilt from the vehicle every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    distance: f32,
    height: f32,
    /// Added to the vehicle yaw. Unbounded.
    pub angle_offset: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, height: f32) -> Self {
        Self {
            distance: distance.clamp(DISTANCE_RANGE.0, DISTANCE_RANGE.1),
            height: height.clamp(HEIGHT_RANGE.0, HEIGHT_RANGE.1),
            angle_offset: 0.0,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(DISTANCE_RANGE.0, DISTANCE_RANGE.1);
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height.clamp(HEIGHT_RANGE.0, HEIGHT_RANGE.1);
    }

    /// Move the height by whole `HEIGHT_STEP`s, snapped to the step grid.
    pub fn nudge_height(&mut self, steps: f32) {
        let next = ((self.height + steps * HEIGHT_STEP) / HEIGHT_STEP).round() * HEIGHT_STEP;
        self.set_height(next);
    }

    /// Apply one frame of held camera controls.
    pub fn apply(&mut self, intents: &CameraIntents) {
        if intents.orbit_left {
            self.angle_offset += ORBIT_STEP;
        }
        if intents.orbit_right {
            self.angle_offset -= ORBIT_STEP;
        }
        if intents.zoom_in {
            self.set_distance(self.distance - ZOOM_STEP);
        }
        if intents.zoom_out {
            self.set_distance(self.distance + ZOOM_STEP);
        }
    }

    /// Camera pose for this frame: behind the vehicle at `distance`, rotated
    /// by the vehicle yaw plus the orbit offset.
    pub fn pose(&self, vehicle: &Vehicle) -> CameraPose {
        let angle = vehicle.rotation + self.angle_offset;
        CameraPose {
            position: Vec3::new(
                vehicle.position.x + angle.sin() * self.distance,
                self.height,
                vehicle.position.z + angle.cos() * self.distance,
            ),
            angle,
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE, DEFAULT_HEIGHT)
    }
}

/// Camera placement for one frame. Looks along `(-sin a, 0, -cos a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub angle: f32,
}

impl CameraPose {
    /// Translate into camera space, undo the yaw, then divide by biased depth.
    pub fn project(&self, point: Vec3, viewport: Viewport) -> Projected {
        let d = point - self.position;
        let (s, c) = self.angle.sin_cos();
        let right = d.x * c - d.z * s;
        let depth = -(d.x * s + d.z * c);

        let scale = perspective_scale(depth);
        Projected {
            screen: Vec2::new(
                viewport.width / 2.0 + right * scale,
                viewport.height * HORIZON - d.y * scale,
            ),
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };

    #[test]
    fn default_pose_sits_behind_the_vehicle() {
        let cam = OrbitCamera::default();
        let pose = cam.pose(&Vehicle::new());
        assert!((pose.position - Vec3::new(0.0, 12.0, 25.0)).length() < 1e-5);

        // The vehicle is straight ahead at the orbit distance.
        let p = pose.project(Vehicle::new().position, VIEW);
        assert!((p.depth - 25.0).abs() < 1e-4);
        assert!((p.screen.x - 640.0).abs() < 1e-3);
        assert!(p.screen.y > VIEW.height * HORIZON);
    }

    #[test]
    fn farther_points_shrink() {
        let pose = OrbitCamera::default().pose(&Vehicle::new());
        let near = pose.project(Vec3::new(1.0, 0.0, 0.0), VIEW);
        let far = pose.project(Vec3::new(1.0, 0.0, -100.0), VIEW);
        assert!(far.depth > near.depth);
        assert!(perspective_scale(far.depth) < perspective_scale(near.depth));
        assert!(far.screen.x - 640.0 < near.screen.x - 640.0);
    }

    #[test]
    fn points_right_of_view_land_right_of_center() {
        let mut vehicle = Vehicle::new();
        vehicle.rotation = 1.1;
        let pose = OrbitCamera::default().pose(&vehicle);
        let right_dir = Vec3::new(pose.angle.cos(), 0.0, -pose.angle.sin());
        let p = pose.project(vehicle.position + right_dir * 3.0, VIEW);
        assert!(p.screen.x > 640.0);
    }

    #[test]
    fn points_far_behind_stay_finite() {
        let pose = OrbitCamera::default().pose(&Vehicle::new());
        let p = pose.project(Vec3::new(0.0, 0.0, 5000.0), VIEW);
        assert!(p.depth < -1000.0);
        assert!(p.screen.is_finite());
        assert_eq!(perspective_scale(p.depth), FOCAL / MIN_DENOMINATOR);
        // Clamped denominator: one unit to the side spans FOCAL / MIN_DENOMINATOR pixels.
        let side = pose.project(Vec3::new(1.0, 12.0, 5000.0), VIEW);
        assert!((side.screen.x - p.screen.x - FOCAL / MIN_DENOMINATOR).abs() < 1e-2);
    }

    #[test]
    fn controls_orbit_and_zoom_within_range() {
        let mut cam = OrbitCamera::default();
        let zoom_in = CameraIntents {
            zoom_in: true,
            ..CameraIntents::default()
        };
        for _ in 0..100 {
            cam.apply(&zoom_in);
        }
        assert_eq!(cam.distance(), DISTANCE_RANGE.0);

        let orbit = CameraIntents {
            orbit_left: true,
            zoom_out: true,
            ..CameraIntents::default()
        };
        cam.apply(&orbit);
        assert!((cam.angle_offset - ORBIT_STEP).abs() < 1e-6);
        assert_eq!(cam.distance(), DISTANCE_RANGE.0 + ZOOM_STEP);
    }

    #[test]
    fn height_nudges_clamp_and_move_the_pose() {
        let mut cam = OrbitCamera::default();
        cam.nudge_height(3.0);
        assert_eq!(cam.height(), DEFAULT_HEIGHT + 3.0);
        assert_eq!(cam.pose(&Vehicle::new()).position.y, DEFAULT_HEIGHT + 3.0);

        for _ in 0..40 {
            cam.nudge_height(-1.0);
        }
        assert_eq!(cam.height(), HEIGHT_RANGE.0);
        cam.set_height(99.0);
        assert_eq!(cam.height(), HEIGHT_RANGE.1);
        assert_eq!(cam.pose(&Vehicle::new()).position.y, HEIGHT_RANGE.1);
    }

    #[test]
    fn raised_camera_sees_the_vehicle_lower_on_screen() {
        let vehicle = Vehicle::new();
        let mut cam = OrbitCamera::default();
        let before = cam.pose(&vehicle).project(vehicle.position, VIEW);
        cam.nudge_height(5.0);
        let after = cam.pose(&vehicle).project(vehicle.position, VIEW);
        assert!(after.screen.y > before.screen.y);
    }

    #[test]
    fn construction_clamps_height_and_distance() {
        let cam = OrbitCamera::new(1.0, 100.0);
        assert_eq!(cam.distance(), DISTANCE_RANGE.0);
        assert_eq!(cam.height(), HEIGHT_RANGE.1);
    }
}
