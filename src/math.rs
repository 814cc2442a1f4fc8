use glam::Vec3;

/// 8-bit RGB color as used by the arena palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Multiply every channel by `factor`, flooring and clamping to 255.
    pub fn adjust_brightness(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).floor().clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r as f32 / 255.0,
            g: self.g as f32 / 255.0,
            b: self.b as f32 / 255.0,
            a,
        }
    }
}

/// Normalized color with alpha, what the GL canvas consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(1.0)
    }
}

/// Length of the x/z part of a vector.
pub fn horizontal_len(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Unit heading on the ground plane for a yaw angle. Yaw 0 faces -Z.
pub fn heading(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Rotate `v` about the vertical axis by `yaw` radians.
pub fn rotate_y(v: Vec3, yaw: f32) -> Vec3 {
    let (s, c) = yaw.sin_cos();
    Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_splits_channels() {
        let c = Rgb::hex(0x8B5CF6);
        assert_eq!((c.r, c.g, c.b), (0x8B, 0x5C, 0xF6));
    }

    #[test]
    fn brightness_floors_and_clamps() {
        let c = Rgb::hex(0xEF4444).adjust_brightness(1.2);
        assert_eq!(c.r, 255);
        assert_eq!(c.g, (0x44 as f32 * 1.2).floor() as u8);

        let dark = Rgb::hex(0x0EA5E9).adjust_brightness(0.6);
        assert_eq!(dark, Rgb { r: 8, g: 99, b: 139 });
    }

    #[test]
    fn heading_matches_rotated_forward() {
        for yaw in [0.0_f32, 0.7, -2.1, 3.0] {
            let a = heading(yaw);
            let b = rotate_y(Vec3::new(0.0, 0.0, -1.0), yaw);
            assert!((a - b).length() < 1e-5, "yaw {yaw}: {a} vs {b}");
        }
    }

    #[test]
    fn horizontal_len_ignores_y() {
        assert_eq!(horizontal_len(Vec3::new(3.0, 100.0, 4.0)), 5.0);
    }
}
