//! Star colors: hex parsing, HSL conversion and the inside/outside gradient.
//!
//! Colors are linear RGB in `Vec3` (components in `[0, 1]`), the same representation the
//! renderer uploads per vertex.

use crate::config::ConfigError;
use glam::Vec3;

/// The two ends of the radial color gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorEndpoints {
    /// Young, hot stars near the core.
    pub inside: Vec3,
    /// Old, cool stars toward the rim.
    pub outside: Vec3,
}

impl ColorEndpoints {
    /// Color at `t` along the gradient (0 = inside, 1 = outside). `t` is clamped to `[0, 1]`.
    pub fn inside_to_outside(&self, t: f32) -> Vec3 {
        self.inside.lerp(self.outside, t.clamp(0.0, 1.0))
    }

    /// Color at `t` measured from the outside end (0 = outside, 1 = inside).
    pub fn outside_to_inside(&self, t: f32) -> Vec3 {
        self.outside.lerp(self.inside, t.clamp(0.0, 1.0))
    }
}

/// Parse `#rrggbb` (leading `#` optional) into linear RGB.
pub fn parse_hex_color(hex: &str) -> Result<Vec3, ConfigError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(hex.to_string()));
    }
    let value =
        u32::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidColor(hex.to_string()))?;
    Ok(rgb_from_u24(value))
}

/// Split a packed `0xRRGGBB` value into RGB components.
pub fn rgb_from_u24(value: u32) -> Vec3 {
    Vec3::new(
        ((value >> 16) & 0xff) as f32 / 255.0,
        ((value >> 8) & 0xff) as f32 / 255.0,
        (value & 0xff) as f32 / 255.0,
    )
}

/// HSL (all components in `[0, 1]`, hue wraps) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Vec3::splat(l);
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// RGB to HSL `(h, s, l)`, each in `[0, 1]`.
pub fn rgb_to_hsl(rgb: Vec3) -> (f32, f32, f32) {
    let max = rgb.max_element();
    let min = rgb.min_element();
    let l = (max + min) * 0.5;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l <= 0.5 { d / (max + min) } else { d / (2.0 - max - min) };
    let h = if max == rgb.x {
        (rgb.y - rgb.z) / d + if rgb.y < rgb.z { 6.0 } else { 0.0 }
    } else if max == rgb.y {
        (rgb.z - rgb.x) / d + 2.0
    } else {
        (rgb.x - rgb.y) / d + 4.0
    };
    (h / 6.0, s, l)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        let a = parse_hex_color("#ff9040").unwrap();
        let b = parse_hex_color("FF9040").unwrap();
        assert_eq!(a, b);
        assert!((a.x - 1.0).abs() < 1e-6);
        assert!((a.y - 144.0 / 255.0).abs() < 1e-6);
        assert!((a.z - 64.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#fff", "#12345g", "#1234567", "#ééé"] {
            assert!(parse_hex_color(bad).is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn hsl_round_trip_yellow_band() {
        for h in [0.08_f32, 0.1, 0.12, 0.13] {
            let rgb = hsl_to_rgb(h, 0.7, 0.65);
            let (h2, s2, l2) = rgb_to_hsl(rgb);
            assert!((h - h2).abs() < 1e-4, "hue {h} -> {h2}");
            assert!((s2 - 0.7).abs() < 1e-4);
            assert!((l2 - 0.65).abs() < 1e-4);
        }
    }

    #[test]
    fn grey_has_zero_saturation() {
        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.4), Vec3::splat(0.4));
        let (_, s, l) = rgb_to_hsl(Vec3::splat(0.4));
        assert_eq!(s, 0.0);
        assert!((l - 0.4).abs() < 1e-6);
    }

    #[test]
    fn gradient_clamps_factor() {
        let ends = ColorEndpoints {
            inside: Vec3::X,
            outside: Vec3::Z,
        };
        assert_eq!(ends.inside_to_outside(-1.0), Vec3::X);
        assert_eq!(ends.inside_to_outside(2.0), Vec3::Z);
        assert_eq!(ends.outside_to_inside(0.0), Vec3::Z);
    }
}
