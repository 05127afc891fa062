//! Conversions from catalog units into scene space.
//!
//! Radii and distances span several orders of magnitude (the sun against
//! pluto), so both are compressed with monotonic curves that keep every body
//! visible in the same frame. Raw values stay on the descriptor for display.

use std::f32::consts::PI;

/// Divisor applied to the square root of a radius in km.
pub const RADIUS_DIVISOR: f32 = 500.0;

/// Exponent applied to raw orbital distances.
pub const DISTANCE_EXPONENT: f32 = 0.4;

/// Scene-space radius for a body radius given in km.
pub fn normalise_radius(radius_km: f32) -> f32 { radius_km.sqrt() / RADIUS_DIVISOR }

/// Scene-space orbital distance for a raw catalog distance.
pub fn normalise_distance(distance: f32) -> f32 { distance.powf(DISTANCE_EXPONENT) }

pub const fn degrees_to_radians(degrees: f32) -> f32 { PI * degrees / 180.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_radius_compresses_to_scene_units() {
        let radius = normalise_radius(6371.0);
        assert!((radius - 0.159_637).abs() < 1e-5, "got {radius}");
    }

    #[test]
    fn unit_distance_stays_unit() {
        assert!((normalise_distance(1.0) - 1.0).abs() < f32::EPSILON);
        assert!(normalise_distance(0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn compression_preserves_ordering() {
        let raw = [0.384_f32, 57.9, 149.6, 778.5, 5906.4];
        let scene: Vec<f32> = raw.iter().map(|d| normalise_distance(*d)).collect();
        assert!(scene.windows(2).all(|pair| pair[0] < pair[1]));

        let radii = [1188.3_f32, 6371.0, 69911.0, 696_340.0];
        let scene: Vec<f32> = radii.iter().map(|r| normalise_radius(*r)).collect();
        assert!(scene.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn degrees_convert_to_radians() {
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-6);
        assert!((degrees_to_radians(23.44) - 0.409_105).abs() < 1e-5);
    }
}
