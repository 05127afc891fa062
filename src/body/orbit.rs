//! Closed-form kinematics for orbiting bodies.
//!
//! Nothing here integrates: position and rotation are pure functions of the
//! elapsed simulation time and the body's static fields, so any frame can be
//! replayed from `t` alone.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use super::catalog::BodyDescriptor;
use super::catalog::BodyId;
use super::catalog::BodyKind;
use super::units::degrees_to_radians;
use super::units::normalise_distance;
use super::units::normalise_radius;

/// One real second covers eight simulated hours.
pub const TIME_FACTOR: f64 = 8.0 * std::f64::consts::TAU;

/// Closest the camera may approach, in body radii.
pub const MIN_DISTANCE_RADII: f32 = 3.5;

/// Pick sphere size, in body radii.
pub const HITBOX_RADII: f32 = 1.5;

#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct OrbitingBody {
    pub id:           BodyId,
    pub parent:       Option<BodyId>,
    pub kind:         BodyKind,
    /// scene units
    pub radius:       f32,
    /// scene units from the orbit centre
    pub distance:     f32,
    /// radians
    pub tilt:         f32,
    pub period_days:  f32,
    pub daylength:    f32,
    /// radians in `[0, TAU)` unless the catalog fixes it
    pub phase_offset: f32,
}

impl OrbitingBody {
    pub fn new(
        id: BodyId,
        parent: Option<BodyId>,
        descriptor: &BodyDescriptor,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            id,
            parent,
            kind: descriptor.kind,
            radius: normalise_radius(descriptor.radius),
            distance: normalise_distance(descriptor.distance),
            tilt: degrees_to_radians(descriptor.tilt),
            period_days: descriptor.period,
            daylength: descriptor.daylength,
            phase_offset: descriptor
                .offset
                .unwrap_or_else(|| rng.random_range(0.0..TAU)),
        }
    }

    /// Spin angle about the body's own axis, in `[0, TAU)`. Bodies without a
    /// day never spin.
    pub fn rotation(&self, elapsed: f64) -> f32 {
        if self.daylength == 0.0 {
            return 0.0;
        }
        wrap_angle(elapsed * TIME_FACTOR / f64::from(self.daylength))
    }

    /// Angle along the orbit, offset included, in `[0, TAU)`. A zero period
    /// holds the phase.
    pub fn orbit_phase(&self, elapsed: f64) -> f32 {
        if self.period_days == 0.0 {
            return self.phase_offset;
        }
        let turns = elapsed * TIME_FACTOR / (f64::from(self.period_days) * 24.0);
        wrap_angle(turns + f64::from(self.phase_offset))
    }

    /// Position relative to the orbit centre. Orbits are coplanar circles in xz.
    pub fn orbit_offset(&self, elapsed: f64) -> Vec3 {
        let phase = self.orbit_phase(elapsed);
        Vec3::new(phase.sin() * self.distance, 0.0, phase.cos() * self.distance)
    }

    /// Tilt about x, then spin about local z for rings and local y for everything else.
    pub fn orientation(&self, elapsed: f64) -> Quat {
        let spin = self.rotation(elapsed);
        let spin = match self.kind {
            BodyKind::Ring => Quat::from_rotation_z(spin),
            _ => Quat::from_rotation_y(spin),
        };
        Quat::from_rotation_x(self.tilt) * spin
    }

    pub fn min_distance(&self) -> f32 { self.radius * MIN_DISTANCE_RADII }

    pub fn hitbox_radius(&self) -> f32 { self.radius * HITBOX_RADII }
}

/// Angles grow without bound over a session, so they are reduced to one turn
/// while still in f64.
#[allow(clippy::cast_possible_truncation, reason = "reduced to one turn first")]
fn wrap_angle(angle: f64) -> f32 { angle.rem_euclid(std::f64::consts::TAU) as f32 }

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::body::catalog::descriptor;

    fn earth() -> OrbitingBody {
        let mut rng = StdRng::seed_from_u64(7);
        OrbitingBody::new(BodyId::default(), None, &descriptor("Earth"), &mut rng)
    }

    fn ring() -> OrbitingBody {
        let descriptor = BodyDescriptor {
            kind: BodyKind::Ring,
            ..descriptor("Ring")
        };
        let mut rng = StdRng::seed_from_u64(7);
        OrbitingBody::new(BodyId::default(), None, &descriptor, &mut rng)
    }

    #[test]
    fn earth_starts_on_positive_z() {
        let earth = earth();
        let position = earth.orbit_offset(0.0);

        assert!(position.x.abs() < 1e-6);
        assert!(position.y.abs() < f32::EPSILON);
        assert!((position.z - earth.distance).abs() < 1e-6);
        assert!((earth.min_distance() - 0.558_73).abs() < 1e-4);
    }

    #[test]
    fn zero_daylength_never_spins() {
        let body = OrbitingBody {
            daylength: 0.0,
            ..earth()
        };
        for elapsed in [0.0, 0.5, 1.0, 37.0, 10_000.0] {
            assert!(body.rotation(elapsed).abs() < f32::EPSILON);
            assert_eq!(body.orientation(elapsed), Quat::from_rotation_x(body.tilt));
        }
    }

    #[test]
    fn zero_daylength_still_orbits() {
        let body = OrbitingBody {
            daylength: 0.0,
            ..earth()
        };
        assert!((body.orbit_phase(10.0) - body.orbit_phase(0.0)).abs() > 0.0);
    }

    #[test]
    fn orbit_phase_is_linear_in_time() {
        let earth = earth();
        let delta = 2.5;
        let expected = 2.5 * 8.0 * TAU / (earth.period_days * 24.0);

        for elapsed in [0.0, 1.0, 12.5, 300.0] {
            let step =
                (earth.orbit_phase(elapsed + delta) - earth.orbit_phase(elapsed)).rem_euclid(TAU);
            assert!((step - expected).abs() < 1e-3, "at {elapsed}: {step} vs {expected}");
        }
    }

    #[test]
    fn orbit_stays_on_its_circle() {
        let mut rng = StdRng::seed_from_u64(42);
        let body = OrbitingBody::new(
            BodyId::default(),
            None,
            &BodyDescriptor {
                offset: None,
                distance: 778.5,
                period: 4331.0,
                ..descriptor("Jupiter")
            },
            &mut rng,
        );
        let squared = body.distance * body.distance;

        for step in 0_u16..200 {
            let offset = body.orbit_offset(f64::from(step) * 0.73);
            let on_circle = offset.x.mul_add(offset.x, offset.z * offset.z);
            assert!((on_circle - squared).abs() < 1e-3 * squared);
            assert!(offset.y.abs() < f32::EPSILON);
        }
    }

    #[test]
    fn random_offsets_stay_within_one_turn() {
        let mut rng = StdRng::seed_from_u64(3);
        let descriptor = BodyDescriptor {
            offset: None,
            ..descriptor("Mars")
        };
        for _ in 0..100 {
            let body = OrbitingBody::new(BodyId::default(), None, &descriptor, &mut rng);
            assert!((0.0..TAU).contains(&body.phase_offset));
        }
    }

    #[test]
    fn rings_spin_about_z() {
        let ring = ring();
        let orientation = ring.orientation(0.25);
        let expected =
            Quat::from_rotation_x(ring.tilt) * Quat::from_rotation_z(ring.rotation(0.25));
        assert!(orientation.abs_diff_eq(expected, 1e-6));

        // the ring's normal is its local z, so spinning leaves it in place
        let normal = orientation * Vec3::Z;
        assert!(normal.abs_diff_eq(Quat::from_rotation_x(ring.tilt) * Vec3::Z, 1e-5));
    }

    #[test]
    fn planets_spin_about_y() {
        let earth = earth();
        let axis = earth.orientation(3.0) * Vec3::Y;
        assert!(axis.abs_diff_eq(Quat::from_rotation_x(earth.tilt) * Vec3::Y, 1e-5));
    }

    #[test]
    fn spin_keeps_its_resolution_in_long_sessions() {
        let earth = earth();
        // eight real hours at x16
        let late = 57_600.0;
        let frame = 1.0 / 30.0;
        let expected = 8.0 * TAU / 24.0 / 30.0;

        for elapsed in [0.0, late, late * 4.0] {
            let rotation = earth.rotation(elapsed);
            assert!((0.0..=TAU).contains(&rotation));

            let step = (earth.rotation(elapsed + frame) - rotation).rem_euclid(TAU);
            assert!((step - expected).abs() < 1e-4, "at {elapsed}: {step} vs {expected}");

            let phase_step =
                (earth.orbit_phase(elapsed + frame) - earth.orbit_phase(elapsed)).rem_euclid(TAU);
            assert!(phase_step > 0.0, "orbit stalled at {elapsed}");
        }
    }

    #[test]
    fn hitbox_is_larger_than_body() {
        let earth = earth();
        assert!((earth.hitbox_radius() - earth.radius * 1.5).abs() < f32::EPSILON);
    }
}
