//! Simulation time, decoupled from wall-clock time by a speed multiplier.

use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use crate::input::CycleSpeed;
use crate::input::ResetSpeed;
use crate::schedule::SimulationSet;

/// Simulated seconds per real second at multiplier x1.
pub const BASE_RATE: f32 = 0.125;

/// The speed button doubles up to this multiplier and then wraps back to x1.
pub const MAX_MULTIPLIER: u32 = 16;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(Update, advance_clock.in_set(SimulationSet::Clock))
            .add_observer(cycle_speed)
            .add_observer(reset_speed);
    }
}

#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource)]
pub struct SimulationClock {
    elapsed:    f64,
    multiplier: u32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            elapsed:    0.0,
            multiplier: 1,
        }
    }
}

impl SimulationClock {
    /// Seconds of simulation time since the scene was built. Kept in f64 so
    /// a single frame still registers after hours at high speed.
    pub const fn elapsed(&self) -> f64 { self.elapsed }

    pub const fn multiplier(&self) -> u32 { self.multiplier }

    /// Simulated seconds per real second.
    #[allow(clippy::cast_precision_loss, reason = "multiplier is at most MAX_MULTIPLIER")]
    pub fn rate(&self) -> f32 { BASE_RATE * self.multiplier as f32 }

    /// A zero or negative delta leaves the clock where it is.
    pub fn advance(&mut self, real_delta: f32) {
        if real_delta > 0.0 {
            self.elapsed += f64::from(real_delta) * f64::from(self.rate());
        }
    }

    pub fn set_multiplier(&mut self, multiplier: u32) {
        self.multiplier = multiplier.clamp(1, MAX_MULTIPLIER);
    }

    /// x1 → x2 → x4 → x8 → x16 → x1
    pub fn cycle_multiplier(&mut self) -> u32 {
        self.multiplier = if self.multiplier >= MAX_MULTIPLIER {
            1
        } else {
            self.multiplier * 2
        };
        self.multiplier
    }

    /// Text for the speed button.
    pub fn label(&self) -> String { format!(" - x{} - ", self.multiplier) }
}

fn advance_clock(time: Res<Time>, mut clock: ResMut<SimulationClock>) {
    clock.advance(time.delta_secs());
}

fn cycle_speed(_speed: On<Start<CycleSpeed>>, mut clock: ResMut<SimulationClock>) {
    let multiplier = clock.cycle_multiplier();
    info!("simulation speed x{multiplier}");
}

fn reset_speed(_reset: On<Start<ResetSpeed>>, mut clock: ResMut<SimulationClock>) {
    clock.set_multiplier(1);
    info!("simulation speed reset to x{}", clock.multiplier());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_cycles_through_powers_of_two() {
        let mut clock = SimulationClock::default();
        let seen: Vec<u32> = (0..6).map(|_| clock.cycle_multiplier()).collect();
        assert_eq!(seen, vec![2, 4, 8, 16, 1, 2]);
    }

    #[test]
    fn elapsed_scales_with_multiplier() {
        let mut clock = SimulationClock::default();
        clock.advance(1.0);
        assert!((clock.elapsed() - 0.125).abs() < f64::EPSILON);

        clock.set_multiplier(8);
        clock.advance(1.0);
        assert!((clock.elapsed() - 1.125).abs() < 1e-6);
    }

    #[test]
    fn stalled_frames_do_not_move_time() {
        let mut clock = SimulationClock::default();
        clock.advance(0.0);
        clock.advance(-1.0);
        assert!(clock.elapsed().abs() < f64::EPSILON);
    }

    #[test]
    fn one_frame_still_counts_after_hours_at_full_speed() {
        let mut clock = SimulationClock::default();
        clock.set_multiplier(MAX_MULTIPLIER);
        for _ in 0..8 {
            clock.advance(3600.0);
        }
        let before = clock.elapsed();
        assert!((before - 57_600.0).abs() < 1e-6);

        clock.advance(1.0 / 60.0);
        let frame = clock.elapsed() - before;
        assert!((frame - 2.0 / 60.0).abs() < 1e-7, "{frame}");
    }

    #[test]
    fn multiplier_is_clamped() {
        let mut clock = SimulationClock::default();
        clock.set_multiplier(0);
        assert_eq!(clock.multiplier(), 1);
        clock.set_multiplier(64);
        assert_eq!(clock.multiplier(), MAX_MULTIPLIER);
    }

    #[test]
    fn label_matches_multiplier() {
        let mut clock = SimulationClock::default();
        clock.cycle_multiplier();
        assert_eq!(clock.label(), " - x2 - ");
    }
}
