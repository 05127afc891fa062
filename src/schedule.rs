use bevy::prelude::*;

use crate::state::IsPaused;

/// Per-frame ordering: time moves, bodies follow the new time, the camera
/// frames the bodies where they now are, then screen-space overlays catch up.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum SimulationSet {
    Clock,
    Bodies,
    Camera,
    Overlays,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::Clock,
                SimulationSet::Bodies,
                SimulationSet::Camera,
                SimulationSet::Overlays,
            )
                .chain(),
        )
        // the scene keeps animating behind the loading screen, so only an
        // explicit pause stops the clock - the camera still runs while paused
        // so a focus change can finish its transition
        .configure_sets(
            Update,
            (SimulationSet::Clock, SimulationSet::Bodies).run_if(not(in_state(IsPaused::Paused))),
        );
    }
}
