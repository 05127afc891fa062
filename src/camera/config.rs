use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use crate::camera::framing::CameraPose;
use crate::camera::framing::OrbitBounds;
use crate::input::Inspector;
use crate::input::inspector_open;

pub struct CameraConfigPlugin;

impl Plugin for CameraConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<CameraConfig>::default()
                .run_if(inspector_open(Inspector::Camera)),
        )
        .init_resource::<CameraConfig>();
    }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct CameraConfig {
    pub clear_color:               Color,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub bloom_intensity:           f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub bloom_low_frequency_boost: f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub bloom_high_pass_frequency: f32,
    #[inspector(min = 0.0, max = 50_000_000.0, display = NumberDisplay::Slider)]
    pub sun_intensity:             f32,
    /// Must reach past the outermost orbit.
    #[inspector(min = 1.0, max = 1_000.0, display = NumberDisplay::Slider)]
    pub sun_range:                 f32,
    #[inspector(min = 0.0, max = 1_000.0, display = NumberDisplay::Slider)]
    pub ambient_brightness:        f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub zoom_smoothness:           f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub pan_smoothness:            f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub orbit_smoothness:          f32,
    /// Wall-clock seconds for a focus change, independent of simulation speed.
    #[inspector(min = 0.1, max = 5.0, display = NumberDisplay::Slider)]
    pub transition_secs:           f32,
    /// Farthest zoom as a multiple of the closest. Revisions of the scene have
    /// used anything from 3 to 5.
    #[inspector(min = 1.5, max = 10.0, display = NumberDisplay::Slider)]
    pub bound_multiplier:          f32,
    /// Closest approach when framing the whole system.
    #[inspector(min = 1.0, max = 100.0, display = NumberDisplay::Slider)]
    pub system_min_distance:       f32,
    pub system_position:           Vec3,
    pub system_target:             Vec3,
    /// Camera offset from a focused body, in multiples of its closest approach.
    pub framing_offset:            Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            clear_color:               Color::BLACK,
            bloom_intensity:           0.35,
            bloom_low_frequency_boost: 0.5,
            bloom_high_pass_frequency: 1.0,
            sun_intensity:             10_000_000.0,
            sun_range:                 100.0,
            ambient_brightness:        60.0,
            zoom_smoothness:           0.10,
            pan_smoothness:            0.02,
            orbit_smoothness:          0.10,
            transition_secs:           1.5,
            bound_multiplier:          5.0,
            system_min_distance:       20.0,
            system_position:           Vec3::new(0.0, 20.0, 20.0),
            system_target:             Vec3::ZERO,
            framing_offset:            Vec3::new(1.5, 0.75, 1.5),
        }
    }
}

impl CameraConfig {
    pub const fn system_pose(&self) -> CameraPose {
        CameraPose {
            position: self.system_position,
            target:   self.system_target,
        }
    }

    pub fn orbit_bounds(&self, min_distance: f32) -> OrbitBounds {
        OrbitBounds {
            min: min_distance,
            max: min_distance * self.bound_multiplier,
        }
    }
}
