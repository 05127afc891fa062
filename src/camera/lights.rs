use bevy::light::AmbientLight;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::camera::config::CameraConfig;

pub struct LightsPlugin;

impl Plugin for LightsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_sun_light)
            .add_systems(Update, update_lights);
    }
}

/// Point light at the origin standing in for the sun. It casts no shadows, or
/// the sun's own sphere would block it.
#[derive(Component, Reflect)]
pub struct SunLight;

fn spawn_sun_light(mut commands: Commands, camera_config: Res<CameraConfig>) {
    commands.spawn((
        Name::new("SunLight"),
        SunLight,
        PointLight {
            intensity: camera_config.sun_intensity,
            range: camera_config.sun_range,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
    ));
}

fn update_lights(
    camera_config: Res<CameraConfig>,
    mut sun: Single<&mut PointLight, With<SunLight>>,
    mut ambient: Single<&mut AmbientLight, With<PanOrbitCamera>>,
) {
    if !camera_config.is_changed() {
        return;
    }
    sun.intensity = camera_config.sun_intensity;
    sun.range = camera_config.sun_range;
    ambient.brightness = camera_config.ambient_brightness;

    debug!(
        "sun light updated to {} intensity, {} range, ambient {}",
        camera_config.sun_intensity, camera_config.sun_range, camera_config.ambient_brightness
    );
}
