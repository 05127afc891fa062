use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::AmbientLight;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use bevy_panorbit_camera::TrackpadBehavior;

use crate::camera::config::CameraConfig;
use crate::camera::constants::CAMERA_FAR;
use crate::camera::constants::CAMERA_FOV_DEGREES;
use crate::camera::constants::CAMERA_NEAR;
use crate::camera::constants::CAMERA_ZOOM_SENSITIVITY;
use crate::camera::pan_orbit_ext::PanOrbitCameraExt;

pub struct CamerasPlugin;

impl Plugin for CamerasPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin)
            .add_systems(Startup, spawn_panorbit_camera)
            .add_systems(Update, (update_bloom_settings, update_clear_color));
    }
}

/// One camera for the whole scene: bloom makes the sun and the star shell
/// glow, and its `AmbientLight` lifts the night side of every body just
/// enough to read.
pub fn spawn_panorbit_camera(mut commands: Commands, camera_config: Res<CameraConfig>) {
    let home = camera_config.system_pose();
    let (yaw, pitch, radius) = home.orbit_angles();

    let mut pan_orbit = PanOrbitCamera {
        focus: home.target,
        yaw: Some(yaw),
        pitch: Some(pitch),
        radius: Some(radius),
        zoom_sensitivity: CAMERA_ZOOM_SENSITIVITY,
        // the focus is owned by the framing controller
        pan_sensitivity: 0.0,
        trackpad_behavior: TrackpadBehavior::BlenderLike {
            modifier_pan:  Some(KeyCode::ShiftLeft),
            modifier_zoom: Some(KeyCode::ControlLeft),
        },
        trackpad_pinch_to_zoom_enabled: true,
        ..default()
    };
    pan_orbit.enable_interpolation(&camera_config);
    pan_orbit.set_orbit_bounds(Some(
        camera_config.orbit_bounds(camera_config.system_min_distance),
    ));

    commands.spawn((
        Name::new("SceneCamera"),
        pan_orbit,
        Camera {
            clear_color: ClearColorConfig::Custom(camera_config.clear_color),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(home.position).looking_at(home.target, Vec3::Y),
        Tonemapping::TonyMcMapface,
        get_bloom_settings(&camera_config),
        AmbientLight {
            brightness: camera_config.ambient_brightness,
            ..default()
        },
    ));
}

// propagate bloom settings back to the camera
fn update_bloom_settings(
    camera_config: Res<CameraConfig>,
    mut bloom: Single<&mut Bloom, With<PanOrbitCamera>>,
) {
    if camera_config.is_changed() {
        **bloom = get_bloom_settings(&camera_config);
    }
}

fn get_bloom_settings(camera_config: &CameraConfig) -> Bloom {
    let mut new_bloom_settings = Bloom::NATURAL;

    new_bloom_settings.intensity = camera_config.bloom_intensity;
    new_bloom_settings.low_frequency_boost = camera_config.bloom_low_frequency_boost;
    new_bloom_settings.high_pass_frequency = camera_config.bloom_high_pass_frequency;
    new_bloom_settings
}

// lets the inspector change the background while the scene is running
fn update_clear_color(
    camera_config: Res<CameraConfig>,
    mut camera: Single<&mut Camera, With<PanOrbitCamera>>,
) {
    if camera_config.is_changed() {
        camera.clear_color = ClearColorConfig::Custom(camera_config.clear_color);
    }
}
