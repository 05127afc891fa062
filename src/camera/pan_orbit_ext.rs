use bevy_panorbit_camera::PanOrbitCamera;

use crate::camera::config::CameraConfig;
use crate::camera::framing::CameraPose;
use crate::camera::framing::OrbitBounds;

/// Extension trait for `PanOrbitCamera` providing convenience methods.
pub trait PanOrbitCameraExt {
    /// Allows for precise control while a pose is driven every frame.
    fn disable_interpolation(&mut self);

    /// Enables interpolation for smooth user control.
    fn enable_interpolation(&mut self, camera_config: &CameraConfig);

    /// Snaps the camera's targets to a pose.
    fn apply_pose(&mut self, pose: CameraPose);

    /// `None` lifts the zoom limits entirely.
    fn set_orbit_bounds(&mut self, bounds: Option<OrbitBounds>);
}

impl PanOrbitCameraExt for PanOrbitCamera {
    fn disable_interpolation(&mut self) {
        self.zoom_smoothness = 0.0;
        self.pan_smoothness = 0.0;
        self.orbit_smoothness = 0.0;
    }

    fn enable_interpolation(&mut self, camera_config: &CameraConfig) {
        self.zoom_smoothness = camera_config.zoom_smoothness;
        self.pan_smoothness = camera_config.pan_smoothness;
        self.orbit_smoothness = camera_config.orbit_smoothness;
    }

    fn apply_pose(&mut self, pose: CameraPose) {
        let (yaw, pitch, radius) = pose.orbit_angles();
        self.target_focus = pose.target;
        self.target_yaw = yaw;
        self.target_pitch = pitch;
        self.target_radius = radius;
        self.force_update = true;
    }

    fn set_orbit_bounds(&mut self, bounds: Option<OrbitBounds>) {
        match bounds {
            Some(bounds) => {
                self.zoom_lower_limit = bounds.min;
                self.zoom_upper_limit = Some(bounds.max);
            },
            None => {
                self.zoom_lower_limit = 0.0;
                self.zoom_upper_limit = None;
            },
        }
    }
}
