/// Default zoom sensitivity for pan-orbit camera controls
pub const CAMERA_ZOOM_SENSITIVITY: f32 = 0.2;

pub const CAMERA_FOV_DEGREES: f32 = 75.0;

/// Close enough to frame the smallest moon at its minimum distance.
pub const CAMERA_NEAR: f32 = 0.001;

/// Must contain the star shell.
pub const CAMERA_FAR: f32 = 1000.0;
