mod cameras;
mod config;
mod constants;
mod focus;
mod framing;
mod lights;
mod pan_orbit_ext;
mod stars;

use bevy::prelude::*;

use cameras::CamerasPlugin;
use config::CameraConfigPlugin;
pub use focus::FocusRequest;
use focus::FocusPlugin;
pub use framing::FocusTarget;
pub use framing::FramingController;
use lights::LightsPlugin;
use stars::StarsPlugin;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraConfigPlugin)
            .add_plugins(CamerasPlugin)
            .add_plugins(LightsPlugin)
            .add_plugins(FocusPlugin)
            .add_plugins(StarsPlugin);
    }
}
