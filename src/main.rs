//! Orrery - an animated model of the solar system built with Bevy 0.18
//!
//! - Bodies on circular orbits, moons around their planets
//! - Click a body, or pick it from the travel menu, to fly the camera to it
//! - Adjustable simulation speed and pause
//! - Bevy Remote Protocol (BRP) support for debugging on native builds

mod asset_loader;
mod body;
mod camera;
mod input;
mod loading_screen;
mod picking;
mod schedule;
mod simulation;
mod state;
mod ui;

use bevy::prelude::*;
#[cfg(target_arch = "wasm32")]
use bevy::window::PresentMode;
#[cfg(target_arch = "wasm32")]
use bevy::window::WindowMode;
#[cfg(not(target_arch = "wasm32"))]
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use crate::asset_loader::AssetLoaderPlugin;
use crate::body::BodyPlugin;
use crate::camera::CameraPlugin;
use crate::input::InputPlugin;
use crate::loading_screen::LoadingScreenPlugin;
use crate::picking::BodyPickingPlugin;
use crate::schedule::SchedulePlugin;
use crate::simulation::SimulationPlugin;
use crate::state::StatePlugin;
use crate::ui::UiPlugin;

const TITLE: &str = "orrery";

fn main() {
    let mut app = App::new();

    #[cfg(not(target_arch = "wasm32"))]
    {
        // Get effective port from BrpExtrasPlugin to include in window title if non-default
        let brp_plugin = BrpExtrasPlugin::default();
        let (effective_port, _) = brp_plugin.get_effective_port();
        let window_title = if effective_port == bevy_brp_extras::DEFAULT_REMOTE_PORT {
            TITLE.to_string()
        } else {
            format!("{TITLE} - {effective_port}")
        };

        app.add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: window_title,
                    ..default()
                }),
                ..default()
            }),
            brp_plugin,
        ));
    }

    #[cfg(target_arch = "wasm32")]
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: TITLE.to_string(),
            present_mode: PresentMode::AutoNoVsync, // Reduces input lag.
            mode: WindowMode::BorderlessFullscreen(MonitorSelection::Current),
            ..default()
        }),
        ..default()
    }));

    app.add_plugins((
        EguiPlugin::default(),
        StatePlugin,
        SchedulePlugin,
        InputPlugin,
        SimulationPlugin,
        AssetLoaderPlugin,
        BodyPlugin,
        CameraPlugin,
        BodyPickingPlugin,
        LoadingScreenPlugin,
        UiPlugin,
    ))
    .run();
}
