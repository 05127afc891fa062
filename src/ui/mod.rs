//! Screen overlay for the running scene. Everything here talks to the rest of
//! the app through `FocusRequest` and the `SimulationClock` multiplier only.

mod controls;
mod hud;

use bevy::prelude::*;

use controls::ControlsPlugin;
use hud::HudPlugin;

const PANEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.45);
const BUTTON_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.08);
const BUTTON_HOVERED: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);
const BUTTON_SELECTED: Color = Color::srgba(0.35, 0.55, 1.0, 0.45);

const TEXT_SIZE: f32 = 15.0;
const CAPTION_SIZE: f32 = 30.0;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) { app.add_plugins(HudPlugin).add_plugins(ControlsPlugin); }
}

fn text_font(font_size: f32) -> TextFont {
    TextFont {
        font_size,
        ..default()
    }
}
