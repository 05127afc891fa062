//! Every user-facing binding lives here so the rest of the app only reacts to
//! named actions.

use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

/// Longest press that still counts as a click.
const SELECT_TAP_SECS: f32 = 0.3;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnhancedInputPlugin)
            .add_input_context::<SceneControls>()
            .init_resource::<Inspectors>()
            .add_systems(Startup, spawn_scene_controls)
            .add_observer(toggle_camera_inspector)
            .add_observer(toggle_body_inspector)
            .add_observer(toggle_star_inspector);
    }
}

/// Input context for everything that happens in the scene.
#[derive(Component)]
pub struct SceneControls;

/// Left click: pick a body, or leave the loading screen. A tap, so that the
/// press starting an orbit drag doesn't also pick.
#[derive(InputAction)]
#[action_output(bool)]
pub struct Select;

#[derive(InputAction)]
#[action_output(bool)]
pub struct CycleSpeed;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ResetSpeed;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ReturnToSystem;

#[derive(InputAction)]
#[action_output(bool)]
pub struct NextBody;

#[derive(InputAction)]
#[action_output(bool)]
pub struct PreviousBody;

#[derive(InputAction)]
#[action_output(bool)]
pub struct TogglePause;

#[derive(InputAction)]
#[action_output(bool)]
pub struct TogglePaths;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ToggleCameraInspector;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ToggleBodyInspector;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ToggleStarInspector;

fn spawn_scene_controls(mut commands: Commands) {
    commands.spawn((
        Name::new("SceneControls"),
        SceneControls,
        actions!(SceneControls[
            (Action::<Select>::new(), Tap::new(SELECT_TAP_SECS), bindings![MouseButton::Left]),
            (Action::<CycleSpeed>::new(), bindings![KeyCode::Period]),
            (Action::<ResetSpeed>::new(), bindings![KeyCode::Comma]),
            (Action::<ReturnToSystem>::new(), bindings![KeyCode::Home, KeyCode::Escape]),
            (Action::<NextBody>::new(), bindings![KeyCode::BracketRight]),
            (Action::<PreviousBody>::new(), bindings![KeyCode::BracketLeft]),
            (Action::<TogglePause>::new(), bindings![KeyCode::Space]),
            (Action::<TogglePaths>::new(), bindings![KeyCode::KeyP]),
            (Action::<ToggleCameraInspector>::new(), bindings![KeyCode::F1]),
            (Action::<ToggleBodyInspector>::new(), bindings![KeyCode::F2]),
            (Action::<ToggleStarInspector>::new(), bindings![KeyCode::F3]),
        ]),
    ));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inspector {
    Camera,
    Bodies,
    Stars,
}

/// Which resource inspectors are open. All start closed.
#[derive(Resource, Default, Debug)]
pub struct Inspectors {
    camera: bool,
    bodies: bool,
    stars:  bool,
}

impl Inspectors {
    pub const fn is_open(&self, inspector: Inspector) -> bool {
        match inspector {
            Inspector::Camera => self.camera,
            Inspector::Bodies => self.bodies,
            Inspector::Stars => self.stars,
        }
    }

    pub const fn toggle(&mut self, inspector: Inspector) {
        let open = match inspector {
            Inspector::Camera => &mut self.camera,
            Inspector::Bodies => &mut self.bodies,
            Inspector::Stars => &mut self.stars,
        };
        *open = !*open;
    }
}

/// Run condition for a `ResourceInspectorPlugin`.
pub fn inspector_open(inspector: Inspector) -> impl FnMut(Res<Inspectors>) -> bool + Clone {
    move |inspectors: Res<Inspectors>| inspectors.is_open(inspector)
}

fn toggle_camera_inspector(
    _toggle: On<Start<ToggleCameraInspector>>,
    mut inspectors: ResMut<Inspectors>,
) {
    inspectors.toggle(Inspector::Camera);
}

fn toggle_body_inspector(
    _toggle: On<Start<ToggleBodyInspector>>,
    mut inspectors: ResMut<Inspectors>,
) {
    inspectors.toggle(Inspector::Bodies);
}

fn toggle_star_inspector(
    _toggle: On<Start<ToggleStarInspector>>,
    mut inspectors: ResMut<Inspectors>,
) {
    inspectors.toggle(Inspector::Stars);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspectors_toggle_independently() {
        let mut inspectors = Inspectors::default();
        inspectors.toggle(Inspector::Camera);

        assert!(inspectors.is_open(Inspector::Camera));
        assert!(!inspectors.is_open(Inspector::Bodies));

        inspectors.toggle(Inspector::Camera);
        assert!(!inspectors.is_open(Inspector::Camera));
    }
}
