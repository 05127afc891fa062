use bevy::dev_tools::states::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use crate::input::TogglePause;

pub struct StatePlugin;

impl Plugin for StatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_computed_state::<InScene>()
            .add_computed_state::<IsPaused>()
            .add_observer(toggle_pause)
            .add_systems(OnEnter(IsPaused::Paused), log_paused)
            .add_systems(OnEnter(IsPaused::NotPaused), log_resumed)
            .add_systems(Update, log_transitions::<AppState>);
    }
}

/// `Loading` shows the loading screen over the scene; the first click after the
/// textures settle moves to `Running`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Reflect, States)]
pub enum AppState {
    #[default]
    Loading,
    Running {
        paused: bool,
    },
}

impl AppState {
    pub const fn is_in_scene(self) -> bool { matches!(self, Self::Running { .. }) }
}

// true whether or not we're paused - the loading screen is the only place
// where the user can't interact with the scene
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct InScene;

impl ComputedStates for InScene {
    type SourceStates = AppState;

    // pausing must not fire OnExit(InScene)
    const ALLOW_SAME_STATE_TRANSITIONS: bool = false;

    fn compute(sources: AppState) -> Option<Self> {
        match sources {
            AppState::Running { .. } => Some(Self),
            AppState::Loading => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum IsPaused {
    NotPaused,
    Paused,
}

impl ComputedStates for IsPaused {
    type SourceStates = AppState;

    fn compute(sources: AppState) -> Option<Self> {
        match sources {
            AppState::Running { paused: true } => Some(Self::Paused),
            AppState::Running { paused: false } => Some(Self::NotPaused),
            AppState::Loading => None,
        }
    }
}

fn toggle_pause(
    _pause: On<Start<TogglePause>>,
    mut next_state: ResMut<NextState<AppState>>,
    state: Res<State<AppState>>,
) {
    if let AppState::Running { paused } = state.get() {
        next_state.set(AppState::Running { paused: !*paused });
    }
}

fn log_paused() {
    debug!("pausing simulation clock");
}

fn log_resumed() {
    debug!("resuming simulation clock");
}
