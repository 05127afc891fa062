use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::asset_loader::AssetsState;
use crate::asset_loader::LoadingProgress;
use crate::input::Select;
use crate::state::AppState;

const PROMPT_SECS: f32 = 2.;
const FADE_SECS: f32 = 0.75;

const PROMPTS: [&str; 9] = [
    "Detecting neutrinos",
    "Forming event horizons",
    "Annihilating particles",
    "Tunneling electrons",
    "Entangling photons",
    "Collapsing wavefunctions",
    "Quantising gravity",
    "Evaporating black holes",
    "Increasing entropy",
];

const CONTINUE_PROMPT: &str = "Click to continue...";

pub struct LoadingScreenPlugin;

impl Plugin for LoadingScreenPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LoadingScreen {
            prompt_timer: Timer::from_seconds(PROMPT_SECS, TimerMode::Repeating),
            fade:         None,
        })
        .add_systems(OnEnter(AppState::Loading), spawn_loading_screen)
        .add_systems(OnEnter(AssetsState::Loaded), show_continue_prompt)
        .add_systems(
            Update,
            (
                rotate_prompts.run_if(in_state(AssetsState::Loading)),
                update_percentage,
            )
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(Update, fade_loading_screen)
        .add_observer(leave_loading_screen);
    }
}

#[derive(Resource, Debug)]
struct LoadingScreen {
    prompt_timer: Timer,
    fade:         Option<Timer>,
}

#[derive(Component)]
pub struct LoadingOverlay;

#[derive(Component)]
pub struct LoadingPrompt;

#[derive(Component)]
pub struct LoadingPercentage;

fn random_prompt(rng: &mut impl Rng) -> String {
    let prompt = PROMPTS.choose(rng).copied().unwrap_or(PROMPTS[0]);
    format!("{prompt}...")
}

/// Opacity `elapsed` seconds into a fade of `duration` seconds.
fn fade_alpha(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    1.0 - (elapsed / duration).clamp(0.0, 1.0)
}

fn spawn_loading_screen(mut commands: Commands) {
    debug!("spawning loading screen");
    let prompt = random_prompt(&mut rand::rng());

    commands
        .spawn((
            Name::new("LoadingOverlay"),
            LoadingOverlay,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(12.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            // keeps clicks from reaching the scene while the overlay is up
            Interaction::default(),
            GlobalZIndex(10),
        ))
        .with_children(|overlay| {
            overlay.spawn((
                LoadingPrompt,
                Text::new(prompt),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            overlay.spawn((
                LoadingPercentage,
                Text::new("0%"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
            ));
        });
}

fn rotate_prompts(
    time: Res<Time>,
    mut screen: ResMut<LoadingScreen>,
    mut prompt: Single<&mut Text, With<LoadingPrompt>>,
) {
    screen.prompt_timer.tick(time.delta());
    if screen.prompt_timer.just_finished() {
        prompt.0 = random_prompt(&mut rand::rng());
    }
}

fn update_percentage(
    progress: Res<LoadingProgress>,
    mut percentage: Single<&mut Text, With<LoadingPercentage>>,
) {
    if progress.is_changed() {
        percentage.0 = progress.label();
    }
}

fn show_continue_prompt(
    progress: Res<LoadingProgress>,
    mut prompt: Single<&mut Text, (With<LoadingPrompt>, Without<LoadingPercentage>)>,
    mut percentage: Single<&mut Text, (With<LoadingPercentage>, Without<LoadingPrompt>)>,
) {
    prompt.0 = CONTINUE_PROMPT.to_string();
    percentage.0 = progress.label();
}

fn leave_loading_screen(
    _select: On<Fire<Select>>,
    state: Res<State<AppState>>,
    assets: Res<State<AssetsState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut screen: ResMut<LoadingScreen>,
) {
    if *state.get() != AppState::Loading || *assets.get() != AssetsState::Loaded {
        return;
    }
    info!("entering scene");
    next_state.set(AppState::Running { paused: false });
    screen.fade = Some(Timer::from_seconds(FADE_SECS, TimerMode::Once));
}

fn fade_loading_screen(
    mut commands: Commands,
    time: Res<Time>,
    mut screen: ResMut<LoadingScreen>,
    overlay: Single<(Entity, &mut BackgroundColor), With<LoadingOverlay>>,
    mut texts: Query<&mut TextColor, Or<(With<LoadingPrompt>, With<LoadingPercentage>)>>,
) {
    let Some(fade) = screen.fade.as_mut() else {
        return;
    };
    fade.tick(time.delta());
    let alpha = fade_alpha(fade.elapsed_secs(), fade.duration().as_secs_f32());
    let finished = fade.is_finished();

    let (entity, mut background) = overlay.into_inner();
    background.0 = background.0.with_alpha(alpha);
    for mut color in &mut texts {
        color.0 = color.0.with_alpha(alpha);
    }

    if finished {
        debug!("loading screen faded out");
        commands.entity(entity).despawn();
        screen.fade = None;
    }
}
