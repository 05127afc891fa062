use bevy::prelude::*;

use super::BUTTON_BACKGROUND;
use super::BUTTON_HOVERED;
use super::BUTTON_SELECTED;
use super::PANEL_BACKGROUND;
use super::TEXT_SIZE;
use super::hud::WHOLE_SYSTEM_NAME;
use super::text_font;
use crate::body::BodyCatalog;
use crate::camera::FocusRequest;
use crate::camera::FocusTarget;
use crate::camera::FramingController;
use crate::schedule::SimulationSet;
use crate::simulation::SimulationClock;
use crate::state::InScene;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(InScene), (spawn_speed_controls, spawn_travel_menu))
            .add_systems(
                Update,
                (press_buttons, update_speed_label, highlight_buttons)
                    .chain()
                    .in_set(SimulationSet::Overlays)
                    .run_if(in_state(InScene)),
            );
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum ControlButton {
    CycleSpeed,
    ReturnToSystem,
    Travel(FocusTarget),
}

#[derive(Component)]
struct SpeedLabel;

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
        justify_content: JustifyContent::Center,
        ..default()
    }
}

fn spawn_button(parent: &mut ChildSpawnerCommands, action: ControlButton, label: String) {
    parent
        .spawn((
            Button,
            action,
            button_node(),
            BackgroundColor(BUTTON_BACKGROUND),
        ))
        .with_child((Text::new(label), text_font(TEXT_SIZE), TextColor(Color::WHITE)));
}

fn spawn_speed_controls(mut commands: Commands, clock: Res<SimulationClock>) {
    commands
        .spawn((
            Name::new("SpeedControls"),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(12.0),
                right: Val::Px(12.0),
                column_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|controls| {
            controls
                .spawn((
                    Button,
                    ControlButton::CycleSpeed,
                    button_node(),
                    BackgroundColor(BUTTON_BACKGROUND),
                ))
                .with_child((
                    SpeedLabel,
                    Text::new(clock.label()),
                    text_font(TEXT_SIZE),
                    TextColor(Color::WHITE),
                ));
            spawn_button(controls, ControlButton::ReturnToSystem, "Return".to_string());
        });
}

fn spawn_travel_menu(mut commands: Commands, catalog: Res<BodyCatalog>) {
    commands
        .spawn((
            Name::new("TravelMenu"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            Interaction::default(),
        ))
        .with_children(|menu| {
            spawn_button(
                menu,
                ControlButton::Travel(FocusTarget::WholeSystem),
                WHOLE_SYSTEM_NAME.to_string(),
            );
            for (id, descriptor) in catalog.traversable() {
                spawn_button(
                    menu,
                    ControlButton::Travel(FocusTarget::Body(id)),
                    descriptor.name.clone(),
                );
            }
        });
}

fn press_buttons(
    mut commands: Commands,
    mut clock: ResMut<SimulationClock>,
    buttons: Query<(&Interaction, &ControlButton), Changed<Interaction>>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match *button {
            ControlButton::CycleSpeed => {
                let multiplier = clock.cycle_multiplier();
                info!("simulation speed x{multiplier}");
            },
            ControlButton::ReturnToSystem => {
                commands.trigger(FocusRequest(FocusTarget::WholeSystem));
            },
            ControlButton::Travel(target) => commands.trigger(FocusRequest(target)),
        }
    }
}

/// New button text, or `None` when the shown text is already current. The
/// clock changes every frame; the label only when the multiplier does.
fn refreshed_label(shown: &str, clock: &SimulationClock) -> Option<String> {
    let text = clock.label();
    (text != shown).then_some(text)
}

fn update_speed_label(
    clock: Res<SimulationClock>,
    mut label: Single<&mut Text, With<SpeedLabel>>,
) {
    if let Some(text) = refreshed_label(&label.0, &clock) {
        label.0 = text;
    }
}

fn highlight_buttons(
    controller: Res<FramingController>,
    mut buttons: Query<(&Interaction, &ControlButton, &mut BackgroundColor)>,
) {
    let focus = controller.focus();
    for (interaction, button, mut background) in &mut buttons {
        let color = match (button, interaction) {
            (ControlButton::Travel(target), _) if *target == focus => BUTTON_SELECTED,
            (_, Interaction::Hovered | Interaction::Pressed) => BUTTON_HOVERED,
            _ => BUTTON_BACKGROUND,
        };
        if background.0 != color {
            background.0 = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_left_alone_while_only_time_moves() {
        let mut clock = SimulationClock::default();
        let shown = clock.label();

        clock.advance(1.0);
        clock.advance(0.5);
        assert_eq!(refreshed_label(&shown, &clock), None);
    }

    #[test]
    fn label_follows_a_speed_change() {
        let mut clock = SimulationClock::default();
        let shown = clock.label();

        clock.cycle_multiplier();
        assert_eq!(refreshed_label(&shown, &clock), Some(" - x2 - ".to_string()));
    }
}
