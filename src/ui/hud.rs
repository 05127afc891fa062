use bevy::prelude::*;

use super::CAPTION_SIZE;
use super::PANEL_BACKGROUND;
use super::TEXT_SIZE;
use super::text_font;
use crate::body::BodyCatalog;
use crate::body::BodyKind;
use crate::camera::FocusTarget;
use crate::camera::FramingController;
use crate::schedule::SimulationSet;
use crate::state::InScene;

/// Caption shown when the whole system has focus.
pub const WHOLE_SYSTEM_NAME: &str = "Solar System";

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(InScene), spawn_hud).add_systems(
            Update,
            update_hud
                .in_set(SimulationSet::Overlays)
                .run_if(in_state(InScene)),
        );
    }
}

#[derive(Component)]
struct Caption;

#[derive(Component)]
struct InfoPanel;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("Caption"),
        Caption,
        Text::new(WHOLE_SYSTEM_NAME),
        text_font(CAPTION_SIZE),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            justify_self: JustifySelf::Center,
            ..default()
        },
    ));

    commands.spawn((
        Name::new("InfoPanel"),
        InfoPanel,
        Text::new(String::new()),
        text_font(TEXT_SIZE),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        BackgroundColor(PANEL_BACKGROUND),
        // the panel counts as UI for picking
        Interaction::default(),
    ));
}

fn update_hud(
    controller: Res<FramingController>,
    catalog: Res<BodyCatalog>,
    mut shown: Local<Option<FocusTarget>>,
    mut caption: Single<&mut Text, (With<Caption>, Without<InfoPanel>)>,
    mut info: Single<&mut Text, (With<InfoPanel>, Without<Caption>)>,
) {
    let focus = controller.focus();
    if *shown == Some(focus) {
        return;
    }
    *shown = Some(focus);

    caption.0 = caption_text(focus, &catalog);
    info.0 = info_lines(focus, &catalog).join("\n");
}

fn caption_text(focus: FocusTarget, catalog: &BodyCatalog) -> String {
    match focus {
        FocusTarget::WholeSystem => WHOLE_SYSTEM_NAME.to_string(),
        FocusTarget::Body(id) => catalog.name(id).unwrap_or(WHOLE_SYSTEM_NAME).to_string(),
    }
}

/// Raw catalog values for the focused body, before any scene scaling.
fn info_lines(focus: FocusTarget, catalog: &BodyCatalog) -> Vec<String> {
    let FocusTarget::Body(id) = focus else {
        return vec![
            WHOLE_SYSTEM_NAME.to_string(),
            format!("Bodies: {}", catalog.len()),
            format!("Destinations: {}", catalog.traversable().count()),
        ];
    };
    let Some(body) = catalog.get(id) else {
        return Vec::new();
    };

    let mut lines = vec![
        body.name.clone(),
        format!("Kind: {}", kind_name(body.kind)),
        format!("Radius: {} km", body.radius),
    ];
    if let Some(parent) = catalog.parent(id).and_then(|parent| catalog.name(parent)) {
        lines.push(format!("Orbits: {parent}"));
    }
    if body.distance > 0.0 {
        lines.push(format!("Distance: {} million km", body.distance));
    }
    if body.period > 0.0 {
        lines.push(format!("Orbital period: {} days", body.period));
    }
    if body.daylength > 0.0 {
        lines.push(format!("Day length: {} h", body.daylength));
    }
    lines.push(format!("Axial tilt: {}°", body.tilt));
    lines
}

const fn kind_name(kind: BodyKind) -> &'static str {
    match kind {
        BodyKind::Star => "Star",
        BodyKind::Planet => "Planet",
        BodyKind::Ring => "Ring",
        BodyKind::Comet => "Comet",
        BodyKind::Asteroid => "Asteroid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> BodyCatalog {
        BodyCatalog::from_ron(crate::body::SOLAR_SYSTEM_RON).unwrap_or_default()
    }

    #[test]
    fn whole_system_caption() {
        assert_eq!(caption_text(FocusTarget::WholeSystem, &catalog()), "Solar System");
    }

    #[test]
    fn body_caption_is_its_name() {
        let catalog = catalog();
        let earth = catalog.find("Earth").map(FocusTarget::Body);
        assert_eq!(earth.map(|focus| caption_text(focus, &catalog)), Some("Earth".to_string()));
    }

    #[test]
    fn moon_info_names_its_parent() {
        let catalog = catalog();
        let lines = catalog
            .find("Moon")
            .map(|id| info_lines(FocusTarget::Body(id), &catalog))
            .unwrap_or_default();

        assert_eq!(lines.first().map(String::as_str), Some("Moon"));
        assert!(lines.iter().any(|line| line == "Orbits: Earth"));
        assert!(lines.iter().any(|line| line == "Radius: 1737.4 km"));
    }

    #[test]
    fn sun_info_skips_orbit_lines() {
        let catalog = catalog();
        let lines = catalog
            .find("Sun")
            .map(|id| info_lines(FocusTarget::Body(id), &catalog))
            .unwrap_or_default();

        assert!(!lines.is_empty());
        assert!(!lines.iter().any(|line| line.starts_with("Distance")));
        assert!(!lines.iter().any(|line| line.starts_with("Orbits")));
    }
}
