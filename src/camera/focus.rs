use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::body::BodyCatalog;
use crate::body::BodyEntities;
use crate::body::BodyId;
use crate::body::OrbitingBody;
use crate::camera::config::CameraConfig;
use crate::camera::framing::BodyFrame;
use crate::camera::framing::CameraPose;
use crate::camera::framing::FocusTarget;
use crate::camera::framing::FramingController;
use crate::camera::pan_orbit_ext::PanOrbitCameraExt;
use crate::input::NextBody;
use crate::input::PreviousBody;
use crate::input::ReturnToSystem;
use crate::schedule::SimulationSet;
use crate::state::AppState;

pub struct FocusPlugin;

impl Plugin for FocusPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FramingController>()
            .add_observer(apply_focus_request)
            .add_observer(return_to_system)
            .add_observer(next_body)
            .add_observer(previous_body)
            .add_systems(Update, frame_focus.in_set(SimulationSet::Camera));
    }
}

/// The one way to change what the camera frames. Picking, the travel menu and
/// the keyboard all trigger this.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest(pub FocusTarget);

fn apply_focus_request(
    request: On<FocusRequest>,
    config: Res<CameraConfig>,
    catalog: Res<BodyCatalog>,
    entities: Res<BodyEntities>,
    mut controller: ResMut<FramingController>,
    bodies: Query<(&OrbitingBody, &Transform)>,
    camera: Single<(&Transform, &PanOrbitCamera)>,
) {
    let target = request.0;
    if controller.focus() == target {
        return;
    }

    let (camera_transform, pan_orbit) = *camera;
    let current = CameraPose {
        position: camera_transform.translation,
        target:   pan_orbit.target_focus,
    };

    match target {
        FocusTarget::WholeSystem => {
            info!("focusing whole system");
            controller.focus_whole_system(current, &config);
        },
        FocusTarget::Body(id) => {
            let Some(frame) = body_frame(id, &entities, &bodies) else {
                warn!("focus requested for {id:?}, which isn't in the scene");
                return;
            };
            info!("focusing {}", catalog.name(id).unwrap_or("unknown body"));
            controller.focus_body(id, frame, current, &config);
        },
    }
}

fn body_frame(
    id: BodyId,
    entities: &BodyEntities,
    bodies: &Query<(&OrbitingBody, &Transform)>,
) -> Option<BodyFrame> {
    let (body, transform) = bodies.get(entities.get(id)?).ok()?;
    Some(BodyFrame {
        position:     transform.translation,
        min_distance: body.min_distance(),
    })
}

/// Runs after the bodies have moved so a tracked body is framed where it is
/// this frame. Driven by real time so transitions ignore pause and speed.
fn frame_focus(
    time: Res<Time<Real>>,
    config: Res<CameraConfig>,
    entities: Res<BodyEntities>,
    mut controller: ResMut<FramingController>,
    bodies: Query<(&OrbitingBody, &Transform)>,
    mut pan_orbit: Single<&mut PanOrbitCamera>,
) {
    let focused = match controller.focus() {
        FocusTarget::Body(id) => body_frame(id, &entities, &bodies),
        FocusTarget::WholeSystem => None,
    };

    let was_transitioning = controller.is_transitioning();
    match controller.update(time.delta_secs(), focused, &config) {
        Some(pose) => {
            pan_orbit.disable_interpolation();
            pan_orbit.apply_pose(pose);
        },
        None => pan_orbit.enable_interpolation(&config),
    }

    // bounds are lifted for the whole glide so the clamp can't yank the camera
    if controller.is_transitioning() {
        pan_orbit.set_orbit_bounds(None);
    } else {
        pan_orbit.set_orbit_bounds(Some(controller.bounds()));
    }

    if was_transitioning && !controller.is_transitioning() {
        debug!("camera transition finished");
    }
}

fn return_to_system(
    _return: On<Start<ReturnToSystem>>,
    mut commands: Commands,
    state: Res<State<AppState>>,
) {
    if state.get().is_in_scene() {
        commands.trigger(FocusRequest(FocusTarget::WholeSystem));
    }
}

fn next_body(
    _next: On<Start<NextBody>>,
    mut commands: Commands,
    state: Res<State<AppState>>,
    catalog: Res<BodyCatalog>,
    controller: Res<FramingController>,
) {
    if state.get().is_in_scene() {
        let stops: Vec<BodyId> = catalog.traversable().map(|(id, _)| id).collect();
        commands.trigger(FocusRequest(step_focus(controller.focus(), &stops, true)));
    }
}

fn previous_body(
    _previous: On<Start<PreviousBody>>,
    mut commands: Commands,
    state: Res<State<AppState>>,
    catalog: Res<BodyCatalog>,
    controller: Res<FramingController>,
) {
    if state.get().is_in_scene() {
        let stops: Vec<BodyId> = catalog.traversable().map(|(id, _)| id).collect();
        commands.trigger(FocusRequest(step_focus(controller.focus(), &stops, false)));
    }
}

/// Walks the travel list with the whole system as the first stop, wrapping at
/// either end. A focus that isn't on the list restarts from the whole system.
fn step_focus(current: FocusTarget, stops: &[BodyId], forward: bool) -> FocusTarget {
    let count = stops.len() + 1;
    let position = match current {
        FocusTarget::WholeSystem => 0,
        FocusTarget::Body(id) => stops
            .iter()
            .position(|stop| *stop == id)
            .map_or(0, |index| index + 1),
    };
    let next = if forward {
        (position + 1) % count
    } else {
        (position + count - 1) % count
    };

    match next {
        0 => FocusTarget::WholeSystem,
        index => FocusTarget::Body(stops[index - 1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> Vec<BodyId> { vec![BodyId::new(1), BodyId::new(3), BodyId::new(4)] }

    #[test]
    fn stepping_forward_wraps_through_the_whole_system() {
        let stops = stops();
        let mut focus = FocusTarget::WholeSystem;
        let mut seen = Vec::new();
        for _ in 0..4 {
            focus = step_focus(focus, &stops, true);
            seen.push(focus);
        }

        assert_eq!(seen, vec![
            FocusTarget::Body(BodyId::new(1)),
            FocusTarget::Body(BodyId::new(3)),
            FocusTarget::Body(BodyId::new(4)),
            FocusTarget::WholeSystem,
        ]);
    }

    #[test]
    fn stepping_back_from_the_whole_system_lands_on_the_last_stop() {
        assert_eq!(
            step_focus(FocusTarget::WholeSystem, &stops(), false),
            FocusTarget::Body(BodyId::new(4))
        );
    }

    #[test]
    fn empty_travel_list_stays_on_the_whole_system() {
        assert_eq!(step_focus(FocusTarget::WholeSystem, &[], true), FocusTarget::WholeSystem);
    }
}
