use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::BodyConfig;
use super::BodyEntities;
use super::orbit::OrbitingBody;
use super::orbit_centre;
use crate::schedule::SimulationSet;

pub struct OrbitPathsPlugin;

impl Plugin for OrbitPathsPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<OrbitPathGizmo>().add_systems(
            Update,
            draw_orbit_paths
                .in_set(SimulationSet::Overlays)
                .run_if(|config: Res<BodyConfig>| config.show_paths),
        );
    }
}

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct OrbitPathGizmo;

fn draw_orbit_paths(
    mut gizmos: Gizmos<OrbitPathGizmo>,
    config: Res<BodyConfig>,
    entities: Res<BodyEntities>,
    bodies: Query<&OrbitingBody>,
    positions: Query<&Transform, With<OrbitingBody>>,
) {
    // circles are drawn in xy, orbits live in xz
    let flat = Quat::from_rotation_x(FRAC_PI_2);

    for body in &bodies {
        if body.distance <= 0.0 {
            continue;
        }
        let parent_position = body
            .parent
            .and_then(|parent| entities.get(parent))
            .and_then(|entity| positions.get(entity).ok())
            .map(|transform| transform.translation);
        let centre = orbit_centre(parent_position, &config);

        gizmos
            .circle(Isometry3d::new(centre, flat), body.distance, config.path_color)
            .resolution(config.path_resolution);
    }
}
