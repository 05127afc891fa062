//! The bodies of the system: catalog, kinematics, spawning and the overlays
//! drawn on top of them.

mod catalog;
mod labels;
mod orbit;
mod paths;
mod spawn;
mod units;

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

pub use catalog::BodyCatalog;
pub use catalog::BodyId;
pub use catalog::BodyKind;
pub(crate) use catalog::SOLAR_SYSTEM_RON;
use labels::LabelsPlugin;
pub use orbit::OrbitingBody;
use paths::OrbitPathsPlugin;
use spawn::SpawnBodiesPlugin;
pub use spawn::fall_back_to_color;

use crate::input::Inspector;
use crate::input::TogglePaths;
use crate::input::inspector_open;
use crate::schedule::SimulationSet;
use crate::simulation::SimulationClock;

pub struct BodyPlugin;

impl Plugin for BodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<BodyConfig>::default()
                .run_if(inspector_open(Inspector::Bodies)),
        )
        .init_resource::<BodyConfig>()
        .init_resource::<BodyEntities>()
        .insert_resource(load_catalog(SOLAR_SYSTEM_RON))
        .add_plugins(SpawnBodiesPlugin)
        .add_plugins(OrbitPathsPlugin)
        .add_plugins(LabelsPlugin)
        .add_systems(Update, advance_bodies.in_set(SimulationSet::Bodies))
        .add_observer(toggle_paths);
    }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone)]
#[reflect(Resource, InspectorOptions)]
pub struct BodyConfig {
    /// Moons circle their parent's current position. Off, every body circles
    /// the origin.
    pub parent_relative_orbits: bool,
    pub show_paths:             bool,
    pub show_labels:            bool,
    pub path_color:             Color,
    #[inspector(min = 16, max = 1024)]
    pub path_resolution:        u32,
    #[inspector(min = 6.0, max = 48.0)]
    pub label_font_size:        f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            parent_relative_orbits: true,
            show_paths:             true,
            show_labels:            true,
            path_color:             Color::srgba(1.0, 1.0, 1.0, 0.25),
            path_resolution:        256,
            label_font_size:        14.0,
        }
    }
}

/// Entity spawned for each catalog body.
#[derive(Resource, Default, Debug)]
pub struct BodyEntities(HashMap<BodyId, Entity>);

impl BodyEntities {
    pub fn get(&self, id: BodyId) -> Option<Entity> { self.0.get(&id).copied() }

    fn insert(&mut self, id: BodyId, entity: Entity) { self.0.insert(id, entity); }
}

/// A broken catalog leaves an empty scene rather than no app.
fn load_catalog(source: &str) -> BodyCatalog {
    match BodyCatalog::from_ron(source) {
        Ok(catalog) => {
            info!("loaded {} bodies", catalog.len());
            catalog
        },
        Err(error) => {
            error!("body catalog rejected, running with no bodies: {error}");
            BodyCatalog::default()
        },
    }
}

/// Where the body at index `i` of `bodies` sits in world space. `bodies` must
/// be in catalog order so every parent is placed before its children; a
/// parent that isn't present is treated as the origin.
fn place_bodies<'a>(
    bodies: impl IntoIterator<Item = &'a OrbitingBody>,
    elapsed: f64,
    parent_relative: bool,
) -> Vec<Vec3> {
    let mut placed: HashMap<BodyId, Vec3> = HashMap::new();
    let mut positions = Vec::new();

    for body in bodies {
        let centre = if parent_relative {
            body.parent
                .and_then(|parent| placed.get(&parent).copied())
                .unwrap_or(Vec3::ZERO)
        } else {
            Vec3::ZERO
        };
        let position = centre + body.orbit_offset(elapsed);
        placed.insert(body.id, position);
        positions.push(position);
    }
    positions
}

fn advance_bodies(
    clock: Res<SimulationClock>,
    config: Res<BodyConfig>,
    mut bodies: Query<(&OrbitingBody, &mut Transform)>,
) {
    let elapsed = clock.elapsed();
    let mut bodies: Vec<_> = bodies.iter_mut().collect();
    bodies.sort_by_key(|(body, _)| body.id);

    let positions = place_bodies(
        bodies.iter().map(|(body, _)| *body),
        elapsed,
        config.parent_relative_orbits,
    );

    for ((body, mut transform), position) in bodies.into_iter().zip(positions) {
        transform.translation = position;
        transform.rotation = body.orientation(elapsed);
    }
}

/// Orbit centre for a body given where its parent currently is.
pub fn orbit_centre(parent_position: Option<Vec3>, config: &BodyConfig) -> Vec3 {
    if config.parent_relative_orbits {
        parent_position.unwrap_or(Vec3::ZERO)
    } else {
        Vec3::ZERO
    }
}

fn toggle_paths(_toggle: On<Start<TogglePaths>>, mut config: ResMut<BodyConfig>) {
    config.show_paths = !config.show_paths;
    debug!("orbit paths {}", if config.show_paths { "shown" } else { "hidden" });
}
