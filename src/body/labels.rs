//! Screen-space text pinned to bodies: a name above every body, and the
//! points of interest of whichever body has focus.

use bevy::prelude::*;
use bevy::transform::TransformSystems;
use bevy_panorbit_camera::PanOrbitCamera;

use super::BodyConfig;
use super::BodyEntities;
use super::catalog::BodyCatalog;
use super::catalog::BodyId;
use super::catalog::BodyKind;
use super::orbit::OrbitingBody;
use super::units::normalise_radius;
use crate::camera::FocusTarget;
use crate::camera::FramingController;

const POI_COLOR: Color = Color::srgb(0.75, 0.85, 1.0);

pub struct LabelsPlugin;

impl Plugin for LabelsPlugin {
    fn build(&self, app: &mut App) {
        // bodies are spawned in Startup
        app.add_systems(PostStartup, spawn_labels).add_systems(
            PostUpdate,
            (position_name_labels, position_poi_labels).after(TransformSystems::Propagate),
        );
    }
}

#[derive(Component, Reflect, Debug)]
pub struct NameLabel {
    body: Entity,
    /// Scene units above the body's centre.
    lift: f32,
}

#[derive(Component, Reflect, Debug)]
pub struct PoiLabel {
    body:  Entity,
    id:    BodyId,
    /// Point on the body's surface in its local frame.
    local: Vec3,
}

/// Surface point for a latitude and longitude in degrees on a sphere in its
/// own frame: +Y is north, longitude 0 faces +Z.
pub fn surface_point(radius: f32, latitude: f32, longitude: f32) -> Vec3 {
    let (latitude, longitude) = (latitude.to_radians(), longitude.to_radians());
    Vec3::new(
        radius * latitude.cos() * longitude.sin(),
        radius * latitude.sin(),
        radius * latitude.cos() * longitude.cos(),
    )
}

/// Whether a surface point is on the hemisphere turned towards the camera.
pub fn faces_camera(centre: Vec3, point: Vec3, camera: Vec3) -> bool {
    (point - centre).dot(camera - point) > 0.0
}

fn label_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        ..default()
    }
}

fn spawn_labels(
    mut commands: Commands,
    catalog: Res<BodyCatalog>,
    config: Res<BodyConfig>,
    entities: Res<BodyEntities>,
) {
    for (id, descriptor) in catalog.iter() {
        // a ring shares its planet's label
        let Some(body) = entities.get(id).filter(|_| descriptor.kind != BodyKind::Ring) else {
            continue;
        };
        let radius = normalise_radius(descriptor.radius);

        commands.spawn((
            Name::new(format!("{} label", descriptor.name)),
            NameLabel { body, lift: radius },
            Text::new(descriptor.name.clone()),
            TextFont {
                font_size: config.label_font_size,
                ..default()
            },
            TextColor(Color::WHITE),
            label_node(),
            Visibility::Hidden,
        ));

        for poi in &descriptor.labels {
            commands.spawn((
                Name::new(format!("{} / {}", descriptor.name, poi.name)),
                PoiLabel {
                    body,
                    id,
                    local: surface_point(radius, poi.latitude, poi.longitude),
                },
                Text::new(poi.name.clone()),
                TextFont {
                    font_size: config.label_font_size * 0.85,
                    ..default()
                },
                TextColor(POI_COLOR),
                label_node(),
                Visibility::Hidden,
            ));
        }
    }
}

fn place(node: &mut Node, visibility: &mut Visibility, viewport: Option<Vec2>) {
    match viewport {
        Some(viewport) => {
            node.left = Val::Px(viewport.x);
            node.top = Val::Px(viewport.y);
            *visibility = Visibility::Inherited;
        },
        None => *visibility = Visibility::Hidden,
    }
}

fn position_name_labels(
    config: Res<BodyConfig>,
    camera: Single<(&Camera, &GlobalTransform), With<PanOrbitCamera>>,
    bodies: Query<&GlobalTransform, With<OrbitingBody>>,
    mut labels: Query<(&NameLabel, &mut Node, &mut Visibility)>,
) {
    let (camera, camera_transform) = *camera;

    for (label, mut node, mut visibility) in &mut labels {
        let viewport = bodies
            .get(label.body)
            .ok()
            .filter(|_| config.show_labels)
            .and_then(|body| {
                let anchor = body.translation() + Vec3::Y * label.lift;
                camera.world_to_viewport(camera_transform, anchor).ok()
            });
        place(&mut node, &mut visibility, viewport);
    }
}

fn position_poi_labels(
    controller: Res<FramingController>,
    camera: Single<(&Camera, &GlobalTransform), With<PanOrbitCamera>>,
    bodies: Query<&GlobalTransform, With<OrbitingBody>>,
    mut labels: Query<(&PoiLabel, &mut Node, &mut Visibility)>,
) {
    let (camera, camera_transform) = *camera;
    let focus = controller.focus();

    for (label, mut node, mut visibility) in &mut labels {
        let viewport = bodies
            .get(label.body)
            .ok()
            .filter(|_| focus == FocusTarget::Body(label.id))
            .and_then(|body| {
                let point = body.transform_point(label.local);
                faces_camera(body.translation(), point, camera_transform.translation())
                    .then_some(point)
            })
            .and_then(|point| camera.world_to_viewport(camera_transform, point).ok());
        place(&mut node, &mut visibility, viewport);
    }
}
