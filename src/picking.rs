//! Clicking on a body: cursor to normalised device coordinates, a ray out of
//! the camera, and the nearest enlarged hitbox along it.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_enhanced_input::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::body::BodyId;
use crate::body::OrbitingBody;
use crate::camera::FocusRequest;
use crate::camera::FocusTarget;
use crate::camera::FramingController;
use crate::input::Select;
use crate::state::AppState;

pub struct BodyPickingPlugin;

impl Plugin for BodyPickingPlugin {
    fn build(&self, app: &mut App) { app.add_observer(pick_body); }
}

/// Invisible pick sphere, larger than the body so small moons can be hit.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct Hitbox {
    pub radius: f32,
}

/// Window pixels (origin top left, y down) to NDC (origin centre, y up).
/// `None` for a degenerate viewport.
pub fn cursor_to_ndc(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        1.0 - cursor.y / viewport.y * 2.0,
    ))
}

/// Ray from the camera through a point in NDC.
pub fn ray_from_ndc(
    camera: &GlobalTransform,
    projection: &PerspectiveProjection,
    ndc: Vec2,
) -> Option<Ray3d> {
    let half_height = (projection.fov * 0.5).tan();
    let half_width = half_height * projection.aspect_ratio;
    let view_direction = Vec3::new(ndc.x * half_width, ndc.y * half_height, -1.0);

    let direction = Dir3::new(camera.rotation() * view_direction).ok()?;
    Some(Ray3d::new(camera.translation(), direction))
}

/// Distance along the ray to the first surface crossing at or after the ray's
/// origin.
fn ray_sphere(ray: Ray3d, centre: Vec3, radius: f32) -> Option<f32> {
    let to_origin = ray.origin - centre;
    let b = to_origin.dot(*ray.direction);
    let c = radius.mul_add(-radius, to_origin.length_squared());
    let discriminant = b.mul_add(b, -c);
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Closest hitbox the ray passes through, given `(body, centre, radius)`.
pub fn nearest_hit(
    ray: Ray3d,
    hitboxes: impl IntoIterator<Item = (BodyId, Vec3, f32)>,
) -> Option<(BodyId, f32)> {
    hitboxes
        .into_iter()
        .filter_map(|(body, centre, radius)| {
            ray_sphere(ray, centre, radius).map(|distance| (body, distance))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}

fn pick_body(
    _select: On<Fire<Select>>,
    mut commands: Commands,
    state: Res<State<AppState>>,
    controller: Res<FramingController>,
    window: Single<&Window, With<PrimaryWindow>>,
    camera: Single<(&GlobalTransform, &Projection), With<PanOrbitCamera>>,
    hitboxes: Query<(&OrbitingBody, &Hitbox, &GlobalTransform)>,
    interactions: Query<&Interaction>,
) {
    if !state.get().is_in_scene() {
        return;
    }
    if interactions.iter().any(|interaction| *interaction != Interaction::None) {
        return;
    }

    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let (camera_transform, projection) = *camera;
    let Projection::Perspective(perspective) = projection else {
        return;
    };
    let Some(ray) = cursor_to_ndc(cursor, window.size())
        .and_then(|ndc| ray_from_ndc(camera_transform, perspective, ndc))
    else {
        return;
    };

    let hit = nearest_hit(
        ray,
        hitboxes
            .iter()
            .map(|(body, hitbox, transform)| (body.id, transform.translation(), hitbox.radius)),
    );

    if let Some((body, distance)) = hit {
        let target = FocusTarget::Body(body);
        if target != controller.focus() {
            debug!("picked {body:?} at {distance:.3}");
            commands.trigger(FocusRequest(target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn forward_ray() -> Ray3d { Ray3d::new(Vec3::new(0.0, 0.0, 10.0), Dir3::NEG_Z) }

    #[test]
    fn cursor_corners_map_to_ndc_corners() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(cursor_to_ndc(Vec2::ZERO, viewport), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(cursor_to_ndc(viewport, viewport), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(cursor_to_ndc(viewport * 0.5, viewport), Some(Vec2::ZERO));
    }

    #[test]
    fn empty_viewport_has_no_ndc() {
        assert_eq!(cursor_to_ndc(Vec2::ZERO, Vec2::ZERO), None);
    }

    #[test]
    fn centre_ray_follows_the_camera_forward() {
        let camera = GlobalTransform::from(
            Transform::from_xyz(0.0, 20.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
        );
        let projection = PerspectiveProjection::default();

        let ray = ray_from_ndc(&camera, &projection, Vec2::ZERO);
        let expected = (Vec3::ZERO - Vec3::new(0.0, 20.0, 20.0)).normalize();
        assert!(ray.is_some_and(|ray| (*ray.direction - expected).length() < EPSILON));
    }

    #[test]
    fn nearest_of_two_hitboxes_wins() {
        let near = BodyId::new(1);
        let far = BodyId::new(2);
        let hit = nearest_hit(forward_ray(), [
            (far, Vec3::new(0.0, 0.0, -5.0), 1.0),
            (near, Vec3::new(0.0, 0.0, 2.0), 1.0),
        ]);

        assert_eq!(hit.map(|(body, _)| body), Some(near));
        assert!(hit.is_some_and(|(_, distance)| (distance - 7.0).abs() < EPSILON));
    }

    #[test]
    fn empty_space_is_no_hit() {
        let miss = nearest_hit(forward_ray(), [(BodyId::new(1), Vec3::new(5.0, 0.0, 0.0), 1.0)]);
        assert_eq!(miss, None);
        assert_eq!(nearest_hit(forward_ray(), []), None);
    }

    #[test]
    fn bodies_behind_the_camera_are_not_hit() {
        let behind = nearest_hit(forward_ray(), [(BodyId::new(1), Vec3::new(0.0, 0.0, 20.0), 1.0)]);
        assert_eq!(behind, None);
    }

    #[test]
    fn ray_starting_inside_a_hitbox_hits_its_far_side() {
        let inside = nearest_hit(forward_ray(), [(BodyId::new(1), Vec3::new(0.0, 0.0, 10.0), 2.0)]);
        assert!(inside.is_some_and(|(_, distance)| (distance - 2.0).abs() < EPSILON));
    }
}
