use bevy::prelude::*;

use super::BodyEntities;
use super::catalog::BodyCatalog;
use super::catalog::BodyDescriptor;
use super::catalog::BodyKind;
use super::orbit::OrbitingBody;
use crate::asset_loader::BodyTextures;
use crate::picking::Hitbox;

/// Inner edge of a ring as a fraction of its outer radius.
const RING_INNER_RATIO: f32 = 0.7;

/// Emissive multiplier on a star's colour; above 1 so bloom picks it up.
const STAR_GLOW: f32 = 4.0;

pub struct SpawnBodiesPlugin;

impl Plugin for SpawnBodiesPlugin {
    fn build(&self, app: &mut App) { app.add_systems(Startup, spawn_bodies); }
}

fn spawn_bodies(
    mut commands: Commands,
    catalog: Res<BodyCatalog>,
    mut textures: ResMut<BodyTextures>,
    mut entities: ResMut<BodyEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::rng();

    for (id, descriptor) in catalog.iter() {
        let body = OrbitingBody::new(id, catalog.parent(id), descriptor, &mut rng);
        let texture = textures.image(id);
        let fallback = fallback_color(descriptor);

        let mesh = match body.kind {
            BodyKind::Ring => {
                meshes.add(Annulus::new(body.radius * RING_INNER_RATIO, body.radius))
            },
            _ => meshes.add(Sphere::new(body.radius).mesh().uv(64, 32)),
        };
        let material = materials.add(body_material(body.kind, fallback, texture.clone()));
        if texture.is_some() {
            textures.attach_material(id, material.clone(), fallback);
        }

        let transform = Transform::from_translation(body.orbit_offset(0.0))
            .with_rotation(body.orientation(0.0));

        let mut entity = commands.spawn((
            Name::new(descriptor.name.clone()),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            transform,
        ));
        if descriptor.traversable {
            entity.insert(Hitbox {
                radius: body.hitbox_radius(),
            });
        }
        entity.insert(body);

        entities.insert(id, entity.id());
        debug!("spawned {}", descriptor.name);
    }
}

fn fallback_color(descriptor: &BodyDescriptor) -> Color {
    let (red, green, blue) = descriptor.color;
    Color::srgb(red, green, blue)
}

/// A texture, when there is one, replaces the flat colour rather than tinting it.
fn body_material(
    kind: BodyKind,
    color: Color,
    texture: Option<Handle<Image>>,
) -> StandardMaterial {
    let base_color = if texture.is_some() { Color::WHITE } else { color };

    match kind {
        BodyKind::Star => StandardMaterial {
            base_color: Color::BLACK,
            emissive: LinearRgba::from(base_color) * STAR_GLOW,
            emissive_texture: texture,
            ..default()
        },
        BodyKind::Ring => StandardMaterial {
            base_color: base_color.with_alpha(0.8),
            base_color_texture: texture,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            perceptual_roughness: 1.0,
            ..default()
        },
        BodyKind::Planet | BodyKind::Comet | BodyKind::Asteroid => StandardMaterial {
            base_color,
            base_color_texture: texture,
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        },
    }
}

/// Drops a failed texture from a body's material, leaving the flat colour.
pub fn fall_back_to_color(material: &mut StandardMaterial, color: Color) {
    if material.emissive_texture.is_some() {
        material.emissive_texture = None;
        material.emissive = LinearRgba::from(color) * STAR_GLOW;
    } else {
        material.base_color_texture = None;
        material.base_color = color.with_alpha(material.base_color.alpha());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untextured_bodies_use_their_flat_color() {
        let color = Color::srgb(0.2, 0.4, 0.8);
        let material = body_material(BodyKind::Planet, color, None);
        assert_eq!(material.base_color, color);
    }

    #[test]
    fn textured_bodies_are_not_tinted() {
        let material = body_material(
            BodyKind::Planet,
            Color::srgb(0.2, 0.4, 0.8),
            Some(Handle::default()),
        );
        assert_eq!(material.base_color, Color::WHITE);
    }

    #[test]
    fn rings_are_translucent_from_both_sides() {
        let material = body_material(BodyKind::Ring, Color::WHITE, None);
        assert!(material.double_sided);
        assert!(material.cull_mode.is_none());
        assert!(matches!(material.alpha_mode, AlphaMode::Blend));
    }

    #[test]
    fn failed_texture_restores_flat_color() {
        let color = Color::srgb(0.9, 0.5, 0.1);
        let mut planet = body_material(BodyKind::Planet, color, Some(Handle::default()));
        fall_back_to_color(&mut planet, color);
        assert!(planet.base_color_texture.is_none());
        assert_eq!(planet.base_color, color);

        let mut star = body_material(BodyKind::Star, color, Some(Handle::default()));
        fall_back_to_color(&mut star, color);
        assert!(star.emissive_texture.is_none());
        assert_eq!(star.emissive, LinearRgba::from(color) * STAR_GLOW);
    }
}
