use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;
use rand::Rng;

use crate::input::Inspector;
use crate::input::inspector_open;

pub struct StarsPlugin;

impl Plugin for StarsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<StarConfig>::default()
                .run_if(inspector_open(Inspector::Stars)),
        )
        .init_resource::<StarConfig>()
        .add_systems(Startup, spawn_stars)
        .add_systems(Update, (respawn_stars, rotate_stars));
    }
}

/// Background star shell. Far enough out that the outermost orbit sits well
/// inside it, near enough to stay inside the camera's far plane.
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone)]
#[reflect(Resource, InspectorOptions)]
pub struct StarConfig {
    #[inspector(min = 0, max = 5000, display = NumberDisplay::Slider)]
    pub star_count:                   usize,
    #[inspector(min = 50.0, max = 800.0, display = NumberDisplay::Slider)]
    pub inner_radius:                 f32,
    #[inspector(min = 1.0, max = 300.0, display = NumberDisplay::Slider)]
    pub shell_depth:                  f32,
    #[inspector(min = 0.05, max = 5.0, display = NumberDisplay::Slider)]
    pub star_radius_min:              f32,
    #[inspector(min = 0.05, max = 5.0, display = NumberDisplay::Slider)]
    pub star_radius_max:              f32,
    #[inspector(min = 0.0, max = 50.0, display = NumberDisplay::Slider)]
    pub star_color_min:               f32,
    #[inspector(min = 0.0, max = 50.0, display = NumberDisplay::Slider)]
    pub star_color_max:               f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub star_color_white_probability: f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub star_color_white_start_ratio: f32,
    /// Minutes for one full turn of the shell; zero holds it still.
    #[inspector(min = 0.0, max = 60.0, display = NumberDisplay::Slider)]
    pub rotation_cycle_minutes:       f32,
    pub rotation_axis:                Vec3,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            star_count:                   1500,
            inner_radius:                 350.0,
            shell_depth:                  150.0,
            star_radius_min:              0.3,
            star_radius_max:              1.1,
            star_color_min:               1.0,
            star_color_max:               12.0,
            star_color_white_probability: 0.8,
            star_color_white_start_ratio: 0.7,
            rotation_cycle_minutes:       30.0,
            rotation_axis:                Vec3::Y,
        }
    }
}

#[derive(Component, Reflect, Default)]
pub struct StarField;

#[derive(Component, Reflect, Default)]
pub struct Star;

fn spawn_stars(
    mut commands: Commands,
    config: Res<StarConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    debug!("spawning {} stars", config.star_count);
    let mesh = meshes.add(Sphere::new(1.));
    let mut rng = rand::rng();

    let outer_radius = config.inner_radius + config.shell_depth;

    commands
        .spawn((Name::new("StarField"), StarField, Transform::default(), Visibility::default()))
        .with_children(|field| {
            for _ in 0..config.star_count {
                let position = star_position(config.inner_radius, outer_radius, &mut rng);
                let radius =
                    star_radius(config.star_radius_min, config.star_radius_max, &mut rng);
                let emissive = star_color(&config, &mut rng);

                let material = materials.add(StandardMaterial {
                    base_color: Color::BLACK,
                    emissive,
                    ..default()
                });

                field.spawn((
                    Star,
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(position).with_scale(Vec3::splat(radius)),
                ));
            }
        });
}

fn respawn_stars(
    mut commands: Commands,
    config: Res<StarConfig>,
    fields: Query<Entity, With<StarField>>,
    meshes: ResMut<Assets<Mesh>>,
    materials: ResMut<Assets<StandardMaterial>>,
) {
    if !config.is_changed() || config.is_added() {
        return;
    }
    for field in &fields {
        commands.entity(field).despawn();
    }
    spawn_stars(commands, config, meshes, materials);
}

fn rotate_stars(
    time: Res<Time>,
    config: Res<StarConfig>,
    mut field: Single<&mut Transform, With<StarField>>,
) {
    if config.rotation_cycle_minutes <= 0.0 {
        return;
    }
    let Ok(axis) = Dir3::new(config.rotation_axis) else {
        return;
    };
    let speed = TAU / (config.rotation_cycle_minutes * 60.0);
    field.rotate_axis(axis, -speed * time.delta_secs());
}

/// Uniform direction, radius uniform within the shell.
fn star_position(inner_radius: f32, outer_radius: f32, rng: &mut impl Rng) -> Vec3 {
    let theta = rng.random_range(0.0..TAU);
    let phi = 2.0f32.mul_add(rng.random_range(0.0..1.0), -1.0).acos();
    let radius = if outer_radius > inner_radius {
        rng.random_range(inner_radius..outer_radius)
    } else {
        inner_radius
    };

    Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    )
}

/// Uniform between the two sliders; a collapsed or inverted range gives `min`.
fn star_radius(min: f32, max: f32, rng: &mut impl Rng) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Mostly near-white, occasionally tinted, never dimmer than a fifth of the
/// way up the range.
fn star_color(config: &StarConfig, rng: &mut impl Rng) -> LinearRgba {
    let end = config.star_color_max;
    let start = if rng.random::<f32>() < config.star_color_white_probability {
        end * config.star_color_white_start_ratio
    } else {
        config.star_color_min
    };
    if start >= end {
        return LinearRgba::rgb(end, end, end);
    }

    let mut r = rng.random_range(start..end);
    let mut g = rng.random_range(start..end);
    let mut b = rng.random_range(start..end);

    let min_brightness = (end - start).mul_add(0.2, start);
    let brightness = r.max(g).max(b);
    if brightness > 0.0 && brightness < min_brightness {
        let scale = min_brightness / brightness;
        r *= scale;
        g *= scale;
        b *= scale;
    }

    LinearRgba::rgb(r, g, b)
}
