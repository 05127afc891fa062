use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::body::BodyCatalog;
use crate::body::BodyId;
use crate::body::fall_back_to_color;

pub struct AssetLoaderPlugin;

impl Plugin for AssetLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AssetsState>() // necessary to tell if they've finished loading
            .init_resource::<BodyTextures>()
            .init_resource::<LoadingProgress>()
            // bodies spawn in Startup and look their textures up here
            .add_systems(PreStartup, load_body_textures)
            .add_systems(
                Update,
                check_texture_loading.run_if(in_state(AssetsState::Loading)),
            );
    }
}

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AssetsState {
    #[default]
    Loading,
    Loaded,
}

#[derive(Debug, Clone)]
struct BodyTexture {
    body:     BodyId,
    image:    Handle<Image>,
    material: Option<Handle<StandardMaterial>>,
    fallback: Color,
    settled:  bool,
}

/// Texture handles for every body whose descriptor names one.
#[derive(Resource, Debug, Default)]
pub struct BodyTextures {
    textures: Vec<BodyTexture>,
}

impl BodyTextures {
    pub fn image(&self, body: BodyId) -> Option<Handle<Image>> {
        self.find(body).map(|texture| texture.image.clone())
    }

    /// Remembers which material shows a body's texture so a failed load can be
    /// swapped for the body's flat colour.
    pub fn attach_material(
        &mut self,
        body: BodyId,
        material: Handle<StandardMaterial>,
        fallback: Color,
    ) {
        if let Some(texture) = self.textures.iter_mut().find(|texture| texture.body == body) {
            texture.material = Some(material);
            texture.fallback = fallback;
        }
    }

    fn find(&self, body: BodyId) -> Option<&BodyTexture> {
        self.textures.iter().find(|texture| texture.body == body)
    }
}

/// How many textures have finished, successfully or not.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadingProgress {
    pub expected: usize,
    pub settled:  usize,
}

impl LoadingProgress {
    /// Nothing to load counts as done.
    pub const fn is_complete(&self) -> bool { self.settled >= self.expected }

    pub fn percentage(&self) -> u32 {
        if self.expected == 0 {
            return 100;
        }
        let settled = self.settled.min(self.expected);
        u32::try_from(settled * 100 / self.expected).unwrap_or(100)
    }

    pub fn label(&self) -> String { format!("{}%", self.percentage()) }
}

fn load_body_textures(
    catalog: Res<BodyCatalog>,
    asset_server: Res<AssetServer>,
    mut textures: ResMut<BodyTextures>,
    mut progress: ResMut<LoadingProgress>,
) {
    textures.textures = catalog
        .iter()
        .filter_map(|(body, descriptor)| {
            descriptor.texture.as_ref().map(|path| BodyTexture {
                body,
                image: asset_server.load(path.clone()),
                material: None,
                fallback: Color::WHITE,
                settled: false,
            })
        })
        .collect();

    *progress = LoadingProgress {
        expected: textures.textures.len(),
        settled:  0,
    };
    info!("loading {} body textures", progress.expected);
}

pub fn check_texture_loading(
    mut next_state: ResMut<NextState<AssetsState>>,
    asset_server: Res<AssetServer>,
    catalog: Res<BodyCatalog>,
    mut textures: ResMut<BodyTextures>,
    mut progress: ResMut<LoadingProgress>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for texture in textures.textures.iter_mut().filter(|texture| !texture.settled) {
        match asset_server.get_load_state(texture.image.id()) {
            Some(LoadState::Loaded) => {
                debug!("texture loaded for {}", catalog.name(texture.body).unwrap_or("?"));
                texture.settled = true;
            },
            Some(LoadState::Failed(error)) => {
                warn!(
                    "texture for {} failed to load, using its flat colour: {error}",
                    catalog.name(texture.body).unwrap_or("?")
                );
                if let Some(mut material) = texture
                    .material
                    .as_ref()
                    .and_then(|handle| materials.get_mut(handle))
                {
                    fall_back_to_color(&mut material, texture.fallback);
                }
                texture.settled = true;
            },
            _ => {},
        }
    }

    let settled = textures.textures.iter().filter(|texture| texture.settled).count();
    if progress.settled != settled {
        progress.settled = settled;
    }

    if progress.is_complete() {
        info!("all body textures settled");
        next_state.set(AssetsState::Loaded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_load_is_complete() {
        let progress = LoadingProgress::default();
        assert!(progress.is_complete());
        assert_eq!(progress.percentage(), 100);
    }

    #[test]
    fn percentage_rounds_down() {
        let progress = LoadingProgress {
            expected: 3,
            settled:  1,
        };
        assert_eq!(progress.percentage(), 33);
        assert_eq!(progress.label(), "33%");
        assert!(!progress.is_complete());
    }

    #[test]
    fn every_texture_settled_is_complete() {
        let progress = LoadingProgress {
            expected: 14,
            settled:  14,
        };
        assert!(progress.is_complete());
        assert_eq!(progress.percentage(), 100);
    }
}
