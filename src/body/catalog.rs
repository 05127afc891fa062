//! Static body descriptors, loaded once from the embedded RON document.
//!
//! The catalog is read-only after load. Bodies are addressed by [`BodyId`],
//! which is the descriptor's position in the catalog, and parents are always
//! listed before their children so positions can be composed in one pass.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// The solar system shipped with the app.
pub const SOLAR_SYSTEM_RON: &str = include_str!("../../assets/data/solar_system.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse body catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("duplicate body name `{0}`")]
    DuplicateName(String),

    #[error("body `{body}` orbits unknown body `{parent}`")]
    UnknownParent { body: String, parent: String },

    #[error("body `{body}` is listed before the body it orbits, `{parent}`")]
    ParentAfterChild { body: String, parent: String },
}

/// Index of a body in the [`BodyCatalog`].
#[derive(Reflect, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    #[cfg(test)]
    pub(crate) const fn new(index: usize) -> Self { Self(index) }

    pub const fn index(self) -> usize { self.0 }
}

#[derive(Reflect, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Ring,
    Comet,
    Asteroid,
}

/// A labelled spot on a body's surface, in degrees.
#[derive(Reflect, Deserialize, Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub name:      String,
    pub latitude:  f32,
    pub longitude: f32,
}

/// Physical attributes of one body, in catalog units.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyDescriptor {
    pub name:        String,
    /// km
    pub radius:      f32,
    /// millions of km from the orbit centre
    pub distance:    f32,
    /// days
    pub period:      f32,
    /// hours, zero for bodies without a meaningful day
    pub daylength:   f32,
    /// degrees
    pub tilt:        f32,
    pub kind:        BodyKind,
    #[serde(default)]
    pub orbits:      Option<String>,
    /// fixed orbital phase in radians, random when absent
    #[serde(default)]
    pub offset:      Option<f32>,
    #[serde(default)]
    pub labels:      Vec<PointOfInterest>,
    #[serde(default)]
    pub traversable: bool,
    #[serde(default)]
    pub texture:     Option<String>,
    /// srgb, used while the texture loads or when it fails
    pub color:       (f32, f32, f32),
}

#[derive(Deserialize)]
struct CatalogDocument {
    bodies: Vec<BodyDescriptor>,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct BodyCatalog {
    bodies:  Vec<BodyDescriptor>,
    by_name: HashMap<String, BodyId>,
    parents: Vec<Option<BodyId>>,
}

impl BodyCatalog {
    pub fn from_ron(source: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = ron::from_str(source)?;
        Self::from_descriptors(document.bodies)
    }

    pub fn from_descriptors(bodies: Vec<BodyDescriptor>) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::with_capacity(bodies.len());
        for (index, body) in bodies.iter().enumerate() {
            if by_name.insert(body.name.clone(), BodyId(index)).is_some() {
                return Err(CatalogError::DuplicateName(body.name.clone()));
            }
        }

        let mut parents = Vec::with_capacity(bodies.len());
        for (index, body) in bodies.iter().enumerate() {
            let parent = match &body.orbits {
                None => None,
                Some(parent) => {
                    let Some(&parent_id) = by_name.get(parent) else {
                        return Err(CatalogError::UnknownParent {
                            body:   body.name.clone(),
                            parent: parent.clone(),
                        });
                    };
                    if parent_id.index() >= index {
                        return Err(CatalogError::ParentAfterChild {
                            body:   body.name.clone(),
                            parent: parent.clone(),
                        });
                    }
                    Some(parent_id)
                },
            };
            parents.push(parent);
        }

        Ok(Self {
            bodies,
            by_name,
            parents,
        })
    }

    pub fn find(&self, name: &str) -> Option<BodyId> { self.by_name.get(name).copied() }

    pub fn get(&self, id: BodyId) -> Option<&BodyDescriptor> { self.bodies.get(id.index()) }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.parents.get(id.index()).copied().flatten()
    }

    pub fn len(&self) -> usize { self.bodies.len() }

    pub fn is_empty(&self) -> bool { self.bodies.is_empty() }

    /// Bodies in catalog order, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyDescriptor)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyId(index), body))
    }

    /// Bodies offered in the travel menu and to picking.
    pub fn traversable(&self) -> impl Iterator<Item = (BodyId, &BodyDescriptor)> {
        self.iter().filter(|(_, body)| body.traversable)
    }

    pub fn name(&self, id: BodyId) -> Option<&str> { self.get(id).map(|body| body.name.as_str()) }
}

#[cfg(test)]
pub(crate) fn descriptor(name: &str) -> BodyDescriptor {
    BodyDescriptor {
        name:        name.to_string(),
        radius:      6371.0,
        distance:    1.0,
        period:      365.0,
        daylength:   24.0,
        tilt:        0.0,
        kind:        BodyKind::Planet,
        orbits:      None,
        offset:      Some(0.0),
        labels:      Vec::new(),
        traversable: true,
        texture:     None,
        color:       (1.0, 1.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbiting(name: &str, parent: &str) -> BodyDescriptor {
        BodyDescriptor {
            orbits: Some(parent.to_string()),
            ..descriptor(name)
        }
    }

    #[test]
    fn embedded_solar_system_is_valid() {
        let catalog = BodyCatalog::from_ron(SOLAR_SYSTEM_RON).expect("embedded catalog parses");

        let sun = catalog.find("Sun").expect("sun is present");
        let earth = catalog.find("Earth").expect("earth is present");
        let moon = catalog.find("Moon").expect("moon is present");

        assert_eq!(catalog.parent(sun), None);
        assert_eq!(catalog.parent(earth), Some(sun));
        assert_eq!(catalog.parent(moon), Some(earth));
        assert!(catalog.traversable().count() > 5);
    }

    #[test]
    fn textured_bodies_have_a_visible_fallback() {
        let catalog = BodyCatalog::from_ron(SOLAR_SYSTEM_RON).expect("embedded catalog parses");

        for (_, body) in catalog.iter() {
            let Some(path) = &body.texture else {
                continue;
            };
            assert!(path.starts_with("textures/"), "{}: {path}", body.name);
            let (red, green, blue) = body.color;
            assert!(red.max(green).max(blue) > 0.0, "{} falls back to black", body.name);
        }
    }

    #[test]
    fn unknown_name_is_not_found() {
        let catalog = BodyCatalog::from_descriptors(vec![descriptor("Sun")]).expect("valid");
        assert_eq!(catalog.find("Vulcan"), None);
        assert_eq!(catalog.name(BodyId(7)), None);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = BodyCatalog::from_descriptors(vec![descriptor("Earth"), descriptor("Earth")]);
        assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "Earth"));
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let result =
            BodyCatalog::from_descriptors(vec![descriptor("Sun"), orbiting("Moon", "Earth")]);
        assert!(matches!(
            result,
            Err(CatalogError::UnknownParent { body, parent }) if body == "Moon" && parent == "Earth"
        ));
    }

    #[test]
    fn child_before_parent_is_rejected() {
        let result =
            BodyCatalog::from_descriptors(vec![orbiting("Moon", "Earth"), descriptor("Earth")]);
        assert!(matches!(result, Err(CatalogError::ParentAfterChild { .. })));
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        let result = BodyCatalog::from_ron("(bodies: [ (name: \"Sun\" ) ])");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
