//! Material tables
//!
//! Parses Wavefront `.mtl` files into a name -> [`Material`] table. Only the
//! diffuse color and diffuse texture are read.

pub mod mtl_parser;
pub mod material_library;

pub use mtl_parser::MtlParser;
pub use material_library::MaterialLibrary;

use std::collections::HashMap;

use crate::foundation::math::Vec3;

/// Diffuse attributes of one `newmtl` entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Diffuse color (Kd)
    pub diffuse: Option<Vec3>,
    /// Diffuse texture map (map_Kd)
    pub texture: Option<String>,
}

impl Material {
    /// Create a material with no attributes set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the diffuse color
    pub fn with_diffuse(mut self, diffuse: Vec3) -> Self {
        self.diffuse = Some(diffuse);
        self
    }

    /// Set the diffuse texture path
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }
}

/// Materials keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTable {
    materials: HashMap<String, Material>,
}

impl MaterialTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material, replacing any earlier one with the same name
    pub fn insert(&mut self, material: Material) -> Option<Material> {
        self.materials.insert(material.name.clone(), material)
    }

    /// Look up a material by name
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Look up the material for an optional tag
    pub fn resolve(&self, tag: Option<&str>) -> Option<&Material> {
        tag.and_then(|name| self.get(name))
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True if no material was loaded
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Material names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<Material> for MaterialTable {
    fn from_iter<T: IntoIterator<Item = Material>>(iter: T) -> Self {
        let mut table = Self::new();
        for material in iter {
            table.insert(material);
        }
        table
    }
}
