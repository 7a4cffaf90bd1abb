//! Loading material tables from disk

use std::fs;
use std::path::{Path, PathBuf};

use super::{MaterialTable, MtlParser};
use crate::assets::AssetError;

/// Material loader for `.mtl` files
pub struct MaterialLibrary;

impl MaterialLibrary {
    /// Load every material from an MTL file
    pub fn load(mtl_path: impl AsRef<Path>) -> Result<MaterialTable, AssetError> {
        let mtl_path = mtl_path.as_ref();
        let contents = fs::read_to_string(mtl_path)
            .map_err(|e| AssetError::io(mtl_path, e))?;

        let table = MtlParser::parse_named(&contents, &mtl_path.display().to_string())?;
        log::info!("Loaded {} material(s) from {}", table.len(), mtl_path.display());
        Ok(table)
    }

    /// Locate a library named by an OBJ `mtllib` statement
    ///
    /// Names are relative to the directory holding the OBJ file.
    pub fn resolve_library_path(obj_path: &Path, library: &str) -> PathBuf {
        obj_path
            .parent()
            .map_or_else(|| PathBuf::from(library), |dir| dir.join(library))
    }
}
