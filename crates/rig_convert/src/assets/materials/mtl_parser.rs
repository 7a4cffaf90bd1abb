//! MTL (Material Template Library) file parser
//!
//! Reads `newmtl`, `Kd` and `map_Kd`. Every other statement, and anything
//! before the first `newmtl`, is ignored.

use super::{Material, MaterialTable};
use crate::assets::{AssetError, LineContext};

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL text held in memory
    pub fn parse(contents: &str) -> Result<MaterialTable, AssetError> {
        Self::parse_named(contents, "<memory>")
    }

    /// Parse MTL file contents into a material table
    ///
    /// # Arguments
    /// * `contents` - The text contents of the MTL file
    /// * `source_name` - Label used in error messages
    pub fn parse_named(contents: &str, source_name: &str) -> Result<MaterialTable, AssetError> {
        let mut materials = MaterialTable::new();
        let mut current_material: Option<Material> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let ctx = LineContext::new(source_name, line_num + 1);
            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else {
                continue;
            };

            match command {
                "newmtl" => {
                    if let Some(mat) = current_material.take() {
                        materials.insert(mat);
                    }

                    let name = ctx.required("newmtl", "material name", &mut tokens)?;
                    current_material = Some(Material::new(name));
                }

                "Kd" => {
                    if let Some(ref mut mat) = current_material {
                        mat.diffuse = Some(ctx.parse_vec3("Kd", tokens)?);
                    }
                }

                "map_Kd" => {
                    if let Some(ref mut mat) = current_material {
                        let path = ctx.required("map_Kd", "texture path", &mut tokens)?;
                        mat.texture = Some(path.to_string());
                    }
                }

                _ => {}
            }
        }

        if let Some(mat) = current_material {
            materials.insert(mat);
        }

        log::debug!("Parsed {} material(s) from {}", materials.len(), source_name);
        Ok(materials)
    }
}
