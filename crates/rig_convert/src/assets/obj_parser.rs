//! OBJ file parser for 3D meshes
//!
//! Reads positions, normals, polygon faces and the active material tag from a
//! Wavefront `.obj` stream. Texture coordinates, groups, smoothing and every
//! other statement are skipped.
//!
//! Only one material tag is tracked for the whole file: each `usemtl` replaces
//! the previous one, and the tag seen last applies to every face.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{AssetError, LineContext};
use crate::foundation::math::Vec3;
use crate::geometry::Face;

/// Everything a conversion needs from an OBJ file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjData {
    /// Vertex positions in file order
    pub vertices: Vec<Vec3>,
    /// Vertex normals in file order (may be empty)
    pub normals: Vec<Vec3>,
    /// Faces with 0-based vertex indices
    pub faces: Vec<Face>,
    /// Material tag from the last `usemtl` statement
    pub active_material: Option<String>,
    /// Material library names from `mtllib` statements
    pub material_libraries: Vec<String>,
}

/// OBJ file parser
pub struct ObjParser;

impl ObjParser {
    /// Parse an OBJ file from disk
    pub fn parse_file(path: impl AsRef<Path>) -> Result<ObjData, AssetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AssetError::io(path, e))?;
        let name = path.display().to_string();
        Self::parse_reader(BufReader::new(file), &name)
    }

    /// Parse OBJ text held in memory
    pub fn parse_str(contents: &str) -> Result<ObjData, AssetError> {
        Self::parse_reader(contents.as_bytes(), "<memory>")
    }

    /// Parse an OBJ stream line by line
    ///
    /// # Arguments
    /// * `reader` - Source of the OBJ text
    /// * `source_name` - Label used in error messages
    pub fn parse_reader<R: BufRead>(reader: R, source_name: &str) -> Result<ObjData, AssetError> {
        let mut data = ObjData::default();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| AssetError::io(source_name, e))?;
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
                "v" => data.vertices.push(ctx.parse_vec3("v", tokens)?),
                "vn" => data.normals.push(ctx.parse_vec3("vn", tokens)?),
                "f" => {
                    let corners = tokens
                        .map(|token| Self::parse_corner(&ctx, token, data.vertices.len(), data.normals.len()))
                        .collect::<Result<Vec<_>, _>>()?;
                    let (vertices, normals) = corners.into_iter().unzip();
                    data.faces.push(Face::new(vertices).with_normals(normals));
                }
                "usemtl" => {
                    let name = ctx.required("usemtl", "material name", &mut tokens)?;
                    data.active_material = Some(name.to_string());
                }
                "mtllib" => {
                    data.material_libraries.extend(tokens.map(str::to_string));
                }
                // vt, g, o, s, l and friends carry nothing we convert
                _ => {}
            }
        }

        log::debug!(
            "Parsed {}: {} vertices, {} normals, {} faces, material {:?}",
            source_name,
            data.vertices.len(),
            data.normals.len(),
            data.faces.len(),
            data.active_material
        );

        Ok(data)
    }

    /// Resolve one `v`, `v/vt`, `v//vn` or `v/vt/vn` corner
    ///
    /// Returns the vertex index and the normal index, which falls back to the
    /// vertex index when the corner has no normal field. Texture coordinates
    /// are skipped.
    fn parse_corner(
        ctx: &LineContext<'_>,
        token: &str,
        vertex_count: usize,
        normal_count: usize,
    ) -> Result<(usize, usize), AssetError> {
        let mut fields = token.split('/');
        let vertex_field = fields.next().unwrap_or(token);
        let vertex = Self::resolve_index(ctx, token, vertex_field, vertex_count, "vertex")?;

        let normal = match fields.nth(1) {
            Some(field) if !field.is_empty() => Self::resolve_index(ctx, token, field, normal_count, "normal")?,
            _ => vertex,
        };

        Ok((vertex, normal))
    }

    /// Convert a 1-based OBJ index to 0-based
    ///
    /// Negative indices count back from the most recent element.
    fn resolve_index(
        ctx: &LineContext<'_>,
        token: &str,
        field: &str,
        count: usize,
        what: &str,
    ) -> Result<usize, AssetError> {
        let raw: i64 = field.parse()
            .map_err(|_| ctx.error(format!("f invalid {what} index '{token}'")))?;

        let resolved = if raw > 0 {
            usize::try_from(raw - 1).ok()
        } else if raw < 0 {
            usize::try_from(raw.unsigned_abs())
                .ok()
                .and_then(|back| count.checked_sub(back))
        } else {
            None
        };

        resolved.ok_or_else(|| ctx.error(format!(
            "f {what} index '{token}' does not name a {what} ({count} read so far)"
        )))
    }
}
