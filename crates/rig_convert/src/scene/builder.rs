//! Assembles a [`MeshDocument`] from parsed mesh data

use chrono::{SecondsFormat, Utc};

use super::document::{
    AssetInfo, Effect, FloatSource, Geometry, Image, InputBinding, MaterialBinding,
    MaterialDefinition, MeshDocument, SceneNode, Semantic, TriangleSet, VisualScene,
};
use super::DocumentError;
use crate::assets::Material;
use crate::core::config::DocumentConfig;
use crate::foundation::math::{flatten_vec3, Vec3};
use crate::geometry::Triangle;

/// Element ids used in every written document
pub mod ids {
    /// Geometry id
    pub const GEOMETRY: &str = "geometry0";
    /// Position source id
    pub const POSITIONS: &str = "vertices";
    /// Normal source id
    pub const NORMALS: &str = "normals";
    /// `<vertices>` element id
    pub const VERTICES: &str = "geometry0-vertices";
    /// Effect id
    pub const EFFECT: &str = "effect0";
    /// Material id
    pub const MATERIAL: &str = "material0";
    /// Texture image id
    pub const IMAGE: &str = "image0";
    /// Symbol binding the triangle set to the material
    pub const MATERIAL_SYMBOL: &str = "materialref";
    /// Node id
    pub const NODE: &str = "node0";
    /// Visual scene id
    pub const SCENE: &str = "myscene";
}

/// Diffuse color used when the MTL entry had no `Kd`
pub const DEFAULT_DIFFUSE: [f32; 3] = [0.8, 0.8, 0.8];

/// Builder for a single-mesh document
///
/// # Examples
/// ```
/// use rig_convert::core::config::DocumentConfig;
/// use rig_convert::foundation::math::Vec3;
/// use rig_convert::scene::DocumentBuilder;
///
/// let positions = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
/// let document = DocumentBuilder::new(&DocumentConfig::default())
///     .positions(&positions)
///     .triangles(vec![[0, 1, 2]])
///     .build()
///     .unwrap();
/// assert!(document.geometry.normals().is_none());
/// ```
pub struct DocumentBuilder<'a> {
    config: &'a DocumentConfig,
    positions: &'a [Vec3],
    normals: &'a [Vec3],
    triangles: Vec<Triangle>,
    normal_triangles: Option<Vec<Triangle>>,
    material: Option<&'a Material>,
    timestamp: Option<String>,
}

impl<'a> DocumentBuilder<'a> {
    /// Start a document using the given header settings
    pub fn new(config: &'a DocumentConfig) -> Self {
        Self {
            config,
            positions: &[],
            normals: &[],
            triangles: Vec::new(),
            normal_triangles: None,
            material: None,
            timestamp: None,
        }
    }

    /// Set the vertex positions
    pub fn positions(mut self, positions: &'a [Vec3]) -> Self {
        self.positions = positions;
        self
    }

    /// Set the vertex normals; an empty slice omits the normal channel
    pub fn normals(mut self, normals: &'a [Vec3]) -> Self {
        self.normals = normals;
        self
    }

    /// Set the triangle index list
    pub fn triangles(mut self, triangles: Vec<Triangle>) -> Self {
        self.triangles = triangles;
        self
    }

    /// Set the normal indices of each triangle
    ///
    /// Without them the normal channel reuses the vertex indices.
    pub fn normal_triangles(mut self, normal_triangles: Vec<Triangle>) -> Self {
        self.normal_triangles = Some(normal_triangles);
        self
    }

    /// Bind a material to the triangle set
    pub fn material(mut self, material: Option<&'a Material>) -> Self {
        self.material = material;
        self
    }

    /// Use a fixed created/modified timestamp instead of the current time
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Validate the indices and assemble the document
    pub fn build(mut self) -> Result<MeshDocument, DocumentError> {
        let has_normals = !self.normals.is_empty();
        let normal_triangles = if has_normals {
            self.normal_triangles
                .take()
                .unwrap_or_else(|| self.triangles.clone())
        } else {
            Vec::new()
        };
        self.check_indices(&normal_triangles)?;

        let mut sources = vec![FloatSource {
            id: ids::POSITIONS.to_string(),
            data: flatten_vec3(self.positions),
        }];
        let mut inputs = vec![InputBinding {
            offset: 0,
            semantic: Semantic::Vertex,
            source: format!("#{}", ids::VERTICES),
        }];

        if has_normals {
            sources.push(FloatSource {
                id: ids::NORMALS.to_string(),
                data: flatten_vec3(self.normals),
            });
            inputs.push(InputBinding {
                offset: 1,
                semantic: Semantic::Normal,
                source: format!("#{}", ids::NORMALS),
            });
        }

        let (image, effect, material, binding) = match self.material {
            Some(mat) => {
                let (image, effect, definition, binding) = Self::material_elements(mat);
                (image, Some(effect), Some(definition), Some(binding))
            }
            None => (None, None, None, None),
        };

        let geometry = Geometry {
            id: ids::GEOMETRY.to_string(),
            name: ids::GEOMETRY.to_string(),
            sources,
            vertices_id: ids::VERTICES.to_string(),
            triangles: TriangleSet {
                inputs,
                triangles: self.triangles,
                normals: normal_triangles,
                material_symbol: binding.as_ref().map(|b| b.symbol.clone()),
            },
        };

        let scene = VisualScene {
            id: ids::SCENE.to_string(),
            nodes: vec![SceneNode {
                id: ids::NODE.to_string(),
                name: ids::NODE.to_string(),
                geometry_url: format!("#{}", ids::GEOMETRY),
                material: binding,
            }],
        };

        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

        Ok(MeshDocument {
            asset: AssetInfo {
                authoring_tool: self.config.authoring_tool.clone(),
                created: timestamp.clone(),
                modified: timestamp,
                unit_name: self.config.unit_name.clone(),
                unit_meter: self.config.unit_meter,
                up_axis: self.config.up_axis.as_str().to_string(),
            },
            image,
            effect,
            material,
            geometry,
            scene,
        })
    }

    /// Every corner must name a position, and a normal when normals are bound
    fn check_indices(&self, normal_triangles: &[Triangle]) -> Result<(), DocumentError> {
        let vertex_count = self.positions.len();
        let normal_count = self.normals.len();

        for (triangle, corners) in self.triangles.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&index| index >= vertex_count) {
                return Err(DocumentError::VertexOutOfRange { triangle, index, vertex_count });
            }
        }

        if normal_count == 0 {
            return Ok(());
        }

        if normal_triangles.len() != self.triangles.len() {
            return Err(DocumentError::ChannelLength {
                triangles: self.triangles.len(),
                normals: normal_triangles.len(),
            });
        }

        for (triangle, corners) in normal_triangles.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&index| index >= normal_count) {
                return Err(DocumentError::NormalOutOfRange { triangle, index, normal_count });
            }
        }
        Ok(())
    }

    fn material_elements(mat: &Material) -> (Option<Image>, Effect, MaterialDefinition, MaterialBinding) {
        let [r, g, b] = mat.diffuse.map_or(DEFAULT_DIFFUSE, |c| [c.x, c.y, c.z]);

        let image = mat.texture.as_ref().map(|path| Image {
            id: ids::IMAGE.to_string(),
            init_from: path.clone(),
        });

        let effect = Effect {
            id: ids::EFFECT.to_string(),
            diffuse: [r, g, b, 1.0],
            image: image.as_ref().map(|img| img.id.clone()),
        };

        let definition = MaterialDefinition {
            id: ids::MATERIAL.to_string(),
            name: mat.name.clone(),
            effect_url: format!("#{}", ids::EFFECT),
        };

        let binding = MaterialBinding {
            symbol: ids::MATERIAL_SYMBOL.to_string(),
            target: format!("#{}", ids::MATERIAL),
        };

        (image, effect, definition, binding)
    }
}
