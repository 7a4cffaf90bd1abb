//! In-memory COLLADA document
//!
//! A [`MeshDocument`] mirrors the subset of COLLADA 1.4.1 the converter
//! writes: one geometry with a single triangle set, an optional phong
//! material, and one visual scene holding a single node.

use crate::geometry::Triangle;

/// Input semantic of a triangle set channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semantic {
    /// Positions, through the geometry's `<vertices>` element
    Vertex,
    /// Per-corner normals
    Normal,
}

impl Semantic {
    /// Name as written in the `semantic` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertex => "VERTEX",
            Self::Normal => "NORMAL",
        }
    }

    /// Parse a `semantic` attribute
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "VERTEX" => Some(Self::Vertex),
            "NORMAL" => Some(Self::Normal),
            _ => None,
        }
    }
}

/// `<asset>` header
#[derive(Debug, Clone, PartialEq)]
pub struct AssetInfo {
    /// Authoring tool name
    pub authoring_tool: String,
    /// Creation timestamp (RFC 3339)
    pub created: String,
    /// Modification timestamp (RFC 3339)
    pub modified: String,
    /// Unit name
    pub unit_name: String,
    /// Unit size in meters
    pub unit_meter: f32,
    /// `X_UP`, `Y_UP` or `Z_UP`
    pub up_axis: String,
}

/// Flat float buffer with an XYZ accessor
#[derive(Debug, Clone, PartialEq)]
pub struct FloatSource {
    /// Element id
    pub id: String,
    /// Values, three per element
    pub data: Vec<f32>,
}

impl FloatSource {
    /// Accessor parameter names
    pub const PARAMS: [&'static str; 3] = ["X", "Y", "Z"];

    /// Id of the nested `<float_array>`
    pub fn array_id(&self) -> String {
        format!("{}-array", self.id)
    }

    /// Number of XYZ elements
    pub fn element_count(&self) -> usize {
        self.data.len() / Self::PARAMS.len()
    }
}

/// One channel of a triangle set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBinding {
    /// Channel number (index offset inside each corner)
    pub offset: usize,
    /// What the channel carries
    pub semantic: Semantic,
    /// Referenced element, as a `#id` url
    pub source: String,
}

/// `<triangles>` primitive set
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleSet {
    /// Channel bindings, ordered by offset
    pub inputs: Vec<InputBinding>,
    /// Vertex indices of each triangle
    pub triangles: Vec<Triangle>,
    /// Normal indices of each triangle, parallel to `triangles`; empty without a normal channel
    pub normals: Vec<Triangle>,
    /// Material symbol resolved by the node's `bind_material`
    pub material_symbol: Option<String>,
}

impl TriangleSet {
    /// Number of indices written per corner
    pub fn stride(&self) -> usize {
        self.inputs.iter().map(|input| input.offset + 1).max().unwrap_or(1)
    }

    /// Per-triangle indices of one channel
    pub fn channel(&self, semantic: Semantic) -> &[Triangle] {
        match semantic {
            Semantic::Vertex => &self.triangles,
            Semantic::Normal => &self.normals,
        }
    }

    /// The `<p>` list: each corner writes one index per input, in offset order
    pub fn index_list(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.triangles.len() * 3 * self.stride());
        for (t, triangle) in self.triangles.iter().enumerate() {
            for (corner, &vertex) in triangle.iter().enumerate() {
                for input in &self.inputs {
                    let index = self
                        .channel(input.semantic)
                        .get(t)
                        .map_or(vertex, |channel| channel[corner]);
                    indices.push(index);
                }
            }
        }
        indices
    }
}

/// `<geometry>` with a single mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Element id
    pub id: String,
    /// Display name
    pub name: String,
    /// Position source followed by the optional normal source
    pub sources: Vec<FloatSource>,
    /// Id of the `<vertices>` element wrapping the position source
    pub vertices_id: String,
    /// The single primitive set
    pub triangles: TriangleSet,
}

impl Geometry {
    /// Position source (always first)
    pub fn positions(&self) -> &FloatSource {
        &self.sources[0]
    }

    /// Normal source, when the mesh had normals
    pub fn normals(&self) -> Option<&FloatSource> {
        self.sources.get(1)
    }
}

/// `<image>` entry for a diffuse texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Element id
    pub id: String,
    /// Texture path as written in the MTL file
    pub init_from: String,
}

/// Phong `<effect>`
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    /// Element id
    pub id: String,
    /// Diffuse RGBA
    pub diffuse: [f32; 4],
    /// Id of the image declared as a sampler parameter
    pub image: Option<String>,
}

/// `<material>` wrapping an effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialDefinition {
    /// Element id
    pub id: String,
    /// Source material name
    pub name: String,
    /// Effect url (`#id`)
    pub effect_url: String,
}

/// `<instance_material>` inside a node's `<bind_material>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialBinding {
    /// Symbol used by the triangle set
    pub symbol: String,
    /// Material url (`#id`)
    pub target: String,
}

/// `<node>` holding one geometry instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneNode {
    /// Element id
    pub id: String,
    /// Display name
    pub name: String,
    /// Instanced geometry url (`#id`)
    pub geometry_url: String,
    /// Material bound to the instance
    pub material: Option<MaterialBinding>,
}

/// `<visual_scene>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualScene {
    /// Element id
    pub id: String,
    /// Root nodes
    pub nodes: Vec<SceneNode>,
}

/// Complete document for one converted mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDocument {
    /// Header
    pub asset: AssetInfo,
    /// Texture image, when the material has one
    pub image: Option<Image>,
    /// Effect of the bound material
    pub effect: Option<Effect>,
    /// Bound material
    pub material: Option<MaterialDefinition>,
    /// The converted mesh
    pub geometry: Geometry,
    /// Scene graph
    pub scene: VisualScene,
}

impl MeshDocument {
    /// Url of the active scene
    pub fn active_scene_url(&self) -> String {
        format!("#{}", self.scene.id)
    }
}
