//! Polygon data shared between the OBJ parser and the document builder

pub mod triangulate;

pub use triangulate::{triangulate_face, triangulate_faces, triangulate_normals, triangle_count};

/// Polygon as an ordered list of 0-based vertex indices
///
/// Each corner also carries a normal index. Corners read without a normal
/// field reuse their vertex index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Face {
    /// Vertex indices in winding order
    pub vertices: Vec<usize>,
    /// Normal index of each corner, parallel to `vertices`
    pub normals: Vec<usize>,
}

impl Face {
    /// Create a face whose normals follow its vertex indices
    pub fn new(vertices: Vec<usize>) -> Self {
        Self {
            normals: vertices.clone(),
            vertices,
        }
    }

    /// Set per-corner normal indices
    pub fn with_normals(mut self, normals: Vec<usize>) -> Self {
        debug_assert_eq!(normals.len(), self.vertices.len());
        self.normals = normals;
        self
    }

    /// Number of corners
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the face has no corners
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True if the face has enough corners to form a triangle
    pub fn is_polygon(&self) -> bool {
        self.vertices.len() >= 3
    }
}

impl From<Vec<usize>> for Face {
    fn from(vertices: Vec<usize>) -> Self {
        Self::new(vertices)
    }
}

/// Three vertex indices
pub type Triangle = [usize; 3];
