//! Fan triangulation of polygonal faces
//!
//! Quads are split along the diagonal from their first corner and larger
//! polygons are fanned from their first corner. The split is purely
//! topological: concave or non-planar faces may come out folded.

use super::{Face, Triangle};

/// Number of triangles a face with `corners` corners decomposes into
pub const fn triangle_count(corners: usize) -> usize {
    corners.saturating_sub(2)
}

/// Fan an index list into triangles
fn fan(v: &[usize]) -> Vec<Triangle> {
    match v.len() {
        0..=2 => Vec::new(),
        3 => vec![[v[0], v[1], v[2]]],
        4 => vec![[v[0], v[1], v[2]], [v[0], v[2], v[3]]],
        n => (1..n - 1).map(|i| [v[0], v[i], v[i + 1]]).collect(),
    }
}

/// Triangulate a single face
///
/// Faces with fewer than three corners produce no triangles.
pub fn triangulate_face(face: &Face) -> Vec<Triangle> {
    fan(&face.vertices)
}

/// Triangulate faces in order, concatenating their triangles
pub fn triangulate_faces(faces: &[Face]) -> Vec<Triangle> {
    faces.iter().flat_map(triangulate_face).collect()
}

/// Normal indices matching [`triangulate_faces`] triangle for triangle
pub fn triangulate_normals(faces: &[Face]) -> Vec<Triangle> {
    faces.iter().flat_map(|face| fan(&face.normals)).collect()
}
