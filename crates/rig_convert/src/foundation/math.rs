//! Math utilities and types
//!
//! Positions, normals and colors all travel through the converter as
//! single-precision 3D vectors.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Flatten a list of vectors into `x y z x y z ...` order
pub fn flatten_vec3(values: &[Vec3]) -> Vec<f32> {
    values.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preserves_order() {
        let values = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
        assert_eq!(flatten_vec3(&values), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(flatten_vec3(&[]).is_empty());
    }
}
