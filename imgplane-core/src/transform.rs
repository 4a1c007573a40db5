//! Model and model-view matrices for scene meshes
use nalgebra::{Matrix4, Point3, Vector3};

/// Transform builder for mesh placement
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Model matrix for a mesh centred at `position`. Planes are never
    /// rotated or scaled; their size lives in the geometry.
    pub fn model_matrix(position: &Point3<f32>) -> Matrix4<f32> {
        Self::translation_matrix(position.x, position.y, position.z)
    }

    pub fn model_view_matrix(model: &Matrix4<f32>, view: &Matrix4<f32>) -> Matrix4<f32> {
        view * model
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_model_is_identity() {
        let matrix = Transform::model_matrix(&Point3::origin());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_model_matrix_moves_points() {
        let matrix = Transform::model_matrix(&Point3::new(-200.0, 175.0, 0.0));
        let moved = matrix.transform_point(&Point3::new(100.0, 75.0, 0.0));
        assert_eq!(moved, Point3::new(-100.0, 250.0, 0.0));
    }
}
