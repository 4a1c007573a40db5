//! Plane geometry for image meshes
use nalgebra::{Point2, Point3};

/// A vertex with position and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub uv: Point2<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            uv: Point2::new(u, v),
        }
    }
}

/// An axis-aligned rectangle in the XY plane, centred on its local origin.
///
/// Two triangles, counter-clockwise when seen from +Z. UV (0, 0) sits at the
/// bottom-left corner and (1, 1) at the top-right.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    pub vertices: [Vertex; 4],
    pub indices: [u16; 6],
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;

        Self {
            width,
            height,
            vertices: [
                Vertex::new(-half_w, half_h, 0.0, 0.0, 1.0),
                Vertex::new(half_w, half_h, 0.0, 1.0, 1.0),
                Vertex::new(-half_w, -half_h, 0.0, 0.0, 0.0),
                Vertex::new(half_w, -half_h, 0.0, 1.0, 0.0),
            ],
            indices: [0, 2, 1, 2, 3, 1],
        }
    }

    /// Interleaved `[x, y, z, u, v]` per vertex, ready for a vertex buffer.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * 5);
        for vertex in &self.vertices {
            data.extend_from_slice(&[
                vertex.position.x,
                vertex.position.y,
                vertex.position.z,
                vertex.uv.x,
                vertex.uv.y,
            ]);
        }
        data
    }

    /// Corner positions in local space: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point3<f32>; 4] {
        [
            self.vertices[0].position,
            self.vertices[1].position,
            self.vertices[2].position,
            self.vertices[3].position,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_extent() {
        let plane = PlaneGeometry::new(200.0, 150.0);
        let [top_left, _, _, bottom_right] = plane.corners();
        assert_eq!(top_left, Point3::new(-100.0, 75.0, 0.0));
        assert_eq!(bottom_right, Point3::new(100.0, -75.0, 0.0));
    }

    #[test]
    fn test_triangles_face_camera() {
        let plane = PlaneGeometry::new(2.0, 2.0);
        for tri in plane.indices.chunks(3) {
            let a = plane.vertices[tri[0] as usize].position;
            let b = plane.vertices[tri[1] as usize].position;
            let c = plane.vertices[tri[2] as usize].position;
            let normal = (b - a).cross(&(c - a));
            assert!(normal.z > 0.0);
        }
    }

    #[test]
    fn test_interleaved_layout() {
        let plane = PlaneGeometry::new(4.0, 2.0);
        let data = plane.interleaved();
        assert_eq!(data.len(), 20);
        assert_eq!(&data[0..5], &[-2.0, 1.0, 0.0, 0.0, 1.0]);
    }
}
