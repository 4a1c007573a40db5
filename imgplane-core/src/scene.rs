//! Scene graph: meshes and the materials they draw with
use nalgebra::Point3;

use crate::geometry::PlaneGeometry;
use crate::transform::Transform;

/// Handle to a texture owned by a [`TextureLoader`](crate::TextureLoader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Values fed to the shader program for every mesh using a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    /// Elapsed seconds, bound as `uTime`
    pub time: f32,
    /// Sampled image, bound as `uImage`
    pub image: TextureId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub uniforms: Uniforms,
    pub transparent: bool,
}

impl Material {
    pub fn new(image: TextureId) -> Self {
        Self {
            uniforms: Uniforms { time: 0.0, image },
            transparent: true,
        }
    }
}

/// A plane placed in the scene and drawn with one material
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: PlaneGeometry,
    pub material: MaterialId,
    pub position: Point3<f32>,
    /// Bumped whenever `geometry` is replaced, so renderers know to re-upload.
    pub geometry_version: u32,
}

impl Mesh {
    pub fn new(geometry: PlaneGeometry, material: MaterialId) -> Self {
        Self {
            geometry,
            material,
            position: Point3::origin(),
            geometry_version: 0,
        }
    }

    pub fn set_geometry(&mut self, geometry: PlaneGeometry) {
        self.geometry = geometry;
        self.geometry_version = self.geometry_version.wrapping_add(1);
    }

    pub fn model_matrix(&self) -> nalgebra::Matrix4<f32> {
        Transform::model_matrix(&self.position)
    }
}

/// Ordered meshes plus the materials they reference.
///
/// Meshes are drawn in insertion order and are never removed.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes.iter().enumerate().map(|(i, mesh)| (MeshId(i), mesh))
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, material)| (MaterialId(i), material))
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Set `uTime` on every material
    pub fn set_time(&mut self, time: f32) {
        for material in &mut self.materials {
            material.uniforms.time = time;
        }
    }
}
