//! The overlay context: viewport, camera, scene and one record per image
use nalgebra::Point3;

use crate::backend::{ImageElement, Renderer, TextureLoader};
use crate::bounds::Bounds;
use crate::config::{OverlayConfig, TextureBinding};
use crate::geometry::PlaneGeometry;
use crate::layout;
use crate::projection::Camera;
use crate::scene::{Material, MaterialId, Mesh, MeshId, Scene, TextureId};
use crate::viewport::Viewport;

/// A source image and the mesh that mirrors it
#[derive(Debug, Clone)]
pub struct ImageRecord<I> {
    pub element: I,
    pub mesh: MeshId,
    /// Bounds as of the last layout sync
    pub bounds: Bounds,
}

/// Everything one overlay owns.
///
/// The renderer and texture loader are passed in per call so the layout
/// logic can run without a graphics context.
pub struct Overlay<I> {
    config: OverlayConfig,
    viewport: Viewport,
    camera: Camera,
    scene: Scene,
    records: Vec<ImageRecord<I>>,
}

impl<I: ImageElement> Overlay<I> {
    pub fn new(config: OverlayConfig, viewport: Viewport) -> Self {
        if !config.camera.frames_origin() {
            log::warn!(
                "camera at distance {} with clip range {}..{} clips every image plane",
                config.camera.distance,
                config.camera.near,
                config.camera.far
            );
        }
        let camera = Camera::for_viewport(viewport, &config.camera);
        log::debug!(
            "overlay camera for {}x{}: fov {:.4} rad",
            viewport.width,
            viewport.height,
            camera.fov
        );

        Self {
            config,
            viewport,
            camera,
            scene: Scene::new(),
            records: Vec::new(),
        }
    }

    /// Setup, mapping and the first layout sync in one go.
    pub fn mount<L, R>(
        config: OverlayConfig,
        viewport: Viewport,
        images: impl IntoIterator<Item = I>,
        loader: &mut L,
        renderer: &mut R,
    ) -> Self
    where
        L: TextureLoader,
        R: Renderer,
    {
        let mut overlay = Self::new(config, viewport);
        renderer.set_size(viewport);
        overlay.add_images(images, loader);
        overlay.sync_layout();
        overlay
    }

    /// Create one textured plane per image, sized to its current bounds.
    ///
    /// Positions are left at the origin until [`Overlay::sync_layout`] runs.
    pub fn add_images<L: TextureLoader>(
        &mut self,
        images: impl IntoIterator<Item = I>,
        loader: &mut L,
    ) {
        let images: Vec<I> = images.into_iter().collect();
        let textures: Vec<TextureId> = images
            .iter()
            .map(|image| loader.load(&image.source()))
            .collect();

        let shared = match (self.config.texture_binding, textures.first()) {
            (TextureBinding::Shared, Some(&first)) => {
                Some(self.scene.add_material(Material::new(first)))
            }
            _ => None,
        };

        for (element, texture) in images.into_iter().zip(textures) {
            let material: MaterialId = match shared {
                Some(id) => id,
                None => self.scene.add_material(Material::new(texture)),
            };

            let bounds = element.bounds();
            let geometry = PlaneGeometry::new(bounds.width, bounds.height);
            let mesh = self.scene.add_mesh(Mesh::new(geometry, material));

            self.records.push(ImageRecord {
                element,
                mesh,
                bounds,
            });
        }

        log::debug!(
            "mapped {} images onto {} meshes ({} materials)",
            self.records.len(),
            self.scene.mesh_count(),
            self.scene.material_count()
        );
    }

    /// Re-read every image's bounds and move its mesh to match.
    ///
    /// A plane whose image changed size gets fresh geometry.
    pub fn sync_layout(&mut self) {
        for record in &mut self.records {
            let bounds = record.element.bounds();
            let Some(mesh) = self.scene.mesh_mut(record.mesh) else {
                continue;
            };

            if bounds.size_differs(&record.bounds) {
                mesh.set_geometry(PlaneGeometry::new(bounds.width, bounds.height));
            }

            let center = layout::mesh_center(&bounds, self.viewport);
            mesh.position = Point3::new(center.x, center.y, 0.0);
            record.bounds = bounds;
        }
    }

    /// Adopt a new viewport: surface size, camera and mesh positions.
    pub fn resize<R: Renderer>(&mut self, viewport: Viewport, renderer: &mut R) {
        log::debug!("resize to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        renderer.set_size(viewport);
        self.camera.fit_viewport(viewport);
        self.sync_layout();
    }

    /// Set the shader clock on every material.
    pub fn set_time(&mut self, seconds: f32) {
        self.scene.set_time(seconds);
    }

    /// Draw the scene once.
    ///
    /// Returns `Ok(false)` without touching the renderer while the viewport
    /// has a zero side.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<bool, R::Error> {
        if self.viewport.is_degenerate() {
            log::debug!(
                "skipping render for degenerate viewport {}x{}",
                self.viewport.width,
                self.viewport.height
            );
            return Ok(false);
        }
        renderer.render(&self.scene, &self.camera)?;
        Ok(true)
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn records(&self) -> &[ImageRecord<I>] {
        &self.records
    }
}
