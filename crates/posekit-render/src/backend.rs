// RenderBackend — the external differentiable-rendering capability
//
// This crate assembles camera/light/raster parameters and composites the
// result; rasterization, perspective projection, and shading are the
// backend's contract. Backends render the mesh with a flat, unit-albedo
// material against a background filled with the sentinel color the caller
// passes in the raster settings.

use image::RgbaImage;

use crate::error::Result;

/// One mesh vertex, camera-frame coordinates.
pub type Vertex = [f32; 3];

/// One triangle as vertex indices.
pub type Face = [u32; 3];

/// Which accelerator a backend should run on.
///
/// Explicit at construction rather than read from global state, so two
/// renderers in one process can target different devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Cpu,
    /// CUDA device by ordinal.
    Cuda(usize),
}

/// A perspective camera in screen-space convention: focal length and
/// principal point in pixels, rotation applied before `translation`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Focal length in pixels, (fx, fy).
    pub focal_length: (f32, f32),
    /// Principal point in pixels, (cx, cy).
    pub principal_point: (f32, f32),
    /// Row-major 3x3 rotation. Identity for this pipeline.
    pub rotation: [[f32; 3]; 3],
    /// Camera translation.
    pub translation: [f32; 3],
    /// Square output size in pixels.
    pub image_size: u32,
    /// Near clip plane.
    pub znear: f32,
    /// Far clip plane.
    pub zfar: f32,
    /// Accelerator to rasterize on, from the renderer's configuration.
    pub device: Device,
}

impl PerspectiveCamera {
    pub const IDENTITY_ROTATION: [[f32; 3]; 3] =
        [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
}

/// Rasterization settings forwarded to the backend.
#[derive(Debug, Clone, Copy)]
pub struct RasterSettings {
    /// Square output size in pixels.
    pub image_size: u32,
    /// Blur radius for soft rasterization; 0.0 for hard edges.
    pub blur_radius: f32,
    /// Background fill, also the compositing sentinel.
    pub background: [u8; 3],
}

/// A single point light.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub location: [f32; 3],
}

/// The injected mesh-rendering capability.
///
/// `render_mesh` maps one mesh plus camera/raster/light parameters to an
/// RGBA image of `raster.image_size` squared, mesh lit by `light` with a
/// flat unit-albedo material, every uncovered pixel filled with
/// `raster.background`. Numeric behaviour of rasterization and shading is
/// the implementation's contract, not this crate's.
pub trait RenderBackend: Send + Sync {
    fn render_mesh(
        &self,
        vertices: &[Vertex],
        faces: &[Face],
        camera: &PerspectiveCamera,
        raster: &RasterSettings,
        light: &PointLight,
    ) -> Result<RgbaImage>;
}
