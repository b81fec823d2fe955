// MeshOverlayRenderer — original-beside-overlay visualization grids
//
// For each batch item: render the predicted body mesh through the backend,
// rotate the result 180° (the backend's raster convention is upside-down
// relative to the source crops), composite it over the source image via
// the background sentinel, and lay original/overlay pairs out in a grid.

use image::{imageops, RgbImage, RgbaImage};

use crate::backend::{
    Device, Face, PerspectiveCamera, PointLight, RasterSettings, RenderBackend, Vertex,
};
use crate::error::{RenderError, Result};

/// Fixed rendering parameters, set once at construction.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Focal length in pixels (fx = fy).
    pub focal_length: f32,
    /// Square crop resolution; also the rendered output size.
    pub img_res: u32,
    /// Near clip plane.
    pub znear: f32,
    /// Far clip plane.
    pub zfar: f32,
    /// Point light location.
    pub light_location: [f32; 3],
    /// Background fill of the rendered image, and the compositing
    /// sentinel: a rendered channel equal to the sentinel channel is
    /// treated as "no mesh here".
    pub background: [u8; 3],
    /// Accelerator the backend should use.
    pub device: Device,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            focal_length: 5000.0,
            img_res: 224,
            // znear/zfar constants carried over from pyrender
            znear: 0.05,
            zfar: 100.0,
            light_location: [5.0, 5.0, -5.0],
            background: [255, 255, 255],
            device: Device::Cpu,
        }
    }
}

impl RendererConfig {
    pub fn focal_length(mut self, f: f32) -> Self {
        self.focal_length = f;
        self
    }

    pub fn img_res(mut self, res: u32) -> Self {
        self.img_res = res;
        self
    }

    pub fn light_location(mut self, loc: [f32; 3]) -> Self {
        self.light_location = loc;
        self
    }

    pub fn background(mut self, bg: [u8; 3]) -> Self {
        self.background = bg;
        self
    }

    pub fn device(mut self, d: Device) -> Self {
        self.device = d;
        self
    }
}

/// Composites rendered body meshes over their source images.
///
/// Holds the fixed camera parameters, the mesh topology, and the injected
/// [`RenderBackend`]; no state changes between calls, so one renderer can
/// serve every visualization request of a run.
pub struct MeshOverlayRenderer<B: RenderBackend> {
    config: RendererConfig,
    faces: Vec<Face>,
    backend: B,
}

impl<B: RenderBackend> MeshOverlayRenderer<B> {
    pub fn new(config: RendererConfig, faces: Vec<Face>, backend: B) -> Self {
        Self {
            config,
            faces,
            backend,
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render a batch of meshes over their source images and assemble the
    /// (original, overlay) pairs into one grid, two panels per row.
    ///
    /// `vertex_batches[i]` and `translations[i]` describe the mesh for
    /// `images[i]`. Output width is twice the configured resolution and
    /// height is `batch × resolution`. Backend failures abort this call
    /// only; the renderer itself stays usable.
    pub fn visualize(
        &self,
        vertex_batches: &[Vec<Vertex>],
        translations: &[[f32; 3]],
        images: &[RgbImage],
    ) -> Result<RgbImage> {
        if vertex_batches.len() != translations.len() || vertex_batches.len() != images.len() {
            return Err(RenderError::BatchMismatch {
                vertex_sets: vertex_batches.len(),
                translations: translations.len(),
                images: images.len(),
            });
        }
        if vertex_batches.is_empty() {
            return Err(RenderError::EmptyBatch);
        }
        let res = self.config.img_res;
        for (i, img) in images.iter().enumerate() {
            if img.width() != res || img.height() != res {
                return Err(RenderError::ImageSize {
                    index: i,
                    expected: res,
                    got_w: img.width(),
                    got_h: img.height(),
                });
            }
        }

        let raster = RasterSettings {
            image_size: res,
            blur_radius: 0.0,
            background: self.config.background,
        };
        let light = PointLight {
            location: self.config.light_location,
        };

        let mut panels = Vec::with_capacity(2 * images.len());
        for ((vertices, &translation), image) in vertex_batches
            .iter()
            .zip(translations.iter())
            .zip(images.iter())
        {
            let camera = self.camera_for(translation);
            let rendered =
                self.backend
                    .render_mesh(vertices, &self.faces, &camera, &raster, &light)?;
            if rendered.width() != res || rendered.height() != res {
                return Err(RenderError::BackendImageSize {
                    expected: res,
                    got_w: rendered.width(),
                    got_h: rendered.height(),
                });
            }
            // Orientation fix between the raster convention and the crop
            let rendered = imageops::rotate180(&rendered);
            let overlay = composite_over(&rendered, image, self.config.background)?;
            panels.push(image.clone());
            panels.push(overlay);
        }

        log::debug!("assembled overlay grid for {} items", images.len());
        make_grid(&panels, 2)
    }

    fn camera_for(&self, translation: [f32; 3]) -> PerspectiveCamera {
        let center = (self.config.img_res / 2) as f32;
        PerspectiveCamera {
            focal_length: (self.config.focal_length, self.config.focal_length),
            principal_point: (center, center),
            rotation: PerspectiveCamera::IDENTITY_ROTATION,
            translation,
            image_size: self.config.img_res,
            znear: self.config.znear,
            zfar: self.config.zfar,
            device: self.config.device,
        }
    }
}

/// Substitute the source image wherever the rendered image still shows the
/// background sentinel.
///
/// The test is exact equality per channel, matching the rendered
/// background fill. This is a depth-free rule and is fragile where
/// antialiasing or lighting happens to reproduce a sentinel channel value
/// exactly; such pixels show the source image instead of the mesh.
pub fn composite_over(
    rendered: &RgbaImage,
    source: &RgbImage,
    sentinel: [u8; 3],
) -> Result<RgbImage> {
    if rendered.dimensions() != source.dimensions() {
        return Err(RenderError::CompositeSize {
            rend_w: rendered.width(),
            rend_h: rendered.height(),
            src_w: source.width(),
            src_h: source.height(),
        });
    }
    let mut out = RgbImage::new(source.width(), source.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let r = rendered.get_pixel(x, y);
        let s = source.get_pixel(x, y);
        for c in 0..3 {
            pixel.0[c] = if r.0[c] == sentinel[c] { s.0[c] } else { r.0[c] };
        }
    }
    Ok(out)
}

/// Lay panels out row-major, `per_row` panels per row.
///
/// All panels must share one size; the last row is padded with black if
/// the panel count is not a multiple of `per_row`.
pub fn make_grid(panels: &[RgbImage], per_row: usize) -> Result<RgbImage> {
    if panels.is_empty() || per_row == 0 {
        return Err(RenderError::EmptyBatch);
    }
    let (w, h) = (panels[0].width(), panels[0].height());
    for (i, p) in panels.iter().enumerate() {
        if p.width() != w || p.height() != h {
            return Err(RenderError::PanelSize {
                index: i,
                want_w: w,
                want_h: h,
                got_w: p.width(),
                got_h: p.height(),
            });
        }
    }

    let rows = panels.len().div_ceil(per_row);
    let mut grid = RgbImage::new(per_row as u32 * w, rows as u32 * h);
    for (i, panel) in panels.iter().enumerate() {
        let x = (i % per_row) as i64 * w as i64;
        let y = (i / per_row) as i64 * h as i64;
        imageops::replace(&mut grid, panel, x, y);
    }
    Ok(grid)
}
