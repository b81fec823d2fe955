//! # posekit-render
//!
//! Mesh-over-image visualization for 3D human pose/shape estimation.
//!
//! This crate provides:
//! - [`RenderBackend`] trait — the injected external rendering capability
//!   (rasterization, projection, and shading live behind it)
//! - [`MeshOverlayRenderer`] — per-item camera assembly, background-sentinel
//!   compositing, and original-beside-overlay grid layout
//! - [`RendererConfig`] — fixed camera/light/output parameters
//!
//! Intended for the evaluation/logging path of a training run, once per
//! visualization request, never inside the training hot loop.

pub mod backend;
pub mod error;
pub mod overlay;

pub use backend::{
    Device, Face, PerspectiveCamera, PointLight, RasterSettings, RenderBackend, Vertex,
};
pub use error::{RenderError, Result};
pub use overlay::{composite_over, make_grid, MeshOverlayRenderer, RendererConfig};
