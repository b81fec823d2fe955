//! # posekit-data
//!
//! Dataset mixing for 3D human pose/shape estimation training.
//!
//! This crate provides:
//! - [`PoseDataset`] trait — unified interface for any annotation source
//! - [`MixedDataset`] — blends several sources with a fixed probability
//!   partition (primary / in-the-wild / tail buckets)
//! - [`MixSpec`] — the named, overridable mixing table
//! - [`SourceLoader`] — external capability that builds one source per name
//! - [`InMemoryDataset`] — programmatic in-memory source
//!
//! Batching, shuffling, and worker parallelism belong to the consuming
//! training framework; a [`MixedDataset`] is just an indexed collection
//! that is safe to read from many workers at once.

pub mod dataset;
pub mod error;
pub mod mixed;
pub mod source;

pub use dataset::{InMemoryDataset, PoseDataset, PoseSample};
pub use error::{DataError, Result};
pub use mixed::{MixSpec, MixedDataset, DEFAULT_SOURCES};
pub use source::{SourceConfig, SourceLoader};
