// SourceLoader — external capability that materializes one annotation source

use std::path::PathBuf;

use crate::dataset::PoseDataset;
use crate::error::Result;

/// Per-run options handed to the loader for every source it builds.
///
/// The loader decides how to interpret these for each source; the storage
/// format behind a source name is its concern, not this crate's.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Root directory holding the preprocessed annotation files.
    pub data_root: PathBuf,
    /// Square crop resolution fed to the network.
    pub img_res: u32,
    /// Whether sources should apply train-time augmentation.
    pub augment: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            img_res: 224,
            augment: true,
        }
    }
}

impl SourceConfig {
    pub fn data_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.data_root = root.into();
        self
    }

    pub fn img_res(mut self, res: u32) -> Self {
        self.img_res = res;
        self
    }

    pub fn augment(mut self, a: bool) -> Self {
        self.augment = a;
        self
    }
}

/// Builds one [`PoseDataset`] per source name.
///
/// Loading failures (missing files, unknown names) are fatal for dataset
/// construction; there is no retry, this runs once at startup.
pub trait SourceLoader: Send + Sync {
    fn load(&self, config: &SourceConfig, name: &str) -> Result<Box<dyn PoseDataset>>;
}
