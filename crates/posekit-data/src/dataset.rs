// PoseDataset trait — unified interface for any annotation source

use crate::error::Result;

/// A single annotated training sample for human pose/shape estimation.
///
/// The image is stored flattened in `[C, H, W]` layout with values in
/// `[0, 1]` so it can be batched into tensors later. Keypoints carry a
/// trailing confidence/visibility value; sources without 3D ground truth
/// leave `keypoints_3d` empty and sources without SMPL fits set
/// `has_smpl = false` with zeroed parameters.
#[derive(Debug, Clone)]
pub struct PoseSample {
    /// Cropped input image, flattened `[C, H, W]`, values in `[0, 1]`.
    pub image: Vec<f32>,
    /// Shape of the image tensor, e.g. `[3, 224, 224]`.
    pub image_shape: [usize; 3],
    /// 2D keypoints as `(x, y, confidence)` triples in crop coordinates.
    pub keypoints_2d: Vec<[f32; 3]>,
    /// 3D keypoints as `(x, y, z, confidence)`, camera frame.
    pub keypoints_3d: Vec<[f32; 4]>,
    /// SMPL pose parameters (72 axis-angle values) when available.
    pub pose: Vec<f32>,
    /// SMPL shape coefficients (10 betas) when available.
    pub betas: Vec<f32>,
    /// Whether `pose`/`betas` carry real annotations.
    pub has_smpl: bool,
    /// Name of the source this sample came from.
    pub source: String,
}

/// An annotation source: an indexed collection of pose samples.
///
/// Implementations must be `Send + Sync` so data-loading workers can read
/// from multiple threads; after construction a source is read-only.
pub trait PoseDataset: Send + Sync {
    /// Total number of samples in the source.
    fn len(&self) -> usize;

    /// Whether the source is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve the sample at position `index`.
    ///
    /// Errors from the backing storage (file reads, decode failures) are
    /// returned unchanged; callers decide whether to skip or abort.
    fn get(&self, index: usize) -> Result<PoseSample>;

    /// Human-readable source name, e.g. `"coco"`.
    fn name(&self) -> &str;
}

/// A source backed by a `Vec<PoseSample>` held in memory.
///
/// Useful for building sources programmatically and in tests.
pub struct InMemoryDataset {
    samples: Vec<PoseSample>,
    source_name: String,
}

impl InMemoryDataset {
    /// Create an in-memory source from a vector of samples.
    pub fn new(samples: Vec<PoseSample>, name: &str) -> Self {
        Self {
            samples,
            source_name: name.to_string(),
        }
    }
}

impl PoseDataset for InMemoryDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn get(&self, index: usize) -> Result<PoseSample> {
        self.samples
            .get(index)
            .cloned()
            .ok_or_else(|| crate::error::DataError::IndexOutOfRange {
                source_name: self.source_name.clone(),
                index,
                len: self.samples.len(),
            })
    }

    fn name(&self) -> &str {
        &self.source_name
    }
}
