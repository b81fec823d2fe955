/// All errors that can occur while producing an overlay visualization.
///
/// Failures abort the visualization call they occur in and nothing else;
/// isolating them from the surrounding training/evaluation loop is the
/// caller's job.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The batch slices disagree on length.
    #[error(
        "batch length mismatch: {vertex_sets} vertex sets, {translations} translations, {images} images"
    )]
    BatchMismatch {
        vertex_sets: usize,
        translations: usize,
        images: usize,
    },

    /// A source image does not match the configured resolution.
    #[error("image {index} is {got_w}x{got_h}, expected {expected}x{expected}")]
    ImageSize {
        index: usize,
        expected: u32,
        got_w: u32,
        got_h: u32,
    },

    /// The backend returned an image of the wrong size.
    #[error("backend produced a {got_w}x{got_h} image, expected {expected}x{expected}")]
    BackendImageSize {
        expected: u32,
        got_w: u32,
        got_h: u32,
    },

    /// Compositing needs the rendered and source images to share one size.
    #[error("composite size mismatch: rendered {rend_w}x{rend_h} vs source {src_w}x{src_h}")]
    CompositeSize {
        rend_w: u32,
        rend_h: u32,
        src_w: u32,
        src_h: u32,
    },

    /// Grid panels must all share one size.
    #[error("grid panel {index} is {got_w}x{got_h}, expected {want_w}x{want_h}")]
    PanelSize {
        index: usize,
        want_w: u32,
        want_h: u32,
        got_w: u32,
        got_h: u32,
    },

    /// Nothing to assemble.
    #[error("empty batch")]
    EmptyBatch,

    /// Failure inside the external rendering capability, passed through.
    #[error("render backend: {0}")]
    Backend(String),
}

impl RenderError {
    /// Wrap a backend-specific failure.
    pub fn backend(msg: impl Into<String>) -> Self {
        RenderError::Backend(msg.into())
    }
}

/// Convenience Result type used throughout posekit-render.
pub type Result<T> = std::result::Result<T, RenderError>;
