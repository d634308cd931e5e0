//! Pipeline Error Types

use spectral_cube::CubeError;
use thiserror::Error;

/// Errors during feature extraction. All are deterministic functions of the
/// input data; a failure on one field aborts the whole batch.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Cube and mask are incompatible
    #[error(transparent)]
    Shape(#[from] CubeError),

    /// Every pixel of a band is masked and the zero-fill fallback is disabled
    #[error("band {band} has no valid pixels")]
    DegenerateBand { band: usize },

    /// A decomposition stage received input it cannot process
    #[error("{stage}: {detail}")]
    Decomposition { stage: &'static str, detail: String },
}

impl PipelineError {
    pub(crate) fn decomposition(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::Decomposition {
            stage,
            detail: detail.into(),
        }
    }
}
