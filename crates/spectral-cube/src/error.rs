//! Cube Validation Error Types

use thiserror::Error;

/// Errors during cube/mask pairing
#[derive(Debug, Clone, Error)]
pub enum CubeError {
    /// Cube and mask shapes do not match
    #[error("cube shape {cube:?} does not match mask shape {mask:?}")]
    ShapeMismatch {
        cube: (usize, usize, usize),
        mask: (usize, usize, usize),
    },

    /// Spatial extent is empty along at least one axis
    #[error("field has empty spatial extent: {rows} x {cols}")]
    EmptyField { rows: usize, cols: usize },
}
