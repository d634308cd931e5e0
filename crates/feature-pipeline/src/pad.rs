//! Field Shape Normalization
//!
//! Wrap-around end-padding of the spatial axes to a common square size, so
//! every band hands the decomposer a matrix of equal aspect ratio.

use crate::error::PipelineError;
use ndarray::Array3;

/// Pad both spatial axes of `image` to `max(rows, cols)` with wrap-around
/// (circular) extension. The band axis is untouched; the padded region
/// repeats values from the opposite edge.
pub fn wrap_pad_square(image: &Array3<f64>) -> Result<Array3<f64>, PipelineError> {
    let (bands, rows, cols) = image.dim();
    if rows == 0 || cols == 0 {
        return Err(PipelineError::decomposition(
            "wrap_pad_square",
            format!("empty spatial extent {rows} x {cols}"),
        ));
    }

    let edge = rows.max(cols);
    let padded = Array3::from_shape_fn((bands, edge, edge), |(b, r, c)| {
        image[[b, r % rows, c % cols]]
    });
    Ok(padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_output_is_square() {
        let image = Array3::from_elem((3, 5, 9), 1.0);
        let padded = wrap_pad_square(&image).unwrap();
        assert_eq!(padded.dim(), (3, 9, 9));
    }

    #[test]
    fn test_wrap_semantics() {
        // 1x2x3 field pads rows to 3; the extra row wraps to row 0
        let image =
            Array3::from_shape_vec((1, 2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let padded = wrap_pad_square(&image).unwrap();

        assert_eq!(padded.dim(), (1, 3, 3));
        for c in 0..3 {
            assert_eq!(padded[[0, 2, c]], padded[[0, 0, c]]);
        }
        assert_eq!(padded[[0, 0, 0]], 1.0);
        assert_eq!(padded[[0, 1, 2]], 6.0);
    }

    #[test]
    fn test_square_input_unchanged() {
        let image = Array3::from_shape_fn((2, 4, 4), |(b, r, c)| (b * 16 + r * 4 + c) as f64);
        let padded = wrap_pad_square(&image).unwrap();
        assert_eq!(padded, image);
    }

    #[test]
    fn test_pad_wider_than_input_repeats() {
        // 1 row padded to 4 repeats that row cyclically
        let image = Array3::from_shape_vec((1, 1, 4), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let padded = wrap_pad_square(&image).unwrap();
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(padded[[0, r, c]], image[[0, 0, c]]);
            }
        }
    }

    #[test]
    fn test_empty_extent_rejected() {
        let image = Array3::from_elem((1, 0, 3), 0.0);
        assert!(wrap_pad_square(&image).is_err());
    }
}
