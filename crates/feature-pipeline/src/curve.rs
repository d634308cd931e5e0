//! Spectral Curve Aggregation
//!
//! Collapses a masked cube into one value per band by reducing the valid
//! spatial pixels with a configurable statistic.

use crate::config::MergeStat;
use spectral_cube::{Cube, Mask};
use tracing::warn;

/// Per-band reducer over the unmasked pixels of a cube
#[derive(Debug, Clone, Copy)]
pub struct SpectralCurveFilter {
    merge: MergeStat,
}

impl SpectralCurveFilter {
    /// Create a filter with the given reducer
    pub fn new(merge: MergeStat) -> Self {
        Self { merge }
    }

    /// Reduce each band of `cube` over the pixels not flagged in `mask`.
    ///
    /// A band with no valid pixels reduces to 0.0; this is the documented
    /// degenerate-band fallback (a NaN here would poison every downstream
    /// transform).
    pub fn apply(&self, cube: &Cube, mask: &Mask) -> Vec<f64> {
        let bands = cube.dim().0;
        let mut curve = Vec::with_capacity(bands);

        for band in 0..bands {
            let band_view = cube.index_axis(ndarray::Axis(0), band);
            let mask_view = mask.index_axis(ndarray::Axis(0), band);

            let mut valid: Vec<f64> = band_view
                .iter()
                .zip(mask_view.iter())
                .filter(|(_, &occluded)| !occluded)
                .map(|(&v, _)| v)
                .collect();

            if valid.is_empty() {
                warn!(band, "band fully masked, curve sample zero-filled");
                curve.push(0.0);
                continue;
            }

            let value = match self.merge {
                MergeStat::Mean => valid.iter().sum::<f64>() / valid.len() as f64,
                MergeStat::Median => median(&mut valid),
            };
            curve.push(value);
        }

        curve
    }
}

/// Median of a non-empty slice; midpoint average for even lengths
fn median(values: &mut [f64]) -> f64 {
    values.sort_unstable_by(|a, b| a.total_cmp(b));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_unmasked_mean_is_exact() {
        // 2x2x2 cube, no occlusion: plain per-band spatial mean
        let cube =
            Array3::from_shape_vec((2, 2, 2), vec![1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0, 40.0])
                .unwrap();
        let mask = Array3::from_elem((2, 2, 2), false);

        let curve = SpectralCurveFilter::new(MergeStat::Mean).apply(&cube, &mask);
        assert_eq!(curve, vec![2.5, 25.0]);
    }

    #[test]
    fn test_masked_pixels_excluded() {
        let cube = Array3::from_shape_vec((1, 2, 2), vec![1.0, 100.0, 3.0, 100.0]).unwrap();
        let mut mask = Array3::from_elem((1, 2, 2), false);
        mask[[0, 0, 1]] = true;
        mask[[0, 1, 1]] = true;

        let curve = SpectralCurveFilter::new(MergeStat::Mean).apply(&cube, &mask);
        assert_eq!(curve, vec![2.0]);
    }

    #[test]
    fn test_fully_masked_band_zero_fills() {
        let cube = Array3::from_elem((2, 2, 2), 7.0);
        let mut mask = Array3::from_elem((2, 2, 2), false);
        for r in 0..2 {
            for c in 0..2 {
                mask[[0, r, c]] = true;
            }
        }

        let curve = SpectralCurveFilter::new(MergeStat::Mean).apply(&cube, &mask);
        assert_eq!(curve, vec![0.0, 7.0]);
    }

    #[test]
    fn test_median_reducer() {
        let cube = Array3::from_shape_vec((1, 1, 5), vec![5.0, 1.0, 9.0, 3.0, 7.0]).unwrap();
        let mask = Array3::from_elem((1, 1, 5), false);

        let curve = SpectralCurveFilter::new(MergeStat::Median).apply(&cube, &mask);
        assert_eq!(curve, vec![5.0]);

        let cube = Array3::from_shape_vec((1, 1, 4), vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        let mask = Array3::from_elem((1, 1, 4), false);
        let curve = SpectralCurveFilter::new(MergeStat::Median).apply(&cube, &mask);
        assert_eq!(curve, vec![2.5]);
    }
}
