//! Spectral-Mode Decomposition
//!
//! Per-band singular values of the padded field, computed as eigenvalues of
//! the Gram matrix via cyclic Jacobi sweeps. Only the values are needed, so
//! no singular vectors are accumulated.

use crate::error::PipelineError;
use ndarray::{Array2, Array3, ArrayView2, Axis};

/// Convergence threshold relative to the Frobenius norm of the Gram matrix
const JACOBI_TOL: f64 = 1e-14;
const MAX_SWEEPS: usize = 64;

/// All singular values of `mat`, descending. Length is `min(rows, cols)`.
pub fn singular_values(mat: ArrayView2<f64>) -> Vec<f64> {
    let (rows, cols) = mat.dim();
    let k = rows.min(cols);
    if k == 0 {
        return Vec::new();
    }

    // Gram matrix on the smaller side keeps the Jacobi problem as small as
    // the input allows
    let gram = if cols <= rows {
        mat.t().dot(&mat)
    } else {
        mat.dot(&mat.t())
    };

    let mut eigenvalues = jacobi_eigenvalues(gram);
    eigenvalues.sort_unstable_by(|a, b| b.total_cmp(a));
    eigenvalues
        .into_iter()
        .map(|l| l.max(0.0).sqrt())
        .collect()
}

/// Eigenvalues of a symmetric matrix by cyclic Jacobi rotations
fn jacobi_eigenvalues(mut g: Array2<f64>) -> Vec<f64> {
    let n = g.nrows();
    let scale = g.iter().map(|v| v * v).sum::<f64>().sqrt();
    if scale == 0.0 {
        return vec![0.0; n];
    }

    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| g[[p, q]] * g[[p, q]])
            .sum::<f64>()
            .sqrt();
        if off <= JACOBI_TOL * scale {
            break;
        }

        for p in 0..n - 1 {
            for q in p + 1..n {
                let apq = g[[p, q]];
                if apq.abs() <= JACOBI_TOL * scale {
                    continue;
                }

                let tau = (g[[q, q]] - g[[p, p]]) / (2.0 * apq);
                let t = if tau == 0.0 {
                    1.0
                } else {
                    tau.signum() / (tau.abs() + (1.0 + tau * tau).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;

                // G <- Jᵀ G J, touching only rows/cols p and q
                for i in 0..n {
                    let gip = g[[i, p]];
                    let giq = g[[i, q]];
                    g[[i, p]] = c * gip - s * giq;
                    g[[i, q]] = s * gip + c * giq;
                }
                for i in 0..n {
                    let gpi = g[[p, i]];
                    let gqi = g[[q, i]];
                    g[[p, i]] = c * gpi - s * gqi;
                    g[[q, i]] = s * gpi + c * gqi;
                }
            }
        }
    }

    (0..n).map(|i| g[[i, i]]).collect()
}

/// Dominant per-band singular-value sequences of a padded field
#[derive(Debug, Clone)]
pub struct SingularSpectra {
    /// Rank-major: `ranks[r][band]`
    ranks: Vec<Vec<f64>>,
}

impl SingularSpectra {
    /// Decompose every band matrix of `padded` and retain the `rank_count`
    /// dominant singular values per band
    pub fn from_padded(padded: &Array3<f64>, rank_count: usize) -> Result<Self, PipelineError> {
        let bands = padded.dim().0;
        let mut ranks = vec![Vec::with_capacity(bands); rank_count];

        for band in 0..bands {
            let values = singular_values(padded.index_axis(Axis(0), band));
            if values.len() < rank_count {
                return Err(PipelineError::decomposition(
                    "singular_spectra",
                    format!(
                        "band {band} has {} singular values, {rank_count} ranks requested",
                        values.len()
                    ),
                ));
            }
            for (r, sequence) in ranks.iter_mut().enumerate() {
                sequence.push(values[r]);
            }
        }

        Ok(Self { ranks })
    }

    /// Number of retained ranks
    pub fn rank_count(&self) -> usize {
        self.ranks.len()
    }

    /// Per-band sequence for one rank
    pub fn rank(&self, r: usize) -> &[f64] {
        &self.ranks[r]
    }

    /// Stabilized dominance ratio: rank 0 over rank 1, epsilon-guarded so a
    /// zero second singular value never produces an infinity
    pub fn ratio(&self) -> Result<Vec<f64>, PipelineError> {
        if self.ranks.len() < 2 {
            return Err(PipelineError::decomposition(
                "singular_spectra",
                "dominance ratio requires at least two singular ranks",
            ));
        }
        Ok(self.ranks[0]
            .iter()
            .zip(&self.ranks[1])
            .map(|(&s0, &s1)| s0 / (s1 + f64::EPSILON))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array3};

    #[test]
    fn test_diagonal_matrix() {
        let mat = arr2(&[[3.0, 0.0, 0.0], [0.0, -5.0, 0.0], [0.0, 0.0, 1.0]]);
        let s = singular_values(mat.view());
        assert_eq!(s.len(), 3);
        assert!((s[0] - 5.0).abs() < 1e-10);
        assert!((s[1] - 3.0).abs() < 1e-10);
        assert!((s[2] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_rank_one_matrix() {
        // ones(3x3) has singular values [3, 0, 0]
        let mat = Array2::from_elem((3, 3), 1.0);
        let s = singular_values(mat.view());
        assert!((s[0] - 3.0).abs() < 1e-10);
        assert!(s[1].abs() < 1e-6);
        assert!(s[2].abs() < 1e-6);
    }

    #[test]
    fn test_known_2x2() {
        // [[1, 2], [3, 4]] has singular values ~[5.4650, 0.3660]
        let mat = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let s = singular_values(mat.view());
        assert!((s[0] - 5.464985704219043).abs() < 1e-9);
        assert!((s[1] - 0.365966190626258).abs() < 1e-9);
    }

    #[test]
    fn test_zero_matrix() {
        let mat = Array2::zeros((4, 4));
        let s = singular_values(mat.view());
        assert_eq!(s, vec![0.0; 4]);
    }

    #[test]
    fn test_spectra_ranks_and_ratio() {
        // Band 0: diag(4, 2, 1); band 1: all ones (rank 1)
        let mut padded = Array3::zeros((2, 3, 3));
        padded[[0, 0, 0]] = 4.0;
        padded[[0, 1, 1]] = 2.0;
        padded[[0, 2, 2]] = 1.0;
        for r in 0..3 {
            for c in 0..3 {
                padded[[1, r, c]] = 1.0;
            }
        }

        let spectra = SingularSpectra::from_padded(&padded, 3).unwrap();
        assert_eq!(spectra.rank_count(), 3);
        assert!((spectra.rank(0)[0] - 4.0).abs() < 1e-10);
        assert!((spectra.rank(1)[0] - 2.0).abs() < 1e-10);
        assert!((spectra.rank(0)[1] - 3.0).abs() < 1e-10);

        // Band 1 has s1 == 0; the ratio must stay finite
        let ratio = spectra.ratio().unwrap();
        assert!(ratio.iter().all(|v| v.is_finite()));
        assert!((ratio[0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_ranks_rejected() {
        let padded = Array3::zeros((1, 3, 3));
        assert!(SingularSpectra::from_padded(&padded, 5).is_err());
    }
}
