//! Pipeline Configuration
//!
//! Every tunable of the extraction recipe lives here: the intensity divisor,
//! the curve reducer, the singular-value rank count, and the cascading
//! wavelet slice tables. The slice tables express the per-level index
//! windows declaratively, so their dependency on the curve length is
//! explicit and testable in isolation.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Wavelet basis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveletBasis {
    /// 6-tap symlet
    Sym3,
    /// 62-tap discrete Meyer approximation
    Dmey,
}

/// End bound of a coefficient window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowEnd {
    /// Absolute index, exclusive
    At(usize),
    /// Offset back from the sequence end
    FromEnd(usize),
}

/// Half-open index window into a coefficient sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoeffWindow {
    pub start: usize,
    pub end: WindowEnd,
}

impl CoeffWindow {
    /// The whole sequence
    pub const fn full() -> Self {
        Self {
            start: 0,
            end: WindowEnd::FromEnd(0),
        }
    }

    /// Fixed absolute range `start..end`
    pub const fn fixed(start: usize, end: usize) -> Self {
        Self {
            start,
            end: WindowEnd::At(end),
        }
    }

    /// `n` samples trimmed off each end
    pub const fn trimmed(n: usize) -> Self {
        Self {
            start: n,
            end: WindowEnd::FromEnd(n),
        }
    }

    /// Concrete non-empty range for a sequence of `len` coefficients, or
    /// `None` when the window does not fit
    pub fn resolve(&self, len: usize) -> Option<Range<usize>> {
        let end = match self.end {
            WindowEnd::At(e) => e,
            WindowEnd::FromEnd(back) => len.checked_sub(back)?,
        };
        if self.start < end && end <= len {
            Some(self.start..end)
        } else {
            None
        }
    }

    /// Window width for a sequence of `len` coefficients
    pub fn width(&self, len: usize) -> Option<usize> {
        self.resolve(len).map(|r| r.len())
    }
}

/// One level of a wavelet cascade: which coefficients to retain and which
/// slice of the approximation feeds the next level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeLevel {
    /// Retained sub-range of both approximation and detail outputs
    pub keep: CoeffWindow,
    /// Approximation sub-range carried into the next level (ignored at the
    /// last level)
    pub carry: CoeffWindow,
}

/// Iterated single-level decomposition plan for one basis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveletCascade {
    pub basis: WaveletBasis,
    pub levels: Vec<CascadeLevel>,
}

impl WaveletCascade {
    /// Reference sym3 cascade: keep every coefficient, trim one sample off
    /// each end of the approximation before descending
    pub fn sym3_reference() -> Self {
        let level = CascadeLevel {
            keep: CoeffWindow::full(),
            carry: CoeffWindow::trimmed(1),
        };
        Self {
            basis: WaveletBasis::Sym3,
            levels: vec![level; 4],
        }
    }

    /// Reference dmey cascade. The windows are tuned to a 150-band curve;
    /// keep and carry coincide at every level.
    pub fn dmey_reference() -> Self {
        let windows = [(12, 92), (15, 55), (15, 35), (15, 25)];
        let levels = windows
            .iter()
            .map(|&(start, end)| CascadeLevel {
                keep: CoeffWindow::fixed(start, end),
                carry: CoeffWindow::fixed(start, end),
            })
            .collect();
        Self {
            basis: WaveletBasis::Dmey,
            levels,
        }
    }
}

/// Reducer used to collapse each band's valid pixels into one curve sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeStat {
    Mean,
    Median,
}

/// Full extraction recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Divisor applied to raw cube intensities (mean of per-field maxima
    /// over the reference sensor)
    pub normalization_divisor: f64,

    /// Per-band reducer for the spectral curve
    pub merge: MergeStat,

    /// Number of dominant singular-value ranks retained per band
    pub svd_ranks: usize,

    /// Append the wavelet detail cascades to the feature vector. The
    /// reference recipe drops them; kept as a flag because the omission is
    /// empirical, not structural.
    pub include_details: bool,

    /// Wavelet cascades, concatenated in order
    pub cascades: Vec<WaveletCascade>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            normalization_divisor: 2210.0,
            merge: MergeStat::Mean,
            svd_ranks: 5,
            include_details: false,
            cascades: vec![
                WaveletCascade::sym3_reference(),
                WaveletCascade::dmey_reference(),
            ],
        }
    }
}
