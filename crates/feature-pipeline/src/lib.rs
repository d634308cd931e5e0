//! Soil Feature Extraction Pipeline
//!
//! Converts a variable-sized, masked hyperspectral cube into a fixed-length
//! feature vector for tabular soil-property regression. The recipe: mask and
//! normalize, aggregate a per-band spectral curve, wrap-pad the field square,
//! decompose each band matrix into singular values, cascade two wavelet bases
//! over the curve, differentiate, Fourier-transform, and concatenate.

mod config;
mod curve;
mod error;
mod gradient;
mod pad;
mod pipeline;
mod spectrum;
mod svd;
mod wavelet;

pub use config::{
    CascadeLevel, CoeffWindow, MergeStat, PipelineConfig, WaveletBasis, WaveletCascade,
    WindowEnd,
};
pub use curve::SpectralCurveFilter;
pub use error::PipelineError;
pub use gradient::gradient;
pub use pad::wrap_pad_square;
pub use pipeline::{BatchFeatures, FeaturePipeline, FieldFeatures};
pub use spectrum::SpectrumAnalyzer;
pub use svd::{singular_values, SingularSpectra};
pub use wavelet::{cascade_len, dwt, dwt_len, run_cascade, CascadeOutput};
