//! Feature Vector Assembly
//!
//! Drives the full per-field recipe and stacks the results into the batch
//! feature matrix. Fields are processed strictly in input order; the first
//! failing field aborts the whole batch (every error here is a deterministic
//! property of the input, so skip-and-retry would only hide bad data).

use crate::config::PipelineConfig;
use crate::curve::SpectralCurveFilter;
use crate::error::PipelineError;
use crate::gradient::gradient;
use crate::pad::wrap_pad_square;
use crate::spectrum::SpectrumAnalyzer;
use crate::svd::SingularSpectra;
use crate::wavelet::{cascade_len, run_cascade};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use spectral_cube::{Cube, FieldSample, Mask};
use tracing::debug;

/// Fixed-length feature vector for one field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldFeatures {
    /// Concatenated feature values
    pub values: Vec<f64>,
    /// Average pre-padding spatial edge, kept for performance stratification
    pub average_edge: f64,
}

/// Stacked batch output, rows in input field order
#[derive(Debug, Clone)]
pub struct BatchFeatures {
    /// One row per field
    pub matrix: Array2<f64>,
    /// Parallel average-edge scalars, same ordering
    pub average_edges: Vec<f64>,
}

/// Feature extraction pipeline
pub struct FeaturePipeline {
    config: PipelineConfig,
    filter: SpectralCurveFilter,
    spectrum: SpectrumAnalyzer,
}

impl FeaturePipeline {
    /// Create a pipeline with the given recipe
    pub fn new(config: PipelineConfig) -> Self {
        let filter = SpectralCurveFilter::new(config.merge);
        Self {
            config,
            filter,
            spectrum: SpectrumAnalyzer::new(),
        }
    }

    /// Pipeline with the reference recipe
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    /// The active recipe
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Width of the assembled vector for a given band count. Constant across
    /// all fields sharing that band count, regardless of spatial extent.
    pub fn feature_len(&self, bands: usize) -> Result<usize, PipelineError> {
        // curve + 3 derivatives + ratio + FFT re/im of curve and of s0
        let per_band = 5 + self.config.svd_ranks + 4;
        let mut total = bands * per_band;
        for cascade in &self.config.cascades {
            let retained = cascade_len(bands, cascade)?;
            total += if self.config.include_details {
                retained * 2
            } else {
                retained
            };
        }
        Ok(total)
    }

    /// Extract the feature vector for one field
    pub fn extract(&mut self, sample: &FieldSample) -> Result<FieldFeatures, PipelineError> {
        let divisor = self.config.normalization_divisor;

        // SVD branch: zeroed invalid pixels, wrap-padded square field
        let image = sample.masked_image(divisor);
        let padded = wrap_pad_square(&image)?;
        let spectra = SingularSpectra::from_padded(&padded, self.config.svd_ranks)?;
        let ratio = spectra.ratio()?;

        // Curve branch: masked aggregation of the normalized cube
        let normalized = sample.normalized(divisor);
        let curve = self.filter.apply(&normalized, sample.mask());

        let d1 = gradient(&curve);
        let d2 = gradient(&d1);
        let d3 = gradient(&d2);

        let (curve_re, curve_im) = self.spectrum.transform(&curve);
        let (s0_re, s0_im) = self.spectrum.transform(spectra.rank(0));

        let cascades = self
            .config
            .cascades
            .iter()
            .map(|cascade| run_cascade(&curve, cascade))
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = Vec::with_capacity(self.feature_len(sample.bands())?);
        values.extend_from_slice(&curve);
        values.extend_from_slice(&d1);
        values.extend_from_slice(&d2);
        values.extend_from_slice(&d3);
        values.extend_from_slice(&ratio);
        for r in 0..spectra.rank_count() {
            values.extend_from_slice(spectra.rank(r));
        }
        values.extend_from_slice(&curve_re);
        values.extend_from_slice(&curve_im);
        values.extend_from_slice(&s0_re);
        values.extend_from_slice(&s0_im);
        for out in &cascades {
            values.extend_from_slice(&out.approx);
        }
        if self.config.include_details {
            for out in &cascades {
                values.extend_from_slice(&out.detail);
            }
        }

        Ok(FieldFeatures {
            values,
            average_edge: sample.average_edge(),
        })
    }

    /// Extract the feature matrix for an ordered batch of fields
    pub fn extract_batch(
        &mut self,
        samples: &[FieldSample],
    ) -> Result<BatchFeatures, PipelineError> {
        let mut rows: Vec<f64> = Vec::new();
        let mut average_edges = Vec::with_capacity(samples.len());
        let mut width = 0;

        for (idx, sample) in samples.iter().enumerate() {
            let (spatial_rows, spatial_cols) = sample.spatial_dims();
            debug!(
                "Extracting field {}/{}: {} bands, {}x{} pixels",
                idx + 1,
                samples.len(),
                sample.bands(),
                spatial_rows,
                spatial_cols
            );

            let features = self.extract(sample)?;
            if idx == 0 {
                width = features.values.len();
            } else if features.values.len() != width {
                return Err(PipelineError::decomposition(
                    "extract_batch",
                    format!(
                        "field {idx} produced {} features, expected {width}",
                        features.values.len()
                    ),
                ));
            }
            rows.extend_from_slice(&features.values);
            average_edges.push(features.average_edge);
        }

        let matrix = Array2::from_shape_vec((samples.len(), width), rows)
            .map_err(|e| PipelineError::decomposition("extract_batch", e.to_string()))?;
        Ok(BatchFeatures {
            matrix,
            average_edges,
        })
    }

    /// Extract the feature matrix for raw `(cube, mask)` pairs as the
    /// loaders hand them over, validating each pairing first
    pub fn extract_pairs(
        &mut self,
        pairs: Vec<(Cube, Mask)>,
    ) -> Result<BatchFeatures, PipelineError> {
        let samples = pairs
            .into_iter()
            .map(|(cube, mask)| FieldSample::new(cube, mask))
            .collect::<Result<Vec<_>, _>>()?;
        self.extract_batch(&samples)
    }
}
