//! Frequency-Domain Extraction

use rustfft::{num_complex::Complex, FftPlanner};

/// Forward DFT wrapper that keeps a planner alive across fields
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f64>,
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectrumAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Unnormalized forward DFT of a real signal, returned as separate real
    /// and imaginary sequences of the input length
    pub fn transform(&mut self, signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let n = signal.len();
        if n == 0 {
            return (Vec::new(), Vec::new());
        }

        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let real = buffer.iter().map(|c| c.re).collect();
        let imag = buffer.iter().map(|c| c.im).collect();
        (real, imag)
    }
}
