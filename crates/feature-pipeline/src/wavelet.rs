//! Multi-Resolution Wavelet Decomposition
//!
//! Single-level discrete wavelet transform with edge-value extension,
//! iterated into cascades driven by the declarative slice tables in the
//! configuration. Coefficient conventions match the usual analysis filter
//! bank: full convolution of the extended signal, downsampled by two.

use crate::config::{WaveletBasis, WaveletCascade};
use crate::error::PipelineError;

/// sym3 low-pass decomposition filter
const SYM3_LO: [f64; 6] = [
    0.035226291882100656,
    -0.08544127388224149,
    -0.13501102001039084,
    0.4598775021193313,
    0.8068915093133388,
    0.3326705529509569,
];

/// Discrete Meyer (FIR approximation) low-pass decomposition filter
const DMEY_LO: [f64; 62] = [
    0.0,
    -1.009999956941423e-12,
    8.519459636796214e-09,
    -1.111944952595278e-08,
    -1.0798819539621958e-08,
    6.066975741351135e-08,
    -1.0866516536735883e-07,
    8.200680650386481e-08,
    1.1783004497663934e-07,
    -5.506340565252278e-07,
    1.1307947017916706e-06,
    -1.489549216497156e-06,
    7.367572885903746e-07,
    3.20544191334478e-06,
    -1.6312699734552807e-05,
    6.554305930575149e-05,
    -0.0006011502343516092,
    -0.002704672124643725,
    0.002202534100911002,
    0.006045814097323304,
    -0.006387718318497156,
    -0.011061496392513451,
    0.015270015130934803,
    0.017423434103729693,
    -0.03213079399021176,
    -0.024348745906078023,
    0.0637390243228016,
    0.030655091960824263,
    -0.13284520043622938,
    -0.035087555656258346,
    0.44459300275757724,
    0.7445855923188063,
    0.44459300275757724,
    -0.035087555656258346,
    -0.13284520043622938,
    0.030655091960824263,
    0.0637390243228016,
    -0.024348745906078023,
    -0.03213079399021176,
    0.017423434103729693,
    0.015270015130934803,
    -0.011061496392513451,
    -0.006387718318497156,
    0.006045814097323304,
    0.002202534100911002,
    -0.002704672124643725,
    -0.0006011502343516092,
    6.554305930575149e-05,
    -1.6312699734552807e-05,
    3.20544191334478e-06,
    7.367572885903746e-07,
    -1.489549216497156e-06,
    1.1307947017916706e-06,
    -5.506340565252278e-07,
    1.1783004497663934e-07,
    8.200680650386481e-08,
    -1.0866516536735883e-07,
    6.066975741351135e-08,
    -1.0798819539621958e-08,
    -1.111944952595278e-08,
    8.519459636796214e-09,
    -1.009999956941423e-12,
];

fn low_pass(basis: WaveletBasis) -> &'static [f64] {
    match basis {
        WaveletBasis::Sym3 => &SYM3_LO,
        WaveletBasis::Dmey => &DMEY_LO,
    }
}

/// High-pass filter by the quadrature mirror relation:
/// `hi[k] = (-1)^(k+1) * lo[f-1-k]`
fn high_pass(lo: &[f64]) -> Vec<f64> {
    let f = lo.len();
    (0..f)
        .map(|k| {
            let v = lo[f - 1 - k];
            if k % 2 == 0 {
                -v
            } else {
                v
            }
        })
        .collect()
}

/// Coefficient count of a single-level transform of an `n`-sample signal
pub fn dwt_len(n: usize, basis: WaveletBasis) -> usize {
    if n == 0 {
        0
    } else {
        (n + low_pass(basis).len() - 1) / 2
    }
}

/// Single-level DWT of `signal`, returning (approximation, detail)
/// coefficients. The signal is extended at both borders by replicating the
/// edge value before the full convolution.
pub fn dwt(signal: &[f64], basis: WaveletBasis) -> (Vec<f64>, Vec<f64>) {
    let n = signal.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let lo = low_pass(basis);
    let hi = high_pass(lo);
    let f = lo.len();
    let out_len = (n + f - 1) / 2;

    // Edge-replicated sample at extended index `i` over 0..n + 2(f-1)
    let ext = |i: usize| -> f64 {
        let src = i as isize - (f as isize - 1);
        signal[src.clamp(0, n as isize - 1) as usize]
    };

    let mut approx = Vec::with_capacity(out_len);
    let mut detail = Vec::with_capacity(out_len);
    for k in 0..out_len {
        let m = 2 * k + 1;
        let mut a = 0.0;
        let mut d = 0.0;
        for j in 0..f {
            let x = ext(m + j);
            a += x * lo[f - 1 - j];
            d += x * hi[f - 1 - j];
        }
        approx.push(a);
        detail.push(d);
    }
    (approx, detail)
}

/// Concatenated retained coefficients of one cascade
#[derive(Debug, Clone)]
pub struct CascadeOutput {
    pub approx: Vec<f64>,
    pub detail: Vec<f64>,
}

/// Run a cascade over `curve`: decompose, retain the per-level keep windows
/// of both coefficient sequences, and descend into the carry window of the
/// approximation.
pub fn run_cascade(
    curve: &[f64],
    cascade: &WaveletCascade,
) -> Result<CascadeOutput, PipelineError> {
    let mut approx = Vec::new();
    let mut detail = Vec::new();
    let mut input = curve.to_vec();

    for (level, plan) in cascade.levels.iter().enumerate() {
        let (ca, cd) = dwt(&input, cascade.basis);
        let keep = plan.keep.resolve(ca.len()).ok_or_else(|| {
            PipelineError::decomposition(
                "wavelet_cascade",
                format!(
                    "keep window {:?} does not fit {} coefficients at level {level}",
                    plan.keep,
                    ca.len()
                ),
            )
        })?;
        approx.extend_from_slice(&ca[keep.clone()]);
        detail.extend_from_slice(&cd[keep]);

        if level + 1 < cascade.levels.len() {
            let carry = plan.carry.resolve(ca.len()).ok_or_else(|| {
                PipelineError::decomposition(
                    "wavelet_cascade",
                    format!(
                        "carry window {:?} does not fit {} coefficients at level {level}",
                        plan.carry,
                        ca.len()
                    ),
                )
            })?;
            input = ca[carry].to_vec();
        }
    }

    Ok(CascadeOutput { approx, detail })
}

/// Retained coefficient count of a cascade for an `n`-sample curve, without
/// touching any data. Fails exactly when `run_cascade` would.
pub fn cascade_len(n: usize, cascade: &WaveletCascade) -> Result<usize, PipelineError> {
    let mut len = n;
    let mut total = 0;
    for (level, plan) in cascade.levels.iter().enumerate() {
        let out = dwt_len(len, cascade.basis);
        total += plan.keep.width(out).ok_or_else(|| {
            PipelineError::decomposition(
                "wavelet_cascade",
                format!("keep window {:?} does not fit {out} coefficients at level {level}", plan.keep),
            )
        })?;
        if level + 1 < cascade.levels.len() {
            len = plan.carry.width(out).ok_or_else(|| {
                PipelineError::decomposition(
                    "wavelet_cascade",
                    format!(
                        "carry window {:?} does not fit {out} coefficients at level {level}",
                        plan.carry
                    ),
                )
            })?;
        }
    }
    Ok(total)
}
