//! Normalized fit scoring.
//!
//! The fit percentage compares a simulated trace against the measured output:
//!
//! ```text
//! fit% = 100 * (1 - ||y - y_model|| / ||y - mean(y)||)
//! ```
//!
//! (Euclidean norms over the full trace.) 100 is an exact match, 0 matches
//! the constant-mean predictor, and negative values are worse than that
//! baseline. The metric is identical for both model families, which is what
//! makes the FOPDT-vs-ARX comparison meaningful.

use crate::domain::FitQuality;
use crate::error::IdentError;

/// Relative threshold below which the baseline norm counts as zero variance.
const VARIANCE_EPS: f64 = 1e-12;

/// Compute the fit percentage of `y_model` against the measured `y_real`.
///
/// Errors with `DegenerateMetric` when `y_real` is constant (the baseline
/// norm vanishes and the percentage is undefined), and `MalformedInput` on
/// empty or length-mismatched traces.
pub fn fit_percent(y_real: &[f64], y_model: &[f64]) -> Result<f64, IdentError> {
    if y_real.is_empty() {
        return Err(IdentError::MalformedInput(
            "cannot score an empty trace".into(),
        ));
    }
    if y_real.len() != y_model.len() {
        return Err(IdentError::MalformedInput(format!(
            "trace lengths differ: measured={}, model={}",
            y_real.len(),
            y_model.len()
        )));
    }

    let n = y_real.len() as f64;
    let mean = y_real.iter().sum::<f64>() / n;

    let num = y_real
        .iter()
        .zip(y_model.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt();
    let den = y_real.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>().sqrt();

    // Scale-relative zero test: a constant trace can leave rounding dust in
    // the deviations instead of an exact zero.
    let scale = y_real.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
    if den <= VARIANCE_EPS * scale {
        return Err(IdentError::DegenerateMetric(
            "measured output has zero variance; fit percentage is undefined".into(),
        ));
    }

    Ok(100.0 * (1.0 - num / den))
}

/// Sum of squared residuals between two equal-length traces.
pub fn sse(y_real: &[f64], y_model: &[f64]) -> f64 {
    y_real
        .iter()
        .zip(y_model.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum()
}

/// Full quality diagnostics (SSE, RMSE, fit percentage) for one trace.
pub fn quality(y_real: &[f64], y_model: &[f64]) -> Result<FitQuality, IdentError> {
    let fit = fit_percent(y_real, y_model)?;
    let sse = sse(y_real, y_model);
    let n = y_real.len();
    Ok(FitQuality {
        sse,
        rmse: (sse / n as f64).sqrt(),
        fit_percent: fit,
        n,
    })
}
