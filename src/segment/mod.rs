//! Staircase segmentation.
//!
//! A step-response test drives the plant with a staircase duty signal; each
//! constant-input run is one plateau. Boundaries are detected by exact
//! comparison against the previous sample: any change, however small, starts
//! a new plateau. Noisy float duty columns must be pre-quantized by the
//! caller before segmentation.

use crate::domain::{Plateau, StepSeries};

/// Sorted, deduplicated plateau boundaries over the duty signal.
///
/// The series start and end are implicit boundaries, so the returned indices
/// define half-open ranges that together partition `[0, N)`. A constant
/// signal yields `[0, N]` (one plateau).
pub fn plateau_bounds(duty: &[f64]) -> Vec<usize> {
    let n = duty.len();
    let mut bounds = Vec::with_capacity(8);
    bounds.push(0);
    for k in 1..n {
        if duty[k] != duty[k - 1] {
            bounds.push(k);
        }
    }
    bounds.push(n);
    // Only the empty-series case can duplicate (0 and N coincide).
    bounds.dedup();
    bounds
}

/// Segment a series into plateaus with second-half means.
///
/// The first half of each range is discarded as settling transient; the mean
/// duty and mean output are computed over `[start + len/2, end)`.
pub fn plateaus(series: &StepSeries) -> Vec<Plateau> {
    let bounds = plateau_bounds(&series.duty);
    let mut out = Vec::with_capacity(bounds.len().saturating_sub(1));

    for w in bounds.windows(2) {
        let (start, end) = (w[0], w[1]);
        let mid = start + (end - start) / 2;
        // end > start, so the window [mid, end) is never empty.
        let span = (end - mid) as f64;
        let duty_mean = series.duty[mid..end].iter().sum::<f64>() / span;
        let output_mean = series.output[mid..end].iter().sum::<f64>() / span;
        out.push(Plateau {
            start,
            end,
            duty_mean,
            output_mean,
        });
    }

    out
}
