//! Discrete ARX simulation.
//!
//! `y[k] = a * y[k-1] + b * u[k-1] + d`, seeded with the first measured
//! sample. O(N), never fails for finite parameters.

use crate::domain::ArxModel;

/// Simulate the ARX response to a duty signal.
pub fn simulate(model: &ArxModel, duty: &[f64], seed: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(duty.len());
    if duty.is_empty() {
        return out;
    }

    out.push(seed);
    for k in 1..duty.len() {
        out.push(model.a * out[k - 1] + model.b * duty[k - 1] + model.d);
    }

    out
}
