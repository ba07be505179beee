//! Discrete FOPDT simulation.
//!
//! The continuous model `G(s) = K / (tau*s + 1)` with bias `C` discretizes to
//! the difference equation
//!
//! ```text
//! alpha = exp(-Ts / tau)
//! y[k]  = alpha * y[k-1] + (1 - alpha) * (K * u[k-1] + C)
//! ```
//!
//! Dead time is fixed at zero (absorbed into the first-order dynamics).

use crate::domain::FopdtModel;
use crate::error::IdentError;

/// Simulate the FOPDT response to a duty signal.
///
/// `seed` is the initial output (typically the first measured sample).
/// With `non_negative` the steady-state target `K*u + C` is floored at zero:
/// the physical plant cannot drive its output negative. The flooring is a
/// validation-replay option only and must stay off while fitting tau.
///
/// Requires `tau > 0` and `ts > 0`; errors with `MalformedInput` otherwise.
pub fn simulate(
    model: &FopdtModel,
    duty: &[f64],
    seed: f64,
    non_negative: bool,
) -> Result<Vec<f64>, IdentError> {
    if !(model.tau.is_finite() && model.tau > 0.0) {
        return Err(IdentError::MalformedInput(format!(
            "FOPDT tau must be finite and positive, got {}",
            model.tau
        )));
    }
    if !(model.ts.is_finite() && model.ts > 0.0) {
        return Err(IdentError::MalformedInput(format!(
            "FOPDT Ts must be finite and positive, got {}",
            model.ts
        )));
    }

    let mut out = Vec::with_capacity(duty.len());
    if duty.is_empty() {
        return Ok(out);
    }

    let alpha = (-model.ts / model.tau).exp();
    out.push(seed);
    for k in 1..duty.len() {
        let mut target = model.k * duty[k - 1] + model.c;
        if non_negative {
            target = target.max(0.0);
        }
        out.push(alpha * out[k - 1] + (1.0 - alpha) * target);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: FopdtModel = FopdtModel {
        k: 0.04,
        c: 0.5,
        tau: 0.02,
        ts: 0.01,
    };

    #[test]
    fn rejects_non_positive_tau() {
        for tau in [0.0, -1.0, f64::NAN] {
            let m = FopdtModel { tau, ..MODEL };
            let err = simulate(&m, &[0.0, 0.0], 0.5, false).unwrap_err();
            assert!(matches!(err, IdentError::MalformedInput(_)));
        }
    }

    #[test]
    fn seed_is_the_first_sample() {
        let y = simulate(&MODEL, &[0.0, 0.0, 0.0], 1.25, false).unwrap();
        assert_eq!(y[0], 1.25);
        assert_eq!(y.len(), 3);
    }

    #[test]
    fn converges_to_steady_state_target() {
        let duty = vec![50.0; 3000];
        let y = simulate(&MODEL, &duty, 0.5, false).unwrap();
        let target = MODEL.k * 50.0 + MODEL.c;
        assert!((y.last().unwrap() - target).abs() < 1e-9);
    }

    #[test]
    fn recursion_matches_hand_calculation() {
        let y = simulate(&MODEL, &[50.0, 50.0], 0.5, false).unwrap();
        let alpha = (-MODEL.ts / MODEL.tau).exp();
        let expected = alpha * 0.5 + (1.0 - alpha) * (0.04 * 50.0 + 0.5);
        assert!((y[1] - expected).abs() < 1e-15);
    }

    #[test]
    fn simulation_is_deterministic() {
        let duty: Vec<f64> = (0..100).map(|k| if k < 50 { 0.0 } else { 80.0 }).collect();
        let a = simulate(&MODEL, &duty, 0.5, false).unwrap();
        let b = simulate(&MODEL, &duty, 0.5, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_negative_variant_floors_the_target() {
        // Negative bias drives the unclamped target below zero at 0% duty.
        let m = FopdtModel { c: -1.0, ..MODEL };
        let duty = vec![0.0; 2000];
        let clamped = simulate(&m, &duty, 0.0, true).unwrap();
        let free = simulate(&m, &duty, 0.0, false).unwrap();
        assert!((clamped.last().unwrap() - 0.0).abs() < 1e-9);
        assert!(*free.last().unwrap() < -0.9);
    }

    #[test]
    fn empty_input_yields_empty_trace() {
        let y = simulate(&MODEL, &[], 0.5, false).unwrap();
        assert!(y.is_empty());
    }
}
