//! ARX least-squares estimation.
//!
//! The discrete model `y[k] = a*y[k-1] + b*u[k-1] + d` is linear in its
//! coefficients, so the whole series reduces to one regression: rows
//! `[y[k-1], u[k-1], 1]` for `k = 1..N-1` against the target `y[1..N-1]`.
//! The trailing `1` column carries the bias `d`.

use nalgebra::{DMatrix, DVector};

use crate::domain::{ArxModel, StepSeries};
use crate::error::IdentError;
use crate::math::solve_least_squares;

/// Estimate `(a, b, d)` from the full series.
///
/// Errors with `InsufficientData` if the series is too short to form a lagged
/// regression (`N < 3`) and `SingularRegression` if the regressor matrix is
/// degenerate beyond what a minimum-norm solve can recover from.
pub fn estimate(series: &StepSeries) -> Result<ArxModel, IdentError> {
    let n = series.len();
    if n < 3 {
        return Err(IdentError::InsufficientData(format!(
            "ARX lag construction needs at least 3 samples, got {n}"
        )));
    }

    let rows = n - 1;
    let mut phi = DMatrix::<f64>::zeros(rows, 3);
    let mut target = DVector::<f64>::zeros(rows);
    for k in 1..n {
        let r = k - 1;
        phi[(r, 0)] = series.output[k - 1];
        phi[(r, 1)] = series.duty[k - 1];
        phi[(r, 2)] = 1.0;
        target[r] = series.output[k];
    }

    let theta = solve_least_squares(&phi, &target).ok_or_else(|| {
        IdentError::SingularRegression(
            "ARX regressor matrix is degenerate beyond a minimum-norm solve".into(),
        )
    })?;

    Ok(ArxModel {
        a: theta[0],
        b: theta[1],
        d: theta[2],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arx;

    fn series_from(duty: Vec<f64>, output: Vec<f64>, ts: f64) -> StepSeries {
        let time: Vec<f64> = (0..duty.len()).map(|i| i as f64 * ts).collect();
        StepSeries::new(time, duty, output, ts).unwrap()
    }

    #[test]
    fn recovers_coefficients_from_noise_free_arx_data() {
        let truth = ArxModel {
            a: 0.6065,
            b: 0.01574,
            d: 0.1967,
        };
        let mut duty = vec![0.0; 200];
        duty.extend(vec![50.0; 200]);
        duty.extend(vec![80.0; 200]);
        let output = arx::simulate(&truth, &duty, 0.5);
        let series = series_from(duty, output, 0.01);

        let est = estimate(&series).unwrap();
        assert!((est.a - truth.a).abs() < 1e-6, "a = {}", est.a);
        assert!((est.b - truth.b).abs() < 1e-6, "b = {}", est.b);
        assert!((est.d - truth.d).abs() < 1e-6, "d = {}", est.d);
    }

    #[test]
    fn short_series_is_insufficient() {
        let series = series_from(vec![0.0, 50.0], vec![0.5, 0.6], 0.01);
        let err = estimate(&series).unwrap_err();
        assert!(matches!(err, IdentError::InsufficientData(_)));
    }

    #[test]
    fn minimum_norm_handles_a_flat_log() {
        // Constant duty and constant output: the duty column is a multiple of
        // the intercept column (rank 2 of 3). The system is still consistent,
        // so the minimum-norm solution reproduces the flat trace exactly.
        let series = series_from(vec![50.0; 10], vec![2.5; 10], 0.01);
        let est = estimate(&series).unwrap();
        let replay = arx::simulate(&est, &series.duty, series.output[0]);
        for (y, r) in series.output.iter().zip(replay.iter()) {
            assert!((y - r).abs() < 1e-8);
        }
    }

    #[test]
    fn three_samples_are_enough_to_solve() {
        // Two regression rows and three unknowns: underdetermined but
        // consistent, resolved by the minimum-norm solution.
        let series = series_from(vec![0.0, 50.0, 50.0], vec![0.5, 0.6, 0.7], 0.01);
        let est = estimate(&series).unwrap();
        assert!(est.a.is_finite() && est.b.is_finite() && est.d.is_finite());
    }
}
