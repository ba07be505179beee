//! Steady-state gain and bias estimation.
//!
//! With the static relation `y = K*u + C`, each pair of temporally adjacent
//! plateaus gives one incremental gain estimate `dy/du`, and each plateau
//! gives one offset estimate `y - K*u`. Averaging over all retained pairs and
//! plateaus smooths sensor noise without assuming anything about the
//! dynamics between plateaus.

use crate::domain::{Plateau, SteadyState};
use crate::error::IdentError;

/// Estimate static gain `K` and bias `C` from plateau means.
///
/// Adjacent pairs with `|duty delta| <= duty_eps` are excluded from the gain
/// average to avoid division blow-up.
///
/// Errors with `InsufficientData` if fewer than 2 plateaus exist or no pair
/// has a usable duty delta.
pub fn estimate(plateaus: &[Plateau], duty_eps: f64) -> Result<SteadyState, IdentError> {
    if plateaus.len() < 2 {
        return Err(IdentError::InsufficientData(format!(
            "gain estimation needs at least 2 plateaus, got {}",
            plateaus.len()
        )));
    }

    let mut gains = Vec::with_capacity(plateaus.len() - 1);
    for w in plateaus.windows(2) {
        let du = w[1].duty_mean - w[0].duty_mean;
        if du.abs() > duty_eps {
            gains.push((w[1].output_mean - w[0].output_mean) / du);
        }
    }
    if gains.is_empty() {
        return Err(IdentError::InsufficientData(
            "every adjacent plateau pair has a zero duty delta; no gain estimate is possible"
                .into(),
        ));
    }

    let k = gains.iter().sum::<f64>() / gains.len() as f64;
    let c = plateaus
        .iter()
        .map(|p| p.output_mean - k * p.duty_mean)
        .sum::<f64>()
        / plateaus.len() as f64;

    Ok(SteadyState { k, c })
}
