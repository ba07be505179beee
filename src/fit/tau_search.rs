//! Bounded time-constant fit.
//!
//! With `K` and `C` fixed by the steady-state analysis, tau is the only free
//! FOPDT parameter, so the fit is a one-dimensional bounded least-squares
//! search. We use a deterministic two-stage scheme:
//!
//! 1. coarse log-spaced grid over `[tau_min, tau_max]`, candidates evaluated
//!    in parallel, ties broken by grid index
//! 2. golden-section refinement of the bracketing interval, with a fixed
//!    iteration budget
//!
//! Why grid + golden section instead of a general nonlinear solver?
//! - It avoids local-minimum traps from a bad starting point.
//! - It is deterministic given the same inputs/flags.
//! - The objective is a single scalar, so a bracketing search converges
//!   geometrically and the budget is a hard runtime bound.

use rayon::prelude::*;

use crate::domain::{FopdtModel, StepSeries, SteadyState};
use crate::error::IdentError;
use crate::fit::score::sse;
use crate::sim::fopdt;

/// Golden ratio conjugate, the interval reduction factor per iteration.
const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Refinement interval width (seconds) required for convergence.
const REFINE_TOL: f64 = 1e-9;

/// Hard cap on golden-section iterations.
const MAX_REFINE_ITERS: usize = 80;

/// Relative distance from a bound at which a result counts as "at the bound".
const BOUND_EPS: f64 = 1e-6;

/// Tau search options (bounds in the same time unit as `Ts`).
#[derive(Debug, Clone, Copy)]
pub struct TauSearch {
    pub tau_min: f64,
    pub tau_max: f64,
    /// Coarse grid resolution.
    pub steps: usize,
    /// Initial guess; a boundary result must beat its residual.
    pub tau_init: f64,
}

impl Default for TauSearch {
    fn default() -> Self {
        Self {
            tau_min: 0.001,
            tau_max: 2.0,
            steps: 40,
            tau_init: 0.1,
        }
    }
}

/// Fit tau by minimizing the SSE between the simulated FOPDT response and the
/// measured output.
///
/// Errors with `MalformedInput` for an invalid search range and
/// `OptimizationFailure` when the refinement budget runs out or the minimizer
/// sits on a bound without improving on the initial guess (a boundary
/// artifact signals a pathological input, not a good fit).
pub fn fit_tau(
    steady: SteadyState,
    series: &StepSeries,
    opts: &TauSearch,
) -> Result<f64, IdentError> {
    let grid = log_space(opts.tau_min, opts.tau_max, opts.steps)?;
    let seed = series.output[0];

    let objective = |tau: f64| -> f64 {
        let model = FopdtModel {
            k: steady.k,
            c: steady.c,
            tau,
            ts: series.ts,
        };
        // tau comes from a validated positive range, so simulate cannot fail;
        // non-finite SSE still disqualifies the candidate.
        match fopdt::simulate(&model, &series.duty, seed, false) {
            Ok(trace) => {
                let e = sse(&series.output, &trace);
                if e.is_finite() { e } else { f64::INFINITY }
            }
            Err(_) => f64::INFINITY,
        }
    };

    // Stage 1: coarse grid, evaluated in parallel. Deterministic selection:
    // minimum SSE, ties broken by the lower grid index.
    let scores: Vec<f64> = grid.par_iter().map(|&tau| objective(tau)).collect();
    let mut best_idx = 0;
    for (i, &e) in scores.iter().enumerate() {
        if e < scores[best_idx] {
            best_idx = i;
        }
    }
    if !scores[best_idx].is_finite() {
        return Err(IdentError::OptimizationFailure(
            "every tau candidate produced a non-finite residual".into(),
        ));
    }

    // Stage 2: golden-section refinement of the bracketing interval.
    let mut a = grid[best_idx.saturating_sub(1)];
    let mut b = grid[(best_idx + 1).min(grid.len() - 1)];

    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = objective(c);
    let mut fd = objective(d);

    let mut iters = 0;
    while (b - a) > REFINE_TOL && iters < MAX_REFINE_ITERS {
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = objective(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = objective(d);
        }
        iters += 1;
    }
    if (b - a) > REFINE_TOL {
        return Err(IdentError::OptimizationFailure(format!(
            "tau refinement did not converge within {MAX_REFINE_ITERS} iterations \
             (interval width {:.3e})",
            b - a
        )));
    }

    let tau = 0.5 * (a + b);

    // Boundary guardrail: accept a tau at the very edge of the search range
    // only if it actually beats the initial guess.
    let span = opts.tau_max - opts.tau_min;
    let at_bound =
        (tau - opts.tau_min) <= BOUND_EPS * span || (opts.tau_max - tau) <= BOUND_EPS * span;
    if at_bound {
        let init = opts.tau_init.clamp(opts.tau_min, opts.tau_max);
        if objective(tau) >= objective(init) {
            return Err(IdentError::OptimizationFailure(format!(
                "tau collapsed to the search bound ({tau:.6} s) without improving on \
                 the initial guess ({init:.3} s)"
            )));
        }
    }

    Ok(tau)
}

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, IdentError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(IdentError::MalformedInput(format!(
            "invalid tau range: min={min}, max={max} (must be finite, >0, and max>min)"
        )));
    }
    if steps < 2 {
        return Err(IdentError::MalformedInput(
            "tau grid needs at least 2 steps".into(),
        ));
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    Ok(out)
}
