//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during identification
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::IdentError;

/// Which fitted model family a diagnostic line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Fopdt,
    Arx,
}

impl ModelKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Fopdt => "FOPDT",
            ModelKind::Arx => "ARX",
        }
    }
}

/// A logged step-response test: elapsed time, duty-cycle command, and the
/// measured output, sampled at a fixed period `ts`.
///
/// Construction validates the invariants the core relies on; afterwards the
/// series is read-only for every component.
#[derive(Debug, Clone)]
pub struct StepSeries {
    /// Elapsed time in seconds, monotonically non-decreasing.
    pub time: Vec<f64>,
    /// Duty-cycle input command (0-100 %).
    pub duty: Vec<f64>,
    /// Measured output (volts for the motor-lab plant).
    pub output: Vec<f64>,
    /// Fixed sample period in seconds.
    pub ts: f64,
}

impl StepSeries {
    /// Build a validated series.
    ///
    /// Errors with `MalformedInput` on empty data, mismatched column lengths,
    /// non-finite values, non-monotone time, or a non-positive `ts`.
    pub fn new(
        time: Vec<f64>,
        duty: Vec<f64>,
        output: Vec<f64>,
        ts: f64,
    ) -> Result<Self, IdentError> {
        if time.is_empty() {
            return Err(IdentError::MalformedInput("series is empty".into()));
        }
        if time.len() != duty.len() || time.len() != output.len() {
            return Err(IdentError::MalformedInput(format!(
                "column lengths differ: time={}, duty={}, output={}",
                time.len(),
                duty.len(),
                output.len()
            )));
        }
        if !(ts.is_finite() && ts > 0.0) {
            return Err(IdentError::MalformedInput(format!(
                "sample period Ts must be finite and positive, got {ts}"
            )));
        }
        for (name, col) in [("time", &time), ("duty", &duty), ("output", &output)] {
            if let Some(i) = col.iter().position(|v| !v.is_finite()) {
                return Err(IdentError::MalformedInput(format!(
                    "non-finite value in '{name}' column at sample {i}"
                )));
            }
        }
        if let Some(i) = time.windows(2).position(|w| w[1] < w[0]) {
            return Err(IdentError::MalformedInput(format!(
                "time must be monotonically non-decreasing (violation at sample {})",
                i + 1
            )));
        }

        Ok(Self {
            time,
            duty,
            output,
            ts,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// A contiguous half-open index range `[start, end)` of constant duty.
///
/// The means are computed over the second half of the range only; samples
/// before the midpoint are discarded as settling transient.
#[derive(Debug, Clone, PartialEq)]
pub struct Plateau {
    pub start: usize,
    pub end: usize,
    /// Mean duty command over `[start + (end-start)/2, end)`.
    pub duty_mean: f64,
    /// Mean measured output over the same window.
    pub output_mean: f64,
}

impl Plateau {
    /// Number of samples in the plateau.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// First-order model `G(s) = K / (tau*s + 1)` plus a bias offset `C`.
///
/// Dead time is fixed at zero: for this plant the transport delay is
/// negligible and absorbed into the first-order dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FopdtModel {
    /// Static gain (steady-state output change per unit duty change).
    pub k: f64,
    /// Bias offset (dead-zone / standing output at zero duty).
    pub c: f64,
    /// Time constant in seconds.
    pub tau: f64,
    /// Sample period in seconds.
    pub ts: f64,
}

/// Discrete ARX model `y[k] = a*y[k-1] + b*u[k-1] + d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArxModel {
    /// Output-lag coefficient.
    pub a: f64,
    /// Input-lag coefficient.
    pub b: f64,
    /// Constant/bias term.
    pub d: f64,
}

/// Static gain and bias derived from plateau steady-state analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteadyState {
    pub k: f64,
    pub c: f64,
}

/// Fit quality diagnostics for one simulated trace against the measured output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    /// Normalized fit percentage: 100 is exact, 0 matches the constant-mean
    /// predictor, negative is worse than that baseline.
    pub fit_percent: f64,
    pub n: usize,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct IdentConfig {
    pub csv_path: PathBuf,
    /// Fixed sample period in seconds.
    pub ts: f64,

    /// CSV header of the elapsed-time column.
    pub time_col: String,
    /// CSV header of the duty-cycle column.
    pub duty_col: String,
    /// CSV header of the measured-output column.
    pub output_col: String,

    /// Tau search bounds (seconds) and grid resolution.
    pub tau_min: f64,
    pub tau_max: f64,
    pub tau_steps: usize,
    /// Initial tau guess; a boundary result must beat its residual.
    pub tau_init: f64,

    /// Minimum |duty delta| between adjacent plateaus for a usable gain pair.
    pub duty_eps: f64,

    /// Floor the FOPDT steady-state target at zero during validation replay.
    ///
    /// The physical output cannot go negative; the flooring is never applied
    /// inside the tau fit itself.
    pub non_negative: bool,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_model: Option<PathBuf>,
}
