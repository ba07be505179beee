//! Shared identification pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> segmentation -> steady-state K/C -> tau fit -> ARX fit ->
//! validation replay -> scoring
//!
//! The CLI front-end then focuses on presentation (printing vs exports).

use crate::domain::{
    ArxModel, FitQuality, FopdtModel, IdentConfig, Plateau, StepSeries, SteadyState,
};
use crate::error::IdentError;
use crate::fit::tau_search::TauSearch;
use crate::io::ingest::{self, DatasetStats};
use crate::{fit, segment, sim};

/// All computed outputs of a single `plantid fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub series: StepSeries,
    pub stats: DatasetStats,
    pub plateaus: Vec<Plateau>,
    pub steady: SteadyState,
    pub fopdt: FopdtModel,
    pub arx: ArxModel,
    /// FOPDT validation replay over the full duty signal.
    pub fopdt_trace: Vec<f64>,
    /// ARX validation replay over the full duty signal.
    pub arx_trace: Vec<f64>,
    pub fopdt_quality: FitQuality,
    pub arx_quality: FitQuality,
}

/// Execute the full pipeline from a CSV log.
pub fn run_ident(config: &IdentConfig) -> Result<RunOutput, IdentError> {
    let series = ingest::load_step_series(config)?;
    run_ident_on_series(config, series)
}

/// Execute the pipeline on an already-loaded series.
///
/// This is what the end-to-end tests drive, and what callers with their own
/// data source (e.g., serial capture) would use.
pub fn run_ident_on_series(
    config: &IdentConfig,
    series: StepSeries,
) -> Result<RunOutput, IdentError> {
    let stats = ingest::dataset_stats(&series);

    // FOPDT branch: plateaus -> (K, C) -> tau.
    let plateaus = segment::plateaus(&series);
    let steady = fit::steady_state::estimate(&plateaus, config.duty_eps)?;
    let tau = fit::tau_search::fit_tau(
        steady,
        &series,
        &TauSearch {
            tau_min: config.tau_min,
            tau_max: config.tau_max,
            steps: config.tau_steps,
            tau_init: config.tau_init,
        },
    )?;
    let fopdt = FopdtModel {
        k: steady.k,
        c: steady.c,
        tau,
        ts: series.ts,
    };

    // ARX branch: independent of the plateau analysis.
    let arx = fit::arx::estimate(&series)?;

    // Validation replay and scoring. The non-negative floor applies only
    // here, never inside the tau fit.
    let seed = series.output[0];
    let fopdt_trace = sim::fopdt::simulate(&fopdt, &series.duty, seed, config.non_negative)?;
    let arx_trace = sim::arx::simulate(&arx, &series.duty, seed);

    let fopdt_quality = fit::score::quality(&series.output, &fopdt_trace)?;
    let arx_quality = fit::score::quality(&series.output, &arx_trace)?;

    Ok(RunOutput {
        series,
        stats,
        plateaus,
        steady,
        fopdt,
        arx,
        fopdt_trace,
        arx_trace,
        fopdt_quality,
        arx_quality,
    })
}
