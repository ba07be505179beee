//! Formatted terminal output for identification runs.

use crate::app::pipeline::RunOutput;
use crate::domain::{IdentConfig, ModelKind, Plateau};

/// Format the per-plateau steady-state table.
pub fn format_plateau_table(plateaus: &[Plateau]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:>3} {:>14} {:>8} {:>10}\n",
        "#", "range", "duty %", "output"
    ));
    out.push_str(&format!(
        "{:->3} {:->14} {:->8} {:->10}\n",
        "", "", "", ""
    ));
    for (i, p) in plateaus.iter().enumerate() {
        out.push_str(&format!(
            "{:>3} {:>14} {:>8.1} {:>10.3}\n",
            i + 1,
            format!("[{}, {})", p.start, p.end),
            p.duty_mean,
            p.output_mean,
        ));
    }

    out
}

/// Format the full run summary (dataset stats + plateaus + fitted models +
/// diagnostics).
pub fn format_run_summary(run: &RunOutput, config: &IdentConfig) -> String {
    let mut out = String::new();

    out.push_str("=== plantid - Step-Response Identification ===\n");
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Samples: n={} | t=[{:.2}, {:.2}]s | Ts={:.4}s\n",
        run.stats.n_samples, run.stats.t_min, run.stats.t_max, run.series.ts,
    ));
    out.push_str(&format!(
        "Duty: [{:.1}, {:.1}]% | Output: [{:.3}, {:.3}]\n",
        run.stats.duty_min, run.stats.duty_max, run.stats.output_min, run.stats.output_max,
    ));

    out.push_str("\nPlateaus:\n");
    out.push_str(&format_plateau_table(&run.plateaus));

    out.push_str("\nFOPDT (continuous):\n");
    out.push_str(&format!(
        "- K = {:.5}, C = {:.5}, tau = {:.5} s (dead time ~0, absorbed)\n",
        run.fopdt.k, run.fopdt.c, run.fopdt.tau
    ));
    out.push_str(&format!(
        "- G(s) = {:.4} / ({:.4}s + 1)\n",
        run.fopdt.k, run.fopdt.tau
    ));

    out.push_str("\nARX (discrete):\n");
    out.push_str(&format!(
        "- y[k] = {:.5}*y[k-1] + {:.5}*u[k-1] + {:.5}\n",
        run.arx.a, run.arx.b, run.arx.d
    ));
    out.push_str(&format!(
        "- H(z) = {:.5} / (z - {:.5})\n",
        run.arx.b, run.arx.a
    ));

    out.push_str("\nModel diagnostics:\n");
    let fopdt_best = run.fopdt_quality.fit_percent >= run.arx_quality.fit_percent;
    for (kind, quality, chosen) in [
        (ModelKind::Fopdt, &run.fopdt_quality, fopdt_best),
        (ModelKind::Arx, &run.arx_quality, !fopdt_best),
    ] {
        let marker = if chosen { "*" } else { " " };
        out.push_str(&format!(
            "{marker} {:<6} SSE={:.5} RMSE={:.5} fit={:.1}%\n",
            kind.display_name(),
            quality.sse,
            quality.rmse,
            quality.fit_percent,
        ));
    }

    out
}

/// Terse parameter lines for `plantid models` (one key=value row per model).
pub fn format_model_lines(run: &RunOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "fopdt k={:.6} c={:.6} tau={:.6} ts={:.6} fit={:.2}\n",
        run.fopdt.k, run.fopdt.c, run.fopdt.tau, run.fopdt.ts, run.fopdt_quality.fit_percent,
    ));
    out.push_str(&format!(
        "arx a={:.6} b={:.6} d={:.6} fit={:.2}\n",
        run.arx.a, run.arx.b, run.arx.d, run.arx_quality.fit_percent,
    ));
    out
}
