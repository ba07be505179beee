//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Two panels:
//! - output traces: measured `.`, FOPDT `*`, ARX `+` (models overlay data)
//! - duty staircase: `#`

use crate::app::pipeline::RunOutput;
use crate::domain::StepSeries;

/// Render both panels for an identification run.
pub fn render_trace_plot(run: &RunOutput, width: usize, height: usize) -> String {
    let width = width.max(20);
    let height = height.max(8);

    let mut out = String::new();

    let (y_min, y_max) = pad_range(
        range_of(&[
            run.series.output.as_slice(),
            run.fopdt_trace.as_slice(),
            run.arx_trace.as_slice(),
        ]),
        0.05,
    );
    out.push_str(&format!("Output [{y_min:.3} .. {y_max:.3}]\n"));
    let mut grid = vec![vec![' '; width]; height];
    // Draw measured first so the model traces overlay it where they agree.
    draw_series(&mut grid, &run.series.output, y_min, y_max, '.');
    draw_series(&mut grid, &run.fopdt_trace, y_min, y_max, '*');
    draw_series(&mut grid, &run.arx_trace, y_min, y_max, '+');
    push_grid(&mut out, &grid);
    push_time_axis(&mut out, &run.series, width);
    out.push_str("legend: . measured   * FOPDT   + ARX\n");

    let duty_height = (height / 3).max(4);
    let (d_min, d_max) = pad_range(range_of(&[run.series.duty.as_slice()]), 0.05);
    out.push_str(&format!("\nDuty % [{d_min:.1} .. {d_max:.1}]\n"));
    let mut duty_grid = vec![vec![' '; width]; duty_height];
    draw_series(&mut duty_grid, &run.series.duty, d_min, d_max, '#');
    push_grid(&mut out, &duty_grid);
    push_time_axis(&mut out, &run.series, width);

    out
}

fn range_of(traces: &[&[f64]]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for trace in traces {
        for &v in *trace {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    (lo, hi)
}

fn pad_range((lo, hi): (f64, f64), frac: f64) -> (f64, f64) {
    let span = hi - lo;
    if span <= 0.0 {
        // Flat trace: open up a unit band so it draws mid-grid.
        return (lo - 0.5, hi + 0.5);
    }
    (lo - span * frac, hi + span * frac)
}

fn draw_series(grid: &mut [Vec<char>], trace: &[f64], y_min: f64, y_max: f64, ch: char) {
    let height = grid.len();
    let width = grid[0].len();
    let n = trace.len();
    if n == 0 {
        return;
    }

    for (k, &v) in trace.iter().enumerate() {
        let col = if n == 1 {
            0
        } else {
            k * (width - 1) / (n - 1)
        };
        let u = (v - y_min) / (y_max - y_min);
        let row = ((1.0 - u) * (height as f64 - 1.0)).round() as isize;
        let row = row.clamp(0, height as isize - 1) as usize;
        grid[row][col] = ch;
    }
}

fn push_grid(out: &mut String, grid: &[Vec<char>]) {
    for row in grid {
        out.push('|');
        for &ch in row {
            out.push(ch);
        }
        out.push('\n');
    }
    out.push('+');
    for _ in 0..grid[0].len() {
        out.push('-');
    }
    out.push('\n');
}

fn push_time_axis(out: &mut String, series: &StepSeries, width: usize) {
    let t0 = series.time.first().copied().unwrap_or(0.0);
    let t1 = series.time.last().copied().unwrap_or(0.0);
    let left = format!(" {t0:.2}s");
    let right = format!("{t1:.2}s");
    let fill = (width + 1).saturating_sub(left.len() + right.len());
    out.push_str(&left);
    for _ in 0..fill {
        out.push(' ');
    }
    out.push_str(&right);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_ident_on_series;
    use crate::domain::{FopdtModel, IdentConfig, StepSeries};
    use crate::sim::fopdt;

    fn sample_run() -> RunOutput {
        let config = IdentConfig {
            csv_path: "lab.csv".into(),
            ts: 0.01,
            time_col: "Tempo (s)".into(),
            duty_col: "Duty (%)".into(),
            output_col: "Tensao (V)".into(),
            tau_min: 0.001,
            tau_max: 2.0,
            tau_steps: 40,
            tau_init: 0.1,
            duty_eps: 1e-9,
            non_negative: false,
            plot: true,
            plot_width: 60,
            plot_height: 15,
            export_results: None,
            export_model: None,
        };
        let mut duty = vec![0.0; 150];
        duty.extend(vec![50.0; 150]);
        let truth = FopdtModel {
            k: 0.04,
            c: 0.5,
            tau: 0.02,
            ts: 0.01,
        };
        let output = fopdt::simulate(&truth, &duty, 0.5, false).unwrap();
        let time: Vec<f64> = (0..duty.len()).map(|i| i as f64 * 0.01).collect();
        let series = StepSeries::new(time, duty, output, 0.01).unwrap();
        run_ident_on_series(&config, series).unwrap()
    }

    #[test]
    fn plot_is_deterministic_and_labeled() {
        let run = sample_run();
        let a = render_trace_plot(&run, 60, 15);
        let b = render_trace_plot(&run, 60, 15);
        assert_eq!(a, b);
        assert!(a.contains("legend: . measured"));
        assert!(a.contains("Duty %"));
        assert!(a.contains('#'));
    }

    #[test]
    fn plot_rows_match_requested_height() {
        let run = sample_run();
        let plot = render_trace_plot(&run, 60, 15);
        let trace_rows = plot.lines().filter(|l| l.starts_with('|')).count();
        // Output panel (15) + duty panel (15/3 = 5).
        assert_eq!(trace_rows, 20);
    }
}
