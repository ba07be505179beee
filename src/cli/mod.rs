//! Command-line parsing for the step-response identification tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "plantid",
    version,
    about = "Step-response plant identification (FOPDT + ARX)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Identify both models from a CSV log, print diagnostics, and optionally
    /// plot/export.
    Fit(FitArgs),
    /// Print the fitted model parameters only (useful for scripting).
    Models(FitArgs),
    /// Print the plateau segmentation table without fitting.
    Plateaus(FitArgs),
}

/// Common options for every subcommand.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Step-response log CSV.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Sample period Ts in seconds.
    #[arg(long, default_value_t = 0.01)]
    pub ts: f64,

    /// Header of the elapsed-time column.
    #[arg(long, default_value = "Tempo (s)")]
    pub time_col: String,

    /// Header of the duty-cycle input column.
    #[arg(long, default_value = "Duty (%)")]
    pub duty_col: String,

    /// Header of the measured-output column.
    #[arg(long, default_value = "Tensao (V)")]
    pub output_col: String,

    /// Minimum tau (seconds) for the bounded search.
    #[arg(long, default_value_t = 0.001)]
    pub tau_min: f64,

    /// Maximum tau (seconds) for the bounded search.
    #[arg(long, default_value_t = 2.0)]
    pub tau_max: f64,

    /// Coarse tau grid steps.
    #[arg(long, default_value_t = 40)]
    pub tau_steps: usize,

    /// Initial tau guess (a boundary result must beat its residual).
    #[arg(long, default_value_t = 0.1)]
    pub tau_init: f64,

    /// Minimum |duty delta| between adjacent plateaus for a usable gain pair.
    #[arg(long, default_value_t = 1e-9)]
    pub duty_eps: f64,

    /// Floor the simulated steady-state target at zero during validation
    /// replay (the physical output cannot go negative).
    #[arg(long)]
    pub non_negative: bool,

    /// Render an ASCII plot of the traces (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-sample traces and residuals to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export fitted models (params + quality) to JSON.
    #[arg(long = "export-model")]
    pub export_model: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fit_with_defaults() {
        let cli = Cli::try_parse_from(["plantid", "fit", "log.csv"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        assert_eq!(args.csv, PathBuf::from("log.csv"));
        assert!((args.ts - 0.01).abs() < 1e-12);
        assert!((args.tau_min - 0.001).abs() < 1e-12);
        assert!((args.tau_max - 2.0).abs() < 1e-12);
        assert!(!args.non_negative);
        assert!(args.plot);
    }

    #[test]
    fn parses_custom_columns_and_exports() {
        let cli = Cli::try_parse_from([
            "plantid",
            "fit",
            "log.csv",
            "--time-col",
            "t",
            "--duty-col",
            "pwm",
            "--output-col",
            "volts",
            "--export-model",
            "model.json",
            "--no-plot",
        ])
        .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        assert_eq!(args.time_col, "t");
        assert_eq!(args.duty_col, "pwm");
        assert_eq!(args.output_col, "volts");
        assert_eq!(args.export_model, Some(PathBuf::from("model.json")));
        assert!(args.no_plot);
    }

    #[test]
    fn missing_csv_is_a_parse_error() {
        assert!(Cli::try_parse_from(["plantid", "fit"]).is_err());
    }
}
