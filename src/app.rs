//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the identification pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, FitArgs};
use crate::domain::IdentConfig;
use crate::error::IdentError;
use crate::io::model::ModelFile;

pub mod pipeline;

/// Entry point for the `plantid` binary.
pub fn run() -> Result<(), IdentError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args, OutputMode::Full),
        Command::Models(args) => handle_fit(args, OutputMode::ModelsOnly),
        Command::Plateaus(args) => handle_plateaus(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    ModelsOnly,
}

fn handle_fit(args: FitArgs, mode: OutputMode) -> Result<(), IdentError> {
    let config = ident_config_from_args(&args);
    let run = pipeline::run_ident(&config)?;

    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::format_run_summary(&run, &config));
            if config.plot {
                let plot = crate::plot::render_trace_plot(
                    &run,
                    config.plot_width,
                    config.plot_height,
                );
                println!("{plot}");
            }
        }
        OutputMode::ModelsOnly => {
            println!("{}", crate::report::format_model_lines(&run));
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(
            path,
            &run.series,
            &run.fopdt_trace,
            &run.arx_trace,
        )?;
    }
    if let Some(path) = &config.export_model {
        let file = ModelFile {
            tool: "plantid".to_string(),
            ts: run.series.ts,
            fopdt: run.fopdt,
            fopdt_quality: run.fopdt_quality.clone(),
            arx: run.arx,
            arx_quality: run.arx_quality.clone(),
        };
        crate::io::model::write_model_json(path, &file)?;
    }

    Ok(())
}

fn handle_plateaus(args: FitArgs) -> Result<(), IdentError> {
    let config = ident_config_from_args(&args);
    let series = crate::io::ingest::load_step_series(&config)?;
    let plateaus = crate::segment::plateaus(&series);

    println!("{}", crate::report::format_plateau_table(&plateaus));
    Ok(())
}

pub fn ident_config_from_args(args: &FitArgs) -> IdentConfig {
    IdentConfig {
        csv_path: args.csv.clone(),
        ts: args.ts,
        time_col: args.time_col.clone(),
        duty_col: args.duty_col.clone(),
        output_col: args.output_col.clone(),
        tau_min: args.tau_min,
        tau_max: args.tau_max,
        tau_steps: args.tau_steps,
        tau_init: args.tau_init,
        duty_eps: args.duty_eps,
        non_negative: args.non_negative,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_model: args.export_model.clone(),
    }
}
