//! CSV ingest and validation.
//!
//! This module turns a logged step-response CSV into a validated `StepSeries`
//! that is safe to fit.
//!
//! Design goals:
//! - **Strict schema**: the three required columns must exist, every row must
//!   parse, and non-finite values are rejected (clear errors + exit code 2)
//! - **Deterministic behavior** (no hidden normalization)
//! - **Separation of concerns**: no fitting logic here
//!
//! Column headers default to the names written by the motor-lab logger
//! (`Tempo (s)`, `Duty (%)`, `Tensao (V)`) and are matched
//! case-insensitively; other loggers are handled via the `--*-col` flags.

use std::fs::File;

use crate::domain::{IdentConfig, StepSeries};
use crate::error::IdentError;

/// Summary stats about the samples actually used for fitting.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_samples: usize,
    pub t_min: f64,
    pub t_max: f64,
    pub duty_min: f64,
    pub duty_max: f64,
    pub output_min: f64,
    pub output_max: f64,
}

/// Compute summary stats over a validated series.
pub fn dataset_stats(series: &StepSeries) -> DatasetStats {
    let minmax = |col: &[f64]| {
        col.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
    };
    let (t_min, t_max) = minmax(&series.time);
    let (duty_min, duty_max) = minmax(&series.duty);
    let (output_min, output_max) = minmax(&series.output);
    DatasetStats {
        n_samples: series.len(),
        t_min,
        t_max,
        duty_min,
        duty_max,
        output_min,
        output_max,
    }
}

/// Load and validate a step-response CSV into a `StepSeries`.
pub fn load_step_series(config: &IdentConfig) -> Result<StepSeries, IdentError> {
    let file = File::open(&config.csv_path).map_err(|e| {
        IdentError::Io(format!(
            "failed to open CSV '{}': {e}",
            config.csv_path.display()
        ))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| IdentError::Io(format!("failed to read CSV headers: {e}")))?
        .clone();

    let time_idx = find_column(&headers, &config.time_col)?;
    let duty_idx = find_column(&headers, &config.duty_col)?;
    let output_idx = find_column(&headers, &config.output_col)?;

    let mut time = Vec::new();
    let mut duty = Vec::new();
    let mut output = Vec::new();

    for (i, record) in reader.records().enumerate() {
        // Data rows follow the header, so the first record is line 2.
        let line = i + 2;
        let record =
            record.map_err(|e| IdentError::Io(format!("failed to read CSV line {line}: {e}")))?;

        time.push(parse_field(&record, time_idx, &config.time_col, line)?);
        duty.push(parse_field(&record, duty_idx, &config.duty_col, line)?);
        output.push(parse_field(&record, output_idx, &config.output_col, line)?);
    }

    StepSeries::new(time, duty, output, config.ts)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, IdentError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            let available: Vec<&str> = headers.iter().collect();
            IdentError::MalformedInput(format!(
                "required column '{name}' not found; available: {available:?}"
            ))
        })
}

fn parse_field(
    record: &csv::StringRecord,
    idx: usize,
    name: &str,
    line: usize,
) -> Result<f64, IdentError> {
    let raw = record.get(idx).ok_or_else(|| {
        IdentError::MalformedInput(format!("line {line}: missing '{name}' field"))
    })?;
    let value: f64 = raw.parse().map_err(|_| {
        IdentError::MalformedInput(format!("line {line}: '{name}' value '{raw}' is not a number"))
    })?;
    if !value.is_finite() {
        return Err(IdentError::MalformedInput(format!(
            "line {line}: '{name}' value is not finite"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("plantid_ingest_{name}_{}.csv", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn config_for(path: PathBuf) -> IdentConfig {
        IdentConfig {
            csv_path: path,
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
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_results: None,
            export_model: None,
        }
    }

    #[test]
    fn loads_a_well_formed_log() {
        let path = write_temp_csv(
            "ok",
            "Tempo (s),Duty (%),Tensao (V)\n0.00,0,0.50\n0.01,0,0.50\n0.02,50,1.21\n",
        );
        let series = load_step_series(&config_for(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(series.len(), 3);
        assert_eq!(series.duty, vec![0.0, 0.0, 50.0]);
        assert!((series.output[2] - 1.21).abs() < 1e-12);

        let stats = dataset_stats(&series);
        assert_eq!(stats.n_samples, 3);
        assert!((stats.duty_max - 50.0).abs() < 1e-12);
        assert!((stats.output_min - 0.5).abs() < 1e-12);
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let path = write_temp_csv(
            "case",
            "TEMPO (S),duty (%),Tensao (v)\n0.00,0,0.50\n0.01,0,0.51\n",
        );
        let series = load_step_series(&config_for(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn missing_column_is_malformed() {
        let path = write_temp_csv("nocol", "Tempo (s),Duty (%)\n0.00,0\n");
        let err = load_step_series(&config_for(path.clone())).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, IdentError::MalformedInput(_)));
    }

    #[test]
    fn non_numeric_value_is_malformed() {
        let path = write_temp_csv(
            "nan",
            "Tempo (s),Duty (%),Tensao (V)\n0.00,0,bad\n",
        );
        let err = load_step_series(&config_for(path.clone())).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, IdentError::MalformedInput(_)));
    }

    #[test]
    fn empty_log_is_malformed() {
        let path = write_temp_csv("empty", "Tempo (s),Duty (%),Tensao (V)\n");
        let err = load_step_series(&config_for(path.clone())).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, IdentError::MalformedInput(_)));
    }

    #[test]
    fn missing_file_is_io() {
        let err = load_step_series(&config_for(PathBuf::from("/nonexistent/plantid.csv")))
            .unwrap_err();
        assert!(matches!(err, IdentError::Io(_)));
    }
}
