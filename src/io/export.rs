//! Export per-sample results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per sample with the measured output, both simulated
//! traces, and their residuals.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::StepSeries;
use crate::error::IdentError;

/// Write per-sample traces and residuals to a CSV file.
///
/// Both traces must have the same length as the series; the pipeline
/// guarantees this for its own outputs.
pub fn write_results_csv(
    path: &Path,
    series: &StepSeries,
    fopdt_trace: &[f64],
    arx_trace: &[f64],
) -> Result<(), IdentError> {
    if fopdt_trace.len() != series.len() || arx_trace.len() != series.len() {
        return Err(IdentError::MalformedInput(format!(
            "trace lengths differ from series: series={}, fopdt={}, arx={}",
            series.len(),
            fopdt_trace.len(),
            arx_trace.len()
        )));
    }

    let mut file = File::create(path).map_err(|e| {
        IdentError::Io(format!(
            "failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(file, "t,duty,output,y_fopdt,y_arx,resid_fopdt,resid_arx")
        .map_err(|e| IdentError::Io(format!("failed to write export CSV header: {e}")))?;

    for k in 0..series.len() {
        writeln!(
            file,
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            series.time[k],
            series.duty[k],
            series.output[k],
            fopdt_trace[k],
            arx_trace[k],
            series.output[k] - fopdt_trace[k],
            series.output[k] - arx_trace[k],
        )
        .map_err(|e| IdentError::Io(format!("failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_series() -> StepSeries {
        StepSeries::new(
            vec![0.0, 0.01, 0.02],
            vec![0.0, 50.0, 50.0],
            vec![0.5, 0.6, 0.8],
            0.01,
        )
        .unwrap()
    }

    #[test]
    fn writes_one_row_per_sample() {
        let path = std::env::temp_dir().join(format!(
            "plantid_export_{}.csv",
            std::process::id()
        ));
        let series = tiny_series();
        let trace = vec![0.5, 0.61, 0.79];
        write_results_csv(&path, &series, &trace, &trace).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("t,duty,output"));
        assert!(lines[1].starts_with("0.000000,0.000000,0.500000"));
    }

    #[test]
    fn rejects_mismatched_trace_lengths() {
        let path = std::env::temp_dir().join("plantid_export_bad.csv");
        let series = tiny_series();
        let err = write_results_csv(&path, &series, &[0.5], &[0.5, 0.6, 0.8]).unwrap_err();
        assert!(matches!(err, IdentError::MalformedInput(_)));
    }
}
