//! Read/write model JSON files.
//!
//! Model JSON is the "portable" representation of one identification run:
//! both fitted models, their fit quality, and the sample period. Downstream
//! controller-design scripts consume this file instead of re-running the fit.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ArxModel, FitQuality, FopdtModel};
use crate::error::IdentError;

/// A saved identification result (JSON schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    /// Sample period in seconds.
    pub ts: f64,
    pub fopdt: FopdtModel,
    pub fopdt_quality: FitQuality,
    pub arx: ArxModel,
    pub arx_quality: FitQuality,
}

/// Write a model JSON file.
pub fn write_model_json(path: &Path, file: &ModelFile) -> Result<(), IdentError> {
    let out = File::create(path).map_err(|e| {
        IdentError::Io(format!(
            "failed to create model JSON '{}': {e}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(out, file)
        .map_err(|e| IdentError::Io(format!("failed to write model JSON: {e}")))?;
    Ok(())
}

/// Read a model JSON file.
pub fn read_model_json(path: &Path) -> Result<ModelFile, IdentError> {
    let file = File::open(path).map_err(|e| {
        IdentError::Io(format!(
            "failed to open model JSON '{}': {e}",
            path.display()
        ))
    })?;
    let model: ModelFile = serde_json::from_reader(file)
        .map_err(|e| IdentError::Io(format!("invalid model JSON: {e}")))?;
    Ok(model)
}
