//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated step-response log (`StepSeries`)
//! - segmentation output (`Plateau`)
//! - fitted model records (`FopdtModel`, `ArxModel`) and quality (`FitQuality`)
//! - run configuration (`IdentConfig`)

pub mod types;

pub use types::*;
