//! Input/output helpers.
//!
//! - step-response CSV ingest + validation (`ingest`)
//! - per-sample results export (`export`)
//! - model JSON read/write (`model`)

pub mod export;
pub mod ingest;
pub mod model;

pub use export::*;
pub use ingest::*;
pub use model::*;
