//! `plant-id` library crate.
//!
//! The binary (`plantid`) is a thin wrapper around this library so that:
//!
//! - the identification pipeline is testable without spawning processes
//! - modules are reusable (e.g., batch scripts, future GUIs)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod segment;
pub mod sim;
