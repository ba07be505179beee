//! Model estimation.
//!
//! Responsibilities:
//!
//! - derive static gain and bias from plateau steady-state analysis
//! - fit the FOPDT time constant with a bounded deterministic search
//! - solve the ARX least-squares regression
//! - score simulated traces against the measured output

// No glob re-exports here: `arx::estimate` and `steady_state::estimate`
// share a name, so callers address the estimators by module path.
pub mod arx;
pub mod score;
pub mod steady_state;
pub mod tau_search;
