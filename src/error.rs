//! Crate-wide error type.
//!
//! Every estimator-level failure surfaces immediately to the caller; nothing in
//! the core substitutes a default parameter or swallows a numeric problem.
//! The simulators never fail for validated models, so all failure modes live
//! in the estimation and I/O stages where they are detectable and reportable.

use thiserror::Error;

/// Identification pipeline errors.
#[derive(Debug, Clone, Error)]
pub enum IdentError {
    /// Series missing required columns, non-finite values, empty data, or an
    /// invalid configuration value (bad Ts, bad tau range, negative tau).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Fewer than 2 usable plateaus for gain estimation, or a series too
    /// short for ARX lag construction.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// The bounded tau search ran out of iterations, or collapsed to a bound
    /// without improving on the initial guess.
    #[error("optimization failure: {0}")]
    OptimizationFailure(String),

    /// The ARX regressor matrix is degenerate beyond what a minimum-norm
    /// solve can recover from.
    #[error("singular regression: {0}")]
    SingularRegression(String),

    /// The ground-truth trace has zero variance, so the fit percentage is
    /// undefined.
    #[error("degenerate metric: {0}")]
    DegenerateMetric(String),

    /// File-level read/write failure (CSV logs, exports).
    #[error("{0}")]
    Io(String),
}

impl IdentError {
    /// Process exit code for the `plantid` binary.
    ///
    /// 2 = input/config problems, 3 = not enough data to estimate,
    /// 4 = numeric/fit failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            IdentError::MalformedInput(_) | IdentError::Io(_) => 2,
            IdentError::InsufficientData(_) => 3,
            IdentError::OptimizationFailure(_)
            | IdentError::SingularRegression(_)
            | IdentError::DegenerateMetric(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_group_by_failure_stage() {
        assert_eq!(IdentError::MalformedInput("x".into()).exit_code(), 2);
        assert_eq!(IdentError::Io("x".into()).exit_code(), 2);
        assert_eq!(IdentError::InsufficientData("x".into()).exit_code(), 3);
        assert_eq!(IdentError::OptimizationFailure("x".into()).exit_code(), 4);
        assert_eq!(IdentError::SingularRegression("x".into()).exit_code(), 4);
        assert_eq!(IdentError::DegenerateMetric("x".into()).exit_code(), 4);
    }
}
