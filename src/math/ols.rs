//! Least squares solver for the ARX regression.
//!
//! The ARX estimate is an ordinary least squares problem:
//!
//! ```text
//! minimize ||Phi * theta - Y||^2
//! ```
//!
//! Implementation choices:
//! - We use SVD, which handles tall systems and returns the minimum-norm
//!   solution when the regressor matrix is rank-deficient. Rank deficiency is
//!   a real scenario here: a test log where the duty command never moves makes
//!   the `u[k-1]` column a multiple of the intercept column.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - The parameter dimension is tiny (3 columns), so SVD cost is negligible
//!   next to the simulation passes.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser singular-value tolerances if the strict solve
    // fails; near-collinear regressor columns (slowly moving outputs against a
    // constant duty) otherwise reject solvable systems.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(theta) = svd.solve(y, tol) {
            if theta.iter().all(|v| v.is_finite()) {
                return Some(theta);
            }
        }
    }

    None
}
