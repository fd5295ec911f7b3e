use nalgebra::{
    DMatrix,
    DVector,
};

use crate::errors::{
    CorrectionError,
    Result,
};

/// Solves `M * x = observed` for `x`, the estimated true per-channel
/// intensities behind an observed crosstalk-mixed vector.
///
/// Implementations must be deterministic for a fixed `(M, observed)` and
/// must fail explicitly on a singular matrix rather than return partial or
/// NaN-poisoned results. The matrices handed in here are small (<= 18x18)
/// and diagonally dominant, so a direct method is both cheap and stable.
pub trait LinearSystemSolver {
    fn solve(&self, matrix: &DMatrix<f64>, observed: &[f64]) -> Result<Vec<f64>>;
}

/// LU decomposition with partial pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuSolver;

impl LinearSystemSolver for LuSolver {
    fn solve(&self, matrix: &DMatrix<f64>, observed: &[f64]) -> Result<Vec<f64>> {
        let dim = matrix.nrows();
        let lu = matrix.clone().lu();
        let solution = lu
            .solve(&DVector::from_column_slice(observed))
            .ok_or(CorrectionError::SingularMatrix { dim })?;
        if let Some(index) = solution.iter().position(|x| !x.is_finite()) {
            return Err(CorrectionError::NonFiniteSolution { index });
        }
        Ok(solution.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solves_a_known_system() -> Result<()> {
        // M * [3, 2] = [8, 7]
        let matrix = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let x = LuSolver.solve(&matrix, &[8.0, 7.0])?;
        assert!((x[0] - 3.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_singular_matrix_is_an_error() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let err = LuSolver.solve(&matrix, &[1.0, 1.0]).unwrap_err();
        assert_eq!(err, CorrectionError::SingularMatrix { dim: 2 });
    }
}
