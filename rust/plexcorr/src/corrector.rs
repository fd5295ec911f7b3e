use rayon::prelude::*;
use tracing::{
    debug,
    warn,
};

use crate::errors::{
    CorrectionError,
    Result,
};
use crate::models::crosstalk::CrosstalkMatrix;
use crate::models::plex_mode::{
    FactorSource,
    PlexMode,
};
use crate::solver::{
    LinearSystemSolver,
    LuSolver,
};
use crate::trace::CorrectionTrace;

/// Applies isotope-crosstalk correction to observed reporter-ion
/// intensity vectors.
///
/// Holds the crosstalk matrix for the current `(PlexMode, FactorSource)`
/// pair; the matrix is rebuilt only when `set_mode` actually changes the
/// pair, not once per spectrum. Correction itself takes `&self`, so one
/// corrector can serve many worker threads over a shared immutable matrix,
/// while `set_mode` takes `&mut self` and is thereby serialized against
/// in-flight corrections by the borrow checker.
#[derive(Debug, Clone)]
pub struct IntensityCorrector<S: LinearSystemSolver = LuSolver> {
    mode: PlexMode,
    source: FactorSource,
    matrix: Option<CrosstalkMatrix>,
    solver: S,
    rebuilds: u64,
}

impl IntensityCorrector<LuSolver> {
    /// Build a corrector for `mode`. With `PlexMode::CustomOrNone` no
    /// matrix is built and `apply_correction` fails until a real mode is
    /// set.
    pub fn new(mode: PlexMode, source: FactorSource) -> Result<Self> {
        Self::with_solver(mode, source, LuSolver)
    }
}

impl<S: LinearSystemSolver> IntensityCorrector<S> {
    /// Same as [`IntensityCorrector::new`] but with a caller-supplied
    /// solver implementation.
    pub fn with_solver(mode: PlexMode, source: FactorSource, solver: S) -> Result<Self> {
        let matrix = Self::build_matrix(mode, source)?;
        let rebuilds = matrix.is_some() as u64;
        Ok(Self {
            mode,
            source,
            matrix,
            solver,
            rebuilds,
        })
    }

    fn build_matrix(mode: PlexMode, source: FactorSource) -> Result<Option<CrosstalkMatrix>> {
        if mode == PlexMode::CustomOrNone {
            return Ok(None);
        }
        CrosstalkMatrix::build(mode, source).map(Some)
    }

    /// Switch plex mode and/or factor source. A no-op when both match the
    /// current state, so calling this once per scan is free.
    pub fn set_mode(&mut self, mode: PlexMode, source: FactorSource) -> Result<()> {
        if mode == self.mode && source == self.source {
            return Ok(());
        }
        let matrix = Self::build_matrix(mode, source)?;
        debug!(
            "switching correction mode from {} to {}",
            self.mode.display_name(),
            mode.display_name()
        );
        self.mode = mode;
        self.source = source;
        self.rebuilds += matrix.is_some() as u64;
        self.matrix = matrix;
        Ok(())
    }

    pub fn current_mode(&self) -> PlexMode {
        self.mode
    }

    pub fn factor_source(&self) -> FactorSource {
        self.source
    }

    pub fn matrix(&self) -> Option<&CrosstalkMatrix> {
        self.matrix.as_ref()
    }

    /// How many times a matrix has been built over this corrector's
    /// lifetime. Stays put across redundant `set_mode` calls.
    pub fn matrix_builds(&self) -> u64 {
        self.rebuilds
    }

    /// Correct one observed intensity vector in place.
    ///
    /// Channels whose observed intensity is <= 0 are left untouched: a
    /// channel that measured nothing is never bumped up by crosstalk from
    /// its neighbors. Negative solver outputs (an artifact of the
    /// overlapping bands) are clamped to 0.
    ///
    /// On any error the vector still holds the raw observed intensities.
    pub fn apply_correction(&self, intensities: &mut [f64]) -> Result<()> {
        self.correct_impl(intensities, false)?;
        Ok(())
    }

    /// [`IntensityCorrector::apply_correction`], additionally returning
    /// one [`CorrectionTrace`] per corrected channel.
    pub fn apply_correction_traced(&self, intensities: &mut [f64]) -> Result<Vec<CorrectionTrace>> {
        let records = self.correct_impl(intensities, true)?;
        Ok(records.unwrap_or_default())
    }

    fn correct_impl(
        &self,
        intensities: &mut [f64],
        traced: bool,
    ) -> Result<Option<Vec<CorrectionTrace>>> {
        let matrix = self
            .matrix
            .as_ref()
            .ok_or(CorrectionError::UnsupportedPlexMode { mode: self.mode })?;
        let n = matrix.n_channels();
        if intensities.len() != n {
            return Err(CorrectionError::VectorLengthMismatch {
                expected: n,
                actual: intensities.len(),
                mode: self.mode.display_name(),
            });
        }

        let corrected = self.solver.solve(matrix.matrix(), intensities)?;

        // Denominator for the percent-change trace; 0 when nothing was
        // observed at all.
        let max_observed = intensities.iter().copied().fold(0.0_f64, f64::max);
        let mut records = if traced { Some(Vec::new()) } else { None };

        for (index, corrected_value) in corrected.into_iter().enumerate() {
            let observed = intensities[index];
            if observed <= 0.0 {
                continue;
            }
            if corrected_value < 0.0 {
                warn!(
                    "clamping negative corrected intensity {} at channel {}",
                    corrected_value,
                    matrix.labels()[index]
                );
            }
            let new_value = corrected_value.max(0.0);
            intensities[index] = new_value;
            if let Some(records) = records.as_mut() {
                let pct_of_max = if max_observed > 0.0 {
                    (new_value - observed) / max_observed * 100.0
                } else {
                    0.0
                };
                records.push(CorrectionTrace {
                    index,
                    label: matrix.labels()[index],
                    observed,
                    corrected: new_value,
                    pct_of_max,
                });
            }
        }
        Ok(records)
    }

    /// Correct many spectra against the shared matrix, one rayon task per
    /// spectrum. A failing spectrum keeps its raw intensities and does not
    /// stop the batch; its error is returned in the matching slot.
    pub fn correct_batch(&self, spectra: &mut [Vec<f64>]) -> Vec<Result<()>>
    where
        S: Sync,
    {
        spectra
            .par_iter_mut()
            .map(|spectrum| {
                let outcome = self.apply_correction(spectrum);
                if let Err(e) = &outcome {
                    warn!("skipping correction for one spectrum: {}", e);
                }
                outcome
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    /// Hands back a fixed vector regardless of input.
    struct CannedSolver(Vec<f64>);

    impl LinearSystemSolver for CannedSolver {
        fn solve(&self, _matrix: &DMatrix<f64>, _observed: &[f64]) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSolver;

    impl LinearSystemSolver for FailingSolver {
        fn solve(&self, matrix: &DMatrix<f64>, _observed: &[f64]) -> Result<Vec<f64>> {
            Err(CorrectionError::SingularMatrix {
                dim: matrix.nrows(),
            })
        }
    }

    #[test]
    fn test_negative_solver_output_is_clamped_to_zero() -> Result<()> {
        let corrector = IntensityCorrector::with_solver(
            PlexMode::FourPlex,
            FactorSource::AbSciex,
            CannedSolver(vec![900.0, -3.5, 800.0, 700.0]),
        )?;
        let mut observed = vec![1000.0, 50.0, 1000.0, 1000.0];
        corrector.apply_correction(&mut observed)?;
        assert_eq!(observed, vec![900.0, 0.0, 800.0, 700.0]);
        Ok(())
    }

    #[test]
    fn test_zero_input_channels_are_never_touched() -> Result<()> {
        let corrector = IntensityCorrector::with_solver(
            PlexMode::FourPlex,
            FactorSource::AbSciex,
            CannedSolver(vec![900.0, 123.0, 800.0, 700.0]),
        )?;
        // Channel 115 measured nothing; the solver's estimate for it is
        // discarded rather than fabricated into the output.
        let mut observed = vec![1000.0, 0.0, 1000.0, 1000.0];
        corrector.apply_correction(&mut observed)?;
        assert_eq!(observed[1], 0.0);
        Ok(())
    }

    #[test]
    fn test_solver_failure_leaves_raw_intensities() -> Result<()> {
        let corrector =
            IntensityCorrector::with_solver(PlexMode::FourPlex, FactorSource::AbSciex, FailingSolver)?;
        let mut observed = vec![1000.0, 50.0, 1000.0, 1000.0];
        let err = corrector.apply_correction(&mut observed).unwrap_err();
        assert_eq!(err, CorrectionError::SingularMatrix { dim: 4 });
        assert_eq!(observed, vec![1000.0, 50.0, 1000.0, 1000.0]);
        Ok(())
    }

    #[test]
    fn test_trace_records() -> Result<()> {
        let corrector = IntensityCorrector::with_solver(
            PlexMode::FourPlex,
            FactorSource::AbSciex,
            CannedSolver(vec![900.0, 450.0, 800.0, 700.0]),
        )?;
        let mut observed = vec![1000.0, 500.0, 0.0, 800.0];
        let records = corrector.apply_correction_traced(&mut observed)?;

        // Three observed channels, so three records; the zero channel has
        // none.
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].index, 0);
        assert_eq!(records[0].label, "114");
        assert_eq!(records[0].observed, 1000.0);
        assert_eq!(records[0].corrected, 900.0);
        assert!((records[0].pct_of_max - -10.0).abs() < 1e-12);
        assert_eq!(records[1].index, 1);
        assert!((records[1].pct_of_max - -5.0).abs() < 1e-12);
        assert_eq!(records[2].index, 3);
        Ok(())
    }

    #[test]
    fn test_custom_or_none_cannot_correct() -> Result<()> {
        let corrector = IntensityCorrector::new(PlexMode::CustomOrNone, FactorSource::default())?;
        assert!(corrector.matrix().is_none());
        assert_eq!(corrector.matrix_builds(), 0);
        let err = corrector.apply_correction(&mut [1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            CorrectionError::UnsupportedPlexMode {
                mode: PlexMode::CustomOrNone
            }
        );
        Ok(())
    }

    #[test]
    fn test_set_mode_rebuilds_lazily() -> Result<()> {
        let mut corrector = IntensityCorrector::new(PlexMode::FourPlex, FactorSource::AbSciex)?;
        assert_eq!(corrector.matrix_builds(), 1);

        // Same pair: no rebuild.
        corrector.set_mode(PlexMode::FourPlex, FactorSource::AbSciex)?;
        corrector.set_mode(PlexMode::FourPlex, FactorSource::AbSciex)?;
        assert_eq!(corrector.matrix_builds(), 1);

        // New factor source for the same mode: rebuild.
        corrector.set_mode(PlexMode::FourPlex, FactorSource::BroadInstitute)?;
        assert_eq!(corrector.matrix_builds(), 2);

        // New mode: rebuild.
        corrector.set_mode(PlexMode::TenPlexTmt, FactorSource::BroadInstitute)?;
        assert_eq!(corrector.matrix_builds(), 3);
        assert_eq!(corrector.current_mode(), PlexMode::TenPlexTmt);

        // Back to no correction: matrix dropped, no build counted.
        corrector.set_mode(PlexMode::CustomOrNone, FactorSource::default())?;
        assert_eq!(corrector.matrix_builds(), 3);
        assert!(corrector.matrix().is_none());
        Ok(())
    }
}
