use nalgebra::DMatrix;
use tracing::debug;

use crate::errors::{
    CorrectionError,
    Result,
};
use crate::models::contribution::IsotopeContribution;
use crate::models::plex_mode::{
    FactorSource,
    PlexMode,
};
use crate::models::tables;

/// The `n x n` mixing matrix for one `(PlexMode, FactorSource)` pair.
///
/// Entry `(row, col)` is the fraction of channel `col`'s true intensity
/// that is observed at channel `row`. Columns carry at most five non-zero
/// entries (the -2..+2 Da isotope band); offsets that land where the plex
/// has no channel are dropped at build time. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CrosstalkMatrix {
    mode: PlexMode,
    source: FactorSource,
    labels: Vec<&'static str>,
    matrix: DMatrix<f64>,
}

impl CrosstalkMatrix {
    /// Build the mixing matrix from the mode's reagent purity table.
    ///
    /// One shared placement routine serves every mode; the per-mode
    /// differences live entirely in the channel tables.
    pub fn build(mode: PlexMode, source: FactorSource) -> Result<Self> {
        let table = tables::mode_table(mode, source)
            .ok_or(CorrectionError::UnsupportedPlexMode { mode })?;
        let n = table.channels.len();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for (col, channel) in table.channels.iter().enumerate() {
            let [m2, m1, z, p1, p2] = channel.percentages;
            let contribution = IsotopeContribution::new(m2, m1, z, p1, p2)?;
            for (da_offset, share) in contribution.spread() {
                if share == 0.0 {
                    continue;
                }
                let target = channel.position + da_offset * table.da_step;
                match table.index_at(target) {
                    Some(row) => matrix[(row, col)] += share,
                    // The neighbor channel is chemically absent in this
                    // plex; that share of the signal is simply lost.
                    None => {}
                }
            }
        }
        matrix /= 100.0;

        debug!(
            "built {}x{} crosstalk matrix for {}",
            n,
            n,
            mode.display_name()
        );
        Ok(Self {
            mode,
            source,
            labels: table.channels.iter().map(|c| c.label).collect(),
            matrix,
        })
    }

    pub fn mode(&self) -> PlexMode {
        self.mode
    }

    pub fn source(&self) -> FactorSource {
        self.source
    }

    pub fn n_channels(&self) -> usize {
        self.labels.len()
    }

    /// Channel labels in matrix order (ascending nominal reporter mass).
    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Forward mixing: the observed vector `M * x` a true intensity vector
    /// `x` would produce. The inverse of what the corrector computes.
    pub fn mix(&self, true_intensities: &[f64]) -> Result<Vec<f64>> {
        let n = self.n_channels();
        if true_intensities.len() != n {
            return Err(CorrectionError::VectorLengthMismatch {
                expected: n,
                actual: true_intensities.len(),
                mode: self.mode.display_name(),
            });
        }
        let mixed = &self.matrix * nalgebra::DVector::from_column_slice(true_intensities);
        Ok(mixed.iter().copied().collect())
    }

    /// The monoisotopic share dominates every purity row, so each diagonal
    /// entry must be the largest in its row. The LU solve relies on this.
    pub fn is_diagonally_dominant(&self) -> bool {
        let n = self.n_channels();
        (0..n).all(|row| {
            let diagonal = self.matrix[(row, row)];
            (0..n).all(|col| col == row || self.matrix[(row, col)] < diagonal)
        })
    }
}

/// Build every supported `(mode, source)` pair and check its invariants.
///
/// Table literals are hardcoded, so a failure here means the crate itself
/// is wrong. Meant to run once at pipeline startup.
pub fn verify_catalog() -> Result<()> {
    for mode in PlexMode::SUPPORTED {
        for source in [FactorSource::AbSciex, FactorSource::BroadInstitute] {
            let table = tables::mode_table(mode, source)
                .ok_or(CorrectionError::UnsupportedPlexMode { mode })?;
            for channel in table.channels {
                let [m2, m1, z, p1, p2] = channel.percentages;
                let contribution = IsotopeContribution::new(m2, m1, z, p1, p2)?;
                let sum: f64 = contribution.spread().iter().map(|(_, pct)| pct).sum();
                if (sum - 100.0).abs() > crate::models::contribution::SUM_TOLERANCE {
                    return Err(CorrectionError::IsotopeSumMismatch { sum });
                }
            }

            let built = CrosstalkMatrix::build(mode, source)?;
            if !built.is_diagonally_dominant() {
                return Err(CorrectionError::custom(format!(
                    "crosstalk matrix for {} is not diagonally dominant",
                    mode.display_name()
                )));
            }
            if built.matrix().iter().any(|x| !x.is_finite() || *x < 0.0) {
                return Err(CorrectionError::custom(format!(
                    "crosstalk matrix for {} has invalid entries",
                    mode.display_name()
                )));
            }
        }
    }
    Ok(())
}
