use crate::errors::{
    CorrectionError,
    Result,
};

/// The five percentages must sum to 100 within this tolerance.
pub const SUM_TOLERANCE: f64 = 0.05;

/// How one channel's true signal spreads into itself and its -2/-1/+1/+2 Da
/// neighbors, as percentages of the true signal.
///
/// Immutable once constructed; the only constructor is the validated
/// [`IsotopeContribution::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsotopeContribution {
    minus2: f64,
    minus1: f64,
    zero: f64,
    plus1: f64,
    plus2: f64,
}

impl IsotopeContribution {
    /// Validate a purity row from a reagent certificate.
    ///
    /// Most call sites omit the dominant monoisotopic percentage and pass 0
    /// for `zero`; it is then derived as `100 - (sum of the other four)`.
    /// The same derivation kicks in for a negative `zero`, and for the
    /// degenerate `zero == 100` with non-zero neighbors.
    ///
    /// Example:
    /// ```
    /// use plexcorr::IsotopeContribution;
    ///
    /// let c = IsotopeContribution::new(0.0, 0.9, 0.0, 4.5, 0.0).unwrap();
    /// assert!((c.zero() - 94.6).abs() < 1e-9);
    /// ```
    pub fn new(minus2: f64, minus1: f64, zero: f64, plus1: f64, plus2: f64) -> Result<Self> {
        let neighbors = minus2 + minus1 + plus1 + plus2;
        let zero = if zero < 1e-9 || (neighbors > 0.0 && (zero - 100.0).abs() < 1e-9) {
            100.0 - neighbors
        } else {
            zero
        };

        let sum = neighbors + zero;
        if (100.0 - sum).abs() > SUM_TOLERANCE {
            return Err(CorrectionError::IsotopeSumMismatch { sum });
        }

        Ok(Self {
            minus2,
            minus1,
            zero,
            plus1,
            plus2,
        })
    }

    pub fn minus2(&self) -> f64 {
        self.minus2
    }

    pub fn minus1(&self) -> f64 {
        self.minus1
    }

    pub fn zero(&self) -> f64 {
        self.zero
    }

    pub fn plus1(&self) -> f64 {
        self.plus1
    }

    pub fn plus2(&self) -> f64 {
        self.plus2
    }

    /// The five (Dalton offset, percentage) pairs, in ascending offset order.
    pub fn spread(&self) -> [(i32, f64); 5] {
        [
            (-2, self.minus2),
            (-1, self.minus1),
            (0, self.zero),
            (1, self.plus1),
            (2, self.plus2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_zero_is_kept() -> Result<()> {
        let c = IsotopeContribution::new(0.0, 1.0, 92.9, 5.9, 0.2)?;
        assert_eq!(c.zero(), 92.9);
        let sum: f64 = c.spread().iter().map(|(_, pct)| pct).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_omitted_zero_is_derived() -> Result<()> {
        let c = IsotopeContribution::new(0.0, 0.9, 0.0, 4.5, 0.0)?;
        assert!((c.zero() - 94.6).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_negative_zero_is_derived() -> Result<()> {
        let c = IsotopeContribution::new(0.0, 2.0, -5.0, 3.0, 0.0)?;
        assert!((c.zero() - 95.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_full_zero_with_neighbors_is_derived() -> Result<()> {
        // 100 in the monoisotopic slot alongside non-zero neighbors would
        // sum past 100; the derivation replaces it instead.
        let c = IsotopeContribution::new(0.0, 1.0, 100.0, 4.0, 0.0)?;
        assert!((c.zero() - 95.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_sum_mismatch_is_rejected() {
        let err = IsotopeContribution::new(10.0, 10.0, 50.0, 10.0, 10.0).unwrap_err();
        match err {
            CorrectionError::IsotopeSumMismatch { sum } => assert_eq!(sum, 90.0),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_sum_within_tolerance_is_accepted() -> Result<()> {
        let c = IsotopeContribution::new(0.0, 1.0, 92.94, 5.9, 0.2)?;
        assert_eq!(c.zero(), 92.94);
        Ok(())
    }
}
