//! Errors for the sampling operations.
//!
//! Two classes exist:
//! - invalid-argument errors, raised before any random draw is consumed
//!   (empty inputs, non-positive parameters, out-of-range floor);
//! - internal errors, raised mid-draw (rejection budget exhausted,
//!   degenerate Gamma normalizer).
//!
//! `is_invalid_argument` distinguishes the two, so callers can decide
//! whether a retry could ever help (it can only for the internal class).

/// Errors for Gamma/Dirichlet/categorical sampling.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// The input had no categories (empty weights/counts/alphas, or k == 0).
    EmptyDomain,
    /// Gamma shape parameter is not finite or not > 0.
    InvalidShape(f64),
    /// Gamma rate parameter is not finite or not > 0.
    InvalidRate(f64),
    /// A Dirichlet concentration entry (or smoothing pseudocount) is not
    /// finite or not > 0.
    InvalidConcentration(f64),
    /// Categorical weights sum to a non-finite or non-positive total.
    InvalidWeightSum(f64),
    /// The pruning floor lies outside [0, 1).
    InvalidFloor(f64),
    /// Every Gamma draw of a Dirichlet sample underflowed to zero, so the
    /// normalizer is 0 (possible when all concentrations are extremely small).
    DegenerateGammaSum,
    /// An acceptance-rejection loop exceeded its iteration budget.
    RejectionBudgetExhausted,
}

impl SampleError {
    /// True for errors caused by the caller's arguments; false for the
    /// internal sampling failures (`DegenerateGammaSum`,
    /// `RejectionBudgetExhausted`).
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(
            self,
            Self::DegenerateGammaSum | Self::RejectionBudgetExhausted
        )
    }
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDomain => write!(f, "input must contain at least one category"),
            Self::InvalidShape(a) => write!(f, "shape must be finite and > 0 (got {a})"),
            Self::InvalidRate(l) => write!(f, "rate must be finite and > 0 (got {l})"),
            Self::InvalidConcentration(a) => {
                write!(f, "concentration must be finite and > 0 (got {a})")
            }
            Self::InvalidWeightSum(t) => {
                write!(f, "weights must sum to a finite total > 0 (got {t})")
            }
            Self::InvalidFloor(x) => write!(f, "floor must lie in [0, 1) (got {x})"),
            Self::DegenerateGammaSum => {
                write!(f, "all Gamma draws underflowed to zero; cannot normalize")
            }
            Self::RejectionBudgetExhausted => {
                write!(f, "rejection sampling exceeded its iteration budget")
            }
        }
    }
}

impl std::error::Error for SampleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_argument_errors() {
        assert!(SampleError::EmptyDomain.is_invalid_argument());
        assert!(SampleError::InvalidShape(0.0).is_invalid_argument());
        assert!(SampleError::InvalidFloor(1.5).is_invalid_argument());
        assert!(!SampleError::DegenerateGammaSum.is_invalid_argument());
        assert!(!SampleError::RejectionBudgetExhausted.is_invalid_argument());
    }

    #[test]
    fn display_includes_offending_value() {
        let msg = SampleError::InvalidShape(-2.0).to_string();
        assert!(msg.contains("-2"), "message was {msg:?}");
    }
}
