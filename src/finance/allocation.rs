//! Blended return across an asset allocation

use serde::{Deserialize, Serialize};

/// One slice of a portfolio allocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    /// Relative weight of this slice. Weights need not sum to 100.
    pub percentage: f64,

    /// Expected annual return of this slice
    pub expected: f64,
}

/// Percentage-weighted average of the expected returns.
///
/// Returns 0.0 when the total weight is zero or negative.
pub fn weighted_return(allocations: &[Allocation]) -> f64 {
    let total: f64 = allocations.iter().map(|a| a.percentage).sum();
    if total <= 0.0 {
        return 0.0;
    }

    let weighted: f64 = allocations.iter().map(|a| a.expected * a.percentage).sum();
    weighted / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_blend() {
        // 60/40 stocks/bonds
        let mix = [
            Allocation { percentage: 60.0, expected: 0.08 },
            Allocation { percentage: 40.0, expected: 0.03 },
        ];
        assert_relative_eq!(weighted_return(&mix), 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_weights_are_relative() {
        let as_percent = [
            Allocation { percentage: 70.0, expected: 0.07 },
            Allocation { percentage: 30.0, expected: 0.02 },
        ];
        let as_fraction = [
            Allocation { percentage: 0.7, expected: 0.07 },
            Allocation { percentage: 0.3, expected: 0.02 },
        ];
        assert_relative_eq!(
            weighted_return(&as_percent),
            weighted_return(&as_fraction),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_weight_returns_zero() {
        assert_eq!(weighted_return(&[]), 0.0);
        let zeroed = [Allocation { percentage: 0.0, expected: 0.09 }];
        assert_eq!(weighted_return(&zeroed), 0.0);
    }
}
