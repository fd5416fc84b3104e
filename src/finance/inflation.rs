//! Inflation discounting between nominal and real dollars

/// Convert a future-dollar amount into today's dollars.
///
/// `value / (1 + rate)^years`. Zero years or a zero rate return `value` unchanged.
pub fn adjust_for_inflation(value: f64, rate: f64, years: u32) -> f64 {
    value / inflation_multiplier(rate, years)
}

/// Cumulative growth factor `(1 + rate)^years`
pub fn inflation_multiplier(rate: f64, years: u32) -> f64 {
    (1.0 + rate).powi(years as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_known_value() {
        // $10,000 in 10 years at 3% inflation
        let real = adjust_for_inflation(10_000.0, 0.03, 10);
        assert_relative_eq!(real, 7_440.939, epsilon = 1e-3);
    }

    #[test]
    fn test_multiplier() {
        assert_relative_eq!(inflation_multiplier(0.02, 1), 1.02);
        assert_relative_eq!(inflation_multiplier(0.02, 2), 1.0404, epsilon = 1e-12);
        assert_eq!(inflation_multiplier(0.05, 0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_zero_years_is_identity(value in -1e9f64..1e9, rate in -0.5f64..0.5) {
            prop_assert_eq!(adjust_for_inflation(value, rate, 0), value);
        }

        #[test]
        fn prop_zero_rate_is_identity(value in -1e9f64..1e9, years in 0u32..100) {
            prop_assert_eq!(adjust_for_inflation(value, 0.0, years), value);
        }

        #[test]
        fn prop_strictly_decreasing_in_years(
            value in 1.0f64..1e9,
            rate in 0.001f64..0.2,
            years in 0u32..60,
        ) {
            let now = adjust_for_inflation(value, rate, years);
            let later = adjust_for_inflation(value, rate, years + 1);
            prop_assert!(later < now);
        }
    }
}
