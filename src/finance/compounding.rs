//! Monthly compounding of an account balance with level contributions

use serde::{Deserialize, Serialize};

/// Number of compounding periods in a projection year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Balance of an account (or a group of accounts) at the end of a projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyBalance {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Attained age at the end of the year.
    /// Left at 0 until the plan engine fills it in from the member's current age.
    pub age: u32,

    /// End-of-year balance in future dollars
    pub nominal_balance: f64,

    /// End-of-year balance in today's dollars.
    /// Equal to `nominal_balance` until the plan engine discounts it.
    pub real_balance: f64,

    /// Contributions deposited during this year only
    pub contributions: f64,

    /// Investment growth earned during this year only
    pub growth: f64,
}

impl YearlyBalance {
    /// An all-zero record for the given year
    pub fn empty(year: u32) -> Self {
        Self {
            year,
            age: 0,
            nominal_balance: 0.0,
            real_balance: 0.0,
            contributions: 0.0,
            growth: 0.0,
        }
    }
}

/// Project a balance forward month by month for `years` years.
///
/// Each month the contribution is deposited first and then the whole balance
/// earns `annual_return / 12`, so a deposit earns growth in the month it lands.
/// `contributions` and `growth` reset every year; `nominal_balance` carries over.
pub fn compound_monthly(
    balance: f64,
    monthly_contribution: f64,
    annual_return: f64,
    years: u32,
) -> Vec<YearlyBalance> {
    let monthly_return = annual_return / MONTHS_PER_YEAR as f64;
    let mut current = balance;
    let mut results = Vec::with_capacity(years as usize);

    for year in 1..=years {
        let mut contributions = 0.0;
        let mut growth = 0.0;

        for _month in 0..MONTHS_PER_YEAR {
            current += monthly_contribution;
            contributions += monthly_contribution;

            let month_growth = current * monthly_return;
            current += month_growth;
            growth += month_growth;
        }

        results.push(YearlyBalance {
            year,
            age: 0,
            nominal_balance: current,
            real_balance: current,
            contributions,
            growth,
        });
    }

    results
}
