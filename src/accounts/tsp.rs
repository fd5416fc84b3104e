//! Thrift Savings Plan projection with Blended Retirement System matching

use serde::{Deserialize, Serialize};

use super::{project_account, InvestmentAccount};
use crate::error::{check_money, PlanError};
use crate::finance::{compound_monthly, YearlyBalance};

/// Automatic agency contribution, as a share of basic pay
pub const AUTOMATIC_RATE: f64 = 0.01;

/// Member contributions up to this share of pay are matched dollar for dollar
pub const FULL_MATCH_LIMIT: f64 = 0.03;

/// The next slice of member contributions is matched at 50 cents per dollar
pub const HALF_MATCH_LIMIT: f64 = 0.02;

/// Agency matching rules for a member under the Blended Retirement System
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TspMatching {
    /// Monthly basic pay the match percentages apply to
    pub monthly_basic_pay: f64,
}

impl TspMatching {
    pub fn new(monthly_basic_pay: f64) -> Self {
        Self { monthly_basic_pay }
    }

    /// Monthly agency deposit for a given monthly member contribution.
    ///
    /// 1% automatic, plus 100% of the first 3% and 50% of the next 2% of pay
    /// the member contributes. Capped at 5% of pay.
    pub fn agency_contribution(&self, member_monthly: f64) -> f64 {
        let pay = self.monthly_basic_pay;
        if pay <= 0.0 {
            return 0.0;
        }

        let member_rate = (member_monthly / pay).max(0.0);
        let full = member_rate.min(FULL_MATCH_LIMIT);
        let half = (member_rate - FULL_MATCH_LIMIT).clamp(0.0, HALF_MATCH_LIMIT) * 0.5;

        pay * (AUTOMATIC_RATE + full + half)
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        check_money("tspMatching.monthlyBasicPay", self.monthly_basic_pay)
    }
}

/// Project a TSP account with member contributions only
pub fn project_tsp(account: &InvestmentAccount, years: u32) -> Vec<YearlyBalance> {
    project_account(account, years)
}

/// Project a TSP account, adding the agency match to each monthly deposit
pub fn project_tsp_with_matching(
    account: &InvestmentAccount,
    years: u32,
    matching: Option<&TspMatching>,
) -> Vec<YearlyBalance> {
    match matching {
        None => project_tsp(account, years),
        Some(matching) => {
            let agency = matching.agency_contribution(account.monthly_contribution);
            compound_monthly(
                account.balance,
                account.monthly_contribution + agency,
                account.annual_return(),
                years,
            )
        }
    }
}
