//! Plan result structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::finance::YearlyBalance;
use crate::income::IncomeStream;
use crate::withdrawal::WithdrawalProjection;

/// Headline figures for a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub years_until_retirement: u32,

    /// Combined nominal portfolio balance in the retirement year
    pub projected_balance_at_retirement: f64,

    /// Income-to-spending ratio mapped onto 0-100
    pub readiness_score: u8,

    /// Real annual income divided by annual spending
    pub readiness_ratio: f64,

    /// Sum of today's monthly benefits across all income sources
    pub total_monthly_income_nominal: f64,

    /// `total_monthly_income_nominal` in today's dollars at retirement
    pub total_monthly_income_real: f64,

    pub annual_spending: f64,

    /// Present when the plan carries an evaluation date
    pub retirement_date: Option<NaiveDate>,
}

/// Precomputed growth multipliers for one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColaRow {
    pub year: u32,
    /// `(1 + cola)^year`
    pub cola_multiplier: f64,
    /// `(1 + general)^year`
    pub inflation_multiplier: f64,
}

/// All income sources side by side for one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedIncomeYear {
    pub year: u32,
    pub age: u32,
    pub pension: f64,
    pub va_disability: f64,
    pub social_security: f64,
    pub total_annual: f64,
}

/// Narrative guidance derived from the readiness score and plan shape
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub suggestions: Vec<String>,
    pub allocation_ideas: Vec<String>,
    pub risk_notes: Vec<String>,
    pub spending_adjustments: Vec<String>,
}

/// Complete output of one plan run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlanResult {
    pub summary: PlanSummary,

    /// Combined balances across every account
    pub balances: Vec<YearlyBalance>,

    pub incomes: Vec<IncomeStream>,
    pub withdrawals: Vec<WithdrawalProjection>,

    /// Combined balances across TSP accounts only
    pub tsp_only: Vec<YearlyBalance>,

    pub combined_projection: Vec<CombinedIncomeYear>,
    pub cola_table: Vec<ColaRow>,
    pub guidance: Guidance,
}

impl RetirementPlanResult {
    /// Balance record for the final projection year
    pub fn final_balance(&self) -> Option<&YearlyBalance> {
        self.balances.last()
    }
}
