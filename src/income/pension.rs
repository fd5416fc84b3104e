//! Military retired pay under the High-3 and Blended Retirement System formulas

use serde::{Deserialize, Serialize};

use super::{project_with_cola, AnnualIncome};
use crate::error::{check_money, check_rate, PlanError};

/// Survivor Benefit Plan premium as a share of gross retired pay
pub const SBP_PREMIUM_RATE: f64 = 0.065;

/// Retired pay can never exceed the member's high-3 average
pub const MAX_MULTIPLIER: f64 = 1.0;

/// Retirement system the member serves under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RetirementSystem {
    /// Legacy High-3: 2.5% per year of service
    #[default]
    #[serde(rename = "high-3")]
    High3,
    /// Blended Retirement System: 2.0% per year of service
    #[serde(rename = "brs")]
    Brs,
}

impl RetirementSystem {
    /// Multiplier earned per year of service
    pub fn rate_per_year(self) -> f64 {
        match self {
            RetirementSystem::High3 => 0.025,
            RetirementSystem::Brs => 0.020,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionInput {
    #[serde(default)]
    pub system: RetirementSystem,

    /// Average of the highest 36 months of basic pay
    pub high3_monthly_pay: f64,

    pub years_of_service: f64,

    #[serde(default)]
    pub cola_rate: f64,

    /// Whether the member elected Survivor Benefit Plan coverage
    #[serde(default)]
    pub survivor_benefit_plan: bool,
}

impl PensionInput {
    pub fn validate(&self) -> Result<(), PlanError> {
        check_money("pension.high3MonthlyPay", self.high3_monthly_pay)?;
        check_money("pension.yearsOfService", self.years_of_service)?;
        check_rate("pension.colaRate", self.cola_rate)
    }
}

/// Computed retired pay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pension {
    /// Share of high-3 pay earned
    pub multiplier: f64,

    /// Monthly retired pay before the SBP premium
    pub gross_monthly: f64,

    /// Monthly retired pay after the SBP premium
    pub monthly: f64,

    pub annual: f64,
    pub cola_rate: f64,
}

pub fn calculate_pension(input: &PensionInput) -> Pension {
    let multiplier =
        (input.system.rate_per_year() * input.years_of_service).min(MAX_MULTIPLIER);
    let gross_monthly = input.high3_monthly_pay * multiplier;

    let monthly = if input.survivor_benefit_plan {
        gross_monthly * (1.0 - SBP_PREMIUM_RATE)
    } else {
        gross_monthly
    };

    Pension {
        multiplier,
        gross_monthly,
        monthly,
        annual: monthly * 12.0,
        cola_rate: input.cola_rate,
    }
}

pub fn project_pension(pension: &Pension, years: u32) -> Vec<AnnualIncome> {
    project_with_cola(pension.annual, pension.cola_rate, years)
}
