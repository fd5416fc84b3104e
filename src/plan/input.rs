//! Retirement plan input and boundary validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::accounts::{InvestmentAccount, TspMatching};
use crate::error::{check_at_most, check_money, check_rate, PlanError};
use crate::finance::WithdrawalStrategyInput;
use crate::income::{PensionInput, SocialSecurityInput, VaInput};

/// Oldest current or retirement age a plan may name
pub const MAX_AGE: u32 = 130;

/// Longest projection horizon, in years
pub const MAX_PROJECTION_YEARS: u32 = 150;

/// Inflation assumptions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationInput {
    /// General price inflation, used to convert nominal balances to today's dollars
    #[serde(default)]
    pub general: f64,

    /// Cost-of-living adjustment applied to indexed income
    #[serde(default)]
    pub cola: f64,
}

/// Planned monthly spending in retirement, by category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInput {
    #[serde(default)]
    pub baseline_monthly: f64,
    #[serde(default)]
    pub healthcare_monthly: f64,
    #[serde(default)]
    pub housing_monthly: f64,
    #[serde(default)]
    pub other_monthly: f64,
}

impl SpendingInput {
    pub fn total_monthly(&self) -> f64 {
        self.baseline_monthly + self.healthcare_monthly + self.housing_monthly + self.other_monthly
    }

    pub fn annual(&self) -> f64 {
        self.total_monthly() * 12.0
    }

    fn validate(&self) -> Result<(), PlanError> {
        check_money("spending.baselineMonthly", self.baseline_monthly)?;
        check_money("spending.healthcareMonthly", self.healthcare_monthly)?;
        check_money("spending.housingMonthly", self.housing_monthly)?;
        check_money("spending.otherMonthly", self.other_monthly)
    }
}

/// Everything the engine needs to project one member's retirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlanInput {
    pub current_age: u32,
    pub retirement_age: u32,

    /// Number of years to project balances, income, and COLA multipliers
    pub projection_years: u32,

    /// Date the plan is evaluated on. Only used to report a retirement date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,

    #[serde(default)]
    pub accounts: Vec<InvestmentAccount>,

    /// Agency matching applied to every TSP account
    #[serde(default)]
    pub tsp_matching: Option<TspMatching>,

    #[serde(default)]
    pub pension: Option<PensionInput>,

    #[serde(default)]
    pub va_disability: Option<VaInput>,

    #[serde(default)]
    pub social_security: Option<SocialSecurityInput>,

    #[serde(default)]
    pub inflation: InflationInput,

    #[serde(default)]
    pub spending: SpendingInput,

    #[serde(default)]
    pub withdrawal: WithdrawalStrategyInput,
}

impl RetirementPlanInput {
    /// A plan with no accounts, income, or spending
    pub fn new(current_age: u32, retirement_age: u32, projection_years: u32) -> Self {
        Self {
            current_age,
            retirement_age,
            projection_years,
            as_of: None,
            accounts: Vec::new(),
            tsp_matching: None,
            pension: None,
            va_disability: None,
            social_security: None,
            inflation: InflationInput::default(),
            spending: SpendingInput::default(),
            withdrawal: WithdrawalStrategyInput::default(),
        }
    }

    /// Years from today until retirement; 0 if already at or past retirement age
    pub fn years_until_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    /// Sum of today's account balances
    pub fn current_portfolio(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    pub fn has_tsp(&self) -> bool {
        self.accounts.iter().any(InvestmentAccount::is_tsp)
    }

    /// Reject values that would corrupt the projection.
    ///
    /// Ages and the horizon are capped so attained ages and yearly series stay
    /// small; the floating-point fields must be finite and in range.
    pub fn validate(&self) -> Result<(), PlanError> {
        check_at_most("currentAge", self.current_age, MAX_AGE)?;
        check_at_most("retirementAge", self.retirement_age, MAX_AGE)?;
        check_at_most("projectionYears", self.projection_years, MAX_PROJECTION_YEARS)?;

        for (index, account) in self.accounts.iter().enumerate() {
            account.validate(&format!("accounts[{index}]"))?;
        }
        if let Some(matching) = &self.tsp_matching {
            matching.validate()?;
        }
        if let Some(pension) = &self.pension {
            pension.validate()?;
        }
        if let Some(va) = &self.va_disability {
            va.validate()?;
        }
        if let Some(ss) = &self.social_security {
            ss.validate()?;
        }

        check_rate("inflation.general", self.inflation.general)?;
        check_rate("inflation.cola", self.inflation.cola)?;
        self.spending.validate()?;
        check_money("withdrawal.guardrailDrop", self.withdrawal.guardrail_drop)?;
        check_money("withdrawal.guardrailRaise", self.withdrawal.guardrail_raise)
    }
}
