//! Retirement plan engine: composes account, income, and withdrawal projections

use chrono::{Months, NaiveDate};
use log::{debug, warn};
use rayon::prelude::*;

use super::guidance::build_guidance;
use super::input::RetirementPlanInput;
use super::result::{ColaRow, CombinedIncomeYear, PlanSummary, RetirementPlanResult};
use crate::accounts::{merge_projections, project_account, project_tsp_with_matching, InvestmentAccount};
use crate::error::PlanError;
use crate::finance::{adjust_for_inflation, inflation_multiplier, YearlyBalance};
use crate::income::{
    calculate_pension, calculate_social_security, estimate_va_income, AnnualIncome, IncomeKind,
    IncomeSource, IncomeStream, VaRateTable,
};
use crate::withdrawal::{SuccessProbabilities, WithdrawalEngine};

/// Weight of the readiness ratio in the score
const READINESS_SLOPE: f64 = 90.0;

/// Score for a plan with zero income
const READINESS_FLOOR: f64 = 10.0;

/// Configuration for the plan engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Success probabilities reported alongside each withdrawal strategy
    pub success_probabilities: SuccessProbabilities,

    /// Project accounts and income sources on the rayon thread pool
    pub parallel: bool,

    /// VA compensation schedule
    pub va_rates: VaRateTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            success_probabilities: SuccessProbabilities::default(),
            parallel: true,
            va_rates: VaRateTable::default(),
        }
    }
}

/// Main plan engine
#[derive(Debug, Clone, Default)]
pub struct RetirementEngine {
    config: EngineConfig,
}

impl RetirementEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate the plan and project it.
    ///
    /// A plan that passes validation always produces a result; empty account
    /// lists and zero-length horizons yield zero balances and empty series.
    pub fn run(&self, plan: &RetirementPlanInput) -> Result<RetirementPlanResult, PlanError> {
        plan.validate()?;
        Ok(self.project(plan))
    }

    fn project(&self, plan: &RetirementPlanInput) -> RetirementPlanResult {
        let years_until_retirement = plan.years_until_retirement();
        debug!(
            "projecting plan: age {} -> {}, {} years, {} accounts",
            plan.current_age,
            plan.retirement_age,
            plan.projection_years,
            plan.accounts.len()
        );

        // Balances
        let (balances, tsp_only) = self.project_balances(plan);
        let projected_balance_at_retirement =
            portfolio_at_retirement(plan, &balances, years_until_retirement);

        // Income
        let sources = self.income_sources(plan);
        let incomes: Vec<IncomeStream> = sources.iter().map(IncomeSource::stream).collect();
        let combined_projection = self.project_income(plan, &sources);

        let total_monthly_income_nominal: f64 = incomes.iter().map(|s| s.monthly).sum();
        let total_monthly_income_real = adjust_for_inflation(
            total_monthly_income_nominal,
            plan.inflation.general,
            years_until_retirement,
        );

        // Readiness
        let annual_spending = plan.spending.annual();
        let readiness_ratio = if annual_spending > 0.0 {
            total_monthly_income_real * 12.0 / annual_spending
        } else {
            1.0
        };
        let readiness_score = readiness_score(readiness_ratio);

        let withdrawals = WithdrawalEngine::new(self.config.success_probabilities)
            .project(projected_balance_at_retirement, &plan.withdrawal);

        let summary = PlanSummary {
            years_until_retirement,
            projected_balance_at_retirement,
            readiness_score,
            readiness_ratio,
            total_monthly_income_nominal,
            total_monthly_income_real,
            annual_spending,
            retirement_date: plan
                .as_of
                .and_then(|date| retirement_date(date, years_until_retirement)),
        };

        RetirementPlanResult {
            summary,
            balances,
            incomes,
            withdrawals,
            tsp_only,
            combined_projection,
            cola_table: cola_table(plan),
            guidance: build_guidance(readiness_score, plan),
        }
    }

    /// Combined and TSP-only yearly balances.
    ///
    /// Every account is projected once over the full horizon and the series are
    /// summed per year, so each year is a plain roll-forward of the one before.
    fn project_balances(&self, plan: &RetirementPlanInput) -> (Vec<YearlyBalance>, Vec<YearlyBalance>) {
        let years = plan.projection_years;
        let matching = plan.tsp_matching.as_ref();

        let project = |account: &InvestmentAccount| {
            if account.is_tsp() {
                project_tsp_with_matching(account, years, matching)
            } else {
                project_account(account, years)
            }
        };

        let projections: Vec<Vec<YearlyBalance>> = if self.config.parallel {
            plan.accounts.par_iter().map(project).collect()
        } else {
            plan.accounts.iter().map(project).collect()
        };

        let tsp_projections: Vec<&Vec<YearlyBalance>> = plan
            .accounts
            .iter()
            .zip(&projections)
            .filter(|(account, _)| account.is_tsp())
            .map(|(_, series)| series)
            .collect();

        let combined = with_ages_and_real_values(merge_projections(&projections, years), plan);
        let tsp_only = with_ages_and_real_values(merge_projections(&tsp_projections, years), plan);

        (combined, tsp_only)
    }

    /// Compute each configured benefit, in pension / VA / Social Security order
    fn income_sources(&self, plan: &RetirementPlanInput) -> Vec<IncomeSource> {
        let mut sources = Vec::with_capacity(3);

        if let Some(input) = &plan.pension {
            sources.push(IncomeSource::Pension(calculate_pension(input)));
        }
        if let Some(input) = &plan.va_disability {
            sources.push(IncomeSource::VaDisability(estimate_va_income(
                input,
                &self.config.va_rates,
            )));
        }
        if let Some(input) = &plan.social_security {
            sources.push(IncomeSource::SocialSecurity(calculate_social_security(input)));
        }

        sources
    }

    /// Project every source independently, then line them up by year
    fn project_income(
        &self,
        plan: &RetirementPlanInput,
        sources: &[IncomeSource],
    ) -> Vec<CombinedIncomeYear> {
        let years = plan.projection_years;
        let project = |source: &IncomeSource| (source.kind(), source.project(years));

        let projections: Vec<(IncomeKind, Vec<AnnualIncome>)> = if self.config.parallel {
            sources.par_iter().map(project).collect()
        } else {
            sources.iter().map(project).collect()
        };

        (1..=years)
            .map(|year| {
                let index = (year - 1) as usize;
                let mut row = CombinedIncomeYear {
                    year,
                    age: plan.current_age + year,
                    pension: 0.0,
                    va_disability: 0.0,
                    social_security: 0.0,
                    total_annual: 0.0,
                };

                for (kind, series) in &projections {
                    let annual = series.get(index).map(|y| y.annual).unwrap_or(0.0);
                    match kind {
                        IncomeKind::Pension => row.pension += annual,
                        IncomeKind::VaDisability => row.va_disability += annual,
                        IncomeKind::SocialSecurity => row.social_security += annual,
                    }
                    row.total_annual += annual;
                }

                row
            })
            .collect()
    }
}

/// Fill in attained ages and today's-dollar balances on a merged series
fn with_ages_and_real_values(
    mut series: Vec<YearlyBalance>,
    plan: &RetirementPlanInput,
) -> Vec<YearlyBalance> {
    for row in &mut series {
        row.age = plan.current_age + row.year;
        row.real_balance = adjust_for_inflation(row.nominal_balance, plan.inflation.general, row.year);
    }
    series
}

/// Nominal portfolio balance in the retirement year.
///
/// - Already retired: today's balances.
/// - Retirement beyond the horizon: the last projected year.
/// - Nothing projected: zero.
fn portfolio_at_retirement(
    plan: &RetirementPlanInput,
    balances: &[YearlyBalance],
    years_until_retirement: u32,
) -> f64 {
    if years_until_retirement == 0 {
        return plan.current_portfolio();
    }

    let index = (years_until_retirement as usize).min(balances.len());
    if years_until_retirement as usize > balances.len() && !balances.is_empty() {
        warn!(
            "retirement is {} years out but only {} years are projected; using the final year",
            years_until_retirement,
            balances.len()
        );
    }

    match index.checked_sub(1).and_then(|i| balances.get(i)) {
        Some(row) => row.nominal_balance,
        None => {
            warn!("no projected balances; portfolio at retirement treated as zero");
            0.0
        }
    }
}

/// Map an income-to-spending ratio onto an integer score in [0, 100].
///
/// A ratio of 0 scores 10 and a ratio of 1 scores 100.
pub fn readiness_score(ratio: f64) -> u8 {
    (ratio * READINESS_SLOPE + READINESS_FLOOR)
        .round()
        .clamp(0.0, 100.0) as u8
}

/// COLA and inflation multipliers for every projection year
fn cola_table(plan: &RetirementPlanInput) -> Vec<ColaRow> {
    (1..=plan.projection_years)
        .map(|year| ColaRow {
            year,
            cola_multiplier: inflation_multiplier(plan.inflation.cola, year),
            inflation_multiplier: inflation_multiplier(plan.inflation.general, year),
        })
        .collect()
}

fn retirement_date(as_of: NaiveDate, years: u32) -> Option<NaiveDate> {
    // Month arithmetic clamps Feb 29 to Feb 28 in non-leap years
    as_of.checked_add_months(Months::new(years.checked_mul(12)?))
}

/// Validate and project a plan with the default engine configuration
pub fn run_retirement_plan(plan: &RetirementPlanInput) -> Result<RetirementPlanResult, PlanError> {
    RetirementEngine::default().run(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountType;
    use crate::finance::WithdrawalStrategy;
    use crate::income::{PensionInput, RetirementSystem, SocialSecurityInput, VaInput};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn test_plan() -> RetirementPlanInput {
        let mut plan = RetirementPlanInput::new(38, 60, 30);
        plan.accounts = vec![
            InvestmentAccount::new(AccountType::Tsp, 150_000.0, 900.0, 0.07),
            InvestmentAccount::new(AccountType::Roth, 40_000.0, 500.0, 0.065),
            InvestmentAccount::new(AccountType::Taxable, 25_000.0, 200.0, 0.05),
        ];
        plan.pension = Some(PensionInput {
            system: RetirementSystem::High3,
            high3_monthly_pay: 7_500.0,
            years_of_service: 20.0,
            cola_rate: 0.025,
            survivor_benefit_plan: false,
        });
        plan.va_disability = Some(VaInput { rating: 60, cola_rate: 0.025 });
        plan.social_security = Some(SocialSecurityInput {
            estimated_full_benefit: 2_100.0,
            cola_rate: 0.025,
        });
        plan.inflation.general = 0.03;
        plan.inflation.cola = 0.025;
        plan.spending.baseline_monthly = 4_000.0;
        plan.spending.healthcare_monthly = 600.0;
        plan.spending.housing_monthly = 1_800.0;
        plan.spending.other_monthly = 400.0;
        plan
    }

    #[test]
    fn test_run_produces_full_result() {
        let plan = test_plan();
        let result = run_retirement_plan(&plan).unwrap();

        assert_eq!(result.balances.len(), 30);
        assert_eq!(result.tsp_only.len(), 30);
        assert_eq!(result.combined_projection.len(), 30);
        assert_eq!(result.cola_table.len(), 30);
        assert_eq!(result.incomes.len(), 3);
        assert_eq!(result.withdrawals.len(), 4);
        assert_eq!(result.summary.years_until_retirement, 22);
    }

    #[test]
    fn test_ages_and_real_balances() {
        let result = run_retirement_plan(&test_plan()).unwrap();

        for row in &result.balances {
            assert_eq!(row.age, 38 + row.year);
            let expected = row.nominal_balance / 1.03_f64.powi(row.year as i32);
            assert_relative_eq!(row.real_balance, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_combined_is_sum_of_accounts() {
        let plan = test_plan();
        let result = run_retirement_plan(&plan).unwrap();

        let tsp = project_account(&plan.accounts[0], 30);
        let others: f64 = plan.accounts[1..]
            .iter()
            .map(|a| project_account(a, 30)[29].nominal_balance)
            .sum();

        assert_relative_eq!(result.tsp_only[29].nominal_balance, tsp[29].nominal_balance);
        assert_relative_eq!(
            result.balances[29].nominal_balance,
            tsp[29].nominal_balance + others,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_tsp_matching_only_touches_tsp() {
        let mut plan = test_plan();
        let base = run_retirement_plan(&plan).unwrap();
        plan.tsp_matching = Some(crate::accounts::TspMatching::new(6_000.0));
        let matched = run_retirement_plan(&plan).unwrap();

        assert!(matched.tsp_only[0].contributions > base.tsp_only[0].contributions);
        let non_tsp_base = base.balances[0].contributions - base.tsp_only[0].contributions;
        let non_tsp_matched = matched.balances[0].contributions - matched.tsp_only[0].contributions;
        assert_relative_eq!(non_tsp_base, non_tsp_matched, epsilon = 1e-9);
    }

    #[test]
    fn test_portfolio_at_retirement_index() {
        let plan = test_plan();
        let result = run_retirement_plan(&plan).unwrap();
        assert_eq!(
            result.summary.projected_balance_at_retirement,
            result.balances[21].nominal_balance
        );
    }

    #[test]
    fn test_retirement_beyond_horizon_uses_last_year() {
        let mut plan = test_plan();
        plan.projection_years = 10;
        let result = run_retirement_plan(&plan).unwrap();
        assert_eq!(
            result.summary.projected_balance_at_retirement,
            result.balances[9].nominal_balance
        );
    }

    #[test]
    fn test_already_retired_uses_current_balances() {
        let mut plan = test_plan();
        plan.current_age = 62;
        let result = run_retirement_plan(&plan).unwrap();

        assert_eq!(result.summary.years_until_retirement, 0);
        assert_relative_eq!(result.summary.projected_balance_at_retirement, 215_000.0);
        // No discounting when retirement is today
        assert_eq!(
            result.summary.total_monthly_income_real,
            result.summary.total_monthly_income_nominal
        );
    }

    #[test]
    fn test_degenerate_plan_still_produces_result() {
        let plan = RetirementPlanInput::new(50, 60, 0);
        let result = run_retirement_plan(&plan).unwrap();

        assert!(result.balances.is_empty());
        assert!(result.tsp_only.is_empty());
        assert!(result.cola_table.is_empty());
        assert_eq!(result.summary.projected_balance_at_retirement, 0.0);
        assert_eq!(result.withdrawals.len(), 4);
        assert!(result.withdrawals.iter().all(|w| w.annual_withdrawal == 0.0));
        // No spending: income trivially covers it
        assert_eq!(result.summary.readiness_ratio, 1.0);
        assert_eq!(result.summary.readiness_score, 100);
    }

    #[test]
    fn test_income_totals_and_readiness() {
        let plan = test_plan();
        let result = run_retirement_plan(&plan).unwrap();

        // Pension 3,750 + VA 1,361.88 + SS 2,100
        let nominal = 3_750.0 + 1_361.88 + 2_100.0;
        assert_relative_eq!(result.summary.total_monthly_income_nominal, nominal, epsilon = 1e-9);

        let real = nominal / 1.03_f64.powi(22);
        assert_relative_eq!(result.summary.total_monthly_income_real, real, max_relative = 1e-12);

        let ratio = real * 12.0 / (6_800.0 * 12.0);
        assert_relative_eq!(result.summary.readiness_ratio, ratio, max_relative = 1e-12);
        assert_eq!(result.summary.readiness_score, (ratio * 90.0 + 10.0).round() as u8);
    }

    #[test]
    fn test_combined_income_projection() {
        let result = run_retirement_plan(&test_plan()).unwrap();
        let year1 = &result.combined_projection[0];

        assert_eq!(year1.age, 39);
        assert_relative_eq!(year1.pension, 45_000.0);
        assert_relative_eq!(year1.social_security, 25_200.0);
        assert_relative_eq!(
            year1.total_annual,
            year1.pension + year1.va_disability + year1.social_security
        );
        assert!(result.combined_projection[1].total_annual > year1.total_annual);
    }

    #[test]
    fn test_cola_table() {
        let result = run_retirement_plan(&test_plan()).unwrap();
        let row = &result.cola_table[1];
        assert_eq!(row.year, 2);
        assert_relative_eq!(row.cola_multiplier, 1.025_f64.powi(2));
        assert_relative_eq!(row.inflation_multiplier, 1.03_f64.powi(2));
    }

    #[test]
    fn test_withdrawals_seeded_from_retirement_balance() {
        let mut plan = test_plan();
        plan.withdrawal.strategy = WithdrawalStrategy::Dynamic;
        let result = run_retirement_plan(&plan).unwrap();

        let balance = result.summary.projected_balance_at_retirement;
        assert_relative_eq!(result.withdrawals[1].annual_withdrawal, balance * 0.04, max_relative = 1e-12);
    }

    #[test]
    fn test_retirement_date() {
        let mut plan = test_plan();
        plan.as_of = NaiveDate::from_ymd_opt(2024, 2, 29);
        let result = run_retirement_plan(&plan).unwrap();
        assert_eq!(result.summary.retirement_date, NaiveDate::from_ymd_opt(2046, 2, 28));

        plan.as_of = None;
        let result = run_retirement_plan(&plan).unwrap();
        assert_eq!(result.summary.retirement_date, None);
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let plan = test_plan();
        let parallel = RetirementEngine::default().run(&plan).unwrap();
        let serial = RetirementEngine::new(EngineConfig {
            parallel: false,
            ..Default::default()
        })
        .run(&plan)
        .unwrap();
        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_run_is_deterministic() {
        let plan = test_plan();
        let first = run_retirement_plan(&plan).unwrap();
        let second = run_retirement_plan(&plan).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_plan_rejected() {
        let mut plan = test_plan();
        plan.accounts[0].balance = -5.0;
        assert!(matches!(
            run_retirement_plan(&plan),
            Err(PlanError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_extreme_ages_are_rejected_not_overflowed() {
        let plan = RetirementPlanInput::new(u32::MAX, u32::MAX, 1);
        assert!(matches!(
            run_retirement_plan(&plan),
            Err(PlanError::OutOfRange { .. })
        ));

        let plan = RetirementPlanInput::new(40, 60, u32::MAX);
        assert!(matches!(
            run_retirement_plan(&plan),
            Err(PlanError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_oldest_plan_at_longest_horizon_runs() {
        use crate::plan::{MAX_AGE, MAX_PROJECTION_YEARS};

        let mut plan = RetirementPlanInput::new(MAX_AGE, MAX_AGE, MAX_PROJECTION_YEARS);
        plan.accounts
            .push(InvestmentAccount::new(AccountType::Roth, 10_000.0, 0.0, 0.04));
        let result = run_retirement_plan(&plan).unwrap();

        assert_eq!(result.balances.len(), MAX_PROJECTION_YEARS as usize);
        assert_eq!(result.balances.last().unwrap().age, MAX_AGE + MAX_PROJECTION_YEARS);
    }

    #[test]
    fn test_readiness_score_fixed_points() {
        assert_eq!(readiness_score(0.0), 10);
        assert_eq!(readiness_score(1.0), 100);
        assert_eq!(readiness_score(0.5), 55);
        assert_eq!(readiness_score(1_000.0), 100);
    }

    proptest! {
        #[test]
        fn prop_readiness_score_in_range(ratio in 0.0f64..1e6) {
            let score = readiness_score(ratio);
            prop_assert!(score >= 10 && score <= 100);
        }
    }
}
