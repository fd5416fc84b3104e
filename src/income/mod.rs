//! Retirement income sources and their year-by-year projections
//!
//! Each source follows the same two-step contract:
//! - `calculate_*` / `estimate_*` turns the raw input into a benefit figure
//! - `project_*` grows the annual benefit by its COLA for a number of years
//!
//! The plan engine holds computed benefits as [`IncomeSource`] values and
//! dispatches on the variant.

pub mod social_security;
pub mod pension;
pub mod va;

pub use social_security::{
    calculate_social_security, project_social_security, SocialSecurity, SocialSecurityInput,
};
pub use pension::{calculate_pension, project_pension, Pension, PensionInput, RetirementSystem};
pub use va::{estimate_va_income, project_va_income, VaIncome, VaInput, VaRateTable};

use serde::{Deserialize, Serialize};

/// Income received in one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualIncome {
    /// Projection year (1-indexed)
    pub year: u32,
    pub annual: f64,
}

/// Which kind of benefit an income stream comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncomeKind {
    Pension,
    VaDisability,
    SocialSecurity,
}

impl IncomeKind {
    pub fn label(self) -> &'static str {
        match self {
            IncomeKind::Pension => "Military Pension",
            IncomeKind::VaDisability => "VA Disability",
            IncomeKind::SocialSecurity => "Social Security",
        }
    }
}

/// Current income from one source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStream {
    pub source: IncomeKind,
    pub annual: f64,
    pub monthly: f64,
}

/// A computed benefit, one variant per source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IncomeSource {
    Pension(Pension),
    VaDisability(VaIncome),
    SocialSecurity(SocialSecurity),
}

impl IncomeSource {
    pub fn kind(&self) -> IncomeKind {
        match self {
            IncomeSource::Pension(_) => IncomeKind::Pension,
            IncomeSource::VaDisability(_) => IncomeKind::VaDisability,
            IncomeSource::SocialSecurity(_) => IncomeKind::SocialSecurity,
        }
    }

    /// Current monthly benefit
    pub fn monthly(&self) -> f64 {
        match self {
            IncomeSource::Pension(p) => p.monthly,
            IncomeSource::VaDisability(va) => va.monthly,
            // Social Security is reported at the full-retirement-age benefit
            IncomeSource::SocialSecurity(ss) => ss.full,
        }
    }

    pub fn stream(&self) -> IncomeStream {
        let monthly = self.monthly();
        IncomeStream {
            source: self.kind(),
            annual: monthly * 12.0,
            monthly,
        }
    }

    /// Year-by-year projection using the source's own calculator
    pub fn project(&self, years: u32) -> Vec<AnnualIncome> {
        match self {
            IncomeSource::Pension(p) => project_pension(p, years),
            IncomeSource::VaDisability(va) => project_va_income(va, years),
            IncomeSource::SocialSecurity(ss) => project_social_security(ss, years),
        }
    }
}

/// Grow `first_year` by `(1 + cola)` once per year after the first
pub(crate) fn project_with_cola(first_year: f64, cola: f64, years: u32) -> Vec<AnnualIncome> {
    let mut annual = first_year;
    let mut results = Vec::with_capacity(years as usize);

    for year in 1..=years {
        if year > 1 {
            annual *= 1.0 + cola;
        }
        results.push(AnnualIncome { year, annual });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_project_with_cola() {
        let series = project_with_cola(12_000.0, 0.02, 3);
        assert_eq!(series.len(), 3);
        assert_relative_eq!(series[0].annual, 12_000.0);
        assert_relative_eq!(series[1].annual, 12_240.0, epsilon = 1e-9);
        assert_relative_eq!(series[2].annual, 12_484.8, epsilon = 1e-9);
    }

    #[test]
    fn test_stream_from_source() {
        let ss = calculate_social_security(&SocialSecurityInput {
            estimated_full_benefit: 1_800.0,
            cola_rate: 0.025,
        });
        let stream = IncomeSource::SocialSecurity(ss).stream();

        assert_eq!(stream.source, IncomeKind::SocialSecurity);
        assert_relative_eq!(stream.monthly, 1_800.0);
        assert_relative_eq!(stream.annual, 21_600.0);
    }

    #[test]
    fn test_dispatch_projects_each_variant() {
        let pension = calculate_pension(&PensionInput {
            system: RetirementSystem::High3,
            high3_monthly_pay: 6_000.0,
            years_of_service: 20.0,
            cola_rate: 0.03,
            survivor_benefit_plan: false,
        });
        let va = estimate_va_income(
            &VaInput { rating: 50, cola_rate: 0.03 },
            &VaRateTable::default(),
        );

        for source in [IncomeSource::Pension(pension), IncomeSource::VaDisability(va)] {
            let series = source.project(4);
            assert_eq!(series.len(), 4);
            assert_relative_eq!(series[0].annual, source.monthly() * 12.0, epsilon = 1e-9);
            assert!(series[3].annual > series[0].annual);
        }
    }
}
