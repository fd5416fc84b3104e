//! Social Security benefit at early, full, and delayed claiming ages

use serde::{Deserialize, Serialize};

use super::{project_with_cola, AnnualIncome};
use crate::error::{check_money, check_rate, PlanError};

/// Benefit factor for claiming at 62, relative to the full-retirement-age benefit
pub const EARLY_CLAIM_FACTOR: f64 = 0.70;

/// Benefit factor for claiming at 70, relative to the full-retirement-age benefit
pub const DELAYED_CLAIM_FACTOR: f64 = 1.24;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSecurityInput {
    /// Estimated monthly benefit at full retirement age
    pub estimated_full_benefit: f64,

    #[serde(default)]
    pub cola_rate: f64,
}

impl SocialSecurityInput {
    pub fn validate(&self) -> Result<(), PlanError> {
        check_money("socialSecurity.estimatedFullBenefit", self.estimated_full_benefit)?;
        check_rate("socialSecurity.colaRate", self.cola_rate)
    }
}

/// Monthly Social Security benefit at each claiming age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSecurity {
    pub early: f64,
    pub full: f64,
    pub delayed: f64,
    pub cola_rate: f64,
}

pub fn calculate_social_security(input: &SocialSecurityInput) -> SocialSecurity {
    let full = input.estimated_full_benefit;
    SocialSecurity {
        early: full * EARLY_CLAIM_FACTOR,
        full,
        delayed: full * DELAYED_CLAIM_FACTOR,
        cola_rate: input.cola_rate,
    }
}

/// Annual benefit per year, starting from twelve full-age payments
pub fn project_social_security(ss: &SocialSecurity, years: u32) -> Vec<AnnualIncome> {
    project_with_cola(ss.full * 12.0, ss.cola_rate, years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_claiming_ages() {
        let ss = calculate_social_security(&SocialSecurityInput {
            estimated_full_benefit: 2_000.0,
            cola_rate: 0.02,
        });

        assert_relative_eq!(ss.early, 1_400.0);
        assert_relative_eq!(ss.full, 2_000.0);
        assert_relative_eq!(ss.delayed, 2_480.0);
        assert_relative_eq!(ss.cola_rate, 0.02);
    }

    #[test]
    fn test_projection_compounds_yearly() {
        let ss = calculate_social_security(&SocialSecurityInput {
            estimated_full_benefit: 2_000.0,
            cola_rate: 0.02,
        });
        let series = project_social_security(&ss, 10);

        assert_eq!(series.len(), 10);
        assert_eq!(series[0].year, 1);
        assert_relative_eq!(series[0].annual, 24_000.0);
        assert_relative_eq!(series[9].annual, 24_000.0 * 1.02_f64.powi(9), max_relative = 1e-12);
    }

    #[test]
    fn test_zero_years() {
        let ss = calculate_social_security(&SocialSecurityInput {
            estimated_full_benefit: 2_000.0,
            cola_rate: 0.02,
        });
        assert!(project_social_security(&ss, 0).is_empty());
    }
}
