//! Investment accounts and their balance projections

mod projector;
mod tsp;

pub use projector::{aggregate_accounts, merge_projections, project_account};
pub use tsp::{project_tsp, project_tsp_with_matching, TspMatching};

use serde::{Deserialize, Serialize};

use crate::error::{check_money, check_rate, PlanError};
use crate::finance::{weighted_return, Allocation};

/// Kind of investment account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    /// Thrift Savings Plan
    Tsp,
    Taxable,
    Roth,
    Other,
}

/// An investment account as it stands today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAccount {
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Current balance
    pub balance: f64,

    /// Member contribution deposited every month
    #[serde(default)]
    pub monthly_contribution: f64,

    /// Expected annual return
    pub expected_return: f64,

    /// Fund mix. When present, its blended return replaces `expected_return`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allocation: Vec<Allocation>,
}

impl InvestmentAccount {
    pub fn new(
        account_type: AccountType,
        balance: f64,
        monthly_contribution: f64,
        expected_return: f64,
    ) -> Self {
        Self {
            account_type,
            balance,
            monthly_contribution,
            expected_return,
            allocation: Vec::new(),
        }
    }

    pub fn with_allocation(mut self, allocation: Vec<Allocation>) -> Self {
        self.allocation = allocation;
        self
    }

    /// Annual return used for projection
    pub fn annual_return(&self) -> f64 {
        if self.allocation.is_empty() {
            self.expected_return
        } else {
            weighted_return(&self.allocation)
        }
    }

    pub fn is_tsp(&self) -> bool {
        self.account_type == AccountType::Tsp
    }

    /// Reject negative or non-finite amounts. `label` prefixes the field names.
    pub fn validate(&self, label: &str) -> Result<(), PlanError> {
        check_money(&format!("{label}.balance"), self.balance)?;
        check_money(
            &format!("{label}.monthlyContribution"),
            self.monthly_contribution,
        )?;
        check_rate(&format!("{label}.expectedReturn"), self.expected_return)?;

        for (index, slice) in self.allocation.iter().enumerate() {
            check_money(&format!("{label}.allocation[{index}].percentage"), slice.percentage)?;
            check_rate(&format!("{label}.allocation[{index}].expected"), slice.expected)?;
        }
        Ok(())
    }
}
