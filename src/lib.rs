//! Retirement Engine - projection and income-aggregation engine for military retirees
//!
//! This library provides:
//! - Monthly-compounded account projections (TSP, Roth, taxable, other)
//! - Military pension, VA disability, and Social Security income projections
//! - Withdrawal strategy comparison with guardrails
//! - A readiness score and rule-based guidance
//! - Multi-scenario sensitivity runs

pub mod error;
pub mod finance;
pub mod accounts;
pub mod income;
pub mod withdrawal;
pub mod plan;
pub mod scenario;

// Re-export commonly used types
pub use error::PlanError;
pub use accounts::{AccountType, InvestmentAccount};
pub use finance::YearlyBalance;
pub use plan::{run_retirement_plan, RetirementEngine, RetirementPlanInput, RetirementPlanResult};
pub use scenario::{Scenario, ScenarioRunner};
