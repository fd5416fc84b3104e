//! Retirement plan: input, engine, guidance, and result
//!
//! [`run_retirement_plan`] is the single public entry point. It validates the
//! plan, then:
//! 1. projects every account and merges them into combined and TSP-only series
//! 2. computes and projects each configured income source
//! 3. scores income against spending
//! 4. compares withdrawal strategies from the balance at retirement
//! 5. builds COLA multipliers and narrative guidance

mod input;
mod result;
mod engine;
pub mod guidance;
pub mod loader;

pub use input::{
    InflationInput, RetirementPlanInput, SpendingInput, MAX_AGE, MAX_PROJECTION_YEARS,
};
pub use result::{ColaRow, CombinedIncomeYear, Guidance, PlanSummary, RetirementPlanResult};
pub use engine::{readiness_score, run_retirement_plan, EngineConfig, RetirementEngine};
pub use guidance::build_guidance;
pub use loader::{load_plan, load_plan_from_reader, write_balances_csv};
