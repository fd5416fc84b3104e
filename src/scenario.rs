//! Scenario runner for sensitivity analysis
//!
//! Holds a base plan and engine, then evaluates many variants of the plan
//! (different retirement ages, inflation, COLA, or market returns) in parallel.

use rayon::prelude::*;

use crate::error::PlanError;
use crate::plan::{EngineConfig, RetirementEngine, RetirementPlanInput, RetirementPlanResult};

/// A single change applied to the base plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    RetirementAge(u32),
    GeneralInflation(f64),
    Cola(f64),
    /// Multiply every account's expected return, including each allocation slice
    ReturnScale(f64),
}

impl Adjustment {
    fn apply(&self, plan: &mut RetirementPlanInput) {
        match *self {
            Adjustment::RetirementAge(age) => plan.retirement_age = age,
            Adjustment::GeneralInflation(rate) => plan.inflation.general = rate,
            Adjustment::Cola(rate) => {
                plan.inflation.cola = rate;
                if let Some(pension) = &mut plan.pension {
                    pension.cola_rate = rate;
                }
                if let Some(va) = &mut plan.va_disability {
                    va.cola_rate = rate;
                }
                if let Some(ss) = &mut plan.social_security {
                    ss.cola_rate = rate;
                }
            }
            Adjustment::ReturnScale(factor) => {
                for account in &mut plan.accounts {
                    account.expected_return *= factor;
                    for slice in &mut account.allocation {
                        slice.expected *= factor;
                    }
                }
            }
        }
    }
}

/// A named set of adjustments
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub adjustments: Vec<Adjustment>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, adjustments: Vec<Adjustment>) -> Self {
        Self {
            name: name.into(),
            adjustments,
        }
    }

    /// The base plan with this scenario's adjustments applied in order
    pub fn apply_to(&self, base: &RetirementPlanInput) -> RetirementPlanInput {
        let mut plan = base.clone();
        for adjustment in &self.adjustments {
            adjustment.apply(&mut plan);
        }
        plan
    }
}

/// Result of one scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<RetirementPlanResult, PlanError>,
}

/// Pre-built runner for batch plan evaluation
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(plan);
/// let scenarios: Vec<_> = [0.02, 0.03, 0.04]
///     .iter()
///     .map(|&r| Scenario::new(format!("inflation {r}"), vec![Adjustment::GeneralInflation(r)]))
///     .collect();
/// for outcome in runner.run_scenarios(&scenarios) { ... }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_plan: RetirementPlanInput,
    engine: RetirementEngine,
}

impl ScenarioRunner {
    /// Create runner with the default engine configuration
    pub fn new(base_plan: RetirementPlanInput) -> Self {
        Self::with_config(base_plan, EngineConfig::default())
    }

    pub fn with_config(base_plan: RetirementPlanInput, config: EngineConfig) -> Self {
        // Scenarios already fan out across threads; keep each run serial
        let config = EngineConfig {
            parallel: false,
            ..config
        };
        Self {
            base_plan,
            engine: RetirementEngine::new(config),
        }
    }

    /// Run the unadjusted base plan
    pub fn run_base(&self) -> Result<RetirementPlanResult, PlanError> {
        self.engine.run(&self.base_plan)
    }

    pub fn run(&self, scenario: &Scenario) -> ScenarioOutcome {
        let plan = scenario.apply_to(&self.base_plan);
        ScenarioOutcome {
            name: scenario.name.clone(),
            result: self.engine.run(&plan),
        }
    }

    /// Run every scenario in parallel; outcomes keep the input order
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }

    pub fn base_plan(&self) -> &RetirementPlanInput {
        &self.base_plan
    }

    pub fn base_plan_mut(&mut self) -> &mut RetirementPlanInput {
        &mut self.base_plan
    }
}
