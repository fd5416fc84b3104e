//! Withdrawal strategy comparison at retirement
//!
//! For a starting portfolio balance, reports the first-year withdrawal under
//! every named strategy alongside a fixed historical success probability.
//! The probabilities are a simplified heuristic, not a simulation result, and
//! can be overridden through [`SuccessProbabilities`].

use serde::{Deserialize, Serialize};

pub use crate::finance::{safe_withdrawal_amount, WithdrawalStrategy, WithdrawalStrategyInput};

/// Historical success probability assigned to each strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessProbabilities {
    pub three_percent: f64,
    pub four_percent: f64,
    pub five_percent: f64,
    pub dynamic: f64,
}

impl Default for SuccessProbabilities {
    fn default() -> Self {
        Self {
            three_percent: 0.95,
            four_percent: 0.90,
            five_percent: 0.78,
            dynamic: 0.85,
        }
    }
}

impl SuccessProbabilities {
    pub fn for_strategy(&self, strategy: WithdrawalStrategy) -> f64 {
        match strategy {
            WithdrawalStrategy::ThreePercent => self.three_percent,
            WithdrawalStrategy::FourPercent => self.four_percent,
            WithdrawalStrategy::FivePercent => self.five_percent,
            WithdrawalStrategy::Dynamic => self.dynamic,
        }
    }
}

/// First-year withdrawal under one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalProjection {
    pub strategy: String,
    pub annual_withdrawal: f64,
    pub success_probability: f64,
}

/// Builds withdrawal comparisons with a configurable probability table
#[derive(Debug, Clone, Default)]
pub struct WithdrawalEngine {
    probabilities: SuccessProbabilities,
}

impl WithdrawalEngine {
    pub fn new(probabilities: SuccessProbabilities) -> Self {
        Self { probabilities }
    }

    /// One projection per named strategy, in 3% / 4% / 5% / Dynamic order.
    ///
    /// The chosen strategy in `input` does not filter the list; only its
    /// guardrails feed the dynamic entry.
    pub fn project(&self, balance: f64, input: &WithdrawalStrategyInput) -> Vec<WithdrawalProjection> {
        WithdrawalStrategy::ALL
            .iter()
            .map(|&strategy| {
                let strategy_input = WithdrawalStrategyInput { strategy, ..*input };
                WithdrawalProjection {
                    strategy: strategy.label().to_string(),
                    annual_withdrawal: safe_withdrawal_amount(balance, &strategy_input),
                    success_probability: self.probabilities.for_strategy(strategy),
                }
            })
            .collect()
    }
}

/// Withdrawal comparison using the default success probabilities
pub fn build_withdrawal_projections(
    balance: f64,
    input: &WithdrawalStrategyInput,
) -> Vec<WithdrawalProjection> {
    WithdrawalEngine::default().project(balance, input)
}
