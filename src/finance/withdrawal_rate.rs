//! Safe withdrawal rates for fixed-percentage and guardrail strategies

use serde::{Deserialize, Serialize};

/// Anchor rate for the dynamic strategy (the classic 4% rule)
pub const DYNAMIC_ANCHOR_RATE: f64 = 0.04;

/// Base floor rate for the dynamic strategy, before the guardrail drop
pub const DYNAMIC_FLOOR_RATE: f64 = 0.03;

/// Base ceiling rate for the dynamic strategy, before the guardrail raise
pub const DYNAMIC_CEILING_RATE: f64 = 0.05;

/// Named withdrawal strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WithdrawalStrategy {
    ThreePercent,
    #[default]
    FourPercent,
    FivePercent,
    /// 4% anchor bounded by configurable guardrails
    Dynamic,
}

impl WithdrawalStrategy {
    /// All strategies in reporting order
    pub const ALL: [WithdrawalStrategy; 4] = [
        WithdrawalStrategy::ThreePercent,
        WithdrawalStrategy::FourPercent,
        WithdrawalStrategy::FivePercent,
        WithdrawalStrategy::Dynamic,
    ];

    /// Fixed annual rate, if this is a fixed-percentage rule
    pub fn fixed_rate(self) -> Option<f64> {
        match self {
            WithdrawalStrategy::ThreePercent => Some(0.03),
            WithdrawalStrategy::FourPercent => Some(0.04),
            WithdrawalStrategy::FivePercent => Some(0.05),
            WithdrawalStrategy::Dynamic => None,
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            WithdrawalStrategy::ThreePercent => "3% Rule",
            WithdrawalStrategy::FourPercent => "4% Rule",
            WithdrawalStrategy::FivePercent => "5% Rule",
            WithdrawalStrategy::Dynamic => "Dynamic Guardrails",
        }
    }
}

/// Chosen strategy plus the guardrail widths used by the dynamic rule
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalStrategyInput {
    #[serde(default)]
    pub strategy: WithdrawalStrategy,

    /// How far the floor may drop below 3%
    #[serde(default)]
    pub guardrail_drop: f64,

    /// How far the ceiling may rise above 5%
    #[serde(default)]
    pub guardrail_raise: f64,
}

impl WithdrawalStrategyInput {
    pub fn new(strategy: WithdrawalStrategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Lower bound of the dynamic band for a given balance
    pub fn dynamic_floor(&self, balance: f64) -> f64 {
        balance * (DYNAMIC_FLOOR_RATE - self.guardrail_drop)
    }

    /// Upper bound of the dynamic band for a given balance
    pub fn dynamic_ceiling(&self, balance: f64) -> f64 {
        balance * (DYNAMIC_CEILING_RATE + self.guardrail_raise)
    }
}

/// Annual withdrawal for `balance` under the input's strategy.
///
/// Fixed rules return the literal fraction of the balance. The dynamic rule
/// starts at 4% and is clamped into `[floor, ceiling]`; with non-negative
/// guardrails the anchor always lies inside the band.
pub fn safe_withdrawal_amount(balance: f64, input: &WithdrawalStrategyInput) -> f64 {
    match input.strategy.fixed_rate() {
        Some(rate) => balance * rate,
        None => {
            let floor = input.dynamic_floor(balance);
            let ceiling = input.dynamic_ceiling(balance);
            // f64::clamp panics when floor > ceiling, so apply the bounds one at a time
            (balance * DYNAMIC_ANCHOR_RATE).max(floor).min(ceiling)
        }
    }
}
