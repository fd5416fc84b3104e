//! Finance primitives: compounding, inflation discounting, withdrawal rates
//!
//! Everything in this module is pure math over already-validated inputs.
//! Nothing here allocates beyond the returned series, logs, or fails.

mod compounding;
mod inflation;
mod allocation;
mod withdrawal_rate;

pub use compounding::{compound_monthly, YearlyBalance, MONTHS_PER_YEAR};
pub use inflation::{adjust_for_inflation, inflation_multiplier};
pub use allocation::{weighted_return, Allocation};
pub use withdrawal_rate::{
    safe_withdrawal_amount, WithdrawalStrategy, WithdrawalStrategyInput,
    DYNAMIC_ANCHOR_RATE, DYNAMIC_CEILING_RATE, DYNAMIC_FLOOR_RATE,
};
