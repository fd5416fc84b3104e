//! Rule-based narrative guidance
//!
//! Guidance is an ordered table of `(category, predicate, message)` rules.
//! Every rule whose predicate holds contributes its message, in table order.

use std::fmt;

use super::input::RetirementPlanInput;
use super::result::Guidance;

/// Readiness scores below this are treated as underfunded
pub const UNDERFUNDED_BELOW: u8 = 60;

/// Readiness scores at or above this are treated as well funded
pub const WELL_FUNDED_FROM: u8 = 80;

/// Which list a rule's message lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidanceCategory {
    Suggestion,
    AllocationIdea,
    RiskNote,
    SpendingAdjustment,
}

/// What the rules can look at
#[derive(Debug, Clone, Copy)]
pub struct GuidanceContext<'a> {
    pub readiness_score: u8,
    pub plan: &'a RetirementPlanInput,
}

/// One row of the rule table
#[derive(Clone, Copy)]
pub struct GuidanceRule {
    pub category: GuidanceCategory,
    pub applies: fn(&GuidanceContext) -> bool,
    pub message: fn(&GuidanceContext) -> String,
}

impl fmt::Debug for GuidanceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuidanceRule")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl GuidanceRule {
    pub fn new(
        category: GuidanceCategory,
        applies: fn(&GuidanceContext) -> bool,
        message: fn(&GuidanceContext) -> String,
    ) -> Self {
        Self { category, applies, message }
    }

    /// Message for this context, if the rule fires
    pub fn evaluate(&self, ctx: &GuidanceContext) -> Option<String> {
        (self.applies)(ctx).then(|| (self.message)(ctx))
    }
}

/// The standard rule table
pub fn default_rules() -> Vec<GuidanceRule> {
    use GuidanceCategory::*;

    vec![
        // Readiness bands
        GuidanceRule::new(
            Suggestion,
            |ctx| ctx.readiness_score < UNDERFUNDED_BELOW,
            |_| "Increase monthly contributions to your TSP and other investment accounts to close the income gap.".to_string(),
        ),
        GuidanceRule::new(
            RiskNote,
            |ctx| ctx.readiness_score < UNDERFUNDED_BELOW,
            |_| "Projected retirement income falls well short of planned spending; the plan is currently underfunded.".to_string(),
        ),
        GuidanceRule::new(
            Suggestion,
            |ctx| (UNDERFUNDED_BELOW..WELL_FUNDED_FROM).contains(&ctx.readiness_score),
            |_| "You are on track. Stay the course and revisit contributions and spending once a year.".to_string(),
        ),
        GuidanceRule::new(
            Suggestion,
            |ctx| ctx.readiness_score >= WELL_FUNDED_FROM,
            |_| "Income comfortably covers spending. Focus on tax efficiency and plan the order of withdrawals across TSP, Roth, and taxable accounts.".to_string(),
        ),
        // Allocation
        GuidanceRule::new(
            AllocationIdea,
            |_| true,
            |_| "Shift gradually from the C, S, and I Funds toward the G and F Funds as retirement approaches.".to_string(),
        ),
        GuidanceRule::new(
            AllocationIdea,
            |_| true,
            |_| "Hold one to two years of expenses in cash or the G Fund so market drops do not force sales.".to_string(),
        ),
        GuidanceRule::new(
            AllocationIdea,
            |ctx| !ctx.plan.has_tsp(),
            |_| "Consider the TSP for new contributions; its expense ratios are among the lowest available.".to_string(),
        ),
        // Risk
        GuidanceRule::new(
            RiskNote,
            |_| true,
            |_| "Sequence-of-returns risk is highest in the first five years of retirement.".to_string(),
        ),
        GuidanceRule::new(
            RiskNote,
            |_| true,
            |_| "Inflation above the assumed rate erodes income that is not COLA-indexed.".to_string(),
        ),
        GuidanceRule::new(
            RiskNote,
            |ctx| ctx.plan.spending.healthcare_monthly <= 0.0,
            |_| "No healthcare spending is budgeted; include TRICARE premiums and out-of-pocket costs.".to_string(),
        ),
        // Spending
        GuidanceRule::new(
            SpendingAdjustment,
            |ctx| ctx.plan.spending.baseline_monthly > 0.0,
            |ctx| {
                format!(
                    "Trimming baseline spending by 10% would free up about ${:.0} per month.",
                    ctx.plan.spending.baseline_monthly * 0.10
                )
            },
        ),
    ]
}

/// Apply a rule table to a context
pub fn apply_rules(rules: &[GuidanceRule], ctx: &GuidanceContext) -> Guidance {
    let mut guidance = Guidance::default();

    for rule in rules {
        let Some(message) = rule.evaluate(ctx) else {
            continue;
        };
        let bucket = match rule.category {
            GuidanceCategory::Suggestion => &mut guidance.suggestions,
            GuidanceCategory::AllocationIdea => &mut guidance.allocation_ideas,
            GuidanceCategory::RiskNote => &mut guidance.risk_notes,
            GuidanceCategory::SpendingAdjustment => &mut guidance.spending_adjustments,
        };
        bucket.push(message);
    }

    guidance
}

/// Guidance from the standard rule table
pub fn build_guidance(readiness_score: u8, plan: &RetirementPlanInput) -> Guidance {
    let ctx = GuidanceContext { readiness_score, plan };
    apply_rules(&default_rules(), &ctx)
}
