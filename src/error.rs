//! Error types for plan validation and loading

use thiserror::Error;

/// Errors produced at the plan boundary.
///
/// The projection math itself never fails; everything here is raised either
/// while validating a [`RetirementPlanInput`](crate::plan::RetirementPlanInput)
/// or while reading plans and rate tables from disk.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteValue { field: String },

    /// A monetary amount (or other non-negative quantity) was below zero.
    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: String, value: f64 },

    /// A rate was at or below -100%, which would flip the sign of compounding.
    #[error("{field} must be greater than -1.0 (got {value})")]
    RateOutOfRange { field: String, value: f64 },

    /// An age or year count beyond what the projection supports.
    #[error("{field} must be at most {max} (got {value})")]
    OutOfRange { field: String, value: u32, max: u32 },

    /// VA combined ratings run from 0 to 100.
    #[error("VA disability rating must be between 0 and 100 (got {0})")]
    InvalidRating(u8),

    /// A rate table listed the same rating twice.
    #[error("VA rate table lists rating {0} more than once")]
    DuplicateRating(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl PlanError {
    pub(crate) fn non_finite(field: impl Into<String>) -> Self {
        PlanError::NonFiniteValue { field: field.into() }
    }

    pub(crate) fn negative(field: impl Into<String>, value: f64) -> Self {
        PlanError::NegativeValue { field: field.into(), value }
    }

    pub(crate) fn rate(field: impl Into<String>, value: f64) -> Self {
        PlanError::RateOutOfRange { field: field.into(), value }
    }
}

/// Check that an age or year count does not exceed `max`
pub(crate) fn check_at_most(field: &str, value: u32, max: u32) -> Result<(), PlanError> {
    if value > max {
        return Err(PlanError::OutOfRange { field: field.to_string(), value, max });
    }
    Ok(())
}

/// Check that a monetary amount is finite and non-negative
pub(crate) fn check_money(field: &str, value: f64) -> Result<(), PlanError> {
    if !value.is_finite() {
        return Err(PlanError::non_finite(field));
    }
    if value < 0.0 {
        return Err(PlanError::negative(field, value));
    }
    Ok(())
}

/// Check that an annual rate is finite and above -100%
pub(crate) fn check_rate(field: &str, value: f64) -> Result<(), PlanError> {
    if !value.is_finite() {
        return Err(PlanError::non_finite(field));
    }
    if value <= -1.0 {
        return Err(PlanError::rate(field, value));
    }
    Ok(())
}
