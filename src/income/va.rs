//! VA disability compensation estimate from a combined rating
//!
//! Rates are the veteran-alone monthly schedule (no dependents). A different
//! schedule can be loaded from a CSV file with `rating,monthly` columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{project_with_cola, AnnualIncome};
use crate::error::{check_money, check_rate, PlanError};

/// Veteran-alone monthly compensation for ratings 0, 10, ..., 100
const DEFAULT_MONTHLY_RATES: [f64; 11] = [
    0.0, 171.23, 338.49, 524.31, 755.28, 1_075.16, 1_361.88, 1_716.28, 1_995.01, 2_241.91,
    3_737.85,
];

/// Monthly compensation indexed by rating / 10
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaRateTable {
    monthly_by_decile: [f64; 11],
}

impl Default for VaRateTable {
    fn default() -> Self {
        Self {
            monthly_by_decile: DEFAULT_MONTHLY_RATES,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    rating: u8,
    monthly: f64,
}

impl VaRateTable {
    /// Load a schedule from a CSV file. Ratings missing from the file pay 0.
    pub fn from_csv_path(path: &Path) -> Result<Self, PlanError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a schedule from any reader producing `rating,monthly` CSV.
    ///
    /// Each rating may appear at most once.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PlanError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut monthly_by_decile = [0.0; 11];
        let mut seen = [false; 11];

        for result in csv_reader.deserialize() {
            let row: CsvRow = result?;
            if row.rating > 100 || row.rating % 10 != 0 {
                return Err(PlanError::InvalidRating(row.rating));
            }
            check_money(&format!("vaRates[{}]", row.rating), row.monthly)?;

            let decile = (row.rating / 10) as usize;
            if seen[decile] {
                return Err(PlanError::DuplicateRating(row.rating));
            }
            seen[decile] = true;
            monthly_by_decile[decile] = row.monthly;
        }

        Ok(Self { monthly_by_decile })
    }

    /// Monthly compensation for a rating, after rounding to the nearest 10
    pub fn monthly_for(&self, rating: u8) -> f64 {
        let decile = (round_rating(rating) / 10) as usize;
        self.monthly_by_decile[decile]
    }
}

/// Round a combined rating to the nearest 10 (5 rounds up), capped at 100
pub fn round_rating(rating: u8) -> u8 {
    let rounded = (rating as u16 + 5) / 10 * 10;
    rounded.min(100) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaInput {
    /// Combined disability rating (0-100)
    pub rating: u8,

    #[serde(default)]
    pub cola_rate: f64,
}

impl VaInput {
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.rating > 100 {
            return Err(PlanError::InvalidRating(self.rating));
        }
        check_rate("vaDisability.colaRate", self.cola_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaIncome {
    /// Rating used for the lookup, after rounding
    pub rating: u8,
    pub monthly: f64,
    pub annual: f64,
    pub cola_rate: f64,
}

pub fn estimate_va_income(input: &VaInput, rates: &VaRateTable) -> VaIncome {
    let monthly = rates.monthly_for(input.rating);
    VaIncome {
        rating: round_rating(input.rating),
        monthly,
        annual: monthly * 12.0,
        cola_rate: input.cola_rate,
    }
}

pub fn project_va_income(va: &VaIncome, years: u32) -> Vec<AnnualIncome> {
    project_with_cola(va.annual, va.cola_rate, years)
}
