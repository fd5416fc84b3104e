//! Load plans from JSON and export yearly balances to CSV

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use super::input::RetirementPlanInput;
use crate::error::PlanError;
use crate::finance::YearlyBalance;

/// Default location of the sample plan
pub const DEFAULT_PLAN_PATH: &str = "data/sample_plan.json";

/// Load a plan from a JSON file. The plan is not validated here.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<RetirementPlanInput, PlanError> {
    let file = File::open(path)?;
    load_plan_from_reader(BufReader::new(file))
}

/// Load a plan from any reader (e.g., string buffer, request body)
pub fn load_plan_from_reader<R: Read>(reader: R) -> Result<RetirementPlanInput, PlanError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write yearly balances as CSV with a camelCase header row
pub fn write_balances_csv<W: Write>(writer: W, balances: &[YearlyBalance]) -> Result<(), PlanError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in balances {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
