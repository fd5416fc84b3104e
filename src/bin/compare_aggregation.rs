//! Cross-check incremental account aggregation against year-by-year re-projection
//!
//! Usage: cargo run --bin compare_aggregation -- [plan.json] [years]

use retirement_engine::accounts::{aggregate_accounts, project_account};
use retirement_engine::finance::YearlyBalance;
use retirement_engine::plan::loader::{load_plan, DEFAULT_PLAN_PATH};
use std::env;
use std::time::Instant;

/// Re-project every account up to each year and sum the final entries
fn reproject_each_year(plan: &retirement_engine::RetirementPlanInput, years: u32) -> Vec<YearlyBalance> {
    (1..=years)
        .map(|year| {
            let mut total = YearlyBalance::empty(year);
            for account in &plan.accounts {
                if let Some(last) = project_account(account, year).last() {
                    total.nominal_balance += last.nominal_balance;
                    total.contributions += last.contributions;
                    total.growth += last.growth;
                }
            }
            total.real_balance = total.nominal_balance;
            total
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_PLAN_PATH);

    println!("Loading plan from {}...", path);
    let plan = load_plan(path).expect("Failed to load plan");
    let years = args
        .get(2)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(plan.projection_years);
    println!("  {} accounts, {} years", plan.accounts.len(), years);

    let start = Instant::now();
    let incremental = aggregate_accounts(&plan.accounts, years);
    let incremental_time = start.elapsed();

    let start = Instant::now();
    let naive = reproject_each_year(&plan, years);
    let naive_time = start.elapsed();

    let max_diff = incremental
        .iter()
        .zip(&naive)
        .map(|(a, b)| (a.nominal_balance - b.nominal_balance).abs())
        .fold(0.0_f64, f64::max);

    println!("\nIncremental merge: {:?}", incremental_time);
    println!("Re-projection:     {:?}", naive_time);
    println!("Max balance difference: {:.2e}", max_diff);

    if let Some(last) = incremental.last() {
        println!("Year {} combined balance: ${:.2}", last.year, last.nominal_balance);
    }

    if max_diff > 1e-6 {
        eprintln!("Aggregation mismatch");
        std::process::exit(1);
    }
}
