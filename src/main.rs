//! Retirement Engine CLI
//!
//! Command-line interface for running retirement plan projections

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use retirement_engine::income::VaRateTable;
use retirement_engine::plan::{
    load_plan, write_balances_csv, EngineConfig, RetirementEngine, RetirementPlanResult,
};
use retirement_engine::scenario::{Adjustment, Scenario, ScenarioRunner};

#[derive(Parser)]
#[command(name = "retirement_engine")]
#[command(about = "Military retirement projection and readiness scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a single plan
    Run {
        /// Plan JSON file
        #[arg(long, default_value = "data/sample_plan.json")]
        plan: PathBuf,
        /// Write yearly combined balances to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// VA compensation schedule CSV (rating,monthly)
        #[arg(long)]
        va_rates: Option<PathBuf>,
    },
    /// Compare the plan under different inflation and retirement-age assumptions
    Scenarios {
        /// Plan JSON file
        #[arg(long, default_value = "data/sample_plan.json")]
        plan: PathBuf,
        /// General inflation rates to try, e.g. 0.02,0.03
        #[arg(long, value_delimiter = ',')]
        inflation: Vec<f64>,
        /// Retirement ages to try, e.g. 58,60,62
        #[arg(long, value_delimiter = ',')]
        retire_at: Vec<u32>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { plan, csv, json, va_rates } => run(plan, csv, json, va_rates),
        Commands::Scenarios { plan, inflation, retire_at } => scenarios(plan, inflation, retire_at),
    }
}

fn engine_config(va_rates: Option<PathBuf>) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();
    if let Some(path) = va_rates {
        config.va_rates = VaRateTable::from_csv_path(&path)
            .with_context(|| format!("loading VA rates from {}", path.display()))?;
    }
    Ok(config)
}

fn run(plan_path: PathBuf, csv: Option<PathBuf>, json: bool, va_rates: Option<PathBuf>) -> Result<()> {
    let plan = load_plan(&plan_path)
        .with_context(|| format!("loading plan from {}", plan_path.display()))?;
    let engine = RetirementEngine::new(engine_config(va_rates)?);
    let result = engine.run(&plan).context("plan failed validation")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    if let Some(path) = csv {
        let file = File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_balances_csv(file, &result.balances)?;
        println!("\nYearly balances written to: {}", path.display());
    }

    Ok(())
}

fn print_result(result: &RetirementPlanResult) {
    let summary = &result.summary;

    println!("Retirement Plan Summary");
    println!("=======================\n");
    println!("  Years to retirement:        {}", summary.years_until_retirement);
    if let Some(date) = summary.retirement_date {
        println!("  Retirement date:            {}", date);
    }
    println!("  Portfolio at retirement:    ${:.2}", summary.projected_balance_at_retirement);
    println!("  Monthly income (nominal):   ${:.2}", summary.total_monthly_income_nominal);
    println!("  Monthly income (real):      ${:.2}", summary.total_monthly_income_real);
    println!("  Annual spending:            ${:.2}", summary.annual_spending);
    println!("  Readiness score:            {} / 100", summary.readiness_score);

    println!("\nIncome Sources:");
    for stream in &result.incomes {
        println!("  {:<18} ${:>10.2}/mo  ${:>12.2}/yr", stream.source.label(), stream.monthly, stream.annual);
    }

    println!("\nWithdrawal Strategies:");
    for w in &result.withdrawals {
        println!("  {:<20} ${:>12.2}  ({:.0}% success)", w.strategy, w.annual_withdrawal, w.success_probability * 100.0);
    }

    println!("\nProjected Balances:");
    println!("{:>5} {:>4} {:>16} {:>16} {:>14} {:>14}", "Year", "Age", "Nominal", "Real", "Contrib", "Growth");
    println!("{}", "-".repeat(74));
    for row in &result.balances {
        println!(
            "{:>5} {:>4} {:>16.2} {:>16.2} {:>14.2} {:>14.2}",
            row.year, row.age, row.nominal_balance, row.real_balance, row.contributions, row.growth
        );
    }

    let guidance = &result.guidance;
    let sections = [
        ("Suggestions", &guidance.suggestions),
        ("Allocation Ideas", &guidance.allocation_ideas),
        ("Risk Notes", &guidance.risk_notes),
        ("Spending Adjustments", &guidance.spending_adjustments),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        println!("\n{}:", title);
        for item in items {
            println!("  - {}", item);
        }
    }
}

fn scenarios(plan_path: PathBuf, inflation: Vec<f64>, retire_at: Vec<u32>) -> Result<()> {
    let plan = load_plan(&plan_path)
        .with_context(|| format!("loading plan from {}", plan_path.display()))?;
    let runner = ScenarioRunner::new(plan);

    let mut scenarios = vec![Scenario::new("base", Vec::new())];
    scenarios.extend(
        inflation
            .iter()
            .map(|&rate| Scenario::new(format!("inflation {:.1}%", rate * 100.0), vec![Adjustment::GeneralInflation(rate)])),
    );
    scenarios.extend(
        retire_at
            .iter()
            .map(|&age| Scenario::new(format!("retire at {}", age), vec![Adjustment::RetirementAge(age)])),
    );

    println!("{:<20} {:>10} {:>18} {:>16}", "Scenario", "Readiness", "Portfolio", "Real Income/mo");
    println!("{}", "-".repeat(67));
    for outcome in runner.run_scenarios(&scenarios) {
        match outcome.result {
            Ok(result) => println!(
                "{:<20} {:>10} {:>18.2} {:>16.2}",
                outcome.name,
                result.summary.readiness_score,
                result.summary.projected_balance_at_retirement,
                result.summary.total_monthly_income_real,
            ),
            Err(e) => println!("{:<20} error: {}", outcome.name, e),
        }
    }

    Ok(())
}
