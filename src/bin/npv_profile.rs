//! NPV profile across a range of discount rates
//!
//! Outputs one row per rate, or JSON with --json. Useful for locating the
//! IRR(s) of a series by eye, including series with several sign changes.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use payback_analysis::cashflow::load_cash_flows;
use payback_analysis::scenario::{rate_range, NpvPoint};
use payback_analysis::{AnalysisParameters, CashFlowPeriod, ExponentBasis, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "npv_profile", version, about = "NPV across a range of discount rates")]
struct Cli {
    /// CSV file with `year,value` columns
    #[arg(long, conflicts_with = "values")]
    cash_flows: Option<PathBuf>,

    /// Comma-separated period values
    #[arg(long, value_delimiter = ',')]
    values: Vec<f64>,

    /// Initial investment (positive amount)
    #[arg(long, env = "PAYBACK_INITIAL_INVESTMENT")]
    investment: f64,

    /// Operating cost subtracted from each period
    #[arg(long, env = "PAYBACK_OPERATING_COST")]
    operating_cost: Option<f64>,

    /// Inflation rate in percent
    #[arg(long, env = "PAYBACK_INFLATION_RATE")]
    inflation: Option<f64>,

    /// Tax rate in percent
    #[arg(long, env = "PAYBACK_TAX_RATE")]
    tax: Option<f64>,

    /// Which number is used as the discount exponent (position or year)
    #[arg(long, default_value = "position")]
    exponent_basis: ExponentBasis,

    /// First rate in percent; may be negative but must stay above -100
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    from: f64,

    /// Last rate in percent
    #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
    to: f64,

    /// Step in percent
    #[arg(long, default_value_t = 2.5)]
    step: f64,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    initial_investment: f64,
    irr_percent: Option<f64>,
    points: Vec<NpvPoint>,
}

/// Adjustments from the flags; the swept rates replace the discount rate
fn profile_parameters(cli: &Cli) -> AnalysisParameters {
    let mut params = AnalysisParameters::new(cli.investment, 0.0).with_exponent_basis(cli.exponent_basis);
    if let Some(cost) = cli.operating_cost {
        params = params.with_operating_costs(cost);
    }
    if let Some(rate) = cli.inflation {
        params = params.with_inflation(rate);
    }
    if let Some(rate) = cli.tax {
        params = params.with_tax(rate);
    }
    params
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let cash_flows = match &cli.cash_flows {
        Some(path) => load_cash_flows(path)
            .with_context(|| format!("Failed to load cash flows from {}", path.display()))?,
        None => CashFlowPeriod::series(&cli.values),
    };

    let runner = ScenarioRunner::new(cash_flows);
    let params = profile_parameters(&cli);
    let rates = rate_range(cli.from, cli.to, cli.step).context("Invalid rate range")?;

    let points = runner.npv_profile(&params, &rates).context("Invalid profile input")?;
    let irr_percent = runner.run(&params).context("Invalid profile input")?.irr;

    if cli.json {
        let response = ProfileResponse {
            initial_investment: cli.investment,
            irr_percent,
            points,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{:>10} {:>16}", "Rate %", "NPV");
    println!("{}", "-".repeat(27));
    for point in &points {
        println!("{:>10.2} {:>16.2}", point.discount_rate_percent, point.npv);
    }
    println!("\nIRR: {}", payback_analysis::analysis::format_percent(irr_percent));

    Ok(())
}
