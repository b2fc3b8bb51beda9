//! Payback Analysis CLI
//!
//! Runs one cash flow analysis from a JSON request, a CSV file or inline
//! values, and prints a report (or the JSON result with --json).

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use payback_analysis::analysis::{format_percent, format_years};
use payback_analysis::cashflow::load_cash_flows;
use payback_analysis::{
    AnalysisParameters, AnalysisRequest, CashFlowAnalyzer, CashFlowPeriod, ExponentBasis,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BasisArg {
    /// Discount by position in the list
    Position,
    /// Discount by the year column
    Year,
}

impl From<BasisArg> for ExponentBasis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::Position => ExponentBasis::Position,
            BasisArg::Year => ExponentBasis::Year,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "payback", version, about = "Payback period, NPV and IRR for a cash flow series")]
struct Cli {
    /// JSON request file (parameters and cash flows together)
    #[arg(long, conflicts_with_all = ["cash_flows", "values"])]
    request: Option<PathBuf>,

    /// CSV file with `year,value` columns
    #[arg(long, conflicts_with = "values")]
    cash_flows: Option<PathBuf>,

    /// Comma-separated period values, e.g. 25000,30000,35000
    #[arg(long, value_delimiter = ',')]
    values: Vec<f64>,

    /// Initial investment (positive amount)
    #[arg(long, env = "PAYBACK_INITIAL_INVESTMENT")]
    investment: Option<f64>,

    /// Discount rate in percent
    #[arg(long, env = "PAYBACK_DISCOUNT_RATE", default_value_t = 10.0)]
    discount_rate: f64,

    /// Operating cost subtracted from each period
    #[arg(long, env = "PAYBACK_OPERATING_COST")]
    operating_cost: Option<f64>,

    /// Inflation rate in percent
    #[arg(long, env = "PAYBACK_INFLATION_RATE")]
    inflation: Option<f64>,

    /// Tax rate in percent
    #[arg(long, env = "PAYBACK_TAX_RATE")]
    tax: Option<f64>,

    /// Which number is used as the discount exponent
    #[arg(long, value_enum, default_value = "position")]
    exponent_basis: BasisArg,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Write the per-period table to this CSV file
    #[arg(long)]
    output_csv: Option<PathBuf>,
}

impl Cli {
    fn into_request(self) -> Result<AnalysisRequest> {
        if let Some(path) = &self.request {
            return AnalysisRequest::from_path(path)
                .with_context(|| format!("Failed to read request {}", path.display()));
        }

        let cash_flows = match &self.cash_flows {
            Some(path) => load_cash_flows(path)
                .with_context(|| format!("Failed to load cash flows from {}", path.display()))?,
            None if !self.values.is_empty() => CashFlowPeriod::series(&self.values),
            None => bail!("Provide --request, --cash-flows or --values"),
        };

        let Some(investment) = self.investment else {
            bail!("--investment is required unless --request is given");
        };

        let mut parameters = AnalysisParameters::new(investment, self.discount_rate)
            .with_exponent_basis(self.exponent_basis.into());
        if let Some(cost) = self.operating_cost {
            parameters = parameters.with_operating_costs(cost);
        }
        if let Some(rate) = self.inflation {
            parameters = parameters.with_inflation(rate);
        }
        if let Some(rate) = self.tax {
            parameters = parameters.with_tax(rate);
        }

        Ok(AnalysisRequest {
            parameters,
            cash_flows,
            irr_options: None,
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let json_output = cli.json;
    let output_csv = cli.output_csv.clone();

    let request = cli.into_request()?;
    let analyzer = CashFlowAnalyzer::new(request.analyzer_config());
    log::debug!("Analyzer config: {:?}", analyzer.config());
    let result = analyzer
        .analyze(&request.parameters, &request.cash_flows)
        .context("Analysis rejected the input")?;

    if let Some(path) = &output_csv {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        for row in &result.periods {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Payback Analysis");
    println!("================\n");
    println!("{}\n", result.report());

    println!("{:>6} {:>6} {:>14} {:>14} {:>10} {:>14} {:>14} {:>14}",
        "Period", "Year", "Raw", "Adjusted", "DF", "Discounted", "Cumulative", "Disc. Cum.");
    println!("{}", "-".repeat(100));
    for row in &result.periods {
        println!("{:>6} {:>6} {:>14.2} {:>14.2} {:>10.6} {:>14.2} {:>14.2} {:>14.2}",
            row.period,
            row.year,
            row.raw,
            row.adjusted,
            row.discount_factor,
            row.discounted,
            row.cumulative,
            row.discounted_cumulative,
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Periods: {}", summary.periods);
    println!("  Total adjusted inflows: {:.2}", summary.total_adjusted);
    println!("  Total discounted inflows: {:.2}", summary.total_discounted);
    println!("  Net cash flow: {:.2}", summary.net_cash_flow);
    println!("  Recovered: {} (discounted: {})",
        format_years(result.simple_payback_period),
        format_years(result.discounted_payback_period));
    println!("  IRR: {}", format_percent(result.irr));

    if let Some(path) = &output_csv {
        println!("\nPeriod table written to: {}", path.display());
    }

    Ok(())
}
