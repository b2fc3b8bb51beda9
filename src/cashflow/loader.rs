//! Load cash flow periods from CSV

use super::data::CashFlowPeriod;
use crate::error::Result;
use csv::Reader;
use log::{debug, warn};
use std::io::Read;
use std::path::Path;

/// Raw CSV row. Accepts `year,value` headers in any case.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(alias = "Year", alias = "YEAR", alias = "period", alias = "Period")]
    year: u32,
    #[serde(alias = "Value", alias = "VALUE", alias = "cash_flow", alias = "CashFlow")]
    value: f64,
}

/// Load cash flows from a CSV file with a `year,value` header
pub fn load_cash_flows(path: &Path) -> Result<Vec<CashFlowPeriod>> {
    let file = std::fs::File::open(path)?;
    let flows = load_cash_flows_from_reader(file)?;
    debug!("Loaded {} cash flow periods from {}", flows.len(), path.display());
    Ok(flows)
}

/// Load cash flows from any CSV reader. Rows are kept in file order.
pub fn load_cash_flows_from_reader<R: Read>(reader: R) -> Result<Vec<CashFlowPeriod>> {
    let mut rdr = Reader::from_reader(reader);
    let mut flows = Vec::new();

    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        flows.push(CashFlowPeriod::new(row.year, row.value));
    }

    if flows.windows(2).any(|w| w[1].year <= w[0].year) {
        warn!("Cash flow years are not strictly increasing in file order");
    }

    Ok(flows)
}
