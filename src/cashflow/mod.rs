//! Cash flow inputs, validation and adjustment

mod data;
mod adjust;
pub mod loader;

pub use data::{AnalysisParameters, CashFlowPeriod, ExponentBasis, MAX_YEAR, validate_cash_flows, is_contiguous};
pub use adjust::{adjust_cash_flows, adjust_value};
pub use loader::{load_cash_flows, load_cash_flows_from_reader};
