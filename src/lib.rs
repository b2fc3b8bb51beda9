//! Payback Analysis - cash flow evaluation for capital investments
//!
//! This library provides:
//! - Adjustment of period cash flows for operating costs, inflation and tax
//! - Simple and discounted payback periods
//! - Net present value and internal rate of return
//! - Cumulative and discounted-cumulative series for charting
//! - Batch scenarios and NPV profiles over a range of discount rates

pub mod error;
pub mod cashflow;
pub mod analysis;
pub mod config;
pub mod scenario;

// Re-export commonly used types
pub use error::AnalysisError;
pub use cashflow::{AnalysisParameters, CashFlowPeriod, ExponentBasis};
pub use analysis::{analyze, AnalysisResult, AnalyzerConfig, CashFlowAnalyzer};
pub use config::AnalysisRequest;
pub use scenario::ScenarioRunner;
