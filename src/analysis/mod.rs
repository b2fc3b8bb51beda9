//! Cash flow analysis: payback, discounted payback, NPV and IRR

mod discount;
mod payback;
mod engine;
mod result;
pub mod irr;

pub use discount::DiscountCurve;
pub use payback::payback_period;
pub use engine::{analyze, cumulative_series, AnalyzerConfig, CashFlowAnalyzer};
pub use result::{format_percent, format_years, AnalysisResult, AnalysisSummary, PeriodRow};
pub use irr::{calculate_irr, npv_at_rate, IrrMethod, IrrOptions, IrrSolution};
