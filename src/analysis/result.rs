//! Analysis output structures

use serde::{Deserialize, Serialize};

use super::irr::IrrMethod;

/// One row of the per-period breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRow {
    /// 1-based position in the input list
    pub period: u32,
    /// Caller-supplied year label
    pub year: u32,
    /// Exponent used for discounting and inflation
    pub exponent: i32,

    pub raw: f64,
    pub adjusted: f64,
    pub discount_factor: f64,
    pub discounted: f64,

    /// Running totals at the end of this period, starting from `-investment`
    pub cumulative: f64,
    pub discounted_cumulative: f64,
}

/// Complete result of one analysis call
///
/// `None` means "not applicable": the investment is not recovered within the
/// horizon, or no IRR could be found. It is serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Periods until the investment is recovered, fractional
    pub simple_payback_period: Option<f64>,

    /// Same as above using discounted values
    pub discounted_payback_period: Option<f64>,

    pub npv: f64,

    /// IRR in percent (12.0 for 12%)
    pub irr: Option<f64>,
    pub irr_method: Option<IrrMethod>,
    /// Sign changes in `-investment, cf1, ..., cfN`; above 1 the IRR may not be unique
    pub sign_changes: usize,

    /// `-investment` followed by the running total after each period (N + 1 values)
    pub cumulative_cash_flows: Vec<f64>,
    pub discounted_cumulative_cash_flows: Vec<f64>,

    pub periods: Vec<PeriodRow>,

    /// Echo of the investment the series were built from
    pub initial_investment: f64,
}

impl AnalysisResult {
    /// Get summary statistics
    pub fn summary(&self) -> AnalysisSummary {
        let total_raw: f64 = self.periods.iter().map(|r| r.raw).sum();
        let total_adjusted: f64 = self.periods.iter().map(|r| r.adjusted).sum();
        let total_discounted: f64 = self.periods.iter().map(|r| r.discounted).sum();

        let profitability_index = if self.initial_investment > 0.0 {
            total_discounted / self.initial_investment
        } else {
            0.0
        };

        AnalysisSummary {
            periods: self.periods.len() as u32,
            total_raw,
            total_adjusted,
            total_discounted,
            net_cash_flow: self.cumulative_cash_flows.last().copied().unwrap_or(0.0),
            profitability_index,
            recovered: self.simple_payback_period.is_some(),
            recovered_discounted: self.discounted_payback_period.is_some(),
        }
    }

    /// Multi-line plain text report, "N/A" for missing figures
    pub fn report(&self) -> String {
        let summary = self.summary();
        let mut lines = vec![
            format!("Initial investment:        {:.2}", self.initial_investment),
            format!("Simple payback period:     {}", format_years(self.simple_payback_period)),
            format!("Discounted payback period: {}", format_years(self.discounted_payback_period)),
            format!("Net present value:         {:.2}", self.npv),
            format!("Internal rate of return:   {}", format_percent(self.irr)),
            format!("Profitability index:       {:.4}", summary.profitability_index),
        ];
        if self.sign_changes > 1 {
            lines.push(format!(
                "Note: cash flows change sign {} times; IRR may not be unique",
                self.sign_changes
            ));
        }
        lines.join("\n")
    }
}

/// Summary statistics for an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub periods: u32,
    pub total_raw: f64,
    pub total_adjusted: f64,
    pub total_discounted: f64,
    /// Undiscounted total after the last period, net of the investment
    pub net_cash_flow: f64,
    /// Present value of inflows divided by the investment
    pub profitability_index: f64,
    pub recovered: bool,
    pub recovered_discounted: bool,
}

/// "3.25 years", or "N/A" when there is no payback
pub fn format_years(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2} years", v),
        _ => "N/A".to_string(),
    }
}

/// "19.71%", or "N/A" when there is no rate
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v),
        _ => "N/A".to_string(),
    }
}
