//! Cash flow analyzer: payback, NPV, IRR and cumulative series in one pass

use log::debug;

use crate::cashflow::{adjust_cash_flows, validate_cash_flows, AnalysisParameters, CashFlowPeriod};
use crate::error::Result;
use super::discount::DiscountCurve;
use super::irr::{calculate_irr, sign_changes, IrrOptions};
use super::payback::payback_period;
use super::result::{AnalysisResult, PeriodRow};

/// Configuration for the analyzer
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// IRR root finder tuning
    pub irr: IrrOptions,
}

/// Stateless analyzer; every call is independent
#[derive(Debug, Clone, Default)]
pub struct CashFlowAnalyzer {
    config: AnalyzerConfig,
}

impl CashFlowAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a cash flow series.
    ///
    /// Fails only on invalid input. "No payback" and "no IRR" are `None`
    /// fields on the result.
    pub fn analyze(&self, params: &AnalysisParameters, flows: &[CashFlowPeriod]) -> Result<AnalysisResult> {
        params.validate()?;
        validate_cash_flows(flows, params.exponent_basis)?;

        let investment = params.initial_investment;
        let curve = DiscountCurve::single_rate(params.discount_rate());

        let exponents: Vec<i32> = flows
            .iter()
            .enumerate()
            .map(|(i, flow)| params.exponent_basis.exponent(i, flow))
            .collect();
        let adjusted = adjust_cash_flows(flows, params);
        let discounted: Vec<f64> = adjusted
            .iter()
            .zip(&exponents)
            .map(|(&value, &n)| curve.present_value(value, n))
            .collect();

        let simple_payback = payback_period(investment, &adjusted, &exponents);
        let discounted_payback = payback_period(investment, &discounted, &exponents);

        let npv = -investment + discounted.iter().sum::<f64>();

        let weighted: Vec<(i32, f64)> = exponents.iter().copied().zip(adjusted.iter().copied()).collect();
        let irr = calculate_irr(investment, &weighted, &self.config.irr);

        let cumulative = cumulative_series(investment, &adjusted);
        let discounted_cumulative = cumulative_series(investment, &discounted);

        let periods = flows
            .iter()
            .enumerate()
            .map(|(i, flow)| PeriodRow {
                period: i as u32 + 1,
                year: flow.year,
                exponent: exponents[i],
                raw: flow.value,
                adjusted: adjusted[i],
                discount_factor: curve.discount_factor(exponents[i]),
                discounted: discounted[i],
                cumulative: cumulative[i + 1],
                discounted_cumulative: discounted_cumulative[i + 1],
            })
            .collect();

        debug!(
            "Analyzed {} periods: npv={:.2} payback={:?} discounted_payback={:?} irr={:?}",
            flows.len(),
            npv,
            simple_payback,
            discounted_payback,
            irr.map(|s| s.rate_percent())
        );

        Ok(AnalysisResult {
            simple_payback_period: simple_payback,
            discounted_payback_period: discounted_payback,
            npv,
            irr: irr.map(|s| s.rate_percent()),
            irr_method: irr.map(|s| s.method),
            sign_changes: sign_changes(investment, &weighted),
            cumulative_cash_flows: cumulative,
            discounted_cumulative_cash_flows: discounted_cumulative,
            periods,
            initial_investment: investment,
        })
    }
}

/// Analyze with the default configuration
pub fn analyze(params: &AnalysisParameters, flows: &[CashFlowPeriod]) -> Result<AnalysisResult> {
    CashFlowAnalyzer::default().analyze(params, flows)
}

/// `-investment` followed by the running total after each value
pub fn cumulative_series(investment: f64, values: &[f64]) -> Vec<f64> {
    let mut series = Vec::with_capacity(values.len() + 1);
    let mut running = -investment;
    series.push(running);
    for &value in values {
        running += value;
        series.push(running);
    }
    series
}
