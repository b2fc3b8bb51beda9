//! Scenario runner for comparing parameter sets over one cash flow series
//!
//! Holds the cash flows once, then runs many analyses with different
//! discount rates or adjustment toggles.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, AnalyzerConfig, CashFlowAnalyzer, DiscountCurve};
use crate::cashflow::{adjust_cash_flows, validate_cash_flows, AnalysisParameters, CashFlowPeriod};
use crate::error::{AnalysisError, Result};

/// One point on an NPV profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpvPoint {
    pub discount_rate_percent: f64,
    pub npv: f64,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(CashFlowPeriod::series(&[400.0, 400.0, 400.0]));
///
/// for rate in [5.0, 10.0, 15.0] {
///     let result = runner.run(&AnalysisParameters::new(1000.0, rate))?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    cash_flows: Vec<CashFlowPeriod>,
    analyzer: CashFlowAnalyzer,
}

impl ScenarioRunner {
    /// Create runner with the default analyzer configuration
    pub fn new(cash_flows: Vec<CashFlowPeriod>) -> Self {
        Self::with_config(cash_flows, AnalyzerConfig::default())
    }

    pub fn with_config(cash_flows: Vec<CashFlowPeriod>, config: AnalyzerConfig) -> Self {
        Self {
            cash_flows,
            analyzer: CashFlowAnalyzer::new(config),
        }
    }

    /// Run a single analysis
    pub fn run(&self, params: &AnalysisParameters) -> Result<AnalysisResult> {
        self.analyzer.analyze(params, &self.cash_flows)
    }

    /// Run several parameter sets; each result stands on its own
    pub fn run_scenarios(&self, scenarios: &[AnalysisParameters]) -> Vec<Result<AnalysisResult>> {
        scenarios.iter().map(|params| self.run(params)).collect()
    }

    /// NPV at each of `rates_percent`, using `params` for everything else.
    ///
    /// Adjustments are applied once; only the discounting varies. Profile
    /// rates may be negative but must stay above -100%; the discount rate in
    /// `params` is not used.
    pub fn npv_profile(&self, params: &AnalysisParameters, rates_percent: &[f64]) -> Result<Vec<NpvPoint>> {
        params.validate()?;
        validate_cash_flows(&self.cash_flows, params.exponent_basis)?;
        if let Some(&rate) = rates_percent.iter().find(|r| !r.is_finite() || **r <= -100.0) {
            return Err(AnalysisError::invalid(
                "discountRatePercent",
                format!("profile rates must be finite and above -100%, got {}", rate),
            ));
        }

        let adjusted = adjust_cash_flows(&self.cash_flows, params);
        let flows: Vec<(i32, f64)> = self
            .cash_flows
            .iter()
            .enumerate()
            .map(|(i, flow)| (params.exponent_basis.exponent(i, flow), adjusted[i]))
            .collect();

        Ok(rates_percent
            .iter()
            .map(|&rate| NpvPoint {
                discount_rate_percent: rate,
                npv: DiscountCurve::from_percent(rate).npv(params.initial_investment, &flows),
            })
            .collect())
    }
}

/// Most points a single profile may hold
pub const MAX_PROFILE_POINTS: usize = 10_000;

/// Rates from `start` to `end` inclusive in steps of `step` (all percent).
///
/// Rates must stay above -100% and the range may hold at most
/// [`MAX_PROFILE_POINTS`] points.
pub fn rate_range(start: f64, end: f64, step: f64) -> Result<Vec<f64>> {
    for (field, value) in [("from", start), ("to", end), ("step", step)] {
        if !value.is_finite() {
            return Err(AnalysisError::invalid(field, format!("must be finite, got {}", value)));
        }
    }
    if start <= -100.0 {
        return Err(AnalysisError::invalid("from", format!("must be above -100%, got {}", start)));
    }
    if end < start {
        return Err(AnalysisError::invalid("to", format!("must be >= from ({}), got {}", start, end)));
    }
    if step <= 0.0 {
        return Err(AnalysisError::invalid("step", format!("must be > 0, got {}", step)));
    }

    let steps = ((end - start) / step + 1e-9).floor();
    if steps >= MAX_PROFILE_POINTS as f64 {
        return Err(AnalysisError::invalid(
            "step",
            format!("range would hold more than {} points", MAX_PROFILE_POINTS),
        ));
    }

    let count = steps as usize;
    Ok((0..=count).map(|i| start + step * i as f64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(CashFlowPeriod::series(&[25_000.0, 30_000.0, 35_000.0, 40_000.0, 45_000.0]))
    }

    #[test]
    fn test_scenario_runner_batch() {
        let runner = runner();
        let scenarios: Vec<_> = [5.0, 10.0, 15.0]
            .iter()
            .map(|&rate| AnalysisParameters::new(100_000.0, rate))
            .collect();

        let results: Vec<_> = runner
            .run_scenarios(&scenarios)
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(results.len(), 3);

        // Higher discount rate gives lower NPV and later discounted payback
        let first: &AnalysisResult = &results[0];
        let last: &AnalysisResult = &results[2];
        assert!(first.npv > last.npv);
        assert!(first.discounted_payback_period.unwrap() < last.discounted_payback_period.unwrap());
        assert_eq!(first.simple_payback_period, last.simple_payback_period);
    }

    #[test]
    fn test_npv_profile_crosses_zero_at_irr() {
        let runner = runner();
        let params = AnalysisParameters::new(100_000.0, 10.0);
        let irr = runner.run(&params).unwrap().irr.unwrap();

        let profile = runner.npv_profile(&params, &[0.0, irr, 30.0]).unwrap();
        assert_eq!(profile[0].npv, 75_000.0);
        assert!(profile[1].npv.abs() < 1e-4);
        assert!(profile[2].npv < 0.0);
    }

    #[test]
    fn test_npv_profile_matches_analysis() {
        let runner = runner();
        let params = AnalysisParameters::new(100_000.0, 12.5).with_inflation(3.0).with_tax(20.0);
        let npv = runner.run(&params).unwrap().npv;
        let profile = runner.npv_profile(&params, &[12.5]).unwrap();
        assert!((profile[0].npv - npv).abs() < 1e-9);
    }

    #[test]
    fn test_npv_profile_below_zero_rates() {
        let runner = runner();
        let params = AnalysisParameters::new(100_000.0, 0.0);
        let profile = runner.npv_profile(&params, &[-5.0, 0.0]).unwrap();
        assert!(profile[0].npv > profile[1].npv);

        assert!(runner.npv_profile(&params, &[-100.0]).is_err());
        assert!(runner.npv_profile(&params, &[f64::NAN]).is_err());
    }

    #[test]
    fn test_rate_range() {
        assert_eq!(rate_range(0.0, 20.0, 5.0).unwrap(), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
        assert_eq!(rate_range(5.0, 5.0, 1.0).unwrap(), vec![5.0]);
        assert_eq!(rate_range(-10.0, 0.0, 5.0).unwrap(), vec![-10.0, -5.0, 0.0]);
    }

    #[test]
    fn test_rate_range_rejects_unbounded_input() {
        assert!(rate_range(0.0, f64::INFINITY, 1.0).is_err());
        assert!(rate_range(f64::NEG_INFINITY, 10.0, 1.0).is_err());
        assert!(rate_range(0.0, 10.0, f64::NAN).is_err());
        assert!(rate_range(0.0, 30.0, 1e-300).is_err());
        assert!(rate_range(0.0, 10.0, 0.0).is_err());
        assert!(rate_range(5.0, 1.0, 1.0).is_err());
        assert!(rate_range(-100.0, 0.0, 1.0).is_err());

        let widest = rate_range(0.0, (MAX_PROFILE_POINTS - 1) as f64, 1.0).unwrap();
        assert_eq!(widest.len(), MAX_PROFILE_POINTS);
        assert!(rate_range(0.0, MAX_PROFILE_POINTS as f64, 1.0).is_err());
    }
}
