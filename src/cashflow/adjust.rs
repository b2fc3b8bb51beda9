//! Adjustment of raw cash flows for operating costs, inflation and tax
//!
//! Adjustments are applied in a fixed order:
//! 1. subtract the operating cost for the period
//! 2. deflate by `(1 + inflation)^n`
//! 3. multiply by `(1 - tax)`
//!
//! Periods are never dropped, even when the adjusted value is zero or negative.

use super::data::{AnalysisParameters, CashFlowPeriod};

/// Apply the enabled adjustments to a single period's raw value
pub fn adjust_value(raw: f64, exponent: i32, params: &AnalysisParameters) -> f64 {
    let mut value = raw;

    if params.include_operating_costs {
        value -= params.operating_cost_per_period;
    }

    if params.include_inflation {
        value /= (1.0 + params.inflation_rate_percent / 100.0).powi(exponent);
    }

    if params.include_tax {
        value *= 1.0 - params.tax_rate_percent / 100.0;
    }

    value
}

/// Produce the adjusted cash flow sequence, same length and order as the input
pub fn adjust_cash_flows(flows: &[CashFlowPeriod], params: &AnalysisParameters) -> Vec<f64> {
    flows
        .iter()
        .enumerate()
        .map(|(i, flow)| {
            let exponent = params.exponent_basis.exponent(i, flow);
            adjust_value(flow.value, exponent, params)
        })
        .collect()
}
