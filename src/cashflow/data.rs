//! Cash flow input structures matching the calculator request format

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Largest `year` accepted when years are used as exponents
pub const MAX_YEAR: u32 = 1000;

/// Default discount rate (percent) when none is supplied
fn default_discount_rate_percent() -> f64 {
    10.0
}

/// A single period's expected cash inflow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPeriod {
    /// Period number as supplied by the caller (1 = first year)
    pub year: u32,

    /// Undiscounted, unadjusted inflow for the period
    pub value: f64,
}

impl CashFlowPeriod {
    pub fn new(year: u32, value: f64) -> Self {
        Self { year, value }
    }

    /// Build contiguous periods 1..=N from a plain list of values
    pub fn series(values: &[f64]) -> Vec<CashFlowPeriod> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| CashFlowPeriod::new(i as u32 + 1, value))
            .collect()
    }
}

/// Which number is used as the discount (and inflation) exponent for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExponentBasis {
    /// 1-based position in the supplied list; `year` is informational only
    #[default]
    Position,
    /// The caller-supplied `year` field
    Year,
}

impl ExponentBasis {
    /// Exponent for the period at zero-based `position`
    pub fn exponent(&self, position: usize, period: &CashFlowPeriod) -> i32 {
        match self {
            ExponentBasis::Position => i32::try_from(position + 1).unwrap_or(i32::MAX),
            ExponentBasis::Year => i32::try_from(period.year).unwrap_or(i32::MAX),
        }
    }
}

impl std::str::FromStr for ExponentBasis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "position" => Ok(ExponentBasis::Position),
            "year" => Ok(ExponentBasis::Year),
            other => Err(format!("Unknown exponent basis: {} (expected position or year)", other)),
        }
    }
}

/// Scalar inputs for one analysis call
///
/// Field names serialize in camelCase so a calculator form payload can be
/// deserialized directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisParameters {
    /// Up-front investment, recorded as a positive amount
    pub initial_investment: f64,

    /// Discount rate in percent (10.0 = 10%)
    #[serde(default = "default_discount_rate_percent")]
    pub discount_rate_percent: f64,

    #[serde(default)]
    pub include_operating_costs: bool,
    /// Flat cost subtracted from every period's inflow
    #[serde(default)]
    pub operating_cost_per_period: f64,

    #[serde(default)]
    pub include_inflation: bool,
    #[serde(default)]
    pub inflation_rate_percent: f64,

    #[serde(default)]
    pub include_tax: bool,
    /// Tax rate in percent, 0..=100
    #[serde(default)]
    pub tax_rate_percent: f64,

    #[serde(default)]
    pub exponent_basis: ExponentBasis,
}

impl AnalysisParameters {
    /// Parameters with no adjustments enabled
    pub fn new(initial_investment: f64, discount_rate_percent: f64) -> Self {
        Self {
            initial_investment,
            discount_rate_percent,
            include_operating_costs: false,
            operating_cost_per_period: 0.0,
            include_inflation: false,
            inflation_rate_percent: 0.0,
            include_tax: false,
            tax_rate_percent: 0.0,
            exponent_basis: ExponentBasis::Position,
        }
    }

    pub fn with_operating_costs(mut self, cost_per_period: f64) -> Self {
        self.include_operating_costs = true;
        self.operating_cost_per_period = cost_per_period;
        self
    }

    pub fn with_inflation(mut self, rate_percent: f64) -> Self {
        self.include_inflation = true;
        self.inflation_rate_percent = rate_percent;
        self
    }

    pub fn with_tax(mut self, rate_percent: f64) -> Self {
        self.include_tax = true;
        self.tax_rate_percent = rate_percent;
        self
    }

    pub fn with_exponent_basis(mut self, basis: ExponentBasis) -> Self {
        self.exponent_basis = basis;
        self
    }

    /// Discount rate as a decimal (0.10 for 10%)
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate_percent / 100.0
    }

    /// Check scalar parameters. Disabled adjustments are not inspected.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_investment.is_finite() || self.initial_investment <= 0.0 {
            return Err(AnalysisError::invalid(
                "initialInvestment",
                format!("must be a finite amount > 0, got {}", self.initial_investment),
            ));
        }
        check_non_negative("discountRatePercent", self.discount_rate_percent)?;

        if self.include_operating_costs {
            check_non_negative("operatingCostPerPeriod", self.operating_cost_per_period)?;
        }
        if self.include_inflation {
            check_non_negative("inflationRatePercent", self.inflation_rate_percent)?;
        }
        if self.include_tax {
            check_non_negative("taxRatePercent", self.tax_rate_percent)?;
            if self.tax_rate_percent > 100.0 {
                return Err(AnalysisError::invalid(
                    "taxRatePercent",
                    format!("must be within 0..=100, got {}", self.tax_rate_percent),
                ));
            }
        }
        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AnalysisError::invalid(
            field,
            format!("must be a finite value >= 0, got {}", value),
        ));
    }
    Ok(())
}

/// Check the cash flow list before analysis.
///
/// Values must be finite and non-negative. Under [`ExponentBasis::Year`] every
/// `year` must be within `1..=MAX_YEAR`; under [`ExponentBasis::Position`] gaps or
/// reordering in `year` are only logged, since the list order is what counts.
pub fn validate_cash_flows(flows: &[CashFlowPeriod], basis: ExponentBasis) -> Result<()> {
    if flows.is_empty() {
        return Err(AnalysisError::EmptyCashFlows);
    }

    for (i, flow) in flows.iter().enumerate() {
        if !flow.value.is_finite() || flow.value < 0.0 {
            return Err(AnalysisError::invalid(
                format!("cashFlows[{}].value", i),
                format!("must be a finite value >= 0, got {}", flow.value),
            ));
        }
        if basis == ExponentBasis::Year && (flow.year == 0 || flow.year > MAX_YEAR) {
            return Err(AnalysisError::invalid(
                format!("cashFlows[{}].year", i),
                format!(
                    "must be within 1..={} when years are used as discount exponents, got {}",
                    MAX_YEAR, flow.year
                ),
            ));
        }
    }

    if basis == ExponentBasis::Position && !is_contiguous(flows) {
        warn!(
            "Cash flow years are not contiguous from 1; discounting by list position ({} periods)",
            flows.len()
        );
    }

    Ok(())
}

/// True when years run 1, 2, 3, ... in list order
pub fn is_contiguous(flows: &[CashFlowPeriod]) -> bool {
    flows
        .iter()
        .enumerate()
        .all(|(i, flow)| flow.year as usize == i + 1)
}
