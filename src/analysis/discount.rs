//! Periodic discounting for NPV and discounted payback

use serde::{Deserialize, Serialize};

/// Flat periodic discount rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountCurve {
    /// Rate per period as a decimal (0.10 for 10%)
    pub rate: f64,
}

impl DiscountCurve {
    /// Create a curve from a decimal rate
    pub fn single_rate(rate: f64) -> Self {
        Self { rate }
    }

    /// Create a curve from a percentage rate (10.0 = 10%)
    pub fn from_percent(rate_percent: f64) -> Self {
        Self::single_rate(rate_percent / 100.0)
    }

    /// Discount factor to period `n`: `1 / (1 + r)^n`
    pub fn discount_factor(&self, n: i32) -> f64 {
        1.0 / (1.0 + self.rate).powi(n)
    }

    /// Present value of a single amount received at period `n`
    pub fn present_value(&self, amount: f64, n: i32) -> f64 {
        amount / (1.0 + self.rate).powi(n)
    }

    /// Present value of a stream of `(exponent, amount)` pairs
    pub fn pv_stream(&self, flows: &[(i32, f64)]) -> f64 {
        flows
            .iter()
            .map(|&(n, amount)| self.present_value(amount, n))
            .sum()
    }

    /// Net present value: `-investment + Σ amount / (1 + r)^n`
    pub fn npv(&self, investment: f64, flows: &[(i32, f64)]) -> f64 {
        -investment + self.pv_stream(flows)
    }
}

impl Default for DiscountCurve {
    fn default() -> Self {
        Self::single_rate(0.10)
    }
}
