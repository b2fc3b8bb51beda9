//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson on `f(r) = -investment + Σ cf / (1 + r)^n`, starting from
//! 10%. A zero or non-finite derivative, a step that leaves `r > -1`, or
//! running out of iterations ends the Newton phase. A bracketed bisection
//! fallback is then tried; if the bracket holds no sign change the IRR is
//! reported as `None`.
//!
//! Series with more than one sign change can have several IRRs (or none).
//! Whatever root is found is only one of them; callers get the number of sign
//! changes alongside the rate so they can decide whether to trust it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Tuning for the IRR root finder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrOptions {
    /// Starting rate as a decimal
    pub initial_guess: f64,

    /// Converged when `|f(r)|` falls below this
    pub tolerance: f64,

    /// Newton iteration cap (also caps bisection)
    pub max_iterations: u32,

    /// Try bisection over `bracket` when Newton fails
    pub bisection_fallback: bool,

    /// Search interval for bisection, as decimal rates
    pub bracket: (f64, f64),
}

impl Default for IrrOptions {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            tolerance: 1e-7,
            max_iterations: 1000,
            bisection_fallback: true,
            bracket: (-0.99, 10.0),
        }
    }
}

/// How the reported IRR was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IrrMethod {
    NewtonRaphson,
    Bisection,
}

/// A converged IRR
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrSolution {
    /// Rate as a decimal (0.12 for 12%)
    pub rate: f64,
    pub method: IrrMethod,
    pub iterations: u32,
}

impl IrrSolution {
    pub fn rate_percent(&self) -> f64 {
        self.rate * 100.0
    }
}

/// Solve for the IRR of an investment followed by `(exponent, amount)` flows
pub fn calculate_irr(investment: f64, flows: &[(i32, f64)], options: &IrrOptions) -> Option<IrrSolution> {
    // Nothing ever comes back, so there is no rate that recovers the outlay
    if !flows.iter().any(|&(_, cf)| cf > 1e-10) {
        return None;
    }

    let changes = sign_changes(investment, flows);
    if changes > 1 {
        warn!(
            "Cash flows change sign {} times; IRR may not be unique",
            changes
        );
    }

    if let Some(solution) = newton_raphson(investment, flows, options) {
        return Some(solution);
    }

    if options.bisection_fallback {
        let solution = bisection(investment, flows, options);
        if solution.is_none() {
            debug!("IRR bisection found no sign change in {:?}", options.bracket);
        }
        return solution;
    }

    None
}

fn newton_raphson(investment: f64, flows: &[(i32, f64)], options: &IrrOptions) -> Option<IrrSolution> {
    let mut rate = options.initial_guess;

    for i in 0..options.max_iterations {
        let (npv, dnpv) = npv_and_derivative(investment, flows, rate);

        if !npv.is_finite() || !dnpv.is_finite() {
            debug!("IRR Newton step {} produced non-finite NPV at rate {}", i, rate);
            return None;
        }

        if npv.abs() < options.tolerance {
            debug!("IRR converged to {:.6} after {} Newton iterations", rate, i);
            return Some(IrrSolution {
                rate,
                method: IrrMethod::NewtonRaphson,
                iterations: i,
            });
        }

        if dnpv.abs() < 1e-20 {
            debug!("IRR derivative vanished at rate {}", rate);
            return None;
        }

        rate -= npv / dnpv;

        if !rate.is_finite() || rate <= -1.0 {
            debug!("IRR Newton iteration diverged after {} steps", i + 1);
            return None;
        }
    }

    debug!("IRR Newton did not converge in {} iterations", options.max_iterations);
    None
}

fn bisection(investment: f64, flows: &[(i32, f64)], options: &IrrOptions) -> Option<IrrSolution> {
    let (mut low, mut high) = options.bracket;

    let mut npv_low = npv_at_rate(investment, flows, low);
    let npv_high = npv_at_rate(investment, flows, high);

    if !npv_low.is_finite() || !npv_high.is_finite() || npv_low * npv_high > 0.0 {
        return None;
    }

    for i in 0..options.max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(investment, flows, mid);

        if npv_mid.abs() < options.tolerance || (high - low) / 2.0 < 1e-12 {
            return Some(IrrSolution {
                rate: mid,
                method: IrrMethod::Bisection,
                iterations: i + 1,
            });
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// NPV and its derivative with respect to the rate
fn npv_and_derivative(investment: f64, flows: &[(i32, f64)], rate: f64) -> (f64, f64) {
    let mut npv = -investment;
    let mut dnpv = 0.0;

    for &(n, cf) in flows {
        npv += cf / (1.0 + rate).powi(n);
        dnpv -= (n as f64) * cf / (1.0 + rate).powi(n + 1);
    }

    (npv, dnpv)
}

/// NPV at a given decimal rate
pub fn npv_at_rate(investment: f64, flows: &[(i32, f64)], rate: f64) -> f64 {
    -investment
        + flows
            .iter()
            .map(|&(n, cf)| cf / (1.0 + rate).powi(n))
            .sum::<f64>()
}

/// Number of sign changes in `-investment, cf1, cf2, ...`, ignoring zeros
pub fn sign_changes(investment: f64, flows: &[(i32, f64)]) -> usize {
    let mut changes = 0;
    let mut last_sign = if investment > 0.0 { -1.0 } else { 0.0 };

    for &(_, cf) in flows {
        if cf.abs() < 1e-10 {
            continue;
        }
        let sign = cf.signum();
        if last_sign != 0.0 && sign != last_sign {
            changes += 1;
        }
        last_sign = sign;
    }

    changes
}
