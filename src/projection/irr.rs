//! Internal Rate of Return (IRR) and Net Present Value (NPV) helpers
//!
//! Used to turn a projection's investor cashflows into a return figure

use log::debug;
use thiserror::Error;

/// Starting rate for the Newton-Raphson iteration
pub const DEFAULT_IRR_GUESS: f64 = 0.1;

/// Newton-Raphson iteration budget
const NEWTON_MAX_ITERATIONS: u32 = 40;

/// Stop once |NPV| falls below this
const NPV_TOLERANCE: f64 = 1e-9;

/// Bisection bracket: -99% to +1000%
const BISECTION_LOW: f64 = -0.99;
const BISECTION_HIGH: f64 = 10.0;
const BISECTION_MAX_ITERATIONS: u32 = 200;

/// Reasons an IRR could not be produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IrrError {
    #[error("cannot compute IRR of an empty cashflow series")]
    EmptyCashflows,

    /// Newton-Raphson diverged and the bisection bracket holds no root
    #[error("IRR did not converge after {iterations} iterations")]
    NoConvergence { iterations: u32 },
}

/// Calculate the Internal Rate of Return for a series of periodic cashflows.
///
/// `cashflows[0]` is undiscounted. Newton-Raphson runs first from
/// `initial_guess`; if its derivative vanishes, an iterate leaves the domain
/// (rate <= -100% or non-finite) or the iteration budget runs out, bisection
/// over [-99%, +1000%] takes over.
///
/// # Returns
/// * `Ok(rate)` - rate per period as a decimal (0.10 for 10%)
/// * `Err(IrrError::NoConvergence)` - no root could be located
pub fn irr(cashflows: &[f64], initial_guess: f64) -> Result<f64, IrrError> {
    if cashflows.is_empty() {
        return Err(IrrError::EmptyCashflows);
    }

    let mut rate = initial_guess;

    for iteration in 0..NEWTON_MAX_ITERATIONS {
        let (value, derivative) = npv_and_derivative(cashflows, rate);

        if value.abs() < NPV_TOLERANCE {
            debug!("IRR converged by Newton-Raphson after {} iterations", iteration);
            return Ok(rate);
        }

        if derivative == 0.0 || !derivative.is_finite() {
            break;
        }

        let next = rate - value / derivative;
        if !next.is_finite() || next <= -1.0 {
            break;
        }
        rate = next;
    }

    // One last check on the final Newton iterate before falling back
    if rate > -1.0 && npv_at_rate(cashflows, rate).abs() < NPV_TOLERANCE {
        return Ok(rate);
    }

    debug!("Newton-Raphson did not converge, falling back to bisection");
    irr_bisection(cashflows)
}

/// NPV at a periodic rate with t=0 undiscounted, and its derivative
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut derivative = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        value += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            derivative -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (value, derivative)
}

/// NPV at a periodic rate with t=0 undiscounted
fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Fallback IRR calculation using bisection
fn irr_bisection(cashflows: &[f64]) -> Result<f64, IrrError> {
    let mut low = BISECTION_LOW;
    let mut high = BISECTION_HIGH;
    let mut npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    if npv_low.abs() < NPV_TOLERANCE {
        return Ok(low);
    }
    if npv_high.abs() < NPV_TOLERANCE {
        return Ok(high);
    }
    if npv_low * npv_high > 0.0 {
        return Err(IrrError::NoConvergence {
            iterations: NEWTON_MAX_ITERATIONS,
        });
    }

    for _ in 0..BISECTION_MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < NPV_TOLERANCE || (high - low) / 2.0 < 1e-12 {
            return Ok(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    Err(IrrError::NoConvergence {
        iterations: NEWTON_MAX_ITERATIONS + BISECTION_MAX_ITERATIONS,
    })
}

/// Net present value of values received at the end of periods 1..=n
///
/// `Σ values[i] / (1 + rate)^(i + 1)`
pub fn npv(values: &[f64], rate: f64) -> f64 {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| v / (1.0 + rate).powi(i as i32 + 1))
        .sum()
}
