//! Numeric precision utilities
//!
//! Every coordinate emitted by the engine is rounded to a decimal precision
//! derived from the working tolerance: `decimals = max(0, -floor(log10(tolerance)))`.
//! A tolerance of `0.01` therefore yields two decimals and `0.5` yields one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on derived decimals; beyond this f64 formatting is noise.
const MAX_DECIMALS: u32 = 12;

/// Compute the number of decimals implied by a tolerance.
///
/// Non-positive or non-finite tolerances yield zero decimals; callers are
/// expected to have validated the tolerance beforehand.
pub fn decimals_for_tolerance(tolerance: f64) -> u32 {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return 0;
    }
    let log = tolerance.log10();
    // log10 of an exact power of ten can land just below the integer.
    let nearest = log.round();
    let exponent = if 10f64.powi(nearest as i32) == tolerance {
        nearest
    } else {
        log.floor()
    };
    if exponent >= 0.0 {
        0
    } else {
        ((-exponent) as u32).min(MAX_DECIMALS)
    }
}

/// Round a value to the given number of decimals, normalising `-0.0` to `0.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor + 0.0
}

/// Tolerance together with the decimal precision derived from it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precision {
    tolerance: f64,
    decimals: u32,
}

impl Precision {
    /// Build a precision from a positive tolerance
    pub fn from_tolerance(tolerance: f64) -> Self {
        debug_assert!(tolerance > 0.0, "tolerance must be positive: {tolerance}");
        Self {
            tolerance,
            decimals: decimals_for_tolerance(tolerance),
        }
    }

    /// Working tolerance
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Decimal places used for rounding and formatting
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Round a value at this precision
    pub fn round(&self, value: f64) -> f64 {
        round_to(value, self.decimals)
    }

    /// Format a value with exactly `decimals` fractional digits
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals as usize, self.round(value))
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::from_tolerance(0.01)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "±{} ({} decimals)", self.tolerance, self.decimals)
    }
}
