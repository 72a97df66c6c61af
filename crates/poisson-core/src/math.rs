//! Mathematical utilities for Poisson likelihoods

use statrs::function::factorial;

/// Natural logarithm of `x!`
///
/// Exact table lookups for small arguments, Stirling-series evaluation via
/// the log-gamma function beyond that.
#[inline]
pub fn ln_factorial(x: u64) -> f64 {
    if x < 2 {
        return 0.0;
    }
    factorial::ln_factorial(x)
}

/// `x * ln(x / n)` with the `0 * ln 0 = 0` limit
///
/// This is the count-dependent part of a Poisson log-likelihood evaluated at
/// its maximum-likelihood rate `x / n`.
#[inline]
pub fn xlogy_rate(x: u64, n: usize) -> f64 {
    if x == 0 {
        return 0.0;
    }
    let x = x as f64;
    x * (x / n as f64).ln()
}
