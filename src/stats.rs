//! Descriptive statistics, least-squares regression and counting.
//!
//! Means use Kahan compensated summation and variances use Welford's
//! single-pass update, so long or badly scaled inputs keep their precision.
//! Every function that summarizes a sequence rejects empty input with
//! [`MathError::EmptyInput`].

use std::collections::HashMap;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{MathError, Result};

/// Which denominator a variance uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarianceKind {
    /// Bessel-corrected, divides by `n - 1`.
    #[default]
    Sample,
    /// Divides by `n`.
    Population,
}

pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(MathError::EmptyInput);
    }
    Ok(kahan_sum(data) / data.len() as f64)
}

/// Middle value; the average of the two middle values for even lengths.
pub fn median(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(MathError::EmptyInput);
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Every value that occurs with the highest frequency, in order of first appearance.
pub fn mode(data: &[f64]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(MathError::EmptyInput);
    }
    let mut order: Vec<f64> = Vec::new();
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for &x in data {
        // 0.0 and -0.0 compare equal and share a bucket.
        let x = if x == 0.0 { 0.0 } else { x };
        let count = counts.entry(x.to_bits()).or_insert(0);
        if *count == 0 {
            order.push(x);
        }
        *count += 1;
    }
    let max = counts.values().copied().max().unwrap_or(0);
    Ok(order
        .into_iter()
        .filter(|x| counts.get(&x.to_bits()) == Some(&max))
        .collect())
}

/// Variance by Welford's algorithm. Fewer than two values give `0.0`.
pub fn variance(data: &[f64], kind: VarianceKind) -> Result<f64> {
    if data.is_empty() {
        return Err(MathError::EmptyInput);
    }
    let mut acc = Welford::default();
    for &x in data {
        acc.update(x);
    }
    Ok(acc.variance(kind))
}

pub fn standard_deviation(data: &[f64], kind: VarianceKind) -> Result<f64> {
    variance(data, kind).map(f64::sqrt)
}

/// Ordinary least squares fit `y = slope * x + intercept`, returned as `(slope, intercept)`.
///
/// When every `x` is equal the slope is `0` and the intercept is the mean of `y`.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    if x.len() != y.len() {
        return Err(MathError::shape(
            format!("{} y values to match x", x.len()),
            format!("{} y values", y.len()),
        ));
    }
    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    let products: Vec<f64> = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .collect();
    let squares: Vec<f64> = x.iter().map(|xi| (xi - x_mean).powi(2)).collect();
    let numerator = kahan_sum(&products);
    let denominator = kahan_sum(&squares);

    if denominator == 0.0 {
        return Ok((0.0, y_mean));
    }
    let slope = numerator / denominator;
    Ok((slope, y_mean - slope * x_mean))
}

/// `n! / (n - r)!`, zero when `r > n`.
pub fn permutations(n: u64, r: u64) -> BigUint {
    if r > n {
        return BigUint::zero();
    }
    (0..r).fold(BigUint::one(), |acc, i| acc * (n - i))
}

/// `n! / (r! (n - r)!)`, zero when `r > n`.
pub fn combinations(n: u64, r: u64) -> BigUint {
    if r > n {
        return BigUint::zero();
    }
    let r = r.min(n - r);
    // Each partial product is itself a binomial coefficient, so the division is exact.
    (1..=r).fold(BigUint::one(), |acc, i| acc * (n - r + i) / i)
}

/// Probability of exactly `k` successes in `n` independent trials with success rate `p`.
///
/// Evaluated in log space so large `n` stays finite.
pub fn binomial_probability(n: u64, k: u64, p: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::domain(format!(
            "probability must lie in [0, 1], got {p}"
        )));
    }
    if k > n {
        return Ok(0.0);
    }
    if p == 0.0 || p == 1.0 {
        let certain = if p == 0.0 { k == 0 } else { k == n };
        return Ok(if certain { 1.0 } else { 0.0 });
    }
    let log_prob = ln_combinations(n, k) + k as f64 * p.ln() + (n - k) as f64 * (-p).ln_1p();
    Ok(log_prob.exp())
}

fn ln_combinations(n: u64, r: u64) -> f64 {
    let r = r.min(n - r);
    (1..=r)
        .map(|i| ((n - r + i) as f64).ln() - (i as f64).ln())
        .sum()
}

/// Neumaier's variant of Kahan summation.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

#[derive(Debug, Clone, Default)]
struct Welford {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn variance(&self, kind: VarianceKind) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let denom = match kind {
            VarianceKind::Sample => self.count - 1,
            VarianceKind::Population => self.count,
        };
        (self.m2 / denom as f64).max(0.0)
    }
}
