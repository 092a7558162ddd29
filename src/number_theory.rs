use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_integer::{Integer, Roots};
use num_rational::Ratio;
use num_traits::{One, Zero};

use crate::error::{Degeneracy, MathError, Result};

/// Trial division by 2, 3 and numbers of the form `6k ± 1` up to `√n`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let limit = n.sqrt();
    let mut k = 5;
    while k <= limit {
        if n % k == 0 || n % (k + 2) == 0 {
            return false;
        }
        k += 6;
    }
    true
}

/// `n!`, exact. Negative input is a domain error.
pub fn factorial(n: i64) -> Result<BigUint> {
    if n < 0 {
        return Err(MathError::domain(format!("factorial of negative number {n}")));
    }
    Ok((2..=n as u64).fold(BigUint::one(), |acc, k| acc * k))
}

/// The first `n` Fibonacci numbers, starting `0, 1, 1, 2, ...`.
pub fn fibonacci(n: usize) -> Vec<BigUint> {
    let mut seq = Vec::with_capacity(n);
    let (mut a, mut b) = (BigUint::zero(), BigUint::one());
    for _ in 0..n {
        let next = &a + &b;
        seq.push(std::mem::replace(&mut a, std::mem::replace(&mut b, next)));
    }
    seq
}

/// Greatest common divisor, always non-negative; `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut x, mut y) = (a.unsigned_abs(), b.unsigned_abs());
    while y != 0 {
        (x, y) = (y, x % y);
    }
    x
}

/// Least common multiple, `|a*b| / gcd(a, b)`.
///
/// Both arguments zero is a division error; `lcm(0, n) == 0` otherwise.
pub fn lcm(a: i64, b: i64) -> Result<u64> {
    if a == 0 && b == 0 {
        return Err(MathError::Division(Degeneracy::ZeroDivisor));
    }
    let g = gcd(a, b);
    (a.unsigned_abs() / g)
        .checked_mul(b.unsigned_abs())
        .ok_or_else(|| MathError::domain(format!("lcm({a}, {b}) overflows u64")))
}

/// Prime factors mapped to their exponents. `n <= 1` has no factors.
pub fn prime_factorization(mut n: u64) -> BTreeMap<u64, u32> {
    let mut factors = BTreeMap::new();
    if n <= 1 {
        return factors;
    }
    let mut d = 2;
    while d <= n / d {
        while n % d == 0 {
            *factors.entry(d).or_insert(0) += 1;
            n /= d;
        }
        d += if d == 2 { 1 } else { 2 };
    }
    if n > 1 {
        *factors.entry(n).or_insert(0) += 1;
    }
    factors
}

/// `(g, x, y)` with `a*x + b*y == g` and `g >= 0`.
///
/// Fails with [`MathError::Domain`] when a result does not fit in `i64`,
/// as for `extended_gcd(i64::MIN, 0)` whose gcd is `2^63`.
pub fn extended_gcd(a: i64, b: i64) -> Result<(i64, i64, i64)> {
    let (mut old_r, mut r) = (a as i128, b as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    let (mut old_t, mut t) = (0i128, 1i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }
    if old_r < 0 {
        (old_r, old_s, old_t) = (-old_r, -old_s, -old_t);
    }
    let narrow = |v: i128| {
        i64::try_from(v)
            .map_err(|_| MathError::domain(format!("extended gcd of ({a}, {b}) overflows i64")))
    };
    Ok((narrow(old_r)?, narrow(old_s)?, narrow(old_t)?))
}

/// `x` in `[0, m)` with `a*x ≡ 1 (mod m)`.
pub fn modular_inverse(a: i64, m: i64) -> Result<i64> {
    if m <= 0 {
        return Err(MathError::domain(format!("modulus must be positive, got {m}")));
    }
    let (g, x, _) = extended_gcd(a.mod_floor(&m), m)?;
    if g != 1 {
        return Err(MathError::NoInverse { value: a, modulus: m });
    }
    Ok(x.mod_floor(&m))
}

/// The first `n` primes.
pub fn generate_primes(n: usize) -> Vec<u64> {
    (2..).filter(|&k| is_prime(k)).take(n).collect()
}

/// Whether the proper divisors of `n` sum to `n`.
///
/// The divisor sum comes from the factorization and is carried in `u128`.
pub fn is_perfect_number(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    let divisor_sum: u128 = prime_factorization(n)
        .into_iter()
        .map(|(p, e)| {
            let p = u128::from(p);
            (0..e).fold((1u128, 1u128), |(sum, power), _| (sum + power * p, power * p)).0
        })
        .product();
    divisor_sum - u128::from(n) == u128::from(n)
}

/// Reduce `num/den` to lowest terms with a positive denominator.
pub fn simplify_fraction(num: i64, den: i64) -> Result<(i64, i64)> {
    if den == 0 {
        return Err(MathError::Division(Degeneracy::ZeroDivisor));
    }
    let reduced = Ratio::new(num, den);
    Ok((*reduced.numer(), *reduced.denom()))
}
