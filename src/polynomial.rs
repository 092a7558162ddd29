use std::collections::BTreeMap;
use std::ops;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::expr::{Expr, Rational, rational_to_f64};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    coeffs: BTreeMap<usize, Rational>,
}

impl Poly {
    pub fn zero() -> Self {
        Poly {
            coeffs: BTreeMap::new(),
        }
    }

    pub fn one() -> Self {
        Poly::from_constant(Rational::one())
    }

    pub fn from_constant(c: Rational) -> Self {
        let mut coeffs = BTreeMap::new();
        if !c.is_zero() {
            coeffs.insert(0, c);
        }
        Poly { coeffs }
    }

    /// Build from coefficients in ascending order of power.
    pub fn from_coeffs<I>(coeffs: I) -> Self
    where
        I: IntoIterator<Item = Rational>,
    {
        let coeffs = coeffs
            .into_iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .collect();
        Poly { coeffs }
    }

    /// The monomial `x - root`.
    pub fn linear_factor(root: Rational) -> Self {
        Poly::from_coeffs([-root, Rational::one()])
    }

    pub fn degree(&self) -> Option<usize> {
        self.coeffs.keys().next_back().copied()
    }

    pub fn leading_coeff(&self) -> Rational {
        self.coeffs
            .values()
            .next_back()
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeff(&self, power: usize) -> Rational {
        self.coeffs
            .get(&power)
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    /// Coefficients from the highest power down to the constant term, as floats.
    pub fn coeffs_descending_f64(&self) -> Vec<f64> {
        let Some(degree) = self.degree() else {
            return Vec::new();
        };
        (0..=degree)
            .rev()
            .map(|power| rational_to_f64(&self.coeff(power)))
            .collect()
    }

    pub fn pow(&self, exp: usize) -> Self {
        let mut result = Poly::one();
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result * &base;
            }
            base = base.clone() * &base;
            n /= 2;
        }
        result
    }

    pub fn scale(&self, k: &Rational) -> Self {
        if k.is_zero() {
            return Poly::zero();
        }
        Poly {
            coeffs: self
                .coeffs
                .iter()
                .map(|(exp, c)| (*exp, c * k))
                .collect(),
        }
    }

    pub fn monic(&self) -> Self {
        let lc = self.leading_coeff();
        if lc.is_zero() {
            return self.clone();
        }
        self.scale(&lc.recip())
    }

    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .filter(|(exp, _)| **exp > 0)
            .map(|(exp, c)| (exp - 1, c * Rational::from_integer(BigInt::from(*exp))))
            .collect();
        Poly { coeffs }
    }

    /// The antiderivative with zero constant term.
    pub fn antiderivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .map(|(exp, c)| (exp + 1, c / Rational::from_integer(BigInt::from(exp + 1))))
            .collect();
        Poly { coeffs }
    }

    /// Horner evaluation at an exact point.
    pub fn evaluate(&self, x: &Rational) -> Rational {
        let Some(degree) = self.degree() else {
            return Rational::zero();
        };
        (0..=degree)
            .rev()
            .fold(Rational::zero(), |acc, power| acc * x + self.coeff(power))
    }

    pub fn evaluate_f64(&self, x: f64) -> f64 {
        self.coeffs_descending_f64()
            .into_iter()
            .fold(0.0, |acc, c| acc * x + c)
    }

    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let Some(divisor_degree) = divisor.degree() else {
            return (Poly::zero(), self.clone());
        };
        let divisor_lc = divisor.leading_coeff();
        let mut remainder = self.clone();
        let mut quotient = Poly::zero();

        while let Some(r_deg) = remainder.degree() {
            if r_deg < divisor_degree {
                break;
            }
            let mut term = BTreeMap::new();
            term.insert(r_deg - divisor_degree, remainder.leading_coeff() / &divisor_lc);
            let term = Poly { coeffs: term };
            remainder = remainder - &(term.clone() * divisor);
            quotient = quotient + term;
        }

        (quotient, remainder)
    }

    /// Monic greatest common divisor; zero only when both inputs are zero.
    pub fn gcd(a: &Self, b: &Self) -> Self {
        let (mut a, mut b) = (a.clone(), b.clone());
        while !b.is_zero() {
            let (_, r) = a.div_rem(&b);
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Roots counted once each: `p / gcd(p, p')`.
    pub fn square_free(&self) -> Self {
        let g = Poly::gcd(self, &self.derivative());
        if g.degree().unwrap_or(0) == 0 {
            return self.clone();
        }
        self.div_rem(&g).0
    }

    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (q, r) = self.div_rem(divisor);
        r.is_zero().then_some(q)
    }

    /// Rational roots with their multiplicities, plus the cofactor left after dividing them out.
    ///
    /// Candidates come from the rational root theorem applied to the integer-scaled
    /// polynomial; zero roots are stripped first so the constant term is non-zero.
    pub fn rational_roots(&self) -> (Vec<(Rational, usize)>, Poly) {
        let mut roots: Vec<(Rational, usize)> = Vec::new();
        let mut rest = self.clone();
        if rest.is_zero() {
            return (roots, rest);
        }

        let zero_mult = rest.coeffs.keys().next().copied().unwrap_or(0);
        if zero_mult > 0 {
            roots.push((Rational::zero(), zero_mult));
            rest = Poly {
                coeffs: rest.coeffs.into_iter().map(|(e, c)| (e - zero_mult, c)).collect(),
            };
        }

        while rest.degree().unwrap_or(0) > 0 {
            let Some(root) = find_rational_root(&rest) else {
                break;
            };
            let factor = Poly::linear_factor(root.clone());
            let mut multiplicity = 0;
            while let Some(q) = rest.div_exact(&factor) {
                rest = q;
                multiplicity += 1;
            }
            roots.push((root, multiplicity));
        }

        roots.sort_by(|a, b| b.0.cmp(&a.0));
        (roots, rest)
    }

    pub fn to_expr(&self, var: &str) -> Expr {
        let mut terms = self.coeffs.iter().rev().map(|(exp, coeff)| {
            let power = match exp {
                0 => return Expr::Constant(coeff.clone()),
                1 => Expr::Variable(var.to_string()),
                n => Expr::Pow(
                    Expr::Variable(var.to_string()).boxed(),
                    Expr::integer(*n as u64).boxed(),
                ),
            };
            if coeff.is_one() {
                power
            } else if (-coeff).is_one() {
                Expr::Neg(power.boxed())
            } else {
                Expr::Mul(Expr::Constant(coeff.clone()).boxed(), power.boxed())
            }
        });
        let Some(first) = terms.next() else {
            return Expr::Constant(Rational::zero());
        };
        terms.fold(first, |acc, term| Expr::Add(acc.boxed(), term.boxed()))
    }

    /// Interpret `expr` as a polynomial in `var` with rational coefficients.
    pub fn from_expr(expr: &Expr, var: &str) -> Option<Self> {
        match expr {
            Expr::Variable(v) if v == var => Some(Poly::from_coeffs([Rational::zero(), Rational::one()])),
            Expr::Variable(_) => None,
            Expr::Constant(c) => Some(Poly::from_constant(c.clone())),
            Expr::Add(a, b) => Some(Self::from_expr(a, var)? + Self::from_expr(b, var)?),
            Expr::Sub(a, b) => Some(Self::from_expr(a, var)? - Self::from_expr(b, var)?),
            Expr::Mul(a, b) => Some(Self::from_expr(a, var)? * &Self::from_expr(b, var)?),
            Expr::Div(a, b) => {
                let denom = Self::from_expr(b, var)?;
                if denom.degree() != Some(0) {
                    return None;
                }
                Some(Self::from_expr(a, var)?.scale(&denom.leading_coeff().recip()))
            }
            Expr::Neg(inner) => Some(-Self::from_expr(inner, var)?),
            Expr::Pow(base, exp) => {
                let power = Self::from_expr(exp, var)?;
                let k = match power.degree() {
                    None => 0,
                    Some(0) if power.leading_coeff().is_integer() => {
                        power.leading_coeff().to_integer().to_usize()?
                    }
                    _ => return None,
                };
                Some(Self::from_expr(base, var)?.pow(k))
            }
            _ => None,
        }
    }
}

impl Poly {
    /// Add `c * x^power`, dropping the entry when it cancels.
    fn accumulate(&mut self, power: usize, c: Rational) {
        let slot = self.coeffs.entry(power).or_insert_with(Rational::zero);
        *slot += c;
        if slot.is_zero() {
            self.coeffs.remove(&power);
        }
    }
}

impl ops::Add for Poly {
    type Output = Poly;

    fn add(mut self, rhs: Poly) -> Poly {
        for (power, c) in rhs.coeffs {
            self.accumulate(power, c);
        }
        self
    }
}

impl ops::Sub for Poly {
    type Output = Poly;

    fn sub(self, rhs: Poly) -> Poly {
        self + (-rhs)
    }
}

impl ops::Sub<&Poly> for Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        self - rhs.clone()
    }
}

impl ops::Mul<&Poly> for Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        let mut product = Poly::zero();
        for (i, a) in &self.coeffs {
            for (j, b) in &rhs.coeffs {
                product.accumulate(i + j, a * b);
            }
        }
        product
    }
}

impl ops::Neg for Poly {
    type Output = Poly;

    fn neg(mut self) -> Poly {
        self.coeffs.values_mut().for_each(|c| *c = -c.clone());
        self
    }
}

/// Largest trial divisor used when factoring coefficients for root candidates.
const TRIAL_DIVISION_LIMIT: u32 = 1 << 16;
/// Candidate `p/q` pairs tested before the search is abandoned.
const MAX_ROOT_CANDIDATES: usize = 1 << 14;

/// A rational root, or `None` when there is none or the coefficients are too hard to
/// factor; the caller then treats what is left as an irrational factor.
fn find_rational_root(poly: &Poly) -> Option<Rational> {
    let int_coeffs = integer_coeffs(poly);
    let q_candidates = divisors(int_coeffs.last()?)?;
    let p_candidates = divisors(int_coeffs.first()?)?;
    if p_candidates.len().saturating_mul(q_candidates.len()) > MAX_ROOT_CANDIDATES {
        return None;
    }

    let mut candidates: Vec<Rational> = p_candidates
        .iter()
        .flat_map(|p| {
            q_candidates.iter().flat_map(move |q| {
                let candidate = Rational::new(p.clone(), q.clone());
                [candidate.clone(), -candidate]
            })
        })
        .collect();
    candidates.sort();
    candidates.dedup();

    candidates
        .into_iter()
        .find(|candidate| poly.evaluate(candidate).is_zero())
}

/// Coefficients scaled by the lcm of their denominators, ascending by power.
fn integer_coeffs(poly: &Poly) -> Vec<BigInt> {
    let lcm = poly
        .coeffs
        .values()
        .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
    let degree = poly.degree().unwrap_or(0);
    (0..=degree)
        .map(|power| (poly.coeff(power) * Rational::from_integer(lcm.clone())).to_integer())
        .collect()
}

/// Positive divisors of `n`, built from its factorization by trial division.
///
/// `None` when a cofactor above `TRIAL_DIVISION_LIMIT^2` cannot be proven prime.
fn divisors(n: &BigInt) -> Option<Vec<BigInt>> {
    let mut rest = n.abs();
    let mut factors: Vec<(BigInt, u32)> = Vec::new();
    let limit = BigInt::from(TRIAL_DIVISION_LIMIT);
    let mut d = BigInt::from(2);
    while &d * &d <= rest {
        if d > limit {
            return None;
        }
        let mut exp = 0;
        while (&rest % &d).is_zero() {
            rest /= &d;
            exp += 1;
        }
        if exp > 0 {
            factors.push((d.clone(), exp));
        }
        d += 1;
    }
    if rest > BigInt::one() {
        factors.push((rest, 1));
    }

    let mut result = vec![BigInt::one()];
    for (prime, exp) in factors {
        if result.len().saturating_mul(exp as usize + 1) > MAX_ROOT_CANDIDATES {
            return None;
        }
        let prime = &prime;
        result = result
            .iter()
            .flat_map(move |base| {
                std::iter::successors(Some(base.clone()), move |acc| Some(acc * prime))
                    .take(exp as usize + 1)
            })
            .collect();
    }
    Some(result)
}
