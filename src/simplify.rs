use std::collections::BTreeMap;

use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::expr::{Expr, Rational, one, zero};

const MAX_FOLDED_EXPONENT: i64 = 256;

pub fn simplify(expr: Expr) -> Expr {
    match expr {
        Expr::Add(a, b) => simplify_add(simplify(*a), simplify(*b)),
        Expr::Sub(a, b) => simplify_sub(simplify(*a), simplify(*b)),
        Expr::Mul(a, b) => simplify_mul(simplify(*a), simplify(*b)),
        Expr::Div(a, b) => simplify_div(simplify(*a), simplify(*b)),
        Expr::Pow(a, b) => simplify_pow(simplify(*a), simplify(*b)),
        Expr::Neg(a) => simplify_neg(simplify(*a)),

        Expr::Sin(a) => match simplify(*a) {
            x if x.is_zero() => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Sin(inner)),
            x => Expr::Sin(x.boxed()),
        },
        Expr::Cos(a) => match simplify(*a) {
            x if x.is_zero() => one(),
            Expr::Neg(inner) => Expr::Cos(inner),
            x => Expr::Cos(x.boxed()),
        },
        Expr::Tan(a) => match simplify(*a) {
            x if x.is_zero() => zero(),
            x => Expr::Tan(x.boxed()),
        },
        Expr::Exp(a) => match simplify(*a) {
            x if x.is_zero() => one(),
            x => Expr::Exp(x.boxed()),
        },
        Expr::Log(a) => match simplify(*a) {
            x if x.is_one() => zero(),
            Expr::Exp(inner) => *inner,
            x => Expr::Log(x.boxed()),
        },
        Expr::Sqrt(a) => match simplify(*a) {
            Expr::Constant(c) => match exact_sqrt(&c) {
                Some(root) => Expr::Constant(root),
                None => Expr::Sqrt(Expr::Constant(c).boxed()),
            },
            x => Expr::Sqrt(x.boxed()),
        },
        Expr::Abs(a) => match simplify(*a) {
            Expr::Constant(c) => Expr::Constant(c.abs()),
            Expr::Neg(inner) => Expr::Abs(inner),
            x => Expr::Abs(x.boxed()),
        },

        e => e,
    }
}

/// Apply simplification passes until the expression stops changing.
pub fn simplify_fully(expr: Expr) -> Expr {
    simplify_with_limit(expr, 32)
}

/// Apply at most `max_iters` passes, returning the last value if no fixed point is reached.
pub fn simplify_with_limit(expr: Expr, max_iters: usize) -> Expr {
    let mut current = expr;
    for _ in 0..max_iters {
        let next = simplify(current.clone());
        if next == current {
            return current;
        }
        current = next;
    }
    current
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    let mut terms = flatten_sum(&x);
    terms.extend(flatten_sum(&y));
    rebuild_sum(terms)
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    simplify_add(x, simplify_neg(y))
}

pub fn simplify_neg(x: Expr) -> Expr {
    match x {
        Expr::Constant(c) => Expr::Constant(-c),
        Expr::Neg(inner) => *inner,
        Expr::Mul(a, b) => match *a {
            Expr::Constant(c) => term_from(-c, *b),
            a => Expr::Neg(Expr::Mul(a.boxed(), b).boxed()),
        },
        other => Expr::Neg(other.boxed()),
    }
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    if x.is_zero() || y.is_zero() {
        return zero();
    }
    let (cx, bx) = split_coeff(&x);
    let (cy, by) = split_coeff(&y);
    let coeff = cx * cy;
    if coeff.is_zero() {
        return zero();
    }

    let mut factors = flatten_mul(&bx);
    factors.extend(flatten_mul(&by));
    factors.sort();

    // Merge repeated bases into powers.
    let mut merged: Vec<(Expr, Rational)> = Vec::with_capacity(factors.len());
    for factor in factors {
        let (base, exp) = split_power(factor);
        match merged.iter_mut().find(|(b, _)| *b == base) {
            Some((_, e)) => *e += exp,
            None => merged.push((base, exp)),
        }
    }

    let product = merged
        .into_iter()
        .filter(|(_, e)| !e.is_zero())
        .map(|(base, exp)| {
            if exp.is_one() {
                base
            } else {
                Expr::Pow(base.boxed(), Expr::Constant(exp).boxed())
            }
        })
        .reduce(|acc, f| Expr::Mul(acc.boxed(), f.boxed()))
        .unwrap_or_else(one);

    term_from(coeff, product)
}

pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (x, y) if y.is_zero() => Expr::Div(x.boxed(), y.boxed()),
        (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(a / b),
        (x, _) if x.is_zero() => zero(),
        (x, y) if y.is_one() => x,
        (x, y) if x == y => one(),
        (x, Expr::Constant(c)) => simplify_mul(Expr::Constant(c.recip()), x),
        (x, y) => {
            let (cx, bx) = split_coeff(&x);
            let (cy, by) = split_coeff(&y);
            let coeff = cx / cy;
            if bx.is_one() {
                return term_from(coeff, Expr::Div(one().boxed(), by.boxed()));
            }
            term_from(coeff, Expr::Div(bx.boxed(), by.boxed()))
        }
    }
}

pub fn simplify_pow(base: Expr, exp: Expr) -> Expr {
    if exp.is_zero() {
        return one();
    }
    if exp.is_one() {
        return base;
    }
    if base.is_one() {
        return one();
    }
    match (base, exp) {
        (Expr::Constant(b), Expr::Constant(e)) => match rational_pow(&b, &e) {
            Some(value) => Expr::Constant(value),
            None => Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed()),
        },
        (Expr::Pow(inner, e1), Expr::Constant(e2)) if is_integer_constant(&e1) && e2.is_integer() => {
            let combined = e1.as_constant().cloned().unwrap_or_else(Rational::one) * e2;
            simplify_pow(*inner, Expr::Constant(combined))
        }
        (b, e) => Expr::Pow(b.boxed(), e.boxed()),
    }
}

fn flatten_sum(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Add(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b));
            out
        }
        Expr::Sub(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b).into_iter().map(simplify_neg));
            out
        }
        Expr::Neg(a) => flatten_sum(a).into_iter().map(simplify_neg).collect(),
        other => vec![other.clone()],
    }
}

fn flatten_mul(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Mul(a, b) => {
            let mut out = flatten_mul(a);
            out.extend(flatten_mul(b));
            out
        }
        t if t.is_one() => vec![],
        t => vec![t.clone()],
    }
}

fn rebuild_sum(terms: Vec<Expr>) -> Expr {
    let mut constant = Rational::zero();
    let mut collected: BTreeMap<Expr, Rational> = BTreeMap::new();
    for term in terms {
        let (c, base) = split_coeff(&term);
        if c.is_zero() {
            continue;
        }
        if base.is_one() {
            constant += c;
        } else {
            *collected.entry(base).or_insert_with(Rational::zero) += c;
        }
    }

    // Higher powers first reads like conventional polynomial notation.
    let mut items: Vec<(Expr, Rational)> = collected.into_iter().filter(|(_, c)| !c.is_zero()).collect();
    items.sort_by(|(a, _), (b, _)| degree_hint(b).cmp(&degree_hint(a)).then_with(|| a.cmp(b)));

    let mut parts: Vec<Expr> = items.into_iter().map(|(base, c)| term_from(c, base)).collect();
    if !constant.is_zero() {
        parts.push(Expr::Constant(constant));
    }

    let mut iter = parts.into_iter();
    let Some(first) = iter.next() else {
        return zero();
    };
    iter.fold(first, |acc, term| match term {
        Expr::Neg(inner) => Expr::Sub(acc.boxed(), inner),
        Expr::Constant(c) if c.is_negative() => Expr::Sub(acc.boxed(), Expr::Constant(-c).boxed()),
        Expr::Mul(a, b) if matches!(&*a, Expr::Constant(c) if c.is_negative()) => {
            let positive = a.as_constant().map(|c| -c.clone()).unwrap_or_else(Rational::one);
            Expr::Sub(acc.boxed(), term_from(positive, *b).boxed())
        }
        other => Expr::Add(acc.boxed(), other.boxed()),
    })
}

fn degree_hint(expr: &Expr) -> i64 {
    match expr {
        Expr::Pow(_, e) => e
            .as_constant()
            .and_then(|c| c.to_integer().to_i64())
            .unwrap_or(0),
        Expr::Mul(a, b) => degree_hint(a) + degree_hint(b),
        Expr::Variable(_) => 1,
        _ => 0,
    }
}

fn split_coeff(expr: &Expr) -> (Rational, Expr) {
    match expr {
        Expr::Constant(c) => (c.clone(), one()),
        Expr::Neg(e) => {
            let (c, b) = split_coeff(e);
            (-c, b)
        }
        Expr::Mul(a, b) => {
            let (ca, ba) = split_coeff(a);
            let (cb, bb) = split_coeff(b);
            let base = match (ba.is_one(), bb.is_one()) {
                (true, _) => bb,
                (_, true) => ba,
                _ => Expr::Mul(ba.boxed(), bb.boxed()),
            };
            (ca * cb, base)
        }
        other => (Rational::one(), other.clone()),
    }
}

fn split_power(expr: Expr) -> (Expr, Rational) {
    match expr {
        Expr::Pow(base, exp) => match *exp {
            Expr::Constant(e) if e.is_integer() => (*base, e),
            other => (Expr::Pow(base, other.boxed()), Rational::one()),
        },
        other => (other, Rational::one()),
    }
}

fn term_from(coeff: Rational, base: Expr) -> Expr {
    if coeff.is_zero() {
        return zero();
    }
    if base.is_one() {
        return Expr::Constant(coeff);
    }
    if coeff.is_one() {
        return base;
    }
    if coeff == -Rational::one() {
        return Expr::Neg(base.boxed());
    }
    Expr::Mul(Expr::Constant(coeff).boxed(), base.boxed())
}

fn is_integer_constant(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(c) if c.is_integer())
}

/// Exact power of a rational with an integer exponent of bounded size.
pub(crate) fn rational_pow(base: &Rational, exp: &Rational) -> Option<Rational> {
    if !exp.is_integer() {
        return None;
    }
    let n = exp.to_integer().to_i64()?;
    if n.abs() > MAX_FOLDED_EXPONENT || (n < 0 && base.is_zero()) {
        return None;
    }
    let mut acc = Rational::one();
    for _ in 0..n.unsigned_abs() {
        acc *= base;
    }
    Some(if n < 0 { acc.recip() } else { acc })
}

fn exact_sqrt(value: &Rational) -> Option<Rational> {
    if value.is_negative() {
        return None;
    }
    let numer = value.numer().sqrt();
    let denom = value.denom().sqrt();
    if &(&numer * &numer) == value.numer() && &(&denom * &denom) == value.denom() {
        Some(Rational::new(numer, denom))
    } else {
        None
    }
}
