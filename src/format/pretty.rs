use num_traits::{One, Signed};

use crate::expr::{Expr, Rational};

/// Binding strength of the slot a subexpression is printed into.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Top,
    Sum,
    Product,
    Exponent,
    Base,
}

/// Plain-text rendering that [`crate::parser::parse_expr`] reads back to an equal value.
pub fn pretty(expr: &Expr) -> String {
    render(expr, Prec::Top)
}

fn render(expr: &Expr, slot: Prec) -> String {
    match expr {
        Expr::Variable(v) => v.clone(),
        Expr::Constant(r) if r.is_integer() && !r.is_negative() => show_rational(r),
        Expr::Constant(r) => wrap(show_rational(r), Prec::Product, slot),
        Expr::Add(a, b) => sum(a, b, false, slot),
        Expr::Sub(a, b) => sum(a, b, true, slot),
        Expr::Mul(..) => {
            let (negative, factors) = unsigned_factors(expr);
            let body = factors
                .iter()
                .map(|f| render(f, Prec::Product))
                .collect::<Vec<_>>()
                .join("*");
            signed(negative, body, slot)
        }
        Expr::Div(a, b) => {
            let (neg_num, num) = split_neg(a);
            let (neg_den, den) = split_neg(b);
            let body = format!("{}/{}", render(&num, Prec::Product), render(&den, Prec::Exponent));
            signed(neg_num ^ neg_den, body, slot)
        }
        Expr::Pow(base, exp) => wrap(
            format!("{}^{}", render(base, Prec::Base), render(exp, Prec::Exponent)),
            Prec::Exponent,
            slot,
        ),
        Expr::Neg(inner) => match split_neg(inner) {
            (true, positive) => render(&positive, slot),
            (false, inner) => signed(true, render(&inner, Prec::Exponent), slot),
        },
        Expr::Sin(a) => call("sin", a),
        Expr::Cos(a) => call("cos", a),
        Expr::Tan(a) => call("tan", a),
        Expr::Exp(a) => call("exp", a),
        Expr::Log(a) => call("ln", a),
        Expr::Sqrt(a) => call("sqrt", a),
        Expr::Abs(a) => call("abs", a),
    }
}

fn sum(a: &Expr, b: &Expr, subtract: bool, slot: Prec) -> String {
    let (negative, rhs) = split_neg(b);
    let op = if negative != subtract { '-' } else { '+' };
    let body = format!("{} {op} {}", render(a, Prec::Sum), render(&rhs, Prec::Product));
    wrap(body, Prec::Sum, slot)
}

fn call(name: &str, arg: &Expr) -> String {
    format!("{name}({})", render(arg, Prec::Top))
}

fn signed(negative: bool, body: String, slot: Prec) -> String {
    let body = if negative { format!("-{body}") } else { body };
    wrap(body, Prec::Product, slot)
}

fn wrap(body: String, own: Prec, slot: Prec) -> String {
    if own < slot { format!("({body})") } else { body }
}

/// Flatten a product left to right, pulling the sign out of every factor.
fn unsigned_factors(expr: &Expr) -> (bool, Vec<Expr>) {
    let mut negative = false;
    let mut factors = Vec::new();
    let mut pending = vec![expr];
    while let Some(next) = pending.pop() {
        if let Expr::Mul(a, b) = next {
            pending.push(b);
            pending.push(a);
        } else {
            let (neg, magnitude) = split_neg(next);
            negative ^= neg;
            factors.push(magnitude);
        }
    }
    (negative, factors)
}

/// Split `expr` into a sign and a magnitude. Products only report a sign when an odd
/// number of their factors are negative.
pub(crate) fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Neg(inner) => (true, (**inner).clone()),
        Expr::Constant(r) if r.is_negative() => (true, Expr::Constant(-r)),
        Expr::Mul(..) => match unsigned_factors(expr) {
            (true, factors) => {
                let product = factors
                    .into_iter()
                    .reduce(|acc, f| Expr::Mul(acc.boxed(), f.boxed()))
                    .unwrap_or_else(|| Expr::Constant(Rational::one()));
                (true, product)
            }
            (false, _) => (false, expr.clone()),
        },
        other => (false, other.clone()),
    }
}

pub(crate) fn show_rational(r: &Rational) -> String {
    if r.is_integer() {
        r.numer().to_string()
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}
