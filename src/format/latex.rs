use std::fmt::Display;

use num_traits::Signed;

use super::pretty::split_neg;
use crate::expr::{Expr, Rational};

/// `\frac{num}{den}`.
pub fn latex_fraction(num: impl Display, den: impl Display) -> String {
    format!("\\frac{{{num}}}{{{den}}}")
}

/// A `bmatrix` with `&` between entries and `\\` between rows.
pub fn latex_matrix<T: Display>(rows: &[Vec<T>]) -> String {
    let body = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" & ")
        })
        .collect::<Vec<_>>()
        .join(" \\\\ ");
    format!("\\begin{{bmatrix}} {body} \\end{{bmatrix}}")
}

/// Equation text is already LaTeX-compatible; surrounding whitespace is dropped.
pub fn latex_equation(text: &str) -> String {
    text.trim().to_string()
}

/// Render an expression tree as LaTeX.
pub fn latex(expr: &Expr) -> String {
    tex(0, expr)
}

// Same precedence contexts as the plain printer.
fn tex(ctx: u8, expr: &Expr) -> String {
    match expr {
        Expr::Variable(v) => v.clone(),
        Expr::Constant(r) => {
            let text = tex_rational(r);
            if r.is_negative() {
                paren(ctx, 2, text)
            } else {
                text
            }
        }
        Expr::Add(a, b) | Expr::Sub(a, b) => {
            let (neg_b, b_inner) = split_neg(b);
            let minus = matches!(expr, Expr::Sub(..)) ^ neg_b;
            let body = format!("{} {} {}", tex(1, a), if minus { "-" } else { "+" }, tex(2, &b_inner));
            paren(ctx, 1, body)
        }
        Expr::Mul(a, b) => {
            let (neg, inner) = split_neg(expr);
            if neg {
                return paren(ctx, 2, format!("-{}", tex(2, &inner)));
            }
            let lhs = tex(2, a);
            let rhs = tex(2, b);
            let body = if a.as_constant().is_some() && b.as_constant().is_none() {
                format!("{lhs} {rhs}")
            } else {
                format!("{lhs} \\cdot {rhs}")
            };
            paren(ctx, 2, body)
        }
        Expr::Div(a, b) => latex_fraction(tex(0, a), tex(0, b)),
        Expr::Pow(base, exp) => {
            let base_text = match **base {
                Expr::Variable(_) => tex(4, base),
                Expr::Constant(ref r) if r.is_integer() && !r.is_negative() => tex(4, base),
                _ => format!("\\left({}\\right)", tex(0, base)),
            };
            paren(ctx, 3, format!("{base_text}^{{{}}}", tex(0, exp)))
        }
        Expr::Neg(inner) => {
            let (is_neg, inner) = split_neg(inner);
            if is_neg {
                tex(ctx, &inner)
            } else {
                paren(ctx, 2, format!("-{}", tex(3, &inner)))
            }
        }
        Expr::Sin(a) => function("\\sin", a),
        Expr::Cos(a) => function("\\cos", a),
        Expr::Tan(a) => function("\\tan", a),
        Expr::Log(a) => function("\\ln", a),
        Expr::Exp(a) => format!("e^{{{}}}", tex(0, a)),
        Expr::Sqrt(a) => format!("\\sqrt{{{}}}", tex(0, a)),
        Expr::Abs(a) => format!("\\left|{}\\right|", tex(0, a)),
    }
}

fn function(name: &str, arg: &Expr) -> String {
    format!("{name}\\left({}\\right)", tex(0, arg))
}

fn paren(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("\\left({body}\\right)")
    } else {
        body
    }
}

fn tex_rational(r: &Rational) -> String {
    if r.is_integer() {
        format!("{}", r.numer())
    } else if r.is_negative() {
        format!("-{}", latex_fraction(-r.numer(), r.denom()))
    } else {
        latex_fraction(r.numer(), r.denom())
    }
}
