//! String-based convenience API for quick experimentation.
//!
//! ```
//! use priyam::prelude::*;
//!
//! assert_eq!(solve("x^2 - 3*x + 2 = 0", "x").unwrap(), vec!["2", "1"]);
//! assert_eq!(diff("x^3", "x").unwrap(), "3*x^2");
//! ```

use crate::algebra::{EquationRoots, solve_equation};
use crate::calculus::{
    NewtonOptions, NewtonRoot, differentiate as differentiate_expr, integrate, newton_raphson_root,
};
use crate::error::Result;
use crate::expr::Expr;
use crate::format::{latex, pretty, show_complex};
use crate::parser::{parse_equation, parse_expr};
use crate::simplify::simplify_fully;

pub fn parse(input: &str) -> Result<Expr> {
    parse_expr(input)
}

pub fn simp(input: &str) -> Result<String> {
    Ok(pretty(&simplify_fully(parse_expr(input)?)))
}

pub fn differentiate(input: &str, var: &str) -> Result<Expr> {
    let expr = parse_expr(input)?;
    Ok(simplify_fully(differentiate_expr(var, &expr)))
}

pub fn diff(input: &str, var: &str) -> Result<String> {
    Ok(pretty(&differentiate(input, var)?))
}

/// Antiderivative of a polynomial, without the constant of integration.
pub fn integral(input: &str, var: &str) -> Result<String> {
    Ok(pretty(&integrate(var, &parse_expr(input)?)?))
}

pub fn tex(input: &str) -> Result<String> {
    Ok(latex(&parse_expr(input)?))
}

/// Roots of `lhs = rhs` (or `expr = 0` without an `=`).
pub fn roots(equation: &str, var: &str) -> Result<EquationRoots> {
    let (lhs, rhs) = parse_equation(equation)?;
    solve_equation(&lhs, &rhs, var)
}

/// Roots rendered as text, exact values first, each group descending.
pub fn solve(equation: &str, var: &str) -> Result<Vec<String>> {
    let found = roots(equation, var)?;
    Ok(found
        .exact
        .iter()
        .map(|r| pretty(&Expr::Constant(r.clone())))
        .chain(found.approximate.iter().map(|z| show_complex(*z)))
        .collect())
}

/// Newton–Raphson from `x0` with default options.
pub fn newton(input: &str, var: &str, x0: f64) -> Result<NewtonRoot> {
    newton_raphson_root(&parse_expr(input)?, var, x0, NewtonOptions::default())
}
