use crate::error::{MathError, Result};
use crate::expr::{Expr, Rational, one, zero};
use crate::polynomial::Poly;
use crate::simplify::{simplify, simplify_add, simplify_div, simplify_mul, simplify_neg, simplify_sub};

pub fn differentiate(var: &str, expr: &Expr) -> Expr {
    Differentiator { var }.derive(expr)
}

/// Derivative of order `order`; order zero returns the input unchanged.
pub fn differentiate_n(var: &str, expr: &Expr, order: usize) -> Expr {
    (0..order).fold(expr.clone(), |acc, _| differentiate(var, &acc))
}

struct Differentiator<'a> {
    var: &'a str,
}

impl Differentiator<'_> {
    fn derive(&self, expr: &Expr) -> Expr {
        if !expr.contains_var(self.var) {
            return zero();
        }
        match expr {
            Expr::Variable(_) => one(),
            Expr::Constant(_) => zero(),

            Expr::Add(a, b) => simplify_add(self.derive(a), self.derive(b)),
            Expr::Sub(a, b) => simplify_sub(self.derive(a), self.derive(b)),
            Expr::Neg(a) => simplify_neg(self.derive(a)),
            Expr::Mul(a, b) => simplify_add(
                simplify_mul(self.derive(a), (**b).clone()),
                simplify_mul((**a).clone(), self.derive(b)),
            ),
            Expr::Div(a, b) => simplify_div(
                simplify_sub(
                    simplify_mul(self.derive(a), (**b).clone()),
                    simplify_mul((**a).clone(), self.derive(b)),
                ),
                square((**b).clone()),
            ),
            Expr::Pow(base, exp) => self.power_rule(base, exp),

            Expr::Sin(a) => self.chain_rule(a, Expr::Cos(a.clone())),
            Expr::Cos(a) => simplify_neg(self.chain_rule(a, Expr::Sin(a.clone()))),
            Expr::Tan(a) => self.chain_rule(
                a,
                Expr::Div(one().boxed(), square(Expr::Cos(a.clone())).boxed()),
            ),
            Expr::Exp(a) => self.chain_rule(a, Expr::Exp(a.clone())),
            Expr::Log(a) => simplify_div(self.derive(a), (**a).clone()),
            Expr::Sqrt(a) => simplify_div(
                self.derive(a),
                simplify_mul(Expr::integer(2), Expr::Sqrt(a.clone())),
            ),
            Expr::Abs(a) => self.chain_rule(a, Expr::Div(a.clone(), Expr::Abs(a.clone()).boxed())),
        }
    }

    fn power_rule(&self, base: &Expr, exp: &Expr) -> Expr {
        if !exp.contains_var(self.var) {
            // d/dx f^n = n f^(n-1) f'
            let reduced = simplify_sub(exp.clone(), one());
            let outer = simplify_mul(exp.clone(), simplify(Expr::Pow(base.clone().boxed(), reduced.boxed())));
            return simplify_mul(outer, self.derive(base));
        }
        // d/dx f^g = f^g (g' ln f + g f'/f)
        let f = Expr::Pow(base.clone().boxed(), exp.clone().boxed());
        let log_term = simplify_mul(self.derive(exp), Expr::Log(base.clone().boxed()));
        let ratio_term = simplify_div(simplify_mul(exp.clone(), self.derive(base)), base.clone());
        simplify_mul(f, simplify_add(log_term, ratio_term))
    }

    fn chain_rule(&self, arg: &Expr, outer: Expr) -> Expr {
        simplify_mul(self.derive(arg), simplify(outer))
    }
}

fn square(expr: Expr) -> Expr {
    Expr::Pow(expr.boxed(), Expr::integer(2).boxed())
}

/// Indefinite integral of a polynomial in `var`, without the constant of integration.
///
/// Anything [`Poly::from_expr`] cannot read, such as `sin(x)` or `1/x`, is
/// [`MathError::Unsupported`].
pub fn integrate(var: &str, expr: &Expr) -> Result<Expr> {
    Ok(polynomial_in(var, expr)?.antiderivative().to_expr(var))
}

/// Exact value of the integral of a polynomial from `lower` to `upper`.
pub fn integrate_definite(var: &str, expr: &Expr, lower: &Rational, upper: &Rational) -> Result<Rational> {
    let antiderivative = polynomial_in(var, expr)?.antiderivative();
    Ok(antiderivative.evaluate(upper) - antiderivative.evaluate(lower))
}

fn polynomial_in(var: &str, expr: &Expr) -> Result<Poly> {
    Poly::from_expr(expr, var).ok_or_else(|| {
        MathError::Unsupported(format!("only polynomials in `{var}` can be integrated, got {expr}"))
    })
}

/// The first `terms` Taylor coefficients of `expr` about `center`: `f^(k)(center) / k!`.
///
/// Derivatives are symbolic and evaluated numerically; a non-finite derivative at
/// `center` (as for `ln(x)` about 0) is a domain error.
pub fn taylor_series(var: &str, expr: &Expr, center: f64, terms: usize) -> Result<Vec<f64>> {
    let mut coefficients = Vec::with_capacity(terms);
    let mut derivative = expr.clone();
    let mut factorial = 1.0;
    for k in 0..terms {
        if k > 0 {
            derivative = differentiate(var, &derivative);
            factorial *= k as f64;
        }
        let value = derivative.eval_at(var, center)?;
        if !value.is_finite() {
            return Err(MathError::domain(format!(
                "derivative {k} of {expr} is not finite at {center}"
            )));
        }
        coefficients.push(value / factorial);
    }
    Ok(coefficients)
}

/// Iteration limits for [`newton_raphson_root`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOptions {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        NewtonOptions {
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

/// Outcome of a Newton–Raphson run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRoot {
    pub value: f64,
    pub iterations: usize,
    /// False when the iteration cap was hit or the derivative vanished first.
    pub converged: bool,
}

const FLAT_DERIVATIVE: f64 = 1e-14;

/// Find a root of `expr = 0` in `var` starting from `x0`.
///
/// The derivative is taken symbolically. A near-zero derivative stops the iteration
/// and returns the current estimate with `converged == false`; a non-finite
/// intermediate value is reported as a domain error.
pub fn newton_raphson_root(expr: &Expr, var: &str, x0: f64, options: NewtonOptions) -> Result<NewtonRoot> {
    let derivative = differentiate(var, expr);
    let mut x = x0;
    for iteration in 1..=options.max_iterations {
        let fx = expr.eval_at(var, x)?;
        let dfx = derivative.eval_at(var, x)?;
        if !fx.is_finite() || !dfx.is_finite() {
            return Err(MathError::domain(format!("function is not finite at {x}")));
        }
        if dfx.abs() < FLAT_DERIVATIVE {
            return Ok(NewtonRoot {
                value: x,
                iterations: iteration,
                converged: fx.abs() < options.tolerance,
            });
        }
        let next = x - fx / dfx;
        if (next - x).abs() < options.tolerance {
            return Ok(NewtonRoot {
                value: next,
                iterations: iteration,
                converged: true,
            });
        }
        x = next;
    }
    Ok(NewtonRoot {
        value: x,
        iterations: options.max_iterations,
        converged: false,
    })
}
