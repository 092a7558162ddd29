use num_complex::Complex64;
use num_traits::Zero;

use crate::algebra::roots::{QuadraticRoots, solve_cubic, solve_quadratic};
use crate::error::{Degeneracy, MathError, Result};
use crate::expr::{Expr, Rational};
use crate::polynomial::Poly;

/// Solutions of `lhs = rhs`.
///
/// `exact` holds the distinct rational roots, `approximate` the roots of the factor left
/// after dividing them out. Both are sorted descending (real part first for complex values).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquationRoots {
    pub exact: Vec<Rational>,
    pub approximate: Vec<Complex64>,
}

impl EquationRoots {
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.approximate.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.approximate.len()
    }
}

pub fn solve_equation(lhs: &Expr, rhs: &Expr, var: &str) -> Result<EquationRoots> {
    let left = Poly::from_expr(lhs, var);
    let right = Poly::from_expr(rhs, var);
    let (Some(left), Some(right)) = (left, right) else {
        return Err(MathError::Unsupported(format!(
            "equation is not polynomial in `{var}`"
        )));
    };
    solve_poly(&(left - right))
}

/// Roots of `poly = 0`.
pub fn solve_poly(poly: &Poly) -> Result<EquationRoots> {
    match poly.degree() {
        None => return Err(MathError::Division(Degeneracy::InfiniteSolutions)),
        Some(0) => return Err(MathError::Division(Degeneracy::NoSolution)),
        Some(_) => {}
    }

    let (rational, residual) = poly.rational_roots();
    let exact = rational.into_iter().map(|(root, _)| root).collect();

    // Repeated irrational factors such as (x^2 - 2)^2 reduce to a solvable degree.
    let coeffs = residual.square_free().coeffs_descending_f64();
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(MathError::Unsupported(
            "residual coefficients exceed the floating point range".to_string(),
        ));
    }
    let mut approximate = match coeffs.as_slice() {
        [] | [_] => Vec::new(),
        [a, b] => vec![Complex64::new(-b / a, 0.0)],
        [a, b, c] => match solve_quadratic(*a, *b, *c)? {
            QuadraticRoots::Real(r1, r2) => vec![Complex64::new(r1, 0.0), Complex64::new(r2, 0.0)],
            QuadraticRoots::Repeated(r) => vec![Complex64::new(r, 0.0)],
            QuadraticRoots::Complex(z1, z2) => vec![z1, z2],
        },
        [a, b, c, d] => solve_cubic(*a, *b, *c, *d)?.roots.to_vec(),
        _ => {
            return Err(MathError::Unsupported(format!(
                "no closed form for a residual factor of degree {}",
                coeffs.len() - 1
            )));
        }
    };
    if approximate.iter().any(|z| !(z.re.is_finite() && z.im.is_finite())) {
        return Err(MathError::Unsupported(
            "closed form lost precision on the residual factor".to_string(),
        ));
    }
    approximate.sort_by(|a, b| b.re.total_cmp(&a.re).then_with(|| b.im.total_cmp(&a.im)));

    Ok(EquationRoots { exact, approximate })
}

/// Collapse roots into real values when every imaginary part vanishes.
pub fn real_values(roots: &EquationRoots) -> Option<Vec<f64>> {
    if roots.approximate.iter().any(|z| !z.im.is_zero()) {
        return None;
    }
    let mut values: Vec<f64> = roots
        .exact
        .iter()
        .map(crate::expr::rational_to_f64)
        .chain(roots.approximate.iter().map(|z| z.re))
        .collect();
    values.sort_by(|a, b| b.total_cmp(a));
    Some(values)
}
