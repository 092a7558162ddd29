use num_complex::Complex64;
use num_traits::Zero;

use super::pretty::show_rational;
use crate::algebra::{EquationRoots, LinearDiagnostics, LinearResult, QuadraticRoots};

/// Render a linear-system result into human-readable lines.
///
/// `vars` names the unknowns in column order; missing names fall back to `x1, x2, ...`.
pub fn linear_summary(result: &LinearResult, vars: &[&str]) -> Vec<String> {
    let name = |i: usize| {
        vars.get(i)
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("x{}", i + 1))
    };
    match result {
        LinearResult::Unique(sol) => {
            let mut lines = vec!["Unique solution:".to_string()];
            for (i, value) in sol.values.iter().enumerate() {
                lines.push(format!("{} = {}", name(i), show_rational(value)));
            }
            push_diag(&mut lines, &sol.diagnostics);
            lines
        }
        LinearResult::Infinite(family) => {
            let mut lines = vec![format!(
                "Infinite solutions (params: {}):",
                family.params.join(", ")
            )];
            for (i, particular) in family.particular.iter().enumerate() {
                let mut parts = vec![show_rational(particular)];
                for (param, basis_vec) in family.params.iter().zip(&family.basis) {
                    let coeff = &basis_vec[i];
                    if !coeff.is_zero() {
                        parts.push(format!("{}*{param}", show_rational(coeff)));
                    }
                }
                lines.push(format!("{} = {}", name(i), parts.join(" + ")));
            }
            push_diag(&mut lines, &family.diagnostics);
            lines
        }
        LinearResult::Inconsistent(info) => {
            let mut lines = vec!["No solution (inconsistent system).".to_string()];
            if let Some(row) = info.diagnostics.inconsistent_row {
                lines.push(format!("Inconsistent reduced row index: {row}"));
            }
            push_diag(&mut lines, &info.diagnostics);
            lines
        }
    }
}

/// One `var = value` line per root, exact roots first.
pub fn roots_summary(roots: &EquationRoots, var: &str) -> Vec<String> {
    if roots.is_empty() {
        return vec!["No roots.".to_string()];
    }
    roots
        .exact
        .iter()
        .map(|r| format!("{var} = {}", show_rational(r)))
        .chain(
            roots
                .approximate
                .iter()
                .map(|z| format!("{var} ≈ {}", show_complex(*z))),
        )
        .collect()
}

pub fn quadratic_summary(roots: &QuadraticRoots) -> String {
    match roots {
        QuadraticRoots::Real(r1, r2) => format!("two real roots: {r1}, {r2}"),
        QuadraticRoots::Repeated(r) => format!("repeated root: {r}"),
        QuadraticRoots::Complex(z1, z2) => format!(
            "complex conjugate roots: {}, {}",
            show_complex(*z1),
            show_complex(*z2)
        ),
    }
}

pub fn show_complex(z: Complex64) -> String {
    // Avoid printing "-0" for a vanishing real part.
    let re = if z.re == 0.0 { 0.0 } else { z.re };
    if z.im == 0.0 {
        format!("{re}")
    } else if z.im < 0.0 {
        format!("{re} - {}i", -z.im)
    } else {
        format!("{re} + {}i", z.im)
    }
}

fn push_diag(lines: &mut Vec<String>, diag: &LinearDiagnostics) {
    lines.push(format!("Rank: {}", diag.rank));
    if let Some(det) = &diag.determinant {
        lines.push(format!("Determinant: {}", show_rational(det)));
    }
    if !diag.pivot_columns.is_empty() {
        lines.push(format!("Pivot columns: {:?}", diag.pivot_columns));
    }
    if !diag.free_columns.is_empty() {
        lines.push(format!("Free columns: {:?}", diag.free_columns));
    }
}
