use std::ops::Neg;

use num_complex::Complex64;
use num_traits::{Num, Signed, Zero};

use super::roots::{solve_cubic, solve_quadratic};
use crate::error::{MathError, Result};
use crate::expr::Rational;

/// Determinant of a square matrix by cofactor expansion along the first row.
///
/// Works for any element type with ring operations (`i64`, `f64`, `Rational`, ...).
/// Empty, ragged or non-square input is a shape error.
pub fn matrix_determinant<T>(matrix: &[Vec<T>]) -> Result<T>
where
    T: Num + Neg<Output = T> + Clone,
{
    check_square(matrix)?;
    Ok(cofactor_expansion(matrix))
}

fn check_square<T>(matrix: &[Vec<T>]) -> Result<usize> {
    let n = matrix.len();
    if n == 0 {
        return Err(MathError::shape("a non-empty square matrix", "0 rows"));
    }
    if let Some(row) = matrix.iter().find(|row| row.len() != n) {
        return Err(MathError::shape(
            format!("{n} columns in every row"),
            format!("a row with {} columns", row.len()),
        ));
    }
    Ok(n)
}

/// Eigenvalues of a 1x1, 2x2 or 3x3 matrix as roots of its characteristic polynomial.
///
/// Real parts come out descending, a conjugate pair with the positive imaginary part first.
/// Larger matrices are [`MathError::Unsupported`].
pub fn eigenvalues(matrix: &[Vec<f64>]) -> Result<Vec<Complex64>> {
    let n = check_square(matrix)?;
    let m = |i: usize, j: usize| matrix[i][j];
    match n {
        1 => Ok(vec![Complex64::new(m(0, 0), 0.0)]),
        2 => {
            let trace = m(0, 0) + m(1, 1);
            let det = cofactor_expansion(matrix);
            Ok(solve_quadratic(1.0, -trace, det)?.to_complex().to_vec())
        }
        3 => {
            let trace = m(0, 0) + m(1, 1) + m(2, 2);
            let principal_minors = (m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0))
                + (m(0, 0) * m(2, 2) - m(0, 2) * m(2, 0))
                + (m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1));
            let det = cofactor_expansion(matrix);
            Ok(solve_cubic(1.0, -trace, principal_minors, -det)?.roots.to_vec())
        }
        _ => Err(MathError::Unsupported(format!(
            "eigenvalues of a {n}x{n} matrix; closed forms stop at 3x3"
        ))),
    }
}

fn cofactor_expansion<T>(matrix: &[Vec<T>]) -> T
where
    T: Num + Neg<Output = T> + Clone,
{
    match matrix.len() {
        1 => matrix[0][0].clone(),
        2 => {
            matrix[0][0].clone() * matrix[1][1].clone() - matrix[0][1].clone() * matrix[1][0].clone()
        }
        n => {
            let mut det = T::zero();
            for col in 0..n {
                let entry = matrix[0][col].clone();
                if entry.is_zero() {
                    continue;
                }
                let minor: Vec<Vec<T>> = matrix[1..]
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|(k, _)| *k != col)
                            .map(|(_, v)| v.clone())
                            .collect()
                    })
                    .collect();
                let term = entry * cofactor_expansion(&minor);
                det = if col % 2 == 0 { det + term } else { det - term };
            }
            det
        }
    }
}

#[derive(Debug, Clone)]
pub enum LinearResult {
    Unique(LinearSolution),
    Infinite(LinearFamily),
    Inconsistent(LinearInconsistent),
}

impl LinearResult {
    pub fn diagnostics(&self) -> &LinearDiagnostics {
        match self {
            LinearResult::Unique(s) => &s.diagnostics,
            LinearResult::Infinite(f) => &f.diagnostics,
            LinearResult::Inconsistent(i) => &i.diagnostics,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinearSolution {
    pub values: Vec<Rational>,
    pub diagnostics: LinearDiagnostics,
}

/// `x = particular + sum(params[i] * basis[i])`.
#[derive(Debug, Clone)]
pub struct LinearFamily {
    pub particular: Vec<Rational>,
    pub params: Vec<String>,
    pub basis: Vec<Vec<Rational>>,
    pub diagnostics: LinearDiagnostics,
}

#[derive(Debug, Clone)]
pub struct LinearInconsistent {
    pub diagnostics: LinearDiagnostics,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearDiagnostics {
    pub rank: usize,
    pub pivot_rows: Vec<usize>,
    pub pivot_columns: Vec<usize>,
    pub free_columns: Vec<usize>,
    /// Only tracked for square systems.
    pub determinant: Option<Rational>,
    pub inconsistent_row: Option<usize>,
}

/// Solve `a * x = b` exactly with Gauss–Jordan elimination and partial pivoting.
pub fn solve_linear_system(a: &[Vec<Rational>], b: &[Rational]) -> Result<LinearResult> {
    let rows = a.len();
    if b.len() != rows {
        return Err(MathError::shape(
            format!("right-hand side of length {rows}"),
            format!("length {}", b.len()),
        ));
    }
    let n_vars = a.first().map_or(0, Vec::len);
    if let Some(row) = a.iter().find(|row| row.len() != n_vars) {
        return Err(MathError::shape(
            format!("{n_vars} columns in every row"),
            format!("a row with {} columns", row.len()),
        ));
    }

    let mut matrix = Augmented::new(a, b);
    let mut diagnostics = LinearDiagnostics {
        determinant: (rows == n_vars).then(|| Rational::from_integer(1.into())),
        ..LinearDiagnostics::default()
    };
    rref(&mut matrix, n_vars, &mut diagnostics);
    diagnostics.free_columns = (0..n_vars)
        .filter(|c| !diagnostics.pivot_columns.contains(c))
        .collect();

    if diagnostics.inconsistent_row.is_some() {
        return Ok(LinearResult::Inconsistent(LinearInconsistent { diagnostics }));
    }

    let mut particular = vec![Rational::zero(); n_vars];
    for (&row, &col) in diagnostics.pivot_rows.iter().zip(&diagnostics.pivot_columns) {
        particular[col] = matrix.get(row, n_vars).clone();
    }

    if diagnostics.rank == n_vars {
        return Ok(LinearResult::Unique(LinearSolution {
            values: particular,
            diagnostics,
        }));
    }

    let params = (1..=diagnostics.free_columns.len())
        .map(|i| format!("t{i}"))
        .collect();
    let basis = diagnostics
        .free_columns
        .iter()
        .map(|&free_col| {
            let mut vec = vec![Rational::zero(); n_vars];
            vec[free_col] = Rational::from_integer(1.into());
            for (&row, &pivot_col) in diagnostics.pivot_rows.iter().zip(&diagnostics.pivot_columns) {
                vec[pivot_col] = -matrix.get(row, free_col).clone();
            }
            vec
        })
        .collect();

    Ok(LinearResult::Infinite(LinearFamily {
        particular,
        params,
        basis,
        diagnostics,
    }))
}

fn rref(matrix: &mut Augmented, n_vars: usize, diag: &mut LinearDiagnostics) {
    let rows = matrix.rows;
    let cols = matrix.cols;
    let mut row = 0;
    for col in 0..n_vars {
        if row >= rows {
            break;
        }

        // Largest magnitude pivot keeps intermediate fractions small.
        let pivot = (row..rows)
            .filter(|&r| !matrix.get(r, col).is_zero())
            .max_by(|&x, &y| matrix.get(x, col).abs().cmp(&matrix.get(y, col).abs()));
        let Some(pivot_idx) = pivot else {
            continue;
        };

        if pivot_idx != row {
            matrix.swap_rows(row, pivot_idx);
            if let Some(det) = diag.determinant.as_mut() {
                *det = -det.clone();
            }
        }

        let pivot_value = matrix.get(row, col).clone();
        if let Some(det) = diag.determinant.as_mut() {
            *det *= &pivot_value;
        }
        for c in col..cols {
            *matrix.get_mut(row, c) /= &pivot_value;
        }

        let pivot_row: Vec<Rational> = matrix.row(row).to_vec();
        for r in (0..rows).filter(|&r| r != row) {
            let factor = matrix.get(r, col).clone();
            if factor.is_zero() {
                continue;
            }
            for c in col..cols {
                *matrix.get_mut(r, c) -= &factor * &pivot_row[c];
            }
        }

        diag.pivot_rows.push(row);
        diag.pivot_columns.push(col);
        row += 1;
    }

    diag.rank = diag.pivot_columns.len();
    if diag.rank < n_vars {
        if let Some(det) = diag.determinant.as_mut() {
            *det = Rational::zero();
        }
    }

    diag.inconsistent_row = (row..rows).find(|&r| {
        let values = matrix.row(r);
        values[..n_vars].iter().all(Zero::is_zero) && !values[n_vars].is_zero()
    });
}

/// Row-major augmented matrix `[a | b]`.
struct Augmented {
    rows: usize,
    cols: usize,
    data: Vec<Rational>,
}

impl Augmented {
    fn new(a: &[Vec<Rational>], b: &[Rational]) -> Self {
        let cols = a.first().map_or(0, Vec::len) + 1;
        let data = a
            .iter()
            .zip(b)
            .flat_map(|(row, rhs)| row.iter().chain(std::iter::once(rhs)).cloned())
            .collect();
        Augmented {
            rows: a.len(),
            cols,
            data,
        }
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn get(&self, row: usize, col: usize) -> &Rational {
        &self.data[self.idx(row, col)]
    }

    fn get_mut(&mut self, row: usize, col: usize) -> &mut Rational {
        let idx = self.idx(row, col);
        &mut self.data[idx]
    }

    fn row(&self, row: usize) -> &[Rational] {
        let start = self.idx(row, 0);
        &self.data[start..start + self.cols]
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        for offset in 0..self.cols {
            self.data.swap(a * self.cols + offset, b * self.cols + offset);
        }
    }
}
