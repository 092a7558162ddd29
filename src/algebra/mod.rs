//! Equation solving: closed-form roots, determinants, linear systems and polynomial equations.

mod equation;
mod matrix;
mod roots;

pub use equation::{EquationRoots, real_values, solve_equation, solve_poly};
pub use matrix::{
    LinearDiagnostics, LinearFamily, LinearInconsistent, LinearResult, LinearSolution,
    eigenvalues, matrix_determinant, solve_linear_system,
};
pub use roots::{CubicRoots, QuadraticRoots, discriminant, solve_cubic, solve_linear, solve_quadratic};
