//! Mathematical, scientific and text utilities: closed-form and exact equation
//! solving, number theory, descriptive statistics, LaTeX and plain-text
//! formatting, textbook algorithms, calendar helpers, and small physics and chemistry
//! toolkits.

pub mod algebra;
pub mod calculus;
pub mod chemistry;
pub mod cs;
pub mod datetime;
pub mod error;
pub mod expr;
pub mod format;
pub mod number_theory;
pub mod parser;
pub mod physics;
pub mod polynomial;
pub mod prelude;
pub mod simplify;
pub mod stats;
pub mod strings;

pub use algebra::{
    CubicRoots, EquationRoots, LinearDiagnostics, LinearResult, QuadraticRoots, eigenvalues,
    matrix_determinant, solve_cubic, solve_equation, solve_linear, solve_linear_system,
    solve_quadratic,
};
pub use calculus::{
    NewtonOptions, NewtonRoot, differentiate, integrate, integrate_definite, newton_raphson_root,
    taylor_series,
};
pub use error::{Degeneracy, MathError, Result};
pub use expr::{Expr, Rational, one, rational, zero};
pub use format::{latex, latex_equation, latex_fraction, latex_matrix, pretty};
pub use parser::{parse_equation, parse_expr};
pub use polynomial::Poly;
pub use simplify::{simplify, simplify_fully, simplify_with_limit};
pub use stats::VarianceKind;
