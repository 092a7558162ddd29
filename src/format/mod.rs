//! Formatting helpers for rendering expressions and solver output.

pub mod latex;
mod pretty;
pub mod solve;

pub use latex::{latex, latex_equation, latex_fraction, latex_matrix};
pub use pretty::pretty;
pub use solve::{linear_summary, quadratic_summary, roots_summary, show_complex};
