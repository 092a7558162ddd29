use approx::assert_abs_diff_eq;
use num_complex::Complex64;
use priyam::algebra::{
    CubicRoots, LinearResult, QuadraticRoots, eigenvalues, matrix_determinant, real_values, solve_cubic, solve_equation,
    solve_linear, solve_linear_system, solve_quadratic,
};
use priyam::{Degeneracy, MathError, Rational, parse_equation};

fn r(n: i64) -> Rational {
    Rational::from_integer(n.into())
}

fn rows(data: &[&[i64]]) -> Vec<Vec<Rational>> {
    data.iter().map(|row| row.iter().map(|&v| r(v)).collect()).collect()
}

fn roots_of(equation: &str) -> priyam::Result<priyam::EquationRoots> {
    let (lhs, rhs) = parse_equation(equation).expect("parse equation");
    solve_equation(&lhs, &rhs, "x")
}

#[test]
fn linear_equation() {
    assert_eq!(solve_linear(2.0, -4.0), Ok(2.0));
    assert_eq!(
        solve_linear(0.0, 0.0),
        Err(MathError::Division(Degeneracy::InfiniteSolutions))
    );
    assert_eq!(
        solve_linear(0.0, 3.0),
        Err(MathError::Division(Degeneracy::NoSolution))
    );
}

#[test]
fn quadratic_real_roots_descend() {
    assert_eq!(solve_quadratic(1.0, -3.0, 2.0), Ok(QuadraticRoots::Real(2.0, 1.0)));
    match solve_quadratic(-1.0, 0.0, 4.0) {
        Ok(QuadraticRoots::Real(hi, lo)) => {
            assert_abs_diff_eq!(hi, 2.0, epsilon = 1e-12);
            assert_abs_diff_eq!(lo, -2.0, epsilon = 1e-12);
        }
        other => panic!("expected two real roots, got {other:?}"),
    }
}

#[test]
fn quadratic_repeated_and_complex() {
    assert_eq!(solve_quadratic(1.0, 2.0, 1.0), Ok(QuadraticRoots::Repeated(-1.0)));
    match solve_quadratic(1.0, 0.0, 1.0) {
        Ok(QuadraticRoots::Complex(z1, z2)) => {
            assert_abs_diff_eq!(z1.re, 0.0);
            assert_abs_diff_eq!(z1.im, 1.0);
            assert_eq!(z2, z1.conj());
        }
        other => panic!("expected a conjugate pair, got {other:?}"),
    }
}

#[test]
fn quadratic_rejects_zero_leading_coefficient() {
    assert_eq!(
        solve_quadratic(0.0, 1.0, 1.0),
        Err(MathError::Division(Degeneracy::ZeroLeadingCoefficient))
    );
}

#[test]
fn quadratic_small_root_keeps_precision() {
    // x^2 - 1e8 x + 1: the naive formula loses the small root entirely.
    let Ok(QuadraticRoots::Real(hi, lo)) = solve_quadratic(1.0, -1e8, 1.0) else {
        panic!("expected real roots");
    };
    assert_abs_diff_eq!(hi, 1e8, epsilon = 1e-6);
    assert_abs_diff_eq!(lo, 1e-8, epsilon = 1e-20);
}

#[test]
fn cubic_three_real_roots() {
    let roots = solve_cubic(1.0, -6.0, 11.0, -6.0).expect("solve cubic");
    let [a, b, c] = roots.real().expect("all roots real");
    assert_abs_diff_eq!(a, 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(c, 1.0, epsilon = 1e-9);
}

#[test]
fn cubic_with_complex_pair() {
    let CubicRoots { roots } = solve_cubic(1.0, 0.0, 0.0, -1.0).expect("solve cubic");
    assert_abs_diff_eq!(roots[0].re, 1.0, epsilon = 1e-12);
    assert_eq!(roots[0].im, 0.0);
    assert_abs_diff_eq!(roots[1].re, -0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(roots[1].im, 3f64.sqrt() / 2.0, epsilon = 1e-12);
    assert_eq!(roots[2], roots[1].conj());
    assert_eq!(solve_cubic(1.0, 0.0, 0.0, -1.0).map(|r| r.real()), Ok(None));
}

#[test]
fn cubic_repeated_roots() {
    let triple = solve_cubic(1.0, -3.0, 3.0, -1.0).expect("solve cubic");
    for z in triple.roots {
        assert_abs_diff_eq!(z.re, 1.0, epsilon = 1e-9);
    }
    let double = solve_cubic(1.0, -4.0, 5.0, -2.0).expect("solve cubic");
    let values = double.real().expect("real roots");
    assert_abs_diff_eq!(values[0], 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(values[1], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(values[2], 1.0, epsilon = 1e-9);
}

#[test]
fn cubic_rejects_zero_leading_coefficient() {
    assert_eq!(
        solve_cubic(0.0, 1.0, 2.0, 3.0),
        Err(MathError::Division(Degeneracy::ZeroLeadingCoefficient))
    );
}

#[test]
fn determinant_of_integer_matrices() {
    assert_eq!(matrix_determinant(&[vec![1i64, 2], vec![3, 4]]), Ok(-2));
    assert_eq!(
        matrix_determinant(&[vec![2i64, 3, 1], vec![1, 2, 3], vec![3, 1, 2]]),
        Ok(18)
    );
    assert_eq!(matrix_determinant(&[vec![7i64]]), Ok(7));
    let identity4: Vec<Vec<i64>> = (0..4)
        .map(|i| (0..4).map(|j| i64::from(i == j)).collect())
        .collect();
    assert_eq!(matrix_determinant(&identity4), Ok(1));
}

#[test]
fn determinant_of_float_and_rational_matrices() {
    let det = matrix_determinant(&[vec![0.5, 1.5], vec![2.0, 4.0]]).expect("square");
    assert_abs_diff_eq!(det, -1.0, epsilon = 1e-12);

    let half = Rational::new(1.into(), 2.into());
    let m = vec![vec![half.clone(), r(1)], vec![r(1), half]];
    assert_eq!(matrix_determinant(&m), Ok(Rational::new((-3).into(), 4.into())));
}

#[test]
fn determinant_shape_errors() {
    let empty: Vec<Vec<i64>> = Vec::new();
    assert!(matches!(matrix_determinant(&empty), Err(MathError::Shape { .. })));
    assert!(matches!(
        matrix_determinant(&[vec![1i64, 2, 3], vec![4, 5, 6]]),
        Err(MathError::Shape { .. })
    ));
    assert!(matches!(
        matrix_determinant(&[vec![1i64, 2], vec![3]]),
        Err(MathError::Shape { .. })
    ));
}

#[test]
fn linear_system_unique() {
    let a = rows(&[&[2, 1], &[1, -1]]);
    let result = solve_linear_system(&a, &[r(5), r(1)]).expect("well formed");
    let LinearResult::Unique(sol) = result else {
        panic!("expected unique solution, got {result:?}");
    };
    assert_eq!(sol.values, vec![r(2), r(1)]);
    assert_eq!(sol.diagnostics.rank, 2);
    assert_eq!(sol.diagnostics.determinant, Some(r(-3)));
    assert!(sol.diagnostics.free_columns.is_empty());
}

#[test]
fn linear_system_infinite_family() {
    let a = rows(&[&[1, 1], &[2, 2]]);
    let result = solve_linear_system(&a, &[r(2), r(4)]).expect("well formed");
    let LinearResult::Infinite(family) = result else {
        panic!("expected a family, got {result:?}");
    };
    assert_eq!(family.params, vec!["t1".to_string()]);
    assert_eq!(family.particular, vec![r(2), r(0)]);
    assert_eq!(family.basis, vec![vec![r(-1), r(1)]]);
    assert_eq!(family.diagnostics.free_columns, vec![1]);
    assert_eq!(family.diagnostics.determinant, Some(r(0)));
}

#[test]
fn linear_system_inconsistent() {
    let a = rows(&[&[1, 1], &[1, 1]]);
    let result = solve_linear_system(&a, &[r(1), r(2)]).expect("well formed");
    assert!(matches!(result, LinearResult::Inconsistent(_)));
    assert_eq!(result.diagnostics().inconsistent_row, Some(1));
    assert_eq!(result.diagnostics().rank, 1);
}

#[test]
fn linear_system_shape_mismatch() {
    let a = rows(&[&[1, 0], &[0, 1]]);
    assert!(matches!(
        solve_linear_system(&a, &[r(1)]),
        Err(MathError::Shape { .. })
    ));
}

#[test]
fn equation_with_rational_roots() {
    let roots = roots_of("x^3 - 6*x^2 + 11*x - 6 = 0").expect("polynomial");
    assert_eq!(roots.exact, vec![r(3), r(2), r(1)]);
    assert!(roots.approximate.is_empty());

    let roots = roots_of("2*x = 1").expect("polynomial");
    assert_eq!(roots.exact, vec![Rational::new(1.into(), 2.into())]);
}

#[test]
fn equation_with_irrational_and_complex_roots() {
    let roots = roots_of("x^2 = 2").expect("polynomial");
    assert!(roots.exact.is_empty());
    assert_eq!(roots.approximate.len(), 2);
    assert_abs_diff_eq!(roots.approximate[0].re, 2f64.sqrt(), epsilon = 1e-12);
    assert_abs_diff_eq!(roots.approximate[1].re, -(2f64.sqrt()), epsilon = 1e-12);

    let roots = roots_of("(x - 1)^2*(x^2 + 1)").expect("polynomial");
    assert_eq!(roots.exact, vec![r(1)]);
    let im: Vec<f64> = roots.approximate.iter().map(|z: &Complex64| z.im).collect();
    assert_eq!(im.len(), 2);
    assert_abs_diff_eq!(im[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(im[1], -1.0, epsilon = 1e-12);
}

#[test]
fn equation_with_repeated_irrational_factor() {
    let roots = roots_of("(x^2 - 2)^2 = 0").expect("polynomial");
    assert_eq!(roots.approximate.len(), 2);
    assert_abs_diff_eq!(roots.approximate[0].re, 2f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn equation_real_values_merge_both_groups() {
    let roots = roots_of("x^3 - 2*x = 0").expect("polynomial");
    assert_eq!(roots.exact, vec![r(0)]);
    let values = real_values(&roots).expect("all real");
    assert_eq!(values.len(), 3);
    assert_abs_diff_eq!(values[0], 2f64.sqrt(), epsilon = 1e-12);
    assert_eq!(values[1], 0.0);
    assert_abs_diff_eq!(values[2], -(2f64.sqrt()), epsilon = 1e-12);

    assert_eq!(real_values(&roots_of("x^2 + 1").expect("polynomial")), None);
}

#[test]
fn equation_with_large_constant_term() {
    let roots = roots_of("x^2 = 10000000000000000").expect("polynomial");
    assert_eq!(roots.exact, vec![r(100_000_000), r(-100_000_000)]);

    let roots = roots_of("x^2 = 1000000000000000000000000").expect("polynomial");
    let trillion = Rational::from_integer(1_000_000_000_000i64.into());
    assert_eq!(roots.exact, vec![trillion.clone(), -trillion]);

    // 1000000007 * 1000000009: both factors lie beyond trial division.
    let roots = roots_of("x^2 = 1000000016000000063").expect("polynomial");
    assert!(roots.exact.is_empty());
    let expected = 1000000016000000063f64.sqrt();
    assert_eq!(roots.approximate.len(), 2);
    assert_abs_diff_eq!(roots.approximate[0].re / expected, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(roots.approximate[1].re / expected, -1.0, epsilon = 1e-12);
}

#[test]
fn equation_failures() {
    assert!(matches!(roots_of("sin(x) = 0"), Err(MathError::Unsupported(_))));
    assert!(matches!(roots_of("x^5 - x - 1"), Err(MathError::Unsupported(_))));
    let huge = format!("x^2 + 1{}", "0".repeat(400));
    assert!(matches!(roots_of(&huge), Err(MathError::Unsupported(_))));
    assert_eq!(
        roots_of("x + 1 = x + 1").map(|_| ()),
        Err(MathError::Division(Degeneracy::InfiniteSolutions))
    );
    assert_eq!(
        roots_of("x = x + 1").map(|_| ()),
        Err(MathError::Division(Degeneracy::NoSolution))
    );
}

fn assert_eigenvalues(matrix: &[Vec<f64>], expected: &[Complex64]) {
    let found = eigenvalues(matrix).unwrap();
    assert_eq!(found.len(), expected.len());
    for (z, want) in found.iter().zip(expected) {
        assert!((z - want).norm() < 1e-9, "{found:?} vs {expected:?}");
    }
}

#[test]
fn eigenvalues_from_characteristic_polynomial() {
    let re = |v: f64| Complex64::new(v, 0.0);
    assert_eigenvalues(&[vec![4.0]], &[re(4.0)]);
    assert_eigenvalues(&[vec![3.0, 0.0], vec![0.0, 2.0]], &[re(3.0), re(2.0)]);
    assert_eigenvalues(&[vec![2.0, 1.0], vec![1.0, 2.0]], &[re(3.0), re(1.0)]);
    assert_eigenvalues(&[vec![5.0, 0.0], vec![0.0, 5.0]], &[re(5.0), re(5.0)]);
    assert_eigenvalues(
        &[vec![0.0, -1.0], vec![1.0, 0.0]],
        &[Complex64::new(0.0, 1.0), Complex64::new(0.0, -1.0)],
    );
    assert_eigenvalues(
        &[vec![1.0, 0.0, 0.0], vec![0.0, 2.0, 0.0], vec![0.0, 0.0, 3.0]],
        &[re(3.0), re(2.0), re(1.0)],
    );
    // Upper triangular: eigenvalues sit on the diagonal.
    assert_eigenvalues(
        &[vec![2.0, 7.0, -1.0], vec![0.0, -4.0, 3.0], vec![0.0, 0.0, 6.0]],
        &[re(6.0), re(2.0), re(-4.0)],
    );
    // Rotation about z by 90 degrees.
    assert_eigenvalues(
        &[vec![0.0, -1.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]],
        &[re(1.0), Complex64::new(0.0, 1.0), Complex64::new(0.0, -1.0)],
    );
}

#[test]
fn eigenvalues_reject_bad_shapes() {
    assert!(matches!(eigenvalues(&[]), Err(MathError::Shape { .. })));
    assert!(matches!(
        eigenvalues(&[vec![1.0, 2.0], vec![3.0]]),
        Err(MathError::Shape { .. })
    ));
    let identity4: Vec<Vec<f64>> = (0..4)
        .map(|i| (0..4).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();
    assert!(matches!(eigenvalues(&identity4), Err(MathError::Unsupported(_))));
}
