use approx::assert_abs_diff_eq;
use priyam::calculus::differentiate_n;
use priyam::prelude::{diff, integral, newton, roots, simp, solve, tex};
use priyam::{
    Expr, MathError, NewtonOptions, Rational, differentiate, integrate, integrate_definite,
    newton_raphson_root, parse_equation, parse_expr, rational, simplify_fully, taylor_series,
};

fn eval(input: &str, x: f64) -> f64 {
    parse_expr(input).expect("parse").eval_at("x", x).expect("evaluate")
}

fn expect_simplified(input: &str, expected: &str) {
    let actual = simplify_fully(parse_expr(input).expect("parse input"));
    let expected_expr = simplify_fully(parse_expr(expected).expect("parse expected"));
    assert_eq!(actual, expected_expr, "simplify {input}");
}

#[test]
fn parser_precedence() {
    assert_eq!(eval("2^3^2", 0.0), 512.0);
    assert_eq!(eval("2 ** 3", 0.0), 8.0);
    assert_eq!(eval("-x^2", 3.0), -9.0);
    assert_eq!(eval("(-x)^2", 3.0), 9.0);
    assert_eq!(eval("1 - 2 - 3", 0.0), -4.0);
    assert_eq!(eval("12 / 3 / 2", 0.0), 2.0);
    assert_eq!(eval("2*x + 3*x^2", 2.0), 16.0);
    assert_eq!(eval("x^-1", 4.0), 0.25);
}

#[test]
fn parser_literals_and_functions() {
    assert_eq!(
        parse_expr("0.5").unwrap(),
        Expr::Constant(Rational::new(1.into(), 2.into()))
    );
    assert_eq!(parse_expr("sinx").unwrap(), Expr::var("sinx"));
    assert!((eval("sqrt(x) + abs(-2) + ln(exp(1))", 9.0) - 6.0).abs() < 1e-12);
    assert!((eval("log(x)", std::f64::consts::E) - 1.0).abs() < 1e-12);
    assert!((eval("sin(x)^2 + cos(x)^2", 0.4) - 1.0).abs() < 1e-12);
}

#[test]
fn operators_build_parser_trees() {
    let x = || Expr::var("x");
    assert_eq!(
        x().pow(Expr::integer(2)) + Expr::integer(1),
        parse_expr("x^2 + 1").unwrap()
    );
    assert_eq!(-x() * Expr::integer(3), parse_expr("-x*3").unwrap());
    assert_eq!(x() / (x() - Expr::integer(1)), parse_expr("x/(x - 1)").unwrap());
    assert_eq!(x().to_string(), "x");
}

#[test]
fn parser_errors() {
    for input in ["", "3x", "sin x", "(1 + 2", "1 +", "x $ 2"] {
        assert!(
            matches!(parse_expr(input), Err(MathError::Parse(_))),
            "{input:?} should not parse"
        );
    }
}

#[test]
fn equations_split_on_equals() {
    let (lhs, rhs) = parse_equation("x^2 = 4").unwrap();
    assert_eq!(lhs, parse_expr("x^2").unwrap());
    assert_eq!(rhs, Expr::integer(4));
    let (_, rhs) = parse_equation("x - 1").unwrap();
    assert!(rhs.is_zero());
}

#[test]
fn unbound_variable_is_domain_error() {
    let expr = parse_expr("x + y").unwrap();
    assert!(matches!(expr.eval_at("x", 1.0), Err(MathError::Domain(_))));
}

#[test]
fn simplification() {
    expect_simplified("2*x*3", "6*x");
    expect_simplified("x*1 + 0", "x");
    expect_simplified("x + x", "2*x");
    expect_simplified("x*x", "x^2");
    expect_simplified("x - x", "0");
    expect_simplified("2^10", "1024");
    expect_simplified("sqrt(16/9)", "4/3");
    expect_simplified("exp(0) + sin(0)", "1");
    expect_simplified("ln(exp(x))", "x");
    expect_simplified("(x^2)^3", "x^6");
}

#[test]
fn derivatives_match_central_differences() {
    let cases = [
        "x^3 - 2*x",
        "sin(x)*cos(x)",
        "exp(x^2)",
        "ln(x)/x",
        "sqrt(x^2 + 1)",
        "x^x",
        "tan(x)",
        "abs(x - 3)",
        "1/(1 + x^2)",
    ];
    let h = 1e-6;
    for input in cases {
        let expr = parse_expr(input).unwrap();
        let derivative = differentiate("x", &expr);
        for x in [0.7, 1.3, 2.1] {
            let numeric =
                (expr.eval_at("x", x + h).unwrap() - expr.eval_at("x", x - h).unwrap()) / (2.0 * h);
            let symbolic = derivative.eval_at("x", x).unwrap();
            assert!(
                (numeric - symbolic).abs() < 1e-6 * symbolic.abs().max(1.0),
                "d/dx {input} at {x}: {symbolic} vs {numeric}"
            );
        }
    }
}

#[test]
fn derivative_of_other_variable_is_zero() {
    let expr = parse_expr("y^2 + 3").unwrap();
    assert!(differentiate("x", &expr).is_zero());
    let second = differentiate_n("x", &parse_expr("x^3").unwrap(), 2);
    assert_eq!(second.eval_at("x", 2.0).unwrap(), 12.0);
}

#[test]
fn newton_converges_to_sqrt_two() {
    let expr = parse_expr("x^2 - 2").unwrap();
    let root = newton_raphson_root(&expr, "x", 1.0, NewtonOptions::default()).unwrap();
    assert!(root.converged);
    assert!((root.value - 2f64.sqrt()).abs() < 1e-10);
    assert!(root.iterations < 10);
}

#[test]
fn newton_stops_on_flat_derivative_and_cap() {
    let flat = newton("x^2 + 1", "x", 0.0).unwrap();
    assert!(!flat.converged);
    assert_eq!(flat.value, 0.0);

    let capped = NewtonOptions {
        max_iterations: 2,
        ..NewtonOptions::default()
    };
    let expr = parse_expr("x^2 - 2").unwrap();
    let root = newton_raphson_root(&expr, "x", 100.0, capped).unwrap();
    assert!(!root.converged);
    assert_eq!(root.iterations, 2);

    assert!(matches!(newton("ln(x)", "x", -1.0), Err(MathError::Domain(_))));
}

#[test]
fn string_prelude() {
    assert_eq!(solve("x^2 - 3*x + 2 = 0", "x").unwrap(), vec!["2", "1"]);
    assert_eq!(solve("x^2 + 1 = 0", "x").unwrap(), vec!["0 + 1i", "0 - 1i"]);
    assert_eq!(diff("x^3", "x").unwrap(), "3*x^2");
    assert_eq!(diff("x^2 + 3*x", "x").unwrap(), "2*x + 3");
    assert_eq!(integral("4*x^3 - 1", "x").unwrap(), "x^4 - x");
    assert!(matches!(integral("exp(x)", "x"), Err(MathError::Unsupported(_))));
    assert_eq!(tex("x^2/2").unwrap(), "\\frac{x^{2}}{2}");
    assert_eq!(simp("x + x + 1").unwrap(), "2*x + 1");
    assert_eq!(roots("4*x^2 = 1", "x").unwrap().exact.len(), 2);
}

#[test]
fn polynomial_antiderivatives() {
    let antiderivative = integrate("x", &parse_expr("3*x^2 + 2*x + 1").unwrap()).unwrap();
    assert_eq!(antiderivative.to_string(), "x^3 + x^2 + x");

    let antiderivative = integrate("x", &parse_expr("x/2 - 4").unwrap()).unwrap();
    assert_eq!(antiderivative.to_string(), "1/4*x^2 - 4*x");

    let antiderivative = integrate("t", &parse_expr("-3*t^2").unwrap()).unwrap();
    assert_eq!(antiderivative.to_string(), "-t^3");

    // Integrating then differentiating gives the integrand back.
    let integrand = parse_expr("(x + 1)^3 - 5*x").unwrap();
    let back = differentiate("x", &integrate("x", &integrand).unwrap());
    for x in [-1.5, 0.0, 2.25] {
        assert_abs_diff_eq!(
            back.eval_at("x", x).unwrap(),
            integrand.eval_at("x", x).unwrap(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn definite_integrals_are_exact() {
    let square = parse_expr("x^2").unwrap();
    assert_eq!(
        integrate_definite("x", &square, &rational(0, 1), &rational(3, 1)),
        Ok(rational(9, 1))
    );
    assert_eq!(
        integrate_definite("x", &square, &rational(0, 1), &rational(1, 2)),
        Ok(rational(1, 24))
    );
    let odd = parse_expr("x^3 - x").unwrap();
    assert_eq!(
        integrate_definite("x", &odd, &rational(-2, 1), &rational(2, 1)),
        Ok(rational(0, 1))
    );
    assert_eq!(
        integrate_definite("x", &square, &rational(3, 1), &rational(0, 1)),
        Ok(rational(-9, 1))
    );
}

#[test]
fn integration_outside_polynomials_is_unsupported() {
    for input in ["sin(x)", "1/x", "x^(1/2)", "x*y"] {
        let expr = parse_expr(input).unwrap();
        assert!(
            matches!(integrate("x", &expr), Err(MathError::Unsupported(_))),
            "{input}"
        );
    }
}

#[test]
fn taylor_coefficients() {
    let exp = taylor_series("x", &parse_expr("exp(x)").unwrap(), 0.0, 5).unwrap();
    for (got, want) in exp.iter().zip([1.0, 1.0, 0.5, 1.0 / 6.0, 1.0 / 24.0]) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
    }

    let sin = taylor_series("x", &parse_expr("sin(x)").unwrap(), 0.0, 6).unwrap();
    for (got, want) in sin.iter().zip([0.0, 1.0, 0.0, -1.0 / 6.0, 0.0, 1.0 / 120.0]) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
    }

    // A cubic about 1 is re-expanded exactly: x^3 = 1 + 3(x-1) + 3(x-1)^2 + (x-1)^3.
    let cubic = taylor_series("x", &parse_expr("x^3").unwrap(), 1.0, 5).unwrap();
    assert_eq!(cubic, vec![1.0, 3.0, 3.0, 1.0, 0.0]);

    assert!(taylor_series("x", &parse_expr("x").unwrap(), 0.0, 0).unwrap().is_empty());
    assert!(matches!(
        taylor_series("x", &parse_expr("ln(x)").unwrap(), 0.0, 3),
        Err(MathError::Domain(_))
    ));
}
