use priyam::format::linear_summary;
use priyam::prelude::solve;
use priyam::{Rational, rational, solve_linear_system};

fn main() {
    let equation = "x^3 - 6*x^2 + 11*x - 6 = 0";
    match solve(equation, "x") {
        Ok(lines) => {
            println!("{equation}");
            for line in lines {
                println!("  {line}");
            }
        }
        Err(err) => eprintln!("cannot solve {equation}: {err}"),
    }

    let a: Vec<Vec<Rational>> = vec![
        vec![rational(2, 1), rational(3, 1)],
        vec![rational(1, 1), rational(-4, 1)],
    ];
    let b = vec![rational(7, 1), rational(1, 1)];
    match solve_linear_system(&a, &b) {
        Ok(result) => {
            for line in linear_summary(&result, &["x", "y"]) {
                println!("{line}");
            }
        }
        Err(err) => eprintln!("linear system error: {err}"),
    }
}
