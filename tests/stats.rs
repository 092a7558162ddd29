use approx::{assert_abs_diff_eq, assert_relative_eq};
use num_bigint::BigUint;
use priyam::MathError;
use priyam::stats::{
    VarianceKind, binomial_probability, combinations, kahan_sum, linear_regression, mean, median,
    mode, permutations, standard_deviation, variance,
};

const FIVE: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

#[test]
fn central_tendency() {
    assert_eq!(mean(&FIVE), Ok(3.0));
    assert_eq!(median(&FIVE), Ok(3.0));
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Ok(2.5));
    assert_eq!(median(&[7.0]), Ok(7.0));
}

#[test]
fn mode_keeps_first_appearance_order() {
    assert_eq!(mode(&[1.0, 1.0, 2.0, 2.0, 3.0]), Ok(vec![1.0, 2.0]));
    assert_eq!(mode(&[3.0, 2.0, 2.0, 3.0, 1.0]), Ok(vec![3.0, 2.0]));
    assert_eq!(mode(&[5.0, 4.0, 4.0]), Ok(vec![4.0]));
}

#[test]
fn variance_sample_and_population() {
    assert_abs_diff_eq!(variance(&FIVE, VarianceKind::Sample).unwrap(), 2.5, epsilon = 1e-12);
    assert_abs_diff_eq!(variance(&FIVE, VarianceKind::Population).unwrap(), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        standard_deviation(&FIVE, VarianceKind::Sample).unwrap(),
        1.5811388300841898,
        epsilon = 1e-12
    );
    assert_eq!(VarianceKind::default(), VarianceKind::Sample);
}

#[test]
fn variance_of_single_value_is_zero() {
    assert_eq!(variance(&[42.0], VarianceKind::Sample), Ok(0.0));
    assert_eq!(variance(&[42.0], VarianceKind::Population), Ok(0.0));
}

#[test]
fn variance_survives_large_offset() {
    let shifted: Vec<f64> = FIVE.iter().map(|x| x + 1e9).collect();
    assert_relative_eq!(
        variance(&shifted, VarianceKind::Sample).unwrap(),
        2.5,
        max_relative = 1e-6
    );
}

#[test]
fn empty_input_is_rejected() {
    assert_eq!(mean(&[]), Err(MathError::EmptyInput));
    assert_eq!(median(&[]), Err(MathError::EmptyInput));
    assert_eq!(mode(&[]), Err(MathError::EmptyInput));
    assert_eq!(variance(&[], VarianceKind::Sample), Err(MathError::EmptyInput));
    assert_eq!(standard_deviation(&[], VarianceKind::Population), Err(MathError::EmptyInput));
    assert_eq!(linear_regression(&[], &[]), Err(MathError::EmptyInput));
}

#[test]
fn regression_line() {
    let (slope, intercept) = linear_regression(&FIVE, &[2.0, 4.0, 5.0, 4.0, 5.0]).unwrap();
    assert_abs_diff_eq!(slope, 0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(intercept, 2.2, epsilon = 1e-12);

    let (slope, intercept) = linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 6.0]).unwrap();
    assert_eq!(slope, 0.0);
    assert_abs_diff_eq!(intercept, 3.0, epsilon = 1e-12);

    assert_eq!(
        linear_regression(&[1.0, 2.0], &[1.0]),
        Err(MathError::Shape {
            expected: "2 y values to match x".into(),
            found: "1 y values".into(),
        })
    );
}

#[test]
fn counting() {
    assert_eq!(permutations(5, 2), BigUint::from(20u32));
    assert_eq!(combinations(5, 2), BigUint::from(10u32));
    assert_eq!(combinations(52, 5), BigUint::from(2_598_960u32));
    assert_eq!(combinations(3, 4), BigUint::from(0u32));
    assert_eq!(permutations(3, 4), BigUint::from(0u32));
    assert_eq!(permutations(4, 0), BigUint::from(1u32));
}

#[test]
fn counting_near_the_top_of_u64() {
    assert_eq!(permutations(u64::MAX, 0), BigUint::from(1u32));
    assert_eq!(permutations(u64::MAX, 1), BigUint::from(u64::MAX));
    assert_eq!(
        permutations(u64::MAX, 2),
        BigUint::from(u64::MAX) * BigUint::from(u64::MAX - 1)
    );
    assert_eq!(combinations(u64::MAX, 1), BigUint::from(u64::MAX));
}

#[test]
fn binomial() {
    assert_abs_diff_eq!(binomial_probability(5, 2, 0.5).unwrap(), 0.3125, epsilon = 1e-12);
    assert_abs_diff_eq!(binomial_probability(10, 3, 0.2).unwrap(), 0.201326592, epsilon = 1e-12);
    assert_eq!(binomial_probability(3, 5, 0.5), Ok(0.0));
    assert_eq!(binomial_probability(4, 4, 1.0), Ok(1.0));
    assert_eq!(binomial_probability(4, 3, 1.0), Ok(0.0));
    assert_eq!(binomial_probability(4, 0, 0.0), Ok(1.0));
    assert!(matches!(binomial_probability(3, 1, 1.5), Err(MathError::Domain(_))));
    assert!(matches!(binomial_probability(3, 1, -0.1), Err(MathError::Domain(_))));
}

#[test]
fn binomial_with_many_trials_stays_finite() {
    // C(2000, 1000) / 2^2000 is about 1 / sqrt(1000 * pi) * (1 - 1/8000).
    let central = binomial_probability(2000, 1000, 0.5).unwrap();
    assert_relative_eq!(central, 0.017838, max_relative = 1e-4);

    let tail = binomial_probability(5000, 4990, 0.5).unwrap();
    assert!(tail.is_finite() && tail >= 0.0 && tail < 1e-300);

    let total: f64 = (0..=1500).map(|k| binomial_probability(1500, k, 0.3).unwrap()).sum();
    assert_relative_eq!(total, 1.0, max_relative = 1e-9);
}

#[test]
fn compensated_sum() {
    let values = [1.0, 1e100, 1.0, -1e100];
    assert_eq!(kahan_sum(&values), 2.0);
}
