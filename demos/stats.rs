use priyam::VarianceKind;
use priyam::stats::{linear_regression, mean, median, mode, standard_deviation};

fn main() {
    let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    let report = || -> priyam::Result<()> {
        println!("mean     = {}", mean(&data)?);
        println!("median   = {}", median(&data)?);
        println!("mode     = {:?}", mode(&data)?);
        println!(
            "std dev  = {} (population)",
            standard_deviation(&data, VarianceKind::Population)?
        );

        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [3.0, 5.0, 7.0, 9.0];
        let (slope, intercept) = linear_regression(&x, &y)?;
        println!("fit      = {slope}*x + {intercept}");
        Ok(())
    };

    if let Err(err) = report() {
        eprintln!("statistics error: {err}");
    }
}
