use std::f64::consts::PI;

use num_complex::Complex64;

use crate::error::{Degeneracy, MathError, Result};

/// Relative tolerance under which a discriminant or imaginary part counts as zero.
const ROOT_EPSILON: f64 = 1e-12;

/// Solve `a*x + b = 0`.
///
/// `a == 0` has no unique solution: `Degeneracy::InfiniteSolutions` when `b == 0` as well,
/// `Degeneracy::NoSolution` otherwise.
pub fn solve_linear(a: f64, b: f64) -> Result<f64> {
    if a == 0.0 {
        let kind = if b == 0.0 {
            Degeneracy::InfiniteSolutions
        } else {
            Degeneracy::NoSolution
        };
        return Err(MathError::Division(kind));
    }
    Ok(-b / a)
}

/// Roots of `a*x^2 + b*x + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    /// Two distinct real roots, larger first.
    Real(f64, f64),
    /// Zero discriminant: one root of multiplicity two.
    Repeated(f64),
    /// Conjugate pair, positive imaginary part first.
    Complex(Complex64, Complex64),
}

impl QuadraticRoots {
    /// Both roots as complex numbers in solver order; a repeated root appears twice.
    pub fn to_complex(&self) -> [Complex64; 2] {
        match *self {
            QuadraticRoots::Real(r1, r2) => [Complex64::new(r1, 0.0), Complex64::new(r2, 0.0)],
            QuadraticRoots::Repeated(r) => [Complex64::new(r, 0.0); 2],
            QuadraticRoots::Complex(z1, z2) => [z1, z2],
        }
    }

    pub fn is_real(&self) -> bool {
        !matches!(self, QuadraticRoots::Complex(..))
    }
}

pub fn discriminant(a: f64, b: f64, c: f64) -> f64 {
    b * b - 4.0 * a * c
}

/// Solve `a*x^2 + b*x + c = 0`.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Result<QuadraticRoots> {
    if a == 0.0 {
        return Err(MathError::Division(Degeneracy::ZeroLeadingCoefficient));
    }
    let d = discriminant(a, b, c);
    let two_a = 2.0 * a;

    if d > 0.0 {
        // Compute the larger-magnitude root first to avoid cancellation between -b and sqrt(d).
        let sign = if b >= 0.0 { 1.0 } else { -1.0 };
        let q = -0.5 * (b + sign * d.sqrt());
        let (r1, r2) = (q / a, c / q);
        let (hi, lo) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
        Ok(QuadraticRoots::Real(hi, lo))
    } else if d == 0.0 {
        Ok(QuadraticRoots::Repeated(-b / two_a))
    } else {
        let re = -b / two_a;
        let im = ((-d).sqrt() / two_a).abs();
        Ok(QuadraticRoots::Complex(
            Complex64::new(re, im),
            Complex64::new(re, -im),
        ))
    }
}

/// The three roots of a cubic, sorted descending by real part, then by imaginary part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicRoots {
    pub roots: [Complex64; 3],
}

impl CubicRoots {
    fn sorted(mut roots: [Complex64; 3]) -> Self {
        for z in roots.iter_mut() {
            if z.im.abs() <= ROOT_EPSILON * z.re.abs().max(1.0) {
                z.im = 0.0;
            }
        }
        roots.sort_by(|a, b| b.re.total_cmp(&a.re).then_with(|| b.im.total_cmp(&a.im)));
        CubicRoots { roots }
    }

    /// All three roots as reals, or `None` when a complex pair is present.
    pub fn real(&self) -> Option<[f64; 3]> {
        if self.roots.iter().all(|z| z.im == 0.0) {
            Some([self.roots[0].re, self.roots[1].re, self.roots[2].re])
        } else {
            None
        }
    }

    /// Real roots only, descending.
    pub fn real_roots(&self) -> Vec<f64> {
        self.roots.iter().filter(|z| z.im == 0.0).map(|z| z.re).collect()
    }
}

/// Solve `a*x^3 + b*x^2 + c*x + d = 0` in closed form.
///
/// The cubic is reduced to the depressed form `t^3 + p*t + q = 0` with `x = t - b/(3a)`.
/// A positive discriminant uses Cardano's formula, a negative one the trigonometric
/// form for three real roots, and a vanishing one yields a double or triple root.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Result<CubicRoots> {
    if a == 0.0 {
        return Err(MathError::Division(Degeneracy::ZeroLeadingCoefficient));
    }
    let (b, c, d) = (b / a, c / a, d / a);
    let shift = b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;

    let half_q = q / 2.0;
    let third_p = p / 3.0;
    let disc = half_q * half_q + third_p * third_p * third_p;
    let scale = (half_q * half_q).max(third_p.abs().powi(3)).max(f64::MIN_POSITIVE);

    let roots = if disc.abs() <= ROOT_EPSILON * scale {
        if p.abs() <= ROOT_EPSILON * shift.abs().max(1.0) {
            let t = -shift;
            [Complex64::new(t, 0.0); 3]
        } else {
            let simple = 3.0 * q / p;
            let double = -3.0 * q / (2.0 * p);
            [
                Complex64::new(simple - shift, 0.0),
                Complex64::new(double - shift, 0.0),
                Complex64::new(double - shift, 0.0),
            ]
        }
    } else if disc > 0.0 {
        let sqrt_disc = disc.sqrt();
        let u = (-half_q + sqrt_disc).cbrt();
        let v = (-half_q - sqrt_disc).cbrt();
        let real = u + v - shift;
        let re = -(u + v) / 2.0 - shift;
        let im = (3.0_f64).sqrt() / 2.0 * (u - v);
        [
            Complex64::new(real, 0.0),
            Complex64::new(re, im),
            Complex64::new(re, -im),
        ]
    } else {
        let r = 2.0 * (-third_p).sqrt();
        let cos_arg = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let theta = cos_arg.acos() / 3.0;
        let mut out = [Complex64::new(0.0, 0.0); 3];
        for (k, slot) in out.iter_mut().enumerate() {
            let t = r * (theta - 2.0 * PI * k as f64 / 3.0).cos();
            *slot = Complex64::new(t - shift, 0.0);
        }
        out
    };

    Ok(CubicRoots::sorted(roots))
}
