use std::f64::consts::PI;

use num_complex::Complex64;

use crate::algebra::solve_quadratic;
use crate::error::{Degeneracy, MathError, Result};

/// Standard gravity at the Earth's surface, m/s².
pub const STANDARD_GRAVITY: f64 = 9.81;
/// Coulomb constant, N·m²/C².
pub const COULOMB_CONSTANT: f64 = 8.9875517923e9;
/// Vacuum permeability, N/A².
pub const VACUUM_PERMEABILITY: f64 = 4.0 * PI * 1e-7;
/// Molar gas constant, J/(mol·K).
pub const GAS_CONSTANT: f64 = 8.3145;

// Kinematics under constant acceleration.

/// `v = u + a t`
pub fn final_velocity(u: f64, a: f64, t: f64) -> f64 {
    u + a * t
}

/// `s = u t + a t² / 2`
pub fn displacement(u: f64, t: f64, a: f64) -> f64 {
    u * t + 0.5 * a * t * t
}

/// `v² = u² + 2 a s`
pub fn final_velocity_squared(u: f64, a: f64, s: f64) -> f64 {
    u * u + 2.0 * a * s
}

/// Both times at which `s = u t + a t² / 2`, larger first. Complex when the
/// displacement is never reached.
///
/// Zero acceleration has a single solution `s / u`, returned twice.
pub fn time_from_displacement(u: f64, a: f64, s: f64) -> Result<[Complex64; 2]> {
    if a == 0.0 {
        let t = crate::algebra::solve_linear(u, -s)?;
        return Ok([Complex64::new(t, 0.0); 2]);
    }
    Ok(solve_quadratic(0.5 * a, u, -s)?.to_complex())
}

// Dynamics.

pub fn force(mass: f64, acceleration: f64) -> f64 {
    mass * acceleration
}

pub fn weight(mass: f64, g: f64) -> f64 {
    mass * g
}

pub fn momentum(mass: f64, velocity: f64) -> f64 {
    mass * velocity
}

pub fn kinetic_energy(mass: f64, velocity: f64) -> f64 {
    0.5 * mass * velocity * velocity
}

pub fn potential_energy(mass: f64, height: f64, g: f64) -> f64 {
    mass * g * height
}

// Projectile motion without air resistance.

pub fn time_of_flight(speed: f64, angle: f64, g: f64) -> Result<f64> {
    Ok(2.0 * speed * angle.sin() / nonzero_gravity(g)?)
}

pub fn range(speed: f64, angle: f64, g: f64) -> Result<f64> {
    Ok(speed * speed * (2.0 * angle).sin() / nonzero_gravity(g)?)
}

pub fn max_height(speed: f64, angle: f64, g: f64) -> Result<f64> {
    Ok(speed * speed * angle.sin().powi(2) / (2.0 * nonzero_gravity(g)?))
}

fn nonzero_gravity(g: f64) -> Result<f64> {
    if g == 0.0 {
        return Err(MathError::Division(Degeneracy::ZeroDivisor));
    }
    Ok(g)
}

// Waves and optics.

/// `v = f λ`
pub fn wave_speed(frequency: f64, wavelength: f64) -> f64 {
    frequency * wavelength
}

/// Refraction angle from `n1 sin θ1 = n2 sin θ2`.
///
/// Fails with a domain error on total internal reflection.
pub fn snell_law(n1: f64, n2: f64, theta1: f64) -> Result<f64> {
    if n2 == 0.0 {
        return Err(MathError::Division(Degeneracy::ZeroDivisor));
    }
    let sin_theta2 = n1 * theta1.sin() / n2;
    if sin_theta2.abs() > 1.0 {
        return Err(MathError::domain(
            "total internal reflection: no refracted ray",
        ));
    }
    Ok(sin_theta2.asin())
}

// Electromagnetism. Distances must be non-zero.

/// Magnitude of the force between two point charges.
pub fn coulomb_force(q1: f64, q2: f64, r: f64) -> Result<f64> {
    Ok(COULOMB_CONSTANT * (q1 * q2).abs() / nonzero_distance(r)?.powi(2))
}

pub fn electric_field_point_charge(q: f64, r: f64) -> Result<f64> {
    Ok(COULOMB_CONSTANT * q.abs() / nonzero_distance(r)?.powi(2))
}

/// `B = μ0 I / (2π r)`
pub fn magnetic_field_long_wire(current: f64, r: f64) -> Result<f64> {
    Ok(VACUUM_PERMEABILITY * current / (2.0 * PI * nonzero_distance(r)?))
}

/// `F = |q| v B sin θ`
pub fn lorentz_force(q: f64, v: f64, b: f64, theta: f64) -> f64 {
    q.abs() * v * b * theta.sin()
}

fn nonzero_distance(r: f64) -> Result<f64> {
    if r == 0.0 {
        return Err(MathError::Division(Degeneracy::ZeroDivisor));
    }
    Ok(r)
}

// Thermodynamics.

/// `W = P ΔV`
pub fn work_isobaric(pressure: f64, volume_change: f64) -> f64 {
    pressure * volume_change
}

/// `W = n R T ln(V2 / V1)` for an ideal gas.
pub fn work_isothermal(moles: f64, temperature: f64, v1: f64, v2: f64) -> Result<f64> {
    if v1 <= 0.0 || v2 <= 0.0 {
        return Err(MathError::domain("volumes must be positive"));
    }
    Ok(moles * GAS_CONSTANT * temperature * (v2 / v1).ln())
}

/// `ΔU = n Cv ΔT`
pub fn internal_energy_change_ideal(moles: f64, cv: f64, temperature_change: f64) -> f64 {
    moles * cv * temperature_change
}

/// Heat from the first law `ΔU = Q - W`, where `W` is work done by the system.
pub fn heat_added(internal_energy_change: f64, work_by_system: f64) -> f64 {
    internal_energy_change + work_by_system
}
