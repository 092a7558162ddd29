use std::collections::BTreeMap;

use nom::IResult;
use nom::branch::alt;
use nom::character::complete::{char, digit1, satisfy};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::error::{VerboseError, convert_error};
use nom::multi::many1;
use nom::sequence::{delimited, pair};

use crate::error::{MathError, Result};
use crate::physics::GAS_CONSTANT;

/// Standard atomic weights, g/mol.
pub const PERIODIC_TABLE: &[(&str, f64)] = &[
    ("H", 1.008),
    ("He", 4.0026),
    ("Li", 6.94),
    ("Be", 9.0122),
    ("B", 10.81),
    ("C", 12.011),
    ("N", 14.007),
    ("O", 15.999),
    ("F", 18.998),
    ("Ne", 20.180),
    ("Na", 22.990),
    ("Mg", 24.305),
    ("Al", 26.982),
    ("Si", 28.085),
    ("P", 30.974),
    ("S", 32.06),
    ("Cl", 35.45),
    ("K", 39.098),
    ("Ca", 40.078),
    ("Fe", 55.845),
    ("Cu", 63.546),
    ("Zn", 65.38),
    ("Br", 79.904),
    ("Ag", 107.8682),
    ("I", 126.90447),
    ("Ba", 137.327),
    ("Au", 196.96657),
    ("Hg", 200.59),
    ("Pb", 207.2),
];

/// Ion product of water at 25 °C.
pub const WATER_ION_PRODUCT: f64 = 1.0e-14;

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    PERIODIC_TABLE
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|&(_, mass)| mass)
}

#[derive(Debug, Clone, PartialEq)]
enum Term {
    Element(String, u64),
    Group(Vec<Term>, u64),
}

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

fn parse_formula(formula: &str) -> Result<Vec<Term>> {
    let input = formula.trim();
    match all_consuming(parse_group)(input) {
        Ok((_, terms)) => Ok(terms),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(MathError::Parse(convert_error(input, e)))
        }
        Err(nom::Err::Incomplete(_)) => Err(MathError::Parse("incomplete formula".to_string())),
    }
}

fn parse_group(input: &str) -> ParseResult<'_, Vec<Term>> {
    many1(parse_term)(input)
}

fn parse_term(input: &str) -> ParseResult<'_, Term> {
    alt((
        map(pair(parse_symbol, parse_count), |(symbol, n)| {
            Term::Element(symbol.to_string(), n)
        }),
        map(
            pair(delimited(char('('), parse_group, char(')')), parse_count),
            |(terms, n)| Term::Group(terms, n),
        ),
    ))(input)
}

fn parse_symbol(input: &str) -> ParseResult<'_, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_uppercase()),
        opt(satisfy(|c| c.is_ascii_lowercase())),
    ))(input)
}

fn parse_count(input: &str) -> ParseResult<'_, u64> {
    map(opt(map_res(digit1, str::parse::<u64>)), |n| n.unwrap_or(1))(input)
}

fn accumulate(terms: &[Term], multiplier: u64, counts: &mut BTreeMap<String, u64>) -> Result<()> {
    let overflow = || MathError::domain("atom count overflows u64");
    for term in terms {
        match term {
            Term::Element(symbol, n) => {
                let count = counts.entry(symbol.clone()).or_insert(0);
                *count = n
                    .checked_mul(multiplier)
                    .and_then(|atoms| count.checked_add(atoms))
                    .ok_or_else(overflow)?;
            }
            Term::Group(inner, n) => {
                accumulate(inner, n.checked_mul(multiplier).ok_or_else(overflow)?, counts)?;
            }
        }
    }
    Ok(())
}

/// Atom counts per element symbol, e.g. `Ca(OH)2` gives `{Ca: 1, H: 2, O: 2}`.
///
/// Element symbols are checked against [`PERIODIC_TABLE`].
pub fn composition(formula: &str) -> Result<BTreeMap<String, u64>> {
    let terms = parse_formula(formula)?;
    let mut counts = BTreeMap::new();
    accumulate(&terms, 1, &mut counts)?;
    if let Some(unknown) = counts.keys().find(|s| atomic_mass(s).is_none()) {
        return Err(MathError::Parse(format!("unknown element `{unknown}`")));
    }
    Ok(counts)
}

/// Molar mass in g/mol of a formula such as `H2O`, `C6H12O6` or `Ca(OH)2`.
pub fn molar_mass(formula: &str) -> Result<f64> {
    Ok(composition(formula)?
        .iter()
        .map(|(symbol, &n)| atomic_mass(symbol).unwrap_or(0.0) * n as f64)
        .sum())
}

/// `n = m / M`
pub fn grams_to_moles(mass_g: f64, formula: &str) -> Result<f64> {
    Ok(mass_g / molar_mass(formula)?)
}

/// `m = n M`
pub fn moles_to_grams(moles: f64, formula: &str) -> Result<f64> {
    Ok(moles * molar_mass(formula)?)
}

/// Volume in m³ from `PV = nRT`, with temperature in kelvin and pressure in pascal.
pub fn ideal_gas_volume(moles: f64, temperature_k: f64, pressure_pa: f64) -> Result<f64> {
    if pressure_pa <= 0.0 {
        return Err(MathError::domain("pressure must be positive"));
    }
    Ok(moles * GAS_CONSTANT * temperature_k / pressure_pa)
}

/// Buffer pH: `pKa + log10([base] / [acid])`.
pub fn henderson_hasselbalch(pka: f64, base_conc: f64, acid_conc: f64) -> Result<f64> {
    positive(base_conc, "base concentration")?;
    positive(acid_conc, "acid concentration")?;
    Ok(pka + (base_conc / acid_conc).log10())
}

/// pH of a fully dissociated monoprotic acid.
pub fn ph_strong_acid(concentration: f64) -> Result<f64> {
    positive(concentration, "concentration")?;
    Ok(-concentration.log10())
}

/// pH of a fully dissociated monoprotic base at 25 °C.
pub fn ph_strong_base(concentration: f64) -> Result<f64> {
    positive(concentration, "concentration")?;
    Ok(-(WATER_ION_PRODUCT / concentration).log10())
}

/// Approximate pH of a weak monoprotic acid, `[H+] ≈ sqrt(Ka C)`.
pub fn weak_acid_ph(concentration: f64, ka: f64) -> Result<f64> {
    positive(concentration, "concentration")?;
    positive(ka, "Ka")?;
    Ok(-(ka * concentration).sqrt().log10())
}

const BISECTION_STEPS: usize = 2000;

/// Equilibrium concentrations for `a A + b B ⇌ c C + d D`, ordered `[A, B, C, D]`.
///
/// Solves `ln Q(ξ) = ln K` for the extent of reaction `ξ` by bisection. `ln Q` is
/// increasing in `ξ` over the interval where every participating concentration is
/// positive, so the root is unique. A zero coefficient leaves that species out of
/// the quotient and its concentration unchanged.
pub fn equilibrium_concentrations(k: f64, coefficients: [u32; 4], initial: [f64; 4]) -> Result<[f64; 4]> {
    positive(k, "equilibrium constant")?;
    if let Some(c) = initial.iter().find(|c| !(c.is_finite() && **c >= 0.0)) {
        return Err(MathError::domain(format!(
            "initial concentrations must be finite and non-negative, got {c}"
        )));
    }
    if coefficients.iter().all(|&n| n == 0) {
        return Err(MathError::domain("reaction has no participating species"));
    }

    // Reactants are consumed, products formed.
    let nu = [
        -f64::from(coefficients[0]),
        -f64::from(coefficients[1]),
        f64::from(coefficients[2]),
        f64::from(coefficients[3]),
    ];
    let at = |xi: f64| std::array::from_fn::<f64, 4, _>(|i| initial[i] + nu[i] * xi);
    let residual = |xi: f64| {
        let conc = at(xi);
        (0..4)
            .filter(|&i| coefficients[i] > 0)
            .map(|i| nu[i] * conc[i].ln())
            .sum::<f64>()
            - k.ln()
    };

    let (mut lo, mut hi) = (f64::NEG_INFINITY, f64::INFINITY);
    for i in (0..4).filter(|&i| coefficients[i] > 0) {
        let limit = -initial[i] / nu[i];
        if nu[i] < 0.0 {
            hi = hi.min(limit);
        } else {
            lo = lo.max(limit);
        }
    }
    if !(lo < hi) {
        return Err(MathError::domain(
            "no extent of reaction keeps every concentration positive",
        ));
    }

    // Only one side can be unbounded; walk outwards until the residual changes sign.
    if lo.is_infinite() {
        lo = expand_bracket(hi, -1.0, |xi| residual(xi) < 0.0)?;
    } else if hi.is_infinite() {
        hi = expand_bracket(lo, 1.0, |xi| residual(xi) > 0.0)?;
    }

    for _ in 0..BISECTION_STEPS {
        let mid = lo + (hi - lo) / 2.0;
        if mid <= lo || mid >= hi {
            break;
        }
        if residual(mid) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(at(lo + (hi - lo) / 2.0))
}

fn expand_bracket(from: f64, direction: f64, past_root: impl Fn(f64) -> bool) -> Result<f64> {
    let mut step = from.abs().max(1.0);
    for _ in 0..BISECTION_STEPS {
        let candidate = from + direction * step;
        if !candidate.is_finite() {
            break;
        }
        if past_root(candidate) {
            return Ok(candidate);
        }
        step *= 2.0;
    }
    Err(MathError::domain("equilibrium extent could not be bracketed"))
}

fn positive(value: f64, what: &str) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(MathError::domain(format!("{what} must be positive, got {value}")))
    }
}
