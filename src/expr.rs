use std::collections::HashMap;
use std::fmt;
use std::ops;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{MathError, Result};

/// Exact rational used for every literal in an expression.
pub type Rational = BigRational;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Expr {
    Variable(String),
    /// Exact literal; decimals such as `0.25` are stored as `1/4`.
    Constant(Rational),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Exp(Box<Expr>),
    /// Natural logarithm.
    Log(Box<Expr>),
    Sqrt(Box<Expr>),
    Abs(Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    /// The literal `num/den`. Panics when `den` is zero, like [`Rational::new`].
    pub fn constant(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::new(num.into(), den.into()))
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::from_integer(value.into()))
    }

    pub fn pow(self, exp: Expr) -> Self {
        Expr::Pow(self.boxed(), exp.boxed())
    }

    pub fn is_zero(&self) -> bool {
        self.as_constant().is_some_and(Zero::is_zero)
    }

    pub fn is_one(&self) -> bool {
        self.as_constant().is_some_and(One::is_one)
    }

    pub fn as_constant(&self) -> Option<&Rational> {
        match self {
            Expr::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Direct subexpressions, left to right.
    pub fn operands(&self) -> impl Iterator<Item = &Expr> {
        let (first, second): (Option<&Expr>, Option<&Expr>) = match self {
            Expr::Variable(_) | Expr::Constant(_) => (None, None),
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => (Some(&**a), Some(&**b)),
            Expr::Neg(a)
            | Expr::Sin(a)
            | Expr::Cos(a)
            | Expr::Tan(a)
            | Expr::Exp(a)
            | Expr::Log(a)
            | Expr::Sqrt(a)
            | Expr::Abs(a) => (Some(&**a), None),
        };
        first.into_iter().chain(second)
    }

    pub fn contains_var(&self, var: &str) -> bool {
        match self {
            Expr::Variable(v) => v == var,
            other => other.operands().any(|e| e.contains_var(var)),
        }
    }

    /// Evaluate numerically with every variable looked up in `env`.
    ///
    /// Only unbound variables are errors; `ln(-1)` or `1/0` follow IEEE semantics.
    pub fn eval(&self, env: &HashMap<String, f64>) -> Result<f64> {
        let unary = |a: &Expr, f: fn(f64) -> f64| a.eval(env).map(f);
        match self {
            Expr::Variable(name) => env
                .get(name)
                .copied()
                .ok_or_else(|| MathError::domain(format!("unbound variable `{name}`"))),
            Expr::Constant(c) => Ok(rational_to_f64(c)),
            Expr::Add(a, b) => Ok(a.eval(env)? + b.eval(env)?),
            Expr::Sub(a, b) => Ok(a.eval(env)? - b.eval(env)?),
            Expr::Mul(a, b) => Ok(a.eval(env)? * b.eval(env)?),
            Expr::Div(a, b) => Ok(a.eval(env)? / b.eval(env)?),
            Expr::Pow(base, exp) => {
                let b = base.eval(env)?;
                let small_int = exp
                    .as_constant()
                    .filter(|c| c.is_integer())
                    .and_then(|c| c.to_integer().to_i32());
                match small_int {
                    Some(n) => Ok(b.powi(n)),
                    None => Ok(b.powf(exp.eval(env)?)),
                }
            }
            Expr::Neg(a) => unary(a, |x| -x),
            Expr::Sin(a) => unary(a, f64::sin),
            Expr::Cos(a) => unary(a, f64::cos),
            Expr::Tan(a) => unary(a, f64::tan),
            Expr::Exp(a) => unary(a, f64::exp),
            Expr::Log(a) => unary(a, f64::ln),
            Expr::Sqrt(a) => unary(a, f64::sqrt),
            Expr::Abs(a) => unary(a, f64::abs),
        }
    }

    /// Evaluate an expression in a single variable.
    pub fn eval_at(&self, var: &str, x: f64) -> Result<f64> {
        self.eval(&HashMap::from([(var.to_string(), x)]))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::pretty(self))
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $variant:ident) => {
        impl ops::$trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::$variant(self.boxed(), rhs.boxed())
            }
        }
    };
}

binary_op!(Add, add, Add);
binary_op!(Sub, sub, Sub);
binary_op!(Mul, mul, Mul);
binary_op!(Div, div, Div);

impl ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(self.boxed())
    }
}

impl From<Rational> for Expr {
    fn from(value: Rational) -> Self {
        Expr::Constant(value)
    }
}

pub(crate) fn rational_to_f64(r: &Rational) -> f64 {
    r.to_f64().unwrap_or(f64::NAN)
}

pub fn zero() -> Expr {
    Expr::Constant(Rational::zero())
}

pub fn one() -> Expr {
    Expr::Constant(Rational::one())
}

/// `num/den` as a [`Rational`]; `den` must be non-zero.
pub fn rational(num: i64, den: i64) -> Rational {
    Rational::new(num.into(), den.into())
}
