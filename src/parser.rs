use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric0, char, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::error::{VerboseError, convert_error};
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded};
use num_bigint::BigInt;
use num_traits::Pow;

use crate::error::{MathError, Result};
use crate::expr::{Expr, Rational, zero};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Parse an arithmetic expression such as `3*x^2 - sin(x)/2`.
pub fn parse_expr(input: &str) -> Result<Expr> {
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(MathError::Parse(convert_error(input, e)))
        }
        Err(nom::Err::Incomplete(_)) => Err(MathError::Parse("incomplete input".to_string())),
    }
}

/// Parse `lhs = rhs`. Input without `=` is read as `lhs = 0`.
pub fn parse_equation(input: &str) -> Result<(Expr, Expr)> {
    match input.split_once('=') {
        Some((lhs, rhs)) => Ok((parse_expr(lhs.trim())?, parse_expr(rhs.trim())?)),
        None => Ok((parse_expr(input.trim())?, zero())),
    }
}

fn parse_add_sub(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| {
            if op == '+' {
                Expr::Add(acc.boxed(), rhs.boxed())
            } else {
                Expr::Sub(acc.boxed(), rhs.boxed())
            }
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), parse_unary),
        move || init.clone(),
        |acc, (op, rhs)| {
            if op == '*' {
                Expr::Mul(acc.boxed(), rhs.boxed())
            } else {
                Expr::Div(acc.boxed(), rhs.boxed())
            }
        },
    )(rest)
}

// Unary minus binds looser than powers: `-x^2` is `-(x^2)`.
fn parse_unary(input: &str) -> ParseResult<'_, Expr> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_unary)(input) {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else {
        parse_pow(input)
    }
}

// `^` and `**` are right associative.
fn parse_pow(input: &str) -> ParseResult<'_, Expr> {
    let (rest, base) = parse_primary(input)?;
    if let Ok((next, exp)) = preceded(ws(alt((tag("^"), tag("**")))), parse_unary)(rest) {
        Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
    } else {
        Ok((rest, base))
    }
}

fn parse_primary(input: &str) -> ParseResult<'_, Expr> {
    alt((parse_parens, parse_function, parse_number, parse_identifier))(input)
}

fn parse_parens(input: &str) -> ParseResult<'_, Expr> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_function(input: &str) -> ParseResult<'_, Expr> {
    let (rest, (name, arg)) = pair(
        ws(alt((
            tag("sin"),
            tag("cos"),
            tag("tan"),
            tag("exp"),
            tag("log"),
            tag("ln"),
            tag("sqrt"),
            tag("abs"),
        ))),
        parse_parens,
    )(input)?;

    let expr = match name {
        "sin" => Expr::Sin(arg.boxed()),
        "cos" => Expr::Cos(arg.boxed()),
        "tan" => Expr::Tan(arg.boxed()),
        "exp" => Expr::Exp(arg.boxed()),
        "sqrt" => Expr::Sqrt(arg.boxed()),
        "abs" => Expr::Abs(arg.boxed()),
        _ => Expr::Log(arg.boxed()),
    };

    Ok((rest, expr))
}

fn parse_number(input: &str) -> ParseResult<'_, Expr> {
    map(
        ws(pair(parse_digits, opt(preceded(char('.'), recognize(digit1))))),
        |(whole, fraction): (BigInt, Option<&str>)| match fraction {
            None => Expr::Constant(Rational::from_integer(whole)),
            Some(digits) => {
                let scale = BigInt::from(10).pow(digits.len());
                let frac: BigInt = digits.parse().unwrap_or_else(|_| BigInt::from(0));
                Expr::Constant(Rational::new(whole * &scale + frac, scale))
            }
        },
    )(input)
}

fn parse_digits(input: &str) -> ParseResult<'_, BigInt> {
    map_res(digit1, |s: &str| s.parse::<BigInt>())(input)
}

fn parse_identifier(input: &str) -> ParseResult<'_, Expr> {
    map(ws(recognize(pair(alpha1, alphanumeric0))), |s: &str| {
        Expr::Variable(s.to_string())
    })(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}
