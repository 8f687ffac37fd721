//! nom combinator parser for the expression DSL.

use nom::{
    Finish, IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0, none_of},
    combinator::{all_consuming, map, opt, recognize, value},
    error::Error,
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
};

use crate::ast::{BinOp, Expr};
use crate::ExprError;

type PResult<'a, T> = IResult<&'a str, T, Error<&'a str>>;

/// Parse a complete expression; trailing input is a parse error.
pub fn parse_expression(input: &str) -> Result<Expr, ExprError> {
    match all_consuming(delimited(multispace0, or_expr, multispace0))(input).finish() {
        Ok((_, expr)) => Ok(expr),
        Err(error) => Err(ExprError::Parse(format!(
            "unexpected input at '{}'",
            error.input
        ))),
    }
}

fn or_expr(input: &str) -> PResult<'_, Expr> {
    let (input, first) = and_expr(input)?;
    let (input, rest) = many0(preceded(spaced(tag("||")), and_expr))(input)?;
    Ok((input, fold_binary(BinOp::Or, first, rest)))
}

fn and_expr(input: &str) -> PResult<'_, Expr> {
    let (input, first) = cmp_expr(input)?;
    let (input, rest) = many0(preceded(spaced(tag("&&")), cmp_expr))(input)?;
    Ok((input, fold_binary(BinOp::And, first, rest)))
}

fn cmp_expr(input: &str) -> PResult<'_, Expr> {
    let (input, lhs) = add_expr(input)?;
    let (input, tail) = opt(pair(spaced(comparison_op), add_expr))(input)?;
    Ok((input, match tail {
        Some((op, rhs)) => Expr::binary(op, lhs, rhs),
        None => lhs,
    }))
}

fn comparison_op(input: &str) -> PResult<'_, BinOp> {
    // Two-character operators first so "<=" is not read as "<" then "=".
    alt((
        value(BinOp::Eq, tag("==")),
        value(BinOp::Ne, tag("!=")),
        value(BinOp::Le, tag("<=")),
        value(BinOp::Ge, tag(">=")),
        value(BinOp::Lt, tag("<")),
        value(BinOp::Gt, tag(">")),
    ))(input)
}

fn add_expr(input: &str) -> PResult<'_, Expr> {
    let (input, first) = unary_expr(input)?;
    let (input, rest) = many0(preceded(spaced(tag("+")), unary_expr))(input)?;
    Ok((input, fold_binary(BinOp::Add, first, rest)))
}

fn unary_expr(input: &str) -> PResult<'_, Expr> {
    alt((
        map(preceded(spaced(char('!')), unary_expr), |inner| {
            Expr::Not(Box::new(inner))
        }),
        primary,
    ))(input)
}

fn primary(input: &str) -> PResult<'_, Expr> {
    preceded(
        multispace0,
        alt((
            delimited(char('('), delimited(multispace0, or_expr, multispace0), char(')')),
            map(string_literal, Expr::Str),
            number_literal,
            identifier_or_keyword,
        )),
    )(input)
}

fn string_literal(input: &str) -> PResult<'_, String> {
    alt((double_quoted, single_quoted))(input)
}

fn double_quoted(input: &str) -> PResult<'_, String> {
    delimited(
        char('"'),
        map(
            many0(alt((
                value('\n', tag("\\n")),
                value('\t', tag("\\t")),
                value('\\', tag("\\\\")),
                value('"', tag("\\\"")),
                value('\'', tag("\\'")),
                none_of("\"\\"),
            ))),
            |chars| chars.into_iter().collect(),
        ),
        char('"'),
    )(input)
}

fn single_quoted(input: &str) -> PResult<'_, String> {
    delimited(
        char('\''),
        map(
            many0(alt((
                value('\n', tag("\\n")),
                value('\t', tag("\\t")),
                value('\\', tag("\\\\")),
                value('"', tag("\\\"")),
                value('\'', tag("\\'")),
                none_of("'\\"),
            ))),
            |chars| chars.into_iter().collect(),
        ),
        char('\''),
    )(input)
}

fn number_literal(input: &str) -> PResult<'_, Expr> {
    let (input, text) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
    )))(input)?;
    match text.parse::<f64>() {
        Ok(number) => Ok((input, Expr::Num(number))),
        Err(_) => Err(nom::Err::Error(Error::new(
            input,
            nom::error::ErrorKind::Float,
        ))),
    }
}

fn identifier_or_keyword(input: &str) -> PResult<'_, Expr> {
    let (input, name) = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_"), tag(".")))),
    ))(input)?;
    let expr = match name {
        "true" => Expr::Bool(true),
        "false" => Expr::Bool(false),
        _ => Expr::Field(name.to_string()),
    };
    Ok((input, expr))
}

/// Allow whitespace around an operator token.
fn spaced<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn fold_binary(op: BinOp, first: Expr, rest: Vec<Expr>) -> Expr {
    rest.into_iter()
        .fold(first, |lhs, rhs| Expr::binary(op, lhs, rhs))
}
