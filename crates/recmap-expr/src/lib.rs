//! Expression DSL for field rules.
//!
//! Powers two surfaces of the mapping core: the `expression` transformation
//! type (value expressions) and the `if` guards of conditional branches
//! (boolean expressions). Evaluation is pure and side-effect-free; any
//! parse or lookup gap degrades rather than raising, so callers map an
//! [`ExprError`] to the field's configured default.
//!
//! Grammar, lowest to highest precedence:
//!
//! ```text
//! expr    := or
//! or      := and ( "||" and )*
//! and     := cmp ( "&&" cmp )*
//! cmp     := add ( ( "==" | "!=" | "<=" | ">=" | "<" | ">" ) add )?
//! add     := unary ( "+" unary )*
//! unary   := "!" unary | primary
//! primary := "(" expr ")" | string | number | true | false | field
//! ```
//!
//! Field references are bare identifiers resolved against the input row;
//! a missing field evaluates to the empty string. Comparisons are numeric
//! when both operands parse as numbers, lexicographic otherwise. `+` is
//! addition for two numbers and concatenation otherwise.

mod ast;
mod eval;
mod parser;

pub use ast::{BinOp, Expr};
pub use eval::Value;

use recmap_model::SampleRow;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("empty expression")]
    Empty,
    #[error("parse error: {0}")]
    Parse(String),
}

/// Parse an expression into its AST.
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    if input.trim().is_empty() {
        return Err(ExprError::Empty);
    }
    parser::parse_expression(input)
}

/// Evaluate a boolean expression (condition guard) against a row.
pub fn eval_bool(input: &str, row: &SampleRow) -> Result<bool, ExprError> {
    let expr = parse(input)?;
    Ok(eval::evaluate(&expr, row).truthy())
}

/// Evaluate a value expression against a row, rendering the result as a
/// string suitable for fixed-width packing.
pub fn eval_value(input: &str, row: &SampleRow) -> Result<String, ExprError> {
    let expr = parse(input)?;
    Ok(eval::evaluate(&expr, row).render())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> SampleRow {
        SampleRow::new()
            .with("status", "A")
            .with("balance", "1250.50")
            .with("branch", "042")
            .with("closed", "false")
    }

    #[test]
    fn equality_on_strings() {
        assert_eq!(eval_bool("status == 'A'", &row()), Ok(true));
        assert_eq!(eval_bool("status == 'C'", &row()), Ok(false));
        assert_eq!(eval_bool("status != 'C'", &row()), Ok(true));
    }

    #[test]
    fn numeric_comparison_when_both_sides_numeric() {
        assert_eq!(eval_bool("balance > 1000", &row()), Ok(true));
        assert_eq!(eval_bool("balance <= 1250.5", &row()), Ok(true));
        // "042" and "42" are numerically equal even though lexically distinct.
        assert_eq!(eval_bool("branch == 42", &row()), Ok(true));
    }

    #[test]
    fn boolean_connectives_and_negation() {
        assert_eq!(
            eval_bool("status == 'A' && balance > 1000", &row()),
            Ok(true)
        );
        assert_eq!(
            eval_bool("status == 'C' || balance > 9999", &row()),
            Ok(false)
        );
        assert_eq!(eval_bool("!closed", &row()), Ok(true));
        assert_eq!(eval_bool("!(status == 'A')", &row()), Ok(false));
    }

    #[test]
    fn missing_field_is_empty_string() {
        assert_eq!(eval_bool("missing == ''", &row()), Ok(true));
        assert_eq!(eval_bool("missing", &row()), Ok(false));
        assert_eq!(eval_value("missing", &row()), Ok(String::new()));
    }

    #[test]
    fn plus_adds_numbers_and_concatenates_strings() {
        assert_eq!(eval_value("branch + 1", &row()), Ok("43".to_string()));
        assert_eq!(
            eval_value("status + '-' + branch", &row()),
            Ok("A-042".to_string())
        );
    }

    #[test]
    fn quoted_strings_accept_both_quote_styles() {
        assert_eq!(eval_value("\"A\" + 'B'", &row()), Ok("AB".to_string()));
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        assert!(matches!(eval_bool("status ==", &row()), Err(ExprError::Parse(_))));
        assert!(matches!(eval_bool("(status", &row()), Err(ExprError::Parse(_))));
        assert_eq!(eval_bool("  ", &row()), Err(ExprError::Empty));
    }

    #[test]
    fn numeric_rendering_drops_integral_fraction() {
        assert_eq!(eval_value("1 + 2", &row()), Ok("3".to_string()));
        assert_eq!(eval_value("1.5 + 1", &row()), Ok("2.5".to_string()));
    }
}
