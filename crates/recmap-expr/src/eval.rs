//! Pure evaluator over a sample row.

use std::cmp::Ordering;

use recmap_model::SampleRow;

use crate::ast::{BinOp, Expr};

/// Runtime value. Row fields always enter as strings; numbers and booleans
/// arise from literals and operator results.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl Value {
    /// Numeric view: numbers directly, strings that parse as f64.
    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(_) => None,
        }
    }

    fn as_text(&self) -> String {
        self.render()
    }

    /// Truthiness for guards: booleans as-is, numbers nonzero, strings
    /// non-empty and neither "0" nor "false".
    pub fn truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0,
            Value::Str(s) => {
                !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false")
            }
        }
    }

    /// String rendering for fixed-width packing. Integral numbers render
    /// without a fractional part.
    pub fn render(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Num(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
        }
    }
}

/// Evaluate an expression tree. Total: missing fields become empty strings,
/// incomparable values compare as strings, so evaluation never fails.
pub fn evaluate(expr: &Expr, row: &SampleRow) -> Value {
    match expr {
        Expr::Str(s) => Value::Str(s.clone()),
        Expr::Num(n) => Value::Num(*n),
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Field(name) => Value::Str(row.get(name).unwrap_or_default().to_string()),
        Expr::Not(inner) => Value::Bool(!evaluate(inner, row).truthy()),
        Expr::Binary { op, lhs, rhs } => match op {
            BinOp::Or => {
                let left = evaluate(lhs, row);
                if left.truthy() {
                    Value::Bool(true)
                } else {
                    Value::Bool(evaluate(rhs, row).truthy())
                }
            }
            BinOp::And => {
                let left = evaluate(lhs, row);
                if !left.truthy() {
                    Value::Bool(false)
                } else {
                    Value::Bool(evaluate(rhs, row).truthy())
                }
            }
            BinOp::Add => add(&evaluate(lhs, row), &evaluate(rhs, row)),
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                let ordering = compare(&evaluate(lhs, row), &evaluate(rhs, row));
                Value::Bool(match (op, ordering) {
                    (BinOp::Eq, Some(Ordering::Equal)) => true,
                    (BinOp::Eq, _) => false,
                    (BinOp::Ne, Some(Ordering::Equal)) => false,
                    (BinOp::Ne, _) => true,
                    (BinOp::Lt, Some(Ordering::Less)) => true,
                    (BinOp::Le, Some(Ordering::Less | Ordering::Equal)) => true,
                    (BinOp::Gt, Some(Ordering::Greater)) => true,
                    (BinOp::Ge, Some(Ordering::Greater | Ordering::Equal)) => true,
                    _ => false,
                })
            }
        },
    }
}

/// Numeric comparison when both sides are numeric, lexicographic otherwise.
/// `None` only for NaN operands, which then satisfy no comparison but `!=`.
fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
        return l.partial_cmp(&r);
    }
    if let (Value::Bool(l), Value::Bool(r)) = (lhs, rhs) {
        return Some(l.cmp(r));
    }
    Some(lhs.as_text().cmp(&rhs.as_text()))
}

fn add(lhs: &Value, rhs: &Value) -> Value {
    if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
        return Value::Num(l + r);
    }
    Value::Str(format!("{}{}", lhs.as_text(), rhs.as_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn eval(src: &str, row: &SampleRow) -> Value {
        evaluate(&parse_expression(src).expect("parse"), row)
    }

    #[test]
    fn short_circuit_keeps_evaluation_total() {
        let row = SampleRow::new().with("flag", "1");
        assert_eq!(eval("flag || missing > 'x'", &row), Value::Bool(true));
        assert_eq!(eval("missing && flag", &row), Value::Bool(false));
    }

    #[test]
    fn lexicographic_fallback_for_mixed_operands() {
        let row = SampleRow::new().with("code", "AB12");
        assert_eq!(eval("code > 'AB11'", &row), Value::Bool(true));
        assert_eq!(eval("code == 'ab12'", &row), Value::Bool(false));
    }

    #[test]
    fn render_formats_integers_plainly() {
        assert_eq!(Value::Num(42.0).render(), "42");
        assert_eq!(Value::Num(-3.25).render(), "-3.25");
        assert_eq!(Value::Bool(true).render(), "true");
    }
}
