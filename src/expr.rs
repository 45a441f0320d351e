//! The formula expression language: lexer, recursive-descent parser, and
//! tree evaluator.
//!
//! Formulas are small arithmetic/bitwise/trigonometric expressions over the
//! bindings `i` (column), `j` (row), `x` (intermediate value), and `t`
//! (animation time). Formulas are plain text supplied by users, so the
//! grammar is closed: four bindings, five functions, and nothing that can
//! reach ambient state. A formula that fails to parse evaluates to 0 and is
//! reported through `tracing`, never as a panic or a fatal error.

mod ast;
mod error;
mod eval;
mod lexer;
mod parser;

use crate::error::{RasterformError, RasterformResult};

/// The numeric values bound to `i`, `j`, `x`, `t` during one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    pub i: i64,
    pub j: i64,
    pub x: i64,
    pub t: i64,
}

/// A formula compiled once and evaluated many times.
///
/// Holds the original source plus the parsed expression tree; an empty
/// source or a parse failure leaves the tree absent, in which case every
/// evaluation yields 0.
#[derive(Clone, Debug)]
pub struct Formula {
    src: String,
    expr: Option<ast::Expr>,
}

impl Formula {
    /// Strict compilation: a malformed formula is an error. Empty or
    /// whitespace-only source is legal and compiles to the constant 0.
    pub fn parse(src: &str) -> RasterformResult<Self> {
        let trimmed = src.trim();
        if trimmed.is_empty() {
            return Ok(Self {
                src: src.to_owned(),
                expr: None,
            });
        }
        match parser::parse(trimmed) {
            Ok(expr) => Ok(Self {
                src: src.to_owned(),
                expr: Some(expr),
            }),
            Err(err) => Err(RasterformError::formula(format!("{trimmed:?}: {err}"))),
        }
    }

    /// Lenient compilation: a malformed formula degrades to the constant 0,
    /// reported once as a warning instead of propagating.
    pub fn lenient(src: &str) -> Self {
        match Self::parse(src) {
            Ok(f) => f,
            Err(err) => {
                tracing::warn!(formula = src, %err, "formula rejected; it will evaluate to 0");
                Self {
                    src: src.to_owned(),
                    expr: None,
                }
            }
        }
    }

    /// The source text as supplied.
    pub fn source(&self) -> &str {
        &self.src
    }

    /// True when evaluation can only ever produce 0 (empty source or a
    /// lenient-compiled parse failure).
    pub fn is_trivial(&self) -> bool {
        self.expr.is_none()
    }

    /// Evaluates against the given bindings. Finite results are floored;
    /// NaN and infinities coerce to 0. Never fails.
    pub fn eval(&self, bindings: Bindings) -> i64 {
        match &self.expr {
            None => 0,
            Some(expr) => floor_or_zero(eval::eval(expr, bindings)),
        }
    }
}

/// One-shot evaluation of a formula against the four bindings.
///
/// Empty and whitespace-only formulas return 0 without parsing; malformed
/// formulas log a warning and return 0. This call never fails and never
/// panics, so one bad formula costs exactly one value, not a render pass.
pub fn evaluate(formula: &str, i: i64, j: i64, x: i64, t: i64) -> i64 {
    Formula::lenient(formula).eval(Bindings { i, j, x, t })
}

fn floor_or_zero(v: f64) -> i64 {
    if v.is_finite() { v.floor() as i64 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_formulas_are_zero() {
        for src in ["", "   ", "\t\n"] {
            assert_eq!(evaluate(src, 9, 9, 9, 9), 0);
            assert!(Formula::parse(src).unwrap().is_trivial());
        }
    }

    #[test]
    fn constant_formulas_ignore_bindings() {
        assert_eq!(evaluate("2+2", 0, 0, 0, 0), 4);
        assert_eq!(evaluate("2+2", 7, -3, 100, 42), 4);
    }

    #[test]
    fn unknown_identifier_falls_back_to_zero() {
        // `ix` only contains reserved letters as substrings; it must be
        // rejected whole, not silently rewritten.
        assert_eq!(evaluate("i + ix", 3, 0, 0, 0), 0);
        assert!(Formula::parse("i + ix").is_err());
    }

    #[test]
    fn results_are_floored_and_nonfinite_coerces_to_zero() {
        assert_eq!(evaluate("7 / 2", 0, 0, 0, 0), 3);
        assert_eq!(evaluate("-7 / 2", 0, 0, 0, 0), -4);
        assert_eq!(evaluate("1 / 0", 0, 0, 0, 0), 0);
        assert_eq!(evaluate("0 / 0", 0, 0, 0, 0), 0);
    }

    #[test]
    fn trig_and_bitwise_compose() {
        // abs((3 ^ 5) * tan(3 ^ 5)) with 3^5 = 6.
        let v = evaluate("abs((i ^ j) * tan(i ^ j))", 3, 5, 0, 0);
        assert_eq!(v, (6.0f64 * 6.0f64.tan()).abs().floor() as i64);
    }

    #[test]
    fn lenient_formula_survives_garbage() {
        let f = Formula::lenient("((i +");
        assert!(f.is_trivial());
        assert_eq!(f.eval(Bindings::default()), 0);
        assert_eq!(f.source(), "((i +");
    }
}
