use crate::expr::Bindings;
use crate::expr::ast::{BinaryOp, Expr, Func, UnaryOp, Var};

/// Tree-walking evaluation in `f64`, with the arithmetic semantics of the
/// formulas' source dialect: `/` by zero yields an infinity, `%` is the
/// signed remainder (result carries the sign of the dividend), and the
/// bitwise operators work on operands squeezed through [`to_int32`].
///
/// Total function; domain problems surface as non-finite values and are
/// coerced at the formula boundary, never here.
pub(crate) fn eval(expr: &Expr, b: Bindings) -> f64 {
    match expr {
        Expr::Num(v) => *v,
        Expr::Var(var) => match var {
            Var::I => b.i as f64,
            Var::J => b.j as f64,
            Var::X => b.x as f64,
            Var::T => b.t as f64,
        },
        Expr::Unary {
            op: UnaryOp::Neg,
            expr,
        } => -eval(expr, b),
        Expr::Binary { op, left, right } => {
            let l = eval(left, b);
            let r = eval(right, b);
            match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => l / r,
                BinaryOp::Mod => l % r,
                BinaryOp::BitAnd => f64::from(to_int32(l) & to_int32(r)),
                BinaryOp::BitXor => f64::from(to_int32(l) ^ to_int32(r)),
                BinaryOp::BitOr => f64::from(to_int32(l) | to_int32(r)),
            }
        }
        Expr::Call { func, arg } => {
            let v = eval(arg, b);
            match func {
                Func::Abs => v.abs(),
                Func::Sin => v.sin(),
                Func::Cos => v.cos(),
                Func::Tan => v.tan(),
                Func::Atan => v.atan(),
            }
        }
    }
}

/// ECMA-style ToInt32: truncate toward zero, wrap modulo 2^32 into `i32`;
/// NaN and infinities become 0.
pub(crate) fn to_int32(v: f64) -> i32 {
    if !v.is_finite() {
        return 0;
    }
    let t = v.trunc();
    let m = t.rem_euclid(4_294_967_296.0);
    if m >= 2_147_483_648.0 {
        (m - 4_294_967_296.0) as i32
    } else {
        m as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parser::parse;

    fn ev(src: &str, b: Bindings) -> f64 {
        eval(&parse(src).unwrap(), b)
    }

    #[test]
    fn remainder_keeps_dividend_sign() {
        let b = Bindings::default();
        assert_eq!(ev("-1 % 255", b), -1.0);
        assert_eq!(ev("256 % 255", b), 1.0);
        assert_eq!(ev("7 % -3", b), 1.0);
    }

    #[test]
    fn division_by_zero_is_infinite() {
        let b = Bindings::default();
        assert!(ev("1 / 0", b).is_infinite());
        assert!(ev("0 % 0", b).is_nan());
    }

    #[test]
    fn bitwise_truncates_operands() {
        let b = Bindings::default();
        assert_eq!(ev("6.9 & 3.9", b), 2.0);
        assert_eq!(ev("5 ^ 3", b), 6.0);
        assert_eq!(ev("5 | 2", b), 7.0);
        // Non-finite operands collapse to 0 before the bit op.
        assert_eq!(ev("(1 / 0) | 0", b), 0.0);
    }

    #[test]
    fn to_int32_wraps_like_ecma() {
        assert_eq!(to_int32(0.0), 0);
        assert_eq!(to_int32(-0.9), 0);
        assert_eq!(to_int32(2_147_483_648.0), -2_147_483_648);
        assert_eq!(to_int32(4_294_967_296.0), 0);
        assert_eq!(to_int32(4_294_967_297.0), 1);
        assert_eq!(to_int32(-1.0), -1);
        assert_eq!(to_int32(f64::NAN), 0);
        assert_eq!(to_int32(f64::INFINITY), 0);
    }

    #[test]
    fn bindings_flow_through() {
        let b = Bindings {
            i: 3,
            j: 4,
            x: 10,
            t: 2,
        };
        assert_eq!(ev("i + j", b), 7.0);
        assert_eq!(ev("x * t", b), 20.0);
        assert_eq!(ev("-i", b), -3.0);
    }
}
