use crate::expr::ast::{BinaryOp, Expr, Func, UnaryOp, Var};
use crate::expr::error::ExprError;
use crate::expr::lexer::{Span, Token, TokenKind, lex};

/// Parses a formula into an expression tree.
///
/// The grammar admits numbers, the bindings `i`/`j`/`x`/`t`, `+ - * / %`,
/// the bitwise `& ^ |` (lowest precedence, `|` loosest), unary minus,
/// parentheses, and calls to `abs`/`sin`/`cos`/`tan`/`atan`. Any other
/// identifier is an error; there is deliberately no way to reach ambient
/// state from a formula.
pub(crate) fn parse(src: &str) -> Result<Expr, ExprError> {
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let expr = p.parse_bitor()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        self.pos += 1;
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_bitor(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_bitxor()?;
        while self.consume(TokenKind::Pipe) {
            let r = self.parse_bitxor()?;
            e = Expr::Binary {
                op: BinaryOp::BitOr,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_bitxor(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_bitand()?;
        while self.consume(TokenKind::Caret) {
            let r = self.parse_bitand()?;
            e = Expr::Binary {
                op: BinaryOp::BitXor,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_bitand(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_term()?;
        while self.consume(TokenKind::Amp) {
            let r = self.parse_term()?;
            e = Expr::Binary {
                op: BinaryOp::BitAnd,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_factor()?;
        loop {
            if self.consume(TokenKind::Plus) {
                let r = self.parse_factor()?;
                e = Expr::Binary {
                    op: BinaryOp::Add,
                    left: Box::new(e),
                    right: Box::new(r),
                };
            } else if self.consume(TokenKind::Minus) {
                let r = self.parse_factor()?;
                e = Expr::Binary {
                    op: BinaryOp::Sub,
                    left: Box::new(e),
                    right: Box::new(r),
                };
            } else {
                break;
            }
        }
        Ok(e)
    }

    fn parse_factor(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_unary()?;
        loop {
            let op = if self.consume(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(TokenKind::Slash) {
                BinaryOp::Div
            } else if self.consume(TokenKind::Percent) {
                BinaryOp::Mod
            } else {
                break;
            };
            let r = self.parse_unary()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if self.consume(TokenKind::Minus) {
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(e),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Num(v)),
            TokenKind::Ident(name) => {
                if self.peek().kind == TokenKind::LParen {
                    let Some(func) = Func::from_name(&name) else {
                        return Err(ExprError::new(
                            t.span.start,
                            format!("unknown function '{name}'"),
                        ));
                    };
                    self.bump();
                    let arg = self.parse_bitor()?;
                    if self.peek().kind == TokenKind::Comma {
                        return Err(ExprError::new(
                            self.span().start,
                            format!("'{name}' takes exactly one argument"),
                        ));
                    }
                    self.expect(TokenKind::RParen)?;
                    return Ok(Expr::Call {
                        func,
                        arg: Box::new(arg),
                    });
                }
                match Var::from_name(&name) {
                    Some(var) => Ok(Expr::Var(var)),
                    None => Err(ExprError::new(
                        t.span.start,
                        format!("unknown identifier '{name}'"),
                    )),
                }
            }
            TokenKind::LParen => {
                let e = self.parse_bitor()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arithmetic_precedence() {
        // 1+2*3 groups as 1+(2*3).
        let e = parse("1+2*3").unwrap();
        match e {
            Expr::Binary {
                op: BinaryOp::Add,
                right,
                ..
            } => match *right {
                Expr::Binary {
                    op: BinaryOp::Mul, ..
                } => {}
                other => panic!("unexpected rhs: {other:?}"),
            },
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn bitwise_binds_loosest() {
        // i & j + 1 groups as i & (j + 1), and | looser than ^ looser than &.
        let e = parse("i & j + 1").unwrap();
        match e {
            Expr::Binary {
                op: BinaryOp::BitAnd,
                ..
            } => {}
            other => panic!("unexpected ast: {other:?}"),
        }
        let e = parse("i | j ^ i & j").unwrap();
        match e {
            Expr::Binary {
                op: BinaryOp::BitOr,
                ..
            } => {}
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn parses_calls() {
        let e = parse("atan(x)").unwrap();
        match e {
            Expr::Call {
                func: Func::Atan, ..
            } => {}
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_identifiers() {
        // `ix` must fail as a whole, never be mis-read as `i` times `x`.
        assert!(parse("i + ix").is_err());
        assert!(parse("window").is_err());
        assert!(parse("atan2(x, 1)").is_err());
    }

    #[test]
    fn rejects_bad_arity_and_unbalanced_parens() {
        assert!(parse("sin(x, 1)").is_err());
        assert!(parse("(i + j").is_err());
        assert!(parse("i + ").is_err());
    }

    #[test]
    fn function_names_are_not_variables() {
        assert!(parse("sin").is_err());
        assert!(parse("sin + 1").is_err());
    }
}
