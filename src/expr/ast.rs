#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Num(f64),
    Var(Var),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        func: Func,
        arg: Box<Expr>,
    },
}

/// The four bindings a formula may reference as whole-word identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Var {
    I,
    J,
    X,
    T,
}

impl Var {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "i" => Some(Self::I),
            "j" => Some(Self::J),
            "x" => Some(Self::X),
            "t" => Some(Self::T),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitXor,
    BitOr,
}

/// The fixed allowed function set. No other call target exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Func {
    Abs,
    Sin,
    Cos,
    Tan,
    Atan,
}

impl Func {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "abs" => Some(Self::Abs),
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "atan" => Some(Self::Atan),
            _ => None,
        }
    }
}
