use serde::{Deserialize, Serialize};

use crate::types::{ResolvedType, TypeRef};
use gglang_diagnostics::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncDecOp {
    Inc,
    Dec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

/// An expression node: a kind, its source position, and a `resolved_type`
/// slot filled in exactly once by the semantic analyzer's body-walk pass —
/// `None` until then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
    pub resolved_type: Option<ResolvedType>,
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Self { kind, pos, resolved_type: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExprKind {
    IntLiteral(i64),
    LongLiteral(i64),
    FloatLiteral(f64),
    DoubleLiteral(f64),
    StringLiteral(String),
    CharLiteral(char),
    BoolLiteral(bool),
    Null,
    This,
    Base,
    Identifier(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    IncDec {
        op: IncDecOp,
        operand: Box<Expr>,
        is_prefix: bool,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    MemberAccess {
        target: Box<Expr>,
        member: String,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    New {
        type_name: String,
        args: Vec<Expr>,
    },
    NewArray {
        element_type: TypeRef,
        size: Box<Expr>,
    },
    Cast {
        target_type: TypeRef,
        operand: Box<Expr>,
    },
    Grouping(Box<Expr>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_expr_has_no_resolved_type() {
        let e = Expr::new(ExprKind::IntLiteral(42), Position::new(1, 1));
        assert!(e.resolved_type.is_none());
    }
}
