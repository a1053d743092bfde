use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::types::TypeRef;
use gglang_diagnostics::Position;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Position,
}

impl Stmt {
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Self { kind, pos }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StmtKind {
    Expr(Expr),
    VarDecl {
        declared_type: Option<TypeRef>,
        name: String,
        init: Option<Expr>,
    },
    Block(Block),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    Foreach {
        var_name: String,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Return(Option<Expr>),
    Break,
    Continue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ExprKind;

    #[test]
    fn else_if_chain_nests_as_else_branch() {
        let inner_if = Stmt::new(
            StmtKind::If {
                condition: Expr::new(ExprKind::BoolLiteral(true), Position::new(2, 1)),
                then_branch: Box::new(Stmt::new(
                    StmtKind::Block(Block { stmts: vec![], pos: Position::new(2, 10) }),
                    Position::new(2, 10),
                )),
                else_branch: None,
            },
            Position::new(2, 1),
        );
        let outer = Stmt::new(
            StmtKind::If {
                condition: Expr::new(ExprKind::BoolLiteral(false), Position::new(1, 1)),
                then_branch: Box::new(Stmt::new(
                    StmtKind::Block(Block { stmts: vec![], pos: Position::new(1, 10) }),
                    Position::new(1, 10),
                )),
                else_branch: Some(Box::new(inner_if)),
            },
            Position::new(1, 1),
        );
        match outer.kind {
            StmtKind::If { else_branch: Some(branch), .. } => match branch.kind {
                StmtKind::If { .. } => {}
                _ => panic!("expected nested if"),
            },
            _ => panic!("expected if"),
        }
    }
}
