//! The abstract syntax tree produced by `gglang-parser` and consumed by
//! `gglang-sema` and `gglang-codegen`.
//!
//! Node positions reuse [`gglang_diagnostics::Position`] so every phase
//! reports locations the same way; expression nodes carry a `resolved_type`
//! slot the semantic analyzer fills in exactly once.

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod types;

pub use decl::{
    Access, Annotation, ClassDecl, CompilationUnit, ConstructorDecl, EnumDecl, EnumVariant,
    FieldDecl, ImportDecl, InterfaceDecl, Member, MethodDecl, Modifiers, ModuleDecl, Param,
    TypeDecl,
};
pub use expr::{AssignOp, BinaryOp, Expr, ExprKind, IncDecOp, UnaryOp};
pub use stmt::{Block, Stmt, StmtKind};
pub use types::{widens_to, ResolvedType, TypeRef};
