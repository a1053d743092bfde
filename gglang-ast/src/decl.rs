use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::stmt::Block;
use crate::types::TypeRef;
use gglang_diagnostics::Position;

/// Member/type visibility. Top-level types default to `Public`; members
/// default to `Private` when no modifier is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    Public,
    Private,
    Protected,
}

impl Default for Access {
    fn default() -> Self {
        Access::Private
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_sealed: bool,
    pub is_readonly: bool,
}

/// A `[@Name(args...)]` annotation. Argument expressions that are not
/// literals are stringified from their source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub args: Vec<String>,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub param_type: TypeRef,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub field_type: TypeRef,
    pub init: Option<Expr>,
    pub access: Access,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TypeRef,
    pub body: Option<Block>,
    pub access: Access,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub params: Vec<Param>,
    /// Arguments to `: base(args)`, chained before the body runs.
    pub base_args: Option<Vec<Expr>>,
    pub body: Block,
    pub access: Access,
    pub annotations: Vec<Annotation>,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub base: Option<String>,
    pub interfaces: Vec<String>,
    pub members: Vec<Member>,
    pub access: Access,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub extends: Vec<String>,
    pub methods: Vec<MethodDecl>,
    pub access: Access,
    pub annotations: Vec<Annotation>,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumVariant {
    pub name: String,
    pub value: Option<Expr>,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub variants: Vec<EnumVariant>,
    pub access: Access,
    pub annotations: Vec<Annotation>,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TypeDecl {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Class(c) => &c.name,
            TypeDecl::Interface(i) => &i.name,
            TypeDecl::Enum(e) => &e.name,
        }
    }

    pub fn pos(&self) -> &Position {
        match self {
            TypeDecl::Class(c) => &c.pos,
            TypeDecl::Interface(i) => &i.pos,
            TypeDecl::Enum(e) => &e.pos,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportDecl {
    pub path: String,
    pub pos: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDecl {
    pub name: String,
    pub pos: Position,
}

/// The root AST node for one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub module: Option<ModuleDecl>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    pub fn new() -> Self {
        Self { module: None, imports: Vec::new(), types: Vec::new() }
    }
}

impl Default for CompilationUnit {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_access_is_private() {
        assert_eq!(Access::default(), Access::Private);
    }

    #[test]
    fn type_decl_name_dispatches_by_variant() {
        let class = TypeDecl::Class(ClassDecl {
            name: "Animal".to_string(),
            base: None,
            interfaces: vec![],
            members: vec![],
            access: Access::Public,
            modifiers: Modifiers::default(),
            annotations: vec![],
            pos: Position::new(1, 1),
        });
        assert_eq!(class.name(), "Animal");
    }

    #[test]
    fn empty_compilation_unit_has_no_types() {
        let unit = CompilationUnit::new();
        assert!(unit.types.is_empty());
        assert!(unit.module.is_none());
    }
}
