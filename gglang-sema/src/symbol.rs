use gglang_ast::{Access, ResolvedType};
use gglang_diagnostics::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Field,
    Method,
    Constructor,
    Class,
    Interface,
    Enum,
    Module,
}

/// One named entry in a [`crate::scope::Scope`].
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub declared_type: ResolvedType,
    pub access: Access,
    pub is_static: bool,
    pub is_readonly: bool,
    pub pos: Position,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, declared_type: ResolvedType, pos: Position) -> Self {
        Self {
            name: name.into(),
            kind,
            declared_type,
            access: Access::Public,
            is_static: false,
            is_readonly: false,
            pos,
        }
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_readonly(mut self, is_readonly: bool) -> Self {
        self.is_readonly = is_readonly;
        self
    }
}
