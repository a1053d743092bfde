use std::collections::HashMap;

use gglang_ast::{FieldDecl, MethodDecl};
use gglang_diagnostics::Position;

/// The semantic analyzer's per-class record. `fields` and `methods` hold
/// fully resolved members: after inheritance resolution, a derived class's
/// maps also contain every inherited member not shadowed by a same-named
/// declaration of its own.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub name: String,
    pub base: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: HashMap<String, FieldDecl>,
    pub methods: HashMap<String, MethodDecl>,
    pub has_constructor: bool,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub pos: Position,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            interfaces: Vec::new(),
            fields: HashMap::new(),
            methods: HashMap::new(),
            has_constructor: false,
            is_abstract: false,
            is_sealed: false,
            pos: Position::unknown(),
        }
    }

    pub fn with_pos(mut self, pos: Position) -> Self {
        self.pos = pos;
        self
    }
}

/// All classes registered by pass 1/2, keyed by name. Interfaces and enums
/// are tracked only by name (see [`crate::TypeTable`]) since this core does
/// not resolve their members beyond parsing.
#[derive(Debug, Default)]
pub struct ClassTable {
    classes: HashMap<String, ClassInfo>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: ClassInfo) {
        self.classes.insert(info.name.clone(), info);
    }

    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClassInfo> {
        self.classes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }
}
