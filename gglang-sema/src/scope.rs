use std::collections::HashMap;

use gglang_ast::ResolvedType;
use gglang_diagnostics::Position;

use crate::builtins;
use crate::symbol::{Symbol, SymbolKind};

/// One level of the lexical scope tree: global, class, method, or a nested
/// block/for/foreach. Analysis visits the AST depth-first, so a `Vec`-backed
/// stack where each frame owns its own name map is equivalent to the tree
/// the data model describes and a good deal simpler to walk.
#[derive(Debug, Default)]
struct Scope {
    symbols: HashMap<String, Symbol>,
}

pub struct ScopeStack {
    frames: Vec<Scope>,
}

impl ScopeStack {
    /// A fresh stack with just the global frame, pre-populated with the
    /// built-in static classes.
    pub fn new() -> Self {
        let mut global = Scope::default();
        for name in builtins::builtin_class_names() {
            let symbol = Symbol::new(name, SymbolKind::Class, ResolvedType::new(name), Position::unknown());
            global.symbols.insert(name.to_string(), symbol);
        }
        Self { frames: vec![global] }
    }

    pub fn push(&mut self) {
        self.frames.push(Scope::default());
    }

    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Declares `symbol` in the innermost scope. Returns `false` (and leaves
    /// the scope untouched) if the name is already taken in that same scope.
    pub fn declare(&mut self, symbol: Symbol) -> bool {
        if self.lookup_local(&symbol.name).is_some() {
            return false;
        }
        let frame = self.frames.last_mut().expect("global scope frame always present");
        frame.symbols.insert(symbol.name.clone(), symbol);
        true
    }

    /// Walks from the innermost scope out to global.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.frames.iter().rev().find_map(|frame| frame.symbols.get(name))
    }

    /// Checks only the innermost scope, ignoring any outer shadowing.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.frames.last().and_then(|frame| frame.symbols.get(name))
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_scope_knows_builtin_classes() {
        let scopes = ScopeStack::new();
        assert!(scopes.lookup("Console").is_some());
        assert!(scopes.lookup("Math").is_some());
        assert!(scopes.lookup("Memory").is_some());
    }

    #[test]
    fn nested_scope_sees_outer_declarations() {
        let mut scopes = ScopeStack::new();
        scopes.declare(Symbol::new(
            "x",
            SymbolKind::Variable,
            ResolvedType::new("int"),
            Position::new(1, 1),
        ));
        scopes.push();
        assert!(scopes.lookup("x").is_some());
        assert!(scopes.lookup_local("x").is_none());
    }

    #[test]
    fn redeclaring_in_same_scope_is_rejected() {
        let mut scopes = ScopeStack::new();
        assert!(scopes.declare(Symbol::new(
            "x",
            SymbolKind::Variable,
            ResolvedType::new("int"),
            Position::new(1, 1)
        )));
        assert!(!scopes.declare(Symbol::new(
            "x",
            SymbolKind::Variable,
            ResolvedType::new("int"),
            Position::new(2, 1)
        )));
    }

    #[test]
    fn popping_exposes_outer_scope_again() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.declare(Symbol::new(
            "y",
            SymbolKind::Variable,
            ResolvedType::new("int"),
            Position::new(1, 1),
        ));
        scopes.pop();
        assert!(scopes.lookup("y").is_none());
    }
}
