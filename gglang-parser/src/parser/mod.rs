// Recursive-descent parser for gglang source, modeled on a hand-written
// token-stream walker: no external grammar DSL, full control over the
// lookahead gglang's disambiguation rules need.

mod expressions;
mod items;
mod statements;
mod types;

use gglang_ast::CompilationUnit;
use gglang_diagnostics::{error_codes, DiagnosticBag, Position};
use gglang_lexer::{Token, TokenKind};

pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    file: Option<&'a str>,
    diagnostics: DiagnosticBag,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, file: Option<&'a str>) -> Self {
        Self { tokens, current: 0, file, diagnostics: DiagnosticBag::new() }
    }

    pub fn into_diagnostics(self) -> DiagnosticBag {
        self.diagnostics
    }

    pub fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let mut unit = CompilationUnit::new();

        if self.check(&TokenKind::Module) {
            unit.module = Some(self.parse_module_decl());
        }

        while self.check(&TokenKind::Import) {
            unit.imports.push(self.parse_import_decl());
        }

        let mut steps = 0usize;
        while !self.is_at_end() {
            if self.guard_tick(&mut steps) {
                break;
            }
            match self.try_parse_type_decl() {
                Some(type_decl) => unit.types.push(type_decl),
                None => {
                    self.error_at_current(
                        error_codes::UNEXPECTED_TOKEN,
                        format!("unexpected token `{}` at top level", self.describe_current()),
                    );
                    self.advance();
                }
            }
        }

        unit
    }

    /// Bails a pathological recovery loop out after too many iterations
    /// without consuming input, rather than spinning forever.
    fn guard_tick(&self, steps: &mut usize) -> bool {
        *steps += 1;
        *steps > self.tokens.len().saturating_add(64)
    }

    // ==================== token-stream primitives ====================

    pub(crate) fn peek(&self) -> &TokenKind {
        &self.tokens[self.current.min(self.tokens.len() - 1)].kind
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &TokenKind {
        let idx = (self.current + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    pub(crate) fn peek_token(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(kind)
    }

    pub(crate) fn check_at(&self, offset: usize, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek_at(offset)) == std::mem::discriminant(kind)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `kind` or records a diagnostic (but does not stop parsing).
    /// Returns whether the token was present.
    pub(crate) fn expect(&mut self, kind: &TokenKind, what: &str) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            self.error_at_current(
                error_codes::EXPECTED_TOKEN,
                format!("expected {what}, found `{}`", self.describe_current()),
            );
            false
        }
    }

    pub(crate) fn expect_identifier(&mut self, what: &str) -> String {
        if let TokenKind::Identifier(name) = self.peek().clone() {
            self.advance();
            name
        } else {
            self.error_at_current(
                error_codes::EXPECTED_TOKEN,
                format!("expected {what}, found `{}`", self.describe_current()),
            );
            String::new()
        }
    }

    pub(crate) fn position(&self) -> Position {
        let tok = self.peek_token();
        let mut pos = Position::new(tok.line, tok.column);
        if let Some(file) = self.file {
            pos = pos.with_file(file);
        }
        pos
    }

    pub(crate) fn error_at_current(&mut self, code: &str, message: impl Into<String>) {
        let pos = self.position();
        self.diagnostics.error(code, message, pos);
    }

    pub(crate) fn describe_current(&self) -> String {
        match self.peek() {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Eof => "end of file".to_string(),
            other => format!("{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gglang_ast::{ExprKind, Member, StmtKind, TypeDecl};

    fn parse(source: &str) -> (CompilationUnit, DiagnosticBag) {
        crate::parse(source, None)
    }

    #[test]
    fn parses_empty_class() {
        let (unit, bag) = parse("class Empty {}");
        assert!(!bag.has_errors());
        assert_eq!(unit.types.len(), 1);
        assert_eq!(unit.types[0].name(), "Empty");
    }

    #[test]
    fn parses_module_and_import_before_types() {
        let (unit, bag) = parse("module app; import std.io; class Main {}");
        assert!(!bag.has_errors());
        assert_eq!(unit.module.as_ref().unwrap().name, "app");
        assert_eq!(unit.imports.len(), 1);
        assert_eq!(unit.imports[0].path, "std.io");
    }

    #[test]
    fn distinguishes_constructor_method_and_field() {
        let source = r#"
            class Animal {
                string name;
                Animal(string name) {
                    this.name = name;
                }
                string speak() {
                    return name;
                }
            }
        "#;
        let (unit, bag) = parse(source);
        assert!(!bag.has_errors());
        let TypeDecl::Class(class) = &unit.types[0] else { panic!("expected class") };
        assert_eq!(class.members.len(), 3);
        assert!(matches!(class.members[0], Member::Field(_)));
        assert!(matches!(class.members[1], Member::Constructor(_)));
        assert!(matches!(class.members[2], Member::Method(_)));
    }

    #[test]
    fn typed_local_decl_is_not_confused_with_expression_statement() {
        let source = r#"
            class C {
                void run() {
                    int x = 1;
                    x = x + 1;
                    foo();
                }
            }
        "#;
        let (unit, bag) = parse(source);
        assert!(!bag.has_errors());
        let TypeDecl::Class(class) = &unit.types[0] else { panic!("expected class") };
        let Member::Method(method) = &class.members[0] else { panic!("expected method") };
        let body = method.body.as_ref().unwrap();
        assert!(matches!(body.stmts[0].kind, StmtKind::VarDecl { .. }));
        assert!(matches!(body.stmts[1].kind, StmtKind::Expr(_)));
        assert!(matches!(body.stmts[2].kind, StmtKind::Expr(_)));
    }

    #[test]
    fn dot_after_int_literal_parses_as_member_access_not_float() {
        let (unit, bag) = parse(
            r#"
            class C {
                void run() {
                    42.toString();
                }
            }
            "#,
        );
        assert!(!bag.has_errors());
        let TypeDecl::Class(class) = &unit.types[0] else { panic!("expected class") };
        let Member::Method(method) = &class.members[0] else { panic!("expected method") };
        let StmtKind::Expr(expr) = &method.body.as_ref().unwrap().stmts[0].kind else {
            panic!("expected expression statement")
        };
        assert!(matches!(expr.kind, ExprKind::Call { .. }));
    }

    #[test]
    fn class_can_declare_base_and_interfaces() {
        let (unit, bag) = parse("class Dog : Animal, Named {}");
        assert!(!bag.has_errors());
        let TypeDecl::Class(class) = &unit.types[0] else { panic!("expected class") };
        assert_eq!(class.base.as_deref(), Some("Animal"));
        assert_eq!(class.interfaces, vec!["Named".to_string()]);
    }

    #[test]
    fn annotation_is_not_confused_with_array_brackets() {
        let source = r#"
            class C {
                [@Deprecated("use bar instead")]
                int[] values;
            }
        "#;
        let (unit, bag) = parse(source);
        assert!(!bag.has_errors());
        let TypeDecl::Class(class) = &unit.types[0] else { panic!("expected class") };
        let Member::Field(field) = &class.members[0] else { panic!("expected field") };
        assert_eq!(field.annotations.len(), 1);
        assert_eq!(field.annotations[0].name, "Deprecated");
        assert!(field.field_type.is_array);
    }

    #[test]
    fn constructor_can_chain_to_base() {
        let source = r#"
            class Dog : Animal {
                Dog(string name) : base(name) {
                }
            }
        "#;
        let (unit, bag) = parse(source);
        assert!(!bag.has_errors());
        let TypeDecl::Class(class) = &unit.types[0] else { panic!("expected class") };
        let Member::Constructor(ctor) = &class.members[0] else { panic!("expected constructor") };
        assert!(ctor.base_args.is_some());
    }

    #[test]
    fn malformed_member_recovers_and_keeps_parsing_rest_of_class() {
        let source = r#"
            class C {
                ???
                int ok;
            }
        "#;
        let (unit, bag) = parse(source);
        assert!(bag.has_errors());
        let TypeDecl::Class(class) = &unit.types[0] else { panic!("expected class") };
        assert!(class.members.iter().any(|m| matches!(m, Member::Field(f) if f.name == "ok")));
    }

    #[test]
    fn interface_methods_have_no_body() {
        let (unit, bag) = parse("interface Named { string getName(); }");
        assert!(!bag.has_errors());
        let TypeDecl::Interface(iface) = &unit.types[0] else { panic!("expected interface") };
        assert!(iface.methods[0].body.is_none());
    }

    #[test]
    fn enum_variants_parse_with_and_without_explicit_values() {
        let (unit, bag) = parse("enum Color { Red, Green = 5, Blue }");
        assert!(!bag.has_errors());
        let TypeDecl::Enum(e) = &unit.types[0] else { panic!("expected enum") };
        assert_eq!(e.variants.len(), 3);
        assert!(e.variants[0].value.is_none());
        assert!(e.variants[1].value.is_some());
    }

    #[test]
    fn new_expr_accepts_dotted_type_name() {
        let source = r#"
            class C {
                void run() {
                    var x = new Collections.List(1, 2);
                }
            }
        "#;
        let (unit, bag) = parse(source);
        assert!(!bag.has_errors());
        let TypeDecl::Class(class) = &unit.types[0] else { panic!("expected class") };
        let Member::Method(method) = &class.members[0] else { panic!("expected method") };
        let StmtKind::VarDecl { init, .. } = &method.body.as_ref().unwrap().stmts[0].kind else {
            panic!("expected var decl")
        };
        let ExprKind::New { type_name, args } = &init.as_ref().unwrap().kind else {
            panic!("expected object creation")
        };
        assert_eq!(type_name, "Collections.List");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn new_object_and_new_array_are_disjoint() {
        let (unit, bag) = parse(
            r#"
            class C {
                void run() {
                    var a = new Foo(1, 2, 3);
                    var b = new Foo[5];
                }
            }
            "#,
        );
        assert!(!bag.has_errors());
        let TypeDecl::Class(class) = &unit.types[0] else { panic!("expected class") };
        let Member::Method(method) = &class.members[0] else { panic!("expected method") };
        let stmts = &method.body.as_ref().unwrap().stmts;
        let StmtKind::VarDecl { init: Some(a), .. } = &stmts[0].kind else { panic!("expected var decl") };
        let StmtKind::VarDecl { init: Some(b), .. } = &stmts[1].kind else { panic!("expected var decl") };
        assert!(matches!(a.kind, ExprKind::New { .. }));
        assert!(matches!(b.kind, ExprKind::NewArray { .. }));
    }

    #[test]
    fn for_loop_parses_all_three_clauses() {
        let source = r#"
            class C {
                void run() {
                    for (int i = 0; i < 10; i++) {
                        foo(i);
                    }
                }
            }
        "#;
        let (_unit, bag) = parse(source);
        assert!(!bag.has_errors());
    }
}
