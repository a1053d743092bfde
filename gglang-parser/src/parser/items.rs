use super::Parser;
use gglang_ast::{
    Access, Annotation, ClassDecl, ConstructorDecl, EnumDecl, EnumVariant, FieldDecl, ImportDecl,
    InterfaceDecl, Member, MethodDecl, Modifiers, ModuleDecl, Param, TypeDecl,
};
use gglang_diagnostics::{error_codes, Position};
use gglang_lexer::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_module_decl(&mut self) -> ModuleDecl {
        let pos = self.position();
        self.advance(); // `module`
        let name = self.expect_identifier("a module name");
        self.expect(&TokenKind::Semicolon, "`;` after module declaration");
        ModuleDecl { name, pos }
    }

    pub(crate) fn parse_import_decl(&mut self) -> ImportDecl {
        let pos = self.position();
        self.advance(); // `import`
        let mut segments = vec![self.expect_identifier("an import path")];
        while self.match_token(&TokenKind::Dot) {
            segments.push(self.expect_identifier("an import path segment"));
        }
        self.expect(&TokenKind::Semicolon, "`;` after import");
        ImportDecl { path: segments.join("."), pos }
    }

    /// Top-level `class`/`interface`/`enum` (and `struct`, parsed as a plain
    /// class — this core has no separate value-type semantics). Returns
    /// `None` (without consuming anything) when the current token cannot
    /// start a type declaration, so the caller can recover.
    pub(crate) fn try_parse_type_decl(&mut self) -> Option<TypeDecl> {
        let pos = self.position();
        let annotations = self.parse_annotations();
        let access = self.parse_access(Access::Public);
        let modifiers = self.parse_modifiers();

        match self.peek() {
            TokenKind::Class | TokenKind::Struct => {
                self.advance();
                Some(TypeDecl::Class(self.parse_class_body(pos, access, modifiers, annotations)))
            }
            TokenKind::Interface => {
                self.advance();
                Some(TypeDecl::Interface(self.parse_interface_body(pos, access, annotations)))
            }
            TokenKind::Enum => {
                self.advance();
                Some(TypeDecl::Enum(self.parse_enum_body(pos, access, annotations)))
            }
            _ => None,
        }
    }

    fn parse_class_body(
        &mut self,
        pos: Position,
        access: Access,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
    ) -> ClassDecl {
        let name = self.expect_identifier("a class name");
        let (base, interfaces) = self.parse_inheritance_list();
        self.expect(&TokenKind::LBrace, "`{` to open class body");

        let mut members = Vec::new();
        let mut steps = 0usize;
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            if self.guard_tick(&mut steps) {
                break;
            }
            match self.parse_member(&name) {
                Some(member) => members.push(member),
                None => {
                    self.error_at_current(
                        error_codes::UNEXPECTED_TOKEN,
                        format!("unexpected token `{}` in class body", self.describe_current()),
                    );
                    self.advance();
                }
            }
        }
        self.expect(&TokenKind::RBrace, "`}` to close class body");

        ClassDecl { name, base, interfaces, members, access, modifiers, annotations, pos }
    }

    fn parse_interface_body(
        &mut self,
        pos: Position,
        access: Access,
        annotations: Vec<Annotation>,
    ) -> InterfaceDecl {
        let name = self.expect_identifier("an interface name");
        let (_, extends) = self.parse_inheritance_list();
        self.expect(&TokenKind::LBrace, "`{` to open interface body");

        let mut methods = Vec::new();
        let mut steps = 0usize;
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            if self.guard_tick(&mut steps) {
                break;
            }
            let method_pos = self.position();
            self.parse_annotations();
            let return_type = self.parse_type_ref();
            let method_name = self.expect_identifier("a method name");
            let params = self.parse_param_list();
            self.expect(&TokenKind::Semicolon, "`;` after interface method signature");
            methods.push(MethodDecl {
                name: method_name,
                params,
                return_type,
                body: None,
                access: Access::Public,
                modifiers: Modifiers { is_abstract: true, ..Modifiers::default() },
                annotations: Vec::new(),
                pos: method_pos,
            });
        }
        self.expect(&TokenKind::RBrace, "`}` to close interface body");

        InterfaceDecl { name, extends, methods, access, annotations, pos }
    }

    fn parse_enum_body(&mut self, pos: Position, access: Access, annotations: Vec<Annotation>) -> EnumDecl {
        let name = self.expect_identifier("an enum name");
        self.expect(&TokenKind::LBrace, "`{` to open enum body");

        let mut variants = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let variant_pos = self.position();
            let variant_name = self.expect_identifier("an enum variant name");
            let value = if self.match_token(&TokenKind::Eq) { Some(self.parse_expression()) } else { None };
            variants.push(EnumVariant { name: variant_name, value, pos: variant_pos });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace, "`}` to close enum body");

        EnumDecl { name, variants, access, annotations, pos }
    }

    /// `: Base, IFace1, IFace2` — the first name is a tentative base class;
    /// `gglang-sema` reclassifies it as an interface if the registry says
    /// so (a class can implement interfaces with no explicit base).
    fn parse_inheritance_list(&mut self) -> (Option<String>, Vec<String>) {
        if !self.match_token(&TokenKind::Colon) {
            return (None, Vec::new());
        }
        let mut names = vec![self.expect_identifier("a base type name")];
        while self.match_token(&TokenKind::Comma) {
            names.push(self.expect_identifier("an interface name"));
        }
        let base = Some(names.remove(0));
        (base, names)
    }

    /// Parses one class member, disambiguating constructor vs. method vs.
    /// field from a shared prefix: a constructor is recognized by its name
    /// matching `class_name` immediately followed by `(`; otherwise a type
    /// ref followed by `(` is a method, and anything else is a field.
    fn parse_member(&mut self, class_name: &str) -> Option<Member> {
        if matches!(self.peek(), TokenKind::RBrace) || self.is_at_end() {
            return None;
        }

        let pos = self.position();
        let annotations = self.parse_annotations();
        let access = self.parse_access(Access::Private);
        let modifiers = self.parse_modifiers();

        if let TokenKind::Identifier(name) = self.peek().clone() {
            if name == class_name && self.check_at(1, &TokenKind::LParen) {
                self.advance();
                return Some(Member::Constructor(self.parse_constructor(pos, access, annotations)));
            }
        }

        if !self.at_type_start() {
            return None;
        }

        let member_type = self.parse_type_ref();
        let name = self.expect_identifier("a field or method name");

        if self.check(&TokenKind::LParen) {
            Some(Member::Method(self.parse_method(pos, name, member_type, access, modifiers, annotations)))
        } else {
            Some(Member::Field(self.parse_field(pos, name, member_type, access, modifiers, annotations)))
        }
    }

    fn parse_constructor(&mut self, pos: Position, access: Access, annotations: Vec<Annotation>) -> ConstructorDecl {
        let params = self.parse_param_list();
        let base_args = if self.match_token(&TokenKind::Colon) {
            self.expect(&TokenKind::Base, "`base` in constructor initializer");
            self.expect(&TokenKind::LParen, "`(` after `base`");
            let args = if !self.check(&TokenKind::RParen) {
                let mut args = vec![self.parse_expression()];
                while self.match_token(&TokenKind::Comma) {
                    args.push(self.parse_expression());
                }
                args
            } else {
                Vec::new()
            };
            self.expect(&TokenKind::RParen, "`)` after base constructor arguments");
            Some(args)
        } else {
            None
        };
        let body = self.parse_block();
        ConstructorDecl { params, base_args, body, access, annotations, pos }
    }

    fn parse_method(
        &mut self,
        pos: Position,
        name: String,
        return_type: gglang_ast::TypeRef,
        access: Access,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
    ) -> MethodDecl {
        let params = self.parse_param_list();
        let body = if modifiers.is_abstract {
            self.expect(&TokenKind::Semicolon, "`;` after abstract method signature");
            None
        } else {
            Some(self.parse_block())
        };
        MethodDecl { name, params, return_type, body, access, modifiers, annotations, pos }
    }

    fn parse_field(
        &mut self,
        pos: Position,
        name: String,
        field_type: gglang_ast::TypeRef,
        access: Access,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
    ) -> FieldDecl {
        let init = if self.match_token(&TokenKind::Eq) { Some(self.parse_expression()) } else { None };
        self.expect(&TokenKind::Semicolon, "`;` after field declaration");
        FieldDecl { name, field_type, init, access, modifiers, annotations, pos }
    }

    fn parse_param_list(&mut self) -> Vec<Param> {
        self.expect(&TokenKind::LParen, "`(` to open parameter list");
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let pos = self.position();
                let param_type = self.parse_type_ref();
                let name = self.expect_identifier("a parameter name");
                params.push(Param { name, param_type, pos });
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "`)` to close parameter list");
        params
    }

    fn parse_access(&mut self, default: Access) -> Access {
        match self.peek() {
            TokenKind::Public => { self.advance(); Access::Public }
            TokenKind::Private => { self.advance(); Access::Private }
            TokenKind::Protected => { self.advance(); Access::Protected }
            _ => default,
        }
    }

    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            match self.peek() {
                TokenKind::Static => { modifiers.is_static = true; self.advance(); }
                TokenKind::Abstract => { modifiers.is_abstract = true; self.advance(); }
                TokenKind::Virtual => { modifiers.is_virtual = true; self.advance(); }
                TokenKind::Override => { modifiers.is_override = true; self.advance(); }
                TokenKind::Sealed => { modifiers.is_sealed = true; self.advance(); }
                TokenKind::Readonly => { modifiers.is_readonly = true; self.advance(); }
                TokenKind::Const => { modifiers.is_readonly = true; self.advance(); }
                _ => break,
            };
        }
        modifiers
    }

    /// `[@Name]` or `[@Name(arg, arg)]`, repeated. Source text for argument
    /// expressions isn't tracked, so non-literal arguments fall back to a
    /// re-printed literal/identifier form.
    fn parse_annotations(&mut self) -> Vec<Annotation> {
        let mut annotations = Vec::new();
        while self.check(&TokenKind::LBracket) && self.check_at(1, &TokenKind::At) {
            let pos = self.position();
            self.advance(); // `[`
            self.advance(); // `@`
            let name = self.expect_identifier("an annotation name");
            let args = if self.match_token(&TokenKind::LParen) {
                let mut args = Vec::new();
                if !self.check(&TokenKind::RParen) {
                    loop {
                        args.push(self.stringify_annotation_arg());
                        if !self.match_token(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(&TokenKind::RParen, "`)` to close annotation arguments");
                args
            } else {
                Vec::new()
            };
            self.expect(&TokenKind::RBracket, "`]` to close annotation");
            annotations.push(Annotation { name, args, pos });
        }
        annotations
    }

    fn stringify_annotation_arg(&mut self) -> String {
        match self.peek().clone() {
            TokenKind::StringLiteral(s) => { self.advance(); s }
            TokenKind::IntLiteral(s) | TokenKind::FloatLiteral(s) => { self.advance(); s }
            TokenKind::True => { self.advance(); "true".to_string() }
            TokenKind::False => { self.advance(); "false".to_string() }
            TokenKind::Identifier(name) => { self.advance(); name }
            _ => {
                let expr = self.parse_expression();
                format!("{expr:?}")
            }
        }
    }
}
