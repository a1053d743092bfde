use super::Parser;
use gglang_ast::TypeRef;
use gglang_lexer::TokenKind;

impl<'a> Parser<'a> {
    /// `Name`, `Name<Arg, Arg>`, `Name[]`, or `Name?` in any combination.
    /// Generic arguments are parsed but not otherwise enforced by this
    /// core.
    pub(crate) fn parse_type_ref(&mut self) -> TypeRef {
        let pos = self.position();
        let name = self.type_name();

        let mut generic_args = Vec::new();
        if self.match_token(&TokenKind::Lt) {
            loop {
                generic_args.push(self.parse_type_ref());
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::Gt, "`>` to close generic type arguments");
        }

        let mut is_array = false;
        if self.check(&TokenKind::LBracket) && self.check_at(1, &TokenKind::RBracket) {
            self.advance();
            self.advance();
            is_array = true;
        }

        let is_nullable = self.match_token(&TokenKind::Question);

        TypeRef { name, is_array, is_nullable, generic_args, pos }
    }

    fn type_name(&mut self) -> String {
        match self.peek().clone() {
            TokenKind::Int => { self.advance(); "int".to_string() }
            TokenKind::Long => { self.advance(); "long".to_string() }
            TokenKind::Byte => { self.advance(); "byte".to_string() }
            TokenKind::Short => { self.advance(); "short".to_string() }
            TokenKind::Float => { self.advance(); "float".to_string() }
            TokenKind::Double => { self.advance(); "double".to_string() }
            TokenKind::Bool => { self.advance(); "bool".to_string() }
            TokenKind::CharKw => { self.advance(); "char".to_string() }
            TokenKind::StringKw => { self.advance(); "string".to_string() }
            TokenKind::Void => { self.advance(); "void".to_string() }
            TokenKind::Identifier(name) => { self.advance(); name }
            _ => self.expect_identifier("a type name"),
        }
    }

    /// Whether the current token can start a type reference — used by the
    /// statement parser to decide "typed local declaration" vs "expression
    /// statement" without committing to a full parse.
    pub(crate) fn at_type_start(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Int
                | TokenKind::Long
                | TokenKind::Byte
                | TokenKind::Short
                | TokenKind::Float
                | TokenKind::Double
                | TokenKind::Bool
                | TokenKind::CharKw
                | TokenKind::StringKw
                | TokenKind::Void
                | TokenKind::Identifier(_)
        )
    }
}
