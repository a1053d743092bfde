use super::Parser;
use gglang_ast::{Block, Stmt, StmtKind};
use gglang_lexer::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_block(&mut self) -> Block {
        let pos = self.position();
        self.expect(&TokenKind::LBrace, "`{` to open a block");
        let mut stmts = Vec::new();
        let mut steps = 0usize;
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            if self.guard_tick(&mut steps) {
                break;
            }
            stmts.push(self.parse_statement());
        }
        self.expect(&TokenKind::RBrace, "`}` to close a block");
        Block { stmts, pos }
    }

    pub(crate) fn parse_statement(&mut self) -> Stmt {
        let pos = self.position();
        match self.peek() {
            TokenKind::LBrace => {
                let block = self.parse_block();
                Stmt::new(StmtKind::Block(block), pos)
            }
            TokenKind::If => self.parse_if_statement(pos),
            TokenKind::While => self.parse_while_statement(pos),
            TokenKind::For => self.parse_for_statement(pos),
            TokenKind::Foreach => self.parse_foreach_statement(pos),
            TokenKind::Return => {
                self.advance();
                let value = if !self.check(&TokenKind::Semicolon) {
                    Some(self.parse_expression())
                } else {
                    None
                };
                self.expect(&TokenKind::Semicolon, "`;` after `return`");
                Stmt::new(StmtKind::Return(value), pos)
            }
            TokenKind::Break => {
                self.advance();
                self.expect(&TokenKind::Semicolon, "`;` after `break`");
                Stmt::new(StmtKind::Break, pos)
            }
            TokenKind::Continue => {
                self.advance();
                self.expect(&TokenKind::Semicolon, "`;` after `continue`");
                Stmt::new(StmtKind::Continue, pos)
            }
            _ if self.looks_like_local_decl() => self.parse_var_decl_statement(pos),
            _ => {
                let expr = self.parse_expression();
                self.expect(&TokenKind::Semicolon, "`;` after expression statement");
                Stmt::new(StmtKind::Expr(expr), pos)
            }
        }
    }

    fn parse_if_statement(&mut self, pos: gglang_diagnostics::Position) -> Stmt {
        self.advance();
        self.expect(&TokenKind::LParen, "`(` after `if`");
        let condition = self.parse_expression();
        self.expect(&TokenKind::RParen, "`)` after `if` condition");
        let then_branch = Box::new(self.parse_statement());
        let else_branch = if self.match_token(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()))
        } else {
            None
        };
        Stmt::new(StmtKind::If { condition, then_branch, else_branch }, pos)
    }

    fn parse_while_statement(&mut self, pos: gglang_diagnostics::Position) -> Stmt {
        self.advance();
        self.expect(&TokenKind::LParen, "`(` after `while`");
        let condition = self.parse_expression();
        self.expect(&TokenKind::RParen, "`)` after `while` condition");
        let body = Box::new(self.parse_statement());
        Stmt::new(StmtKind::While { condition, body }, pos)
    }

    fn parse_for_statement(&mut self, pos: gglang_diagnostics::Position) -> Stmt {
        self.advance();
        self.expect(&TokenKind::LParen, "`(` after `for`");

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else if self.looks_like_local_decl() {
            Some(Box::new(self.parse_var_decl_statement(self.position())))
        } else {
            let init_pos = self.position();
            let expr = self.parse_expression();
            self.expect(&TokenKind::Semicolon, "`;` after `for` initializer");
            Some(Box::new(Stmt::new(StmtKind::Expr(expr), init_pos)))
        };
        if init.is_none() {
            self.advance(); // consume the bare `;`
        }

        let condition = if !self.check(&TokenKind::Semicolon) {
            Some(self.parse_expression())
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon, "`;` after `for` condition");

        let step = if !self.check(&TokenKind::RParen) {
            Some(self.parse_expression())
        } else {
            None
        };
        self.expect(&TokenKind::RParen, "`)` after `for` clauses");

        let body = Box::new(self.parse_statement());
        Stmt::new(StmtKind::For { init, condition, step, body }, pos)
    }

    fn parse_foreach_statement(&mut self, pos: gglang_diagnostics::Position) -> Stmt {
        self.advance();
        self.expect(&TokenKind::LParen, "`(` after `foreach`");
        // Optional declared element type (`var` or a concrete type name) ahead of the binding name.
        if self.check(&TokenKind::Var) {
            self.advance();
        } else if self.at_type_start() && !self.check_at(1, &TokenKind::In) {
            self.parse_type_ref();
        }
        let var_name = self.expect_identifier("a loop variable name");
        self.expect(&TokenKind::In, "`in` in `foreach`");
        let iterable = self.parse_expression();
        self.expect(&TokenKind::RParen, "`)` after `foreach` clause");
        let body = Box::new(self.parse_statement());
        Stmt::new(StmtKind::Foreach { var_name, iterable, body }, pos)
    }

    /// Parses `var name (= expr)? ;` or `Type name (= expr)? ;`. Called
    /// only once [`Parser::looks_like_local_decl`] has confirmed the shape.
    fn parse_var_decl_statement(&mut self, pos: gglang_diagnostics::Position) -> Stmt {
        let declared_type = if self.match_token(&TokenKind::Var) {
            None
        } else {
            Some(self.parse_type_ref())
        };
        let name = self.expect_identifier("a variable name");
        let init = if self.match_token(&TokenKind::Eq) {
            Some(self.parse_expression())
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon, "`;` after variable declaration");
        Stmt::new(StmtKind::VarDecl { declared_type, name, init }, pos)
    }

    /// Bounded lookahead distinguishing `Foo x = ...;` from an expression
    /// statement like `foo.bar();`: `var`, a primitive type keyword, or two
    /// identifiers (optionally separated by `[]` or `?`) in a row all
    /// commit to a declaration.
    pub(crate) fn looks_like_local_decl(&self) -> bool {
        if self.check(&TokenKind::Var) {
            return true;
        }
        if self.at_type_start() && !matches!(self.peek(), TokenKind::Identifier(_)) {
            return true;
        }
        if matches!(self.peek(), TokenKind::Identifier(_)) {
            if self.check_at(1, &TokenKind::Identifier(String::new())) {
                return true;
            }
            if self.check_at(1, &TokenKind::LBracket)
                && self.check_at(2, &TokenKind::RBracket)
                && self.check_at(3, &TokenKind::Identifier(String::new()))
            {
                return true;
            }
            if self.check_at(1, &TokenKind::Question)
                && self.check_at(2, &TokenKind::Identifier(String::new()))
            {
                return true;
            }
        }
        false
    }
}
