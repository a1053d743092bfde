use super::Parser;
use gglang_ast::{AssignOp, BinaryOp, Expr, ExprKind, IncDecOp, UnaryOp};
use gglang_diagnostics::error_codes;
use gglang_lexer::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expression(&mut self) -> Expr {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Expr {
        let pos = self.position();
        let target = self.parse_logical_or();

        let op = match self.peek() {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::AddAssign),
            TokenKind::MinusEq => Some(AssignOp::SubAssign),
            TokenKind::StarEq => Some(AssignOp::MulAssign),
            TokenKind::SlashEq => Some(AssignOp::DivAssign),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let value = self.parse_assignment();
            return Expr::new(
                ExprKind::Assign { op, target: Box::new(target), value: Box::new(value) },
                pos,
            );
        }

        target
    }

    fn parse_logical_or(&mut self) -> Expr {
        let mut expr = self.parse_logical_and();
        while self.check(&TokenKind::OrOr) {
            let pos = self.position();
            self.advance();
            let right = self.parse_logical_and();
            expr = Expr::new(
                ExprKind::Binary { op: BinaryOp::Or, left: Box::new(expr), right: Box::new(right) },
                pos,
            );
        }
        expr
    }

    fn parse_logical_and(&mut self) -> Expr {
        let mut expr = self.parse_bit_or();
        while self.check(&TokenKind::AndAnd) {
            let pos = self.position();
            self.advance();
            let right = self.parse_bit_or();
            expr = Expr::new(
                ExprKind::Binary { op: BinaryOp::And, left: Box::new(expr), right: Box::new(right) },
                pos,
            );
        }
        expr
    }

    fn parse_bit_or(&mut self) -> Expr {
        let mut expr = self.parse_bit_xor();
        while self.check(&TokenKind::Pipe) {
            let pos = self.position();
            self.advance();
            let right = self.parse_bit_xor();
            expr = Expr::new(
                ExprKind::Binary { op: BinaryOp::BitOr, left: Box::new(expr), right: Box::new(right) },
                pos,
            );
        }
        expr
    }

    fn parse_bit_xor(&mut self) -> Expr {
        let mut expr = self.parse_bit_and();
        while self.check(&TokenKind::Caret) {
            let pos = self.position();
            self.advance();
            let right = self.parse_bit_and();
            expr = Expr::new(
                ExprKind::Binary { op: BinaryOp::BitXor, left: Box::new(expr), right: Box::new(right) },
                pos,
            );
        }
        expr
    }

    fn parse_bit_and(&mut self) -> Expr {
        let mut expr = self.parse_equality();
        while self.check(&TokenKind::Amp) {
            let pos = self.position();
            self.advance();
            let right = self.parse_equality();
            expr = Expr::new(
                ExprKind::Binary { op: BinaryOp::BitAnd, left: Box::new(expr), right: Box::new(right) },
                pos,
            );
        }
        expr
    }

    fn parse_equality(&mut self) -> Expr {
        let mut expr = self.parse_relational();
        loop {
            let op = match self.peek() {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                _ => break,
            };
            let pos = self.position();
            self.advance();
            let right = self.parse_relational();
            expr = Expr::new(ExprKind::Binary { op, left: Box::new(expr), right: Box::new(right) }, pos);
        }
        expr
    }

    fn parse_relational(&mut self) -> Expr {
        let mut expr = self.parse_shift();
        loop {
            let op = match self.peek() {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => break,
            };
            let pos = self.position();
            self.advance();
            let right = self.parse_shift();
            expr = Expr::new(ExprKind::Binary { op, left: Box::new(expr), right: Box::new(right) }, pos);
        }
        expr
    }

    fn parse_shift(&mut self) -> Expr {
        let mut expr = self.parse_additive();
        loop {
            let op = match self.peek() {
                TokenKind::Shl => BinaryOp::Shl,
                TokenKind::Shr => BinaryOp::Shr,
                _ => break,
            };
            let pos = self.position();
            self.advance();
            let right = self.parse_additive();
            expr = Expr::new(ExprKind::Binary { op, left: Box::new(expr), right: Box::new(right) }, pos);
        }
        expr
    }

    fn parse_additive(&mut self) -> Expr {
        let mut expr = self.parse_multiplicative();
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let pos = self.position();
            self.advance();
            let right = self.parse_multiplicative();
            expr = Expr::new(ExprKind::Binary { op, left: Box::new(expr), right: Box::new(right) }, pos);
        }
        expr
    }

    fn parse_multiplicative(&mut self) -> Expr {
        let mut expr = self.parse_unary();
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            let pos = self.position();
            self.advance();
            let right = self.parse_unary();
            expr = Expr::new(ExprKind::Binary { op, left: Box::new(expr), right: Box::new(right) }, pos);
        }
        expr
    }

    fn parse_unary(&mut self) -> Expr {
        let pos = self.position();
        let op = match self.peek() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary();
            return Expr::new(ExprKind::Unary { op, operand: Box::new(operand) }, pos);
        }

        if self.check(&TokenKind::PlusPlus) || self.check(&TokenKind::MinusMinus) {
            let op = if self.check(&TokenKind::PlusPlus) { IncDecOp::Inc } else { IncDecOp::Dec };
            self.advance();
            let operand = self.parse_unary();
            return Expr::new(
                ExprKind::IncDec { op, operand: Box::new(operand), is_prefix: true },
                pos,
            );
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Expr {
        let mut expr = self.parse_primary();
        loop {
            if self.match_token(&TokenKind::Dot) {
                let pos = self.position();
                let member = self.expect_identifier("a member name after `.`");
                expr = Expr::new(ExprKind::MemberAccess { target: Box::new(expr), member }, pos);
            } else if self.check(&TokenKind::LParen) {
                let pos = self.position();
                self.advance();
                let args = self.parse_argument_list();
                self.expect(&TokenKind::RParen, "`)` to close argument list");
                expr = Expr::new(ExprKind::Call { callee: Box::new(expr), args }, pos);
            } else if self.check(&TokenKind::LBracket) {
                let pos = self.position();
                self.advance();
                let index = self.parse_expression();
                self.expect(&TokenKind::RBracket, "`]` to close index expression");
                expr = Expr::new(ExprKind::Index { target: Box::new(expr), index: Box::new(index) }, pos);
            } else if self.check(&TokenKind::PlusPlus) || self.check(&TokenKind::MinusMinus) {
                let pos = self.position();
                let op = if self.check(&TokenKind::PlusPlus) { IncDecOp::Inc } else { IncDecOp::Dec };
                self.advance();
                expr = Expr::new(
                    ExprKind::IncDec { op, operand: Box::new(expr), is_prefix: false },
                    pos,
                );
            } else if self.match_token(&TokenKind::As) {
                let pos = self.position();
                let target_type = self.parse_type_ref();
                expr = Expr::new(ExprKind::Cast { target_type, operand: Box::new(expr) }, pos);
            } else {
                break;
            }
        }
        expr
    }

    fn parse_argument_list(&mut self) -> Vec<Expr> {
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression());
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        args
    }

    fn parse_primary(&mut self) -> Expr {
        let pos = self.position();
        match self.peek().clone() {
            TokenKind::IntLiteral(text) => {
                self.advance();
                parse_int_literal(&text, pos.clone())
            }
            TokenKind::FloatLiteral(text) => {
                self.advance();
                parse_float_literal(&text, pos.clone())
            }
            TokenKind::StringLiteral(s) => {
                self.advance();
                Expr::new(ExprKind::StringLiteral(s), pos)
            }
            TokenKind::CharLiteral(s) => {
                self.advance();
                let c = s.chars().next().unwrap_or('\0');
                Expr::new(ExprKind::CharLiteral(c), pos)
            }
            TokenKind::True => {
                self.advance();
                Expr::new(ExprKind::BoolLiteral(true), pos)
            }
            TokenKind::False => {
                self.advance();
                Expr::new(ExprKind::BoolLiteral(false), pos)
            }
            TokenKind::Null => {
                self.advance();
                Expr::new(ExprKind::Null, pos)
            }
            TokenKind::This => {
                self.advance();
                Expr::new(ExprKind::This, pos)
            }
            TokenKind::Base => {
                self.advance();
                Expr::new(ExprKind::Base, pos)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Expr::new(ExprKind::Identifier(name), pos)
            }
            TokenKind::New => {
                self.advance();
                self.parse_new_expr(pos)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression();
                self.expect(&TokenKind::RParen, "`)` to close parenthesized expression");
                Expr::new(ExprKind::Grouping(Box::new(inner)), pos)
            }
            _ => {
                self.error_at_current(
                    error_codes::EXPRESSION_EXPECTED,
                    format!("expected an expression, found `{}`", self.describe_current()),
                );
                self.advance();
                Expr::new(ExprKind::Null, pos)
            }
        }
    }

    /// `new Type(args...)` or `new Type[size]`. `Type` may be dotted
    /// (`new Foo.Bar(...)`), same as an import path.
    fn parse_new_expr(&mut self, pos: gglang_diagnostics::Position) -> Expr {
        let mut segments = vec![self.expect_identifier("a type name after `new`")];
        while self.match_token(&TokenKind::Dot) {
            segments.push(self.expect_identifier("a type name segment"));
        }
        let type_name = segments.join(".");
        if self.match_token(&TokenKind::LBracket) {
            let size = self.parse_expression();
            self.expect(&TokenKind::RBracket, "`]` to close array size");
            let element_type = gglang_ast::TypeRef::simple(type_name, pos.clone());
            Expr::new(ExprKind::NewArray { element_type, size: Box::new(size) }, pos)
        } else {
            self.expect(&TokenKind::LParen, "`(` to open constructor arguments");
            let args = self.parse_argument_list();
            self.expect(&TokenKind::RParen, "`)` to close constructor arguments");
            Expr::new(ExprKind::New { type_name, args }, pos)
        }
    }
}

fn parse_int_literal(text: &str, pos: gglang_diagnostics::Position) -> Expr {
    let (digits, is_long) = match text.strip_suffix(['l', 'L']) {
        Some(stripped) => (stripped, true),
        None => (text, false),
    };
    let value: i64 = digits.parse().unwrap_or(0);
    let kind = if is_long { ExprKind::LongLiteral(value) } else { ExprKind::IntLiteral(value) };
    Expr::new(kind, pos)
}

fn parse_float_literal(text: &str, pos: gglang_diagnostics::Position) -> Expr {
    if let Some(stripped) = text.strip_suffix(['f', 'F']) {
        let value: f64 = stripped.parse().unwrap_or(0.0);
        return Expr::new(ExprKind::FloatLiteral(value), pos);
    }
    let stripped = text.strip_suffix(['d', 'D']).unwrap_or(text);
    let value: f64 = stripped.parse().unwrap_or(0.0);
    Expr::new(ExprKind::DoubleLiteral(value), pos)
}
