//! Recursive-descent parser turning a `gglang_lexer` token stream into a
//! `gglang_ast::CompilationUnit`.
//!
//! Parsing never aborts on the first bad token: a syntax error is recorded
//! into the shared diagnostic bag and the parser advances past the
//! offending token to resynchronize at the next likely boundary.

mod parser;

pub use parser::Parser;

use thiserror::Error;

/// A structural failure that stops parsing entirely. Reserved for cases
/// where no reasonable AST can be produced at all (e.g. an empty token
/// stream); ordinary syntax mistakes are recoverable diagnostics instead.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unexpected end of file while parsing {context}")]
    UnexpectedEof { context: String },
}

/// Parse `source` into a compilation unit plus any diagnostics collected
/// along the way (lexical errors from `gglang_lexer` are folded in first).
pub fn parse(source: &str, file: Option<&str>) -> (gglang_ast::CompilationUnit, gglang_diagnostics::DiagnosticBag) {
    let (tokens, mut bag) = gglang_lexer::lex(source, file);
    let mut parser = Parser::new(tokens, file);
    let unit = parser.parse_compilation_unit();
    bag.extend(parser.into_diagnostics());
    (unit, bag)
}
