//! Tokenizes gglang source text into a token stream plus a diagnostic bag.
//! Lexing never aborts: malformed constructs become an `Invalid` token and an
//! error diagnostic, and scanning continues to end-of-file.

mod line_index;
mod token;

use gglang_diagnostics::{error_codes, DiagnosticBag, Position};
use line_index::LineIndex;
use logos::Logos;

pub use token::{LexErrorKind, Token, TokenKind};

/// Lex `source` (optionally attributed to `file` for diagnostics) into an
/// ordered token sequence terminated by `TokenKind::Eof`, plus any lexical
/// diagnostics collected along the way.
pub fn lex(source: &str, file: Option<&str>) -> (Vec<Token>, DiagnosticBag) {
    let index = LineIndex::new(source);
    let mut bag = DiagnosticBag::new();
    let mut tokens = Vec::new();

    let mut lexer = TokenKind::lexer(source);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let (line, column) = index.line_col(span.start);
        match result {
            Ok(kind) => {
                let text = token_text(&kind, &source[span.clone()]);
                tokens.push(Token {
                    kind,
                    text,
                    line,
                    column,
                    file: file.map(str::to_string),
                });
            }
            Err(err_kind) => {
                let raw = &source[span.clone()];
                let message = format_error(err_kind, raw);
                let code = match err_kind {
                    LexErrorKind::UnexpectedCharacter => error_codes::UNEXPECTED_CHARACTER,
                    LexErrorKind::UnterminatedString => error_codes::UNTERMINATED_STRING,
                    LexErrorKind::UnterminatedChar => error_codes::UNTERMINATED_CHAR,
                    LexErrorKind::EmptyCharLiteral => error_codes::EMPTY_CHAR_LITERAL,
                    LexErrorKind::TooManyCharacters => error_codes::TOO_MANY_CHARACTERS,
                };
                let mut position = Position::new(line, column).with_length(span.len().max(1));
                if let Some(file) = file {
                    position = position.with_file(file);
                }
                bag.error(code, message, position);
                tokens.push(Token {
                    kind: TokenKind::Invalid,
                    text: raw.to_string(),
                    line,
                    column,
                    file: file.map(str::to_string),
                });
            }
        }
    }

    let (eof_line, eof_column) = index.line_col(source.len());
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: String::new(),
        line: eof_line,
        column: eof_column,
        file: file.map(str::to_string),
    });

    (tokens, bag)
}

fn token_text(kind: &TokenKind, raw: &str) -> String {
    match kind {
        TokenKind::IntLiteral(s)
        | TokenKind::FloatLiteral(s)
        | TokenKind::StringLiteral(s)
        | TokenKind::CharLiteral(s)
        | TokenKind::Identifier(s) => s.clone(),
        _ => raw.to_string(),
    }
}

fn format_error(kind: LexErrorKind, raw: &str) -> String {
    match kind {
        LexErrorKind::UnexpectedCharacter => {
            let c = raw.chars().next().unwrap_or('\u{FFFD}');
            if c.is_control() || !c.is_ascii_graphic() && c != ' ' {
                format!("unexpected character (U+{:04X})", c as u32)
            } else {
                format!("unexpected character '{c}'")
            }
        }
        LexErrorKind::UnterminatedString => "unterminated string literal".to_string(),
        LexErrorKind::UnterminatedChar => "unterminated character literal".to_string(),
        LexErrorKind::EmptyCharLiteral => "empty character literal".to_string(),
        LexErrorKind::TooManyCharacters => {
            let inner = raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')).unwrap_or(raw);
            format!(
                "too many characters in character literal; use double quotes: \"{inner}\""
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source, None).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn ends_with_eof() {
        let (tokens, _) = lex("class Foo {}", None);
        assert!(tokens.last().unwrap().is_eof());
    }

    #[test]
    fn keyword_has_correct_position() {
        let (tokens, _) = lex("  class", None);
        let class_tok = &tokens[0];
        assert_eq!(class_tok.kind, TokenKind::Class);
        assert_eq!(class_tok.line, 1);
        assert_eq!(class_tok.column, 3);
    }

    #[test]
    fn dot_after_int_is_not_part_of_float() {
        let ks = kinds("42.toString()");
        assert_eq!(
            ks,
            vec![
                TokenKind::IntLiteral("42".to_string()),
                TokenKind::Dot,
                TokenKind::Identifier("toString".to_string()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn float_literal_with_fraction() {
        let ks = kinds("3.14");
        assert_eq!(ks, vec![TokenKind::FloatLiteral("3.14".to_string()), TokenKind::Eof]);
    }

    #[test]
    fn float_suffix_without_dot() {
        let ks = kinds("42f");
        assert_eq!(ks, vec![TokenKind::FloatLiteral("42f".to_string()), TokenKind::Eof]);
    }

    #[test]
    fn long_suffix_stays_integer() {
        let ks = kinds("42L");
        assert_eq!(ks, vec![TokenKind::IntLiteral("42L".to_string()), TokenKind::Eof]);
    }

    #[test]
    fn underscores_are_discarded() {
        let ks = kinds("1_000_000");
        assert_eq!(ks, vec![TokenKind::IntLiteral("1000000".to_string()), TokenKind::Eof]);
    }

    #[test]
    fn empty_char_literal_errors() {
        let (_, bag) = lex("''", None);
        assert!(bag.has_errors());
        assert!(bag.diagnostics()[0].message.contains("empty character literal"));
    }

    #[test]
    fn multi_char_literal_errors_and_suggests_double_quotes() {
        let (_, bag) = lex("'teste'", None);
        assert!(bag.has_errors());
        let msg = &bag.diagnostics()[0].message;
        assert!(msg.contains("too many characters"));
        assert!(msg.contains("\"teste\""));
    }

    #[test]
    fn valid_char_literal_lexes_clean() {
        let (tokens, bag) = lex("'a'", None);
        assert!(!bag.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::CharLiteral("a".to_string()));
    }

    #[test]
    fn escaped_newline_char_literal() {
        let (tokens, bag) = lex(r"'\n'", None);
        assert!(!bag.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::CharLiteral("\n".to_string()));
    }

    #[test]
    fn unterminated_string_errors() {
        let (_, bag) = lex("\"hello", None);
        assert!(bag.has_errors());
        assert!(bag.diagnostics()[0].message.contains("unterminated string"));
    }

    #[test]
    fn string_with_embedded_newline_advances_line_counter() {
        let (tokens, bag) = lex("\"line one\nline two\" class", None);
        assert!(!bag.has_errors());
        assert_eq!(
            tokens[0].kind,
            TokenKind::StringLiteral("line one\nline two".to_string())
        );
        // `class` appears on the source's second physical line.
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn comments_are_skipped() {
        let ks = kinds("// a comment\nclass /* inline */ Foo {}");
        assert_eq!(
            ks,
            vec![
                TokenKind::Class,
                TokenKind::Identifier("Foo".to_string()),
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn compound_operators_are_longest_match() {
        let ks = kinds("a == b != c <= d >= e << f >> g && h || i ++ j -- k += l -= m *= n /= o => p");
        assert!(ks.contains(&TokenKind::EqEq));
        assert!(ks.contains(&TokenKind::NotEq));
        assert!(ks.contains(&TokenKind::LtEq));
        assert!(ks.contains(&TokenKind::GtEq));
        assert!(ks.contains(&TokenKind::Shl));
        assert!(ks.contains(&TokenKind::Shr));
        assert!(ks.contains(&TokenKind::AndAnd));
        assert!(ks.contains(&TokenKind::OrOr));
        assert!(ks.contains(&TokenKind::PlusPlus));
        assert!(ks.contains(&TokenKind::MinusMinus));
        assert!(ks.contains(&TokenKind::PlusEq));
        assert!(ks.contains(&TokenKind::MinusEq));
        assert!(ks.contains(&TokenKind::StarEq));
        assert!(ks.contains(&TokenKind::SlashEq));
        assert!(ks.contains(&TokenKind::FatArrow));
    }

    #[test]
    fn unexpected_character_is_recoverable() {
        let (tokens, bag) = lex("class Foo # { }", None);
        assert!(bag.has_errors());
        assert!(bag.diagnostics()[0].message.contains("unexpected character"));
        // Lexing continued past the bad byte to produce the rest of the stream.
        assert!(tokens.iter().any(|t| t.kind == TokenKind::LBrace));
        assert!(tokens.last().unwrap().is_eof());
    }

    #[test]
    fn every_keyword_lexes_with_trailing_space() {
        let keywords = [
            "int", "long", "byte", "short", "float", "double", "bool", "char", "string", "void",
            "if", "else", "while", "for", "foreach", "in", "return", "break", "continue",
            "module", "import", "class", "interface", "struct", "enum", "var", "new", "this",
            "base", "static", "public", "private", "protected", "abstract", "virtual",
            "override", "sealed", "readonly", "const", "as", "is", "match", "case", "default",
            "true", "false", "null",
        ];
        for kw in keywords {
            let source = format!("{kw} ");
            let (tokens, bag) = lex(&source, None);
            assert!(!bag.has_errors(), "keyword `{kw}` unexpectedly errored");
            assert_eq!(tokens[0].line, 1);
            assert_eq!(tokens[0].column, 1);
            assert_ne!(tokens[0].kind, TokenKind::Invalid, "keyword `{kw}` lexed as invalid");
        }
    }
}
