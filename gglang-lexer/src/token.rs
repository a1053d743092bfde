use logos::Logos;

/// Why a lexical rule failed to produce a token. The actual human-readable
/// message is built by the driver in `lib.rs`, which has access to the raw
/// source slice for the offending span — this enum only tags *which*
/// message template applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedChar,
    EmptyCharLiteral,
    TooManyCharacters,
}

fn strip_underscores(lex: &mut logos::Lexer<TokenKind>) -> String {
    lex.slice().chars().filter(|&c| c != '_').collect()
}

/// Resolve a single backslash-escape. Unknown escapes pass through literally
/// (backslash retained).
fn unescape_one(escaped: char) -> String {
    match escaped {
        'n' => "\n".to_string(),
        't' => "\t".to_string(),
        'r' => "\r".to_string(),
        '\\' => "\\".to_string(),
        '"' => "\"".to_string(),
        '\'' => "'".to_string(),
        '0' => "\0".to_string(),
        other => format!("\\{other}"),
    }
}

/// Manually scan a `"..."` string literal body. The opening `"` has already
/// been consumed by the triggering `#[token]` pattern; `lex.bump` extends the
/// match to cover the rest so the caller can later slice the raw source text
/// for diagnostics. A raw newline inside the literal is permitted (it simply
/// becomes part of the resolved text); line tracking for diagnostics is done
/// globally over the whole source, so no special bookkeeping is needed here.
fn scan_string(lex: &mut logos::Lexer<TokenKind>) -> Result<String, LexErrorKind> {
    let remainder = lex.remainder();
    let mut chars = remainder.chars();
    let mut consumed = 0usize;
    let mut result = String::new();

    loop {
        match chars.next() {
            None => {
                lex.bump(consumed);
                return Err(LexErrorKind::UnterminatedString);
            }
            Some('"') => {
                consumed += 1;
                lex.bump(consumed);
                return Ok(result);
            }
            Some('\\') => {
                consumed += 1;
                match chars.next() {
                    None => {
                        lex.bump(consumed);
                        return Err(LexErrorKind::UnterminatedString);
                    }
                    Some(esc) => {
                        consumed += esc.len_utf8();
                        result.push_str(&unescape_one(esc));
                    }
                }
            }
            Some(c) => {
                consumed += c.len_utf8();
                result.push(c);
            }
        }
    }
}

/// Manually scan a `'...'` char literal body, validating that it contains
/// exactly one logical (post-escape) character.
fn scan_char(lex: &mut logos::Lexer<TokenKind>) -> Result<String, LexErrorKind> {
    let remainder = lex.remainder();
    let mut chars = remainder.chars().peekable();

    if chars.peek() == Some(&'\'') {
        lex.bump(1);
        return Err(LexErrorKind::EmptyCharLiteral);
    }

    let mut consumed = 0usize;
    let first = match chars.next() {
        None => return Err(LexErrorKind::UnterminatedChar),
        Some(c) => c,
    };
    consumed += first.len_utf8();

    let logical = if first == '\\' {
        match chars.next() {
            None => {
                lex.bump(consumed);
                return Err(LexErrorKind::UnterminatedChar);
            }
            Some(esc) => {
                consumed += esc.len_utf8();
                unescape_one(esc)
            }
        }
    } else {
        first.to_string()
    };

    match chars.next() {
        Some('\'') => {
            consumed += 1;
            lex.bump(consumed);
            if logical.chars().count() == 1 {
                Ok(logical)
            } else {
                Err(LexErrorKind::TooManyCharacters)
            }
        }
        Some(extra) => {
            consumed += extra.len_utf8();
            let mut saw_close = false;
            for c in chars {
                if c == '\'' {
                    consumed += 1;
                    saw_close = true;
                    break;
                }
                if c == '\n' {
                    break;
                }
                consumed += c.len_utf8();
            }
            lex.bump(consumed);
            if saw_close {
                Err(LexErrorKind::TooManyCharacters)
            } else {
                Err(LexErrorKind::UnterminatedChar)
            }
        }
        None => {
            lex.bump(consumed);
            Err(LexErrorKind::UnterminatedChar)
        }
    }
}

/// The closed token tag set: keywords, punctuation, literals, identifier,
/// end-of-file, invalid.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    // Type keywords
    #[token("int")]
    Int,
    #[token("long")]
    Long,
    #[token("byte")]
    Byte,
    #[token("short")]
    Short,
    #[token("float")]
    Float,
    #[token("double")]
    Double,
    #[token("bool")]
    Bool,
    #[token("char")]
    CharKw,
    #[token("string")]
    StringKw,
    #[token("void")]
    Void,

    // Control flow
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("foreach")]
    Foreach,
    #[token("in")]
    In,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,

    // Declarations
    #[token("module")]
    Module,
    #[token("import")]
    Import,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("struct")]
    Struct,
    #[token("enum")]
    Enum,
    #[token("var")]
    Var,
    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("base")]
    Base,
    #[token("static")]
    Static,
    #[token("public")]
    Public,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("abstract")]
    Abstract,
    #[token("virtual")]
    Virtual,
    #[token("override")]
    Override,
    #[token("sealed")]
    Sealed,
    #[token("readonly")]
    Readonly,
    #[token("const")]
    Const,
    #[token("as")]
    As,
    #[token("is")]
    Is,
    #[token("match")]
    Match,
    #[token("case")]
    Case,
    #[token("default")]
    Default,

    // Literal keywords
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Literals
    #[regex(r"[0-9][0-9_]*(?:\.[0-9][0-9_]*[fFdD]?|[fFdD])", strip_underscores)]
    FloatLiteral(String),
    #[regex(r"[0-9][0-9_]*[lL]?", strip_underscores)]
    IntLiteral(String),
    #[token("\"", scan_string)]
    StringLiteral(String),
    #[token("'", scan_char)]
    CharLiteral(String),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Punctuation and operators (compound operators listed before their
    // single-character prefixes so longest-match reflects the grammar's
    // intent even though logos's maximal munch would pick them regardless)
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("=>")]
    FatArrow,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("?")]
    Question,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("@")]
    At,

    /// Never produced by logos directly: appended once per lexed run.
    Eof,
    /// Stands in for a span that failed to lex; the accompanying diagnostic
    /// carries the detail.
    Invalid,
}

impl TokenKind {
    /// Exact match on an identifier promotes it to a keyword token — used
    /// nowhere in practice since logos resolves this at the regex level, but
    /// kept for tooling (e.g. a formatter) that needs to ask "is this word
    /// reserved?".
    pub fn keyword_from_str(word: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match word {
            "int" => Int,
            "long" => Long,
            "byte" => Byte,
            "short" => Short,
            "float" => Float,
            "double" => Double,
            "bool" => Bool,
            "char" => CharKw,
            "string" => StringKw,
            "void" => Void,
            "if" => If,
            "else" => Else,
            "while" => While,
            "for" => For,
            "foreach" => Foreach,
            "in" => In,
            "return" => Return,
            "break" => Break,
            "continue" => Continue,
            "module" => Module,
            "import" => Import,
            "class" => Class,
            "interface" => Interface,
            "struct" => Struct,
            "enum" => Enum,
            "var" => Var,
            "new" => New,
            "this" => This,
            "base" => Base,
            "static" => Static,
            "public" => Public,
            "private" => Private,
            "protected" => Protected,
            "abstract" => Abstract,
            "virtual" => Virtual,
            "override" => Override,
            "sealed" => Sealed,
            "readonly" => Readonly,
            "const" => Const,
            "as" => As,
            "is" => Is,
            "match" => Match,
            "case" => Case,
            "default" => Default,
            "true" => True,
            "false" => False,
            "null" => Null,
            _ => return None,
        })
    }
}

/// A lexed token: tag, textual value, and 1-based source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub file: Option<String>,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
