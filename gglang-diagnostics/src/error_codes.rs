//! Stable diagnostic codes, grouped by phase. A future driver or IDE
//! integration can key behavior off a code rather than matching message text.

// Lexical errors (E00xx)
pub const UNEXPECTED_CHARACTER: &str = "E0001";
pub const UNTERMINATED_STRING: &str = "E0002";
pub const UNTERMINATED_CHAR: &str = "E0003";
pub const EMPTY_CHAR_LITERAL: &str = "E0004";
pub const TOO_MANY_CHARACTERS: &str = "E0005";

// Parse errors (E01xx)
pub const UNEXPECTED_TOKEN: &str = "E0100";
pub const EXPECTED_TOKEN: &str = "E0101";
pub const EXPRESSION_EXPECTED: &str = "E0102";

// Semantic errors (E02xx)
pub const DUPLICATE_TYPE: &str = "E0200";
pub const DUPLICATE_FIELD: &str = "E0201";
pub const DUPLICATE_PARAMETER: &str = "E0202";
pub const DUPLICATE_VARIABLE: &str = "E0203";
pub const UNDEFINED_BASE_CLASS: &str = "E0204";
pub const MISSING_TYPE_AND_INITIALIZER: &str = "E0205";
pub const TYPE_MISMATCH: &str = "E0206";
pub const ANNOTATION_ARITY: &str = "E0207";
pub const CONFLICTING_ANNOTATIONS: &str = "E0208";
pub const USE_OF_REMOVED: &str = "E0209";
pub const REMOVED_DECLARATION: &str = "E0210";

// Semantic warnings (W0xxx)
pub const UNDEFINED_IDENTIFIER: &str = "W0001";
pub const UNKNOWN_TYPE_IN_NEW: &str = "W0002";
pub const USE_OF_DEPRECATED: &str = "W0003";

// Semantic info (I0xxx)
pub const DEPRECATED_DECLARATION: &str = "I0001";
