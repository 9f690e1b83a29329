//! Tokens and comments.

use realign_ir::Span;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Identifiers and keywords.
    Ident,
    Int,
    Float,
    Imag,
    Rune,
    /// Interpreted or raw string literal.
    String,
    /// Operators and delimiters other than `;`.
    Op,
    /// An explicit `;` or one inserted at a line end (empty span).
    Semi,
    Eof,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the first byte.
    pub line: u32,
    /// 1-based line of the last byte; differs from `line` only for raw
    /// strings.
    pub end_line: u32,
}

impl Token {
    /// Whether this is a semicolon the lexer inserted at a line end.
    #[inline]
    pub fn is_auto_semi(&self) -> bool {
        self.kind == TokenKind::Semi && self.span.is_empty()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Comment {
    /// From `//` or `/*` through the end of the comment, excluding any
    /// line terminator.
    pub span: Span,
    pub line: u32,
    pub end_line: u32,
}

/// Go's reserved words.
pub const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

#[inline]
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}
