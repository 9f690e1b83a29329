//! Go lexer.
//!
//! Produces the token stream with semicolons inserted at line ends the way
//! the Go language requires, plus a separate list of comments. Only
//! the token classes the type-declaration parser cares about are told apart;
//! numeric literal syntax is scanned leniently.

use memchr::{memchr, memchr_iter, memmem};
use realign_ir::Span;

use crate::error::LexError;
use crate::token::{is_keyword, Comment, Token, TokenKind};

/// Operators, longest first so a prefix never shadows a longer match.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "+", "-", "*", "/", "%", "&", "|",
    "^", "<", ">", "=", "!", "(", ")", "[", "]", "{", "}", ",", ".", ":", "~",
];

/// The lexer's output.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Lexed {
    /// Always ends with a single [`TokenKind::Eof`].
    pub tokens: Vec<Token>,
    /// In source order.
    pub comments: Vec<Comment>,
}

/// Tokenize a Go source file.
pub fn lex(source: &str) -> Result<Lexed, LexError> {
    Span::try_from_range(0..source.len())?;
    Lexer::new(source).run()
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    out: Lexed,
}

/// Offsets are checked against `u32::MAX` once up front.
#[expect(
    clippy::cast_possible_truncation,
    reason = "source length checked in lex()"
)]
fn span(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "line counts are bounded by the source length"
)]
fn count_newlines(bytes: &[u8]) -> u32 {
    memchr_iter(b'\n', bytes).count() as u32
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer {
            src,
            bytes: src.as_bytes(),
            // A leading byte order mark is not part of the source.
            pos: if src.starts_with('\u{feff}') { 3 } else { 0 },
            line: 1,
            out: Lexed::default(),
        }
    }

    fn run(mut self) -> Result<Lexed, LexError> {
        loop {
            let Some(&b) = self.bytes.get(self.pos) else {
                self.insert_semi();
                self.push(TokenKind::Eof, self.pos, self.pos);
                return Ok(self.out);
            };
            let next = self.bytes.get(self.pos + 1).copied();
            match b {
                b'\n' => {
                    self.insert_semi();
                    self.pos += 1;
                    self.line += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'/' if next == Some(b'/') => self.line_comment(),
                b'/' if next == Some(b'*') => self.block_comment()?,
                b'"' => self.quoted(b'"', TokenKind::String)?,
                b'\'' => self.quoted(b'\'', TokenKind::Rune)?,
                b'`' => self.raw_string()?,
                b'0'..=b'9' => self.number(),
                b'.' if next.is_some_and(|n| n.is_ascii_digit()) => self.number(),
                b';' => {
                    self.push(TokenKind::Semi, self.pos, self.pos + 1);
                    self.pos += 1;
                }
                _ => {
                    let c = self.src[self.pos..].chars().next().unwrap_or('\0');
                    if is_ident_start(c) {
                        self.ident();
                    } else {
                        self.operator(c)?;
                    }
                }
            }
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.out.tokens.push(Token {
            kind,
            span: span(start, end),
            line: self.line,
            end_line: self.line,
        });
    }

    /// Insert a semicolon at the current position if the line's final
    /// token calls for one.
    fn insert_semi(&mut self) {
        let Some(last) = self.out.tokens.last() else {
            return;
        };
        let needed = match last.kind {
            TokenKind::Ident => {
                let text = &self.src[last.span.to_range()];
                !is_keyword(text)
                    || matches!(text, "break" | "continue" | "fallthrough" | "return")
            }
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::Imag
            | TokenKind::Rune
            | TokenKind::String => true,
            TokenKind::Op => matches!(
                &self.src[last.span.to_range()],
                ")" | "]" | "}" | "++" | "--"
            ),
            TokenKind::Semi | TokenKind::Eof => false,
        };
        if needed {
            self.push(TokenKind::Semi, self.pos, self.pos);
        }
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        let end = memchr(b'\n', &self.bytes[start..]).map_or(self.bytes.len(), |i| start + i);
        // A trailing `\r` belongs to the line ending, not the comment.
        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };
        self.out.comments.push(Comment {
            span: span(start, text_end),
            line: self.line,
            end_line: self.line,
        });
        self.pos = end;
    }

    fn block_comment(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let Some(close) = memmem::find(&self.bytes[start + 2..], b"*/") else {
            return Err(LexError::UnterminatedComment { line: self.line });
        };
        let end = start + 2 + close + 2;
        let newlines = count_newlines(&self.bytes[start..end]);
        if newlines > 0 {
            // A comment spanning lines acts like a newline.
            self.insert_semi();
        }
        self.out.comments.push(Comment {
            span: span(start, end),
            line: self.line,
            end_line: self.line + newlines,
        });
        self.line += newlines;
        self.pos = end;
        Ok(())
    }

    fn quoted(&mut self, quote: u8, kind: TokenKind) -> Result<(), LexError> {
        let start = self.pos;
        let mut i = start + 1;
        loop {
            match self.bytes.get(i) {
                Some(b'\\') => i += 2,
                Some(&b) if b == quote => break,
                Some(b'\n') | None => {
                    let line = self.line;
                    return Err(if kind == TokenKind::Rune {
                        LexError::UnterminatedRune { line }
                    } else {
                        LexError::UnterminatedString { line }
                    });
                }
                Some(_) => i += 1,
            }
        }
        self.push(kind, start, i + 1);
        self.pos = i + 1;
        Ok(())
    }

    fn raw_string(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let Some(close) = memchr(b'`', &self.bytes[start + 1..]) else {
            return Err(LexError::UnterminatedRawString { line: self.line });
        };
        let end = start + 1 + close + 1;
        let newlines = count_newlines(&self.bytes[start..end]);
        self.out.tokens.push(Token {
            kind: TokenKind::String,
            span: span(start, end),
            line: self.line,
            end_line: self.line + newlines,
        });
        self.line += newlines;
        self.pos = end;
        Ok(())
    }

    fn number(&mut self) {
        let start = self.pos;
        let hex = self.bytes[start..].starts_with(b"0x") || self.bytes[start..].starts_with(b"0X");
        let (exp_lo, exp_hi) = if hex { (b'p', b'P') } else { (b'e', b'E') };

        let mut kind = TokenKind::Int;
        let mut i = start;
        while let Some(&b) = self.bytes.get(i) {
            match b {
                b'.' => kind = TokenKind::Float,
                b'+' | b'-' if i > start && [exp_lo, exp_hi].contains(&self.bytes[i - 1]) => {}
                b if b == exp_lo || b == exp_hi => kind = TokenKind::Float,
                b if b.is_ascii_alphanumeric() || b == b'_' => {}
                _ => break,
            }
            i += 1;
        }
        if self.bytes[i - 1] == b'i' {
            kind = TokenKind::Imag;
        }
        self.push(kind, start, i);
        self.pos = i;
    }

    fn ident(&mut self) {
        let start = self.pos;
        let len: usize = self.src[start..]
            .chars()
            .take_while(|&c| is_ident_continue(c))
            .map(char::len_utf8)
            .sum();
        self.push(TokenKind::Ident, start, start + len);
        self.pos = start + len;
    }

    fn operator(&mut self, c: char) -> Result<(), LexError> {
        let rest = &self.src[self.pos..];
        let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(*op)) else {
            return Err(LexError::UnexpectedChar {
                ch: c,
                line: self.line,
            });
        };
        self.push(TokenKind::Op, self.pos, self.pos + op.len());
        self.pos += op.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests;
