use pretty_assertions::assert_eq;

use super::*;

/// Token texts, with inserted semicolons shown as `⏎`.
fn texts(source: &str) -> Vec<String> {
    let lexed = lex(source).unwrap_or_else(|e| panic!("lex failed: {e}"));
    lexed
        .tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| {
            if t.is_auto_semi() {
                "⏎".to_string()
            } else {
                source[t.span.to_range()].to_string()
            }
        })
        .collect()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .unwrap_or_else(|e| panic!("lex failed: {e}"))
        .tokens
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_semicolon_insertion() {
    assert_eq!(
        texts("type T struct {\n\ta int\n}\n"),
        vec!["type", "T", "struct", "{", "a", "int", "⏎", "}", "⏎"]
    );
}

#[test]
fn test_no_semicolon_after_operators_and_keywords() {
    assert_eq!(texts("x :=\n1\nfunc\n"), vec!["x", ":=", "1", "⏎", "func"]);
    assert_eq!(texts("return\n"), vec!["return", "⏎"]);
    assert_eq!(texts("a++\nb)\n"), vec!["a", "++", "⏎", "b", ")", "⏎"]);
}

#[test]
fn test_semicolon_at_eof() {
    assert_eq!(texts("package a"), vec!["package", "a", "⏎"]);
}

#[test]
fn test_explicit_semicolon() {
    let lexed = lex("a; b").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(lexed.tokens[1].kind, TokenKind::Semi);
    assert!(!lexed.tokens[1].is_auto_semi());
}

#[test]
fn test_comments_are_separate() {
    let source = "// head\npackage a // trailing\n/* block */ type T int\n";
    let lexed = lex(source).unwrap_or_else(|e| panic!("{e}"));
    let comments: Vec<&str> = lexed
        .comments
        .iter()
        .map(|c| &source[c.span.to_range()])
        .collect();
    assert_eq!(comments, vec!["// head", "// trailing", "/* block */"]);
    assert_eq!(lexed.comments[2].line, 3);
    assert_eq!(texts(source), vec!["package", "a", "⏎", "type", "T", "int", "⏎"]);
}

#[test]
fn test_multiline_block_comment_acts_as_newline() {
    let source = "a /* one\ntwo */ b\n";
    assert_eq!(texts(source), vec!["a", "⏎", "b", "⏎"]);
    let lexed = lex(source).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!((lexed.comments[0].line, lexed.comments[0].end_line), (1, 2));
    assert_eq!(lexed.tokens[2].line, 2);
}

#[test]
fn test_crlf_line_comment_excludes_cr() {
    let source = "a // c\r\nb";
    let lexed = lex(source).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(&source[lexed.comments[0].span.to_range()], "// c");
}

#[test]
fn test_literals() {
    use TokenKind::*;
    assert_eq!(
        kinds("1 0x1F 1.5 1e9 0x1p-2 2i 'a' \"s\\\"\" `raw`"),
        vec![Int, Int, Float, Float, Float, Imag, Rune, String, String, Semi, Eof]
    );
    assert_eq!(texts("1e+5-2"), vec!["1e+5", "-", "2", "⏎"]);
    assert_eq!(texts("0x1e+2"), vec!["0x1e", "+", "2", "⏎"]);
}

#[test]
fn test_raw_string_spans_lines() {
    let source = "`a\nb` x\ny";
    let lexed = lex(source).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!((lexed.tokens[0].line, lexed.tokens[0].end_line), (1, 2));
    assert_eq!(lexed.tokens[1].line, 2);
    assert_eq!(lexed.tokens[3].line, 3);
}

#[test]
fn test_unicode_identifiers() {
    assert_eq!(texts("größe int"), vec!["größe", "int", "⏎"]);
}

#[test]
fn test_longest_operator_wins() {
    assert_eq!(texts("a <<= b <- c ... d"), vec!["a", "<<=", "b", "<-", "c", "...", "d", "⏎"]);
}

#[test]
fn test_byte_order_mark_skipped() {
    assert_eq!(texts("\u{feff}package a"), vec!["package", "a", "⏎"]);
}

#[test]
fn test_errors() {
    assert_eq!(
        lex("x := \"open\n"),
        Err(LexError::UnterminatedString { line: 1 })
    );
    assert_eq!(lex("\n'a"), Err(LexError::UnterminatedRune { line: 2 }));
    assert_eq!(lex("`open"), Err(LexError::UnterminatedRawString { line: 1 }));
    assert_eq!(lex("/* open"), Err(LexError::UnterminatedComment { line: 1 }));
    assert_eq!(
        lex("a @ b"),
        Err(LexError::UnexpectedChar { ch: '@', line: 1 })
    );
}
