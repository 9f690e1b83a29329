//! Type-declaration parser.
//!
//! Walks the token stream looking for `type` and `const` declarations at any
//! depth (top level or inside function bodies) and for struct types written
//! anywhere else, such as `var v struct { ... }`. Everything else is skipped
//! token by token, so function bodies and expressions never need to parse.
//!
//! Every struct type literal becomes a [`StructSite`], including those
//! nested inside another type. A site carries the name, type parameters
//! and doc of the declaration it appears in.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::ast::{ArrayLen, FieldDecl, StructSite, TypeDecl, TypeExpr};
use crate::error::ParseError;
use crate::lexer::Lexed;
use crate::token::{is_keyword, Comment, Token, TokenKind};

/// Everything the front end extracts from one file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Module {
    /// Comments before the `package` clause.
    pub header_comments: Vec<String>,
    /// The package name.
    pub package: String,
    pub decls: Vec<TypeDecl>,
    /// Package-level constants declared as a single integer literal.
    pub consts: FxHashMap<String, u64>,
    /// The same, declared inside function bodies.
    pub local_consts: FxHashMap<String, u64>,
    /// Struct type literals ordered by position.
    pub structs: Vec<StructSite>,
}

/// The declaration new struct sites belong to.
#[derive(Clone, Debug, Default)]
struct SiteContext {
    name: String,
    params: Vec<String>,
    doc: Vec<String>,
}

pub struct Parser<'a> {
    src: &'a str,
    tokens: &'a [Token],
    comments: &'a [Comment],
    pos: usize,
    /// Brace nesting outside declarations; non-zero inside function bodies.
    depth: usize,
    context: SiteContext,
    sites: Vec<StructSite>,
}

/// Parse a Go integer literal (any base, with `_` separators).
pub(crate) fn parse_int(text: &str) -> Option<u64> {
    let clean: String = text
        .chars()
        .filter(|&c| c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let (digits, radix) = if let Some(d) = clean.strip_prefix("0x") {
        (d, 16)
    } else if let Some(d) = clean.strip_prefix("0b") {
        (d, 2)
    } else if let Some(d) = clean.strip_prefix("0o") {
        (d, 8)
    } else if clean.len() > 1 && clean.starts_with('0') {
        (&clean[1..], 8)
    } else {
        (clean.as_str(), 10)
    };
    u64::from_str_radix(digits, radix).ok()
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, lexed: &'a Lexed) -> Self {
        Parser {
            src,
            tokens: &lexed.tokens,
            comments: &lexed.comments,
            pos: 0,
            depth: 0,
            context: SiteContext::default(),
            sites: Vec::new(),
        }
    }

    pub fn parse_module(mut self) -> Result<Module, ParseError> {
        let mut module = Module::default();
        if !self.at("package") {
            return Err(ParseError::MissingPackage);
        }
        let package_start = self.peek().span.start;
        module.header_comments = self
            .comments
            .iter()
            .take_while(|c| c.span.end <= package_start)
            .map(|c| self.comment_text(c).to_string())
            .collect();
        self.bump();
        module.package = self.expect_ident()?.to_string();

        while self.peek().kind != TokenKind::Eof {
            if self.at("type") && !self.after_type_switch() {
                let keyword = self.bump();
                self.type_decl(keyword, &mut module)?;
            } else if self.at("const") {
                self.bump();
                let consts = if self.depth == 0 {
                    &mut module.consts
                } else {
                    &mut module.local_consts
                };
                self.const_decl(consts);
            } else if self.at("struct") && self.is_at(self.pos + 1, "{") {
                self.free_struct();
            } else {
                if self.at("{") {
                    self.depth += 1;
                } else if self.at("}") {
                    self.depth = self.depth.saturating_sub(1);
                }
                self.bump();
            }
        }
        module.structs = std::mem::take(&mut self.sites);
        module.structs.sort_by_key(|site| site.keyword);

        tracing::trace!(
            decls = module.decls.len(),
            structs = module.structs.len(),
            "parsed module"
        );
        Ok(module)
    }

    // -- Cursor --

    fn tok(&self, i: usize) -> &'a Token {
        &self.tokens[i.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &'a Token {
        self.tok(self.pos)
    }

    fn text_of(&self, tok: &Token) -> &'a str {
        &self.src[tok.span.to_range()]
    }

    fn comment_text(&self, comment: &Comment) -> &'a str {
        &self.src[comment.span.to_range()]
    }

    fn is_at(&self, i: usize, s: &str) -> bool {
        let tok = self.tok(i);
        matches!(tok.kind, TokenKind::Op | TokenKind::Ident) && self.text_of(tok) == s
    }

    fn at(&self, s: &str) -> bool {
        self.is_at(self.pos, s)
    }

    fn at_semi(&self) -> bool {
        self.peek().kind == TokenKind::Semi
    }

    fn bump(&mut self) -> usize {
        let i = self.pos;
        if self.peek().kind != TokenKind::Eof {
            self.pos += 1;
        }
        i
    }

    fn error(&self, expected: &'static str) -> ParseError {
        let tok = self.peek();
        let found = match tok.kind {
            TokenKind::Eof => "end of file".to_string(),
            _ if tok.is_auto_semi() => "newline".to_string(),
            _ => format!("`{}`", self.text_of(tok)),
        };
        ParseError::Expected {
            expected,
            found,
            line: tok.line,
        }
    }

    fn expect(&mut self, s: &'static str) -> Result<usize, ParseError> {
        if self.at(s) {
            Ok(self.bump())
        } else {
            Err(self.error(s))
        }
    }

    fn expect_semi(&mut self) -> Result<(), ParseError> {
        if self.at_semi() {
            self.bump();
            Ok(())
        } else {
            Err(self.error("`;` or newline"))
        }
    }

    fn expect_ident(&mut self) -> Result<&'a str, ParseError> {
        let tok = self.peek();
        let text = self.text_of(tok);
        if tok.kind == TokenKind::Ident && !is_keyword(text) {
            self.bump();
            Ok(text)
        } else {
            Err(self.error("identifier"))
        }
    }

    /// Index of the bracket closing the one at `open`.
    fn matching(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, tok) in self.tokens.iter().enumerate().skip(open) {
            match tok.kind {
                TokenKind::Eof => return None,
                TokenKind::Op => match self.text_of(tok) {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            return Some(i);
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        None
    }

    /// Step over a bracketed group starting at the cursor.
    fn skip_balanced(&mut self, open: &'static str) -> Result<(), ParseError> {
        if !self.at(open) {
            return Err(self.error(open));
        }
        match self.matching(self.pos) {
            Some(close) => {
                self.pos = close + 1;
                Ok(())
            }
            None => Err(self.error("closing bracket")),
        }
    }

    /// The `type` keyword of `x.(type)` in a type switch.
    fn after_type_switch(&self) -> bool {
        self.pos >= 2 && self.is_at(self.pos - 1, "(") && self.is_at(self.pos - 2, ".")
    }

    fn starts_type(&self, tok: &Token) -> bool {
        let text = self.text_of(tok);
        match tok.kind {
            TokenKind::Ident => {
                !is_keyword(text)
                    || matches!(text, "map" | "chan" | "func" | "struct" | "interface")
            }
            TokenKind::Op => matches!(text, "*" | "[" | "(" | "<-"),
            _ => false,
        }
    }

    // -- Comments --

    /// Texts of the comment group that ends on the line just above token
    /// `idx` and does not trail the token before it.
    fn doc_before(&self, idx: usize) -> Vec<String> {
        let tok = self.tok(idx);
        let prev_line = self.tokens[..idx]
            .iter()
            .rev()
            .find(|t| !t.is_auto_semi())
            .map_or(0, |t| t.end_line);

        let upto = self
            .comments
            .partition_point(|c| c.span.start < tok.span.start);
        let mut group: Vec<&Comment> = Vec::new();
        for comment in self.comments[..upto].iter().rev() {
            if comment.line <= prev_line {
                break;
            }
            let adjacent = match group.last() {
                None => comment.end_line + 1 == tok.line,
                Some(below) => comment.end_line + 1 >= below.line,
            };
            if !adjacent {
                break;
            }
            group.push(comment);
        }
        group
            .iter()
            .rev()
            .map(|c| self.comment_text(c).to_string())
            .collect()
    }

    // -- Declarations --

    fn type_decl(&mut self, keyword: usize, module: &mut Module) -> Result<(), ParseError> {
        let group_doc = self.doc_before(keyword);
        if !self.at("(") {
            return self.type_spec(group_doc, module);
        }

        self.bump();
        loop {
            while self.at_semi() {
                self.bump();
            }
            if self.at(")") {
                self.bump();
                return Ok(());
            }
            let mut doc = group_doc.clone();
            doc.extend(self.doc_before(self.pos));
            self.type_spec(doc, module)?;
            if !self.at(")") {
                self.expect_semi()?;
            }
        }
    }

    fn type_spec(&mut self, doc: Vec<String>, module: &mut Module) -> Result<(), ParseError> {
        let name = self.expect_ident()?.to_string();
        let params = if self.at("[") && self.starts_type_params() {
            self.type_params()?
        } else {
            Vec::new()
        };
        let alias = self.at("=");
        if alias {
            self.bump();
        }

        self.context = SiteContext {
            name: name.clone(),
            params: params.clone(),
            doc,
        };
        let ty = self.parse_type();
        self.context = SiteContext::default();
        module.decls.push(TypeDecl {
            name,
            params,
            alias,
            ty: ty?,
            local: self.depth > 0,
        });
        Ok(())
    }

    /// A struct type outside any type declaration. It is named after the
    /// identifier just before it, if any (`var v struct { ... }`), and
    /// documented by the comments above its line. One that does not parse
    /// is stepped over like any other token.
    fn free_struct(&mut self) {
        let start = self.pos;
        let sites = self.sites.len();
        let before = start.checked_sub(1).map(|i| self.tok(i));
        let name = before
            .filter(|tok| tok.kind == TokenKind::Ident && !is_keyword(self.text_of(tok)))
            .map_or_else(String::new, |tok| self.text_of(tok).to_string());
        self.context = SiteContext {
            name,
            params: Vec::new(),
            doc: self.doc_before(self.line_head(start)),
        };
        if let Err(err) = self.parse_type() {
            tracing::trace!(%err, "skipping struct type that does not parse");
            self.sites.truncate(sites);
            self.pos = start + 1;
        }
        self.context = SiteContext::default();
    }

    /// Index of the first token on the line of token `idx`.
    fn line_head(&self, idx: usize) -> usize {
        let line = self.tok(idx).line;
        let mut head = idx;
        while head > 0 {
            let prev = self.tok(head - 1);
            if prev.line != line || prev.kind == TokenKind::Semi {
                break;
            }
            head -= 1;
        }
        head
    }

    /// `type T[P any]` versus `type T [N]int`.
    fn starts_type_params(&self) -> bool {
        let name = self.tok(self.pos + 1);
        if name.kind != TokenKind::Ident || is_keyword(self.text_of(name)) {
            return false;
        }
        let after = self.tok(self.pos + 2);
        match after.kind {
            TokenKind::Ident => true,
            TokenKind::Op => matches!(self.text_of(after), "," | "~" | "["),
            _ => false,
        }
    }

    /// Parse `[P constraint, Q, R any]`, returning the parameter names.
    fn type_params(&mut self) -> Result<Vec<String>, ParseError> {
        let open = self.pos;
        let Some(close) = self.matching(open) else {
            return Err(self.error("`]`"));
        };
        let mut params = Vec::new();
        let mut depth = 0usize;
        let mut expect_name = true;
        for i in open + 1..close {
            let tok = self.tok(i);
            let text = self.text_of(tok);
            match text {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth = depth.saturating_sub(1),
                "," if depth == 0 => {
                    expect_name = true;
                    continue;
                }
                _ if depth == 0 && expect_name && tok.kind == TokenKind::Ident => {
                    params.push(text.to_string());
                }
                _ => {}
            }
            expect_name = false;
        }
        self.pos = close + 1;
        Ok(params)
    }

    fn const_decl(&mut self, consts: &mut FxHashMap<String, u64>) {
        if !self.at("(") {
            self.const_spec(consts);
            return;
        }
        self.bump();
        while !self.at(")") && self.peek().kind != TokenKind::Eof {
            if self.at_semi() {
                self.bump();
            } else {
                self.const_spec(consts);
            }
        }
        self.bump();
    }

    /// Record `name [type] = <integer literal>`; skip any other spec.
    fn const_spec(&mut self, consts: &mut FxHashMap<String, u64>) {
        let start = self.pos;
        let mut end = start;
        let mut depth = 0usize;
        loop {
            let tok = self.tok(end);
            match tok.kind {
                TokenKind::Eof => break,
                TokenKind::Semi if depth == 0 => break,
                TokenKind::Op => match self.text_of(tok) {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        if depth == 0 {
                            break;
                        }
                        depth -= 1;
                    }
                    _ => {}
                },
                _ => {}
            }
            end += 1;
        }

        let spec = &self.tokens[start..end];
        let (name, value) = match spec {
            [name, eq, lit] | [name, _, eq, lit] => (name, (eq, lit)),
            _ => {
                self.pos = end.max(start + 1);
                return;
            }
        };
        let (eq, lit) = value;
        if name.kind == TokenKind::Ident
            && self.text_of(eq) == "="
            && lit.kind == TokenKind::Int
        {
            if let Some(n) = parse_int(self.text_of(lit)) {
                consts.insert(self.text_of(name).to_string(), n);
            }
        }
        self.pos = end.max(start + 1);
    }

    // -- Struct bodies --

    /// Parse `{ fields }`, returning the token indices of both braces.
    fn struct_body(&mut self) -> Result<(usize, usize, Vec<FieldDecl>), ParseError> {
        let open = self.expect("{")?;
        let mut fields = Vec::new();
        loop {
            while self.at_semi() {
                self.bump();
            }
            if self.at("}") {
                return Ok((open, self.bump(), fields));
            }
            fields.push(self.field_decl()?);
            if !self.at("}") {
                self.expect_semi()?;
            }
        }
    }

    fn field_decl(&mut self) -> Result<FieldDecl, ParseError> {
        let first = self.pos;
        let mut names = SmallVec::new();
        let head = self.peek();
        if head.kind == TokenKind::Ident && !is_keyword(self.text_of(head)) && self.field_has_names()
        {
            loop {
                names.push(self.expect_ident()?.to_string());
                if !self.at(",") {
                    break;
                }
                self.bump();
            }
        }
        let ty = self.parse_type()?;
        if self.peek().kind == TokenKind::String {
            self.bump();
        }
        Ok(FieldDecl {
            names,
            ty,
            first,
            last: self.pos.saturating_sub(1).max(first),
        })
    }

    /// Whether the field at the cursor starts with names rather than being
    /// an embedded type.
    fn field_has_names(&self) -> bool {
        let next = self.tok(self.pos + 1);
        match next.kind {
            TokenKind::Semi | TokenKind::String | TokenKind::Eof => false,
            TokenKind::Op => match self.text_of(next) {
                "." | "}" => false,
                // `a [4]int` or `a []int`, versus the embedded `List[int]`.
                "[" => {
                    self.is_at(self.pos + 2, "]")
                        || self
                            .matching(self.pos + 1)
                            .is_some_and(|close| self.starts_type(self.tok(close + 1)))
                }
                _ => true,
            },
            _ => true,
        }
    }

    // -- Types --

    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let tok = self.peek();
        let text = self.text_of(tok);
        match (tok.kind, text) {
            (TokenKind::Ident, "map") => {
                self.bump();
                self.expect("[")?;
                self.parse_type()?;
                self.expect("]")?;
                self.parse_type()?;
                Ok(TypeExpr::Map)
            }
            (TokenKind::Ident, "chan") => {
                self.bump();
                if self.at("<-") {
                    self.bump();
                }
                self.parse_type()?;
                Ok(TypeExpr::Chan)
            }
            (TokenKind::Op, "<-") => {
                self.bump();
                self.expect("chan")?;
                self.parse_type()?;
                Ok(TypeExpr::Chan)
            }
            (TokenKind::Ident, "func") => {
                self.bump();
                self.skip_balanced("(")?;
                if self.starts_type(self.peek()) {
                    if self.at("(") {
                        self.skip_balanced("(")?;
                    } else {
                        self.parse_type()?;
                    }
                }
                Ok(TypeExpr::Func)
            }
            (TokenKind::Ident, "struct") => {
                let keyword = self.bump();
                let (open, close, fields) = self.struct_body()?;
                self.sites.push(StructSite {
                    name: self.context.name.clone(),
                    params: self.context.params.clone(),
                    doc: self.context.doc.clone(),
                    keyword,
                    open,
                    close,
                    fields: fields.clone(),
                });
                Ok(TypeExpr::Struct(fields))
            }
            (TokenKind::Ident, "interface") => {
                self.bump();
                self.skip_balanced("{")?;
                Ok(TypeExpr::Interface)
            }
            (TokenKind::Op, "*") => {
                self.bump();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            (TokenKind::Op, "[") => self.array_or_slice(),
            (TokenKind::Op, "(") => {
                self.bump();
                let ty = self.parse_type()?;
                self.expect(")")?;
                Ok(ty)
            }
            (TokenKind::Ident, _) if !is_keyword(text) => self.type_name(),
            _ => Err(self.error("type")),
        }
    }

    fn type_name(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.expect_ident()?.to_string();
        let (pkg, name) = if self.at(".") {
            self.bump();
            (Some(first), self.expect_ident()?.to_string())
        } else {
            (None, first)
        };

        let mut args = Vec::new();
        if self.at("[") {
            self.bump();
            while !self.at("]") {
                args.push(self.parse_type()?);
                if !self.at(",") {
                    break;
                }
                self.bump();
            }
            self.expect("]")?;
        }
        Ok(TypeExpr::Name { pkg, name, args })
    }

    fn array_or_slice(&mut self) -> Result<TypeExpr, ParseError> {
        let open = self.expect("[")?;
        if self.at("]") {
            self.bump();
            return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
        }
        let Some(close) = self.matching(open) else {
            return Err(self.error("`]`"));
        };
        let len = if close == open + 2 {
            let tok = self.tok(open + 1);
            match tok.kind {
                TokenKind::Int => parse_int(self.text_of(tok)).map_or(ArrayLen::Other, ArrayLen::Lit),
                TokenKind::Ident => ArrayLen::Const(self.text_of(tok).to_string()),
                _ => ArrayLen::Other,
            }
        } else {
            ArrayLen::Other
        };
        self.pos = close + 1;
        let elem = self.parse_type()?;
        Ok(TypeExpr::Array {
            len,
            elem: Box::new(elem),
        })
    }
}
