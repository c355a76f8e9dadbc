//! JSX transform
//!
//! Rewrites JSX markup in component modules into factory calls:
//!
//! ```text
//! <Nav {...props} active>Hi {name}</Nav>
//! React.createElement(Nav, Object.assign({}, props, {active: true}), "Hi ", name)
//! ```
//!
//! Only the markup is rewritten; everything else is copied byte for byte.
//! A `<` starts an element only where an expression may begin (after an
//! operator, an opening bracket, `return` and similar keywords), which keeps
//! comparisons such as `i < n` untouched.

use std::path::Path;

use crate::error::{PipeError, PipeResult};

use super::lexer::{is_ident_char, Last, LexError, Lexer};

/// JSX-to-JavaScript transform
#[derive(Debug, Clone)]
pub struct JsxTransform {
    factory: String,
}

impl Default for JsxTransform {
    fn default() -> Self {
        Self::new("React.createElement")
    }
}

impl JsxTransform {
    pub fn new(factory: &str) -> Self {
        Self {
            factory: factory.to_string(),
        }
    }

    /// Transform one module's source. `file` is used in error messages.
    pub fn transform(&self, source: &str, file: &Path) -> PipeResult<String> {
        let mut scanner = Scanner {
            lex: Lexer::new(source),
            factory: &self.factory,
            file,
        };
        scanner.code(false)
    }
}

enum Attr {
    Named(String, String),
    Spread(String),
}

struct Scanner<'a> {
    lex: Lexer,
    factory: &'a str,
    file: &'a Path,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<char> {
        self.lex.peek()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.lex.peek_at(offset)
    }

    fn error(&self, at: usize, message: impl Into<String>) -> PipeError {
        PipeError::Transform {
            file: self.file.to_path_buf(),
            line: self.lex.line_of(at),
            message: message.into(),
        }
    }

    fn lex_error(&self, err: LexError) -> PipeError {
        self.error(err.at, err.message)
    }

    /// Copy JavaScript, rewriting any JSX found.
    ///
    /// With `in_braces`, stops before the `}` closing an expression container
    /// (the caller consumes it).
    fn code(&mut self, in_braces: bool) -> PipeResult<String> {
        let start = self.lex.pos;
        let mut out = String::new();
        let mut depth = 0usize;
        let mut last = Last::Start;

        while let Some(c) = self.peek() {
            match c {
                '"' | '\'' => {
                    let literal = self.lex.string_literal(c).map_err(|e| self.lex_error(e))?;
                    out.push_str(&literal);
                    last = Last::Value;
                }
                '`' => {
                    out.push_str(&self.template_literal()?);
                    last = Last::Value;
                }
                '/' if self.peek_at(1) == Some('/') => {
                    out.push_str(&self.lex.line_comment());
                }
                '/' if self.peek_at(1) == Some('*') => {
                    let comment = self.lex.block_comment().map_err(|e| self.lex_error(e))?;
                    out.push_str(&comment);
                }
                '/' if last.allows_expression() => {
                    let literal = self.lex.regex_literal().map_err(|e| self.lex_error(e))?;
                    out.push_str(&literal);
                    last = Last::Value;
                }
                '<' if last.allows_expression() && self.peek_at(1).is_some_and(is_tag_start) => {
                    out.push_str(&self.element()?);
                    last = Last::Value;
                }
                '{' => {
                    depth += 1;
                    out.push(c);
                    self.lex.pos += 1;
                    last = Last::Punct(c);
                }
                '}' => {
                    if depth == 0 && in_braces {
                        return Ok(out);
                    }
                    depth = depth.saturating_sub(1);
                    out.push(c);
                    self.lex.pos += 1;
                    last = Last::Punct(c);
                }
                c if c.is_whitespace() => {
                    out.push(c);
                    self.lex.pos += 1;
                }
                c if is_ident_char(c) => {
                    let word = self.lex.word();
                    out.push_str(&word);
                    last = Last::Word(word);
                }
                c => {
                    out.push(c);
                    self.lex.pos += 1;
                    last = Last::Punct(c);
                }
            }
        }

        if in_braces {
            return Err(self.error(start, "unterminated expression container"));
        }
        Ok(out)
    }

    fn template_literal(&mut self) -> PipeResult<String> {
        let start = self.lex.pos;
        let mut out = String::from('`');
        self.lex.pos += 1;
        while let Some(c) = self.peek() {
            if c == '\\' {
                out.push(c);
                self.lex.pos += 1;
                if let Some(escaped) = self.peek() {
                    out.push(escaped);
                    self.lex.pos += 1;
                }
            } else if c == '$' && self.peek_at(1) == Some('{') {
                out.push_str("${");
                self.lex.pos += 2;
                out.push_str(&self.code(true)?);
                out.push('}');
                self.lex.pos += 1;
            } else {
                out.push(c);
                self.lex.pos += 1;
                if c == '`' {
                    return Ok(out);
                }
            }
        }
        Err(self.error(start, "unterminated template literal"))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.lex.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> PipeResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.lex.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(self.lex.pos, format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(self.lex.pos, format!("expected '{expected}', found end of file"))),
        }
    }

    fn name(&mut self, allowed: fn(char) -> bool) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(|c| allowed(*c)) {
            name.push(c);
            self.lex.pos += 1;
        }
        name
    }

    /// Expression container body after `{`, consuming the closing `}`.
    fn container(&mut self) -> PipeResult<String> {
        let expr = self.code(true)?;
        self.expect('}')?;
        Ok(expr.trim().to_string())
    }

    fn element(&mut self) -> PipeResult<String> {
        let start = self.lex.pos;
        self.lex.pos += 1;
        let tag = self.name(is_tag_char);
        let mut attrs = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.error(start, format!("unterminated <{tag}>"))),
                Some('/') => {
                    self.lex.pos += 1;
                    self.expect('>')?;
                    return Ok(self.factory_call(&tag, &attrs, &[]));
                }
                Some('>') => {
                    self.lex.pos += 1;
                    break;
                }
                Some('{') => {
                    self.lex.pos += 1;
                    self.skip_whitespace();
                    if !self.lex.chars[self.lex.pos..].starts_with(&['.', '.', '.']) {
                        return Err(self.error(self.lex.pos, "expected '...' in attribute spread"));
                    }
                    self.lex.pos += 3;
                    attrs.push(Attr::Spread(self.container()?));
                }
                Some(c) if is_attr_char(c) => {
                    let name = self.name(is_attr_char);
                    self.skip_whitespace();
                    let value = if self.peek() == Some('=') {
                        self.lex.pos += 1;
                        self.skip_whitespace();
                        self.attribute_value(&tag)?
                    } else {
                        "true".to_string()
                    };
                    attrs.push(Attr::Named(name, value));
                }
                Some(c) => {
                    return Err(self.error(self.lex.pos, format!("unexpected '{c}' in <{tag}>")));
                }
            }
        }

        let mut children = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.error(start, format!("unterminated <{tag}>"))),
                Some('<') if self.peek_at(1) == Some('/') => {
                    let close_at = self.lex.pos;
                    self.lex.pos += 2;
                    self.skip_whitespace();
                    let close = self.name(is_tag_char);
                    self.skip_whitespace();
                    self.expect('>')?;
                    if close != tag {
                        return Err(self.error(
                            close_at,
                            format!("expected </{tag}> but found </{close}>"),
                        ));
                    }
                    break;
                }
                Some('<') => children.push(self.element()?),
                Some('{') => {
                    self.lex.pos += 1;
                    let expr = self.container()?;
                    if !expr.is_empty() && !is_comment_only(&expr) {
                        children.push(expr);
                    }
                }
                Some(_) => {
                    let mut text = String::new();
                    while let Some(c) = self.peek().filter(|c| *c != '<' && *c != '{') {
                        text.push(c);
                        self.lex.pos += 1;
                    }
                    if let Some(cleaned) = clean_text(&text) {
                        children.push(js_string(&cleaned));
                    }
                }
            }
        }

        Ok(self.factory_call(&tag, &attrs, &children))
    }

    fn attribute_value(&mut self, tag: &str) -> PipeResult<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let start = self.lex.pos;
                self.lex.pos += 1;
                let mut raw = String::new();
                while let Some(c) = self.peek() {
                    self.lex.pos += 1;
                    if c == quote {
                        return Ok(js_string(&raw));
                    }
                    raw.push(c);
                }
                Err(self.error(start, "unterminated attribute string"))
            }
            Some('{') => {
                self.lex.pos += 1;
                self.container()
            }
            Some('<') => self.element(),
            _ => Err(self.error(self.lex.pos, format!("missing attribute value in <{tag}>"))),
        }
    }

    fn factory_call(&self, tag: &str, attrs: &[Attr], children: &[String]) -> String {
        let tag_expr = if tag.starts_with(|c: char| c.is_ascii_lowercase()) && !tag.contains('.')
        {
            js_string(tag)
        } else {
            tag.to_string()
        };

        let mut call = format!("{}({}, {}", self.factory, tag_expr, props_expr(attrs));
        for child in children {
            call.push_str(", ");
            call.push_str(child);
        }
        call.push(')');
        call
    }
}

fn props_expr(attrs: &[Attr]) -> String {
    if attrs.is_empty() {
        return "null".to_string();
    }

    let mut groups: Vec<String> = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    for attr in attrs {
        match attr {
            Attr::Named(name, value) => pending.push(format!("{}: {}", prop_key(name), value)),
            Attr::Spread(expr) => {
                if !pending.is_empty() {
                    groups.push(format!("{{{}}}", pending.join(", ")));
                    pending.clear();
                }
                groups.push(expr.clone());
            }
        }
    }
    if !pending.is_empty() {
        groups.push(format!("{{{}}}", pending.join(", ")));
    }

    let has_spread = attrs.iter().any(|a| matches!(a, Attr::Spread(_)));
    if has_spread {
        format!("Object.assign({{}}, {})", groups.join(", "))
    } else {
        groups.join(", ")
    }
}

fn prop_key(name: &str) -> String {
    let is_identifier = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && name.chars().all(is_ident_char);
    if is_identifier {
        name.to_string()
    } else {
        js_string(name)
    }
}

/// JSX text whitespace: trim around line breaks, drop blank lines, join with spaces.
fn clean_text(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let last_non_empty = lines.iter().rposition(|l| !l.trim().is_empty())?;
    let last_index = lines.len() - 1;
    let ends_with_newline = text.ends_with('\n');

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let mut piece: &str = line;
        if i != 0 {
            piece = piece.trim_start();
        }
        if i != last_index || ends_with_newline {
            piece = piece.trim_end();
        }
        if piece.is_empty() {
            continue;
        }
        out.push_str(piece);
        if i != last_non_empty {
            out.push(' ');
        }
    }
    Some(out)
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn is_comment_only(expr: &str) -> bool {
    expr.len() >= 4
        && expr.starts_with("/*")
        && expr[2..].find("*/") == Some(expr.len() - 4)
}

fn is_tag_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_tag_char(c: char) -> bool {
    is_ident_char(c) || c == '.' || c == '-' || c == ':'
}

fn is_attr_char(c: char) -> bool {
    is_ident_char(c) || c == '-' || c == ':'
}
