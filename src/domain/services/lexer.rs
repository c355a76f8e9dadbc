//! JavaScript lexing shared by the JSX transform and the bundler
//!
//! Not a full tokenizer: it knows just enough to step over string, template
//! and regex literals and comments, and whether a `/` or `<` at the current
//! position starts an expression. A `/` after a value is division; after an
//! operator, an opening bracket or a keyword such as `return` it opens a
//! regex literal.

/// Keywords after which an expression may start
const EXPRESSION_KEYWORDS: &[&str] = &[
    "return", "case", "default", "do", "else", "in", "of", "typeof", "void", "yield", "await",
    "new", "delete", "throw",
];

/// What was last copied, used to tell regexes and JSX from division and comparisons
#[derive(Debug, Clone, PartialEq)]
pub enum Last {
    Start,
    Punct(char),
    Word(String),
    Value,
}

impl Last {
    pub fn allows_expression(&self) -> bool {
        match self {
            Last::Start => true,
            Last::Punct(c) => !matches!(c, ')' | ']' | '}'),
            Last::Word(word) => EXPRESSION_KEYWORDS.contains(&word.as_str()),
            Last::Value => false,
        }
    }
}

/// Lexing failure at a char offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub at: usize,
    pub message: &'static str,
}

/// Cursor over a module's source
pub struct Lexer {
    pub chars: Vec<char>,
    pub pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// 1-based line of a char offset
    pub fn line_of(&self, at: usize) -> usize {
        self.chars[..at.min(self.chars.len())]
            .iter()
            .filter(|c| **c == '\n')
            .count()
            + 1
    }

    /// Identifier or keyword at the cursor
    pub fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek().filter(|c| is_ident_char(*c)) {
            word.push(c);
            self.pos += 1;
        }
        word
    }

    pub fn string_literal(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.pos;
        let mut out = String::from(quote);
        self.pos += 1;
        while let Some(c) = self.peek() {
            out.push(c);
            self.pos += 1;
            if c == '\\' {
                if let Some(escaped) = self.peek() {
                    out.push(escaped);
                    self.pos += 1;
                }
            } else if c == quote {
                return Ok(out);
            } else if c == '\n' {
                break;
            }
        }
        Err(LexError {
            at: start,
            message: "unterminated string literal",
        })
    }

    /// `//` comment up to, not including, the newline
    pub fn line_comment(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|c| *c != '\n') {
            out.push(c);
            self.pos += 1;
        }
        out
    }

    pub fn block_comment(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        let mut out = String::from("/*");
        self.pos += 2;
        while let Some(c) = self.peek() {
            out.push(c);
            self.pos += 1;
            if c == '*' && self.peek() == Some('/') {
                out.push('/');
                self.pos += 1;
                return Ok(out);
            }
        }
        Err(LexError {
            at: start,
            message: "unterminated comment",
        })
    }

    pub fn regex_literal(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        let mut out = String::from('/');
        self.pos += 1;
        let mut in_class = false;
        while let Some(c) = self.peek() {
            out.push(c);
            self.pos += 1;
            match c {
                '\\' => {
                    if let Some(escaped) = self.peek() {
                        out.push(escaped);
                        self.pos += 1;
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    while let Some(flag) = self.peek().filter(|c| c.is_ascii_alphabetic()) {
                        out.push(flag);
                        self.pos += 1;
                    }
                    return Ok(out);
                }
                '\n' => break,
                _ => {}
            }
        }
        Err(LexError {
            at: start,
            message: "unterminated regular expression",
        })
    }
}

/// `source` with comments and regex literals blanked out.
///
/// Strings and template literals are kept; line breaks are preserved.
/// Malformed input is copied through from the point it stops lexing.
pub fn code_text(source: &str) -> String {
    let mut lexer = Lexer::new(source);
    let mut out = String::with_capacity(source.len());
    blank_code(&mut lexer, &mut out, false);
    out
}

fn blank_code(lexer: &mut Lexer, out: &mut String, in_braces: bool) {
    let mut depth = 0usize;
    let mut last = Last::Start;

    while let Some(c) = lexer.peek() {
        let start = lexer.pos;
        let lexed = match c {
            '"' | '\'' => lexer.string_literal(c).map(|s| {
                out.push_str(&s);
                last = Last::Value;
            }),
            '`' => {
                blank_template(lexer, out);
                last = Last::Value;
                Ok(())
            }
            '/' if lexer.peek_at(1) == Some('/') => {
                push_blank(out, &lexer.line_comment());
                Ok(())
            }
            '/' if lexer.peek_at(1) == Some('*') => lexer.block_comment().map(|s| push_blank(out, &s)),
            '/' if last.allows_expression() => lexer.regex_literal().map(|s| {
                push_blank(out, &s);
                last = Last::Value;
            }),
            '{' => {
                depth += 1;
                out.push(c);
                lexer.pos += 1;
                last = Last::Punct(c);
                Ok(())
            }
            '}' => {
                if depth == 0 && in_braces {
                    return;
                }
                depth = depth.saturating_sub(1);
                out.push(c);
                lexer.pos += 1;
                last = Last::Punct(c);
                Ok(())
            }
            c if c.is_whitespace() => {
                out.push(c);
                lexer.pos += 1;
                Ok(())
            }
            c if is_ident_char(c) => {
                let word = lexer.word();
                out.push_str(&word);
                last = Last::Word(word);
                Ok(())
            }
            c => {
                out.push(c);
                lexer.pos += 1;
                last = Last::Punct(c);
                Ok(())
            }
        };

        if lexed.is_err() {
            out.extend(&lexer.chars[start..]);
            lexer.pos = lexer.chars.len();
        }
    }
}

fn blank_template(lexer: &mut Lexer, out: &mut String) {
    out.push('`');
    lexer.pos += 1;
    while let Some(c) = lexer.peek() {
        if c == '\\' {
            out.push(c);
            lexer.pos += 1;
            if let Some(escaped) = lexer.peek() {
                out.push(escaped);
                lexer.pos += 1;
            }
        } else if c == '$' && lexer.peek_at(1) == Some('{') {
            out.push_str("${");
            lexer.pos += 2;
            blank_code(lexer, out, true);
            if lexer.peek() == Some('}') {
                out.push('}');
                lexer.pos += 1;
            }
        } else {
            out.push(c);
            lexer.pos += 1;
            if c == '`' {
                return;
            }
        }
    }
}

fn push_blank(out: &mut String, text: &str) {
    out.extend(text.chars().map(|c| if c == '\n' { '\n' } else { ' ' }));
}

pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
