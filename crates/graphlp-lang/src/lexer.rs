use std::str::Chars;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Variables
    X1,
    X2,
    /// Any other identifier
    Ident,

    Number,

    // Operators
    Plus,
    Minus,
    Star,
    Le,
    Ge,
    Eq,

    // Special
    Eof,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }
}

/// Tokenizer for `C1*x1 + C2*x2 <= B` style text.
///
/// Whitespace is not a token: callers strip it first (see [`compact`]).
pub struct Lexer<'a> {
    source: &'a str,
    chars: Chars<'a>,
    pos: usize,
    current: Option<char>,
}

/// Remove every whitespace character, so `"x 1"` reads as `x1`
pub fn compact(source: &str) -> String {
    source.chars().filter(|c| !c.is_whitespace()).collect()
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut chars = source.chars();
        let current = chars.next();
        Self {
            source,
            chars,
            pos: 0,
            current,
        }
    }

    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current;
        self.current = self.chars.next();
        if let Some(c) = c {
            self.pos += c.len_utf8();
        }
        c
    }

    fn peek(&self) -> Option<char> {
        self.current
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn token_from(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, Span::new(start, self.pos), &self.source[start..self.pos])
    }

    fn read_number(&mut self) -> Token {
        let start = self.pos;

        // Integer part
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        // Fraction; "3." is a complete literal
        if self.peek() == Some('.') {
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        self.token_from(TokenKind::Number, start)
    }

    fn read_ident(&mut self) -> Token {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let kind = match &self.source[start..self.pos] {
            "x1" => TokenKind::X1,
            "x2" => TokenKind::X2,
            _ => TokenKind::Ident,
        };
        self.token_from(kind, start)
    }

    /// `<=` / `>=`; a bare `<` or `>` is an error token
    fn read_comparison(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.advance();
        if self.peek() == Some('=') {
            self.advance();
            self.token_from(kind, start)
        } else {
            self.token_from(TokenKind::Error, start)
        }
    }

    pub fn next_token(&mut self) -> Token {
        let start = self.pos;

        let Some(c) = self.peek() else {
            return Token::new(TokenKind::Eof, Span::new(start, start), "");
        };

        match c {
            '+' => {
                self.advance();
                self.token_from(TokenKind::Plus, start)
            }
            '-' => {
                self.advance();
                self.token_from(TokenKind::Minus, start)
            }
            '*' => {
                self.advance();
                self.token_from(TokenKind::Star, start)
            }
            '=' => {
                self.advance();
                self.token_from(TokenKind::Eq, start)
            }
            '<' => self.read_comparison(TokenKind::Le),
            '>' => self.read_comparison(TokenKind::Ge),
            '.' if self.peek_next().is_some_and(|n| n.is_ascii_digit()) => self.read_number(),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_alphabetic() || c == '_' => self.read_ident(),
            _ => {
                self.advance();
                self.token_from(TokenKind::Error, start)
            }
        }
    }
}
