//! Lexer (tokenizer) for mlisp source code
//!
//! Converts raw source text into a stream of [`Token`]s pulled lazily by the
//! parser. Spaces, tabs and carriage returns are skipped; newlines only bump
//! the line counter. The first illegal character or out-of-range literal
//! ends the stream with an error.

use super::errors::ParseError;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;
use tracing::trace;

/// Token classes produced by the lexer.
///
/// Literal classes carry their parsed value; the raw text lives in
/// [`Token::lexeme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Operators
    Plus,     // +
    Minus,    // -
    Multiply, // *
    Divide,   // /
    Mod,      // mod
    Greater,  // >
    Smaller,  // <
    Equal,    // =

    // Punctuation
    LParen, // (
    RParen, // )

    // Literals
    Number(i32),
    Boolean(bool),

    // Identifiers
    Id,

    // Reserved words
    PrintNum,  // print-num
    PrintBool, // print-bool
    Define,
    Fun,
    If,
    And,
    Or,
    Not,
}

impl TokenKind {
    /// Upper-case grammar name of this class (`NUMBER`, `PRINT_NUM`, ...)
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Mod => "MOD",
            TokenKind::Greater => "GREATER",
            TokenKind::Smaller => "SMALLER",
            TokenKind::Equal => "EQUAL",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Number(_) => "NUMBER",
            TokenKind::Boolean(_) => "BOOLEAN",
            TokenKind::Id => "ID",
            TokenKind::PrintNum => "PRINT_NUM",
            TokenKind::PrintBool => "PRINT_BOOL",
            TokenKind::Define => "DEFINE",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
        }
    }
}

/// A classified lexeme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text exactly as written
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) line {}", self.kind.name(), self.lexeme, self.line)
    }
}

/// Reserved words keyed by their upper-cased spelling. Identifiers are
/// scanned first and then looked up here.
static RESERVED: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    table.insert("MOD", TokenKind::Mod);
    table.insert("DEFINE", TokenKind::Define);
    table.insert("FUN", TokenKind::Fun);
    table.insert("IF", TokenKind::If);
    table.insert("AND", TokenKind::And);
    table.insert("OR", TokenKind::Or);
    table.insert("NOT", TokenKind::Not);
    table.insert("PRINT-NUM", TokenKind::PrintNum);
    table.insert("PRINT-BOOL", TokenKind::PrintBool);
    table
});

/// Final class of a scanned identifier
fn classify_identifier(ident: &str) -> TokenKind {
    RESERVED
        .get(ident.to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(TokenKind::Id)
}

/// Lexer for mlisp source code
///
/// Each parse creates its own lexer; the stream is consumed once and yields
/// `None` forever after the end of input or the first error.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            finished: false,
        }
    }

    /// Current line (1-based)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        self.by_ref().collect()
    }

    /// Scan one token starting at the current position
    fn next_token(&mut self) -> Result<Token, ParseError> {
        let line = self.line;
        let ch = self.advance().ok_or(ParseError::Syntax {
            found: "EOF".to_string(),
            line,
        })?;

        match ch {
            '-' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.number_literal(ch),
            '0'..='9' => self.number_literal(ch),

            '#' => match self.peek() {
                Some(c @ ('t' | 'f')) => {
                    self.advance();
                    Ok(Token::new(TokenKind::Boolean(c == 't'), format!("#{c}"), line))
                }
                _ => Err(ParseError::Lex { ch, line }),
            },

            c if c.is_ascii_alphabetic() => Ok(self.identifier_or_keyword(c)),

            '+' => Ok(Token::new(TokenKind::Plus, "+", line)),
            '-' => Ok(Token::new(TokenKind::Minus, "-", line)),
            '*' => Ok(Token::new(TokenKind::Multiply, "*", line)),
            '/' => Ok(Token::new(TokenKind::Divide, "/", line)),
            '>' => Ok(Token::new(TokenKind::Greater, ">", line)),
            '<' => Ok(Token::new(TokenKind::Smaller, "<", line)),
            '=' => Ok(Token::new(TokenKind::Equal, "=", line)),
            '(' => Ok(Token::new(TokenKind::LParen, "(", line)),
            ')' => Ok(Token::new(TokenKind::RParen, ")", line)),

            _ => Err(ParseError::Lex { ch, line }),
        }
    }

    /// Parse numeric literal: `-?[0-9]+`, checked against the i32 range
    fn number_literal(&mut self, first: char) -> Result<Token, ParseError> {
        let mut literal = String::new();
        literal.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                literal.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match literal.parse::<i32>() {
            Ok(value) => Ok(Token::new(TokenKind::Number(value), literal, self.line)),
            Err(_) => Err(ParseError::Overflow {
                literal,
                line: self.line,
            }),
        }
    }

    /// Parse identifier or reserved word: `[a-zA-Z][a-zA-Z0-9-]*`
    fn identifier_or_keyword(&mut self, first: char) -> Token {
        let mut ident = String::new();
        ident.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = classify_identifier(&ident);
        Token::new(kind, ident, self.line)
    }

    /// Skip blanks, counting newlines
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                }
                _ => break,
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.skip_whitespace();
        if self.peek().is_none() {
            self.finished = true;
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) => trace!(%token, "lexed"),
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}

/// Tokenize `source` with a fresh lexer
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(source).tokenize()
}
