//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! token lookahead, expectation helpers, and the program entry point.
//!
//! # Parser Architecture
//!
//! The parser is a recursive descent over the grammar; a single token of
//! lookahead after `(` decides every production, so no backtracking is
//! needed:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: `stmt`, `def_stmt` and the print statements
//! - `expressions`: `expr`, operators, `if_expr`, `fun_expr`, `fun_call`
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Nodes are built bottom-up as each production completes, so type rules run
//! as soon as their operands exist and the first violation aborts the parse.

use crate::parser::ast::{AstNode, NodeKind};
use crate::parser::errors::ParseError;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use tracing::debug;

/// Deepest run of nested parenthesised forms a parse accepts
pub const MAX_NESTING_DEPTH: usize = 128;

/// Recursive descent parser for mlisp
///
/// Holds a fresh [`Lexer`] and one token of lookahead. A parser is good for
/// a single [`Parser::parse_program`] call.
pub struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) lookahead: Option<Token>,
    /// Parenthesised forms currently open
    pub(crate) depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: None,
            depth: 0,
        }
    }

    /// Parse the entire program: one or more statements
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let mut statements = Vec::new();

        while self.peek()?.is_some() {
            statements.push(self.parse_statement()?);
        }

        let body = match statements.len() {
            0 => return Err(self.unexpected_eof()),
            1 => statements.remove(0),
            _ => {
                let line = statements[0].line();
                AstNode::scaffold(NodeKind::StmtList, statements, line)
            }
        };

        let count = match body.kind() {
            NodeKind::StmtList => body.children().len(),
            _ => 1,
        };
        debug!(statements = count, "program accepted");

        let line = body.line();
        Ok(AstNode::scaffold(NodeKind::Program, vec![body], line))
    }

    // ===== Helper methods =====

    /// Look at the next token without consuming it. `None` at end of input.
    pub(crate) fn peek(&mut self) -> Result<Option<&Token>, ParseError> {
        if self.lookahead.is_none() {
            self.lookahead = self.lexer.next().transpose()?;
        }
        Ok(self.lookahead.as_ref())
    }

    pub(crate) fn peek_kind(&mut self) -> Result<Option<TokenKind>, ParseError> {
        Ok(self.peek()?.map(|token| token.kind))
    }

    pub(crate) fn check(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        Ok(self.peek_kind()? == Some(kind))
    }

    /// Consume the next token; running out of input is a syntax error.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        self.peek()?;
        self.lookahead.take().ok_or_else(|| self.unexpected_eof())
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.advance()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(Self::unexpected(&token))
        }
    }

    pub(crate) fn expect_rparen(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::RParen).map(|_| ())
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<AstNode, ParseError> {
        let token = self.expect(TokenKind::Id)?;
        Ok(AstNode::id(token.lexeme, token.line))
    }

    pub(crate) fn unexpected(token: &Token) -> ParseError {
        ParseError::Syntax {
            found: token.lexeme.clone(),
            line: token.line,
        }
    }

    pub(crate) fn unexpected_eof(&self) -> ParseError {
        ParseError::Syntax {
            found: "EOF".to_string(),
            line: self.lexer.line(),
        }
    }
}

/// Parse `source` into a `program` node
pub fn parse(source: &str) -> Result<AstNode, ParseError> {
    Parser::new(source).parse_program()
}
