//! Statement parsing
//!
//! ```text
//! stmt       := expr | print_stmt | def_stmt
//! def_stmt   := '(' DEFINE id expr ')'
//! print_stmt := '(' (PRINT_NUM | PRINT_BOOL) expr ')'
//! ```
//!
//! Definitions and prints are only legal at the top level; inside an
//! expression `define` is a syntax error.

use crate::parser::ast::{AstNode, NodeKind};
use crate::parser::errors::ParseError;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;

impl Parser {
    /// Parse one top-level statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let inner = if self.check(TokenKind::LParen)? {
            let lparen = self.advance()?;
            match self.peek_kind()? {
                Some(TokenKind::Define) => self.parse_definition(lparen.line)?,
                Some(TokenKind::PrintNum) => self.parse_print(NodeKind::PrintNum, lparen.line)?,
                Some(TokenKind::PrintBool) => self.parse_print(NodeKind::PrintBool, lparen.line)?,
                _ => AstNode::expr(self.parse_compound(lparen.line)?),
            }
        } else {
            self.parse_expression()?
        };

        let line = inner.line();
        Ok(AstNode::scaffold(NodeKind::Stmt, vec![inner], line))
    }

    /// `(define name expr)`, with `(` already consumed
    fn parse_definition(&mut self, line: usize) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Define)?;

        let name = self.expect_identifier()?;
        let var_line = name.line();
        let var = AstNode::scaffold(NodeKind::Var, vec![name], var_line);

        let value = self.parse_expression()?;
        self.expect_rparen()?;

        Ok(AstNode::scaffold(NodeKind::DefStmt, vec![var, value], line))
    }

    /// `(print-num expr)` / `(print-bool expr)`, with `(` already consumed.
    ///
    /// The printed expression is not type-checked against the keyword.
    fn parse_print(&mut self, kind: NodeKind, line: usize) -> Result<AstNode, ParseError> {
        let keyword = self.advance()?;
        let expr = self.parse_expression()?;
        self.expect_rparen()?;

        Ok(AstNode::print(kind, keyword.lexeme, expr, line))
    }
}
