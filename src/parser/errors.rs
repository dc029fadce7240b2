//! Front-end error taxonomy
//!
//! Every failure aborts the whole parse; there is no recovery and no error
//! accumulation across statements. Each variant carries the source line it
//! was raised on.

use super::type_system::TypeError;
use thiserror::Error;

/// Errors raised while lexing, parsing or type-checking a program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that starts no token
    #[error("Illegal character ({ch}), line {line}")]
    Lex { ch: char, line: usize },

    /// Numeric literal outside the 32-bit signed range
    #[error("Integer overflow ({literal}), line {line}")]
    Overflow { literal: String, line: usize },

    /// Token sequence matching no production, or premature end of input.
    /// `found` describes the offending token, or is `EOF`.
    #[error("Unexpected token at '{found}', line {line}")]
    Syntax { found: String, line: usize },

    /// Parenthesised forms nested past [`MAX_NESTING_DEPTH`](crate::parser::parse::MAX_NESTING_DEPTH)
    #[error("Nesting too deep, line {line}")]
    TooDeep { line: usize },

    /// Type rule violated while building a node
    #[error("Type error, line {line}: {source}")]
    Type {
        #[source]
        source: TypeError,
        line: usize,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lex { line, .. }
            | ParseError::Overflow { line, .. }
            | ParseError::Syntax { line, .. }
            | ParseError::TooDeep { line }
            | ParseError::Type { line, .. } => *line,
        }
    }

    pub(crate) fn type_error(source: TypeError, line: usize) -> Self {
        ParseError::Type { source, line }
    }
}
