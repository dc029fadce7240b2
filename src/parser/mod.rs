//! mlisp source code parser
//!
//! This module transforms mlisp source text into a typed Abstract Syntax Tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split into `statements` and `expressions`
//! - [`ast`]: AST node definitions and their validating constructors
//! - [`type_system`]: value classes and the expression-level type rules
//! - [`errors`]: the lex / overflow / syntax / type error taxonomy
//!
//! # Language
//!
//! Integers and booleans, `define`, `print-num` / `print-bool`, `if`,
//! anonymous functions (`fun`) and calls. Names are never resolved, so
//! identifiers and call results are accepted in number and boolean
//! positions alike.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead. Each parse
//! owns its lexer and parser state; the only shared data is the read-only
//! reserved-word table.

pub mod ast;
pub mod errors;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod type_system;

pub use ast::{AstNode, BoolOperator, Child, NodeKind, NumOperator};
pub use errors::ParseError;
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parse::{parse, Parser, MAX_NESTING_DEPTH};
pub use type_system::{TypeClass, TypeError, ValueType};
