//! # Introduction
//!
//! mlisp is the front end of a small S-expression language with integers,
//! booleans, definitions, conditionals, anonymous functions and calls. It
//! turns source text into a validated, typed abstract syntax tree and can
//! show that tree in a terminal view or write it out for Graphviz.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser (+ type rules) → AST → Tree → Renderer
//! ```
//!
//! 1. [`parser`]: tokenises the source, parses it by recursive descent and
//!    builds [`parser::AstNode`]s, checking operand types as each node is
//!    made. Any lex, overflow, syntax or type error aborts the whole parse.
//! 2. [`tree`]: [`tree::Tree`] flattens a parsed program into identity-keyed
//!    nodes and edges and hands them to a [`tree::Render`] implementation.
//!    Renderer failures are logged, never fatal.
//! 3. [`ui`]: ratatui-based viewer implementing [`tree::Render`]; not part
//!    of the stable library API.
//! 4. [`config`]: renderer settings.
//!
//! ## Example
//!
//! ```
//! use mlisp::parser::{parse, NodeKind};
//!
//! let program = parse("(define sq (fun (x) (* x x))) (print-num (sq 4))").unwrap();
//! assert_eq!(program.kind(), NodeKind::Program);
//!
//! let err = parse("(+ 3 (not #t))").unwrap_err();
//! assert!(err.to_string().contains("expect 'number' but got 'boolean'"));
//! ```

pub mod config;
pub mod parser;
pub mod tree;
pub mod ui;
