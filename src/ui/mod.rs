//! Terminal AST viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for each visible pane (tree,
//!   source, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`TreeViewer`], a [`Render`]
//! implementation: hand it to [`Tree::draw`] and it takes over the terminal
//! until the user quits.
//!
//! [`Render`]: crate::tree::Render
//! [`Tree::draw`]: crate::tree::Tree::draw

pub mod app;
pub mod panes;
pub mod theme;

pub use app::{App, TreeViewer};
