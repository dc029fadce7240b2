//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tree`]: the AST as an indented outline with a selection cursor
//! - [`source`]: source code display with syntax highlighting
//! - [`status`]: status bar with keybindings and tree statistics
//!
//! Each pane module exports a primary `render_*` function that draws into
//! the area it is given and keeps no state of its own besides the scroll
//! offsets passed in by the app.

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tree::{render_tree_pane, TreeRow};

/// Clamp `offset` so that a list of `total` rows fills `visible` rows
pub(crate) fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    if total > visible {
        offset.min(total - visible)
    } else {
        0
    }
}
