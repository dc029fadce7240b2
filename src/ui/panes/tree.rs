//! AST outline pane
//!
//! One row per node, indented by depth with guide lines. Leaf text recorded
//! in a node's label (`number\n(42)`) is shown inline after the kind.

use super::clamp_scroll;
use crate::tree::TreeGraph;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// A node as displayed in the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub kind: String,
    pub leaves: Vec<String>,
}

impl TreeRow {
    /// Rows in outline order for `graph`
    pub fn from_graph(graph: &TreeGraph) -> Vec<TreeRow> {
        graph
            .outline()
            .into_iter()
            .map(|row| {
                let mut parts = row.label.split('\n');
                let kind = parts.next().unwrap_or_default().to_string();
                TreeRow {
                    depth: row.depth,
                    kind,
                    leaves: parts.map(str::to_string).collect(),
                }
            })
            .collect()
    }
}

fn kind_style(kind: &str) -> Style {
    match kind {
        "+" | "-" | "*" | "/" | "mod" | ">" | "<" | "=" | "and" | "or" | "not" => Style::default()
            .fg(DEFAULT_THEME.operator)
            .add_modifier(Modifier::BOLD),
        "def_stmt" | "print_num" | "print_bool" | "if_expr" | "fun_expr" | "fun_call" => {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        }
        "number" | "boolean" | "id" => Style::default().fg(DEFAULT_THEME.fg),
        _ => Style::default().fg(DEFAULT_THEME.comment), // Structural nodes
    }
}

fn leaf_style(kind: &str) -> Style {
    match kind {
        "number" => Style::default().fg(DEFAULT_THEME.number),
        "boolean" => Style::default().fg(DEFAULT_THEME.boolean),
        "id" => Style::default().fg(DEFAULT_THEME.identifier),
        _ => Style::default().fg(DEFAULT_THEME.secondary),
    }
}

fn row_line(row: &TreeRow) -> Line<'_> {
    let mut spans = Vec::with_capacity(row.leaves.len() + 2);
    if row.depth > 0 {
        spans.push(Span::styled(
            "│ ".repeat(row.depth),
            Style::default().fg(DEFAULT_THEME.guide),
        ));
    }
    spans.push(Span::styled(row.kind.as_str(), kind_style(&row.kind)));
    for leaf in &row.leaves {
        spans.push(Span::styled(format!(" {leaf}"), leaf_style(&row.kind)));
    }
    Line::from(spans)
}

/// Render the AST outline pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if rows.is_empty() {
        let paragraph = Paragraph::new("(empty tree)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Keep the selection on screen
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }
    *scroll_offset = clamp_scroll(*scroll_offset, rows.len(), visible_height);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, row)| {
            let item = ListItem::new(row_line(row));
            if idx == selected {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
