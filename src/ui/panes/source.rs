//! Source code pane rendering with syntax highlighting
//!
//! Uses a small character scanner rather than the real lexer so that the
//! pane can still color text the lexer would reject.

use super::clamp_scroll;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for mlisp code
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in line.char_indices() {
        let is_delimiter = c.is_whitespace() || c == '(' || c == ')';
        if !is_delimiter {
            word_start.get_or_insert(i);
            continue;
        }

        if let Some(start) = word_start.take() {
            let word = &line[start..i];
            spans.push(Span::styled(word, word_style(word)));
        }

        let style = match c {
            '(' | ')' => Style::default().fg(DEFAULT_THEME.primary), // Brackets
            _ => Style::default(),
        };
        spans.push(Span::styled(&line[i..i + c.len_utf8()], style));
    }

    if let Some(start) = word_start {
        let word = &line[start..];
        spans.push(Span::styled(word, word_style(word)));
    }

    Line::from(spans)
}

fn word_style(word: &str) -> Style {
    let upper = word.to_ascii_uppercase();
    match upper.as_str() {
        "DEFINE" | "FUN" | "IF" | "PRINT-NUM" | "PRINT-BOOL" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "AND" | "OR" | "NOT" | "MOD" | "+" | "-" | "*" | "/" | ">" | "<" | "=" => {
            Style::default().fg(DEFAULT_THEME.operator)
        }
        "#T" | "#F" => Style::default().fg(DEFAULT_THEME.boolean),
        _ if word.parse::<i64>().is_ok() => Style::default().fg(DEFAULT_THEME.number),
        _ => Style::default().fg(DEFAULT_THEME.fg), // Identifiers
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
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
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1
    *scroll_offset = clamp_scroll(*scroll_offset, lines.len(), visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = vec![Span::styled(
                format!("{:4} ", idx + 1),
                Style::default().fg(DEFAULT_THEME.comment), // Line numbers
            )];
            spans.extend(highlight_source_code(line).spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
