//! Main TUI application state and logic

use super::panes::{self, TreeRow};
use crate::config::RenderConfig;
use crate::tree::{Render, RenderError, TreeGraph};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Rows moved by PageUp / PageDown
const PAGE_SIZE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// Outline of the tree being shown
    pub rows: Vec<TreeRow>,

    /// The source code the tree was parsed from
    pub source_code: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index of the highlighted tree row
    pub selected: usize,

    /// Per-pane scroll offsets
    pub tree_scroll: usize,
    pub source_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app showing `graph` next to `source_code`
    pub fn new(graph: &TreeGraph, source_code: String) -> Self {
        App {
            rows: TreeRow::from_graph(graph),
            source_code,
            focused_pane: FocusedPane::Tree,
            selected: 0,
            tree_scroll: 0,
            source_scroll: 0,
            should_quit: false,
            status_message: String::from("Parsed successfully"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Tree (left) | Source (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        panes::render_tree_pane(
            frame,
            columns[0],
            &self.rows,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_source_pane(
            frame,
            columns[1],
            &self.source_code,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.rows.len(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE_SIZE as isize)),
            KeyCode::PageDown => self.move_by(PAGE_SIZE as isize),
            KeyCode::Home => self.move_by(isize::MIN),
            KeyCode::End => self.move_by(isize::MAX),
            _ => {}
        }
    }

    /// Move the cursor of the focused pane, saturating at both ends
    fn move_by(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Tree => {
                let last = self.rows.len().saturating_sub(1);
                self.selected = self.selected.saturating_add_signed(delta).min(last);
                if let Some(row) = self.rows.get(self.selected) {
                    self.status_message = format!("{} (depth {})", row.kind, row.depth);
                }
            }
            FocusedPane::Source => {
                // Clamped against the pane height on the next render
                self.source_scroll = self.source_scroll.saturating_add_signed(delta);
            }
        }
    }
}

/// Renderer that opens the AST in an interactive terminal view
pub struct TreeViewer {
    source_code: String,
    tick_rate: Duration,
}

impl TreeViewer {
    pub fn new(source_code: impl Into<String>, config: &RenderConfig) -> Self {
        TreeViewer {
            source_code: source_code.into(),
            tick_rate: config.tick_rate,
        }
    }
}

impl Render for TreeViewer {
    fn render(&mut self, graph: &TreeGraph) -> Result<(), RenderError> {
        if graph.nodes.is_empty() {
            return Err(RenderError::EmptyGraph);
        }

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        let mut app = App::new(graph, self.source_code.clone());
        let res = app.run(&mut terminal, self.tick_rate);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res.map_err(RenderError::from)
    }
}
