// Rendering and viewer configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default directory for Graphviz output, relative to the working directory
pub const DEFAULT_GRAPHVIZ_DIR: &str = "graphviz";

/// Default file stem for Graphviz output (`<stem>.gv`)
pub const DEFAULT_FILE_STEM: &str = "ast";

/// How long the viewer waits for a key before redrawing
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(50);

/// Settings shared by the AST renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub graphviz_dir: PathBuf,
    pub file_stem: String,
    pub tick_rate: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            graphviz_dir: PathBuf::from(DEFAULT_GRAPHVIZ_DIR),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl RenderConfig {
    pub fn with_graphviz_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.graphviz_dir = dir.into();
        self
    }

    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Full path of the Graphviz file
    pub fn graphviz_path(&self) -> PathBuf {
        self.graphviz_dir.join(format!("{}.gv", self.file_stem))
    }
}
