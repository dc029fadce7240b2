//! Graphviz DOT output
//!
//! Writes the flattened tree as a `digraph AST` into the configured
//! directory. Running `dot` on the file is left to the user.

use super::{Render, RenderError, TreeGraph};
use crate::config::RenderConfig;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Renderer producing `<graphviz_dir>/<file_stem>.gv`
#[derive(Debug, Clone)]
pub struct DotRenderer {
    config: RenderConfig,
    written: Option<PathBuf>,
}

impl DotRenderer {
    pub fn new(config: RenderConfig) -> Self {
        DotRenderer {
            config,
            written: None,
        }
    }

    /// Path of the last file written, if any
    pub fn written(&self) -> Option<&PathBuf> {
        self.written.as_ref()
    }
}

impl Render for DotRenderer {
    fn render(&mut self, graph: &TreeGraph) -> Result<(), RenderError> {
        if graph.nodes.is_empty() {
            return Err(RenderError::EmptyGraph);
        }

        fs::create_dir_all(&self.config.graphviz_dir)?;
        let path = self.config.graphviz_path();
        fs::write(&path, to_dot(graph))?;

        info!(path = %path.display(), "wrote Graphviz file");
        self.written = Some(path);
        Ok(())
    }
}

/// DOT source for `graph`
pub fn to_dot(graph: &TreeGraph) -> String {
    let mut out = String::from("digraph AST {\n");
    out.push_str(
        "\tnode [fixedsize=true fontname=\"segoe ui\" height=0.8 shape=ellipse width=1.2]\n",
    );

    // Writing into a String cannot fail.
    for (id, label) in &graph.nodes {
        let _ = writeln!(out, "\t{} [label=\"{}\"]", id, escape(label));
    }
    for (parent, child) in &graph.edges {
        let _ = writeln!(out, "\t{} -> {}", parent, child);
    }

    out.push_str("}\n");
    out
}

fn escape(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for ch in label.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::tree::Tree;

    #[test]
    fn test_to_dot() {
        let tree = Tree::new(parse("(not #t)").unwrap());
        let dot = to_dot(tree.build());

        assert!(dot.starts_with("digraph AST {\n"));
        assert!(dot.contains("\tnode0 [label=\"program\"]\n"));
        assert!(dot.contains("\tnode5 [label=\"boolean\\n(#t)\"]\n"));
        assert!(dot.contains("\tnode3 -> node4\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
    }

    #[test]
    fn test_render_writes_file() {
        let dir = std::env::temp_dir().join(format!("mlisp-dot-{}", std::process::id()));
        let config = RenderConfig::default()
            .with_graphviz_dir(&dir)
            .with_file_stem("unit");
        let mut renderer = DotRenderer::new(config);

        let tree = Tree::new(parse("(+ 1 2)").unwrap());
        assert!(tree.draw(&mut renderer));

        let path = renderer.written().unwrap().clone();
        assert_eq!(path, dir.join("unit.gv"));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_dot(tree.build()));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_graph_is_an_error() {
        let mut renderer = DotRenderer::new(RenderConfig::default());
        let err = renderer.render(&TreeGraph::default()).unwrap_err();
        assert!(matches!(err, RenderError::EmptyGraph));
    }
}
