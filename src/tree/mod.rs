//! Tree wrapper and renderer boundary
//!
//! [`Tree`] owns a parsed `program` node and flattens it once into a
//! [`TreeGraph`]: a pre-order list of `(identity, label)` nodes and a list of
//! `(parent, child)` edges. Renderers only ever see the graph.
//!
//! Rendering is best effort. [`Tree::draw`] logs a renderer failure and
//! carries on; a tree that cannot be drawn is still a valid tree.

pub mod dot;

use crate::parser::ast::AstNode;
use rustc_hash::FxHashMap;
use std::io;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

pub use dot::DotRenderer;

/// Errors a renderer may report to [`Tree::draw`]
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("rendering backend unavailable: {0}")]
    Backend(String),

    #[error("nothing to render")]
    EmptyGraph,
}

/// Consumer of the flattened tree
pub trait Render {
    fn render(&mut self, graph: &TreeGraph) -> Result<(), RenderError>;
}

/// Flattened, identity-keyed view of an AST
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeGraph {
    /// `(identity, label)` in pre-order; the root comes first
    pub nodes: Vec<(String, String)>,
    /// `(parent identity, child identity)` in pre-order
    pub edges: Vec<(String, String)>,
}

/// One line of an indented outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow<'a> {
    pub depth: usize,
    pub id: &'a str,
    pub label: &'a str,
}

impl TreeGraph {
    pub fn root(&self) -> Option<&str> {
        self.nodes.first().map(|(id, _)| id.as_str())
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.nodes
            .iter()
            .find(|(node_id, _)| node_id == id)
            .map(|(_, label)| label.as_str())
    }

    pub fn children<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |(parent, _)| parent == id)
            .map(|(_, child)| child.as_str())
    }

    /// Depth-first outline rebuilt from the node and edge lists
    pub fn outline(&self) -> Vec<OutlineRow<'_>> {
        let labels: FxHashMap<&str, &str> = self
            .nodes
            .iter()
            .map(|(id, label)| (id.as_str(), label.as_str()))
            .collect();

        let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for (parent, child) in &self.edges {
            children.entry(parent.as_str()).or_default().push(child.as_str());
        }

        let mut rows = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(&str, usize)> = self.root().map(|id| (id, 0)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            rows.push(OutlineRow {
                depth,
                id,
                label: labels.get(id).copied().unwrap_or(id),
            });
            if let Some(kids) = children.get(id) {
                stack.extend(kids.iter().rev().map(|kid| (*kid, depth + 1)));
            }
        }

        rows
    }
}

/// Owner of a parsed tree
#[derive(Debug)]
pub struct Tree {
    root: AstNode,
    graph: OnceLock<TreeGraph>,
}

impl Tree {
    pub fn new(root: AstNode) -> Self {
        Tree {
            root,
            graph: OnceLock::new(),
        }
    }

    pub fn root(&self) -> &AstNode {
        &self.root
    }

    /// Flatten the tree. The walk runs once; later calls return the same graph.
    pub fn build(&self) -> &TreeGraph {
        self.graph.get_or_init(|| collect(&self.root))
    }

    /// Hand the graph to `renderer`. Failures are logged, never returned.
    ///
    /// Returns whether the renderer succeeded.
    pub fn draw<R: Render + ?Sized>(&self, renderer: &mut R) -> bool {
        match renderer.render(self.build()) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "Graph creation error");
                false
            }
        }
    }
}

/// Pre-order walk assigning `node{N}` identities, N being the visit index
fn collect(root: &AstNode) -> TreeGraph {
    let mut graph = TreeGraph::default();
    let mut stack: Vec<(&AstNode, Option<String>)> = vec![(root, None)];

    while let Some((node, parent)) = stack.pop() {
        let id = format!("node{}", graph.nodes.len());
        if let Some(parent) = parent {
            graph.edges.push((parent, id.clone()));
        }

        let mut label = node.kind().name().to_string();
        for leaf in node.leaves() {
            label.push_str(&format!("\n({leaf})"));
        }

        let children: Vec<&AstNode> = node.child_nodes().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, Some(id.clone()))));
        graph.nodes.push((id, label));
    }

    graph
}
