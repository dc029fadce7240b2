// Integration tests for the tree wrapper and its renderers

use mlisp::config::RenderConfig;
use mlisp::parser::{parse, AstNode, MAX_NESTING_DEPTH};
use mlisp::tree::dot::to_dot;
use mlisp::tree::{DotRenderer, Render, RenderError, Tree, TreeGraph};
use std::fs;
use std::thread;

const RECURSIVE: &str = "(define foo (fun (x y) (if (not y) 1 (* x (foo (- x 1))))))";

struct Unavailable;

impl Render for Unavailable {
    fn render(&mut self, _graph: &TreeGraph) -> Result<(), RenderError> {
        Err(RenderError::Backend("no display".to_string()))
    }
}

#[test]
fn test_traversal_is_idempotent() {
    let tree = Tree::new(parse(RECURSIVE).unwrap());
    let first = tree.build().clone();
    let second = tree.build().clone();
    assert_eq!(first, second);

    // A fresh wrapper over an equal root assigns the same identities
    let again = Tree::new(parse(RECURSIVE).unwrap());
    assert_eq!(again.build(), &first);
}

#[test]
fn test_identities_follow_preorder() {
    let tree = Tree::new(parse("(define x 1)").unwrap());
    let graph = tree.build();

    let ids: Vec<&str> = graph.nodes.iter().map(|(id, _)| id.as_str()).collect();
    let expected: Vec<String> = (0..ids.len()).map(|n| format!("node{}", n)).collect();
    assert_eq!(ids, expected);

    let labels: Vec<&str> = graph.nodes.iter().map(|(_, label)| label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["program", "stmt", "def_stmt", "var", "id\n(x)", "expr", "number\n(1)"]
    );

    // Every node but the root has exactly one parent
    assert_eq!(graph.edges.len(), graph.nodes.len() - 1);
    for (id, _) in graph.nodes.iter().skip(1) {
        let parents = graph.edges.iter().filter(|(_, child)| child == id).count();
        assert_eq!(parents, 1, "{} has {} parents", id, parents);
    }
}

#[test]
fn test_outline_visits_every_node() {
    let tree = Tree::new(parse(RECURSIVE).unwrap());
    let graph = tree.build();
    let outline = graph.outline();

    assert_eq!(outline.len(), graph.nodes.len());
    assert_eq!(outline[0].depth, 0);
    assert!(outline
        .iter()
        .zip(&graph.nodes)
        .all(|(row, (id, _))| row.id == id));
}

#[test]
fn test_failed_render_does_not_fail_the_tree() {
    let tree = Tree::new(parse("(print-bool #f)").unwrap());
    assert!(!tree.draw(&mut Unavailable));
    assert_eq!(tree.root().kind().name(), "program");
}

#[test]
fn test_dot_file_output() {
    let dir = std::env::temp_dir().join(format!("mlisp-tree-tests-{}", std::process::id()));
    let config = RenderConfig::default()
        .with_graphviz_dir(&dir)
        .with_file_stem("recursive");

    let tree = Tree::new(parse(RECURSIVE).unwrap());
    let mut renderer = DotRenderer::new(config);
    assert!(tree.draw(&mut renderer));

    let written = fs::read_to_string(dir.join("recursive.gv")).unwrap();
    assert_eq!(written, to_dot(tree.build()));
    assert!(written.contains("node0 [label=\"program\"]"));
    assert!(written.contains("[label=\"id\\n(foo)\"]"));
    assert!(written.contains("node0 -> node1"));

    let _ = fs::remove_dir_all(&dir);
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_trees_cross_threads() {
    assert_send_sync::<AstNode>();
    assert_send_sync::<Tree>();
}

#[test]
fn test_parallel_parses_agree() {
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| Tree::new(parse(RECURSIVE).unwrap()).build().clone()))
        .collect();

    let graphs: Vec<TreeGraph> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let expected = Tree::new(parse(RECURSIVE).unwrap()).build().clone();
    for graph in &graphs {
        assert_eq!(graph, &expected);
    }
}

#[test]
fn test_deepest_tree_flattens() {
    let depth = MAX_NESTING_DEPTH;
    let source = format!("{}#f{}", "(not ".repeat(depth), ")".repeat(depth));
    let tree = Tree::new(parse(&source).unwrap());
    let graph = tree.build();

    // program and stmt, an expr / not pair per level, then expr and the literal
    assert_eq!(graph.nodes.len(), 2 * depth + 4);
    assert_eq!(graph.edges.len(), graph.nodes.len() - 1);
    assert_eq!(graph.nodes.last().map(|(_, l)| l.as_str()), Some("boolean\n(#f)"));

    let outline = graph.outline();
    assert_eq!(outline.last().map(|row| row.depth), Some(2 * depth + 3));
}
