//! Render a compiled workflow to Graphviz DOT or plain text.
//!
//! Only declared edges are drawn; `Goto` jumps taken at runtime do not appear
//! here.

use super::compiled::CompiledWorkflow;
use super::workflow::END;

/// Graphviz DOT representation of the workflow structure.
///
/// Nodes and edges are emitted in sorted order so output is deterministic.
pub fn render_dot<S>(workflow: &CompiledWorkflow<S>) -> String {
    let mut dot = String::from("digraph {\n  rankdir=LR;\n  node [shape=box];\n\n");

    let mut names: Vec<&String> = workflow.nodes.keys().collect();
    names.sort();
    for name in names {
        if *name == workflow.entry {
            dot.push_str(&format!("  \"{}\" [style=bold];\n", name));
        } else {
            dot.push_str(&format!("  \"{}\";\n", name));
        }
    }
    dot.push_str(&format!("  \"{}\" [label=\"END\", style=dashed];\n\n", END));

    let mut edges: Vec<(&String, &String)> = workflow.next_map.iter().collect();
    edges.sort();
    for (from, to) in edges {
        dot.push_str(&format!("  \"{}\" -> \"{}\";\n", from, to));
    }

    dot.push_str("}\n");
    dot
}

/// Plain-text summary of the workflow structure.
pub fn render_text<S>(workflow: &CompiledWorkflow<S>) -> String {
    let mut text = String::new();
    text.push_str("Workflow:\n");
    text.push_str(&format!("  entry: {}\n", workflow.entry));
    text.push_str(&format!("  nodes: {}\n", workflow.nodes.len()));

    let mut edges: Vec<(&String, &String)> = workflow.next_map.iter().collect();
    edges.sort();
    for (from, to) in edges {
        text.push_str(&format!("  {} -> {}\n", from, to));
    }

    text
}
