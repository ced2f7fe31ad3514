use tree_sitter::Node;

use crate::types::{Position, Span};

pub fn node_to_position(node: &Node, start: bool) -> Position {
    let point = if start {
        node.start_position()
    } else {
        node.end_position()
    };
    Position {
        line: point.row as u32,
        character: point.column as u32,
    }
}

pub fn node_span(node: &Node) -> Span {
    Span {
        start: node_to_position(node, true),
        end: node_to_position(node, false),
    }
}

pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}
