//! Provenance graph built from a document, and its Graphviz DOT form.

use std::collections::HashMap;
use std::fmt::Write as _;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::model::{ElementKind, ProvDocument, RelationKind};

/// How a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStyle {
    /// A declared element.
    Element(ElementKind),
    /// An identifier referenced by a relation but never declared.
    Generic,
    /// Stand-in for an absent optional endpoint.
    Blank,
}

impl NodeStyle {
    const fn attributes(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Element(ElementKind::Entity) => &[
                ("shape", "oval"),
                ("style", "filled"),
                ("fillcolor", "#FFFC87"),
                ("color", "#808080"),
            ],
            Self::Element(ElementKind::Activity) => &[
                ("shape", "box"),
                ("style", "filled"),
                ("fillcolor", "#9FB1FC"),
                ("color", "#0000FF"),
            ],
            Self::Element(ElementKind::Agent) => &[
                ("shape", "house"),
                ("style", "filled"),
                ("fillcolor", "#FED37F"),
            ],
            Self::Generic => &[
                ("shape", "oval"),
                ("style", "filled"),
                ("fillcolor", "lightgray"),
                ("color", "dimgray"),
            ],
            Self::Blank => &[("shape", "point")],
        }
    }
}

/// A graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvNode {
    /// Displayed identifier; empty for blank nodes.
    pub label: String,
    /// Drawing style.
    pub style: NodeStyle,
}

const fn edge_color(kind: RelationKind) -> Option<&'static str> {
    match kind {
        RelationKind::Generation => Some("darkgreen"),
        RelationKind::Usage => Some("red4"),
        RelationKind::Attribution | RelationKind::Association | RelationKind::Delegation => {
            Some("#FED37F")
        }
        RelationKind::Influence => Some("grey"),
        _ => None,
    }
}

/// Directed provenance graph; edges point from a relation's source to its target.
#[derive(Debug, Clone, Default)]
pub struct ProvGraph {
    graph: DiGraph<ProvNode, RelationKind>,
}

impl ProvGraph {
    /// Build the graph for `document`.
    ///
    /// Elements become nodes first. Identifiers referenced only by relations get a generic
    /// node, and each absent optional target gets its own blank node.
    #[must_use]
    pub fn from_document(document: &ProvDocument) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for element in &document.elements {
            nodes.entry(element.id.as_str()).or_insert_with(|| {
                graph.add_node(ProvNode {
                    label: element.id.clone(),
                    style: NodeStyle::Element(element.kind),
                })
            });
        }

        for relation in &document.relations {
            let source = *nodes
                .entry(relation.source.as_str())
                .or_insert_with(|| generic(&mut graph, &relation.source));
            let target = match &relation.target {
                Some(target) => *nodes
                    .entry(target.as_str())
                    .or_insert_with(|| generic(&mut graph, target)),
                None => graph.add_node(ProvNode {
                    label: String::new(),
                    style: NodeStyle::Blank,
                }),
            };
            graph.add_edge(source, target, relation.kind);
        }

        Self { graph }
    }

    /// Number of nodes, blank ones included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ProvNode> {
        self.graph.node_weights()
    }

    /// Edges as `(source label, target label, kind)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, RelationKind)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].label.as_str(),
                self.graph[edge.target()].label.as_str(),
                *edge.weight(),
            )
        })
    }

    /// Render the graph in Graphviz DOT syntax, drawn bottom to top.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph prov {\n  rankdir=\"BT\";\n");

        for index in self.graph.node_indices() {
            let node = &self.graph[index];
            let _ = write!(dot, "  n{} [label=\"{}\"", index.index(), escape(&node.label));
            for (name, value) in node.style.attributes() {
                let _ = write!(dot, ", {name}=\"{value}\"");
            }
            dot.push_str("];\n");
        }

        for edge in self.graph.edge_references() {
            let kind = *edge.weight();
            let _ = write!(
                dot,
                "  n{} -> n{} [label=\"{}\", fontsize=\"10.0\"",
                edge.source().index(),
                edge.target().index(),
                kind.section()
            );
            if let Some(color) = edge_color(kind) {
                let _ = write!(dot, ", color=\"{color}\", fontcolor=\"{color}\"");
            }
            dot.push_str("];\n");
        }

        dot.push_str("}\n");
        dot
    }
}

fn generic(graph: &mut DiGraph<ProvNode, RelationKind>, id: &str) -> NodeIndex {
    graph.add_node(ProvNode {
        label: id.to_string(),
        style: NodeStyle::Generic,
    })
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
