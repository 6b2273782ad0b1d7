//! UML-like notation: classes and individuals are compartmented boxes whose
//! attribute rows come from datatype properties and datatype assertions.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::model::graph::{
    CanonicalEdge, CanonicalGraph, CanonicalNode, NodeKind, PropertyCategory, Relation,
};
use crate::model::request::StyleFields;
use crate::model::style::{ArrowShape, Color, LineType, NodeShape};

use super::{default_edge_label, EdgeStyle, NodeForm, NodeStyle, NotationStyle, Prepared, BLACK, WHITE};

pub const DEFAULT_NODE_COLOR: &str = "#FFFF99";
pub const DEFAULT_DATA_NODE_COLOR: &str = "#CCCC66";

#[derive(Debug, Clone)]
pub struct Uml {
    node_color: Color,
    data_node_color: Color,
}

impl Default for Uml {
    fn default() -> Self {
        Self {
            node_color: Color::fixed(DEFAULT_NODE_COLOR),
            data_node_color: Color::fixed(DEFAULT_DATA_NODE_COLOR),
        }
    }
}

impl Uml {
    /// Read the two background colors; unusable values fall back to defaults.
    pub fn from_fields(style: &StyleFields) -> Self {
        let defaults = Self::default();
        Self {
            node_color: style
                .uml_node_color()
                .and_then(Color::parse)
                .unwrap_or(defaults.node_color),
            data_node_color: style
                .uml_data_node_color()
                .and_then(Color::parse)
                .unwrap_or(defaults.data_node_color),
        }
    }
}

fn is_boxed(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::Class | NodeKind::Individual)
}

fn is_value(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::Datatype | NodeKind::Literal)
}

impl NotationStyle for Uml {
    /// Fold datatype edges leaving a class or individual into attribute rows,
    /// then drop value nodes nothing points at any more.
    fn prepass(&self, graph: CanonicalGraph) -> Prepared {
        let (nodes, edges) = graph.into_parts();
        let kinds: HashMap<&str, NodeKind> = nodes.iter().map(|n| (n.id.as_str(), n.kind)).collect();
        let labels: HashMap<&str, &str> = nodes
            .iter()
            .map(|n| (n.id.as_str(), n.label.as_str()))
            .collect();

        let mut attributes: HashMap<String, Vec<String>> = HashMap::new();
        let mut kept = Vec::with_capacity(edges.len());
        for edge in &edges {
            let folds = edge.relation.property_category() == Some(PropertyCategory::Datatype)
                && kinds.get(edge.source.as_str()).copied().is_some_and(is_boxed)
                && kinds.get(edge.target.as_str()).copied().is_some_and(is_value);
            if !folds {
                kept.push(edge.clone());
                continue;
            }
            let value = labels.get(edge.target.as_str()).copied().unwrap_or_default();
            // Values are asserted, datatypes are declared ranges.
            let separator = match kinds.get(edge.target.as_str()) {
                Some(NodeKind::Literal) => " = ",
                _ => ": ",
            };
            let rows = attributes.entry(edge.source.clone()).or_default();
            for part in &edge.label_parts {
                rows.push(format!("{part}{separator}{value}"));
            }
        }

        let referenced: HashSet<&str> = kept
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        let before = nodes.len();
        let nodes: Vec<CanonicalNode> = nodes
            .iter()
            .filter(|n| !is_value(n.kind) || referenced.contains(n.id.as_str()))
            .cloned()
            .collect();
        debug!(
            attribute_rows = attributes.values().map(Vec::len).sum::<usize>(),
            removed_nodes = before - nodes.len(),
            "folded datatype edges into attribute rows"
        );
        Prepared {
            graph: CanonicalGraph::from_parts(nodes, kept),
            attributes,
        }
    }

    fn node_form(&self, node: &CanonicalNode) -> NodeForm {
        if is_boxed(node.kind) {
            NodeForm::Entity
        } else {
            NodeForm::Shape
        }
    }

    fn node_style(&self, node: &CanonicalNode) -> NodeStyle {
        match node.kind {
            NodeKind::Class | NodeKind::Individual => {
                NodeStyle::new(NodeShape::SquareRectangle, self.node_color.clone())
            }
            NodeKind::Datatype | NodeKind::Literal => {
                NodeStyle::new(NodeShape::SquareRectangle, self.data_node_color.clone())
            }
            _ => NodeStyle::fixed(NodeShape::SquareRectangle, WHITE),
        }
    }

    fn edge_style(&self, edge: &CanonicalEdge) -> EdgeStyle {
        match edge.relation {
            Relation::SubClassOf => {
                EdgeStyle::fixed(ArrowShape::None, ArrowShape::TriangleEmpty, BLACK)
            }
            Relation::TypeOf | Relation::EquivalentClass | Relation::DisjointWith => {
                EdgeStyle::fixed(ArrowShape::None, ArrowShape::AngleBracket, BLACK)
                    .with_line(LineType::Dashed)
            }
            _ => EdgeStyle::fixed(ArrowShape::None, ArrowShape::AngleBracket, BLACK),
        }
    }

    fn edge_label(&self, edge: &CanonicalEdge) -> String {
        match edge.relation {
            Relation::SubClassOf => String::new(),
            _ => default_edge_label(edge),
        }
    }
}
