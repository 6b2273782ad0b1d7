//! Notation renderers: map canonical nodes and edges to concrete styles.
//!
//! Each notation implements [`NotationStyle`]; [`Renderer`] is the closed set
//! of notations selected by a request. Kinds a notation has no rule for get
//! that notation's default style, so no node or edge is ever dropped.

mod custom;
mod graffoo;
mod uml;
mod vowl;

use std::collections::HashMap;

use tracing::debug;

pub use custom::Custom;
pub use graffoo::Graffoo;
pub use uml::Uml;
pub use vowl::Vowl;

use crate::model::graph::{
    CanonicalEdge, CanonicalGraph, CanonicalNode, NodeKind, Relation,
};
use crate::model::request::{Notation, Scope, StyleFields};
use crate::model::style::{ArrowShape, Color, LineType, NodeShape};

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#FFFFFF";
pub const TITLE_FILL: &str = "#99CCFF";
pub const PREFIXES_FILL: &str = "#B7B69E";

// ---------------------------------------------------------------------------
// Styled graph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
    pub shape: NodeShape,
    pub fill: Color,
    pub text: Color,
    pub border_color: Color,
    pub border_type: LineType,
}

impl NodeStyle {
    /// Black text and a solid black border.
    pub fn new(shape: NodeShape, fill: Color) -> Self {
        Self {
            shape,
            fill,
            text: Color::fixed(BLACK),
            border_color: Color::fixed(BLACK),
            border_type: LineType::Solid,
        }
    }

    pub(crate) fn fixed(shape: NodeShape, fill: &'static str) -> Self {
        Self::new(shape, Color::fixed(fill))
    }

    pub fn with_border_type(mut self, border_type: LineType) -> Self {
        self.border_type = border_type;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub source: ArrowShape,
    pub target: ArrowShape,
    pub color: Color,
    pub line: LineType,
    pub width: f32,
}

impl EdgeStyle {
    /// A solid line of width 1.0.
    pub fn new(source: ArrowShape, target: ArrowShape, color: Color) -> Self {
        Self {
            source,
            target,
            color,
            line: LineType::Solid,
            width: 1.0,
        }
    }

    pub(crate) fn fixed(source: ArrowShape, target: ArrowShape, color: &'static str) -> Self {
        Self::new(source, target, Color::fixed(color))
    }

    pub fn with_line(mut self, line: LineType) -> Self {
        self.line = line;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

/// How a node is drawn: a plain labelled shape or a compartmented entity box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeForm {
    Shape,
    Entity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledNode {
    pub id: String,
    pub kind: NodeKind,
    pub iri: Option<String>,
    pub label: String,
    /// Attribute rows of an entity box.
    pub attributes: Vec<String>,
    pub form: NodeForm,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub style: EdgeStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledGraph {
    pub nodes: Vec<StyledNode>,
    pub edges: Vec<StyledEdge>,
}

/// Graph after a notation's pre-pass, with attribute rows keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct Prepared {
    pub graph: CanonicalGraph,
    pub attributes: HashMap<String, Vec<String>>,
}

// ---------------------------------------------------------------------------
// NotationStyle
// ---------------------------------------------------------------------------

/// Styling contract shared by every notation.
pub trait NotationStyle {
    /// Optional restructuring before styling. The default keeps the graph as is.
    fn prepass(&self, graph: CanonicalGraph) -> Prepared {
        Prepared {
            graph,
            attributes: HashMap::new(),
        }
    }

    fn node_form(&self, _node: &CanonicalNode) -> NodeForm {
        NodeForm::Shape
    }

    fn node_style(&self, node: &CanonicalNode) -> NodeStyle;

    fn node_label(&self, node: &CanonicalNode) -> String {
        node.label.clone()
    }

    fn edge_style(&self, edge: &CanonicalEdge) -> EdgeStyle;

    fn edge_label(&self, edge: &CanonicalEdge) -> String {
        default_edge_label(edge)
    }
}

/// The notation selected for one request.
#[derive(Debug, Clone)]
pub enum Renderer {
    Graffoo(Graffoo),
    Vowl(Vowl),
    Uml(Uml),
    Custom(Custom),
}

impl Renderer {
    pub fn new(notation: Notation, scope: Scope, style: &StyleFields) -> Self {
        match notation {
            Notation::Graffoo => Renderer::Graffoo(Graffoo),
            Notation::Vowl => Renderer::Vowl(Vowl),
            Notation::Uml => Renderer::Uml(Uml::from_fields(style)),
            Notation::Custom => Renderer::Custom(Custom::new(style.clone(), scope)),
        }
    }

    fn notation(&self) -> &dyn NotationStyle {
        match self {
            Renderer::Graffoo(n) => n,
            Renderer::Vowl(n) => n,
            Renderer::Uml(n) => n,
            Renderer::Custom(n) => n,
        }
    }

    /// Style every node and edge. Header nodes get fixed header styles.
    pub fn render(&self, graph: CanonicalGraph) -> StyledGraph {
        let notation = self.notation();
        let Prepared {
            graph,
            mut attributes,
        } = notation.prepass(graph);
        let (nodes, edges) = graph.into_parts();

        let nodes: Vec<StyledNode> = nodes
            .iter()
            .map(|node| {
                let (style, form, label) = match node.kind {
                    NodeKind::Title => (
                        NodeStyle::fixed(NodeShape::SquareRectangle, TITLE_FILL),
                        NodeForm::Shape,
                        node.label.clone(),
                    ),
                    NodeKind::Prefixes => (
                        NodeStyle::fixed(NodeShape::SquareRectangle, PREFIXES_FILL),
                        NodeForm::Shape,
                        node.label.clone(),
                    ),
                    _ => (
                        notation.node_style(node),
                        notation.node_form(node),
                        notation.node_label(node),
                    ),
                };
                StyledNode {
                    id: node.id.clone(),
                    kind: node.kind,
                    iri: node.iri.clone(),
                    label,
                    attributes: attributes.remove(&node.id).unwrap_or_default(),
                    form,
                    style,
                }
            })
            .collect();

        let edges: Vec<StyledEdge> = edges
            .iter()
            .map(|edge| StyledEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                label: notation.edge_label(edge),
                style: notation.edge_style(edge),
            })
            .collect();

        debug!(nodes = nodes.len(), edges = edges.len(), "styled graph");
        StyledGraph { nodes, edges }
    }
}

// ---------------------------------------------------------------------------
// Shared labelling
// ---------------------------------------------------------------------------

/// Prefixed vocabulary name of a structural relation. Property edges have none.
pub fn relation_name(relation: &Relation) -> Option<String> {
    let name = match relation {
        Relation::SubClassOf => "rdfs:subClassOf".to_string(),
        Relation::TypeOf => "rdf:type".to_string(),
        Relation::EquivalentClass
        | Relation::DisjointWith
        | Relation::UnionMember
        | Relation::IntersectionMember
        | Relation::ComplementOf
        | Relation::OneOfMember
        | Relation::ValuesFrom(_)
        | Relation::HasValue => format!("owl:{}", relation.token()),
        Relation::ContainerMember(_)
        | Relation::ListFirst
        | Relation::ListRest
        | Relation::ReifiedSubject
        | Relation::ReifiedPredicate
        | Relation::ReifiedObject => relation.token(),
        Relation::Property { .. } | Relation::Assertion { .. } | Relation::Collapsed(_) => {
            return None
        }
    };
    Some(name)
}

/// Vocabulary name for structural edges, property label (with flags) otherwise.
pub fn default_edge_label(edge: &CanonicalEdge) -> String {
    relation_name(&edge.relation).unwrap_or_else(|| edge.display_label())
}
