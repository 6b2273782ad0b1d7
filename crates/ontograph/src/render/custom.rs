//! Custom notation: every style attribute comes from the request's field
//! groups. Missing or unusable fields fall back to the group's default.

use crate::model::graph::{CanonicalEdge, CanonicalNode, NodeKind, PropertyCategory, Relation};
use crate::model::request::{EdgeFields, EdgeGroup, NodeFields, NodeGroup, Scope, StyleFields};
use crate::model::style::{ArrowShape, Color, LineType, NodeShape};

use super::graffoo::{
    ANNOTATION_PROPERTY_COLOR, CLASS_FILL, DATATYPE_FILL, DATATYPE_PROPERTY_COLOR,
    INDIVIDUAL_FILL, OBJECT_PROPERTY_COLOR,
};
use super::{default_edge_label, EdgeStyle, NodeStyle, NotationStyle, BLACK, WHITE};

#[derive(Debug, Clone)]
pub struct Custom {
    style: StyleFields,
    scope: Scope,
}

impl Custom {
    pub fn new(style: StyleFields, scope: Scope) -> Self {
        Self { style, scope }
    }

    fn node_group(&self, kind: NodeKind) -> Option<NodeGroup> {
        let class_group = match self.scope {
            Scope::Property | Scope::Both => NodeGroup::Object,
            _ => NodeGroup::Class,
        };
        match kind {
            NodeKind::Class | NodeKind::Expression(_) => Some(class_group),
            NodeKind::Individual => Some(NodeGroup::Individual),
            NodeKind::Datatype | NodeKind::Literal => Some(NodeGroup::Data),
            NodeKind::Property(_) => Some(NodeGroup::Object),
            _ => None,
        }
    }

    fn edge_group(relation: &Relation) -> EdgeGroup {
        match relation {
            Relation::TypeOf => EdgeGroup::TypeOf,
            Relation::Property { category, .. }
            | Relation::Assertion { category, .. }
            | Relation::Collapsed(category) => match category {
                PropertyCategory::Object => EdgeGroup::ObjectProperty,
                PropertyCategory::Datatype => EdgeGroup::DataProperty,
                PropertyCategory::Annotation => EdgeGroup::AnnotationProperty,
                PropertyCategory::Rdf => EdgeGroup::Rdf,
            },
            Relation::ContainerMember(_)
            | Relation::ListFirst
            | Relation::ListRest
            | Relation::ReifiedSubject
            | Relation::ReifiedPredicate
            | Relation::ReifiedObject => EdgeGroup::Rdf,
            _ => EdgeGroup::SubclassOf,
        }
    }
}

fn default_node_style(group: NodeGroup) -> NodeStyle {
    match group {
        NodeGroup::Class | NodeGroup::Object => NodeStyle::fixed(NodeShape::RoundRectangle, CLASS_FILL),
        NodeGroup::Individual => NodeStyle::fixed(NodeShape::SmallCircle, INDIVIDUAL_FILL),
        NodeGroup::Data => NodeStyle::fixed(NodeShape::ParallelogramRight, DATATYPE_FILL),
    }
}

fn default_edge_style(group: EdgeGroup) -> EdgeStyle {
    match group {
        EdgeGroup::ObjectProperty => EdgeStyle::fixed(
            ArrowShape::CircleSolid,
            ArrowShape::TriangleSolid,
            OBJECT_PROPERTY_COLOR,
        ),
        EdgeGroup::DataProperty => EdgeStyle::fixed(
            ArrowShape::CircleEmpty,
            ArrowShape::TriangleEmpty,
            DATATYPE_PROPERTY_COLOR,
        ),
        EdgeGroup::AnnotationProperty => EdgeStyle::fixed(
            ArrowShape::Backslash,
            ArrowShape::AngleBracket,
            ANNOTATION_PROPERTY_COLOR,
        ),
        EdgeGroup::SubclassOf | EdgeGroup::TypeOf | EdgeGroup::Rdf => {
            EdgeStyle::fixed(ArrowShape::None, ArrowShape::TriangleSolid, BLACK)
        }
    }
}

fn node_style_from(fields: NodeFields<'_>, fallback: NodeStyle) -> NodeStyle {
    NodeStyle {
        shape: fields.shape.1.and_then(NodeShape::from_token).unwrap_or(fallback.shape),
        fill: fields.fill.1.and_then(Color::parse).unwrap_or(fallback.fill),
        text: fields.text.1.and_then(Color::parse).unwrap_or(fallback.text),
        border_color: fields
            .border_color
            .1
            .and_then(Color::parse)
            .unwrap_or(fallback.border_color),
        border_type: fields
            .border_type
            .1
            .and_then(LineType::from_token)
            .unwrap_or(fallback.border_type),
    }
}

fn edge_style_from(fields: EdgeFields<'_>, fallback: EdgeStyle) -> EdgeStyle {
    EdgeStyle {
        source: fields.source.1.and_then(ArrowShape::from_token).unwrap_or(fallback.source),
        target: fields.target.1.and_then(ArrowShape::from_token).unwrap_or(fallback.target),
        color: fields.color.1.and_then(Color::parse).unwrap_or(fallback.color),
        line: fields.line.1.and_then(LineType::from_token).unwrap_or(fallback.line),
        width: fallback.width,
    }
}

impl NotationStyle for Custom {
    fn node_style(&self, node: &CanonicalNode) -> NodeStyle {
        match self.node_group(node.kind) {
            Some(group) => node_style_from(self.style.node_group(group), default_node_style(group)),
            None => NodeStyle::fixed(NodeShape::SquareRectangle, WHITE),
        }
    }

    fn edge_style(&self, edge: &CanonicalEdge) -> EdgeStyle {
        let group = Custom::edge_group(&edge.relation);
        edge_style_from(self.style.edge_group(group), default_edge_style(group))
    }

    /// subClassOf and typeOf edges may carry caller-supplied text.
    fn edge_label(&self, edge: &CanonicalEdge) -> String {
        let text = match edge.relation {
            Relation::SubClassOf | Relation::TypeOf => {
                self.style.edge_group(Custom::edge_group(&edge.relation)).text
            }
            _ => None,
        };
        match text {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => default_edge_label(edge),
        }
    }
}
