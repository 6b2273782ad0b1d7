//! Graffoo: fixed palette, prefixed vocabulary names on every edge.

use crate::model::graph::{CanonicalEdge, CanonicalNode, NodeKind, PropertyCategory};
use crate::model::style::{ArrowShape, NodeShape};

use super::{EdgeStyle, NodeStyle, NotationStyle, BLACK, WHITE};

pub const CLASS_FILL: &str = "#FFFF00";
pub const DATATYPE_FILL: &str = "#CCFFCC";
pub const INDIVIDUAL_FILL: &str = "#FF7FC1";
pub const OBJECT_PROPERTY_COLOR: &str = "#000080";
pub const DATATYPE_PROPERTY_COLOR: &str = "#008000";
pub const ANNOTATION_PROPERTY_COLOR: &str = "#993300";

#[derive(Debug, Clone, Copy, Default)]
pub struct Graffoo;

impl NotationStyle for Graffoo {
    fn node_style(&self, node: &CanonicalNode) -> NodeStyle {
        match node.kind {
            NodeKind::Class => NodeStyle::fixed(NodeShape::RoundRectangle, CLASS_FILL),
            NodeKind::Datatype | NodeKind::Literal => {
                NodeStyle::fixed(NodeShape::ParallelogramRight, DATATYPE_FILL)
            }
            NodeKind::Individual => NodeStyle::fixed(NodeShape::SmallCircle, INDIVIDUAL_FILL),
            NodeKind::Expression(_) => NodeStyle::fixed(NodeShape::Circle, WHITE),
            _ => NodeStyle::fixed(NodeShape::SquareRectangle, WHITE),
        }
    }

    fn edge_style(&self, edge: &CanonicalEdge) -> EdgeStyle {
        match edge.relation.property_category() {
            Some(PropertyCategory::Object) => EdgeStyle::fixed(
                ArrowShape::CircleSolid,
                ArrowShape::TriangleSolid,
                OBJECT_PROPERTY_COLOR,
            ),
            Some(PropertyCategory::Datatype) => EdgeStyle::fixed(
                ArrowShape::CircleEmpty,
                ArrowShape::TriangleEmpty,
                DATATYPE_PROPERTY_COLOR,
            ),
            Some(PropertyCategory::Annotation) => EdgeStyle::fixed(
                ArrowShape::Backslash,
                ArrowShape::AngleBracket,
                ANNOTATION_PROPERTY_COLOR,
            ),
            Some(PropertyCategory::Rdf) | None => {
                EdgeStyle::fixed(ArrowShape::None, ArrowShape::TriangleSolid, BLACK)
            }
        }
    }
}
