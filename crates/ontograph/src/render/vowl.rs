//! VOWL: the W3C-style visual notation. Fixed palette, black edges of width
//! 2.0, unprefixed and truncated labels.
//!
//! Property edges do not share generic endpoints: every property gets its own
//! `owl:Thing` (or `rdfs:Resource`) node and its own datatype node, named
//! `<domain><property><range>` or `<property><range>` after what it stands in for.

use std::collections::{HashMap, HashSet};

use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::model::graph::{
    edge_id, CanonicalEdge, CanonicalGraph, CanonicalNode, NodeKind, PropertyCategory, Relation,
};
use crate::model::iri::local_name;
use crate::model::style::{ArrowShape, LineType, NodeShape};
use crate::model::vocab::{owl, rdf, rdfs};

use super::{default_edge_label, EdgeStyle, NodeStyle, NotationStyle, Prepared, BLACK, WHITE};

pub const CLASS_FILL: &str = "#AACCFF";
pub const EXTERNAL_FILL: &str = "#3366CC";
pub const DEPRECATED_FILL: &str = "#CCCCCC";
pub const VOCABULARY_FILL: &str = "#CC99CC";
pub const DATATYPE_FILL: &str = "#FFCC33";

const EDGE_WIDTH: f32 = 2.0;
const MAX_LABEL_CHARS: usize = 15;
const TRUNCATED_CHARS: usize = 12;

#[derive(Debug, Clone, Copy, Default)]
pub struct Vowl;

impl Vowl {
    fn is_vocabulary(node: &CanonicalNode) -> bool {
        node.iri
            .as_deref()
            .is_some_and(|iri| iri.starts_with(rdf::NS) || iri.starts_with(rdfs::NS))
    }

    fn is_thing(node: &CanonicalNode) -> bool {
        node.iri.as_deref() == Some(owl::THING)
    }

    /// Label text before the external marker. Prefixed names lose their prefix.
    fn display_text(node: &CanonicalNode) -> String {
        let unlabelled =
            node.label == node.id || percent_decode_str(&node.id).decode_utf8_lossy() == node.label;
        if unlabelled {
            vowl_text(&node.label)
        } else {
            truncate(&node.label)
        }
    }
}

/// Which end of a property edge gets a private node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Domain,
    Range,
}

/// `owl:Thing` or `rdfs:Resource`; only the latter when `resource_only`.
fn is_generic(node: &CanonicalNode, resource_only: bool) -> bool {
    match node.iri.as_deref() {
        Some(owl::THING) => !resource_only,
        Some(rdfs::RESOURCE) => true,
        _ => false,
    }
}

/// The end of a property edge that is split off, with the id of its private node.
fn split_end(
    category: PropertyCategory,
    property: &str,
    domain: &CanonicalNode,
    range: &CanonicalNode,
) -> Option<(End, String)> {
    let (d, r) = (domain.id.as_str(), range.id.as_str());
    let own_domain = || Some((End::Domain, format!("{d}{property}{r}")));
    let own_range = || Some((End::Range, format!("{r}{property}{d}")));
    let own_value = || Some((End::Range, format!("{property}{r}")));
    if is_generic(domain, false) && is_generic(range, false) {
        return Some((End::Range, format!("{d}{property}{r}")));
    }
    match category {
        PropertyCategory::Object if Vowl::is_thing(domain) => own_domain(),
        PropertyCategory::Object if Vowl::is_thing(range) => own_range(),
        PropertyCategory::Object => None,
        PropertyCategory::Datatype | PropertyCategory::Annotation => own_value(),
        PropertyCategory::Rdf if matches!(range.kind, NodeKind::Datatype | NodeKind::Literal) => {
            own_value()
        }
        PropertyCategory::Rdf if is_generic(domain, true) => own_domain(),
        PropertyCategory::Rdf if is_generic(range, true) => own_range(),
        PropertyCategory::Rdf => None,
    }
}

impl NotationStyle for Vowl {
    /// Give each property edge private copies of generic or datatype endpoints.
    /// Shared nodes left without edges are dropped.
    fn prepass(&self, graph: CanonicalGraph) -> Prepared {
        let (nodes, mut edges) = graph.into_parts();
        let positions: HashMap<String, usize> = nodes
            .iter()
            .enumerate()
            .map(|(pos, n)| (n.id.clone(), pos))
            .collect();

        let mut copies: HashMap<usize, Vec<CanonicalNode>> = HashMap::new();
        let mut copy_ids = HashSet::new();
        let mut split_from = HashSet::new();
        for edge in &mut edges {
            let Relation::Property { category, property } = &edge.relation else {
                continue;
            };
            let (Some(&d), Some(&r)) = (positions.get(&edge.source), positions.get(&edge.target))
            else {
                continue;
            };
            let Some((end, id)) = split_end(*category, property, &nodes[d], &nodes[r]) else {
                continue;
            };
            let shared = match end {
                End::Domain => d,
                End::Range => r,
            };
            if positions.contains_key(&id) {
                continue;
            }
            if copy_ids.insert(id.clone()) {
                let mut copy = nodes[shared].clone();
                copy.label = Vowl::display_text(&copy);
                copy.id = id.clone();
                copies.entry(shared).or_default().push(copy);
            }
            split_from.insert(shared);
            match end {
                End::Domain => edge.source = id,
                End::Range => edge.target = id,
            }
            edge.id = edge_id(&edge.source, &edge.relation, &edge.target);
        }

        let referenced: HashSet<&str> = edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        let mut kept = Vec::with_capacity(nodes.len() + copy_ids.len());
        for (pos, node) in nodes.into_iter().enumerate() {
            if !split_from.contains(&pos) || referenced.contains(node.id.as_str()) {
                kept.push(node);
            }
            if let Some(extra) = copies.remove(&pos) {
                kept.extend(extra);
            }
        }
        debug!(
            split_nodes = copy_ids.len(),
            nodes = kept.len(),
            "split shared property endpoints"
        );
        Prepared {
            graph: CanonicalGraph::from_parts(kept, edges),
            attributes: HashMap::new(),
        }
    }

    fn node_style(&self, node: &CanonicalNode) -> NodeStyle {
        match node.kind {
            NodeKind::Class if node.deprecated => NodeStyle::fixed(NodeShape::Circle, DEPRECATED_FILL),
            NodeKind::Class if Vowl::is_thing(node) => {
                NodeStyle::fixed(NodeShape::Circle, WHITE).with_border_type(LineType::Dashed)
            }
            NodeKind::Class if Vowl::is_vocabulary(node) => {
                NodeStyle::fixed(NodeShape::Circle, VOCABULARY_FILL)
            }
            NodeKind::Class if node.external => NodeStyle::fixed(NodeShape::Circle, EXTERNAL_FILL),
            NodeKind::Class | NodeKind::Expression(_) => {
                NodeStyle::fixed(NodeShape::Circle, CLASS_FILL)
            }
            NodeKind::Datatype | NodeKind::Literal => {
                NodeStyle::fixed(NodeShape::SquareRectangle, DATATYPE_FILL)
            }
            NodeKind::Property(_) => NodeStyle::fixed(NodeShape::Ellipse, CLASS_FILL),
            _ => NodeStyle::fixed(NodeShape::SquareRectangle, WHITE),
        }
    }

    fn node_label(&self, node: &CanonicalNode) -> String {
        let label = Vowl::display_text(node);
        let shows_external = node.kind == NodeKind::Class
            && node.external
            && !Vowl::is_vocabulary(node)
            && !Vowl::is_thing(node);
        if shows_external {
            format!("{label}\n(external)")
        } else {
            label
        }
    }

    fn edge_style(&self, edge: &CanonicalEdge) -> EdgeStyle {
        let style = match edge.relation {
            Relation::SubClassOf => EdgeStyle::fixed(ArrowShape::None, ArrowShape::TriangleEmpty, BLACK)
                .with_line(LineType::Dotted),
            Relation::EquivalentClass | Relation::DisjointWith => {
                EdgeStyle::fixed(ArrowShape::None, ArrowShape::None, BLACK).with_line(LineType::Dashed)
            }
            _ => EdgeStyle::fixed(ArrowShape::None, ArrowShape::TriangleSolid, BLACK),
        };
        style.with_width(EDGE_WIDTH)
    }

    fn edge_label(&self, edge: &CanonicalEdge) -> String {
        match edge.relation {
            Relation::SubClassOf => "Subclass of".to_string(),
            Relation::EquivalentClass => "Equivalent to".to_string(),
            Relation::DisjointWith => "Disjoint with".to_string(),
            _ if edge.label_parts.is_empty() => vowl_text(&default_edge_label(edge)),
            _ => {
                let mut label = edge
                    .label_parts
                    .iter()
                    .map(|part| vowl_text(part))
                    .collect::<Vec<_>>()
                    .join(",\n");
                let flags = edge.flags.names();
                if !flags.is_empty() {
                    label.push_str(&format!(" ({})", flags.join(", ")));
                }
                label
            }
        }
    }
}

/// Drop the prefix (or namespace, for undeclared IRIs) and truncate.
pub fn vowl_text(name: &str) -> String {
    let local = if name.contains("://") {
        local_name(name)
    } else if name.contains(char::is_whitespace) {
        name
    } else {
        name.split_once(':').map_or(name, |(_, local)| local)
    };
    truncate(local)
}

/// Labels longer than 15 characters keep their first 12 plus "...".
pub fn truncate(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_CHARS {
        let head: String = label.chars().take(TRUNCATED_CHARS).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}
