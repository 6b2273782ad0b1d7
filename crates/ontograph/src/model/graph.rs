//! Notation-independent graph produced by the builder.
//!
//! Nodes and edges are stored in visitation order. The title and prefixes
//! nodes always come first; [`CanonicalGraph::check_integrity`] enforces that
//! together with id uniqueness and edge endpoint resolution.

use std::collections::{HashMap, HashSet};

use crate::error::InternalBuildError;

pub const TITLE_NODE_ID: &str = "title::n0";
pub const PREFIXES_NODE_ID: &str = "prefixes::n0";

/// Property categories, shared by schema-level property edges and
/// individual-level assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyCategory {
    Object,
    Datatype,
    Annotation,
    /// Plain `rdf:Property` with no OWL typing.
    Rdf,
}

impl PropertyCategory {
    pub fn token(self) -> &'static str {
        match self {
            PropertyCategory::Object => "object",
            PropertyCategory::Datatype => "datatype",
            PropertyCategory::Annotation => "annotation",
            PropertyCategory::Rdf => "rdf",
        }
    }

    /// Categories whose parallel edges may be merged.
    pub fn is_collapsible(self) -> bool {
        !matches!(self, PropertyCategory::Rdf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Union,
    Intersection,
    Complement,
    OneOf,
    Restriction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Bag,
    Seq,
    Alt,
}

impl ContainerKind {
    pub fn label(self) -> &'static str {
        match self {
            ContainerKind::Bag => "Bag",
            ContainerKind::Seq => "Sequence",
            ContainerKind::Alt => "Alternatives",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Title,
    Prefixes,
    Class,
    Datatype,
    Expression(ExpressionKind),
    Property(PropertyCategory),
    Individual,
    Literal,
    Container(ContainerKind),
    ListCell,
    ListNil,
    Statement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Full IRI of the entity the node stands for, when it has one.
    pub iri: Option<String>,
    /// Declared outside the ontology's own namespace, or referenced but never declared.
    pub external: bool,
    pub deprecated: bool,
}

impl CanonicalNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            iri: None,
            external: false,
            deprecated: false,
        }
    }

    pub fn with_iri(mut self, iri: impl Into<String>) -> Self {
        self.iri = Some(iri.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Some,
    All,
    Qualified,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    SubClassOf,
    EquivalentClass,
    DisjointWith,
    UnionMember,
    IntersectionMember,
    ComplementOf,
    OneOfMember,
    ValuesFrom(Quantifier),
    HasValue,
    TypeOf,
    /// Domain-to-range edge for a property declaration.
    Property {
        category: PropertyCategory,
        property: String,
    },
    /// Subject-to-value edge for a property assertion on an individual.
    Assertion {
        category: PropertyCategory,
        property: String,
    },
    /// Several parallel property edges merged into one.
    Collapsed(PropertyCategory),
    ContainerMember(usize),
    ListFirst,
    ListRest,
    ReifiedSubject,
    ReifiedPredicate,
    ReifiedObject,
}

impl Relation {
    /// Token used inside edge ids.
    pub fn token(&self) -> String {
        match self {
            Relation::SubClassOf => "subClassOf".into(),
            Relation::EquivalentClass => "equivalentClass".into(),
            Relation::DisjointWith => "disjointWith".into(),
            Relation::UnionMember => "unionOf".into(),
            Relation::IntersectionMember => "intersectionOf".into(),
            Relation::ComplementOf => "complementOf".into(),
            Relation::OneOfMember => "oneOf".into(),
            Relation::ValuesFrom(Quantifier::Some) => "someValuesFrom".into(),
            Relation::ValuesFrom(Quantifier::All) => "allValuesFrom".into(),
            Relation::ValuesFrom(Quantifier::Qualified) => "onClass".into(),
            Relation::HasValue => "hasValue".into(),
            Relation::TypeOf => "type".into(),
            Relation::Property { property, .. } | Relation::Assertion { property, .. } => {
                property.clone()
            }
            Relation::Collapsed(category) => format!("collapsed-{}", category.token()),
            Relation::ContainerMember(index) => format!("rdf:_{index}"),
            Relation::ListFirst => "rdf:first".into(),
            Relation::ListRest => "rdf:rest".into(),
            Relation::ReifiedSubject => "rdf:subject".into(),
            Relation::ReifiedPredicate => "rdf:predicate".into(),
            Relation::ReifiedObject => "rdf:object".into(),
        }
    }

    /// Category of a property-valued edge; `None` for structural edges.
    pub fn property_category(&self) -> Option<PropertyCategory> {
        match self {
            Relation::Property { category, .. }
            | Relation::Assertion { category, .. }
            | Relation::Collapsed(category) => Some(*category),
            _ => None,
        }
    }
}

/// Property characteristics shown next to a property edge's label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeFlags {
    pub functional: bool,
    pub inverse_functional: bool,
    pub reflexive: bool,
    pub irreflexive: bool,
    pub asymmetric: bool,
    pub symmetric: bool,
    pub transitive: bool,
    pub multiple_domains: bool,
    pub multiple_ranges: bool,
}

impl EdgeFlags {
    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.functional, "functional"),
            (self.inverse_functional, "inverseFunctional"),
            (self.reflexive, "reflexive"),
            (self.irreflexive, "irreflexive"),
            (self.asymmetric, "asymmetric"),
            (self.symmetric, "symmetric"),
            (self.transitive, "transitive"),
            (self.multiple_domains, "multipleDomains"),
            (self.multiple_ranges, "multipleRanges"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relation: Relation,
    /// Label fragments; property edges carry the property label, merged edges several.
    pub label_parts: Vec<String>,
    pub flags: EdgeFlags,
}

impl CanonicalEdge {
    pub fn new(source: &str, relation: Relation, target: &str) -> Self {
        Self {
            id: edge_id(source, &relation, target),
            source: source.to_string(),
            target: target.to_string(),
            relation,
            label_parts: Vec::new(),
            flags: EdgeFlags::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label_parts.push(label.into());
        self
    }

    pub fn with_flags(mut self, flags: EdgeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Label fragments joined by `,\n`, with a ` (flag, ...)` suffix when flags are set.
    pub fn display_label(&self) -> String {
        let mut label = self.label_parts.join(",\n");
        let flags = self.flags.names();
        if !flags.is_empty() {
            label.push_str(&format!(" ({})", flags.join(", ")));
        }
        label
    }
}

/// Deterministic edge id: source, relation token and target joined by `|`.
pub fn edge_id(source: &str, relation: &Relation, target: &str) -> String {
    format!("{source}|{}|{target}", relation.token())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalGraph {
    nodes: Vec<CanonicalNode>,
    edges: Vec<CanonicalEdge>,
}

impl CanonicalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(nodes: Vec<CanonicalNode>, edges: Vec<CanonicalEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[CanonicalNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[CanonicalEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&CanonicalNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn into_parts(self) -> (Vec<CanonicalNode>, Vec<CanonicalEdge>) {
        (self.nodes, self.edges)
    }

    /// Entity nodes, skipping the title and prefixes headers.
    pub fn entity_nodes(&self) -> impl Iterator<Item = &CanonicalNode> {
        self.nodes
            .iter()
            .filter(|n| !matches!(n.kind, NodeKind::Title | NodeKind::Prefixes))
    }

    /// Verify unique node ids, unique edge ids, resolvable edge endpoints and
    /// the title/prefixes header order.
    pub fn check_integrity(&self) -> Result<(), InternalBuildError> {
        for (pos, expected) in [TITLE_NODE_ID, PREFIXES_NODE_ID].into_iter().enumerate() {
            if self.nodes.get(pos).map(|n| n.id.as_str()) != Some(expected) {
                return Err(InternalBuildError::MissingHeader {
                    expected: expected.to_string(),
                });
            }
        }

        let mut ids: HashMap<&str, usize> = HashMap::with_capacity(self.nodes.len());
        for (pos, node) in self.nodes.iter().enumerate() {
            if ids.insert(node.id.as_str(), pos).is_some() {
                return Err(InternalBuildError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        let mut edge_ids = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(InternalBuildError::DuplicateEdge {
                    id: edge.id.clone(),
                });
            }
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains_key(endpoint.as_str()) {
                    return Err(InternalBuildError::DanglingEdge {
                        edge: edge.id.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
