//! Graph builder: walks an [`OntologyModel`] and produces the canonical,
//! notation-independent [`CanonicalGraph`] for one scope.
//!
//! Nodes are deduplicated by id and edges by edge id, so a construct reached
//! from several places appears once. Every walk marks a node as emitted before
//! following its outgoing references, which keeps cyclic input finite.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::InternalBuildError;
use crate::model::graph::{
    CanonicalEdge, CanonicalGraph, CanonicalNode, NodeKind, PropertyCategory, Relation,
    PREFIXES_NODE_ID, TITLE_NODE_ID,
};
use crate::model::request::Scope;
use crate::model::vocab::{owl, rdf, rdfs};

use super::ontology::{
    ClassRef, Entity, ExprId, ExpressionBody, ListHead, NamedKind, OntologyModel, Value,
};

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Builds the canonical graph for one scope. Each builder owns its literal
/// counter, so concurrent builds never share id state.
pub struct GraphBuilder<'a> {
    model: &'a OntologyModel,
    scope: Scope,
    nodes: Vec<CanonicalNode>,
    node_ids: HashSet<String>,
    edges: Vec<CanonicalEdge>,
    edge_ids: HashSet<String>,
    walked_individuals: HashSet<usize>,
    next_literal: usize,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(model: &'a OntologyModel, scope: Scope) -> Self {
        Self {
            model,
            scope,
            nodes: Vec::new(),
            node_ids: HashSet::new(),
            edges: Vec::new(),
            edge_ids: HashSet::new(),
            walked_individuals: HashSet::new(),
            next_literal: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Public entry point
    // -----------------------------------------------------------------------

    /// Walk the model and return the verified graph.
    pub fn build(mut self) -> Result<CanonicalGraph, InternalBuildError> {
        self.emit_headers();
        if self.scope.includes_classes() {
            self.walk_classes();
        }
        if self.scope.includes_properties() {
            self.walk_properties();
        }
        if self.scope.includes_individuals() {
            self.walk_individuals();
        }
        if self.scope == Scope::Rdf {
            self.walk_rdf_constructs();
        }

        let graph = CanonicalGraph::from_parts(self.nodes, self.edges);
        graph.check_integrity()?;
        debug!(
            scope = self.scope.token(),
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            "built canonical graph"
        );
        Ok(graph)
    }

    // -----------------------------------------------------------------------
    // Node and edge registration
    // -----------------------------------------------------------------------

    /// Register a node unless one with the same id exists. Returns true when added.
    fn add_node(&mut self, node: CanonicalNode) -> bool {
        if self.node_ids.contains(&node.id) {
            return false;
        }
        self.node_ids.insert(node.id.clone());
        self.nodes.push(node);
        true
    }

    fn add_edge(&mut self, edge: CanonicalEdge) {
        if self.edge_ids.insert(edge.id.clone()) {
            self.edges.push(edge);
        }
    }

    fn emit_headers(&mut self) {
        self.add_node(CanonicalNode::new(TITLE_NODE_ID, NodeKind::Title, "Title"));
        let prefixes = self.model.prefixes.display_lines().join("\n");
        self.add_node(CanonicalNode::new(
            PREFIXES_NODE_ID,
            NodeKind::Prefixes,
            prefixes,
        ));
    }

    fn entity_node(&self, entity: &Entity, kind: NodeKind) -> CanonicalNode {
        let id = entity_id(entity);
        if id != entity.id() {
            warn!(
                iri = entity.iri(),
                "prefixed name collides with a header node id, using the full IRI"
            );
        }
        let mut node = CanonicalNode::new(id, kind, entity.display_label()).with_iri(entity.iri());
        node.external = self.model.is_external(entity);
        node.deprecated = entity.deprecated;
        node
    }

    /// Node for a named entity, typed by what the ontology says it is.
    /// Referenced but undeclared IRIs become external nodes of `fallback` kind.
    fn named_node(&mut self, entity: &Entity, fallback: NodeKind) -> String {
        let named = self.model.named_kind(entity.iri());
        let kind = match named {
            NamedKind::Class => NodeKind::Class,
            NamedKind::Datatype => NodeKind::Datatype,
            NamedKind::Property(category) => NodeKind::Property(category),
            NamedKind::Individual => NodeKind::Individual,
            NamedKind::Other => fallback,
        };
        let mut node = self.entity_node(entity, kind);
        node.external |= named == NamedKind::Other;
        let id = node.id.clone();
        self.add_node(node);
        id
    }

    fn builtin_node(&mut self, iri: &str, kind: NodeKind) -> String {
        let name = self.model.prefixes.qualify(iri);
        let id = name.id();
        self.add_node(CanonicalNode::new(id.clone(), kind, id.clone()).with_iri(iri));
        id
    }

    fn class_ref_node(&mut self, class_ref: &ClassRef) -> String {
        match class_ref {
            ClassRef::Named(entity) => self.named_node(entity, NodeKind::Class),
            ClassRef::Anonymous(id) => self.expression_node(*id),
        }
    }

    // -----------------------------------------------------------------------
    // Class scope
    // -----------------------------------------------------------------------

    fn walk_classes(&mut self) {
        let model = self.model;
        for class in &model.classes {
            let node = self.entity_node(&class.entity, NodeKind::Class);
            self.add_node(node);
        }
        for datatype in &model.datatypes {
            let node = self.entity_node(datatype, NodeKind::Datatype);
            self.add_node(node);
        }
        for class in &model.classes {
            let source = entity_id(&class.entity);
            let axioms = [
                (&class.super_classes, Relation::SubClassOf),
                (&class.equivalents, Relation::EquivalentClass),
                (&class.disjoints, Relation::DisjointWith),
            ];
            for (targets, relation) in axioms {
                for target in targets {
                    let target = self.class_ref_node(target);
                    self.add_edge(CanonicalEdge::new(&source, relation.clone(), &target));
                }
            }
        }
    }

    /// Node for an anonymous class expression, edged to its operands.
    fn expression_node(&mut self, id: ExprId) -> String {
        let model = self.model;
        let expr = model.expression(id);
        let node = CanonicalNode::new(expr.id.clone(), NodeKind::Expression(expr.kind()), expr.label());
        if !self.add_node(node) {
            return expr.id.clone();
        }
        let source = expr.id.as_str();
        match &expr.body {
            ExpressionBody::Union(operands) => {
                self.operand_edges(source, operands, Relation::UnionMember)
            }
            ExpressionBody::Intersection(operands) => {
                self.operand_edges(source, operands, Relation::IntersectionMember)
            }
            ExpressionBody::Complement(operand) => {
                if let Some(operand) = operand {
                    let target = self.class_ref_node(operand);
                    self.add_edge(CanonicalEdge::new(source, Relation::ComplementOf, &target));
                }
            }
            ExpressionBody::OneOf(members) => {
                for member in members {
                    let target = self.value_node(member);
                    self.add_edge(CanonicalEdge::new(source, Relation::OneOfMember, &target));
                }
            }
            ExpressionBody::Restriction(restriction) => {
                for (quantifier, filler) in &restriction.fillers {
                    let target = self.class_ref_node(filler);
                    self.add_edge(CanonicalEdge::new(
                        source,
                        Relation::ValuesFrom(*quantifier),
                        &target,
                    ));
                }
                // Literal values are already listed as a facet line.
                if let Some(value) = &restriction.has_value {
                    if !matches!(value, Value::Literal(_)) {
                        let target = self.value_node(value);
                        self.add_edge(CanonicalEdge::new(source, Relation::HasValue, &target));
                    }
                }
            }
        }
        expr.id.clone()
    }

    fn operand_edges(&mut self, source: &str, operands: &[ClassRef], relation: Relation) {
        for operand in operands {
            let target = self.class_ref_node(operand);
            self.add_edge(CanonicalEdge::new(source, relation.clone(), &target));
        }
    }

    // -----------------------------------------------------------------------
    // Property scope
    // -----------------------------------------------------------------------

    fn walk_properties(&mut self) {
        let model = self.model;
        for property in &model.properties {
            let domains: Vec<String> = if property.domains.is_empty() {
                vec![self.builtin_node(owl::THING, NodeKind::Class)]
            } else {
                property
                    .domains
                    .iter()
                    .map(|d| self.class_ref_node(d))
                    .collect()
            };
            let ranges: Vec<String> = match (property.ranges.is_empty(), property.category) {
                (true, PropertyCategory::Datatype) => {
                    vec![self.builtin_node(rdfs::LITERAL, NodeKind::Datatype)]
                }
                (true, _) => vec![self.builtin_node(owl::THING, NodeKind::Class)],
                (false, PropertyCategory::Datatype) => property
                    .ranges
                    .iter()
                    .map(|r| match r {
                        ClassRef::Named(entity) => self.named_node(entity, NodeKind::Datatype),
                        ClassRef::Anonymous(id) => self.expression_node(*id),
                    })
                    .collect(),
                (false, _) => property
                    .ranges
                    .iter()
                    .map(|r| self.class_ref_node(r))
                    .collect(),
            };
            let relation = Relation::Property {
                category: property.category,
                property: property.entity.id(),
            };
            for domain in &domains {
                for range in &ranges {
                    self.add_edge(
                        CanonicalEdge::new(domain, relation.clone(), range)
                            .with_label(property.entity.display_label())
                            .with_flags(property.flags),
                    );
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Individual scope
    // -----------------------------------------------------------------------

    fn walk_individuals(&mut self) {
        let model = self.model;
        for idx in 0..model.individuals.len() {
            self.individual_node(idx);
        }
    }

    /// Node for an individual. In individual scopes its typeOf and assertion
    /// edges are emitted the first time it is reached.
    fn individual_node(&mut self, idx: usize) -> String {
        let model = self.model;
        let individual = &model.individuals[idx];
        let node = match &individual.entity {
            Some(entity) => self.entity_node(entity, NodeKind::Individual),
            None => CanonicalNode::new(
                individual.id.clone(),
                NodeKind::Individual,
                individual.display_label(),
            ),
        };
        let id = node.id.clone();
        self.add_node(node);
        if !self.scope.includes_individuals() || !self.walked_individuals.insert(idx) {
            return id;
        }
        for class in &individual.types {
            let target = self.class_ref_node(class);
            self.add_edge(CanonicalEdge::new(&id, Relation::TypeOf, &target));
        }
        for assertion in &individual.assertions {
            let target = self.value_node(&assertion.value);
            let relation = Relation::Assertion {
                category: assertion.category,
                property: assertion.property.id(),
            };
            self.add_edge(
                CanonicalEdge::new(&id, relation, &target)
                    .with_label(assertion.property.display_label()),
            );
        }
        id
    }

    /// Node for an assertion object, container member, list element or
    /// statement role.
    fn value_node(&mut self, value: &Value) -> String {
        match value {
            Value::Named(entity) => self.named_node(entity, NodeKind::Individual),
            Value::Literal(literal) => {
                let id = format!("literal_{}", self.next_literal);
                self.next_literal += 1;
                let label = match &literal.language {
                    Some(lang) => format!("{}@{lang}", literal.value),
                    None => literal.value.clone(),
                };
                self.add_node(CanonicalNode::new(id.clone(), NodeKind::Literal, label));
                id
            }
            Value::Expression(id) => self.expression_node(*id),
            Value::Container(idx) => self.container_node(*idx),
            Value::List(head) => self.list_node(head),
            Value::Statement(idx) => self.statement_node(*idx),
            Value::Blank(idx) => self.individual_node(*idx),
        }
    }

    // -----------------------------------------------------------------------
    // RDF constructs
    // -----------------------------------------------------------------------

    fn walk_rdf_constructs(&mut self) {
        let model = self.model;
        for idx in 0..model.containers.len() {
            self.container_node(idx);
        }
        for idx in 0..model.lists.len() {
            self.list_node(&ListHead::Cell(idx));
        }
        for idx in 0..model.statements.len() {
            self.statement_node(idx);
        }
    }

    fn container_node(&mut self, idx: usize) -> String {
        let model = self.model;
        let container = &model.containers[idx];
        let mut node = CanonicalNode::new(
            container.id.clone(),
            NodeKind::Container(container.kind),
            container.kind.label(),
        );
        node.iri = container.iri.clone();
        if !self.add_node(node) {
            return container.id.clone();
        }
        for (position, member) in &container.members {
            let target = self.value_node(member);
            self.add_edge(CanonicalEdge::new(
                &container.id,
                Relation::ContainerMember(*position),
                &target,
            ));
        }
        container.id.clone()
    }

    fn list_node(&mut self, head: &ListHead) -> String {
        let model = self.model;
        let idx = match head {
            ListHead::Nil => return self.builtin_node(rdf::NIL, NodeKind::ListNil),
            ListHead::Cell(idx) => *idx,
        };
        let cell = &model.lists[idx];
        if !self.add_node(CanonicalNode::new(cell.id.clone(), NodeKind::ListCell, "List")) {
            return cell.id.clone();
        }
        let first = self.value_node(&cell.first);
        self.add_edge(CanonicalEdge::new(&cell.id, Relation::ListFirst, &first));
        let rest = self.list_node(&cell.rest);
        self.add_edge(CanonicalEdge::new(&cell.id, Relation::ListRest, &rest));
        cell.id.clone()
    }

    fn statement_node(&mut self, idx: usize) -> String {
        let model = self.model;
        let statement = &model.statements[idx];
        let mut node = CanonicalNode::new(statement.id.clone(), NodeKind::Statement, "Statement");
        node.iri = statement.iri.clone();
        if !self.add_node(node) {
            return statement.id.clone();
        }
        let source = statement.id.as_str();
        if let Some(subject) = &statement.subject {
            let target = self.value_node(subject);
            self.add_edge(CanonicalEdge::new(source, Relation::ReifiedSubject, &target));
        }
        if let Some(predicate) = &statement.predicate {
            let target = self.named_node(predicate, NodeKind::Property(PropertyCategory::Rdf));
            self.add_edge(CanonicalEdge::new(source, Relation::ReifiedPredicate, &target));
        }
        if let Some(object) = &statement.object {
            let target = self.value_node(object);
            self.add_edge(CanonicalEdge::new(source, Relation::ReifiedObject, &target));
        }
        statement.id.clone()
    }
}

/// Node id for a named entity. A prefixed name equal to a header id falls
/// back to the full IRI so the entity never merges into the header node.
fn entity_id(entity: &Entity) -> String {
    let id = entity.id();
    if id == TITLE_NODE_ID || id == PREFIXES_NODE_ID {
        entity.iri().to_string()
    } else {
        id
    }
}

/// Build the canonical graph of `model` for `scope`.
pub fn build(model: &OntologyModel, scope: Scope) -> Result<CanonicalGraph, InternalBuildError> {
    GraphBuilder::new(model, scope).build()
}
