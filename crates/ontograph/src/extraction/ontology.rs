//! Normalized, notation-independent view of a parsed ontology.
//!
//! Named classes, properties and individuals are listed in prefixed-name
//! order. Anonymous constructs (class expressions, containers, lists,
//! reified statements, plain blank nodes) live in arenas and receive
//! synthetic `bnode_<n>` ids from a counter owned by one normalization run.
//!
//! Design notes:
//! - Parser-assigned blank node labels are never used for ordering or
//!   naming; ids follow the order in which constructs are first reached from
//!   their declaring entity, so identical input always yields identical ids.
//! - Lists consumed by OWL expressions (`owl:unionOf (...)`) are folded into
//!   the expression and never surface as list cells.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::loader::{Literal, ParsedDocument, Term, TripleIndex};
use crate::model::graph::{ContainerKind, EdgeFlags, ExpressionKind, PropertyCategory, Quantifier};
use crate::model::iri::{PrefixMap, QualifiedName};
use crate::model::vocab::{self, owl, rdf, rdfs, xsd};

/// A named ontology entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: QualifiedName,
    pub label: Option<String>,
    pub deprecated: bool,
}

impl Entity {
    pub fn id(&self) -> String {
        self.name.id()
    }

    pub fn iri(&self) -> &str {
        &self.name.iri
    }

    /// `rdfs:label` when present, otherwise the decoded prefixed name.
    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.name.display_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassRef {
    Named(Entity),
    Anonymous(ExprId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListHead {
    Nil,
    Cell(usize),
}

/// The object of an assertion, a container member, a list element or a
/// reified statement's subject/object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Named(Entity),
    Literal(Literal),
    Expression(ExprId),
    Container(usize),
    List(ListHead),
    Statement(usize),
    /// A blank node with no structural vocabulary; index into `individuals`.
    Blank(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub on_property: Option<Entity>,
    /// Human-readable facet lines such as `minCardinality 1`.
    pub facets: Vec<String>,
    pub fillers: Vec<(Quantifier, ClassRef)>,
    pub has_value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionBody {
    Union(Vec<ClassRef>),
    Intersection(Vec<ClassRef>),
    Complement(Option<ClassRef>),
    OneOf(Vec<Value>),
    Restriction(Restriction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub id: String,
    pub body: ExpressionBody,
}

impl Expression {
    pub fn kind(&self) -> ExpressionKind {
        match self.body {
            ExpressionBody::Union(_) => ExpressionKind::Union,
            ExpressionBody::Intersection(_) => ExpressionKind::Intersection,
            ExpressionBody::Complement(_) => ExpressionKind::Complement,
            ExpressionBody::OneOf(_) => ExpressionKind::OneOf,
            ExpressionBody::Restriction(_) => ExpressionKind::Restriction,
        }
    }

    pub fn label(&self) -> String {
        match &self.body {
            ExpressionBody::Union(_) => "Union of".to_string(),
            ExpressionBody::Intersection(_) => "Intersection of".to_string(),
            ExpressionBody::Complement(_) => "Complement of".to_string(),
            ExpressionBody::OneOf(_) => "One of".to_string(),
            ExpressionBody::Restriction(r) => {
                let mut lines = vec!["Restriction".to_string()];
                lines.extend(r.facets.iter().cloned());
                lines.join("\n")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntity {
    pub entity: Entity,
    pub super_classes: Vec<ClassRef>,
    pub equivalents: Vec<ClassRef>,
    pub disjoints: Vec<ClassRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntity {
    pub entity: Entity,
    pub category: PropertyCategory,
    pub domains: Vec<ClassRef>,
    pub ranges: Vec<ClassRef>,
    pub flags: EdgeFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    pub property: Entity,
    pub category: PropertyCategory,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualEntity {
    pub id: String,
    /// `None` for blank-node individuals.
    pub entity: Option<Entity>,
    pub types: Vec<ClassRef>,
    pub assertions: Vec<Assertion>,
}

impl IndividualEntity {
    pub fn display_label(&self) -> String {
        match &self.entity {
            Some(entity) => entity.display_label(),
            None => "Blank Node".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub iri: Option<String>,
    pub kind: ContainerKind,
    /// Members ordered by their `rdf:_n` index.
    pub members: Vec<(usize, Value)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCell {
    pub id: String,
    pub first: Value,
    pub rest: ListHead,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReifiedStatement {
    pub id: String,
    pub iri: Option<String>,
    pub subject: Option<Value>,
    pub predicate: Option<Entity>,
    pub object: Option<Value>,
}

/// What a named IRI denotes in this ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKind {
    Class,
    Datatype,
    Property(PropertyCategory),
    Individual,
    Other,
}

#[derive(Debug, Clone, Default)]
pub struct OntologyModel {
    pub ontology_iri: Option<String>,
    pub prefixes: PrefixMap,
    pub classes: Vec<ClassEntity>,
    pub datatypes: Vec<Entity>,
    pub properties: Vec<PropertyEntity>,
    pub individuals: Vec<IndividualEntity>,
    pub expressions: Vec<Expression>,
    pub containers: Vec<Container>,
    pub lists: Vec<ListCell>,
    pub statements: Vec<ReifiedStatement>,
    /// Subclass cycles found among named classes, as prefixed names.
    pub subclass_cycles: Vec<Vec<String>>,
    class_iris: HashSet<String>,
    datatype_iris: HashSet<String>,
    property_categories: HashMap<String, PropertyCategory>,
    individual_iris: HashSet<String>,
}

impl OntologyModel {
    /// Normalize a parsed document. `reasoning` adds the named superclasses of
    /// each individual's types to its types.
    pub fn from_document(doc: &ParsedDocument, reasoning: bool) -> Self {
        let mut prefixes = PrefixMap::with_standard();
        for (name, ns) in &doc.prefixes {
            prefixes.insert(name, ns);
        }
        let model = Normalizer::new(&doc.triples, prefixes).run(reasoning);
        debug!(
            classes = model.classes.len(),
            properties = model.properties.len(),
            individuals = model.individuals.len(),
            expressions = model.expressions.len(),
            "normalized ontology"
        );
        model
    }

    /// Ontology IRI, or "None defined".
    pub fn ontology_uri_text(&self) -> String {
        self.ontology_iri
            .clone()
            .unwrap_or_else(|| "None defined".to_string())
    }

    pub fn expression(&self, id: ExprId) -> &Expression {
        &self.expressions[id.0]
    }

    pub fn named_kind(&self, iri: &str) -> NamedKind {
        if let Some(category) = self.property_categories.get(iri) {
            NamedKind::Property(*category)
        } else if self.is_datatype(iri) {
            NamedKind::Datatype
        } else if self.class_iris.contains(iri) || is_builtin_class(iri) {
            NamedKind::Class
        } else if self.individual_iris.contains(iri) {
            NamedKind::Individual
        } else {
            NamedKind::Other
        }
    }

    pub fn is_datatype(&self, iri: &str) -> bool {
        self.datatype_iris.contains(iri) || is_builtin_datatype(iri)
    }

    /// Outside the ontology's namespace. Everything user-defined is external
    /// when the document declares no ontology IRI.
    pub fn is_external(&self, entity: &Entity) -> bool {
        let iri = entity.iri();
        if vocab::is_language_term(iri) || iri.starts_with(xsd::NS) {
            return false;
        }
        match &self.ontology_iri {
            Some(onto) => !iri.starts_with(onto.trim_end_matches(['#', '/'])),
            None => true,
        }
    }
}

fn is_builtin_class(iri: &str) -> bool {
    matches!(iri, owl::THING | owl::NOTHING | rdfs::RESOURCE | rdfs::CLASS)
}

fn is_builtin_datatype(iri: &str) -> bool {
    iri.starts_with(xsd::NS)
        || iri == rdfs::LITERAL
        || matches!(
            iri.strip_prefix(rdf::NS),
            Some("PlainLiteral" | "langString" | "XMLLiteral" | "HTML")
        )
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

const PROPERTY_TYPES: [&str; 11] = [
    owl::OBJECT_PROPERTY,
    owl::DATATYPE_PROPERTY,
    owl::ANNOTATION_PROPERTY,
    rdf::PROPERTY,
    owl::FUNCTIONAL_PROPERTY,
    owl::INVERSE_FUNCTIONAL_PROPERTY,
    owl::TRANSITIVE_PROPERTY,
    owl::SYMMETRIC_PROPERTY,
    owl::ASYMMETRIC_PROPERTY,
    owl::REFLEXIVE_PROPERTY,
    owl::IRREFLEXIVE_PROPERTY,
];

const CARDINALITIES: [(&str, &str); 6] = [
    (owl::CARDINALITY, "cardinality"),
    (owl::MIN_CARDINALITY, "minCardinality"),
    (owl::MAX_CARDINALITY, "maxCardinality"),
    (owl::QUALIFIED_CARDINALITY, "qualifiedCardinality"),
    (owl::MIN_QUALIFIED_CARDINALITY, "minQualifiedCardinality"),
    (owl::MAX_QUALIFIED_CARDINALITY, "maxQualifiedCardinality"),
];

/// Blank subjects of these types are axiom bookkeeping, not diagram content.
const AXIOM_TYPES: [&str; 4] = [
    "http://www.w3.org/2002/07/owl#Axiom",
    "http://www.w3.org/2002/07/owl#AllDifferent",
    "http://www.w3.org/2002/07/owl#NegativePropertyAssertion",
    owl::ALL_DISJOINT_CLASSES,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlankShape {
    Expression,
    List,
    Container,
    Statement,
    Plain,
}

struct Normalizer<'a> {
    triples: &'a TripleIndex,
    model: OntologyModel,
    labels: HashMap<String, String>,
    deprecated: HashSet<String>,
    annotation_predicates: HashSet<String>,
    resolved: HashMap<Term, Value>,
    consumed_lists: HashSet<Term>,
    next_synthetic: usize,
}

impl<'a> Normalizer<'a> {
    fn new(triples: &'a TripleIndex, prefixes: PrefixMap) -> Self {
        Self {
            triples,
            model: OntologyModel {
                prefixes,
                ..OntologyModel::default()
            },
            labels: HashMap::new(),
            deprecated: HashSet::new(),
            annotation_predicates: HashSet::new(),
            resolved: HashMap::new(),
            consumed_lists: HashSet::new(),
            next_synthetic: 0,
        }
    }

    fn run(mut self, reasoning: bool) -> OntologyModel {
        self.scan_annotations();
        self.model.ontology_iri = self
            .triples
            .instances_of(owl::ONTOLOGY)
            .into_iter()
            .find_map(|t| t.as_iri().map(str::to_string));

        let class_iris = self.collect_class_iris();
        let property_iris = self.collect_property_iris();
        self.collect_datatypes(&property_iris);
        let individual_iris = self.collect_individual_iris(&class_iris, &property_iris);

        self.model.class_iris = class_iris.iter().cloned().collect();
        self.model.individual_iris = individual_iris.iter().cloned().collect();
        for iri in &property_iris {
            let category = self.property_category(iri);
            self.model.property_categories.insert(iri.clone(), category);
        }

        // Blank constructs are allocated in this order: classes, properties,
        // individuals, then whatever blank subjects remain.
        for iri in &class_iris {
            self.read_class(iri);
        }
        self.read_all_disjoint_classes();
        for iri in &property_iris {
            self.read_property(iri);
        }
        for iri in &individual_iris {
            let entity = self.entity(iri);
            let idx = self.model.individuals.len();
            self.model.individuals.push(IndividualEntity {
                id: entity.id(),
                entity: Some(entity),
                types: Vec::new(),
                assertions: Vec::new(),
            });
            let (types, assertions) = self.read_individual(&Term::Iri(iri.clone()));
            self.model.individuals[idx].types = types;
            self.model.individuals[idx].assertions = assertions;
        }
        self.read_remaining_blank_subjects();

        if reasoning {
            self.infer_individual_types();
        }
        self.model.subclass_cycles = self.find_subclass_cycles();
        self.model
    }

    // -----------------------------------------------------------------------
    // Entities and labels
    // -----------------------------------------------------------------------

    fn scan_annotations(&mut self) {
        let triples = self.triples;
        // Subjects whose label is untagged or English; those are never replaced.
        let mut settled: HashSet<&str> = HashSet::new();
        for st in triples.statements() {
            let Some(subject) = st.subject.as_iri() else {
                continue;
            };
            match (st.predicate.as_str(), &st.object) {
                (rdfs::LABEL, Term::Literal(lit)) => {
                    if settled.contains(subject) {
                        continue;
                    }
                    let preferred = lit.language.as_deref().is_none_or(|l| l.starts_with("en"));
                    if preferred || !self.labels.contains_key(subject) {
                        self.labels.insert(subject.to_string(), lit.value.clone());
                    }
                    if preferred {
                        settled.insert(subject);
                    }
                }
                (owl::DEPRECATED, Term::Literal(lit)) if lit.value == "true" || lit.value == "1" => {
                    self.deprecated.insert(subject.to_string());
                }
                _ => {}
            }
        }
        for t in triples.instances_of(owl::ANNOTATION_PROPERTY) {
            if let Some(iri) = t.as_iri() {
                self.annotation_predicates.insert(iri.to_string());
            }
        }
        for builtin in [rdfs::COMMENT, rdfs::SEE_ALSO, rdfs::IS_DEFINED_BY] {
            self.annotation_predicates.insert(builtin.to_string());
        }
    }

    fn entity(&self, iri: &str) -> Entity {
        Entity {
            name: self.model.prefixes.qualify(iri),
            label: self.labels.get(iri).cloned(),
            deprecated: self.deprecated.contains(iri),
        }
    }

    fn sort_by_id(&self, iris: HashSet<String>) -> Vec<String> {
        let mut keyed: Vec<(String, String)> = iris
            .into_iter()
            .map(|iri| (self.model.prefixes.qualify(&iri).id(), iri))
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, iri)| iri).collect()
    }

    // -----------------------------------------------------------------------
    // Named entity discovery
    // -----------------------------------------------------------------------

    fn collect_class_iris(&self) -> Vec<String> {
        let triples = self.triples;
        let mut iris = HashSet::new();
        for class_type in [owl::CLASS, rdfs::CLASS] {
            for t in triples.instances_of(class_type) {
                if let Some(iri) = t.as_iri() {
                    iris.insert(iri.to_string());
                }
            }
        }
        for st in triples.statements() {
            if matches!(
                st.predicate.as_str(),
                rdfs::SUB_CLASS_OF | owl::EQUIVALENT_CLASS | owl::DISJOINT_WITH
            ) {
                for t in [&st.subject, &st.object] {
                    if let Some(iri) = t.as_iri() {
                        iris.insert(iri.to_string());
                    }
                }
            }
        }
        iris.retain(|iri| !is_builtin_class(iri) && !is_builtin_datatype(iri));
        self.sort_by_id(iris)
    }

    fn collect_property_iris(&self) -> Vec<String> {
        let triples = self.triples;
        let mut iris = HashSet::new();
        for property_type in PROPERTY_TYPES {
            for t in triples.instances_of(property_type) {
                if let Some(iri) = t.as_iri() {
                    iris.insert(iri.to_string());
                }
            }
        }
        for st in triples.statements() {
            if matches!(st.predicate.as_str(), rdfs::DOMAIN | rdfs::RANGE) {
                if let Some(iri) = st.subject.as_iri() {
                    iris.insert(iri.to_string());
                }
            }
        }
        iris.retain(|iri| !vocab::is_language_term(iri));
        self.sort_by_id(iris)
    }

    fn collect_datatypes(&mut self, property_iris: &[String]) {
        let triples = self.triples;
        let mut declared = HashSet::new();
        for t in triples.instances_of(rdfs::DATATYPE) {
            if let Some(iri) = t.as_iri() {
                declared.insert(iri.to_string());
            }
        }
        for iri in property_iris {
            let subject = Term::Iri(iri.clone());
            if triples.has_type(&subject, owl::DATATYPE_PROPERTY) {
                for range in triples.objects(&subject, rdfs::RANGE) {
                    if let Some(range) = range.as_iri() {
                        self.model.datatype_iris.insert(range.to_string());
                    }
                }
            }
        }
        self.model.datatype_iris.extend(declared.iter().cloned());
        let sorted = self.sort_by_id(declared);
        self.model.datatypes = sorted.iter().map(|iri| self.entity(iri)).collect();
    }

    fn collect_individual_iris(&self, classes: &[String], properties: &[String]) -> Vec<String> {
        let triples = self.triples;
        let classes: HashSet<&str> = classes.iter().map(String::as_str).collect();
        let properties: HashSet<&str> = properties.iter().map(String::as_str).collect();
        let mut iris = HashSet::new();
        for st in triples.statements() {
            let Some(iri) = st.subject.as_iri() else {
                continue;
            };
            if classes.contains(iri)
                || properties.contains(iri)
                || vocab::is_language_term(iri)
                || self.model.datatype_iris.contains(iri)
                || Some(iri) == self.model.ontology_iri.as_deref()
                || iris.contains(iri)
            {
                continue;
            }
            let subject = &st.subject;
            let types: Vec<&str> = triples.types(subject).collect();
            let is_individual = if types.is_empty() {
                // Untyped subjects count when they assert something.
                triples.outgoing(subject).any(|s| {
                    !vocab::is_language_term(&s.predicate)
                        && !self.annotation_predicates.contains(&s.predicate)
                })
            } else {
                types.iter().any(|t| {
                    *t == owl::NAMED_INDIVIDUAL
                        || *t == owl::THING
                        || (!vocab::is_language_term(t) && !is_builtin_datatype(t))
                }) && !is_construct_type(&types)
            };
            if is_individual {
                iris.insert(iri.to_string());
            }
        }
        self.sort_by_id(iris)
    }

    fn property_category(&self, iri: &str) -> PropertyCategory {
        let subject = Term::Iri(iri.to_string());
        let types: Vec<&str> = self.triples.types(&subject).collect();
        if types.contains(&owl::DATATYPE_PROPERTY) {
            PropertyCategory::Datatype
        } else if types.iter().any(|t| {
            matches!(
                *t,
                owl::OBJECT_PROPERTY
                    | owl::INVERSE_FUNCTIONAL_PROPERTY
                    | owl::TRANSITIVE_PROPERTY
                    | owl::SYMMETRIC_PROPERTY
                    | owl::ASYMMETRIC_PROPERTY
                    | owl::REFLEXIVE_PROPERTY
                    | owl::IRREFLEXIVE_PROPERTY
            )
        }) {
            PropertyCategory::Object
        } else if types.contains(&owl::ANNOTATION_PROPERTY) {
            PropertyCategory::Annotation
        } else {
            PropertyCategory::Rdf
        }
    }

    // -----------------------------------------------------------------------
    // Classes and properties
    // -----------------------------------------------------------------------

    fn read_class(&mut self, iri: &str) {
        let triples = self.triples;
        let subject = Term::Iri(iri.to_string());
        let mut class = ClassEntity {
            entity: self.entity(iri),
            super_classes: Vec::new(),
            equivalents: Vec::new(),
            disjoints: Vec::new(),
        };
        for st in triples.outgoing(&subject) {
            if st.predicate == rdfs::SUB_CLASS_OF && st.object.as_iri() == Some(iri) {
                warn!(class = %class.entity.id(), "ignoring class declared as its own subclass");
                continue;
            }
            let target = match st.predicate.as_str() {
                rdfs::SUB_CLASS_OF => &mut class.super_classes,
                owl::EQUIVALENT_CLASS => &mut class.equivalents,
                owl::DISJOINT_WITH => &mut class.disjoints,
                _ => continue,
            };
            if let Some(class_ref) = self.class_ref(&st.object) {
                if !target.contains(&class_ref) {
                    target.push(class_ref);
                }
            }
        }
        self.model.classes.push(class);
    }

    /// `owl:AllDisjointClasses` axioms become pairwise disjointWith entries.
    fn read_all_disjoint_classes(&mut self) {
        let triples = self.triples;
        for axiom in triples.instances_of(owl::ALL_DISJOINT_CLASSES) {
            let Some(members) = triples.object(axiom, owl::MEMBERS) else {
                continue;
            };
            let members: Vec<String> = self
                .read_list(members)
                .iter()
                .filter_map(|t| t.as_iri().map(str::to_string))
                .collect();
            for (i, first) in members.iter().enumerate() {
                for second in &members[i + 1..] {
                    let other = ClassRef::Named(self.entity(second));
                    if let Some(class) = self
                        .model
                        .classes
                        .iter_mut()
                        .find(|c| c.entity.iri() == first)
                    {
                        if !class.disjoints.contains(&other) {
                            class.disjoints.push(other);
                        }
                    }
                }
            }
        }
    }

    fn read_property(&mut self, iri: &str) {
        let triples = self.triples;
        let subject = Term::Iri(iri.to_string());
        let category = self.property_category(iri);
        let mut domains = Vec::new();
        let mut ranges = Vec::new();
        for st in triples.outgoing(&subject) {
            let target = match st.predicate.as_str() {
                rdfs::DOMAIN => &mut domains,
                rdfs::RANGE => &mut ranges,
                _ => continue,
            };
            if let Some(class_ref) = self.class_ref(&st.object) {
                if !target.contains(&class_ref) {
                    target.push(class_ref);
                }
            }
        }
        let types: Vec<&str> = triples.types(&subject).collect();
        let flags = EdgeFlags {
            functional: types.contains(&owl::FUNCTIONAL_PROPERTY),
            inverse_functional: types.contains(&owl::INVERSE_FUNCTIONAL_PROPERTY),
            reflexive: types.contains(&owl::REFLEXIVE_PROPERTY),
            irreflexive: types.contains(&owl::IRREFLEXIVE_PROPERTY),
            asymmetric: types.contains(&owl::ASYMMETRIC_PROPERTY),
            symmetric: types.contains(&owl::SYMMETRIC_PROPERTY),
            transitive: types.contains(&owl::TRANSITIVE_PROPERTY),
            multiple_domains: domains.len() > 1,
            multiple_ranges: ranges.len() > 1,
        };
        self.model.properties.push(PropertyEntity {
            entity: self.entity(iri),
            category,
            domains,
            ranges,
            flags,
        });
    }

    // -----------------------------------------------------------------------
    // Individuals
    // -----------------------------------------------------------------------

    fn read_individual(&mut self, subject: &Term) -> (Vec<ClassRef>, Vec<Assertion>) {
        let triples = self.triples;
        let mut types = Vec::new();
        let mut assertions = Vec::new();
        for st in triples.outgoing(subject) {
            let predicate = st.predicate.as_str();
            if predicate == rdf::TYPE {
                let skip = st
                    .object
                    .as_iri()
                    .is_some_and(|t| vocab::is_language_term(t) && !is_builtin_class(t));
                if skip {
                    continue;
                }
                if let Some(class_ref) = self.class_ref(&st.object) {
                    if !types.contains(&class_ref) {
                        types.push(class_ref);
                    }
                }
                continue;
            }
            if predicate == rdfs::LABEL {
                continue;
            }
            let category = if self.annotation_predicates.contains(predicate) {
                PropertyCategory::Annotation
            } else if vocab::is_language_term(predicate) {
                continue;
            } else if matches!(st.object, Term::Literal(_)) {
                PropertyCategory::Datatype
            } else {
                PropertyCategory::Object
            };
            let value = self.value_of(&st.object);
            assertions.push(Assertion {
                property: self.entity(predicate),
                category,
                value,
            });
        }
        (types, assertions)
    }

    /// rdfs9: an individual typed C is also typed with every named superclass of C.
    fn infer_individual_types(&mut self) {
        let mut supers: HashMap<&str, Vec<&Entity>> = HashMap::new();
        for class in &self.model.classes {
            let named = class.super_classes.iter().filter_map(|r| match r {
                ClassRef::Named(e) => Some(e),
                ClassRef::Anonymous(_) => None,
            });
            supers.entry(class.entity.iri()).or_default().extend(named);
        }
        let mut inferred_all = Vec::with_capacity(self.model.individuals.len());
        for individual in &self.model.individuals {
            let mut visited: HashSet<&str> = HashSet::new();
            let mut queue: Vec<&str> = individual
                .types
                .iter()
                .filter_map(|t| match t {
                    ClassRef::Named(e) => Some(e.iri()),
                    ClassRef::Anonymous(_) => None,
                })
                .collect();
            visited.extend(queue.iter().copied());
            let mut inferred = Vec::new();
            while let Some(current) = queue.pop() {
                for parent in supers.get(current).into_iter().flatten() {
                    if visited.insert(parent.iri()) {
                        inferred.push(ClassRef::Named((*parent).clone()));
                        queue.push(parent.iri());
                    }
                }
            }
            inferred_all.push(inferred);
        }
        for (individual, inferred) in self.model.individuals.iter_mut().zip(inferred_all) {
            individual.types.extend(inferred);
        }
    }

    // -----------------------------------------------------------------------
    // Blank constructs
    // -----------------------------------------------------------------------

    fn next_id(&mut self) -> String {
        let id = format!("bnode_{}", self.next_synthetic);
        self.next_synthetic += 1;
        id
    }

    fn class_ref(&mut self, term: &Term) -> Option<ClassRef> {
        match term {
            Term::Iri(iri) => Some(ClassRef::Named(self.entity(iri))),
            Term::Blank(_) => match self.resolve_blank(term) {
                Value::Expression(id) => Some(ClassRef::Anonymous(id)),
                _ => None,
            },
            Term::Literal(_) => None,
        }
    }

    fn value_of(&mut self, term: &Term) -> Value {
        match term {
            Term::Iri(iri) if iri == rdf::NIL => Value::List(ListHead::Nil),
            Term::Iri(iri) => {
                if let Some(value) = self.resolved.get(term) {
                    return value.clone();
                }
                match self.blank_shape(term) {
                    BlankShape::Container => self.resolve_container(term, iri.clone(), Some(iri.clone())),
                    BlankShape::Statement => self.resolve_statement(term, iri.clone(), Some(iri.clone())),
                    _ => Value::Named(self.entity(iri)),
                }
            }
            Term::Literal(lit) => Value::Literal(lit.clone()),
            Term::Blank(_) => self.resolve_blank(term),
        }
    }

    fn blank_shape(&self, term: &Term) -> BlankShape {
        let triples = self.triples;
        let has = |p: &str| triples.has_predicate(term, p);
        if triples.has_type(term, owl::RESTRICTION)
            || has(owl::ON_PROPERTY)
            || has(owl::UNION_OF)
            || has(owl::INTERSECTION_OF)
            || has(owl::COMPLEMENT_OF)
            || has(owl::ONE_OF)
        {
            BlankShape::Expression
        } else if has(rdf::FIRST) {
            BlankShape::List
        } else if [rdf::BAG, rdf::SEQ, rdf::ALT]
            .iter()
            .any(|t| triples.has_type(term, t))
            || triples
                .outgoing(term)
                .any(|st| container_index(&st.predicate).is_some())
        {
            BlankShape::Container
        } else if triples.has_type(term, rdf::STATEMENT) || has(rdf::SUBJECT) {
            BlankShape::Statement
        } else {
            BlankShape::Plain
        }
    }

    fn resolve_blank(&mut self, term: &Term) -> Value {
        if let Some(value) = self.resolved.get(term) {
            return value.clone();
        }
        let id = self.next_id();
        match self.blank_shape(term) {
            BlankShape::Expression => self.resolve_expression(term, id),
            BlankShape::List => self.resolve_list_cell(term, id),
            BlankShape::Container => self.resolve_container(term, id, None),
            BlankShape::Statement => self.resolve_statement(term, id, None),
            BlankShape::Plain => {
                let idx = self.model.individuals.len();
                self.model.individuals.push(IndividualEntity {
                    id,
                    entity: None,
                    types: Vec::new(),
                    assertions: Vec::new(),
                });
                let value = Value::Blank(idx);
                self.resolved.insert(term.clone(), value.clone());
                let (types, assertions) = self.read_individual(term);
                self.model.individuals[idx].types = types;
                self.model.individuals[idx].assertions = assertions;
                value
            }
        }
    }

    fn resolve_expression(&mut self, term: &Term, id: String) -> Value {
        let triples = self.triples;
        let idx = ExprId(self.model.expressions.len());
        self.model.expressions.push(Expression {
            id,
            body: ExpressionBody::Union(Vec::new()),
        });
        let value = Value::Expression(idx);
        self.resolved.insert(term.clone(), value.clone());

        let body = if let Some(list) = triples.object(term, owl::UNION_OF) {
            ExpressionBody::Union(self.class_list(list))
        } else if let Some(list) = triples.object(term, owl::INTERSECTION_OF) {
            ExpressionBody::Intersection(self.class_list(list))
        } else if let Some(operand) = triples.object(term, owl::COMPLEMENT_OF) {
            ExpressionBody::Complement(self.class_ref(operand))
        } else if let Some(list) = triples.object(term, owl::ONE_OF) {
            let members = self.read_list(list);
            ExpressionBody::OneOf(members.iter().map(|m| self.value_of(m)).collect())
        } else {
            ExpressionBody::Restriction(self.read_restriction(term))
        };
        self.model.expressions[idx.0].body = body;
        value
    }

    fn read_restriction(&mut self, term: &Term) -> Restriction {
        let triples = self.triples;
        let on_property = triples
            .object(term, owl::ON_PROPERTY)
            .and_then(Term::as_iri)
            .map(|iri| self.entity(iri));
        let mut facets = Vec::new();
        if let Some(property) = &on_property {
            facets.push(format!("onProperty {}", property.id()));
        }
        for (predicate, name) in CARDINALITIES {
            if let Some(Term::Literal(lit)) = triples.object(term, predicate) {
                facets.push(format!("{name} {}", lit.value));
            }
        }
        if let Some(Term::Literal(lit)) = triples.object(term, owl::HAS_SELF) {
            facets.push(format!("hasSelf {}", lit.value));
        }
        let mut fillers = Vec::new();
        for (predicate, quantifier) in [
            (owl::SOME_VALUES_FROM, Quantifier::Some),
            (owl::ALL_VALUES_FROM, Quantifier::All),
            (owl::ON_CLASS, Quantifier::Qualified),
            (owl::ON_DATA_RANGE, Quantifier::Qualified),
        ] {
            if let Some(filler) = triples.object(term, predicate) {
                if let Some(class_ref) = self.class_ref(filler) {
                    fillers.push((quantifier, class_ref));
                }
            }
        }
        let has_value = triples
            .object(term, owl::HAS_VALUE)
            .map(|v| self.value_of(v));
        if let Some(Value::Literal(lit)) = &has_value {
            facets.push(format!("hasValue {}", lit.value));
        }
        Restriction {
            on_property,
            facets,
            fillers,
            has_value,
        }
    }

    fn class_list(&mut self, head: &Term) -> Vec<ClassRef> {
        let members = self.read_list(head);
        members.iter().filter_map(|m| self.class_ref(m)).collect()
    }

    /// Elements of an `rdf:first`/`rdf:rest` chain. The cells are marked as
    /// consumed so they never surface as free-standing lists.
    fn read_list(&mut self, head: &Term) -> Vec<Term> {
        let triples = self.triples;
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut current = head.clone();
        while current.as_iri() != Some(rdf::NIL) && seen.insert(current.clone()) {
            if current.is_blank() {
                self.consumed_lists.insert(current.clone());
            }
            if let Some(first) = triples.object(&current, rdf::FIRST) {
                items.push(first.clone());
            }
            match triples.object(&current, rdf::REST) {
                Some(rest) => current = rest.clone(),
                None => break,
            }
        }
        items
    }

    fn resolve_list_cell(&mut self, term: &Term, id: String) -> Value {
        let triples = self.triples;
        let idx = self.model.lists.len();
        self.model.lists.push(ListCell {
            id,
            first: Value::List(ListHead::Nil),
            rest: ListHead::Nil,
        });
        let value = Value::List(ListHead::Cell(idx));
        self.resolved.insert(term.clone(), value.clone());

        let first = triples
            .object(term, rdf::FIRST)
            .map(|f| self.value_of(f))
            .unwrap_or(Value::List(ListHead::Nil));
        let rest = match triples.object(term, rdf::REST) {
            Some(rest) if rest.is_blank() => match self.resolve_blank(rest) {
                Value::List(head) => head,
                _ => ListHead::Nil,
            },
            _ => ListHead::Nil,
        };
        self.model.lists[idx].first = first;
        self.model.lists[idx].rest = rest;
        value
    }

    fn resolve_container(&mut self, term: &Term, id: String, iri: Option<String>) -> Value {
        let triples = self.triples;
        let kind = if triples.has_type(term, rdf::SEQ) {
            ContainerKind::Seq
        } else if triples.has_type(term, rdf::ALT) {
            ContainerKind::Alt
        } else {
            ContainerKind::Bag
        };
        let idx = self.model.containers.len();
        let id = match &iri {
            Some(iri) => self.model.prefixes.qualify(iri).id(),
            None => id,
        };
        self.model.containers.push(Container {
            id,
            iri,
            kind,
            members: Vec::new(),
        });
        let value = Value::Container(idx);
        self.resolved.insert(term.clone(), value.clone());

        let mut indexed: Vec<(usize, &Term)> = triples
            .outgoing(term)
            .filter_map(|st| container_index(&st.predicate).map(|n| (n, &st.object)))
            .collect();
        indexed.sort_by_key(|(n, _)| *n);
        let members = indexed
            .into_iter()
            .map(|(n, member)| (n, self.value_of(member)))
            .collect();
        self.model.containers[idx].members = members;
        value
    }

    fn resolve_statement(&mut self, term: &Term, id: String, iri: Option<String>) -> Value {
        let triples = self.triples;
        let idx = self.model.statements.len();
        let id = match &iri {
            Some(iri) => self.model.prefixes.qualify(iri).id(),
            None => id,
        };
        self.model.statements.push(ReifiedStatement {
            id,
            iri,
            subject: None,
            predicate: None,
            object: None,
        });
        let value = Value::Statement(idx);
        self.resolved.insert(term.clone(), value.clone());

        let subject = triples.object(term, rdf::SUBJECT).map(|s| self.value_of(s));
        let predicate = triples
            .object(term, rdf::PREDICATE)
            .and_then(Term::as_iri)
            .map(|p| self.entity(p));
        let object = triples.object(term, rdf::OBJECT).map(|o| self.value_of(o));
        let statement = &mut self.model.statements[idx];
        statement.subject = subject;
        statement.predicate = predicate;
        statement.object = object;
        value
    }

    fn read_remaining_blank_subjects(&mut self) {
        let triples = self.triples;
        let mut pending = Vec::new();
        let mut seen = HashSet::new();
        for st in triples.statements() {
            if st.subject.is_blank() && seen.insert(&st.subject) {
                pending.push(&st.subject);
            }
        }
        for subject in pending {
            if self.resolved.contains_key(subject) || self.consumed_lists.contains(subject) {
                continue;
            }
            let types: Vec<&str> = triples.types(subject).collect();
            if types.iter().any(|t| AXIOM_TYPES.contains(t)) {
                continue;
            }
            if self.blank_shape(subject) == BlankShape::Expression {
                continue;
            }
            self.resolve_blank(subject);
        }
        // Named containers and statements that nothing referenced.
        let mut named = Vec::new();
        for construct in [rdf::BAG, rdf::SEQ, rdf::ALT, rdf::STATEMENT] {
            for t in triples.instances_of(construct) {
                if t.as_iri().is_some() && !self.resolved.contains_key(t) {
                    named.push(t.clone());
                }
            }
        }
        for term in named {
            self.value_of(&term);
        }
    }

    // -----------------------------------------------------------------------
    // Cycle detection
    // -----------------------------------------------------------------------

    /// Cycles among named `rdfs:subClassOf` edges, each reported once.
    fn find_subclass_cycles(&self) -> Vec<Vec<String>> {
        let mut graph: HashMap<String, Vec<String>> = HashMap::new();
        for class in &self.model.classes {
            let parents = class.super_classes.iter().filter_map(|r| match r {
                ClassRef::Named(e) => Some(e.id()),
                ClassRef::Anonymous(_) => None,
            });
            graph.entry(class.entity.id()).or_default().extend(parents);
        }
        let mut cycles = Vec::new();
        let mut done: HashSet<String> = HashSet::new();
        for class in &self.model.classes {
            let start = class.entity.id();
            let mut path = Vec::new();
            find_cycles_from(&start, &graph, &mut path, &mut done, &mut cycles);
        }
        for cycle in &cycles {
            warn!(classes = %cycle.join(" -> "), "subclass cycle detected");
        }
        cycles
    }
}

fn find_cycles_from(
    node: &str,
    graph: &HashMap<String, Vec<String>>,
    path: &mut Vec<String>,
    done: &mut HashSet<String>,
    cycles: &mut Vec<Vec<String>>,
) {
    if done.contains(node) {
        return;
    }
    if let Some(pos) = path.iter().position(|p| p == node) {
        cycles.push(path[pos..].to_vec());
        return;
    }
    path.push(node.to_string());
    for parent in graph.get(node).into_iter().flatten() {
        find_cycles_from(parent, graph, path, done, cycles);
    }
    path.pop();
    done.insert(node.to_string());
}

fn container_index(predicate: &str) -> Option<usize> {
    predicate
        .strip_prefix(rdf::MEMBER_PREFIX)
        .and_then(|n| n.parse().ok())
}

fn is_construct_type(types: &[&str]) -> bool {
    types
        .iter()
        .any(|t| matches!(*t, rdf::BAG | rdf::SEQ | rdf::ALT | rdf::STATEMENT | rdf::LIST))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_index_parses_membership_properties() {
        assert_eq!(container_index("http://www.w3.org/1999/02/22-rdf-syntax-ns#_3"), Some(3));
        assert_eq!(container_index("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"), None);
    }

    #[test]
    fn cycle_search_reports_each_cycle_once() {
        let mut graph = HashMap::new();
        graph.insert("a".to_string(), vec!["b".to_string()]);
        graph.insert("b".to_string(), vec!["a".to_string()]);
        let mut cycles = Vec::new();
        let mut done = HashSet::new();
        for start in ["a", "b"] {
            find_cycles_from(start, &graph, &mut Vec::new(), &mut done, &mut cycles);
        }
        assert_eq!(cycles, vec![vec!["a".to_string(), "b".to_string()]]);
    }
}
