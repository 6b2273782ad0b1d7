//! Parse an ontology payload into an indexed set of triples.
//!
//! The surface syntax is chosen from the declared media type, falling back
//! to the file name suffix. Parsing stops at the first error: a document that
//! does not parse cannot be partially modeled.

use std::collections::HashMap;

use oxrdf::Term as RdfTerm;
use oxrdfio::{RdfFormat, RdfParser};
use tracing::debug;

use crate::error::OntologyLoadError;
use crate::model::request::OntologyPayload;

/// Literal value with its datatype IRI and optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: String,
    pub datatype: String,
    pub language: Option<String>,
}

/// Owned RDF term. Blank node labels are parser-assigned and carry no
/// meaning beyond identity within one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    Blank(String),
    Literal(Literal),
}

impl Term {
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    fn from_rdf(term: RdfTerm) -> Option<Self> {
        match term {
            RdfTerm::NamedNode(node) => Some(Term::Iri(node.into_string())),
            RdfTerm::BlankNode(node) => Some(Term::Blank(node.into_string())),
            RdfTerm::Literal(literal) => Some(Term::Literal(Literal {
                value: literal.value().to_string(),
                datatype: literal.datatype().as_str().to_string(),
                language: literal.language().map(str::to_string),
            })),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

/// Triples in document order, indexed by subject and by object.
#[derive(Debug, Default)]
pub struct TripleIndex {
    statements: Vec<Statement>,
    by_subject: HashMap<Term, Vec<usize>>,
    by_object: HashMap<Term, Vec<usize>>,
}

impl TripleIndex {
    pub fn new(statements: Vec<Statement>) -> Self {
        let mut by_subject: HashMap<Term, Vec<usize>> = HashMap::new();
        let mut by_object: HashMap<Term, Vec<usize>> = HashMap::new();
        for (pos, st) in statements.iter().enumerate() {
            by_subject.entry(st.subject.clone()).or_default().push(pos);
            by_object.entry(st.object.clone()).or_default().push(pos);
        }
        Self {
            statements,
            by_subject,
            by_object,
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Statements about `subject`, in document order.
    pub fn outgoing<'a>(&'a self, subject: &Term) -> impl Iterator<Item = &'a Statement> + 'a {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .map(|&pos| &self.statements[pos])
    }

    /// Statements whose object is `object`, in document order.
    pub fn incoming<'a>(&'a self, object: &Term) -> impl Iterator<Item = &'a Statement> + 'a {
        self.by_object
            .get(object)
            .into_iter()
            .flatten()
            .map(|&pos| &self.statements[pos])
    }

    pub fn objects(&self, subject: &Term, predicate: &str) -> Vec<&Term> {
        self.outgoing(subject)
            .filter(|st| st.predicate == predicate)
            .map(|st| &st.object)
            .collect()
    }

    pub fn object(&self, subject: &Term, predicate: &str) -> Option<&Term> {
        self.outgoing(subject)
            .find(|st| st.predicate == predicate)
            .map(|st| &st.object)
    }

    pub fn has_predicate(&self, subject: &Term, predicate: &str) -> bool {
        self.object(subject, predicate).is_some()
    }

    /// Named `rdf:type` values of `subject`.
    pub fn types<'a>(&'a self, subject: &Term) -> impl Iterator<Item = &'a str> + 'a {
        self.objects(subject, crate::model::vocab::rdf::TYPE)
            .into_iter()
            .filter_map(Term::as_iri)
    }

    pub fn has_type(&self, subject: &Term, class_iri: &str) -> bool {
        self.types(subject).any(|t| t == class_iri)
    }

    /// Subjects typed with `class_iri`, in document order, without repeats.
    pub fn instances_of(&self, class_iri: &str) -> Vec<&Term> {
        let class = Term::Iri(class_iri.to_string());
        let mut seen = Vec::new();
        for st in self.incoming(&class) {
            if st.predicate == crate::model::vocab::rdf::TYPE && !seen.contains(&&st.subject) {
                seen.push(&st.subject);
            }
        }
        seen
    }
}

/// A parsed ontology document.
#[derive(Debug)]
pub struct ParsedDocument {
    pub file_name: String,
    pub triples: TripleIndex,
    /// Prefixes declared by the document, in declaration order.
    pub prefixes: Vec<(String, String)>,
}

/// Choose a parser for the payload from its media type or file suffix.
pub fn select_format(payload: &OntologyPayload) -> Result<RdfFormat, OntologyLoadError> {
    if let Some(format) = payload
        .media_type
        .as_deref()
        .and_then(RdfFormat::from_media_type)
    {
        return Ok(format);
    }
    let suffix = payload
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match suffix.as_str() {
        "owl" | "xml" => Ok(RdfFormat::RdfXml),
        other => RdfFormat::from_extension(other).ok_or_else(|| {
            OntologyLoadError::UnsupportedFormat {
                file: payload.file_name.clone(),
            }
        }),
    }
}

/// Parse the payload bytes. Quads are flattened to triples.
pub fn parse_payload(payload: &OntologyPayload) -> Result<ParsedDocument, OntologyLoadError> {
    let file = payload.file_name.clone();
    if payload.data.iter().all(u8::is_ascii_whitespace) {
        return Err(OntologyLoadError::Empty { file });
    }
    let format = select_format(payload)?;
    debug!(file = %file, format = format.name(), bytes = payload.data.len(), "parsing ontology");

    let mut parser = RdfParser::from_format(format).for_reader(payload.data.as_slice());
    let mut statements = Vec::new();
    for quad in parser.by_ref() {
        let quad = quad.map_err(|e| OntologyLoadError::Parse {
            file: file.clone(),
            message: e.to_string(),
        })?;
        let subject = Term::from_rdf(RdfTerm::from(quad.subject));
        let object = Term::from_rdf(quad.object);
        if let (Some(subject), Some(object)) = (subject, object) {
            statements.push(Statement {
                subject,
                predicate: quad.predicate.into_string(),
                object,
            });
        }
    }
    let prefixes = parser
        .prefixes()
        .map(|(name, iri)| (name.to_string(), iri.to_string()))
        .collect::<Vec<_>>();

    if statements.is_empty() {
        return Err(OntologyLoadError::NoTriples { file });
    }
    debug!(triples = statements.len(), prefixes = prefixes.len(), "parsed ontology");
    Ok(ParsedDocument {
        file_name: file,
        triples: TripleIndex::new(statements),
        prefixes,
    })
}
