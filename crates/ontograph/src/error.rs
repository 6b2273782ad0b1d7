//! Error taxonomy for one generation call.
//!
//! Validation problems are aggregated and reported together; load and build
//! failures stop the pipeline at their first cause.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Every invalid request field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationError {
    problems: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem. A second problem for the same field is appended to the first.
    pub fn add(&mut self, field: &str, reason: impl Into<String>) {
        let reason = reason.into();
        self.problems
            .entry(field.to_string())
            .and_modify(|existing| {
                existing.push_str("; ");
                existing.push_str(&reason);
            })
            .or_insert(reason);
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn problems(&self) -> &BTreeMap<String, String> {
        &self.problems
    }

    pub fn reason(&self, field: &str) -> Option<&str> {
        self.problems.get(field).map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, otherwise the whole collection as one error.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid graph request ({} problem", self.problems.len())?;
        if self.problems.len() != 1 {
            f.write_str("s")?;
        }
        f.write_str(")")?;
        for (field, reason) in &self.problems {
            write!(f, "\n  {field}: {reason}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum OntologyLoadError {
    #[error("ontology file {file} is empty")]
    Empty { file: String },
    #[error("unsupported ontology format for {file}; use .ttl, .nt, .nq, .trig, .n3, .rdf, .owl or .xml")]
    UnsupportedFormat { file: String },
    #[error("could not parse {file}: {message}")]
    Parse { file: String, message: String },
    #[error("ontology file {file} contains no triples")]
    NoTriples { file: String },
}

/// An invariant the pipeline relies on did not hold. Always a defect.
#[derive(Debug, Error)]
pub enum InternalBuildError {
    #[error("edge {edge} references missing node {endpoint}")]
    DanglingEdge { edge: String, endpoint: String },
    #[error("node id {id} is used more than once")]
    DuplicateNode { id: String },
    #[error("edge id {id} is used more than once")]
    DuplicateEdge { id: String },
    #[error("graph does not start with the {expected} node")]
    MissingHeader { expected: String },
    #[error("attribute {attribute} of {element} resolved to an empty or null value")]
    EmptyAttribute { element: String, attribute: String },
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    OntologyLoad(#[from] OntologyLoadError),
    #[error(transparent)]
    InternalBuild(#[from] InternalBuildError),
}
