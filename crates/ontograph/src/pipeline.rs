//! One generation call: validate → parse → normalize → build → (collapse) →
//! render → serialize. Every stage is a pure function of its input; any
//! failure aborts the call with no partial output.

use tracing::debug;

use crate::emitter::graphml;
use crate::error::{GraphError, ValidationError};
use crate::extraction::builder::GraphBuilder;
use crate::extraction::collapse::collapse;
use crate::extraction::loader::parse_payload;
use crate::extraction::ontology::OntologyModel;
use crate::model::graph::CanonicalGraph;
use crate::model::request::{GraphRequest, Notation, Scope};
use crate::render::Renderer;
use crate::validation::validate;

/// A finished document with its element counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGraph {
    pub file_name: String,
    pub document: String,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Run the whole pipeline for one request.
pub fn generate(request: &GraphRequest) -> Result<GeneratedGraph, GraphError> {
    let (scope, notation) = checked_options(request)?;
    let model = load_model(request)?;
    let graph = build_graph(&model, scope, notation, request.collapse_requested())?;

    let renderer = Renderer::new(notation, notation.effective_scope(scope), &request.style);
    let styled = renderer.render(graph);
    let document = graphml::serialize(
        &styled,
        request.graph_title.trim(),
        &model.ontology_uri_text(),
        &model.prefixes.display_lines(),
    )?;

    debug!(
        file = %request.ontology.file_name,
        bytes = document.len(),
        "serialized document"
    );
    Ok(GeneratedGraph {
        file_name: request.ontology.file_name.clone(),
        node_count: styled.nodes.len(),
        edge_count: styled.edges.len(),
        document,
    })
}

/// Validate, parse and build, stopping before any notation is applied.
pub fn canonical_graph(request: &GraphRequest) -> Result<CanonicalGraph, GraphError> {
    let (scope, notation) = checked_options(request)?;
    let model = load_model(request)?;
    build_graph(&model, scope, notation, request.collapse_requested())
}

/// Validate the request and return its typed scope and notation.
fn checked_options(request: &GraphRequest) -> Result<(Scope, Notation), GraphError> {
    validate(request)?;
    match (request.scope(), request.notation()) {
        (Some(scope), Some(notation)) => Ok((scope, notation)),
        // unknown tokens were already reported by validate
        _ => Err(ValidationError::new().into()),
    }
}

/// Parse the payload and normalize it, applying reasoning when requested.
pub fn load_model(request: &GraphRequest) -> Result<OntologyModel, GraphError> {
    let document = parse_payload(&request.ontology)?;
    Ok(OntologyModel::from_document(
        &document,
        request.reasoning_requested(),
    ))
}

/// Build the canonical graph for the notation's effective scope. Collapsing
/// never applies to vowl, which keeps properties as separate nodes.
pub fn build_graph(
    model: &OntologyModel,
    scope: Scope,
    notation: Notation,
    collapse_edges: bool,
) -> Result<CanonicalGraph, GraphError> {
    let graph = GraphBuilder::new(model, notation.effective_scope(scope)).build()?;
    if collapse_edges && notation != Notation::Vowl {
        Ok(collapse(graph))
    } else {
        Ok(graph)
    }
}
