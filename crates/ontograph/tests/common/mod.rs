//! Fixture helpers shared by the integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use ontograph::extraction::loader::parse_payload;
use ontograph::extraction::ontology::OntologyModel;
use ontograph::model::request::{GraphRequest, OntologyPayload};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn payload(name: &str) -> OntologyPayload {
    let data = std::fs::read(fixture_path(name)).expect("read fixture");
    OntologyPayload::new(name, data)
}

/// A request for `name` with default options and the title "Test Graph".
pub fn request(name: &str, graph_type: &str, visualization: &str) -> GraphRequest {
    GraphRequest::new("Test Graph", graph_type, visualization).with_ontology(payload(name))
}

pub fn model(name: &str, reasoning: bool) -> OntologyModel {
    let doc = parse_payload(&payload(name)).expect("parse fixture");
    OntologyModel::from_document(&doc, reasoning)
}
