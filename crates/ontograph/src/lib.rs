//! Render OWL/RDF ontologies as yEd GraphML diagrams.
//!
//! The pipeline runs validate → parse → normalize → build → (collapse) →
//! render → serialize; [`pipeline::generate`] drives it for one request.

pub mod emitter;
pub mod error;
pub mod extraction;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod validation;

pub use error::GraphError;
pub use model::request::{GraphRequest, OntologyPayload};
pub use pipeline::{generate, GeneratedGraph};
