pub mod graph;
pub mod iri;
pub mod request;
pub mod style;
pub mod vocab;
