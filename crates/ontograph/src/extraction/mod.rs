pub mod builder;
pub mod collapse;
pub mod loader;
pub mod ontology;
