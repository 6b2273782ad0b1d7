use ontograph::model::iri::{local_name, namespace_of, PrefixMap};

fn prefixes() -> PrefixMap {
    let mut map = PrefixMap::with_standard();
    map.insert("ninepts", "http://purl.org/ninepts/test#");
    map.insert("test", "http://example.com/test#");
    map
}

// --- Prefix map ---

#[test]
fn standard_prefixes_are_present() {
    let map = PrefixMap::with_standard();
    assert_eq!(map.names(), vec!["owl", "rdf", "rdfs", "xsd"]);
    assert_eq!(map.namespace("owl"), Some("http://www.w3.org/2002/07/owl#"));
}

#[test]
fn entries_are_sorted_by_name() {
    let map = prefixes();
    assert_eq!(
        map.names(),
        vec!["ninepts", "owl", "rdf", "rdfs", "test", "xsd"]
    );
    assert_eq!(map.len(), 6);
}

#[test]
fn first_binding_wins() {
    let mut map = prefixes();
    map.insert("test", "http://other.example/#");
    assert_eq!(map.namespace("test"), Some("http://example.com/test#"));
}

#[test]
fn empty_namespace_is_ignored() {
    let mut map = PrefixMap::new();
    map.insert("", "");
    assert!(map.is_empty());
}

#[test]
fn display_lines_follow_name_order() {
    let lines = prefixes().display_lines();
    assert_eq!(lines[0], "ninepts: http://purl.org/ninepts/test#");
    assert_eq!(lines[4], "test: http://example.com/test#");
}

// --- Qualified names ---

#[test]
fn qualify_declared_iri() {
    let name = prefixes().qualify("http://purl.org/ninepts/test#Person");
    assert_eq!(name.prefix.as_deref(), Some("ninepts"));
    assert_eq!(name.local, "Person");
    assert_eq!(name.id(), "ninepts:Person");
    assert!(!name.is_undeclared());
}

#[test]
fn qualify_prefers_longest_namespace() {
    let mut map = PrefixMap::new();
    map.insert("ex", "http://example.org/");
    map.insert("onto", "http://example.org/onto#");
    assert_eq!(map.qualify("http://example.org/onto#Thing").id(), "onto:Thing");
    assert_eq!(map.qualify("http://example.org/Other").id(), "ex:Other");
}

#[test]
fn undeclared_iri_keeps_full_id() {
    let name = prefixes().qualify("http://nowhere.example/vocab#Widget");
    assert!(name.is_undeclared());
    assert_eq!(name.local, "Widget");
    assert_eq!(name.id(), "http://nowhere.example/vocab#Widget");
}

#[test]
fn namespace_itself_is_not_qualified() {
    let name = prefixes().qualify("http://example.com/test#");
    assert!(name.is_undeclared());
}

#[test]
fn display_local_decodes_percent_escapes() {
    let name = prefixes().qualify("http://example.com/test#caf%C3%A9%20bar");
    assert_eq!(name.display_local(), "café bar");
    assert_eq!(name.display_id(), "test:café bar");
    assert_eq!(name.id(), "test:caf%C3%A9%20bar");
}

// --- Local names ---

#[test]
fn local_and_namespace_split() {
    assert_eq!(local_name("http://example.com/test#Employee"), "Employee");
    assert_eq!(namespace_of("http://example.com/test#Employee"), "http://example.com/test#");
    assert_eq!(local_name("http://example.com/shapes/Circle"), "Circle");
}
