mod common;

use ontograph::error::OntologyLoadError;
use ontograph::extraction::loader::{parse_payload, select_format, Term};
use ontograph::model::request::OntologyPayload;
use ontograph::model::vocab::{owl, rdfs};
use oxrdfio::RdfFormat;

const NINEPTS: &str = "http://purl.org/ninepts/test#";

#[test]
fn format_follows_file_suffix() {
    let cases = [
        ("a.ttl", RdfFormat::Turtle),
        ("a.nt", RdfFormat::NTriples),
        ("a.rdf", RdfFormat::RdfXml),
        ("a.owl", RdfFormat::RdfXml),
        ("a.XML", RdfFormat::RdfXml),
    ];
    for (name, expected) in cases {
        let payload = OntologyPayload::new(name, "x");
        assert_eq!(select_format(&payload).unwrap(), expected, "{name}");
    }
}

#[test]
fn media_type_overrides_suffix() {
    let payload = OntologyPayload::new("upload.bin", "x").with_media_type("text/turtle");
    assert_eq!(select_format(&payload).unwrap(), RdfFormat::Turtle);
}

#[test]
fn unknown_suffix_is_unsupported() {
    let payload = OntologyPayload::new("ontology.docx", "x");
    assert!(matches!(
        select_format(&payload),
        Err(OntologyLoadError::UnsupportedFormat { .. })
    ));
}

#[test]
fn turtle_fixture_parses_with_prefixes() {
    let doc = parse_payload(&common::payload("test_classes.ttl")).unwrap();
    assert_eq!(doc.file_name, "test_classes.ttl");
    assert!(doc
        .prefixes
        .iter()
        .any(|(name, ns)| name == "ninepts" && ns == NINEPTS));
    assert_eq!(doc.prefixes.len(), 6);

    let person = Term::Iri(format!("{NINEPTS}Person"));
    assert!(doc.triples.has_type(&person, owl::CLASS));
    let parents = doc.triples.objects(&person, rdfs::SUB_CLASS_OF);
    assert_eq!(parents, vec![&Term::Iri(format!("{NINEPTS}Agent"))]);
}

#[test]
fn ntriples_and_rdfxml_yield_the_same_triples() {
    let nt = parse_payload(&common::payload("shapes.nt")).unwrap();
    let xml = parse_payload(&common::payload("shapes.rdf")).unwrap();
    assert_eq!(nt.triples.len(), 4);
    assert_eq!(xml.triples.len(), 4);
    let circle = Term::Iri("http://example.org/shapes#Circle".into());
    assert_eq!(
        nt.triples.object(&circle, rdfs::SUB_CLASS_OF),
        xml.triples.object(&circle, rdfs::SUB_CLASS_OF)
    );
}

#[test]
fn syntax_error_is_a_parse_failure() {
    let payload = OntologyPayload::new("broken.ttl", "@prefix ex: <http://ex.org/> .\nex:a ex:b");
    match parse_payload(&payload) {
        Err(OntologyLoadError::Parse { file, .. }) => assert_eq!(file, "broken.ttl"),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn blank_content_is_empty() {
    let payload = OntologyPayload::new("blank.ttl", "\n   \n");
    assert!(matches!(
        parse_payload(&payload),
        Err(OntologyLoadError::Empty { .. })
    ));
}

#[test]
fn prefix_only_document_has_no_triples() {
    let payload = OntologyPayload::new("prefixes.ttl", "@prefix ex: <http://ex.org/> .\n");
    assert!(matches!(
        parse_payload(&payload),
        Err(OntologyLoadError::NoTriples { .. })
    ));
}

#[test]
fn statements_keep_document_order() {
    let doc = parse_payload(&common::payload("individuals.ttl")).unwrap();
    let alice = Term::Iri("http://example.org/people#alice".into());
    let predicates: Vec<&str> = doc
        .triples
        .outgoing(&alice)
        .map(|st| st.predicate.as_str())
        .collect();
    assert_eq!(predicates.first(), Some(&"http://www.w3.org/1999/02/22-rdf-syntax-ns#type"));
    assert_eq!(predicates.last(), Some(&rdfs::COMMENT));
}
