mod common;

use std::collections::HashSet;

use ontograph::model::request::OntologyPayload;
use ontograph::pipeline::{canonical_graph, generate};
use ontograph::{GraphError, GraphRequest};

#[test]
fn class_graph_document_counts() {
    let request = common::request("test_classes.ttl", "class", "graffoo");
    let generated = generate(&request).unwrap();
    assert_eq!(generated.file_name, "test_classes.ttl");
    assert_eq!(generated.node_count, 7);
    assert_eq!(generated.edge_count, 5);
    assert!(generated
        .document
        .contains("Title:  Test Graph\n\nOntology URI:  http://purl.org/ninepts/test"));
    assert!(generated
        .document
        .contains("ninepts: http://purl.org/ninepts/test#"));
}

#[test]
fn generation_is_deterministic() {
    for (fixture, graph_type) in [
        ("test_classes.ttl", "class"),
        ("properties.ttl", "both"),
        ("individuals.ttl", "individual"),
        ("rdf_constructs.ttl", "rdf"),
    ] {
        let request = common::request(fixture, graph_type, "graffoo");
        let first = generate(&request).unwrap();
        let second = generate(&request).unwrap();
        assert_eq!(first, second, "{fixture}");
    }
}

#[test]
fn every_edge_endpoint_is_a_written_node() {
    let request = common::request("rdf_constructs.ttl", "rdf", "graffoo");
    let doc = generate(&request).unwrap().document;
    let node_ids: HashSet<&str> = doc
        .match_indices("<node id=\"")
        .map(|(pos, m)| {
            let rest = &doc[pos + m.len()..];
            &rest[..rest.find('"').unwrap()]
        })
        .collect();
    for (pos, m) in doc.match_indices(" source=\"") {
        let rest = &doc[pos + m.len()..];
        let id = &rest[..rest.find('"').unwrap()];
        if doc[..pos].ends_with("<y:Arrows") {
            continue;
        }
        assert!(node_ids.contains(id), "edge source {id} has no node");
    }
}

#[test]
fn missing_ontology_iri_is_reported_as_none_defined() {
    let request = common::request("no_ontology.ttl", "class", "graffoo");
    let doc = generate(&request).unwrap().document;
    assert!(doc.contains("Ontology URI:  None defined"));
    assert!(doc.contains("Lion &amp; &lt;Cub&gt;"));
}

#[test]
fn custom_class_topology_matches_graffoo() {
    let graffoo = canonical_graph(&common::request("test_classes.ttl", "class", "graffoo")).unwrap();
    let mut request = common::request("test_classes.ttl", "class", "custom");
    let style = &mut request.style;
    for field in [&mut style.class_node_shape, &mut style.data_node_shape] {
        *field = Some("roundRectangle".into());
    }
    for field in [
        &mut style.class_fill_color,
        &mut style.class_text_color,
        &mut style.class_border_color,
        &mut style.data_fill_color,
        &mut style.data_text_color,
        &mut style.data_border_color,
        &mut style.subclass_of_line_color,
    ] {
        *field = Some("#336699".into());
    }
    for field in [
        &mut style.class_border_type,
        &mut style.data_border_type,
        &mut style.subclass_of_line_type,
    ] {
        *field = Some("solid".into());
    }
    style.subclass_of_source_shape = Some("none".into());
    style.subclass_of_target_shape = Some("triangleSolid".into());
    let custom = canonical_graph(&request).unwrap();
    assert_eq!(graffoo, custom);
}

#[test]
fn padded_custom_fields_validate_and_style_the_document() {
    let mut request = common::request("test_classes.ttl", "class", "custom");
    let style = &mut request.style;
    for field in [&mut style.class_node_shape, &mut style.data_node_shape] {
        *field = Some(" hexagon ".into());
    }
    for field in [
        &mut style.class_fill_color,
        &mut style.class_text_color,
        &mut style.class_border_color,
        &mut style.data_fill_color,
        &mut style.data_text_color,
        &mut style.data_border_color,
        &mut style.subclass_of_line_color,
    ] {
        *field = Some(" #336699 ".into());
    }
    for field in [
        &mut style.class_border_type,
        &mut style.data_border_type,
        &mut style.subclass_of_line_type,
    ] {
        *field = Some("dotted ".into());
    }
    style.subclass_of_source_shape = Some(" none".into());
    style.subclass_of_target_shape = Some("diamondSolid ".into());
    let generated = generate(&request).unwrap();
    assert!(generated.document.contains("#336699"));
    assert!(generated.document.contains("hexagon"));
    assert!(generated.document.contains("diamond"));
    assert!(!generated.document.contains(" #336699 "));
}

#[test]
fn vowl_class_graph_has_five_classes() {
    let generated = generate(&common::request("test_classes.ttl", "class", "vowl")).unwrap();
    assert_eq!(generated.node_count, 7);
    assert_eq!(generated.edge_count, 5);
    assert!(generated.document.contains("Employee\n(external)"));
}

#[test]
fn uml_builds_both_scopes_for_class_requests() {
    let mut request = common::request("properties.ttl", "class", "uml");
    request.style.uml_node_color = Some("#FFFF99".into());
    request.style.uml_data_node_color = Some("#CCCC66".into());
    let graph = canonical_graph(&request).unwrap();
    assert!(graph
        .edges()
        .iter()
        .any(|e| e.id == "ex:Person|ex:worksFor|ex:Organization"));
}

#[test]
fn collapse_merges_parallel_assertions() {
    let plain = generate(&common::request("individuals.ttl", "individual", "graffoo")).unwrap();
    let request = common::request("individuals.ttl", "individual", "graffoo").with_collapse(true);
    let collapsed = generate(&request).unwrap();
    assert_eq!(collapsed.edge_count, plain.edge_count - 1);
    assert!(collapsed.document.contains("ex:knows,\nex:likes"));
}

#[test]
fn reasoning_adds_type_edges() {
    let plain = generate(&common::request("individuals.ttl", "individual", "graffoo")).unwrap();
    let request = common::request("individuals.ttl", "individual", "graffoo").with_reasoning(true);
    let inferred = generate(&request).unwrap();
    assert_eq!(inferred.edge_count, plain.edge_count + 2);
    assert_eq!(inferred.node_count, plain.node_count + 1);
}

#[test]
fn cyclic_hierarchy_renders() {
    let generated = generate(&common::request("cycle.ttl", "class", "graffoo")).unwrap();
    assert_eq!(generated.node_count, 5);
    assert_eq!(generated.edge_count, 2);
}

#[test]
fn rdfxml_and_ntriples_render_the_same_graph() {
    let nt = canonical_graph(&common::request("shapes.nt", "class", "graffoo")).unwrap();
    let xml = canonical_graph(&common::request("shapes.rdf", "class", "graffoo")).unwrap();
    assert_eq!(nt.edges(), xml.edges());
}

#[test]
fn validation_errors_stop_before_parsing() {
    let request = GraphRequest::new("Broken", "class", "graffoo")
        .with_ontology(OntologyPayload::new("broken.ttl", "this is not turtle"));
    let mut invalid = request.clone();
    invalid.visualization = "dot".into();
    assert!(matches!(generate(&invalid), Err(GraphError::Validation(_))));
    assert!(matches!(generate(&request), Err(GraphError::OntologyLoad(_))));
}
