mod common;

use ontograph::extraction::builder::build;
use ontograph::model::graph::NodeKind;
use ontograph::model::request::{Notation, Scope, StyleFields};
use ontograph::model::style::{ArrowShape, LineType, NodeShape};
use ontograph::render::{NodeForm, Renderer, StyledGraph};

fn render(fixture: &str, scope: Scope, notation: Notation, style: &StyleFields) -> StyledGraph {
    let model = common::model(fixture, false);
    let scope = notation.effective_scope(scope);
    let graph = build(&model, scope).unwrap();
    Renderer::new(notation, scope, style).render(graph)
}

fn node<'a>(graph: &'a StyledGraph, id: &str) -> &'a ontograph::render::StyledNode {
    graph.nodes.iter().find(|n| n.id == id).unwrap()
}

fn edge<'a>(graph: &'a StyledGraph, id: &str) -> &'a ontograph::render::StyledEdge {
    graph.edges.iter().find(|e| e.id == id).unwrap()
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

#[test]
fn header_nodes_have_fixed_styles_in_every_notation() {
    for notation in Notation::ALL {
        let g = render("test_classes.ttl", Scope::Class, notation, &StyleFields::default());
        assert_eq!(g.nodes[0].style.fill.as_str(), "#99CCFF", "{notation:?}");
        assert_eq!(g.nodes[1].style.fill.as_str(), "#B7B69E", "{notation:?}");
        assert_eq!(g.nodes[0].style.shape, NodeShape::SquareRectangle);
    }
}

// ---------------------------------------------------------------------------
// Graffoo
// ---------------------------------------------------------------------------

#[test]
fn graffoo_palette() {
    let g = render("individuals.ttl", Scope::Individual, Notation::Graffoo, &StyleFields::default());
    let person = node(&g, "ex:Person");
    assert_eq!(person.style.shape, NodeShape::RoundRectangle);
    assert_eq!(person.style.fill.as_str(), "#FFFF00");
    let alice = node(&g, "ex:alice");
    assert_eq!(alice.style.shape, NodeShape::SmallCircle);
    assert_eq!(alice.style.fill.as_str(), "#FF7FC1");
    assert_eq!(node(&g, "literal_0").style.shape, NodeShape::ParallelogramRight);

    let knows = edge(&g, "ex:alice|ex:knows|ex:bob");
    assert_eq!(knows.label, "ex:knows");
    assert_eq!(knows.style.color.as_str(), "#000080");
    assert_eq!(knows.style.source, ArrowShape::CircleSolid);
    let name = edge(&g, "ex:alice|ex:name|literal_0");
    assert_eq!(name.style.color.as_str(), "#008000");
    assert_eq!(name.style.target, ArrowShape::TriangleEmpty);
    assert_eq!(edge(&g, "ex:alice|type|ex:Person").label, "rdf:type");
}

#[test]
fn graffoo_labels_subclass_edges() {
    let g = render("test_classes.ttl", Scope::Class, Notation::Graffoo, &StyleFields::default());
    assert_eq!(
        edge(&g, "ninepts:Person|subClassOf|ninepts:Agent").label,
        "rdfs:subClassOf"
    );
    assert!(g.nodes.iter().all(|n| n.form == NodeForm::Shape));
}

// ---------------------------------------------------------------------------
// VOWL
// ---------------------------------------------------------------------------

#[test]
fn vowl_strips_prefixes_and_marks_external_classes() {
    let g = render("test_classes.ttl", Scope::Class, Notation::Vowl, &StyleFields::default());
    assert_eq!(g.nodes.len(), 7);
    assert_eq!(g.edges.len(), 5);

    let person = node(&g, "ninepts:Person");
    assert_eq!(person.label, "Person");
    assert_eq!(person.style.shape, NodeShape::Circle);
    assert_eq!(person.style.fill.as_str(), "#AACCFF");

    let employee = node(&g, "test:Employee");
    assert_eq!(employee.label, "Employee\n(external)");
    assert_eq!(employee.style.fill.as_str(), "#3366CC");

    let sub = edge(&g, "test:Employee|subClassOf|ninepts:Person");
    assert_eq!(sub.label, "Subclass of");
    assert_eq!(sub.style.line, LineType::Dotted);
    assert!((sub.style.width - 2.0).abs() < f32::EPSILON);
}

#[test]
fn vowl_draws_owl_thing_dashed_and_white() {
    let g = render("properties.ttl", Scope::Property, Notation::Vowl, &StyleFields::default());
    let thing = node(&g, "owl:Thing");
    assert_eq!(thing.label, "Thing");
    assert_eq!(thing.style.fill.as_str(), "#FFFFFF");
    assert_eq!(thing.style.border_type, LineType::Dashed);
    let ancestor = edge(&g, "owl:Thing|ex:ancestorOf|owl:Thingex:ancestorOfowl:Thing");
    assert_eq!(ancestor.label, "ancestorOf (transitive)");
    let range = node(&g, "owl:Thingex:ancestorOfowl:Thing");
    assert_eq!(range.label, "Thing");
    assert_eq!(range.style.border_type, LineType::Dashed);
}

#[test]
fn vowl_gives_each_property_its_own_thing_and_datatype() {
    let g = render("properties.ttl", Scope::Property, Notation::Vowl, &StyleFields::default());
    let things: Vec<&str> = g
        .nodes
        .iter()
        .filter(|n| n.iri.as_deref() == Some("http://www.w3.org/2002/07/owl#Thing"))
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(
        things,
        vec![
            "owl:Thing",
            "owl:Thingex:ancestorOfowl:Thing",
            "owl:Thingex:noteowl:Thing"
        ]
    );
    assert!(g.edges.iter().any(|e| e.id == "owl:Thing|ex:note|owl:Thingex:noteowl:Thing"));

    let age = edge(&g, "ex:Person|ex:age|ex:agexsd:integer");
    assert_eq!(age.target, "ex:agexsd:integer");
    let integer = node(&g, "ex:agexsd:integer");
    assert_eq!(integer.label, "integer");
    assert_eq!(integer.style.fill.as_str(), "#FFCC33");
    assert!(g.nodes.iter().all(|n| n.id != "xsd:integer"));

    // class-to-class properties keep their shared endpoints
    assert!(g.edges.iter().any(|e| e.id == "ex:Person|ex:worksFor|ex:Organization"));
    for edge in &g.edges {
        assert!(g.nodes.iter().any(|n| n.id == edge.source), "{}", edge.id);
        assert!(g.nodes.iter().any(|n| n.id == edge.target), "{}", edge.id);
    }
}

#[test]
fn vowl_splitting_is_deterministic() {
    let first = render("properties.ttl", Scope::Both, Notation::Vowl, &StyleFields::default());
    let second = render("properties.ttl", Scope::Both, Notation::Vowl, &StyleFields::default());
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// UML
// ---------------------------------------------------------------------------

#[test]
fn uml_folds_datatype_properties_into_attributes() {
    let g = render("properties.ttl", Scope::Class, Notation::Uml, &StyleFields::default());
    let person = node(&g, "ex:Person");
    assert_eq!(person.form, NodeForm::Entity);
    assert_eq!(person.attributes, vec!["ex:age: xsd:integer"]);
    assert_eq!(person.style.fill.as_str(), "#FFFF99");
    assert!(g.nodes.iter().all(|n| n.id != "xsd:integer"));
    assert!(g.edges.iter().all(|e| e.target != "xsd:integer"));
}

#[test]
fn uml_folds_literal_assertions_on_individuals() {
    let g = render("individuals.ttl", Scope::Individual, Notation::Uml, &StyleFields::default());
    let bob = node(&g, "ex:bob");
    assert_eq!(bob.attributes, vec!["ex:name = Bob"]);
    assert_eq!(node(&g, "ex:alice").attributes, vec!["ex:name = Alice Smith"]);
    let literals: Vec<&str> = g
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Literal)
        .map(|n| n.id.as_str())
        .collect();
    // annotation values stay as nodes
    assert_eq!(literals, vec!["literal_1"]);
    let type_of = edge(&g, "ex:bob|type|ex:Person");
    assert_eq!(type_of.style.line, LineType::Dashed);
}

#[test]
fn uml_uses_requested_colors_and_unlabelled_subclass_edges() {
    let style = StyleFields {
        uml_node_color: Some("#ABCDEF".into()),
        uml_data_node_color: Some("#123456".into()),
        ..StyleFields::default()
    };
    let g = render("test_classes.ttl", Scope::Class, Notation::Uml, &style);
    assert_eq!(node(&g, "ninepts:Person").style.fill.as_str(), "#ABCDEF");
    let sub = edge(&g, "ninepts:Person|subClassOf|ninepts:Agent");
    assert!(sub.label.is_empty());
    assert_eq!(sub.style.target, ArrowShape::TriangleEmpty);
}

#[test]
fn uml_colors_are_read_without_surrounding_whitespace() {
    let style = StyleFields {
        uml_node_color: Some(" #abcdef ".into()),
        uml_data_node_color: Some("#123456 ".into()),
        ..StyleFields::default()
    };
    let g = render("individuals.ttl", Scope::Individual, Notation::Uml, &style);
    assert_eq!(node(&g, "ex:alice").style.fill.as_str(), "#ABCDEF");
    assert_eq!(node(&g, "literal_1").style.fill.as_str(), "#123456");
}

// ---------------------------------------------------------------------------
// Custom
// ---------------------------------------------------------------------------

fn custom_class_style() -> StyleFields {
    StyleFields {
        class_node_shape: Some("hexagon".into()),
        class_fill_color: Some("#112233".into()),
        class_text_color: Some("#FFFFFF".into()),
        class_border_color: Some("#445566".into()),
        class_border_type: Some("dashedDotted".into()),
        subclass_of_source_shape: Some("diamondSolid".into()),
        subclass_of_target_shape: Some("backslash".into()),
        subclass_of_line_color: Some("#778899".into()),
        subclass_of_line_type: Some("dotted".into()),
        subclass_of_text: Some("is a".into()),
        ..StyleFields::default()
    }
}

#[test]
fn custom_styles_come_from_request_fields() {
    let g = render("test_classes.ttl", Scope::Class, Notation::Custom, &custom_class_style());
    assert_eq!(g.nodes.len(), 7);
    assert_eq!(g.edges.len(), 5);
    for class in g.nodes.iter().filter(|n| n.kind == NodeKind::Class) {
        assert_eq!(class.style.shape, NodeShape::Hexagon);
        assert_eq!(class.style.fill.as_str(), "#112233");
        assert_eq!(class.style.text.as_str(), "#FFFFFF");
        assert_eq!(class.style.border_type, LineType::DashedDotted);
    }
    for sub in &g.edges {
        assert_eq!(sub.label, "is a");
        assert_eq!(sub.style.source, ArrowShape::DiamondSolid);
        assert_eq!(sub.style.target, ArrowShape::Backslash);
        assert_eq!(sub.style.color.as_str(), "#778899");
        assert_eq!(sub.style.line, LineType::Dotted);
    }
}

#[test]
fn custom_fields_are_read_without_surrounding_whitespace() {
    let style = StyleFields {
        class_node_shape: Some(" hexagon ".into()),
        class_fill_color: Some(" #336699 ".into()),
        class_border_type: Some("dashed\t".into()),
        subclass_of_target_shape: Some(" diamondSolid".into()),
        subclass_of_line_type: Some("dotted ".into()),
        subclass_of_text: Some("  is a ".into()),
        ..StyleFields::default()
    };
    let g = render("test_classes.ttl", Scope::Class, Notation::Custom, &style);
    let person = node(&g, "ninepts:Person");
    assert_eq!(person.style.shape, NodeShape::Hexagon);
    assert_eq!(person.style.fill.as_str(), "#336699");
    assert_eq!(person.style.border_type, LineType::Dashed);
    let sub = edge(&g, "ninepts:Person|subClassOf|ninepts:Agent");
    assert_eq!(sub.style.target, ArrowShape::DiamondSolid);
    assert_eq!(sub.style.line, LineType::Dotted);
    assert_eq!(sub.label, "is a");
}

#[test]
fn custom_falls_back_to_default_styles() {
    let g = render("individuals.ttl", Scope::Individual, Notation::Custom, &StyleFields::default());
    let alice = node(&g, "ex:alice");
    assert_eq!(alice.style.shape, NodeShape::SmallCircle);
    assert_eq!(edge(&g, "ex:alice|type|ex:Person").label, "rdf:type");
}
