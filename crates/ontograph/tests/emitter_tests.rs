use ontograph::emitter::graphml::{serialize, title_label, GraphMlEmitter};
use ontograph::emitter::{escape_attr, escape_text};
use ontograph::model::graph::{NodeKind, PREFIXES_NODE_ID, TITLE_NODE_ID};
use ontograph::model::style::{ArrowShape, Color, LineType, NodeShape};
use ontograph::render::{EdgeStyle, NodeForm, NodeStyle, StyledEdge, StyledGraph, StyledNode};

fn color(hex: &str) -> Color {
    Color::parse(hex).unwrap()
}

fn shape_node(id: &str, kind: NodeKind, label: &str) -> StyledNode {
    StyledNode {
        id: id.to_string(),
        kind,
        iri: None,
        label: label.to_string(),
        attributes: Vec::new(),
        form: NodeForm::Shape,
        style: NodeStyle::new(NodeShape::RoundRectangle, color("#FFFF00")),
    }
}

fn plain_edge(source: &str, target: &str, label: &str) -> StyledEdge {
    StyledEdge {
        id: format!("{source}|subClassOf|{target}"),
        source: source.to_string(),
        target: target.to_string(),
        label: label.to_string(),
        style: EdgeStyle::new(ArrowShape::None, ArrowShape::TriangleSolid, color("#000000")),
    }
}

fn sample_graph() -> StyledGraph {
    let mut class = shape_node("ex:Lion", NodeKind::Class, "Lion & <Cub>");
    class.iri = Some("http://example.org/zoo#Lion".into());
    StyledGraph {
        nodes: vec![
            shape_node(TITLE_NODE_ID, NodeKind::Title, "Title"),
            shape_node(PREFIXES_NODE_ID, NodeKind::Prefixes, ""),
            class,
            shape_node("ex:Animal", NodeKind::Class, "ex:Animal"),
        ],
        edges: vec![plain_edge("ex:Lion", "ex:Animal", "rdfs:subClassOf")],
    }
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

#[test]
fn text_escaping() {
    assert_eq!(escape_text("a & b <c> \"d\""), "a &amp; b &lt;c&gt; \"d\"");
    assert_eq!(escape_attr("a & \"b\""), "a &amp; &quot;b&quot;");
}

// ---------------------------------------------------------------------------
// Document layout
// ---------------------------------------------------------------------------

#[test]
fn title_label_layout() {
    assert_eq!(
        title_label("Zoo", "None defined"),
        "Title:  Zoo\n\nOntology URI:  None defined"
    );
}

#[test]
fn document_has_header_nodes_edges_and_footer() {
    let lines = vec!["ex: http://example.org/zoo#".to_string()];
    let doc = serialize(&sample_graph(), "Zoo", "None defined", &lines).unwrap();

    assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>"));
    assert!(doc.contains("<graph edgedefault=\"directed\" id=\"G\">"));
    assert!(doc.ends_with("</graphml>\n"));
    assert!(doc.contains("<y:Resources/>"));

    let title = doc.find("<node id=\"title::n0\">").unwrap();
    let prefixes = doc.find("<node id=\"prefixes::n0\">").unwrap();
    let first_edge = doc.find("<edge ").unwrap();
    assert!(title < prefixes && prefixes < first_edge);

    assert!(doc.contains("Title:  Zoo\n\nOntology URI:  None defined</y:NodeLabel>"));
    assert!(doc.contains(">ex: http://example.org/zoo#</y:NodeLabel>"));
    assert_eq!(doc.matches("<node ").count(), 4);
    assert_eq!(doc.matches("<edge ").count(), 1);
}

#[test]
fn labels_and_iris_are_escaped() {
    let doc = serialize(&sample_graph(), "Cats & Dogs", "None defined", &[]).unwrap();
    assert!(doc.contains(">Lion &amp; &lt;Cub&gt;</y:NodeLabel>"));
    assert!(doc.contains("Title:  Cats &amp; Dogs"));
    assert!(doc.contains("<data key=\"d4\">http://example.org/zoo#Lion</data>"));
    assert!(!doc.contains("Lion & <Cub>"));
}

#[test]
fn edge_ids_with_quotes_are_attribute_escaped() {
    let mut graph = sample_graph();
    graph.edges[0].id = "ex:Lion|\"odd\"|ex:Animal".into();
    let doc = serialize(&graph, "Zoo", "None defined", &[]).unwrap();
    assert!(doc.contains("id=\"ex:Lion|&quot;odd&quot;|ex:Animal\""));
}

#[test]
fn no_attribute_is_null_or_empty() {
    let doc = serialize(&sample_graph(), "Zoo", "http://example.org/zoo", &[]).unwrap();
    assert!(!doc.contains("=\"\""));
    assert!(!doc.contains("=\"null\""));
}

#[test]
fn null_node_id_is_rejected() {
    let mut graph = sample_graph();
    graph.nodes[3].id = "null".into();
    assert!(serialize(&graph, "Zoo", "None defined", &[]).is_err());
}

#[test]
fn empty_edge_label_is_hidden() {
    let mut graph = sample_graph();
    graph.edges[0].label.clear();
    let doc = serialize(&graph, "Zoo", "None defined", &[]).unwrap();
    assert!(doc.contains("visible=\"false\"/>"));
    assert!(!doc.contains("</y:EdgeLabel>"));
}

// ---------------------------------------------------------------------------
// Element styles
// ---------------------------------------------------------------------------

#[test]
fn shape_node_writes_yed_style_names() {
    let mut node = shape_node("ex:Data", NodeKind::Datatype, "xsd:string");
    node.style = NodeStyle::new(NodeShape::ParallelogramRight, color("#ccffcc"))
        .with_border_type(LineType::DashedDotted);
    let mut emitter = GraphMlEmitter::new(Vec::new());
    emitter.write_node(&node, &node.label).unwrap();
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(out.contains("<y:ShapeNode>"));
    assert!(out.contains("<y:Shape type=\"parallelogram\"/>"));
    assert!(out.contains("<y:Fill color=\"#CCFFCC\" transparent=\"false\"/>"));
    assert!(out.contains("type=\"dashed_dotted\""));
}

#[test]
fn entity_node_lists_attribute_rows() {
    let mut node = shape_node("ex:Person", NodeKind::Class, "ex:Person");
    node.form = NodeForm::Entity;
    node.attributes = vec!["ex:age: xsd:integer".into(), "ex:name: xsd:string".into()];
    let mut emitter = GraphMlEmitter::new(Vec::new());
    emitter.write_node(&node, &node.label).unwrap();
    assert_eq!(emitter.node_count(), 1);
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(out.contains("com.yworks.entityRelationship.big_entity"));
    assert!(out.contains(">ex:age: xsd:integer\nex:name: xsd:string</y:NodeLabel>"));
}

#[test]
fn edge_writes_arrows_and_line_style() {
    let mut edge = plain_edge("ex:A", "ex:B", "ex:p");
    edge.style = EdgeStyle::new(ArrowShape::CircleSolid, ArrowShape::TriangleEmpty, color("#000080"))
        .with_line(LineType::Dotted)
        .with_width(2.0);
    let mut emitter = GraphMlEmitter::new(Vec::new());
    emitter.write_edge(&edge).unwrap();
    assert_eq!(emitter.edge_count(), 1);
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(out.contains("<y:Arrows source=\"circle\" target=\"white_delta\"/>"));
    assert!(out.contains("<y:LineStyle color=\"#000080\" type=\"dotted\" width=\"2.0\"/>"));
    assert!(out.contains("visible=\"true\">ex:p</y:EdgeLabel>"));
}
