use std::io::Write;

use super::{escape_attr, escape_text};
use crate::error::InternalBuildError;
use crate::model::graph::NodeKind;
use crate::model::style::NodeShape;
use crate::render::{NodeForm, StyledEdge, StyledGraph, StyledNode};

const CHAR_WIDTH: usize = 11;
const LINE_HEIGHT: usize = 23;
const HEIGHT_PADDING: usize = 20;
const MIN_WIDTH: usize = 30;
const SMALL_CIRCLE_SIZE: usize = 20;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:java="http://www.yworks.com/xml/yfiles-common/1.0/java" xmlns:sys="http://www.yworks.com/xml/yfiles-common/markup/primitives/2.0" xmlns:x="http://www.yworks.com/xml/yfiles-common/markup/2.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:y="http://www.yworks.com/xml/graphml" xmlns:yed="http://www.yworks.com/xml/yed/3" xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://www.yworks.com/xml/schema/graphml/1.1/ygraphml.xsd">
  <key attr.name="Description" attr.type="string" for="graph" id="d0"/>
  <key for="port" id="d1" yfiles.type="portgraphics"/>
  <key for="port" id="d2" yfiles.type="portgeometry"/>
  <key for="port" id="d3" yfiles.type="portuserdata"/>
  <key attr.name="url" attr.type="string" for="node" id="d4"/>
  <key attr.name="description" attr.type="string" for="node" id="d5"/>
  <key for="node" id="d6" yfiles.type="nodegraphics"/>
  <key for="graphml" id="d7" yfiles.type="resources"/>
  <key attr.name="url" attr.type="string" for="edge" id="d8"/>
  <key attr.name="description" attr.type="string" for="edge" id="d9"/>
  <key for="edge" id="d10" yfiles.type="edgegraphics"/>
  <graph edgedefault="directed" id="G">
"#;

const FOOTER: &str = r#"  </graph>
  <data key="d7">
    <y:Resources/>
  </data>
</graphml>
"#;

/// Label of the title node.
pub fn title_label(title: &str, ontology_uri: &str) -> String {
    format!("Title:  {title}\n\nOntology URI:  {ontology_uri}")
}

/// Guarded attribute value: escaped, and never empty or "null".
fn attr(element: &str, attribute: &str, value: &str) -> Result<String, InternalBuildError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(InternalBuildError::EmptyAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        });
    }
    Ok(escape_attr(value))
}

fn geometry(lines: &[&str], shape: NodeShape) -> (usize, usize) {
    if shape == NodeShape::SmallCircle {
        return (SMALL_CIRCLE_SIZE, SMALL_CIRCLE_SIZE);
    }
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = (longest * CHAR_WIDTH).max(MIN_WIDTH);
    let height = lines.len().max(1) * LINE_HEIGHT + HEIGHT_PADDING;
    (width, height)
}

/// yEd GraphML writer. Elements are written one opening tag per line, in the
/// order they are handed over.
pub struct GraphMlEmitter<W: Write> {
    writer: W,
    nodes: u64,
    edges: u64,
}

impl<W: Write> GraphMlEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            nodes: 0,
            edges: 0,
        }
    }

    pub fn write_header(&mut self) -> Result<(), InternalBuildError> {
        self.writer.write_all(HEADER.as_bytes())?;
        Ok(())
    }

    pub fn write_footer(&mut self) -> Result<(), InternalBuildError> {
        self.writer.write_all(FOOTER.as_bytes())?;
        Ok(())
    }

    /// Write one node; `label` replaces the node's own label (header nodes).
    pub fn write_node(&mut self, node: &StyledNode, label: &str) -> Result<(), InternalBuildError> {
        let w = &mut self.writer;
        writeln!(w, "    <node id=\"{}\">", attr("node", "id", &node.id)?)?;
        if let Some(iri) = &node.iri {
            writeln!(w, "      <data key=\"d4\">{}</data>", escape_text(iri))?;
        }
        writeln!(w, "      <data key=\"d6\">")?;

        let style = &node.style;
        let mut lines: Vec<&str> = label.lines().collect();
        lines.extend(node.attributes.iter().flat_map(|row| row.lines()));
        let (width, height) = geometry(&lines, style.shape);
        let element = match node.form {
            NodeForm::Shape => "y:ShapeNode",
            NodeForm::Entity => "y:GenericNode",
        };
        match node.form {
            NodeForm::Shape => writeln!(w, "        <y:ShapeNode>")?,
            NodeForm::Entity => writeln!(
                w,
                "        <y:GenericNode configuration=\"com.yworks.entityRelationship.big_entity\">"
            )?,
        }
        writeln!(
            w,
            "          <y:Geometry height=\"{height}.0\" width=\"{width}.0\" x=\"0.0\" y=\"0.0\"/>"
        )?;
        writeln!(
            w,
            "          <y:Fill color=\"{}\" transparent=\"false\"/>",
            attr(element, "fill", style.fill.as_str())?
        )?;
        writeln!(
            w,
            "          <y:BorderStyle color=\"{}\" type=\"{}\" width=\"1.0\"/>",
            attr(element, "borderColor", style.border_color.as_str())?,
            attr(element, "borderType", style.border_type.yed_name())?
        )?;
        let text_color = attr(element, "textColor", style.text.as_str())?;
        match node.form {
            NodeForm::Shape => {
                writeln!(
                    w,
                    "          <y:NodeLabel alignment=\"center\" autoSizePolicy=\"content\" fontFamily=\"Dialog\" fontSize=\"12\" fontStyle=\"plain\" hasBackgroundColor=\"false\" hasLineColor=\"false\" modelName=\"internal\" modelPosition=\"c\" textColor=\"{text_color}\" visible=\"true\">{}</y:NodeLabel>",
                    escape_text(label)
                )?;
                writeln!(
                    w,
                    "          <y:Shape type=\"{}\"/>",
                    attr(element, "shape", style.shape.yed_name())?
                )?;
                writeln!(w, "        </y:ShapeNode>")?;
            }
            NodeForm::Entity => {
                writeln!(
                    w,
                    "          <y:NodeLabel alignment=\"center\" autoSizePolicy=\"content\" backgroundColor=\"{}\" configuration=\"com.yworks.entityRelationship.label.name\" fontFamily=\"Dialog\" fontSize=\"12\" fontStyle=\"plain\" hasLineColor=\"false\" modelName=\"internal\" modelPosition=\"t\" textColor=\"{text_color}\" visible=\"true\">{}</y:NodeLabel>",
                    attr(element, "fill", style.fill.as_str())?,
                    escape_text(label)
                )?;
                writeln!(
                    w,
                    "          <y:NodeLabel alignment=\"left\" autoSizePolicy=\"content\" configuration=\"com.yworks.entityRelationship.label.attributes\" fontFamily=\"Dialog\" fontSize=\"12\" fontStyle=\"plain\" hasBackgroundColor=\"false\" hasLineColor=\"false\" modelName=\"custom\" textColor=\"{text_color}\" visible=\"true\">{}</y:NodeLabel>",
                    escape_text(&node.attributes.join("\n"))
                )?;
                writeln!(w, "          <y:StyleProperties>")?;
                writeln!(
                    w,
                    "            <y:Property class=\"java.lang.Boolean\" name=\"y.view.ShadowNodePainter.SHADOW_PAINTING\" value=\"true\"/>"
                )?;
                writeln!(w, "          </y:StyleProperties>")?;
                writeln!(w, "        </y:GenericNode>")?;
            }
        }
        writeln!(w, "      </data>")?;
        writeln!(w, "    </node>")?;
        self.nodes += 1;
        Ok(())
    }

    pub fn write_edge(&mut self, edge: &StyledEdge) -> Result<(), InternalBuildError> {
        let w = &mut self.writer;
        let style = &edge.style;
        writeln!(
            w,
            "    <edge id=\"{}\" source=\"{}\" target=\"{}\">",
            attr("edge", "id", &edge.id)?,
            attr("edge", "source", &edge.source)?,
            attr("edge", "target", &edge.target)?
        )?;
        writeln!(w, "      <data key=\"d10\">")?;
        writeln!(w, "        <y:PolyLineEdge>")?;
        writeln!(
            w,
            "          <y:Path sx=\"0.0\" sy=\"0.0\" tx=\"0.0\" ty=\"0.0\"/>"
        )?;
        writeln!(
            w,
            "          <y:LineStyle color=\"{}\" type=\"{}\" width=\"{:.1}\"/>",
            attr("y:LineStyle", "color", style.color.as_str())?,
            attr("y:LineStyle", "type", style.line.yed_name())?,
            style.width
        )?;
        writeln!(
            w,
            "          <y:Arrows source=\"{}\" target=\"{}\"/>",
            attr("y:Arrows", "source", style.source.yed_name())?,
            attr("y:Arrows", "target", style.target.yed_name())?
        )?;
        let label_attrs = "alignment=\"center\" configuration=\"AutoFlippingLabel\" distance=\"2.0\" fontFamily=\"Dialog\" fontSize=\"12\" fontStyle=\"plain\" hasBackgroundColor=\"false\" hasLineColor=\"false\" modelName=\"custom\" preferredPlacement=\"anywhere\" ratio=\"0.5\" textColor=\"#000000\"";
        if edge.label.is_empty() {
            writeln!(w, "          <y:EdgeLabel {label_attrs} visible=\"false\"/>")?;
        } else {
            writeln!(
                w,
                "          <y:EdgeLabel {label_attrs} visible=\"true\">{}</y:EdgeLabel>",
                escape_text(&edge.label)
            )?;
        }
        writeln!(w, "          <y:BendStyle smoothed=\"false\"/>")?;
        writeln!(w, "        </y:PolyLineEdge>")?;
        writeln!(w, "      </data>")?;
        writeln!(w, "    </edge>")?;
        self.edges += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), InternalBuildError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn node_count(&self) -> u64 {
        self.nodes
    }

    pub fn edge_count(&self) -> u64 {
        self.edges
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Serialize a styled graph. The title and prefixes nodes take their labels
/// from the arguments; every other node keeps its styled label.
pub fn serialize(
    graph: &StyledGraph,
    title: &str,
    ontology_uri: &str,
    prefixes: &[String],
) -> Result<String, InternalBuildError> {
    let mut emitter = GraphMlEmitter::new(Vec::new());
    emitter.write_header()?;
    let title_text = title_label(title, ontology_uri);
    let prefix_text = prefixes.join("\n");
    for node in &graph.nodes {
        let label = match node.kind {
            NodeKind::Title => title_text.as_str(),
            NodeKind::Prefixes => prefix_text.as_str(),
            _ => node.label.as_str(),
        };
        emitter.write_node(node, label)?;
    }
    for edge in &graph.edges {
        emitter.write_edge(edge)?;
    }
    emitter.write_footer()?;
    emitter.flush()?;
    Ok(String::from_utf8(emitter.into_inner())?)
}
