//! The graph request: everything one generation call needs.
//!
//! Requests arrive as camelCase JSON documents. Enumerated options stay raw
//! strings here so the validator can report every bad value together; the
//! typed [`Scope`] and [`Notation`] are derived only after validation passes.

use serde::{Deserialize, Serialize};

/// Ontology bytes plus the name and media type they were declared with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OntologyPayload {
    pub file_name: String,
    pub media_type: Option<String>,
    pub data: Vec<u8>,
}

impl OntologyPayload {
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: None,
            data: data.into(),
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// True when there is no file name or no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.file_name.trim().is_empty() || self.data.iter().all(u8::is_ascii_whitespace)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRequest {
    #[serde(default)]
    pub graph_title: String,
    /// Declared ontology file name; the bytes themselves are attached by the caller.
    #[serde(default)]
    pub input_file: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub graph_type: String,
    #[serde(default)]
    pub visualization: String,
    #[serde(default = "default_collapse")]
    pub collapse_edges: String,
    #[serde(default = "default_reasoning")]
    pub reasoning: String,
    #[serde(flatten)]
    pub style: StyleFields,
    #[serde(skip)]
    pub ontology: OntologyPayload,
}

fn default_collapse() -> String {
    COLLAPSE_FALSE.to_string()
}

fn default_reasoning() -> String {
    REASONING_FALSE.to_string()
}

pub const COLLAPSE_TRUE: &str = "collapseTrue";
pub const COLLAPSE_FALSE: &str = "collapseFalse";
pub const REASONING_TRUE: &str = "reasoningTrue";
pub const REASONING_FALSE: &str = "reasoningFalse";

impl GraphRequest {
    /// A request with default options and no style fields.
    pub fn new(title: &str, graph_type: &str, visualization: &str) -> Self {
        Self {
            graph_title: title.to_string(),
            input_file: String::new(),
            media_type: None,
            graph_type: graph_type.to_string(),
            visualization: visualization.to_string(),
            collapse_edges: default_collapse(),
            reasoning: default_reasoning(),
            style: StyleFields::default(),
            ontology: OntologyPayload::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Attach ontology bytes, recording the declared name and media type on the request too.
    pub fn with_ontology(mut self, payload: OntologyPayload) -> Self {
        self.input_file = payload.file_name.clone();
        if payload.media_type.is_some() {
            self.media_type = payload.media_type.clone();
        }
        self.ontology = payload;
        self
    }

    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse_edges = if collapse { COLLAPSE_TRUE } else { COLLAPSE_FALSE }.to_string();
        self
    }

    pub fn with_reasoning(mut self, reasoning: bool) -> Self {
        self.reasoning = if reasoning { REASONING_TRUE } else { REASONING_FALSE }.to_string();
        self
    }

    pub fn scope(&self) -> Option<Scope> {
        Scope::from_token(&self.graph_type)
    }

    pub fn notation(&self) -> Option<Notation> {
        Notation::from_token(&self.visualization)
    }

    pub fn collapse_requested(&self) -> bool {
        self.collapse_edges == COLLAPSE_TRUE
    }

    pub fn reasoning_requested(&self) -> bool {
        self.reasoning == REASONING_TRUE
    }
}

/// Which aspect of the ontology the builder extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Class,
    Property,
    Individual,
    Both,
    Rdf,
}

impl Scope {
    pub const ALL: [Scope; 5] = [
        Scope::Class,
        Scope::Property,
        Scope::Individual,
        Scope::Both,
        Scope::Rdf,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self {
            Scope::Class => "class",
            Scope::Property => "property",
            Scope::Individual => "individual",
            Scope::Both => "both",
            Scope::Rdf => "rdf",
        }
    }

    pub fn includes_classes(self) -> bool {
        matches!(self, Scope::Class | Scope::Both | Scope::Rdf)
    }

    pub fn includes_properties(self) -> bool {
        matches!(self, Scope::Property | Scope::Both | Scope::Rdf)
    }

    pub fn includes_individuals(self) -> bool {
        matches!(self, Scope::Individual | Scope::Rdf)
    }
}

/// Diagram notation. `Graffoo` and `Vowl` are the fixed-style notations,
/// `Vowl` being the W3C-style visual notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    Graffoo,
    Vowl,
    Uml,
    Custom,
}

impl Notation {
    pub const ALL: [Notation; 4] = [
        Notation::Graffoo,
        Notation::Vowl,
        Notation::Uml,
        Notation::Custom,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self {
            Notation::Graffoo => "graffoo",
            Notation::Vowl => "vowl",
            Notation::Uml => "uml",
            Notation::Custom => "custom",
        }
    }

    /// The scope actually built for this notation. UML class diagrams always
    /// carry attributes and associations, so every non-individual scope is
    /// built as `Both`.
    pub fn effective_scope(self, scope: Scope) -> Scope {
        match (self, scope) {
            (Notation::Uml, Scope::Individual) => Scope::Individual,
            (Notation::Uml, _) => Scope::Both,
            (_, scope) => scope,
        }
    }
}

/// Caller-supplied style surface for the uml and custom notations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFields {
    pub class_node_shape: Option<String>,
    pub class_fill_color: Option<String>,
    pub class_text_color: Option<String>,
    pub class_border_color: Option<String>,
    pub class_border_type: Option<String>,

    pub individual_node_shape: Option<String>,
    pub individual_fill_color: Option<String>,
    pub individual_text_color: Option<String>,
    pub individual_border_color: Option<String>,
    pub individual_border_type: Option<String>,

    pub data_node_shape: Option<String>,
    pub data_fill_color: Option<String>,
    pub data_text_color: Option<String>,
    pub data_border_color: Option<String>,
    pub data_border_type: Option<String>,

    pub obj_node_shape: Option<String>,
    pub obj_fill_color: Option<String>,
    pub obj_text_color: Option<String>,
    pub obj_border_color: Option<String>,
    pub obj_border_type: Option<String>,

    pub subclass_of_source_shape: Option<String>,
    pub subclass_of_target_shape: Option<String>,
    pub subclass_of_line_color: Option<String>,
    pub subclass_of_line_type: Option<String>,
    pub subclass_of_text: Option<String>,

    pub type_of_source_shape: Option<String>,
    pub type_of_target_shape: Option<String>,
    pub type_of_line_color: Option<String>,
    pub type_of_line_type: Option<String>,
    pub type_of_text: Option<String>,

    pub data_prop_source_shape: Option<String>,
    pub data_prop_target_shape: Option<String>,
    pub data_prop_edge_color: Option<String>,
    pub data_prop_edge_type: Option<String>,

    pub obj_prop_source_shape: Option<String>,
    pub obj_prop_target_shape: Option<String>,
    pub obj_prop_edge_color: Option<String>,
    pub obj_prop_edge_type: Option<String>,

    pub ann_prop_source_shape: Option<String>,
    pub ann_prop_target_shape: Option<String>,
    pub ann_prop_edge_color: Option<String>,
    pub ann_prop_edge_type: Option<String>,

    pub rdf_prop_source_shape: Option<String>,
    pub rdf_prop_target_shape: Option<String>,
    pub rdf_prop_edge_color: Option<String>,
    pub rdf_prop_edge_type: Option<String>,

    pub uml_node_color: Option<String>,
    pub uml_data_node_color: Option<String>,
}

/// Style values are read with surrounding whitespace removed.
fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim)
}

/// A node-style field group (`class`, `individual`, `data`, `obj`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeGroup {
    Class,
    Individual,
    Data,
    Object,
}

/// An edge-style field group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeGroup {
    SubclassOf,
    TypeOf,
    DataProperty,
    ObjectProperty,
    AnnotationProperty,
    Rdf,
}

/// Borrowed view of one node group's fields, with their JSON names.
#[derive(Debug, Clone, Copy)]
pub struct NodeFields<'a> {
    pub shape: (&'static str, Option<&'a str>),
    pub fill: (&'static str, Option<&'a str>),
    pub text: (&'static str, Option<&'a str>),
    pub border_color: (&'static str, Option<&'a str>),
    pub border_type: (&'static str, Option<&'a str>),
}

/// Borrowed view of one edge group's fields, with their JSON names.
#[derive(Debug, Clone, Copy)]
pub struct EdgeFields<'a> {
    pub source: (&'static str, Option<&'a str>),
    pub target: (&'static str, Option<&'a str>),
    pub color: (&'static str, Option<&'a str>),
    pub line: (&'static str, Option<&'a str>),
    pub text: Option<&'a str>,
}

impl StyleFields {
    pub fn uml_node_color(&self) -> Option<&str> {
        trimmed(&self.uml_node_color)
    }

    pub fn uml_data_node_color(&self) -> Option<&str> {
        trimmed(&self.uml_data_node_color)
    }

    pub fn node_group(&self, group: NodeGroup) -> NodeFields<'_> {
        match group {
            NodeGroup::Class => NodeFields {
                shape: ("classNodeShape", trimmed(&self.class_node_shape)),
                fill: ("classFillColor", trimmed(&self.class_fill_color)),
                text: ("classTextColor", trimmed(&self.class_text_color)),
                border_color: ("classBorderColor", trimmed(&self.class_border_color)),
                border_type: ("classBorderType", trimmed(&self.class_border_type)),
            },
            NodeGroup::Individual => NodeFields {
                shape: ("individualNodeShape", trimmed(&self.individual_node_shape)),
                fill: ("individualFillColor", trimmed(&self.individual_fill_color)),
                text: ("individualTextColor", trimmed(&self.individual_text_color)),
                border_color: (
                    "individualBorderColor",
                    trimmed(&self.individual_border_color),
                ),
                border_type: (
                    "individualBorderType",
                    trimmed(&self.individual_border_type),
                ),
            },
            NodeGroup::Data => NodeFields {
                shape: ("dataNodeShape", trimmed(&self.data_node_shape)),
                fill: ("dataFillColor", trimmed(&self.data_fill_color)),
                text: ("dataTextColor", trimmed(&self.data_text_color)),
                border_color: ("dataBorderColor", trimmed(&self.data_border_color)),
                border_type: ("dataBorderType", trimmed(&self.data_border_type)),
            },
            NodeGroup::Object => NodeFields {
                shape: ("objNodeShape", trimmed(&self.obj_node_shape)),
                fill: ("objFillColor", trimmed(&self.obj_fill_color)),
                text: ("objTextColor", trimmed(&self.obj_text_color)),
                border_color: ("objBorderColor", trimmed(&self.obj_border_color)),
                border_type: ("objBorderType", trimmed(&self.obj_border_type)),
            },
        }
    }

    pub fn edge_group(&self, group: EdgeGroup) -> EdgeFields<'_> {
        match group {
            EdgeGroup::SubclassOf => EdgeFields {
                source: ("subclassOfSourceShape", trimmed(&self.subclass_of_source_shape)),
                target: ("subclassOfTargetShape", trimmed(&self.subclass_of_target_shape)),
                color: ("subclassOfLineColor", trimmed(&self.subclass_of_line_color)),
                line: ("subclassOfLineType", trimmed(&self.subclass_of_line_type)),
                text: trimmed(&self.subclass_of_text),
            },
            EdgeGroup::TypeOf => EdgeFields {
                source: ("typeOfSourceShape", trimmed(&self.type_of_source_shape)),
                target: ("typeOfTargetShape", trimmed(&self.type_of_target_shape)),
                color: ("typeOfLineColor", trimmed(&self.type_of_line_color)),
                line: ("typeOfLineType", trimmed(&self.type_of_line_type)),
                text: trimmed(&self.type_of_text),
            },
            EdgeGroup::DataProperty => EdgeFields {
                source: ("dataPropSourceShape", trimmed(&self.data_prop_source_shape)),
                target: ("dataPropTargetShape", trimmed(&self.data_prop_target_shape)),
                color: ("dataPropEdgeColor", trimmed(&self.data_prop_edge_color)),
                line: ("dataPropEdgeType", trimmed(&self.data_prop_edge_type)),
                text: None,
            },
            EdgeGroup::ObjectProperty => EdgeFields {
                source: ("objPropSourceShape", trimmed(&self.obj_prop_source_shape)),
                target: ("objPropTargetShape", trimmed(&self.obj_prop_target_shape)),
                color: ("objPropEdgeColor", trimmed(&self.obj_prop_edge_color)),
                line: ("objPropEdgeType", trimmed(&self.obj_prop_edge_type)),
                text: None,
            },
            EdgeGroup::AnnotationProperty => EdgeFields {
                source: ("annPropSourceShape", trimmed(&self.ann_prop_source_shape)),
                target: ("annPropTargetShape", trimmed(&self.ann_prop_target_shape)),
                color: ("annPropEdgeColor", trimmed(&self.ann_prop_edge_color)),
                line: ("annPropEdgeType", trimmed(&self.ann_prop_edge_type)),
                text: None,
            },
            EdgeGroup::Rdf => EdgeFields {
                source: ("rdfPropSourceShape", trimmed(&self.rdf_prop_source_shape)),
                target: ("rdfPropTargetShape", trimmed(&self.rdf_prop_target_shape)),
                color: ("rdfPropEdgeColor", trimmed(&self.rdf_prop_edge_color)),
                line: ("rdfPropEdgeType", trimmed(&self.rdf_prop_edge_type)),
                text: None,
            },
        }
    }

    /// Node and edge groups read by the custom notation for a scope.
    pub fn custom_groups(scope: Scope) -> (Vec<NodeGroup>, Vec<EdgeGroup>) {
        use EdgeGroup as E;
        use NodeGroup as N;
        match scope {
            Scope::Class => (vec![N::Class, N::Data], vec![E::SubclassOf]),
            Scope::Individual => (
                vec![N::Class, N::Individual, N::Data],
                vec![E::TypeOf, E::DataProperty, E::ObjectProperty],
            ),
            Scope::Property => (
                vec![N::Data, N::Object],
                vec![E::DataProperty, E::ObjectProperty, E::AnnotationProperty],
            ),
            Scope::Both => (
                vec![N::Data, N::Object],
                vec![
                    E::DataProperty,
                    E::ObjectProperty,
                    E::AnnotationProperty,
                    E::SubclassOf,
                ],
            ),
            Scope::Rdf => (
                vec![N::Class, N::Individual, N::Data, N::Object],
                vec![
                    E::SubclassOf,
                    E::TypeOf,
                    E::DataProperty,
                    E::ObjectProperty,
                    E::AnnotationProperty,
                    E::Rdf,
                ],
            ),
        }
    }
}
