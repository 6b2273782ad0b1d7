//! Request validation.
//!
//! Every rule runs unconditionally and records into one [`ValidationError`],
//! so a caller sees all problems with a request in a single round trip.

use tracing::debug;

use crate::error::ValidationError;
use crate::model::request::{
    EdgeFields, GraphRequest, Notation, NodeFields, Scope, StyleFields, COLLAPSE_FALSE,
    COLLAPSE_TRUE, REASONING_FALSE, REASONING_TRUE,
};
use crate::model::style::{is_hex_color, ArrowShape, LineType, NodeShape};

const NOT_EXPECTED: &str = "is not one of the expected values";

#[derive(Debug, Clone, Copy)]
enum FieldRule {
    Shape,
    Line,
    Arrow,
    Color,
}

/// Check a request before any parsing happens.
pub fn validate(request: &GraphRequest) -> Result<(), ValidationError> {
    let mut errors = ValidationError::new();

    if request.graph_title.trim().is_empty() {
        errors.add("graphTitle", "the graph title is missing or blank");
    }
    if request.ontology.is_blank() {
        errors.add("inputFile", "the ontology file name or content is missing or blank");
    }

    let scope = request.scope();
    if scope.is_none() {
        errors.add(
            "graphType",
            format!("{} {NOT_EXPECTED} (class, property, individual, both, rdf)", quoted(&request.graph_type)),
        );
    }
    let notation = request.notation();
    if notation.is_none() {
        errors.add(
            "visualization",
            format!("{} {NOT_EXPECTED} (graffoo, vowl, uml, custom)", quoted(&request.visualization)),
        );
    }
    if ![COLLAPSE_TRUE, COLLAPSE_FALSE].contains(&request.collapse_edges.as_str()) {
        errors.add(
            "collapseEdges",
            format!("{} {NOT_EXPECTED} ({COLLAPSE_TRUE}, {COLLAPSE_FALSE})", quoted(&request.collapse_edges)),
        );
    }
    if ![REASONING_TRUE, REASONING_FALSE].contains(&request.reasoning.as_str()) {
        errors.add(
            "reasoning",
            format!("{} {NOT_EXPECTED} ({REASONING_TRUE}, {REASONING_FALSE})", quoted(&request.reasoning)),
        );
    }

    if notation == Some(Notation::Vowl) {
        if request.collapse_requested() {
            errors.add(
                "collapseEdges",
                "collapsing edges is not valid for a vowl visualization, which splits classes and properties",
            );
        }
        if scope == Some(Scope::Individual) {
            errors.add(
                "graphType",
                "an individual graph is not valid for a vowl visualization",
            );
        }
    }

    match notation {
        Some(Notation::Uml) => check_uml_fields(&request.style, &mut errors),
        Some(Notation::Custom) => {
            if let Some(scope) = scope {
                check_custom_fields(&request.style, scope, &mut errors);
            }
        }
        _ => {}
    }

    debug!(problems = errors.len(), "validated graph request");
    errors.into_result()
}

fn check_uml_fields(style: &StyleFields, errors: &mut ValidationError) {
    check_field(
        "umlNodeColor",
        style.uml_node_color(),
        FieldRule::Color,
        errors,
    );
    check_field(
        "umlDataNodeColor",
        style.uml_data_node_color(),
        FieldRule::Color,
        errors,
    );
}

fn check_custom_fields(style: &StyleFields, scope: Scope, errors: &mut ValidationError) {
    let (node_groups, edge_groups) = StyleFields::custom_groups(scope);
    for group in node_groups {
        check_node_group(style.node_group(group), errors);
    }
    for group in edge_groups {
        check_edge_group(style.edge_group(group), errors);
    }
}

fn check_node_group(fields: NodeFields<'_>, errors: &mut ValidationError) {
    let checks = [
        (fields.shape, FieldRule::Shape),
        (fields.fill, FieldRule::Color),
        (fields.text, FieldRule::Color),
        (fields.border_color, FieldRule::Color),
        (fields.border_type, FieldRule::Line),
    ];
    for ((name, value), rule) in checks {
        check_field(name, value, rule, errors);
    }
}

fn check_edge_group(fields: EdgeFields<'_>, errors: &mut ValidationError) {
    let checks = [
        (fields.source, FieldRule::Arrow),
        (fields.target, FieldRule::Arrow),
        (fields.color, FieldRule::Color),
        (fields.line, FieldRule::Line),
    ];
    for ((name, value), rule) in checks {
        check_field(name, value, rule, errors);
    }
}

fn check_field(name: &str, value: Option<&str>, rule: FieldRule, errors: &mut ValidationError) {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => {
            errors.add(name, format!("the value defining {name} is missing or blank"));
            return;
        }
    };
    let valid = match rule {
        FieldRule::Shape => NodeShape::from_token(value).is_some(),
        FieldRule::Line => LineType::from_token(value).is_some(),
        FieldRule::Arrow => ArrowShape::from_token(value).is_some(),
        FieldRule::Color => is_hex_color(value),
    };
    if !valid {
        let reason = match rule {
            FieldRule::Color => format!("{} must be a #RRGGBB hex color", quoted(value)),
            _ => format!("{} {NOT_EXPECTED}", quoted(value)),
        };
        errors.add(name, reason);
    }
}

fn quoted(value: &str) -> String {
    format!("'{value}'")
}
