//! Edge collapsing: parallel property edges between one pair of nodes are
//! merged into a single edge carrying every property name.

use std::collections::HashMap;

use tracing::debug;

use crate::model::graph::{CanonicalEdge, CanonicalGraph, PropertyCategory, Relation};

type GroupKey = (String, String, PropertyCategory);

/// Merge property and assertion edges sharing (source, target, category).
///
/// Only object, datatype and annotation edges take part; structural edges and
/// single edges are returned unchanged. The merged edge takes the position of
/// the first edge of its group and its label lists the sorted, distinct
/// labels of the members.
pub fn collapse(graph: CanonicalGraph) -> CanonicalGraph {
    let (nodes, edges) = graph.into_parts();

    let mut groups: HashMap<GroupKey, Vec<usize>> = HashMap::new();
    for (pos, edge) in edges.iter().enumerate() {
        if let Some(key) = group_key(edge) {
            groups.entry(key).or_default().push(pos);
        }
    }

    let mut merged_groups = 0;
    let mut result = Vec::with_capacity(edges.len());
    for (pos, edge) in edges.iter().enumerate() {
        let members = match group_key(edge).and_then(|key| groups.get(&key)) {
            Some(members) if members.len() > 1 => members,
            _ => {
                result.push(edge.clone());
                continue;
            }
        };
        if members[0] != pos {
            continue;
        }
        let category = edge
            .relation
            .property_category()
            .unwrap_or(PropertyCategory::Object);
        let mut labels: Vec<String> = members
            .iter()
            .map(|&m| edges[m].display_label())
            .collect();
        labels.sort();
        labels.dedup();
        let mut collapsed = CanonicalEdge::new(&edge.source, Relation::Collapsed(category), &edge.target);
        collapsed.label_parts = labels;
        result.push(collapsed);
        merged_groups += 1;
    }

    debug!(
        before = edges.len(),
        after = result.len(),
        merged_groups,
        "collapsed parallel edges"
    );
    CanonicalGraph::from_parts(nodes, result)
}

fn group_key(edge: &CanonicalEdge) -> Option<GroupKey> {
    match &edge.relation {
        Relation::Property { category, .. } | Relation::Assertion { category, .. }
            if category.is_collapsible() =>
        {
            Some((edge.source.clone(), edge.target.clone(), *category))
        }
        _ => None,
    }
}
