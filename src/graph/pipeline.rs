// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{Edge, Node, NodeKind};
use crate::errors::ConfigLoadError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Location reported when the graph declares no sink target.
pub const UNKNOWN_OUTPUT_LOCATION: &str = "unknown";

/// A complete pipeline graph as supplied by the caller for one run.
///
/// # Example
/// ```json
/// {
///   "id": "p1",
///   "name": "High earners",
///   "nodes": [
///     {"id": "a", "type": "csvSource", "data": {"filePath": "people.csv"}},
///     {"id": "b", "type": "filter", "data": {"column": "salary", "operator": ">", "value": "70000"}}
///   ],
///   "edges": [{"id": "e1", "source": "a", "target": "b"}],
///   "executionOrder": ["a", "b"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_order: Option<Vec<String>>,
}

impl Pipeline {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigLoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges pointing at `node_id`, in declaration order.
    pub fn incoming_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// An explicit order counts only when it names at least one node.
    pub fn explicit_order(&self) -> Option<&[String]> {
        self.execution_order
            .as_deref()
            .filter(|order| !order.is_empty())
    }

    /// First declared sink target in node order: a table name for
    /// relational sinks, a file path for file sinks.
    pub fn output_location(&self) -> String {
        self.nodes
            .iter()
            .find_map(|node| match node.kind {
                NodeKind::SqlOutput => node.data.get_non_blank("tableName"),
                NodeKind::CsvOutput => node.data.get_non_blank("filePath"),
                _ => None,
            })
            .unwrap_or_else(|| UNKNOWN_OUTPUT_LOCATION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Pipeline {
        let mut p = Pipeline::new("p1", "sample");
        p.nodes = vec![
            Node::new("a", "csvSource", json!({"filePath": "people.csv"})),
            Node::new("b", "csvSource", json!({"filePath": "depts.csv"})),
            Node::new("j", "join", json!({"leftKey": "dept", "rightKey": "id"})),
            Node::new("out", "sqlOutput", json!({"tableName": "joined", "databaseType": "sqlite"})),
            Node::new("csv", "csvOutput", json!({"filePath": "out.csv"})),
        ];
        p.edges = vec![
            Edge::new("e1", "a", "j"),
            Edge::new("e2", "b", "j"),
            Edge::new("e3", "j", "out"),
        ];
        p
    }

    #[test]
    fn test_incoming_edges_keep_declaration_order() {
        let p = sample();
        let sources: Vec<&str> = p.incoming_edges("j").map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["a", "b"]);
    }

    #[test]
    fn test_output_location_uses_first_sink() {
        assert_eq!(sample().output_location(), "joined");

        let mut p = sample();
        p.nodes.retain(|n| n.kind != NodeKind::SqlOutput);
        assert_eq!(p.output_location(), "out.csv");

        p.nodes.retain(|n| n.kind != NodeKind::CsvOutput);
        assert_eq!(p.output_location(), UNKNOWN_OUTPUT_LOCATION);
    }

    #[test]
    fn test_empty_explicit_order_is_absent() {
        let mut p = sample();
        p.execution_order = Some(vec![]);
        assert!(p.explicit_order().is_none());
    }

    #[test]
    fn test_parse_camel_case_json() {
        let p = Pipeline::from_json(
            r#"{
                "id": "p1",
                "name": "demo",
                "nodes": [{"id": "a", "type": "csvSource", "data": {"filePath": "x.csv"}}],
                "edges": [{"id": "e1", "source": "a", "target": "b", "sourceHandle": "out"}],
                "executionOrder": ["a", "b"],
                "createdAt": "2024-01-01T00:00:00"
            }"#,
        )
        .unwrap();

        assert_eq!(p.edges[0].source_handle.as_deref(), Some("out"));
        assert_eq!(p.explicit_order().map(|o| o.len()), Some(2));
        assert!(p.find_node("a").is_some());
        assert!(p.find_node("b").is_none());
    }

    #[test]
    fn test_load_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Pipeline::load(&path).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
