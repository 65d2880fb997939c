// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Where a node sits in the data flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Source,
    Transform,
    Sink,
    Unknown,
}

/// Closed set of node type tags understood by the engine.
///
/// Tags outside this set deserialize into [`NodeKind::Unknown`] and are
/// skipped at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    CsvSource,
    SqlSource,
    MySqlSource,
    PostgreSqlSource,
    SqliteSource,
    Filter,
    Map,
    GroupBy,
    Sort,
    Join,
    CsvOutput,
    SqlOutput,
    Unknown(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::CsvSource => "csvSource",
            NodeKind::SqlSource => "sqlSource",
            NodeKind::MySqlSource => "mysqlSource",
            NodeKind::PostgreSqlSource => "postgresqlSource",
            NodeKind::SqliteSource => "sqliteSource",
            NodeKind::Filter => "filter",
            NodeKind::Map => "map",
            NodeKind::GroupBy => "groupBy",
            NodeKind::Sort => "sort",
            NodeKind::Join => "join",
            NodeKind::CsvOutput => "csvOutput",
            NodeKind::SqlOutput => "sqlOutput",
            NodeKind::Unknown(tag) => tag,
        }
    }

    pub fn role(&self) -> NodeRole {
        match self {
            NodeKind::CsvSource
            | NodeKind::SqlSource
            | NodeKind::MySqlSource
            | NodeKind::PostgreSqlSource
            | NodeKind::SqliteSource => NodeRole::Source,
            NodeKind::Filter | NodeKind::Map | NodeKind::GroupBy | NodeKind::Sort | NodeKind::Join => {
                NodeRole::Transform
            }
            NodeKind::CsvOutput | NodeKind::SqlOutput => NodeRole::Sink,
            NodeKind::Unknown(_) => NodeRole::Unknown,
        }
    }

    pub fn is_source(&self) -> bool {
        self.role() == NodeRole::Source
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "csvSource" => NodeKind::CsvSource,
            "sqlSource" => NodeKind::SqlSource,
            "mysqlSource" => NodeKind::MySqlSource,
            "postgresqlSource" => NodeKind::PostgreSqlSource,
            "sqliteSource" => NodeKind::SqliteSource,
            "filter" => NodeKind::Filter,
            "map" => NodeKind::Map,
            "groupBy" => NodeKind::GroupBy,
            "sort" => NodeKind::Sort,
            "join" => NodeKind::Join,
            "csvOutput" => NodeKind::CsvOutput,
            "sqlOutput" => NodeKind::SqlOutput,
            _ => NodeKind::Unknown(tag),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        NodeKind::from(tag.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-form per-node configuration bag.
///
/// Values are checked lazily by whichever connector or operator consumes
/// them. Scalar getters are lenient: numbers and booleans are accepted where
/// a string is expected, and numeric strings where a number is expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeConfig(pub serde_json::Map<String, serde_json::Value>);

impl NodeConfig {
    pub fn new() -> Self {
        Self(serde_json::Map::new())
    }

    /// Build from a JSON object; anything else yields an empty bag.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// String value with blank strings treated as absent.
    pub fn get_non_blank(&self, key: &str) -> Option<String> {
        self.get_str(key).filter(|s| !s.trim().is_empty())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            serde_json::Value::Bool(b) => Some(*b),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        match self.0.get(key)? {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_array(&self, key: &str) -> Option<&Vec<serde_json::Value>> {
        self.0.get(key)?.as_array()
    }

    /// Elements of a string array; non-string scalars are stringified.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get_array(key)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item {
                        serde_json::Value::String(s) => Some(s.clone()),
                        serde_json::Value::Null => None,
                        other => Some(other.to_string()),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A non-blank string, or a configuration error naming the field.
    pub fn require_str(&self, node_id: &str, key: &str) -> PipelineResult<String> {
        self.get_non_blank(key).ok_or_else(|| {
            PipelineError::config(node_id, format!("missing required field '{}'", key))
        })
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for NodeConfig {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(map)
    }
}

/// A typed vertex of the pipeline graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub data: NodeConfig,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: impl Into<NodeKind>, data: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            data: NodeConfig::from_json(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_roundtrips_through_tag() {
        for tag in ["csvSource", "postgresqlSource", "groupBy", "sqlOutput"] {
            assert_eq!(NodeKind::from(tag).as_str(), tag);
        }
        assert_eq!(
            NodeKind::from("jsonSource"),
            NodeKind::Unknown("jsonSource".to_string())
        );
    }

    #[test]
    fn test_roles() {
        assert_eq!(NodeKind::SqliteSource.role(), NodeRole::Source);
        assert_eq!(NodeKind::Join.role(), NodeRole::Transform);
        assert_eq!(NodeKind::CsvOutput.role(), NodeRole::Sink);
        assert_eq!(NodeKind::from("chart").role(), NodeRole::Unknown);
    }

    #[test]
    fn test_node_deserializes_type_tag() {
        let node: Node = serde_json::from_value(json!({
            "id": "n1",
            "type": "filter",
            "position": {"x": 10.0, "y": 20.0},
            "data": {"column": "salary", "operator": ">", "value": 70000}
        }))
        .unwrap();

        assert_eq!(node.kind, NodeKind::Filter);
        assert_eq!(node.data.get_str("value"), Some("70000".to_string()));
        assert_eq!(node.data.get_str("column"), Some("salary".to_string()));
    }

    #[test]
    fn test_lenient_getters() {
        let cfg = NodeConfig::from_json(json!({
            "port": "5433",
            "includeHeaders": "false",
            "blank": "  ",
            "groupByColumns": ["dept", 7, null]
        }));

        assert_eq!(cfg.get_u16("port"), Some(5433));
        assert_eq!(cfg.get_bool("includeHeaders"), Some(false));
        assert_eq!(cfg.get_non_blank("blank"), None);
        assert_eq!(cfg.get_string_list("groupByColumns"), vec!["dept", "7"]);
        assert!(cfg.require_str("n1", "missing").is_err());
    }
}
