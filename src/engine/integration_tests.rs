// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::config::EngineConfig;
use crate::engine::{ExecutionRegistry, ExecutionStatus, SequentialExecutor};
use crate::graph::{validate_pipeline, Edge, Node, Pipeline};
use crate::traits::PipelineExecutor;

/// End-to-end pipeline runs against real files in temporary directories
#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.paths.uploads_dir = dir.join("uploads");
        config.paths.sample_data_dir = dir.join("sample-data");
        config.sqlite.output_file = dir.join("output/pipeline_results.db");
        config
    }

    fn engine_in(dir: &Path) -> SequentialExecutor {
        SequentialExecutor::new(config_in(dir))
    }

    fn write_upload(dir: &Path, name: &str, contents: &str) {
        let uploads = dir.join("uploads");
        std::fs::create_dir_all(&uploads).unwrap();
        std::fs::write(uploads.join(name), contents).unwrap();
    }

    fn pipeline(nodes: Vec<Node>, edges: &[(&str, &str)], order: Option<&[&str]>) -> Pipeline {
        let mut p = Pipeline::new("p1", "integration");
        p.nodes = nodes;
        p.edges = edges
            .iter()
            .enumerate()
            .map(|(i, (s, t))| Edge::new(format!("e{}", i), *s, *t))
            .collect();
        p.execution_order = order.map(|o| o.iter().map(|s| s.to_string()).collect());
        p
    }

    #[tokio::test]
    async fn test_csv_filter_csv_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        write_upload(
            dir.path(),
            "employees.csv",
            "name,salary\nAlice,85000\nBob,62000\nCarol,91000\n",
        );
        let out = dir.path().join("out/high_earners.csv");

        let p = pipeline(
            vec![
                Node::new("A", "csvSource", json!({"filePath": "employees.csv"})),
                Node::new("B", "filter", json!({"column": "salary", "operator": ">", "value": "70000"})),
                Node::new("C", "csvOutput", json!({"filePath": out.to_str().unwrap()})),
            ],
            &[("A", "B"), ("B", "C")],
            Some(&["A", "B", "C"]),
        );
        assert!(validate_pipeline(&p).valid);

        let report = engine_in(dir.path()).execute(&p).await;

        assert_eq!(report.status, ExecutionStatus::Success);
        // largest cached table is the 3-row source
        assert_eq!(report.records_processed, 3);
        assert_eq!(report.output_location.as_deref(), out.to_str());
        assert!(report.end_time.unwrap() >= report.start_time);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "name,salary\nAlice,85000\nCarol,91000\n"
        );
    }

    #[tokio::test]
    async fn test_inner_join_of_two_sources() {
        let dir = tempfile::tempdir().unwrap();
        write_upload(
            dir.path(),
            "people.csv",
            "id,name,dept\n1,Alice,10\n2,Bob,20\n3,Carol,30\n4,Dan,10\n5,Eve,\n",
        );
        write_upload(
            dir.path(),
            "depts.csv",
            "dept_id,dept_name\n10,Engineering\n40,Legal\n50,Ops\n",
        );
        let out = dir.path().join("joined.csv");

        let p = pipeline(
            vec![
                Node::new("people", "csvSource", json!({"filePath": "uploads/people.csv"})),
                Node::new("depts", "csvSource", json!({"filePath": "depts.csv"})),
                Node::new(
                    "j",
                    "join",
                    json!({"joinType": "inner", "leftKey": "dept", "rightKey": "dept_id"}),
                ),
                Node::new("out", "csvOutput", json!({"filePath": out.to_str().unwrap()})),
            ],
            &[("people", "j"), ("depts", "j"), ("j", "out")],
            Some(&["people", "depts", "j", "out"]),
        );

        let report = engine_in(dir.path()).execute(&p).await;
        assert_eq!(report.status, ExecutionStatus::Success, "{:?}", report.error_message);

        let written = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "id,name,dept,dept_id,dept_name");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,Alice,10,10,Engineering");
        assert_eq!(lines[2], "4,Dan,10,10,Engineering");
    }

    #[tokio::test]
    async fn test_join_with_one_input_fails_with_graph_error() {
        let dir = tempfile::tempdir().unwrap();
        write_upload(dir.path(), "a.csv", "k\n1\n");

        let p = pipeline(
            vec![
                Node::new("a", "csvSource", json!({"filePath": "a.csv"})),
                Node::new("j", "join", json!({"leftKey": "k", "rightKey": "k"})),
            ],
            &[("a", "j")],
            None,
        );

        let report = engine_in(dir.path()).execute(&p).await;

        assert_eq!(report.status, ExecutionStatus::Failed);
        let message = report.error_message.unwrap();
        assert!(message.contains("'j'"));
        assert!(message.contains("exactly 2"));
        assert!(message.contains("but has: 1"));
    }

    #[tokio::test]
    async fn test_missing_file_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never.csv");

        let p = pipeline(
            vec![
                Node::new("a", "csvSource", json!({"filePath": "nope.csv"})),
                Node::new("c", "csvOutput", json!({"filePath": out.to_str().unwrap()})),
            ],
            &[("a", "c")],
            None,
        );
        let executor = engine_in(dir.path());
        let report = executor.execute(&p).await;

        assert_eq!(report.status, ExecutionStatus::Failed);
        assert!(report
            .error_message
            .as_deref()
            .unwrap()
            .starts_with("Failed to read from CSV File: File not found: nope.csv"));
        assert!(report.error_detail.is_some());
        assert!(report.end_time.unwrap() >= report.start_time);
        assert!(!out.exists());

        let stored = executor
            .execution_status(&report.execution_id.to_string())
            .unwrap();
        assert_eq!(stored.status, ExecutionStatus::Failed);
    }

    #[tokio::test]
    async fn test_default_order_with_map_and_sort() {
        let dir = tempfile::tempdir().unwrap();
        write_upload(dir.path(), "fruit.csv", "fruit,qty\npear,3\napple,10\nfig,2\n");
        let out = dir.path().join("sorted.csv");

        // nodes listed out of order; no executionOrder
        let p = pipeline(
            vec![
                Node::new("out", "csvOutput", json!({"filePath": out.to_str().unwrap()})),
                Node::new(
                    "sort",
                    "sort",
                    json!({"sortColumns": [{"column": "FRUIT", "direction": "desc"}]}),
                ),
                Node::new(
                    "map",
                    "map",
                    json!({"mappings": [
                        {"sourceColumn": "fruit", "targetColumn": "FRUIT", "operation": "uppercase"},
                        {"sourceColumn": "qty", "targetColumn": "qty", "operation": "multiply", "value": "2"}
                    ]}),
                ),
                Node::new("src", "csvSource", json!({"filePath": "fruit.csv"})),
            ],
            &[("src", "map"), ("map", "sort"), ("sort", "out")],
            None,
        );

        let report = engine_in(dir.path()).execute(&p).await;
        assert_eq!(report.status, ExecutionStatus::Success, "{:?}", report.error_message);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "qty,FRUIT\n6.0,PEAR\n4.0,FIG\n20.0,APPLE\n"
        );
    }

    #[tokio::test]
    async fn test_sqlite_output_rerun_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_upload(
            dir.path(),
            "sales.csv",
            "region,amount\neast,10\nwest,5\neast,7\n",
        );
        let db = dir.path().join("warehouse.db");

        let p = pipeline(
            vec![
                Node::new("src", "csvSource", json!({"filePath": "sales.csv"})),
                Node::new(
                    "grp",
                    "groupBy",
                    json!({
                        "groupByColumns": ["region"],
                        "aggregations": [{"function": "sum", "column": "amount", "alias": "total"}]
                    }),
                ),
                Node::new(
                    "sink",
                    "sqlOutput",
                    json!({"tableName": "totals", "databaseType": "sqlite", "database": db.to_str().unwrap()}),
                ),
                Node::new(
                    "back",
                    "sqliteSource",
                    json!({"database": db.to_str().unwrap(), "query": "SELECT region, total FROM totals ORDER BY region"}),
                ),
                Node::new("check", "csvOutput", json!({"filePath": dir.path().join("check.csv").to_str().unwrap()})),
            ],
            &[("src", "grp"), ("grp", "sink"), ("back", "check")],
            Some(&["src", "grp", "sink", "back", "check"]),
        );

        let executor = engine_in(dir.path());
        let first = executor.execute(&p).await;
        let first_rows = std::fs::read_to_string(dir.path().join("check.csv")).unwrap();
        let second = executor.execute(&p).await;
        let second_rows = std::fs::read_to_string(dir.path().join("check.csv")).unwrap();

        assert_eq!(first.status, ExecutionStatus::Success, "{:?}", first.error_message);
        assert_eq!(second.status, ExecutionStatus::Success);
        assert_eq!(first.records_processed, second.records_processed);
        assert_eq!(first_rows, second_rows);
        assert_eq!(first_rows, "region,total\neast,17.0\nwest,5.0\n");
        assert_eq!(first.output_location.as_deref(), Some("totals"));
    }

    #[tokio::test]
    async fn test_sql_output_without_database_type_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_upload(dir.path(), "a.csv", "k\n1\n");

        let p = pipeline(
            vec![
                Node::new("x", "sqlOutput", json!({"tableName": "t"})),
                Node::new("a", "csvSource", json!({"filePath": "a.csv"})),
            ],
            &[("a", "x")],
            Some(&["a", "x"]),
        );
        let report = engine_in(dir.path()).execute(&p).await;

        assert_eq!(report.status, ExecutionStatus::Failed);
        assert!(report
            .error_message
            .unwrap()
            .contains("Database type must be specified"));
    }

    #[tokio::test]
    async fn test_concurrent_runs_share_registry_but_not_data() {
        let registry = Arc::new(ExecutionRegistry::new());

        let first_dir = tempfile::tempdir().unwrap();
        write_upload(first_dir.path(), "data.csv", "name,score\nann,9\nben,3\ncat,7\n");
        let first_out = first_dir.path().join("out.csv");
        let first = pipeline(
            vec![
                Node::new("A", "csvSource", json!({"filePath": "data.csv"})),
                Node::new("B", "filter", json!({"column": "score", "operator": ">", "value": "5"})),
                Node::new("C", "csvOutput", json!({"filePath": first_out.to_str().unwrap()})),
            ],
            &[("A", "B"), ("B", "C")],
            Some(&["A", "B", "C"]),
        );

        let second_dir = tempfile::tempdir().unwrap();
        write_upload(
            second_dir.path(),
            "data.csv",
            "city\nrome\noslo\nlima\nkiev\nbern\n",
        );
        let second_out = second_dir.path().join("out.csv");
        let second = pipeline(
            vec![
                Node::new("A", "csvSource", json!({"filePath": "data.csv"})),
                Node::new("B", "sort", json!({"sortColumns": [{"column": "city", "direction": "asc"}]})),
                Node::new("C", "csvOutput", json!({"filePath": second_out.to_str().unwrap()})),
            ],
            &[("A", "B"), ("B", "C")],
            Some(&["A", "B", "C"]),
        );

        let first_engine = SequentialExecutor::with_registry(
            Arc::new(config_in(first_dir.path())),
            Arc::clone(&registry),
        );
        let second_engine = SequentialExecutor::with_registry(
            Arc::new(config_in(second_dir.path())),
            Arc::clone(&registry),
        );

        let (a, b) = tokio::join!(first_engine.execute(&first), second_engine.execute(&second));

        assert_eq!(a.status, ExecutionStatus::Success);
        assert_eq!(b.status, ExecutionStatus::Success);
        assert!(a.status.is_terminal() && b.status.is_terminal());
        assert_ne!(a.execution_id, b.execution_id);

        assert_eq!(a.records_processed, 3);
        assert_eq!(b.records_processed, 5);
        assert_eq!(
            std::fs::read_to_string(&first_out).unwrap(),
            "name,score\nann,9\ncat,7\n"
        );
        assert_eq!(
            std::fs::read_to_string(&second_out).unwrap(),
            "city\nbern\nkiev\nlima\noslo\nrome\n"
        );

        assert_eq!(registry.len(), 2);
        assert_eq!(first_engine.execution_status(&b.execution_id.to_string()), Some(b.clone()));
        assert_eq!(second_engine.execution_status(&a.execution_id.to_string()), Some(a.clone()));
    }
}
