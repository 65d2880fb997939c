// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution ordering for pipeline graphs.
//!
//! The default order is a reversed depth-first post-order starting from every
//! source-kind node. It places each node after the ancestors found along the
//! traversal but is not a full topological sort: a node with several
//! independent source roots can be scheduled before a root the walk has not
//! reached yet. Callers needing a strict order supply `executionOrder`.

use super::Pipeline;
use std::collections::{HashMap, HashSet};

/// The explicit order when one is given, otherwise [`default_order`].
pub fn resolve_order(pipeline: &Pipeline) -> Vec<String> {
    match pipeline.explicit_order() {
        Some(order) => order.to_vec(),
        None => default_order(pipeline),
    }
}

/// Reversed post-order of an iterative depth-first walk, so graph depth
/// never touches the call stack.
pub fn default_order(pipeline: &Pipeline) -> Vec<String> {
    let mut targets: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &pipeline.edges {
        targets
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut post_order: Vec<String> = Vec::new();
    // (node, index of the next outgoing edge to follow)
    let mut stack: Vec<(&str, usize)> = Vec::new();

    for root in pipeline.nodes.iter().filter(|n| n.kind.is_source()) {
        if !visited.insert(root.id.as_str()) {
            continue;
        }
        stack.push((root.id.as_str(), 0));

        while let Some((node_id, cursor)) = stack.last_mut() {
            let next = targets
                .get(*node_id)
                .and_then(|outgoing| outgoing.get(*cursor))
                .copied();
            match next {
                Some(target) => {
                    *cursor += 1;
                    if visited.insert(target) {
                        stack.push((target, 0));
                    }
                }
                None => {
                    post_order.push(node_id.to_string());
                    stack.pop();
                }
            }
        }
    }

    post_order.reverse();
    post_order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use serde_json::json;

    fn position(order: &[String], id: &str) -> usize {
        order.iter().position(|n| n == id).unwrap()
    }

    #[test]
    fn test_linear_chain() {
        let mut p = Pipeline::new("p", "chain");
        p.nodes = vec![
            Node::new("c", "csvOutput", json!({})),
            Node::new("b", "filter", json!({})),
            Node::new("a", "csvSource", json!({})),
        ];
        p.edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "c")];

        assert_eq!(default_order(&p), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_diamond_places_join_after_both_branches() {
        let mut p = Pipeline::new("p", "diamond");
        p.nodes = vec![
            Node::new("src", "sqliteSource", json!({})),
            Node::new("l", "filter", json!({})),
            Node::new("r", "map", json!({})),
            Node::new("j", "join", json!({})),
        ];
        p.edges = vec![
            Edge::new("e1", "src", "l"),
            Edge::new("e2", "src", "r"),
            Edge::new("e3", "l", "j"),
            Edge::new("e4", "r", "j"),
        ];

        let order = default_order(&p);
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], "src");
        assert!(position(&order, "j") > position(&order, "l"));
        assert!(position(&order, "j") > position(&order, "r"));
    }

    #[test]
    fn test_nodes_unreachable_from_sources_are_omitted() {
        let mut p = Pipeline::new("p", "orphans");
        p.nodes = vec![
            Node::new("a", "csvSource", json!({})),
            Node::new("lonely", "sort", json!({})),
        ];

        assert_eq!(default_order(&p), vec!["a"]);
    }

    #[test]
    fn test_explicit_order_wins() {
        let mut p = Pipeline::new("p", "explicit");
        p.nodes = vec![Node::new("a", "csvSource", json!({}))];
        p.execution_order = Some(vec!["x".into(), "a".into()]);

        assert_eq!(resolve_order(&p), vec!["x", "a"]);

        p.execution_order = Some(vec![]);
        assert_eq!(resolve_order(&p), vec!["a"]);
    }

    #[test]
    fn test_long_chain_does_not_exhaust_the_stack() {
        const LEN: usize = 60_000;
        let mut p = Pipeline::new("p", "chain");
        p.nodes.push(Node::new("n0", "csvSource", json!({})));
        for i in 1..LEN {
            p.nodes.push(Node::new(format!("n{}", i), "map", json!({})));
            p.edges.push(Edge::new(
                format!("e{}", i),
                format!("n{}", i - 1),
                format!("n{}", i),
            ));
        }

        let order = default_order(&p);
        assert_eq!(order.len(), LEN);
        assert_eq!(order[0], "n0");
        assert_eq!(order[LEN - 1], format!("n{}", LEN - 1));
        assert!(order
            .iter()
            .enumerate()
            .all(|(i, id)| *id == format!("n{}", i)));
    }

    #[test]
    fn test_branches_follow_edge_declaration_order() {
        let mut p = Pipeline::new("p", "fan-out");
        p.nodes = vec![
            Node::new("a", "csvSource", json!({})),
            Node::new("b", "filter", json!({})),
            Node::new("c", "sort", json!({})),
            Node::new("d", "csvOutput", json!({})),
        ];
        p.edges = vec![
            Edge::new("e1", "a", "b"),
            Edge::new("e2", "a", "c"),
            Edge::new("e3", "b", "d"),
        ];

        // post-order d, b, c, a reversed
        assert_eq!(default_order(&p), vec!["a", "c", "b", "d"]);
    }
}
