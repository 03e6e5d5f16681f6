//! Shared helpers for the integration tests.

#![allow(dead_code)]

use chain_view::{GraphBuilder, GraphStore, Node, NodeId};
use proptest::prelude::*;

/// Build a graph from `n` nodes (ids `0..n`) and candidate edges, skipping
/// duplicate edges so any generated edge list is valid.
pub fn graph_from(n: u64, edges: &[(u64, u64)]) -> GraphStore {
    let mut b = GraphBuilder::new();
    for id in 0..n {
        b.add_node(Node::new(NodeId(id))).unwrap();
    }
    for &(from, to) in edges {
        if !b.contains_edge(NodeId(from), NodeId(to)) {
            b.add_edge(NodeId(from), NodeId(to)).unwrap();
        }
    }
    b.build()
}

/// Arbitrary directed graphs with 1..=max_nodes nodes, self-loops and
/// cycles included.
pub fn arb_graph(max_nodes: u64) -> impl Strategy<Value = GraphStore> {
    (1..=max_nodes).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..(n as usize * 3))
            .prop_map(move |edges| graph_from(n, &edges))
    })
}

/// Arbitrary graph plus one of its node ids.
pub fn arb_graph_and_node(max_nodes: u64) -> impl Strategy<Value = (GraphStore, NodeId)> {
    arb_graph(max_nodes).prop_flat_map(|g| {
        let n = g.node_count() as u64;
        (Just(g), (0..n).prop_map(NodeId))
    })
}

/// Decode the entities `escape_attribute` produces.
pub fn unescape_attribute(escaped: &str) -> String {
    escaped
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// The raw `srcdoc` attribute value of an embedded fragment.
pub fn srcdoc_value(fragment: &str) -> &str {
    let start = fragment.find("srcdoc=\"").unwrap() + "srcdoc=\"".len();
    let len = fragment[start..].find('"').unwrap();
    &fragment[start..start + len]
}

/// The 1 -> 2 -> 3 linear graph.
pub fn linear() -> GraphStore {
    GraphStore::from_edges([1, 2, 3], [(1, 2), (2, 3)]).unwrap()
}
