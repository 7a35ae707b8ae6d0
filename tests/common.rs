//! Common test utilities for building filter documents and graphs.
use jouken::prelude::*;

/// The seed filter tree as it is exchanged with the storage backend.
///
/// `1 -> {2, 3}`, `2 -> {4, 5}`, `3 -> {6}`, `6 -> {7, 8, 9}`
#[allow(dead_code)]
pub const SAMPLE_FILTER_JSON: &str = r#"{
  "root_id": "1",
  "filter": {
    "1": { "id": "1", "parameter": "accommodation.size", "value": "20", "operator": "<", "status": "idle", "children": ["2", "3"] },
    "2": { "id": "2", "parameter": "main.applicant.age", "value": "20", "operator": "<", "status": "idle", "children": ["4", "5"] },
    "4": { "id": "4", "parameter": "main.applicant.income", "value": "2000", "operator": "<", "status": "idle", "children": [] },
    "5": { "id": "5", "parameter": "co.applicant.income", "value": "2000", "operator": "<", "status": "idle", "children": [] },
    "3": { "id": "3", "parameter": "co.applicant.age", "value": "18", "operator": "<", "status": "idle", "children": ["6"] },
    "6": { "id": "6", "parameter": "applied_loan_amount", "value": "1000", "operator": "<", "status": "idle", "children": ["7", "8", "9"] },
    "7": { "id": "7", "parameter": "co.applicant.age", "value": "18", "operator": "<", "status": "idle", "children": [] },
    "8": { "id": "8", "parameter": "co.applicant.age", "value": "18", "operator": "<", "status": "idle", "children": [] },
    "9": { "id": "9", "parameter": "co.applicant.age", "value": "18", "operator": "<", "status": "idle", "children": [] }
  }
}"#;

/// Creates a condition with a placeholder comparison.
#[allow(dead_code)]
pub fn condition(id: &str) -> Node {
    Node::new(id, "main.applicant.age", Operator::LessThan, "20")
}

/// Creates a stored condition with the given children.
#[allow(dead_code)]
pub fn raw(id: &str, children: &[&str]) -> RawNode {
    RawNode::new(id, "main.applicant.age", Operator::LessThan, "20").with_children(children)
}

/// Builds a filter map from stored conditions.
#[allow(dead_code)]
pub fn filter_of(nodes: Vec<RawNode>) -> FilterMap {
    nodes.into_iter().map(|n| (n.id.clone(), n)).collect()
}

/// A filter where condition `4` is listed under both `2` and `3`.
///
/// `1 -> {2, 3}`, `2 -> {4}`, `3 -> {4}`
#[allow(dead_code)]
pub fn create_shared_child_filter() -> FilterMap {
    filter_of(vec![
        raw("1", &["2", "3"]),
        raw("2", &["4"]),
        raw("3", &["4"]),
        raw("4", &[]),
    ])
}

/// Builds a graph from `(source, target)` pairs rooted at the first source.
#[allow(dead_code)]
pub fn dag_from_edges(edges: &[(&str, &str)]) -> Dag {
    let root = edges.first().map(|(s, _)| *s).unwrap_or("root");
    let mut dag = Dag::new(condition(root));
    for (source, target) in edges {
        dag.add_node(condition(source));
        dag.add_node(condition(target));
        dag.add_edge(source, target);
    }
    dag
}

/// Converts layers into sorted id lists for order-independent comparison.
#[allow(dead_code)]
pub fn layer_sets(layering: &Layering) -> Vec<Vec<String>> {
    layering
        .iter()
        .map(|layer| {
            let mut ids = layer.to_vec();
            ids.sort();
            ids
        })
        .collect()
}

/// A linear filter `0 -> 1 -> ... -> len - 1`.
#[allow(dead_code)]
pub fn chain_filter(len: usize) -> FilterMap {
    (0..len)
        .map(|i| {
            let mut node = raw(&i.to_string(), &[]);
            if i + 1 < len {
                node.children.push((i + 1).to_string());
            }
            node
        })
        .map(|node| (node.id.clone(), node))
        .collect()
}

/// A tree of `len` conditions rooted at `0` whose shape is decided by `seed`.
///
/// Each node `i > 0` hangs below an earlier node picked by a small linear
/// congruential step, so the same seed always gives the same tree.
#[allow(dead_code)]
pub fn seeded_filter(seed: u64, len: usize) -> FilterMap {
    const OPERATORS: [Operator; 3] = [Operator::LessThan, Operator::Equal, Operator::GreaterThan];

    let mut state = seed;
    let mut nodes: Vec<RawNode> = (0..len)
        .map(|i| {
            RawNode::new(
                &i.to_string(),
                &format!("param.{}", i % 5),
                OPERATORS[i % 3],
                &(i * 10).to_string(),
            )
        })
        .collect();

    for i in 1..len {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let parent = ((state >> 33) as usize) % i;
        nodes[parent].children.push(i.to_string());
    }
    filter_of(nodes)
}
