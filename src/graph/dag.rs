use super::types::{Edge, GraphElement, Node};
use crate::error::GraphError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// The editable graph of conditions.
///
/// Nodes are keyed by id and are unique; inserting an id that is already present is a
/// no-op. Edges keep their insertion order, which is also the order children are written
/// back to storage. The root is tracked by id rather than flagged on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dag {
    root: String,
    nodes: AHashMap<String, Node>,
    edges: Vec<Edge>,
}

impl Dag {
    /// Creates a graph that holds only its root condition.
    pub fn new(root: Node) -> Self {
        let mut nodes = AHashMap::new();
        let root_id = root.id.clone();
        nodes.insert(root_id.clone(), root);
        Self {
            root: root_id,
            nodes,
            edges: Vec::new(),
        }
    }

    /// Assembles a graph from pre-built parts without checking them.
    ///
    /// Use [`Dag::validate`] when the parts come from an untrusted source.
    pub fn from_parts(
        root: impl Into<String>,
        nodes: impl IntoIterator<Item = Node>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Self {
        let mut dag = Self {
            root: root.into(),
            nodes: AHashMap::new(),
            edges: Vec::new(),
        };
        for node in nodes {
            dag.add_node(node);
        }
        dag.edges.extend(edges);
        dag
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.nodes.get(&self.root)
    }

    pub fn is_root(&self, id: &str) -> bool {
        self.root == id
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Inserts a node unless its id is already taken. Returns `true` if it was inserted.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Appends the edge `source -> target`. Identical edges are not merged.
    pub fn add_edge(&mut self, source: &str, target: &str) -> &Edge {
        self.edges.push(Edge::new(source, target));
        &self.edges[self.edges.len() - 1]
    }

    /// Removes every edge matching `predicate` and returns how many were dropped.
    pub fn remove_edges_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Edge) -> bool,
    {
        let before = self.edges.len();
        self.edges.retain(|edge| !predicate(edge));
        before - self.edges.len()
    }

    /// Removes a node together with every edge that starts or ends at it.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let removed = self.nodes.remove(id)?;
        self.remove_edges_where(|edge| edge.touches(id));
        Some(removed)
    }

    /// Removes the edge with the given id. Its endpoints are left in place.
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|edge| edge.id == id)?;
        Some(self.edges.remove(index))
    }

    /// All nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Targets of the edges leaving `id`, in insertion order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.source == id)
            .map(|edge| edge.target.as_str())
    }

    /// Sources of the edges entering `id`, in insertion order.
    pub fn parents_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.target == id)
            .map(|edge| edge.source.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Every node followed by every edge, as tagged elements.
    pub fn elements(&self) -> Vec<GraphElement> {
        self.nodes
            .values()
            .cloned()
            .map(GraphElement::Node)
            .chain(self.edges.iter().cloned().map(GraphElement::Edge))
            .collect()
    }

    /// Checks the structural invariants: the root exists, no edge dangles and no edge
    /// id is repeated.
    pub fn validate(&self) -> Result<(), GraphError> {
        if !self.has_node(&self.root) {
            return Err(GraphError::MissingRoot(self.root.clone()));
        }

        let mut seen = AHashSet::new();
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !self.has_node(endpoint) {
                    return Err(GraphError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        missing_node_id: endpoint.clone(),
                    });
                }
            }
            if !seen.insert(edge.id.as_str()) {
                return Err(GraphError::DuplicateEdge(edge.id.clone()));
            }
        }
        Ok(())
    }
}
