use crate::filter::{Operator, RawNode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A condition as a vertex of the graph model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub parameter: String,
    pub operator: Operator,
    pub value: String,
}

impl Node {
    pub fn new(id: &str, parameter: &str, operator: Operator, value: &str) -> Self {
        Self {
            id: id.to_string(),
            parameter: parameter.to_string(),
            operator,
            value: value.to_string(),
        }
    }
}

impl From<&RawNode> for Node {
    fn from(raw: &RawNode) -> Self {
        Self {
            id: raw.id.clone(),
            parameter: raw.parameter.clone(),
            operator: raw.operator,
            value: raw.value.clone(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.parameter, self.operator, self.value)
    }
}

/// A directed connection from a parent condition to a child condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    /// Builds the edge with its derived id, `e{source}-{target}`.
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: Self::id_for(source, target),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    pub fn id_for(source: &str, target: &str) -> String {
        format!("e{}-{}", source, target)
    }

    /// Whether this edge starts or ends at `node_id`.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Either half of the graph, as handed to renderers and bulk edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GraphElement {
    Node(Node),
    Edge(Edge),
}

impl GraphElement {
    pub fn id(&self) -> &str {
        match self {
            GraphElement::Node(node) => &node.id,
            GraphElement::Edge(edge) => &edge.id,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            GraphElement::Node(node) => Some(node),
            GraphElement::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            GraphElement::Edge(edge) => Some(edge),
            GraphElement::Node(_) => None,
        }
    }
}
