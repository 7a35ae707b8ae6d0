use crate::filter::Operator;
use crate::graph::{Dag, Edge, Node};
use serde::{Deserialize, Serialize};

/// A single structural edit to a graph.
///
/// Events carry an explicit `type` tag in JSON, e.g.
/// `{"type": "ADD_EDGE", "source": "1", "target": "7"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GraphEvent {
    AddNode {
        node: Node,
    },
    RemoveNode {
        id: String,
    },
    AddEdge {
        source: String,
        target: String,
    },
    RemoveEdge {
        id: String,
    },
    UpdateNode {
        id: String,
        parameter: String,
        operator: Operator,
        value: String,
    },
}

impl GraphEvent {
    pub fn add_node(node: Node) -> Self {
        GraphEvent::AddNode { node }
    }

    pub fn remove_node(id: &str) -> Self {
        GraphEvent::RemoveNode { id: id.to_string() }
    }

    pub fn add_edge(source: &str, target: &str) -> Self {
        GraphEvent::AddEdge {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    pub fn remove_edge(id: &str) -> Self {
        GraphEvent::RemoveEdge { id: id.to_string() }
    }

    /// Short name of the event kind, used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            GraphEvent::AddNode { .. } => "ADD_NODE",
            GraphEvent::RemoveNode { .. } => "REMOVE_NODE",
            GraphEvent::AddEdge { .. } => "ADD_EDGE",
            GraphEvent::RemoveEdge { .. } => "REMOVE_EDGE",
            GraphEvent::UpdateNode { .. } => "UPDATE_NODE",
        }
    }
}

impl Dag {
    /// Applies `event` in place. Returns `true` if the graph changed.
    ///
    /// This is the bare primitive: it never refuses an edit. Policy such as protecting
    /// the root lives in `EditSession`.
    pub fn apply(&mut self, event: GraphEvent) -> bool {
        match event {
            GraphEvent::AddNode { node } => self.add_node(node),
            GraphEvent::RemoveNode { id } => self.remove_node(&id).is_some(),
            GraphEvent::AddEdge { source, target } => {
                self.add_edge(&source, &target);
                true
            }
            GraphEvent::RemoveEdge { id } => self.remove_edge(&id).is_some(),
            GraphEvent::UpdateNode {
                id,
                parameter,
                operator,
                value,
            } => match self.get_node_mut(&id) {
                Some(node) => {
                    node.parameter = parameter;
                    node.operator = operator;
                    node.value = value;
                    true
                }
                None => false,
            },
        }
    }
}

/// Consumes `dag`, applies `event` and hands the graph back.
pub fn apply_event(mut dag: Dag, event: GraphEvent) -> Dag {
    dag.apply(event);
    dag
}

impl From<Edge> for GraphEvent {
    fn from(edge: Edge) -> Self {
        GraphEvent::AddEdge {
            source: edge.source,
            target: edge.target,
        }
    }
}
