use super::event::GraphEvent;
use crate::error::{ConversionError, EditError, LayoutError};
use crate::filter::{FilterDocument, Operator};
use crate::graph::{Dag, Edge, GraphElement, Node};
use crate::layout::{LayerAssignment, Layering};
use crate::snapshot::SessionSnapshot;
use std::collections::VecDeque;
use uuid::Uuid;

const DEFAULT_HISTORY_LIMIT: usize = 100;

/// An editing session over one graph.
///
/// The session applies `GraphEvent`s on behalf of a user and enforces the rules the bare
/// graph does not: the root cannot be removed and new edges must join existing
/// conditions. Every accepted change can be undone.
pub struct EditSession {
    dag: Dag,
    protect_root: bool,
    history_limit: usize,
    undo_stack: VecDeque<Dag>,
    redo_stack: Vec<Dag>,
}

pub struct EditSessionBuilder {
    dag: Dag,
    protect_root: bool,
    history_limit: usize,
}

impl EditSessionBuilder {
    pub fn new(dag: Dag) -> Self {
        Self {
            dag,
            protect_root: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Whether removing the root condition is refused. Enabled by default.
    pub fn with_root_protection(mut self, protect_root: bool) -> Self {
        self.protect_root = protect_root;
        self
    }

    /// Number of undo steps kept. `0` disables history.
    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn build(self) -> EditSession {
        EditSession {
            dag: self.dag,
            protect_root: self.protect_root,
            history_limit: self.history_limit,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl EditSession {
    pub fn builder(dag: Dag) -> EditSessionBuilder {
        EditSessionBuilder::new(dag)
    }

    pub fn new(dag: Dag) -> Self {
        EditSessionBuilder::new(dag).build()
    }

    /// Opens a session on a stored filter document.
    pub fn load(document: &FilterDocument) -> Result<Self, ConversionError> {
        Ok(Self::new(document.to_dag()?))
    }

    /// Opens a session on the graph held by a snapshot.
    pub fn restore(snapshot: SessionSnapshot) -> Self {
        Self::new(snapshot.graph)
    }

    pub fn graph(&self) -> &Dag {
        &self.dag
    }

    pub fn into_graph(self) -> Dag {
        self.dag
    }

    /// Checks `event` against the session rules and applies it.
    ///
    /// Returns `Ok(false)` for accepted events that left the graph unchanged, such as
    /// adding a node whose id is taken.
    pub fn apply(&mut self, event: GraphEvent) -> Result<bool, EditError> {
        if let Err(e) = self.check(&event) {
            log::warn!("Rejected {} event: {}", event.name(), e);
            return Err(e);
        }

        let before = self.checkpoint();
        let name = event.name();
        let changed = self.dag.apply(event);
        if changed {
            self.record(before);
        }
        log::debug!("Applied {} event (changed: {})", name, changed);
        Ok(changed)
    }

    /// Applies events in order, stopping at the first rejected one.
    pub fn apply_all(
        &mut self,
        events: impl IntoIterator<Item = GraphEvent>,
    ) -> Result<usize, EditError> {
        let mut changed = 0;
        for event in events {
            if self.apply(event)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Adds a new, unconnected condition under a freshly generated id and returns the id.
    pub fn add_condition(&mut self, parameter: &str, operator: Operator, value: &str) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        while self.dag.has_node(&id) {
            id = Uuid::new_v4().simple().to_string();
        }

        let before = self.checkpoint();
        self.dag
            .add_node(Node::new(&id, parameter, operator, value));
        self.record(before);
        id
    }

    /// Replaces the condition fields of an existing node.
    pub fn update_condition(
        &mut self,
        id: &str,
        parameter: &str,
        operator: Operator,
        value: &str,
    ) -> Result<(), EditError> {
        self.apply(GraphEvent::UpdateNode {
            id: id.to_string(),
            parameter: parameter.to_string(),
            operator,
            value: value.to_string(),
        })
        .map(|_| ())
    }

    /// Connects two existing conditions and returns the new edge id.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<String, EditError> {
        self.apply(GraphEvent::add_edge(source, target))?;
        Ok(Edge::id_for(source, target))
    }

    /// Removes a batch of nodes and edges as a single undo step.
    ///
    /// The whole batch is refused if it contains the root condition.
    pub fn remove_elements(&mut self, elements: &[GraphElement]) -> Result<usize, EditError> {
        if self.protect_root {
            if let Some(root) = elements
                .iter()
                .filter_map(GraphElement::as_node)
                .find(|node| self.dag.is_root(&node.id))
            {
                log::warn!("Rejected removal batch containing the root '{}'", root.id);
                return Err(EditError::RootRemoval(root.id.clone()));
            }
        }

        let before = self.checkpoint();
        let mut removed = 0;
        for element in elements {
            let changed = match element {
                GraphElement::Edge(edge) => self.dag.remove_edge(&edge.id).is_some(),
                GraphElement::Node(node) => self.dag.remove_node(&node.id).is_some(),
            };
            if changed {
                removed += 1;
            }
        }

        if removed > 0 {
            self.record(before);
        }
        Ok(removed)
    }

    /// Reverts the last accepted change. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop_back() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.dag, previous);
                self.redo_stack.push(current);
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone change. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.dag, next);
                self.push_undo(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn layers(&self) -> Result<Layering, LayoutError> {
        LayerAssignment::from_dag(&self.dag).assign_layers()
    }

    pub fn to_document(&self) -> Result<FilterDocument, ConversionError> {
        self.dag.to_document()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.dag.clone())
    }

    fn check(&self, event: &GraphEvent) -> Result<(), EditError> {
        match event {
            GraphEvent::RemoveNode { id } if self.protect_root && self.dag.is_root(id) => {
                Err(EditError::RootRemoval(id.clone()))
            }
            GraphEvent::AddEdge { source, target } => {
                for endpoint in [source, target] {
                    if !self.dag.has_node(endpoint) {
                        return Err(EditError::UnknownNode(endpoint.clone()));
                    }
                }
                Ok(())
            }
            GraphEvent::UpdateNode { id, .. } if !self.dag.has_node(id) => {
                Err(EditError::UnknownNode(id.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Copy of the current graph for the undo stack, or `None` when history is disabled.
    fn checkpoint(&self) -> Option<Dag> {
        (self.history_limit > 0).then(|| self.dag.clone())
    }

    fn record(&mut self, before: Option<Dag>) {
        self.redo_stack.clear();
        if let Some(before) = before {
            self.push_undo(before);
        }
    }

    fn push_undo(&mut self, dag: Dag) {
        if self.history_limit == 0 {
            return;
        }
        if self.undo_stack.len() == self.history_limit {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(dag);
    }
}
