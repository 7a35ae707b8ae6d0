use crate::error::ConversionError;
use crate::filter::{FilterMap, RawNode};
use crate::graph::{Dag, Node};

/// Responsible for building a `Dag` from a stored filter tree.
pub(super) struct DagBuilder<'a> {
    filter: &'a FilterMap,
    dag: Dag,
}

impl<'a> DagBuilder<'a> {
    /// Starts a builder seeded with the root condition.
    pub(super) fn new(root_id: &str, filter: &'a FilterMap) -> Result<Self, ConversionError> {
        let root = filter
            .get(root_id)
            .ok_or_else(|| ConversionError::MissingRoot(root_id.to_string()))?;
        Self::check_id(root_id, root)?;

        Ok(Self {
            filter,
            dag: Dag::new(Node::from(root)),
        })
    }

    /// Walks the whole tree below the root and returns the finished graph.
    ///
    /// Children are visited in list order, depth first. Every parent -> child link
    /// becomes an edge, but a child that is already part of the graph is not
    /// descended into again.
    pub(super) fn build(mut self) -> Result<Dag, ConversionError> {
        let root_id = self.dag.root().to_string();
        let root = self.find_node(&root_id, "N/A")?;

        // Pending (child, parent) links; children are pushed reversed so they pop in order.
        let mut stack: Vec<(&'a str, &'a str)> = Vec::new();
        Self::push_children(&mut stack, root);

        while let Some((child_id, parent_id)) = stack.pop() {
            let child = self.find_node(child_id, parent_id)?;
            let first_visit = self.dag.add_node(Node::from(child));
            self.dag.add_edge(parent_id, &child.id);
            if first_visit {
                Self::push_children(&mut stack, child);
            }
        }
        Ok(self.dag)
    }

    fn push_children(stack: &mut Vec<(&'a str, &'a str)>, parent: &'a RawNode) {
        stack.extend(
            parent
                .children
                .iter()
                .rev()
                .map(|child_id| (child_id.as_str(), parent.id.as_str())),
        );
    }

    fn find_node(&self, node_id: &str, parent_id: &str) -> Result<&'a RawNode, ConversionError> {
        let node = self
            .filter
            .get(node_id)
            .ok_or_else(|| ConversionError::NodeNotFound {
                missing_node_id: node_id.to_string(),
                parent_node_id: parent_id.to_string(),
            })?;
        Self::check_id(node_id, node)?;
        Ok(node)
    }

    fn check_id(key: &str, node: &RawNode) -> Result<(), ConversionError> {
        if node.id != key {
            return Err(ConversionError::IdMismatch {
                key: key.to_string(),
                id: node.id.clone(),
            });
        }
        Ok(())
    }
}
