use crate::error::ConversionError;
use crate::filter::{FilterDocument, FilterMap, RawNode, Status};
use crate::graph::Dag;
use ahash::AHashMap;

/// Responsible for writing a `Dag` back into the stored filter format.
pub(super) struct FilterWriter<'a> {
    dag: &'a Dag,
    children: AHashMap<&'a str, Vec<&'a str>>,
    filter: FilterMap,
}

impl<'a> FilterWriter<'a> {
    pub(super) fn new(dag: &'a Dag) -> Self {
        let mut children: AHashMap<&'a str, Vec<&'a str>> = AHashMap::new();
        for edge in dag.edges() {
            children
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }

        Self {
            dag,
            children,
            filter: FilterMap::new(),
        }
    }

    /// Walks the graph from its root and returns the stored document.
    pub(super) fn write(mut self) -> Result<FilterDocument, ConversionError> {
        let dag = self.dag;
        let root = dag.root();
        if !dag.has_node(root) {
            return Err(ConversionError::MissingRoot(root.to_string()));
        }
        self.walk(root)?;

        let skipped = dag.node_count() - self.filter.len();
        if skipped > 0 {
            log::debug!(
                "Dropped {} node(s) not reachable from root '{}'",
                skipped,
                root
            );
        }

        Ok(FilterDocument::new(root, self.filter))
    }

    /// Converts every node reachable from `root`, depth first in edge order. Nodes that
    /// were already written are left untouched.
    fn walk(&mut self, root: &'a str) -> Result<(), ConversionError> {
        let dag = self.dag;
        let mut stack: Vec<(&'a str, Option<&'a str>)> = vec![(root, None)];

        while let Some((node_id, parent_id)) = stack.pop() {
            if self.filter.contains_key(node_id) {
                continue;
            }
            let Some(node) = dag.get_node(node_id) else {
                match parent_id {
                    Some(parent_id) => {
                        return Err(ConversionError::NodeNotFound {
                            missing_node_id: node_id.to_string(),
                            parent_node_id: parent_id.to_string(),
                        });
                    }
                    None => continue,
                }
            };
            let children: &[&'a str] = self
                .children
                .get(node_id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            self.filter.insert(
                node.id.clone(),
                RawNode {
                    id: node.id.clone(),
                    parameter: node.parameter.clone(),
                    operator: node.operator,
                    value: node.value.clone(),
                    children: children.iter().map(|c| c.to_string()).collect(),
                    status: Status::Idle,
                },
            );

            stack.extend(children.iter().rev().map(|&child_id| (child_id, Some(node_id))));
        }
        Ok(())
    }
}
