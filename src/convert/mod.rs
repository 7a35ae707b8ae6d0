//! Conversion between the stored filter tree and the editable graph.
//!
//! The stored form lists the children of every condition; the graph form keeps
//! conditions and connections apart. Both directions walk depth first from the root,
//! children in listed order, so the same input always produces the same visit order.

use crate::error::ConversionError;
use crate::filter::{FilterDocument, FilterMap};
use crate::graph::Dag;

mod builder;
mod writer;

use builder::DagBuilder;
use writer::FilterWriter;

/// Builds the graph for the filter tree rooted at `root_id`.
///
/// A condition listed as the child of several parents is stored once and receives one
/// edge per parent. Fails if the root or any listed child is missing from `filter`.
pub fn deserialize(root_id: &str, filter: &FilterMap) -> Result<Dag, ConversionError> {
    let dag = DagBuilder::new(root_id, filter)?.build()?;
    log::debug!(
        "Deserialized filter rooted at '{}': {} node(s), {} edge(s)",
        root_id,
        dag.node_count(),
        dag.edge_count()
    );
    Ok(dag)
}

/// Writes the graph back into the stored filter format.
///
/// Every reachable condition is emitted once with `status` reset to idle. Conditions
/// that cannot be reached from the root are left out.
pub fn serialize(dag: &Dag) -> Result<FilterDocument, ConversionError> {
    let document = FilterWriter::new(dag).write()?;
    log::debug!(
        "Serialized graph rooted at '{}': {} condition(s)",
        document.root_id,
        document.filter.len()
    );
    Ok(document)
}

impl Dag {
    /// Shorthand for [`serialize`].
    pub fn to_document(&self) -> Result<FilterDocument, ConversionError> {
        serialize(self)
    }
}
