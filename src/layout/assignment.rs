use crate::error::LayoutError;
use crate::graph::Dag;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// Computes the rank of every node in a directed acyclic graph.
///
/// Layer 0 holds the nodes without incoming edges; each following layer holds the nodes
/// whose incoming edges all come from earlier layers. Every edge therefore points from a
/// lower layer to a higher one, and every node sits on the layer given by the longest
/// path that reaches it.
pub struct LayerAssignment<'a> {
    nodes: Vec<&'a str>,
    edges: Vec<(&'a str, &'a str)>,
}

impl<'a> LayerAssignment<'a> {
    /// Prepares a layering of `nodes` connected by `edges` (`(source, target)` pairs).
    ///
    /// Edge endpoints that are missing from `nodes` are layered as well.
    pub fn new(
        nodes: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let edges: Vec<_> = edges.into_iter().collect();
        let mut seen = AHashSet::new();
        let nodes = nodes
            .into_iter()
            .chain(edges.iter().flat_map(|&(source, target)| [source, target]))
            .filter(|id| seen.insert(*id))
            .collect();
        Self { nodes, edges }
    }

    pub fn from_dag(dag: &'a Dag) -> Self {
        Self::new(
            dag.node_ids(),
            dag.edges()
                .iter()
                .map(|edge| (edge.source.as_str(), edge.target.as_str())),
        )
    }

    /// Peels the graph layer by layer.
    ///
    /// Fails with `LayoutError::CyclicGraph` if some nodes never lose their incoming
    /// edges, which only happens when they lie on or behind a cycle.
    pub fn assign_layers(&self) -> Result<Layering, LayoutError> {
        let mut in_degree: AHashMap<&str, usize> =
            self.nodes.iter().map(|&id| (id, 0)).collect();
        let mut successors: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for &(source, target) in &self.edges {
            *in_degree.entry(target).or_default() += 1;
            successors.entry(source).or_default().push(target);
        }

        let mut current: Vec<&str> = self
            .nodes
            .iter()
            .copied()
            .filter(|id| in_degree.get(id) == Some(&0))
            .collect();
        let mut layers: Vec<Vec<String>> = Vec::new();
        let mut placed = 0;

        while !current.is_empty() {
            let mut next = Vec::new();
            for &id in &current {
                for &target in successors.get(id).map(Vec::as_slice).unwrap_or_default() {
                    let degree = in_degree.entry(target).or_default();
                    *degree -= 1;
                    if *degree == 0 {
                        next.push(target);
                    }
                }
            }
            placed += current.len();
            layers.push(current.into_iter().map(str::to_string).sorted().collect());
            current = next;
        }

        if placed < self.nodes.len() {
            let unresolved: Vec<String> = in_degree
                .into_iter()
                .filter(|&(_, degree)| degree > 0)
                .map(|(id, _)| id.to_string())
                .sorted()
                .collect();
            log::warn!(
                "Layer assignment stopped with {} unresolved node(s)",
                unresolved.len()
            );
            return Err(LayoutError::CyclicGraph { unresolved });
        }

        Ok(Layering { layers })
    }
}

/// The result of a layer assignment: layers in rank order, each sorted by node id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layering {
    layers: Vec<Vec<String>>,
}

impl Layering {
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.layers.iter().map(Vec::as_slice)
    }

    pub fn layer(&self, index: usize) -> Option<&[String]> {
        self.layers.get(index).map(Vec::as_slice)
    }

    /// Index of the layer holding `id`.
    pub fn layer_of(&self, id: &str) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| layer.iter().any(|member| member == id))
    }

    /// Number of nodes on each layer.
    pub fn sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    pub fn into_layers(self) -> Vec<Vec<String>> {
        self.layers
    }
}
