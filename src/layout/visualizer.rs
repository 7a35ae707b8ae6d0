use super::assignment::Layering;
use crate::graph::Dag;
use itertools::Itertools;
use std::fmt::Write;

/// Formats a layering into a human-readable listing of each rank and its conditions.
pub fn render_layers(layering: &Layering, dag: &Dag) -> String {
    let mut output = String::new();
    writeln!(
        &mut output,
        "======== LAYERS for root: {} ({} layer(s), sizes [{}]) ========",
        dag.root(),
        layering.len(),
        layering.sizes().iter().join(", ")
    )
    .unwrap();

    for (index, layer) in layering.iter().enumerate() {
        writeln!(&mut output, "\n--- LAYER {} ---", index).unwrap();
        for id in layer {
            let line = match dag.get_node(id) {
                Some(node) => format!("{:<12} {}", id, node),
                None => format!("{:<12} <unknown>", id),
            };
            let children = dag.children_of(id).join(", ");
            if children.is_empty() {
                writeln!(&mut output, "{}", line).unwrap();
            } else {
                writeln!(&mut output, "{:<48} -> [{}]", line, children).unwrap();
            }
        }
    }

    writeln!(&mut output, "\n================ END OF LAYERS ================").unwrap();
    output
}
