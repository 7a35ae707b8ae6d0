//! Rank assignment for presenting the graph in layers.

pub mod assignment;
pub mod visualizer;

pub use assignment::{LayerAssignment, Layering};
pub use visualizer::render_layers;
