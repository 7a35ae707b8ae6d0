pub mod dag;
pub mod types;

pub use dag::Dag;
pub use types::{Edge, GraphElement, Node};
