pub mod document;
pub mod model;

pub use document::*;
pub use model::*;
