//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the jouken
//! crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use jouken::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = FilterDocument::from_file("path/to/filter.json")?;
//! let mut session = EditSession::load(&document)?;
//!
//! session.connect("1", "7")?;
//! for (index, layer) in session.layers()?.iter().enumerate() {
//!     println!("Layer {}: {:?}", index, layer);
//! }
//!
//! session.to_document()?.save("path/to/filter.json")?;
//! # Ok(())
//! # }
//! ```

// Conversion
pub use crate::convert::{deserialize, serialize};

// Storage format
pub use crate::filter::{FilterDocument, FilterMap, Operator, RawNode, Status};

// Graph model and edits
pub use crate::editor::{EditSession, GraphEvent, apply_event};
pub use crate::graph::{Dag, Edge, GraphElement, Node};

// Layering
pub use crate::layout::{LayerAssignment, Layering, render_layers};

// Snapshots
pub use crate::snapshot::SessionSnapshot;

// Error types
pub use crate::error::{
    ConversionError, DocumentError, EditError, GraphError, LayoutError, SnapshotError,
    UnknownOperator,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
