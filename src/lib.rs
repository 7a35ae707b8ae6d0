//! # Jouken - Filter Condition Graph Engine
//!
//! **Jouken** keeps a tree of boolean filter conditions (for example
//! `main.applicant.age < 20`) in two shapes: the flat, children-listing document it is
//! stored in, and a node/edge graph that an editor can render and change.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse the stored `FilterDocument` (`root_id` plus the `filter` map).
//! 2.  **Deserialize**: Turn it into a `Dag` with `convert::deserialize`. A condition
//!     shared by several parents becomes one node with several incoming edges.
//! 3.  **Edit**: Apply `GraphEvent`s, directly on the `Dag` or through an `EditSession`
//!     which guards the root, validates new edges and keeps undo history.
//! 4.  **Layer**: Rank the nodes with `LayerAssignment` so a renderer can place them.
//! 5.  **Serialize**: Write the graph back with `convert::serialize`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jouken::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     // 1. Start from the seed tree (or `FilterDocument::from_file`).
//!     let document = FilterDocument::sample();
//!
//!     // 2. Build the graph and open an editing session on it.
//!     let mut session = EditSession::load(&document)?;
//!
//!     // 3. Add a condition and hang it below the root.
//!     let id = session.add_condition("main.applicant.income", Operator::GreaterThan, "5000");
//!     session.connect("1", &id)?;
//!
//!     // The root is protected.
//!     assert!(session.apply(GraphEvent::remove_node("1")).is_err());
//!
//!     // 4. Rank the conditions for display.
//!     let layers = session.layers()?;
//!     println!("{}", render_layers(&layers, session.graph()));
//!
//!     // 5. Store the result.
//!     let updated = session.to_document()?;
//!     println!("{}", updated.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

pub mod convert;
pub mod editor;
pub mod error;
pub mod filter;
pub mod graph;
pub mod layout;
pub mod prelude;
pub mod snapshot;
