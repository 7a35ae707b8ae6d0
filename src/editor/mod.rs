//! Structural edits on the graph, and the session that applies them on behalf of a user.

pub mod event;
pub mod session;

pub use event::{GraphEvent, apply_event};
pub use session::{EditSession, EditSessionBuilder};
