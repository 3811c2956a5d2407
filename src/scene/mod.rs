//! Minimal retained-mode scene graph.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Each node owns its
//! children by index and keeps a back-link to its parent, so reparenting is a
//! pair of list edits and never leaves a node with two parents.

pub mod bounds;
pub mod graph;

pub use bounds::*;
pub use graph::*;
