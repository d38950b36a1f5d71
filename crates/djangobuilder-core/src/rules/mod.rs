//! Derivation rules.
//!
//! Pure computations a renderer queries to decide how to emit an entity:
//! import routing, target labels, and middleware composition. None of them
//! mutate the graph.

mod imports;
mod labels;
pub mod middleware;

pub use imports::ImportModule;
