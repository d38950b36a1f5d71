//! Typed entity identifiers.
//!
//! Every id carries the [`ProjectKey`] of the graph that minted it, so an id
//! handed to the wrong project is detected instead of aliasing a local entity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PROJECT_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a project graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectKey(u64);

impl ProjectKey {
    pub(crate) fn next() -> Self {
        Self(NEXT_PROJECT_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project#{}", self.0)
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            project: ProjectKey,
            index: u32,
        }

        impl $name {
            pub(crate) fn new(project: ProjectKey, index: u32) -> Self {
                Self { project, index }
            }

            /// The project this id was minted by.
            pub fn project(&self) -> ProjectKey {
                self.project
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $prefix, self.index)
            }
        }
    };
}

entity_id!(
    /// Identifies an app within a project.
    AppId,
    "app"
);
entity_id!(
    /// Identifies a model within a project.
    ModelId,
    "model"
);
entity_id!(
    /// Identifies a field within a project.
    FieldId,
    "field"
);
entity_id!(
    /// Identifies a relationship within a project.
    RelationshipId,
    "relationship"
);
