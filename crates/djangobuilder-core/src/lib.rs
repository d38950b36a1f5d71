//! Django Builder core - schema model, type registries, and derivation rules.
//!
//! A [`Project`] owns its apps, which own models, which own fields and
//! relationships. The graph is built and edited through the methods on
//! `Project`, which enforce naming and reference invariants at each
//! mutation. Static registries describe the legal field types, relationship
//! types, built-in models, and parent base classes, and the rules in
//! [`rules`] derive rendering facts from the graph on demand.

pub mod config;
pub mod error;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod shared;

pub use config::ProjectOptions;
pub use error::{EntityKind, Error, Registry, Result};
pub use registry::{
    last_segment, Backend, BuiltInModel, FieldType, ParentModelType, RelationshipKind,
    RelationshipType,
};
pub use rules::ImportModule;
pub use schema::{
    App, AppId, DjangoVersion, Field, FieldId, Model, ModelId, ModelParent, Project, ProjectKey,
    Relationship, RelationshipId, RelationshipTarget, PK_SENTINEL,
};
pub use shared::SharedProject;
