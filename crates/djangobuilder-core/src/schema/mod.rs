//! Schema entities.
//!
//! The ownership tree is Project → App → Model → {Field, Relationship}.
//! Entities are created and mutated only through the methods on
//! [`Project`]; each carries the id of its owner.

mod app;
mod builder;
mod field;
mod ids;
mod model;
mod project;
mod relationship;
mod version;

pub use app::App;
pub use field::Field;
pub use ids::{AppId, FieldId, ModelId, ProjectKey, RelationshipId};
pub use model::{Model, ModelParent, PK_SENTINEL};
pub use project::Project;
pub use relationship::{Relationship, RelationshipTarget};
pub use version::DjangoVersion;
