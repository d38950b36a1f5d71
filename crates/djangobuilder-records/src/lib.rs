//! Django Builder records - flat persisted records and graph reconstruction.
//!
//! Projects are persisted as one record per entity, linked by id lists.
//! [`RecordStore`] applies change notifications to keep a local copy of
//! those records, [`rebuild`] turns them back into project graphs, and
//! [`snapshot`] flattens a graph into records.

pub mod error;
pub mod rebuild;
pub mod record;
pub mod snapshot;
pub mod store;

pub use error::{RecordError, Result};
pub use rebuild::{rebuild, rebuild_project, RebuildConfig, Rebuilt, RecordIndex};
pub use record::{
    AppRecord, EntityType, FieldRecord, ModelRecord, ProjectRecord, RelationshipRecord,
};
pub use snapshot::{snapshot, snapshot_into};
pub use store::{CascadeIds, ChangeKind, RecordChange, RecordStore};
