//! Flatten a project graph into records.

use djangobuilder_core::{Model, ModelParent, Project, RelationshipTarget, PK_SENTINEL};
use tracing::debug;

use crate::error::Result;
use crate::record::{AppRecord, FieldRecord, ModelRecord, ProjectRecord, RelationshipRecord};
use crate::store::RecordStore;

/// Snapshot a project into a fresh store, under `project_id`.
pub fn snapshot(project: &Project, project_id: &str) -> Result<RecordStore> {
    let mut store = RecordStore::new();
    snapshot_into(project, project_id, &mut store)?;
    Ok(store)
}

/// Write a project's records into `store`, replacing any earlier snapshot
/// under the same id.
///
/// Child record ids are derived from `project_id` and the graph ids, so
/// repeated snapshots of the same graph are stable. On error `store` is left
/// untouched.
pub fn snapshot_into(project: &Project, project_id: &str, store: &mut RecordStore) -> Result<()> {
    let mut scratch = RecordStore::new();
    write_records(project, project_id, &mut scratch)?;

    store.remove_project(project_id);
    store.merge(scratch);
    debug!(
        project = %project.name(),
        id = %project_id,
        records = store.len(),
        "Snapshotted project"
    );
    Ok(())
}

fn write_records(project: &Project, project_id: &str, store: &mut RecordStore) -> Result<()> {
    let mut record = ProjectRecord {
        name: project.name().to_string(),
        description: project.description().to_string(),
        django_version: project.version().to_string(),
        channels: project.channels(),
        htmx: project.htmx(),
        postgres: project.postgres(),
        apps: Vec::with_capacity(project.apps().len()),
    };

    for app in project.apps() {
        let app_id = format!("{project_id}-{}", app.id());
        let mut app_record = AppRecord {
            name: app.name().to_string(),
            models: Vec::with_capacity(app.models().len()),
        };
        for model in app.models() {
            let model_id = format!("{project_id}-{}", model.id());
            let model_record = model_record(project, project_id, model, store)?;
            store.models.insert(model_id.clone(), model_record);
            app_record.models.push(model_id);
        }
        store.apps.insert(app_id.clone(), app_record);
        record.apps.push(app_id);
    }

    store.projects.insert(project_id.to_string(), record);
    Ok(())
}

fn model_record(
    project: &Project,
    project_id: &str,
    model: &Model,
    store: &mut RecordStore,
) -> Result<ModelRecord> {
    let mut record = ModelRecord {
        name: model.name().to_string(),
        is_abstract: model.is_abstract(),
        fields: Vec::with_capacity(model.fields().len()),
        relationships: Vec::with_capacity(model.relationships().len()),
        parents: Vec::with_capacity(model.parents().len()),
        name_field: chosen(model.name_field()),
        primary_key: chosen(model.primary_key()),
    };

    for field in model.fields() {
        let id = format!("{project_id}-{}", field.id());
        store.fields.insert(
            id.clone(),
            FieldRecord {
                name: field.name().to_string(),
                field_type: field.field_type().class_path.to_string(),
                args: field.args().to_string(),
                editable: field.is_editable(),
            },
        );
        record.fields.push(id);
    }

    for relationship in model.relationships() {
        let to = match relationship.target() {
            RelationshipTarget::Model(_) => project.related_to(relationship)?,
            RelationshipTarget::BuiltIn(builtin) => builtin.key.to_string(),
        };
        let id = format!("{project_id}-{}", relationship.id());
        store.relationships.insert(
            id.clone(),
            RelationshipRecord {
                name: relationship.name().to_string(),
                relationship_type: relationship.relationship_type().class_path.to_string(),
                to,
                args: relationship.args().to_string(),
            },
        );
        record.relationships.push(id);
    }

    for parent in model.parents() {
        let raw = match parent {
            ModelParent::Model(_) => project.parent_label(parent)?,
            ModelParent::Framework(framework) => framework.key.to_string(),
        };
        record.parents.push(raw);
    }

    Ok(record)
}

fn chosen(value: &str) -> Option<String> {
    (value != PK_SENTINEL).then(|| value.to_string())
}
