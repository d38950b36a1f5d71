//! Reconstruct project graphs from persisted records.

use std::collections::{BTreeMap, HashMap};

use djangobuilder_core::{
    last_segment, AppId, BuiltInModel, DjangoVersion, Error, FieldId, FieldType, ModelId,
    ModelParent, ParentModelType, Project, ProjectKey, ProjectOptions, Registry, RelationshipId,
    RelationshipTarget, RelationshipType,
};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{RecordError, Result};
use crate::record::{EntityType, ModelRecord, ProjectRecord};
use crate::store::RecordStore;

/// How tolerant a rebuild is of inconsistent records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RebuildConfig {
    /// Fail on dangling child ids, unresolvable relationship targets, and
    /// unknown name fields. When off, these are logged and skipped, and
    /// unknown relationship targets fall back to `auth.User`.
    pub strict: bool,
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl RebuildConfig {
    /// A configuration that logs and skips inconsistent records.
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Set strictness.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Maps graph ids back to the record ids they were built from.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    projects: HashMap<ProjectKey, String>,
    apps: HashMap<AppId, String>,
    models: HashMap<ModelId, String>,
    fields: HashMap<FieldId, String>,
    relationships: HashMap<RelationshipId, String>,
}

impl RecordIndex {
    /// Record id of a project.
    pub fn project(&self, key: ProjectKey) -> Option<&str> {
        self.projects.get(&key).map(String::as_str)
    }

    /// Record id of an app.
    pub fn app(&self, id: AppId) -> Option<&str> {
        self.apps.get(&id).map(String::as_str)
    }

    /// Record id of a model.
    pub fn model(&self, id: ModelId) -> Option<&str> {
        self.models.get(&id).map(String::as_str)
    }

    /// Record id of a field.
    pub fn field(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(String::as_str)
    }

    /// Record id of a relationship.
    pub fn relationship(&self, id: RelationshipId) -> Option<&str> {
        self.relationships.get(&id).map(String::as_str)
    }
}

/// The result of a rebuild.
#[derive(Debug, Clone, Default)]
pub struct Rebuilt {
    /// Projects keyed by record id.
    pub projects: BTreeMap<String, Project>,
    /// Reverse mapping from graph ids to record ids.
    pub index: RecordIndex,
}

/// A model whose cross-model references wait until every model exists.
struct Deferred<'a> {
    model: ModelId,
    record_id: &'a str,
    record: &'a ModelRecord,
}

/// Rebuild every project in `store` from scratch.
#[instrument(skip_all, fields(projects = store.projects.len(), strict = config.strict))]
pub fn rebuild(store: &RecordStore, config: RebuildConfig) -> Result<Rebuilt> {
    let mut rebuilt = Rebuilt::default();
    let mut builder = Builder {
        store,
        config,
        index: &mut rebuilt.index,
    };
    for (project_id, record) in &store.projects {
        let project = builder.project(project_id, record)?;
        rebuilt.projects.insert(project_id.clone(), project);
    }
    info!(projects = rebuilt.projects.len(), "Rebuilt projects from records");
    Ok(rebuilt)
}

/// Rebuild a single project from `store`.
pub fn rebuild_project(
    store: &RecordStore,
    project_id: &str,
    config: RebuildConfig,
) -> Result<(Project, RecordIndex)> {
    let record = store
        .projects
        .get(project_id)
        .ok_or_else(|| RecordError::MissingRecord {
            entity: EntityType::Project,
            id: project_id.to_string(),
            parent: "store".to_string(),
        })?;
    let mut index = RecordIndex::default();
    let project = Builder {
        store,
        config,
        index: &mut index,
    }
    .project(project_id, record)?;
    Ok((project, index))
}

struct Builder<'a> {
    store: &'a RecordStore,
    config: RebuildConfig,
    index: &'a mut RecordIndex,
}

impl<'a> Builder<'a> {
    fn project(&mut self, project_id: &str, record: &'a ProjectRecord) -> Result<Project> {
        let options = ProjectOptions::default()
            .channels(record.channels)
            .htmx(record.htmx)
            .postgres(record.postgres);
        let mut project = Project::new(
            record.name.clone(),
            record.description.clone(),
            DjangoVersion::from_prefix(&record.django_version),
            options,
        );
        self.index.projects.insert(project.key(), project_id.to_string());

        let mut deferred = Vec::new();
        for app_id in &record.apps {
            let Some(app_record) = self.store.apps.get(app_id) else {
                self.missing(EntityType::App, app_id, project_id)?;
                continue;
            };
            let app = project.add_app(app_record.name.clone())?;
            self.index.apps.insert(app, app_id.clone());

            for model_id in &app_record.models {
                let Some(model_record) = self.store.models.get(model_id) else {
                    self.missing(EntityType::Model, model_id, app_id)?;
                    continue;
                };
                let model =
                    project.add_model(app, model_record.name.clone(), model_record.is_abstract)?;
                self.index.models.insert(model, model_id.clone());
                self.fields(&mut project, model, model_id, model_record)?;
                deferred.push(Deferred {
                    model,
                    record_id: model_id,
                    record: model_record,
                });
            }
        }

        for pending in &deferred {
            self.parents(&mut project, pending)?;
            self.relationships(&mut project, pending)?;
        }

        debug!(project = %project.name(), apps = project.apps().len(), "Rebuilt project");
        Ok(project)
    }

    fn fields(
        &mut self,
        project: &mut Project,
        model: ModelId,
        model_id: &str,
        record: &ModelRecord,
    ) -> Result<()> {
        for field_id in &record.fields {
            let Some(field_record) = self.store.fields.get(field_id) else {
                self.missing(EntityType::Field, field_id, model_id)?;
                continue;
            };
            let field_type = FieldType::lookup(last_segment(&field_record.field_type))?;
            let field = project.add_field(
                model,
                field_record.name.clone(),
                field_type,
                field_record.args.clone(),
                field_record.editable,
            )?;
            self.index.fields.insert(field, field_id.clone());
        }

        if let Some(name_field) = &record.name_field {
            let outcome = project.set_name_field(model, name_field);
            self.tolerate(outcome)?;
        }
        if let Some(primary_key) = &record.primary_key {
            let outcome = project.set_primary_key(model, primary_key);
            self.tolerate(outcome)?;
        }
        Ok(())
    }

    fn parents(&mut self, project: &mut Project, pending: &Deferred<'_>) -> Result<()> {
        for raw in &pending.record.parents {
            let parent = match schema_model(project, raw) {
                Some(id) => ModelParent::Model(id),
                None => ModelParent::Framework(ParentModelType::lookup(raw)?),
            };
            project.add_parent(pending.model, parent)?;
        }
        Ok(())
    }

    fn relationships(&mut self, project: &mut Project, pending: &Deferred<'_>) -> Result<()> {
        for relationship_id in &pending.record.relationships {
            let Some(record) = self.store.relationships.get(relationship_id) else {
                self.missing(EntityType::Relationship, relationship_id, pending.record_id)?;
                continue;
            };
            let relationship_type =
                RelationshipType::lookup(last_segment(&record.relationship_type))?;
            let target = self.target(project, relationship_id, &record.to)?;
            let relationship = project.add_relationship(
                pending.model,
                record.name.clone(),
                relationship_type,
                target,
                record.args.clone(),
            )?;
            self.index
                .relationships
                .insert(relationship, relationship_id.clone());
        }
        Ok(())
    }

    /// Resolve a raw target: a built-in class path, then a project model
    /// label, then a built-in label or bare model name.
    ///
    /// Lenient rebuilds match anything else by its last segment against the
    /// built-in models, and fall back to `auth.User`.
    fn target(
        &self,
        project: &Project,
        relationship_id: &str,
        raw: &str,
    ) -> Result<RelationshipTarget> {
        if let Ok(model) = BuiltInModel::lookup(raw) {
            return Ok(RelationshipTarget::BuiltIn(model));
        }
        if let Some(id) = schema_model(project, raw) {
            return Ok(RelationshipTarget::Model(id));
        }
        let exact = BuiltInModel::by_label(raw).or_else(|| BuiltInModel::by_model_name(raw));
        if let Some(model) = exact {
            return Ok(RelationshipTarget::BuiltIn(model));
        }
        if self.config.strict {
            return Err(Error::registry_miss(Registry::BuiltInModel, raw).into());
        }
        let fallback =
            BuiltInModel::by_model_name(last_segment(raw)).unwrap_or_else(BuiltInModel::auth_user);
        warn!(
            relationship = %relationship_id,
            target = %raw,
            resolved = fallback.label,
            "Unresolved relationship target, matched a built-in model loosely"
        );
        Ok(RelationshipTarget::BuiltIn(fallback))
    }

    fn missing(&self, entity: EntityType, id: &str, parent: &str) -> Result<()> {
        let err = RecordError::MissingRecord {
            entity,
            id: id.to_string(),
            parent: parent.to_string(),
        };
        if self.config.strict {
            return Err(err);
        }
        warn!(error = %err, "Skipping dangling record reference");
        Ok(())
    }

    fn tolerate(&self, outcome: djangobuilder_core::Result<()>) -> Result<()> {
        match outcome {
            Err(err) if !self.config.strict => {
                warn!(error = %err, "Ignoring inconsistent model record");
                Ok(())
            }
            other => Ok(other?),
        }
    }
}

/// Find a project model by its exact `"<app>.<Model>"` label.
fn schema_model(project: &Project, raw: &str) -> Option<ModelId> {
    let (app, model) = raw.split_once('.')?;
    if model.contains('.') {
        return None;
    }
    project.find_model(app, model).map(|m| m.id())
}
