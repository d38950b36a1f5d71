//! In-memory record store fed by change events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{RecordError, Result};
use crate::record::{
    AppRecord, EntityType, FieldRecord, ModelRecord, ProjectRecord, RelationshipRecord,
};

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Record created.
    Added,
    /// Record replaced.
    Modified,
    /// Record deleted.
    Removed,
}

/// One change notification from the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordChange {
    /// What happened.
    pub kind: ChangeKind,
    /// Kind of record changed.
    pub entity: EntityType,
    /// Record id.
    pub id: String,
    /// New record contents; absent for removals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RecordChange {
    /// An added record.
    pub fn added(entity: EntityType, id: impl Into<String>, data: Value) -> Self {
        Self {
            kind: ChangeKind::Added,
            entity,
            id: id.into(),
            data: Some(data),
        }
    }

    /// A modified record.
    pub fn modified(entity: EntityType, id: impl Into<String>, data: Value) -> Self {
        Self {
            kind: ChangeKind::Modified,
            entity,
            id: id.into(),
            data: Some(data),
        }
    }

    /// A removed record.
    pub fn removed(entity: EntityType, id: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Removed,
            entity,
            id: id.into(),
            data: None,
        }
    }
}

/// Record ids below a project, app, or model, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeIds {
    /// App record ids.
    pub apps: Vec<String>,
    /// Model record ids.
    pub models: Vec<String>,
    /// Field record ids.
    pub fields: Vec<String>,
    /// Relationship record ids.
    pub relationships: Vec<String>,
}

impl CascadeIds {
    /// Total number of ids collected.
    pub fn len(&self) -> usize {
        self.apps.len() + self.models.len() + self.fields.len() + self.relationships.len()
    }

    /// Check if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every record the consumer currently knows about, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStore {
    /// Project records.
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectRecord>,
    /// App records.
    #[serde(default)]
    pub apps: BTreeMap<String, AppRecord>,
    /// Model records.
    #[serde(default)]
    pub models: BTreeMap<String, ModelRecord>,
    /// Field records.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldRecord>,
    /// Relationship records.
    #[serde(default)]
    pub relationships: BTreeMap<String, RelationshipRecord>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single change notification.
    pub fn apply(&mut self, change: &RecordChange) -> Result<()> {
        debug!(
            kind = ?change.kind,
            entity = %change.entity,
            id = %change.id,
            "Applying record change"
        );
        match change.kind {
            ChangeKind::Added | ChangeKind::Modified => self.apply_upsert(change),
            ChangeKind::Removed => {
                if !self.apply_remove(change.entity, &change.id) {
                    debug!(
                        entity = %change.entity,
                        id = %change.id,
                        "Removed record was not present"
                    );
                }
                Ok(())
            }
        }
    }

    /// Apply a batch of changes in order, stopping at the first failure.
    pub fn apply_batch<'a>(
        &mut self,
        changes: impl IntoIterator<Item = &'a RecordChange>,
    ) -> Result<()> {
        for change in changes {
            self.apply(change)?;
        }
        Ok(())
    }

    fn apply_upsert(&mut self, change: &RecordChange) -> Result<()> {
        let data = change.data.clone().ok_or_else(|| RecordError::InvalidRecord {
            entity: change.entity,
            id: change.id.clone(),
            reason: "added/modified change missing data".to_string(),
        })?;
        let id = change.id.clone();
        match change.entity {
            EntityType::Project => {
                self.projects.insert(id, decode(change, data)?);
            }
            EntityType::App => {
                self.apps.insert(id, decode(change, data)?);
            }
            EntityType::Model => {
                self.models.insert(id, decode(change, data)?);
            }
            EntityType::Field => {
                self.fields.insert(id, decode(change, data)?);
            }
            EntityType::Relationship => {
                self.relationships.insert(id, decode(change, data)?);
            }
        }
        Ok(())
    }

    fn apply_remove(&mut self, entity: EntityType, id: &str) -> bool {
        match entity {
            EntityType::Project => self.projects.remove(id).is_some(),
            EntityType::App => self.apps.remove(id).is_some(),
            EntityType::Model => self.models.remove(id).is_some(),
            EntityType::Field => self.fields.remove(id).is_some(),
            EntityType::Relationship => self.relationships.remove(id).is_some(),
        }
    }

    /// Collect the ids of every record below a project.
    pub fn project_cascade(&self, project_id: &str) -> CascadeIds {
        let mut ids = CascadeIds::default();
        if let Some(project) = self.projects.get(project_id) {
            for app_id in &project.apps {
                self.collect_app(app_id, &mut ids);
            }
        }
        ids
    }

    /// Collect the ids of every record below an app.
    pub fn app_cascade(&self, app_id: &str) -> CascadeIds {
        let mut ids = CascadeIds::default();
        if let Some(app) = self.apps.get(app_id) {
            for model_id in &app.models {
                self.collect_model(model_id, &mut ids);
            }
        }
        ids
    }

    /// Collect the ids of every record below a model.
    pub fn model_cascade(&self, model_id: &str) -> CascadeIds {
        let mut ids = CascadeIds::default();
        if let Some(model) = self.models.get(model_id) {
            ids.fields.extend(model.fields.iter().cloned());
            ids.relationships.extend(model.relationships.iter().cloned());
        }
        ids
    }

    fn collect_app(&self, app_id: &str, ids: &mut CascadeIds) {
        if let Some(app) = self.apps.get(app_id) {
            ids.apps.push(app_id.to_string());
            for model_id in &app.models {
                self.collect_model(model_id, ids);
            }
        }
    }

    fn collect_model(&self, model_id: &str, ids: &mut CascadeIds) {
        if let Some(model) = self.models.get(model_id) {
            ids.models.push(model_id.to_string());
            ids.fields.extend(model.fields.iter().cloned());
            ids.relationships.extend(model.relationships.iter().cloned());
        }
    }

    /// Remove a project and every record below it.
    ///
    /// Returns the descendant ids that were removed.
    pub fn remove_project(&mut self, project_id: &str) -> CascadeIds {
        let ids = self.project_cascade(project_id);
        self.remove_all(&ids);
        self.projects.remove(project_id);
        ids
    }

    /// Remove an app, its models and their members, and unlink it from its project.
    pub fn remove_app(&mut self, app_id: &str) -> CascadeIds {
        let ids = self.app_cascade(app_id);
        self.remove_all(&ids);
        self.apps.remove(app_id);
        for project in self.projects.values_mut() {
            project.apps.retain(|id| id != app_id);
        }
        ids
    }

    /// Remove a model and its members, and unlink it from its app.
    pub fn remove_model(&mut self, model_id: &str) -> CascadeIds {
        let ids = self.model_cascade(model_id);
        self.remove_all(&ids);
        self.models.remove(model_id);
        for app in self.apps.values_mut() {
            app.models.retain(|id| id != model_id);
        }
        ids
    }

    /// Move every record of `other` into this store, replacing records with
    /// the same id.
    pub fn merge(&mut self, other: RecordStore) {
        self.projects.extend(other.projects);
        self.apps.extend(other.apps);
        self.models.extend(other.models);
        self.fields.extend(other.fields);
        self.relationships.extend(other.relationships);
    }

    fn remove_all(&mut self, ids: &CascadeIds) {
        for id in &ids.apps {
            self.apps.remove(id);
        }
        for id in &ids.models {
            self.models.remove(id);
        }
        for id in &ids.fields {
            self.fields.remove(id);
        }
        for id in &ids.relationships {
            self.relationships.remove(id);
        }
    }

    /// Total number of records held.
    pub fn len(&self) -> usize {
        self.projects.len()
            + self.apps.len()
            + self.models.len()
            + self.fields.len()
            + self.relationships.len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode a store from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the store as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn decode<T: serde::de::DeserializeOwned>(change: &RecordChange, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| RecordError::InvalidRecord {
        entity: change.entity,
        id: change.id.clone(),
        reason: e.to_string(),
    })
}
