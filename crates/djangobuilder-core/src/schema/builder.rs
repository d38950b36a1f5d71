//! Mutation operations on a project graph.
//!
//! Every operation validates before touching the graph, so a failed call
//! leaves the project exactly as it was.

use tracing::debug;

use super::app::App;
use super::field::Field;
use super::ids::{AppId, FieldId, ModelId, RelationshipId};
use super::model::{Model, ModelParent, PK_SENTINEL};
use super::project::Project;
use super::relationship::{Relationship, RelationshipTarget};
use crate::error::{EntityKind, Error, Result};
use crate::registry::{FieldType, RelationshipType};

/// Reject names that cannot appear as a dotted label segment.
fn validate_name(kind: EntityKind, name: &str) -> Result<()> {
    if name.is_empty() || name.contains('.') || name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

impl Project {
    /// Add an app to the project.
    pub fn add_app(&mut self, name: impl Into<String>) -> Result<AppId> {
        let name = name.into();
        validate_name(EntityKind::App, &name)?;
        if self.find_app(&name).is_some() {
            return Err(Error::DuplicateName {
                kind: EntityKind::App,
                name,
                scope: self.name.clone(),
            });
        }

        let id = AppId::new(self.key, self.next_index());
        debug!(project = %self.name, app = %name, "Added app");
        self.apps.push(App::new(id, name));
        Ok(id)
    }

    /// Add a model to an app.
    pub fn add_model(
        &mut self,
        app: AppId,
        name: impl Into<String>,
        is_abstract: bool,
    ) -> Result<ModelId> {
        let name = name.into();
        validate_name(EntityKind::Model, &name)?;
        let owner = self.app_mut(app)?;
        if owner.get_model(&name).is_some() {
            return Err(Error::DuplicateName {
                kind: EntityKind::Model,
                name,
                scope: owner.name.clone(),
            });
        }

        let id = ModelId::new(self.key, self.next_index());
        let owner = self.app_mut(app)?;
        debug!(app = %owner.name, model = %name, is_abstract, "Added model");
        owner.models.push(Model::new(id, app, name, is_abstract));
        Ok(id)
    }

    /// Add a field to a model.
    pub fn add_field(
        &mut self,
        model: ModelId,
        name: impl Into<String>,
        field_type: &'static FieldType,
        args: impl Into<String>,
        editable: bool,
    ) -> Result<FieldId> {
        let name = name.into();
        validate_name(EntityKind::Field, &name)?;
        self.check_member_free(model, EntityKind::Field, &name)?;

        let id = FieldId::new(self.key, self.next_index());
        let owner = self.model_mut(model)?;
        debug!(model = %owner.name, field = %name, field_type = field_type.key, "Added field");
        owner.fields.push(Field {
            id,
            model,
            name,
            field_type,
            args: args.into(),
            editable,
        });
        Ok(id)
    }

    /// Add a relationship to a model.
    ///
    /// A model target must belong to this project and still exist.
    pub fn add_relationship(
        &mut self,
        model: ModelId,
        name: impl Into<String>,
        relationship_type: &'static RelationshipType,
        target: impl Into<RelationshipTarget>,
        args: impl Into<String>,
    ) -> Result<RelationshipId> {
        let name = name.into();
        let target = target.into();
        validate_name(EntityKind::Relationship, &name)?;
        self.check_member_free(model, EntityKind::Relationship, &name)?;
        if let RelationshipTarget::Model(target_id) = target {
            self.model_ref(target_id)?;
        }

        let id = RelationshipId::new(self.key, self.next_index());
        let owner = self.model_mut(model)?;
        debug!(
            model = %owner.name,
            relationship = %name,
            relationship_type = relationship_type.key,
            "Added relationship"
        );
        owner.relationships.push(Relationship {
            id,
            model,
            name,
            relationship_type,
            target,
            args: args.into(),
        });
        Ok(id)
    }

    /// Choose the field used to display instances of a model.
    ///
    /// Fails with [`Error::FieldNotFound`] if the model has no such field.
    pub fn set_name_field(&mut self, model: ModelId, field_name: &str) -> Result<()> {
        let owner = self.model_mut(model)?;
        require_field(owner, field_name)?;
        owner.name_field = field_name.to_string();
        Ok(())
    }

    /// Choose the primary key field of a model.
    pub fn set_primary_key(&mut self, model: ModelId, field_name: &str) -> Result<()> {
        let owner = self.model_mut(model)?;
        require_field(owner, field_name)?;
        owner.primary_key = field_name.to_string();
        Ok(())
    }

    /// Set the reverse accessor name of a model.
    pub fn set_related_name(
        &mut self,
        model: ModelId,
        related_name: impl Into<String>,
    ) -> Result<()> {
        let related_name = related_name.into();
        validate_name(EntityKind::Model, &related_name)?;
        self.model_mut(model)?.related_name = related_name;
        Ok(())
    }

    /// Declare a base class for a model. Adding the same parent twice is a no-op.
    pub fn add_parent(&mut self, model: ModelId, parent: impl Into<ModelParent>) -> Result<()> {
        let parent = parent.into();
        if let ModelParent::Model(parent_id) = parent {
            self.model_ref(parent_id)?;
            if parent_id == model {
                return Err(Error::SelfParent {
                    model: self.model_ref(model)?.name.clone(),
                });
            }
        }

        let owner = self.model_mut(model)?;
        if !owner.parents.contains(&parent) {
            owner.parents.push(parent);
        }
        Ok(())
    }

    /// Rename an app. Labels of relationships into it change on next read.
    pub fn rename_app(&mut self, app: AppId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(EntityKind::App, &name)?;
        self.check_app(app)?;
        if self.apps.iter().any(|a| a.name == name && a.id != app) {
            return Err(Error::DuplicateName {
                kind: EntityKind::App,
                name,
                scope: self.name.clone(),
            });
        }

        let owner = self.app_mut(app)?;
        debug!(from = %owner.name, to = %name, "Renamed app");
        owner.name = name;
        Ok(())
    }

    /// Rename a model.
    pub fn rename_model(&mut self, model: ModelId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(EntityKind::Model, &name)?;
        let app = self.model_ref(model)?.app;
        let clashes = self
            .app(app)
            .map(|a| a.models.iter().any(|m| m.name == name && m.id != model))
            .unwrap_or(false);
        if clashes {
            return Err(Error::DuplicateName {
                kind: EntityKind::Model,
                name,
                scope: self.app(app).map(|a| a.name.clone()).unwrap_or_default(),
            });
        }

        let owner = self.model_mut(model)?;
        debug!(from = %owner.name, to = %name, "Renamed model");
        owner.name = name;
        Ok(())
    }

    /// Remove an app with all its models.
    pub fn remove_app(&mut self, app: AppId) -> Result<App> {
        self.check_app(app)?;
        let position = self
            .apps
            .iter()
            .position(|a| a.id == app)
            .ok_or_else(|| Error::ReferenceNotFound {
                kind: EntityKind::App,
                id: app.to_string(),
            })?;
        let removed = self.apps.remove(position);
        debug!(app = %removed.name, models = removed.models.len(), "Removed app");
        Ok(removed)
    }

    /// Remove a model with its fields and relationships.
    ///
    /// Relationships elsewhere that target it are left dangling; see
    /// [`dangling_relationships`](Self::dangling_relationships).
    pub fn remove_model(&mut self, model: ModelId) -> Result<Model> {
        let app = self.model_ref(model)?.app;
        let owner = self.app_mut(app)?;
        let position = owner
            .models
            .iter()
            .position(|m| m.id == model)
            .ok_or_else(|| Error::ReferenceNotFound {
                kind: EntityKind::Model,
                id: model.to_string(),
            })?;
        let removed = owner.models.remove(position);
        debug!(model = %removed.name, "Removed model");
        Ok(removed)
    }

    /// Remove a field. A name field or primary key naming it falls back to `"pk"`.
    pub fn remove_field(&mut self, field: FieldId) -> Result<Field> {
        let model = self
            .field(field)
            .map(|f| f.model)
            .ok_or_else(|| Error::ReferenceNotFound {
                kind: EntityKind::Field,
                id: field.to_string(),
            })?;
        let owner = self.model_mut(model)?;
        let position = owner
            .fields
            .iter()
            .position(|f| f.id == field)
            .ok_or_else(|| Error::ReferenceNotFound {
                kind: EntityKind::Field,
                id: field.to_string(),
            })?;
        let removed = owner.fields.remove(position);
        debug!(model = %owner.name, field = %removed.name, "Removed field");
        if owner.name_field == removed.name {
            owner.name_field = PK_SENTINEL.to_string();
        }
        if owner.primary_key == removed.name {
            owner.primary_key = PK_SENTINEL.to_string();
        }
        Ok(removed)
    }

    /// Remove a relationship.
    pub fn remove_relationship(&mut self, relationship: RelationshipId) -> Result<Relationship> {
        let model = self
            .relationship(relationship)
            .map(|r| r.model)
            .ok_or_else(|| Error::ReferenceNotFound {
                kind: EntityKind::Relationship,
                id: relationship.to_string(),
            })?;
        let owner = self.model_mut(model)?;
        let position = owner
            .relationships
            .iter()
            .position(|r| r.id == relationship)
            .ok_or_else(|| Error::ReferenceNotFound {
                kind: EntityKind::Relationship,
                id: relationship.to_string(),
            })?;
        let removed = owner.relationships.remove(position);
        debug!(model = %owner.name, relationship = %removed.name, "Removed relationship");
        Ok(removed)
    }

    /// Relationships whose model target no longer exists.
    pub fn dangling_relationships(&self) -> Vec<RelationshipId> {
        self.models()
            .flat_map(|m| m.relationships.iter())
            .filter(|r| match r.target {
                RelationshipTarget::Model(target) => self.model(target).is_none(),
                RelationshipTarget::BuiltIn(_) => false,
            })
            .map(|r| r.id)
            .collect()
    }

    fn check_member_free(&self, model: ModelId, kind: EntityKind, name: &str) -> Result<()> {
        let owner = self.model_ref(model)?;
        if owner.has_member(name) {
            return Err(Error::DuplicateName {
                kind,
                name: name.to_string(),
                scope: owner.name.clone(),
            });
        }
        Ok(())
    }
}

fn require_field(model: &Model, field_name: &str) -> Result<()> {
    if model.get_field(field_name).is_none() {
        return Err(Error::FieldNotFound {
            field: field_name.to_string(),
            model: model.name.clone(),
        });
    }
    Ok(())
}
