//! Label resolution for relationship targets and parents.
//!
//! Labels are computed on every read. Apps and models can be renamed after a
//! relationship is created, so nothing here is cached.

use crate::error::{EntityKind, Error, Result};
use crate::schema::{ModelId, ModelParent, Project, Relationship, RelationshipTarget};

impl Project {
    /// The `"<app>.<Model>"` label of a model in this project.
    pub fn model_label(&self, id: ModelId) -> Result<String> {
        let model = self.model_ref(id)?;
        let app = self.app(model.app()).ok_or_else(|| Error::ReferenceNotFound {
            kind: EntityKind::App,
            id: model.app().to_string(),
        })?;
        Ok(format!("{}.{}", app.name(), model.name()))
    }

    /// Resolve the label a relationship's target is rendered with.
    ///
    /// Model targets yield `"<app>.<Model>"`; built-in targets yield their
    /// registered label verbatim. A removed model target fails with
    /// [`Error::ReferenceNotFound`].
    pub fn related_to(&self, relationship: &Relationship) -> Result<String> {
        match relationship.target() {
            RelationshipTarget::Model(id) => self.model_label(id),
            RelationshipTarget::BuiltIn(model) => Ok(model.label.to_string()),
        }
    }

    /// Resolve the class a model parent is rendered with.
    ///
    /// Project models yield their label; framework bases their full class.
    pub fn parent_label(&self, parent: &ModelParent) -> Result<String> {
        match parent {
            ModelParent::Model(id) => self.model_label(*id),
            ModelParent::Framework(base) => Ok(base.class.to_string()),
        }
    }
}
