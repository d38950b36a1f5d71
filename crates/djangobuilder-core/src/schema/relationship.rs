//! Relationship definitions on a model.

use super::ids::{ModelId, RelationshipId};
use crate::registry::{BuiltInModel, RelationshipType};

/// What a relationship points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipTarget {
    /// Another model in the same project. Non-owning; may dangle after removal.
    Model(ModelId),
    /// A framework-provided model.
    BuiltIn(&'static BuiltInModel),
}

impl From<ModelId> for RelationshipTarget {
    fn from(id: ModelId) -> Self {
        RelationshipTarget::Model(id)
    }
}

impl From<&'static BuiltInModel> for RelationshipTarget {
    fn from(model: &'static BuiltInModel) -> Self {
        RelationshipTarget::BuiltIn(model)
    }
}

/// A reference-valued attribute of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub(crate) id: RelationshipId,
    pub(crate) model: ModelId,
    pub(crate) name: String,
    pub(crate) relationship_type: &'static RelationshipType,
    pub(crate) target: RelationshipTarget,
    pub(crate) args: String,
}

impl Relationship {
    /// Relationship id.
    pub fn id(&self) -> RelationshipId {
        self.id
    }

    /// The owning model.
    pub fn model(&self) -> ModelId {
        self.model
    }

    /// Relationship name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered type of this relationship.
    pub fn relationship_type(&self) -> &'static RelationshipType {
        self.relationship_type
    }

    /// The target, unresolved.
    ///
    /// Use [`Project::related_to`](crate::Project::related_to) for the label.
    pub fn target(&self) -> RelationshipTarget {
        self.target
    }

    /// Construction arguments, verbatim.
    pub fn args(&self) -> &str {
        &self.args
    }
}
