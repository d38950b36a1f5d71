//! Model definitions.

use super::field::Field;
use super::ids::{AppId, FieldId, ModelId, RelationshipId};
use super::relationship::Relationship;
use crate::registry::ParentModelType;

/// Sentinel used for the primary key and name field until one is chosen.
pub const PK_SENTINEL: &str = "pk";

/// A base class a model inherits from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelParent {
    /// Another model in the same project.
    Model(ModelId),
    /// A recognized Django base class.
    Framework(&'static ParentModelType),
}

impl From<ModelId> for ModelParent {
    fn from(id: ModelId) -> Self {
        ModelParent::Model(id)
    }
}

impl From<&'static ParentModelType> for ModelParent {
    fn from(parent: &'static ParentModelType) -> Self {
        ModelParent::Framework(parent)
    }
}

/// A data-record definition owned by an app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub(crate) id: ModelId,
    pub(crate) app: AppId,
    pub(crate) name: String,
    pub(crate) is_abstract: bool,
    pub(crate) fields: Vec<Field>,
    pub(crate) relationships: Vec<Relationship>,
    pub(crate) parents: Vec<ModelParent>,
    pub(crate) primary_key: String,
    pub(crate) name_field: String,
    pub(crate) related_name: String,
}

impl Model {
    pub(crate) fn new(id: ModelId, app: AppId, name: String, is_abstract: bool) -> Self {
        Self {
            id,
            app,
            related_name: name.clone(),
            name,
            is_abstract,
            fields: Vec::new(),
            relationships: Vec::new(),
            parents: Vec::new(),
            primary_key: PK_SENTINEL.to_string(),
            name_field: PK_SENTINEL.to_string(),
        }
    }

    /// Model id.
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// The owning app.
    pub fn app(&self) -> AppId {
        self.app
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is an abstract base model.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Relationships in declaration order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Declared parents.
    pub fn parents(&self) -> &[ModelParent] {
        &self.parents
    }

    /// Primary key field name, `"pk"` unless set.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Display field name, `"pk"` unless set.
    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    /// Reverse accessor name, defaults to the model name.
    pub fn related_name(&self) -> &str {
        &self.related_name
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get a relationship by name.
    pub fn get_relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// Get a field by id.
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Get a relationship by id.
    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Fields the generated forms should expose.
    pub fn editable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.editable)
    }

    /// Check if any field or relationship already uses `name`.
    pub(crate) fn has_member(&self, name: &str) -> bool {
        self.get_field(name).is_some() || self.get_relationship(name).is_some()
    }
}
