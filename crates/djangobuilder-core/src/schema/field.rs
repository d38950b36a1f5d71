//! Field definitions on a model.

use super::ids::{FieldId, ModelId};
use crate::registry::FieldType;
use crate::rules::ImportModule;

/// A scalar attribute of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub(crate) id: FieldId,
    pub(crate) model: ModelId,
    pub(crate) name: String,
    pub(crate) field_type: &'static FieldType,
    pub(crate) args: String,
    pub(crate) editable: bool,
}

impl Field {
    /// Field id.
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The owning model.
    pub fn model(&self) -> ModelId {
        self.model
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered type of this field.
    pub fn field_type(&self) -> &'static FieldType {
        self.field_type
    }

    /// Construction arguments, verbatim.
    pub fn args(&self) -> &str {
        &self.args
    }

    /// Whether forms should expose this field.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Module the field class must be imported from.
    pub fn import_module(&self) -> ImportModule {
        ImportModule::for_type(self.field_type)
    }

    /// Check if this field needs the PostgreSQL extension.
    pub fn is_postgres_field(&self) -> bool {
        self.field_type.is_postgres()
    }
}
