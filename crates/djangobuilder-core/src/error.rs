//! Core error types.

use std::fmt;

use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The registry a failed lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    /// Field type registry.
    FieldType,
    /// Relationship type registry.
    RelationshipType,
    /// Built-in model registry.
    BuiltInModel,
    /// Parent model type registry.
    ParentModelType,
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Registry::FieldType => "field type",
            Registry::RelationshipType => "relationship type",
            Registry::BuiltInModel => "built-in model",
            Registry::ParentModelType => "parent model type",
        };
        f.write_str(name)
    }
}

/// Kind of schema entity, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// An app.
    App,
    /// A model.
    Model,
    /// A field.
    Field,
    /// A relationship.
    Relationship,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::App => "app",
            EntityKind::Model => "model",
            EntityKind::Field => "field",
            EntityKind::Relationship => "relationship",
        };
        f.write_str(name)
    }
}

/// Schema errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A field name does not exist on the model it was looked up on.
    #[error("{field} is not a field on the model {model}")]
    FieldNotFound {
        /// The missing field name.
        field: String,
        /// Name of the model searched.
        model: String,
    },

    /// An entity id does not resolve inside the project (e.g. it was removed).
    #[error("{kind} {id} not found")]
    ReferenceNotFound {
        /// Kind of the missing entity.
        kind: EntityKind,
        /// Display form of the id.
        id: String,
    },

    /// A registry has no entry for the given key.
    #[error("unknown {registry} key: {key}")]
    RegistryKeyNotFound {
        /// The registry searched.
        registry: Registry,
        /// The key that missed.
        key: String,
    },

    /// Two siblings in the same scope share a name.
    #[error("duplicate {kind} name '{name}' in {scope}")]
    DuplicateName {
        /// Kind of the entity being added.
        kind: EntityKind,
        /// The clashing name.
        name: String,
        /// Name of the owning scope.
        scope: String,
    },

    /// A name cannot be used as a Python identifier segment.
    #[error("invalid {kind} name '{name}'")]
    InvalidName {
        /// Kind of the entity being named.
        kind: EntityKind,
        /// The rejected name.
        name: String,
    },

    /// An id from another project graph was passed in.
    #[error("{kind} {id} belongs to a different project")]
    ForeignReference {
        /// Kind of the referenced entity.
        kind: EntityKind,
        /// Display form of the id.
        id: String,
    },

    /// A model was declared as its own parent.
    #[error("model {model} cannot be its own parent")]
    SelfParent {
        /// Name of the model.
        model: String,
    },
}

impl Error {
    /// Build a registry miss for `key`.
    pub fn registry_miss(registry: Registry, key: impl Into<String>) -> Self {
        Error::RegistryKeyNotFound {
            registry,
            key: key.into(),
        }
    }

    /// Check if this error is a structural invariant violation.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::DuplicateName { .. }
                | Error::InvalidName { .. }
                | Error::ForeignReference { .. }
                | Error::SelfParent { .. }
        )
    }

    /// Check if this error is a missing reference.
    pub fn is_reference_not_found(&self) -> bool {
        matches!(
            self,
            Error::FieldNotFound { .. } | Error::ReferenceNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_not_found_message() {
        let err = Error::FieldNotFound {
            field: "title".into(),
            model: "Post".into(),
        };
        assert_eq!(err.to_string(), "title is not a field on the model Post");
        assert!(err.is_reference_not_found());
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_registry_miss_message() {
        let err = Error::registry_miss(Registry::FieldType, "MoneyField");
        assert_eq!(err.to_string(), "unknown field type key: MoneyField");
    }

    #[test]
    fn test_invariant_classification() {
        let err = Error::DuplicateName {
            kind: EntityKind::Model,
            name: "Order".into(),
            scope: "shop".into(),
        };
        assert!(err.is_invariant_violation());
        assert_eq!(err.to_string(), "duplicate model name 'Order' in shop");
    }
}
