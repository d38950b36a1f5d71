//! Framework base classes a model may inherit from.

use crate::error::{Error, Registry, Result};

/// A recognized external base class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentModelType {
    /// Registry key.
    pub key: &'static str,
    /// Category tag, e.g. `django`.
    pub category: &'static str,
    /// Fully qualified class name.
    pub class: &'static str,
}

static PARENT_MODEL_TYPES: [ParentModelType; 2] = [
    ParentModelType {
        key: "django.contrib.auth.models.AbstractUser",
        category: "django",
        class: "django.contrib.auth.models.AbstractUser",
    },
    ParentModelType {
        key: "django.contrib.auth.models.AbstractBaseUser",
        category: "django",
        class: "django.contrib.auth.models.AbstractBaseUser",
    },
];

impl ParentModelType {
    /// Look up a parent type by registry key.
    pub fn lookup(key: &str) -> Result<&'static ParentModelType> {
        PARENT_MODEL_TYPES
            .iter()
            .find(|p| p.key == key)
            .ok_or_else(|| Error::registry_miss(Registry::ParentModelType, key))
    }

    /// All registered parent types.
    pub fn all() -> &'static [ParentModelType] {
        &PARENT_MODEL_TYPES
    }

    /// The bare class name, e.g. `AbstractUser`.
    pub fn class_name(&self) -> &'static str {
        self.class.rsplit('.').next().unwrap_or(self.class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let parent = ParentModelType::lookup("django.contrib.auth.models.AbstractUser").unwrap();
        assert_eq!(parent.category, "django");
        assert_eq!(parent.class_name(), "AbstractUser");
    }

    #[test]
    fn test_lookup_miss() {
        let err = ParentModelType::lookup("AbstractUser").unwrap_err();
        assert!(matches!(
            err,
            Error::RegistryKeyNotFound {
                registry: Registry::ParentModelType,
                ..
            }
        ));
    }
}
