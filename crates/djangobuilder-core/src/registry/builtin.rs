//! Framework-provided models usable as relationship targets.

use crate::error::{Error, Registry, Result};

/// A model shipped with Django rather than defined in the user's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltInModel {
    /// Registry key (the fully qualified class).
    pub key: &'static str,
    /// App label form, e.g. `auth.User`.
    pub label: &'static str,
    /// Bare model name, e.g. `User`.
    pub model: &'static str,
    /// Field name and test value pairs used when generating fixtures.
    pub fields: &'static [(&'static str, &'static str)],
}

const USER_FIELDS: &[(&str, &str)] = &[
    ("username", "username"),
    ("email", "username@tempurl.com"),
];

static BUILT_IN_MODELS: [BuiltInModel; 5] = [
    BuiltInModel {
        key: "django.contrib.auth.models.User",
        label: "auth.User",
        model: "User",
        fields: USER_FIELDS,
    },
    BuiltInModel {
        key: "django.contrib.auth.models.AbstractUser",
        label: "auth.AbstractUser",
        model: "AbstractUser",
        fields: USER_FIELDS,
    },
    BuiltInModel {
        key: "django.contrib.auth.models.AbstractBaseUser",
        label: "auth.AbstractBaseUser",
        model: "AbstractBaseUser",
        fields: USER_FIELDS,
    },
    BuiltInModel {
        key: "django.contrib.auth.models.Group",
        label: "auth.Group",
        model: "Group",
        fields: &[("name", "group")],
    },
    BuiltInModel {
        key: "django.contrib.contenttypes.models.ContentType",
        label: "contenttypes.ContentType",
        model: "ContentType",
        fields: &[],
    },
];

impl BuiltInModel {
    /// Look up a built-in model by registry key.
    pub fn lookup(key: &str) -> Result<&'static BuiltInModel> {
        BUILT_IN_MODELS
            .iter()
            .find(|m| m.key == key)
            .ok_or_else(|| Error::registry_miss(Registry::BuiltInModel, key))
    }

    /// Find a built-in model by its bare model name.
    pub fn by_model_name(model: &str) -> Option<&'static BuiltInModel> {
        BUILT_IN_MODELS.iter().find(|m| m.model == model)
    }

    /// Find a built-in model by its app label form, e.g. `auth.Group`.
    pub fn by_label(label: &str) -> Option<&'static BuiltInModel> {
        BUILT_IN_MODELS.iter().find(|m| m.label == label)
    }

    /// The default identity model, `auth.User`.
    pub fn auth_user() -> &'static BuiltInModel {
        &BUILT_IN_MODELS[0]
    }

    /// All registered built-in models.
    pub fn all() -> &'static [BuiltInModel] {
        &BUILT_IN_MODELS
    }

    /// Test value for one of this model's fields.
    pub fn test_default(&self, field: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_user() {
        let user = BuiltInModel::auth_user();
        assert_eq!(user.label, "auth.User");
        assert_eq!(user.test_default("email"), Some("username@tempurl.com"));
        assert_eq!(user.test_default("password"), None);
    }

    #[test]
    fn test_lookup_by_key_and_name() {
        let group = BuiltInModel::lookup("django.contrib.auth.models.Group").unwrap();
        assert_eq!(BuiltInModel::by_model_name("Group"), Some(group));
        assert!(BuiltInModel::by_model_name("Permission").is_none());
    }

    #[test]
    fn test_lookup_by_label() {
        let content_type = BuiltInModel::by_label("contenttypes.ContentType").unwrap();
        assert_eq!(content_type.model, "ContentType");
        assert!(BuiltInModel::by_label("ContentType").is_none());
        assert!(BuiltInModel::by_label("django.contrib.auth.models.User").is_none());
    }

    #[test]
    fn test_label_ends_with_model_name() {
        for model in BuiltInModel::all() {
            assert!(model.label.ends_with(&format!(".{}", model.model)));
            assert!(model.key.ends_with(&format!(".{}", model.model)));
        }
    }

    #[test]
    fn test_lookup_miss() {
        assert!(BuiltInModel::lookup("auth.User").is_err());
    }
}
