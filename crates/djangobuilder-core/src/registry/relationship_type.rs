//! Relationship type registry.

use crate::error::{Error, Registry, Result};

/// Kind of reference a relationship makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// Many-to-one reference.
    ForeignKey,
    /// One-to-one reference.
    OneToOne,
    /// Many-to-many reference.
    ManyToMany,
}

/// A registered relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipType {
    /// Registry key (the bare class name).
    pub key: &'static str,
    /// Fully qualified Django class.
    pub class_path: &'static str,
    /// Reference kind.
    pub kind: RelationshipKind,
    /// Construction arguments suggested when the user has not typed any.
    pub default_args: Option<&'static str>,
}

static RELATIONSHIP_TYPES: [RelationshipType; 3] = [
    RelationshipType {
        key: "ForeignKey",
        class_path: "django.db.models.ForeignKey",
        kind: RelationshipKind::ForeignKey,
        default_args: Some("on_delete=models.CASCADE"),
    },
    RelationshipType {
        key: "OneToOneField",
        class_path: "django.db.models.OneToOneField",
        kind: RelationshipKind::OneToOne,
        default_args: Some("on_delete=models.CASCADE"),
    },
    RelationshipType {
        key: "ManyToManyField",
        class_path: "django.db.models.ManyToManyField",
        kind: RelationshipKind::ManyToMany,
        default_args: None,
    },
];

impl RelationshipType {
    /// Look up a relationship type by registry key.
    pub fn lookup(key: &str) -> Result<&'static RelationshipType> {
        RELATIONSHIP_TYPES
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| Error::registry_miss(Registry::RelationshipType, key))
    }

    /// The registered type for `kind`.
    pub fn of(kind: RelationshipKind) -> &'static RelationshipType {
        match kind {
            RelationshipKind::ForeignKey => &RELATIONSHIP_TYPES[0],
            RelationshipKind::OneToOne => &RELATIONSHIP_TYPES[1],
            RelationshipKind::ManyToMany => &RELATIONSHIP_TYPES[2],
        }
    }

    /// All registered relationship types.
    pub fn all() -> &'static [RelationshipType] {
        &RELATIONSHIP_TYPES
    }

    /// Check if this is a many-to-many relationship.
    pub fn is_many_to_many(&self) -> bool {
        self.kind == RelationshipKind::ManyToMany
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_three_types() {
        assert_eq!(RelationshipType::all().len(), 3);
    }

    #[test]
    fn test_of_matches_lookup() {
        for kind in [
            RelationshipKind::ForeignKey,
            RelationshipKind::OneToOne,
            RelationshipKind::ManyToMany,
        ] {
            let by_kind = RelationshipType::of(kind);
            assert_eq!(by_kind.kind, kind);
            assert_eq!(RelationshipType::lookup(by_kind.key).unwrap(), by_kind);
        }
    }

    #[test]
    fn test_default_args() {
        let fk = RelationshipType::lookup("ForeignKey").unwrap();
        assert_eq!(fk.default_args, Some("on_delete=models.CASCADE"));

        let m2m = RelationshipType::lookup("ManyToManyField").unwrap();
        assert!(m2m.is_many_to_many());
        assert!(m2m.default_args.is_none());
    }

    #[test]
    fn test_lookup_miss() {
        let err = RelationshipType::lookup("GenericRelation").unwrap_err();
        assert!(matches!(
            err,
            Error::RegistryKeyNotFound {
                registry: Registry::RelationshipType,
                ..
            }
        ));
    }
}
