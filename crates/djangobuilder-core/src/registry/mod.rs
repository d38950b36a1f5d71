//! Static type registries.
//!
//! Each registry is a read-only table built once per process and addressed
//! by a stable string key. Lookups that miss return
//! [`Error::RegistryKeyNotFound`](crate::Error::RegistryKeyNotFound).

mod builtin;
mod field_type;
mod parent;
mod relationship_type;

pub use builtin::BuiltInModel;
pub use field_type::{Backend, FieldType};
pub use parent::ParentModelType;
pub use relationship_type::{RelationshipKind, RelationshipType};

/// The last dot-separated segment of a raw type string.
///
/// Persisted records store types loosely (`CharField`, `models.CharField`,
/// `django.db.models.CharField`); all resolve through their final segment.
pub fn last_segment(raw: &str) -> &str {
    raw.rsplit('.').next().unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("django.db.models.ForeignKey"), "ForeignKey");
        assert_eq!(last_segment("models.ForeignKey"), "ForeignKey");
        assert_eq!(last_segment("ForeignKey"), "ForeignKey");
        assert_eq!(last_segment(""), "");
    }
}
