//! Import routing for field classes.

use std::fmt;

use crate::registry::{Backend, FieldType};

/// Module a field class is imported from in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportModule {
    /// `from django.db import models`.
    Models,
    /// `from django.contrib.postgres import fields as postgres_fields`.
    PostgresFields,
    /// `from django.contrib.postgres.fields import ranges as postgres_range_fields`.
    PostgresRangeFields,
}

impl ImportModule {
    /// Classify a field type.
    pub fn for_type(field_type: &FieldType) -> Self {
        match field_type.backend {
            Backend::Default => ImportModule::Models,
            Backend::Postgres => ImportModule::PostgresFields,
            Backend::PostgresRange => ImportModule::PostgresRangeFields,
        }
    }

    /// Alias the generated code refers to the module by.
    pub fn alias(self) -> &'static str {
        match self {
            ImportModule::Models => "models",
            ImportModule::PostgresFields => "postgres_fields",
            ImportModule::PostgresRangeFields => "postgres_range_fields",
        }
    }

    /// Python import statement binding [`alias`](Self::alias).
    pub fn import_statement(self) -> &'static str {
        match self {
            ImportModule::Models => "from django.db import models",
            ImportModule::PostgresFields => {
                "from django.contrib.postgres import fields as postgres_fields"
            }
            ImportModule::PostgresRangeFields => {
                "from django.contrib.postgres.fields import ranges as postgres_range_fields"
            }
        }
    }
}

impl fmt::Display for ImportModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}
