//! Persisted record shapes.
//!
//! One record per schema entity, keyed externally by an opaque id string.
//! Parents list their children's ids in order.

use std::fmt;

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Kind of entity a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// A project record.
    Project,
    /// An app record.
    App,
    /// A model record.
    Model,
    /// A field record.
    Field,
    /// A relationship record.
    Relationship,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityType::Project => "project",
            EntityType::App => "app",
            EntityType::Model => "model",
            EntityType::Field => "field",
            EntityType::Relationship => "relationship",
        };
        f.write_str(name)
    }
}

/// A persisted project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Raw version string, e.g. `"4.x"`.
    #[serde(default)]
    pub django_version: String,
    /// Django Channels support.
    #[serde(default = "default_true")]
    pub channels: bool,
    /// django-htmx integration.
    #[serde(default = "default_true")]
    pub htmx: bool,
    /// PostgreSQL extension support.
    #[serde(default = "default_true")]
    pub postgres: bool,
    /// App record ids, in order.
    #[serde(default)]
    pub apps: Vec<String>,
}

/// A persisted app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    /// App name.
    pub name: String,
    /// Model record ids, in order.
    #[serde(default)]
    pub models: Vec<String>,
}

/// A persisted model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Model name.
    pub name: String,
    /// Abstract base model flag.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Field record ids, in order.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Relationship record ids, in order.
    #[serde(default)]
    pub relationships: Vec<String>,
    /// Parent references: `"<app>.<Model>"` labels or parent type keys.
    #[serde(default)]
    pub parents: Vec<String>,
    /// Display field, when one was chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_field: Option<String>,
    /// Primary key field, when one was chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

/// A persisted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Field name.
    pub name: String,
    /// Raw type string; only its last dot segment is significant.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Construction arguments.
    #[serde(default)]
    pub args: String,
    /// Form editability.
    #[serde(default = "default_true")]
    pub editable: bool,
}

/// A persisted relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    /// Relationship name.
    pub name: String,
    /// Raw type string; only its last dot segment is significant.
    #[serde(rename = "type")]
    pub relationship_type: String,
    /// Raw target: a `"<app>.<Model>"` label or a built-in model class.
    pub to: String,
    /// Construction arguments.
    #[serde(default)]
    pub args: String,
}
