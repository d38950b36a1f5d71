//! Project: the root of the schema graph.

use super::app::App;
use super::field::Field;
use super::ids::{AppId, FieldId, ModelId, ProjectKey, RelationshipId};
use super::model::Model;
use super::relationship::Relationship;
use super::version::DjangoVersion;
use crate::config::ProjectOptions;
use crate::error::{EntityKind, Error, Result};
use crate::rules::middleware;

/// One Django backend project and everything it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub(crate) key: ProjectKey,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) version: DjangoVersion,
    pub(crate) options: ProjectOptions,
    pub(crate) middleware: Vec<String>,
    pub(crate) apps: Vec<App>,
    pub(crate) next_index: u32,
}

impl Project {
    /// Create an empty project.
    ///
    /// The middleware list is composed fresh for this project from the
    /// framework defaults and `options`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: DjangoVersion,
        options: ProjectOptions,
    ) -> Self {
        Self {
            key: ProjectKey::next(),
            name: name.into(),
            description: description.into(),
            version,
            options,
            middleware: middleware::compose(options.htmx),
            apps: Vec::new(),
            next_index: 0,
        }
    }

    /// Create a project targeting the newest version with default options.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::new(name, "", DjangoVersion::default(), ProjectOptions::default())
    }

    /// Identity of this graph; every id it mints carries this key.
    pub fn key(&self) -> ProjectKey {
        self.key
    }

    /// Project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Target Django version.
    pub fn version(&self) -> DjangoVersion {
        self.version
    }

    /// Enabled subsystems.
    pub fn options(&self) -> ProjectOptions {
        self.options
    }

    /// Django Channels support.
    pub fn channels(&self) -> bool {
        self.options.channels
    }

    /// django-htmx integration.
    pub fn htmx(&self) -> bool {
        self.options.htmx
    }

    /// PostgreSQL extension support.
    pub fn postgres(&self) -> bool {
        self.options.postgres
    }

    /// Middleware identifiers, in settings order.
    pub fn middleware(&self) -> &[String] {
        &self.middleware
    }

    /// Mutable access to this project's own middleware list.
    pub fn middleware_mut(&mut self) -> &mut Vec<String> {
        &mut self.middleware
    }

    /// Apps in declaration order.
    pub fn apps(&self) -> &[App] {
        &self.apps
    }

    /// Iterate every model across all apps.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.apps.iter().flat_map(|a| a.models.iter())
    }

    /// Get an app by id.
    pub fn app(&self, id: AppId) -> Option<&App> {
        self.apps.iter().find(|a| a.id == id)
    }

    /// Get an app by name.
    pub fn find_app(&self, name: &str) -> Option<&App> {
        self.apps.iter().find(|a| a.name == name)
    }

    /// Get a model by id.
    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models().find(|m| m.id == id)
    }

    /// Get a model by app and model name.
    pub fn find_model(&self, app: &str, model: &str) -> Option<&Model> {
        self.find_app(app).and_then(|a| a.get_model(model))
    }

    /// Get a field by id.
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.models().find_map(|m| m.field(id))
    }

    /// Get a relationship by id.
    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.models().find_map(|m| m.relationship(id))
    }

    /// Check if any field in the graph needs the PostgreSQL extension.
    pub fn requires_postgres(&self) -> bool {
        self.models()
            .flat_map(|m| m.fields.iter())
            .any(Field::is_postgres_field)
    }

    pub(crate) fn next_index(&mut self) -> u32 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    pub(crate) fn check_app(&self, id: AppId) -> Result<()> {
        if id.project() != self.key {
            return Err(Error::ForeignReference {
                kind: EntityKind::App,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_model(&self, id: ModelId) -> Result<()> {
        if id.project() != self.key {
            return Err(Error::ForeignReference {
                kind: EntityKind::Model,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn app_mut(&mut self, id: AppId) -> Result<&mut App> {
        self.check_app(id)?;
        self.apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::ReferenceNotFound {
                kind: EntityKind::App,
                id: id.to_string(),
            })
    }

    pub(crate) fn model_ref(&self, id: ModelId) -> Result<&Model> {
        self.check_model(id)?;
        self.model(id).ok_or_else(|| Error::ReferenceNotFound {
            kind: EntityKind::Model,
            id: id.to_string(),
        })
    }

    pub(crate) fn model_mut(&mut self, id: ModelId) -> Result<&mut Model> {
        self.check_model(id)?;
        self.apps
            .iter_mut()
            .flat_map(|a| a.models.iter_mut())
            .find(|m| m.id == id)
            .ok_or_else(|| Error::ReferenceNotFound {
                kind: EntityKind::Model,
                id: id.to_string(),
            })
    }
}
