//! App definitions.

use super::ids::{AppId, ModelId};
use super::model::Model;

/// A named group of models, mirroring one Django app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub(crate) id: AppId,
    pub(crate) name: String,
    pub(crate) models: Vec<Model>,
}

impl App {
    pub(crate) fn new(id: AppId, name: String) -> Self {
        Self {
            id,
            name,
            models: Vec::new(),
        }
    }

    /// App id.
    pub fn id(&self) -> AppId {
        self.id
    }

    /// App name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All models in declaration order.
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Models not flagged abstract.
    pub fn concrete_models(&self) -> impl Iterator<Item = &Model> {
        self.models.iter().filter(|m| !m.is_abstract)
    }

    /// Get a model by name.
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Get a model by id.
    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.iter().find(|m| m.id == id)
    }
}
