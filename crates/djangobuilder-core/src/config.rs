//! Project configuration.

use serde::Deserialize;

/// Optional subsystems a project enables.
///
/// Every subsystem is on unless switched off, matching a freshly created
/// project in the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectOptions {
    /// Django Channels (websocket) support.
    pub channels: bool,
    /// django-htmx integration; adds its middleware.
    pub htmx: bool,
    /// PostgreSQL contrib extensions.
    pub postgres: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            channels: true,
            htmx: true,
            postgres: true,
        }
    }
}

impl ProjectOptions {
    /// Options with every subsystem switched off.
    pub fn minimal() -> Self {
        Self {
            channels: false,
            htmx: false,
            postgres: false,
        }
    }

    /// Set Channels support.
    pub fn channels(mut self, enabled: bool) -> Self {
        self.channels = enabled;
        self
    }

    /// Set the htmx integration.
    pub fn htmx(mut self, enabled: bool) -> Self {
        self.htmx = enabled;
        self
    }

    /// Set PostgreSQL extension support.
    pub fn postgres(mut self, enabled: bool) -> Self {
        self.postgres = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let options = ProjectOptions::default();
        assert!(options.channels && options.htmx && options.postgres);
    }

    #[test]
    fn test_setters() {
        let options = ProjectOptions::minimal().htmx(true);
        assert!(options.htmx);
        assert!(!options.channels);
        assert!(!options.postgres);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ProjectOptions = serde_json::from_str(r#"{"htmx": false}"#).unwrap();
        assert!(!options.htmx);
        assert!(options.channels);
        assert!(options.postgres);
    }
}
