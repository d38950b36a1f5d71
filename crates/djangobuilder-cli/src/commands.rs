//! Command implementations.

use std::path::Path;

use djangobuilder_core::FieldType;
use djangobuilder_records::{rebuild, RebuildConfig, RecordStore, Result};
use tracing::info;

use crate::formatter::{self, OutputFormat};

/// Load a record store from a JSON file.
pub fn load(path: &Path) -> std::result::Result<RecordStore, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    let store = RecordStore::from_json(&json)?;
    info!(path = %path.display(), records = store.len(), "Loaded record store");
    Ok(store)
}

/// Rebuild configuration for the `--lenient` flag.
pub fn config(lenient: bool) -> RebuildConfig {
    RebuildConfig::default().strict(!lenient)
}

/// Rebuild every project and render its schema.
pub fn inspect(store: &RecordStore, config: RebuildConfig, format: OutputFormat) -> Result<String> {
    let rebuilt = rebuild(store, config)?;
    let sections = rebuilt
        .projects
        .iter()
        .map(|(id, project)| formatter::format_project(id, project, format))
        .collect::<djangobuilder_core::Result<Vec<_>>>()?;
    Ok(sections.join("\n\n"))
}

/// Rebuild every project and list schema problems.
///
/// Rebuild failures are returned as errors; problems are conditions a
/// rebuilt graph can hold but a generated project would trip over.
pub fn check(store: &RecordStore, config: RebuildConfig) -> Result<Vec<String>> {
    let rebuilt = rebuild(store, config)?;
    let mut problems = Vec::new();
    for (id, project) in &rebuilt.projects {
        if project.requires_postgres() && !project.postgres() {
            problems.push(format!(
                "{id}: uses PostgreSQL field types but PostgreSQL support is off"
            ));
        }
        for app in project.apps() {
            if app.models().is_empty() {
                problems.push(format!("{id}: app {} has no models", app.name()));
            }
        }
    }
    Ok(problems)
}

/// Registered field types, optionally only the PostgreSQL ones.
pub fn types(postgres_only: bool) -> Vec<&'static FieldType> {
    FieldType::all()
        .iter()
        .filter(|ty| !postgres_only || ty.is_postgres())
        .collect()
}
