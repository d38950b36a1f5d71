//! Output formatters for rebuilt projects.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use djangobuilder_core::{FieldType, Project, Result};
use serde_json::{json, Value};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One model member, flattened for display.
struct MemberRow {
    model: String,
    name: String,
    kind: &'static str,
    type_key: &'static str,
    detail: String,
}

fn member_rows(project: &Project) -> Result<Vec<MemberRow>> {
    let mut rows = Vec::new();
    for model in project.models() {
        let label = project.model_label(model.id())?;
        for field in model.fields() {
            rows.push(MemberRow {
                model: label.clone(),
                name: field.name().to_string(),
                kind: "field",
                type_key: field.field_type().key,
                detail: field.import_module().to_string(),
            });
        }
        for relationship in model.relationships() {
            rows.push(MemberRow {
                model: label.clone(),
                name: relationship.name().to_string(),
                kind: "relationship",
                type_key: relationship.relationship_type().key,
                detail: project.related_to(relationship)?,
            });
        }
    }
    Ok(rows)
}

/// Format a rebuilt project.
pub fn format_project(id: &str, project: &Project, format: OutputFormat) -> Result<String> {
    let rows = member_rows(project)?;
    let output = match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Model", "Member", "Kind", "Type", "Module / Target"]);
            for row in &rows {
                table.add_row(vec![
                    Cell::new(&row.model),
                    Cell::new(&row.name),
                    Cell::new(row.kind),
                    Cell::new(row.type_key),
                    Cell::new(&row.detail),
                ]);
            }
            format!(
                "{} ({id}) Django {}\nmiddleware: {}\n{table}",
                project.name(),
                project.version(),
                project.middleware().join(", ")
            )
        }
        OutputFormat::Json => {
            let members: Vec<Value> = rows
                .iter()
                .map(|row| {
                    json!({
                        "model": row.model,
                        "name": row.name,
                        "kind": row.kind,
                        "type": row.type_key,
                        "detail": row.detail,
                    })
                })
                .collect();
            let value = json!({
                "id": id,
                "name": project.name(),
                "django_version": project.version().to_string(),
                "middleware": project.middleware(),
                "requires_postgres": project.requires_postgres(),
                "members": members,
            });
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
        }
    };
    Ok(output)
}

/// Format the problems found by `check`.
pub fn format_problems(problems: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            if problems.is_empty() {
                "No problems found".to_string()
            } else {
                problems.join("\n")
            }
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(problems).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

/// Format a list of field types.
pub fn format_types(types: &[&'static FieldType], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Type", "Class", "Default args", "Module"]);
            for ty in types {
                table.add_row(vec![
                    Cell::new(ty.key),
                    Cell::new(ty.class_path),
                    Cell::new(ty.default_args.unwrap_or("")),
                    Cell::new(djangobuilder_core::ImportModule::for_type(ty)),
                ]);
            }
            table.to_string()
        }
        OutputFormat::Json => {
            let values: Vec<Value> = types
                .iter()
                .map(|ty| {
                    json!({
                        "key": ty.key,
                        "class_path": ty.class_path,
                        "default_args": ty.default_args,
                        "postgres": ty.is_postgres(),
                        "range": ty.is_postgres_range(),
                    })
                })
                .collect();
            serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
        }
    }
}
