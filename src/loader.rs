use crate::schema::Schema;
use eyre::{Context, Result};
use std::path::Path;
use tracing::info;

/// Reads and decodes the schema document at `path`.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let content =
        std::fs::read(path).wrap_err_with(|| format!("Failed to read file: {}", path.display()))?;

    let schema = load_schema_slice(&content)
        .wrap_err_with(|| format!("Failed to parse YAML from file: {}", path.display()))?;

    info!(
        path = %path.display(),
        models = schema.models.len(),
        routes = schema.routes.len(),
        "loaded schema"
    );
    Ok(schema)
}

pub fn load_schema_str(content: &str) -> Result<Schema> {
    load_schema_slice(content.as_bytes())
}

fn load_schema_slice(content: &[u8]) -> Result<Schema> {
    let schema: Schema = serde_yaml::from_slice(content)?;
    Ok(schema)
}
