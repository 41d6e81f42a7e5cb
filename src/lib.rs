pub mod controllers;
pub mod entry;
pub mod go;
pub mod loader;
pub mod models;
pub mod routes;
pub mod schema;

use crate::schema::Schema;
use std::io::Write;
use tracing::warn;

/// Renders every generated file for `schema`, in order: models, controllers,
/// the route table and the entry point.
pub fn generate(schema: &Schema, mut writer: impl Write) -> eyre::Result<()> {
    for diagnostic in schema.diagnostics() {
        warn!("{diagnostic}");
    }

    models::gen_model_go(schema, &mut writer)?;
    controllers::gen_controller_go(schema, &mut writer)?;
    routes::gen_routes_go(&schema.generator, &schema.routes, &mut writer)?;
    entry::gen_main_go(&schema.generator, &mut writer)?;
    writer.flush()?;
    Ok(())
}
