use crate::go::{import_block, write_banner, ToGo, GORM_IMPORT};
use crate::schema::{Field, Model, Schema};
use itertools::Itertools;
use std::io::Write;
use tracing::{debug, info};

impl ToGo for Field {
    fn to_go_ref(&self) -> String {
        self.ty.clone()
    }

    fn to_go_decl(&self) -> String {
        format!(
            "{} {} `json:\"{}\"`",
            self.name,
            self.to_go_ref(),
            self.name.to_lowercase()
        )
    }
}

impl Model {
    pub fn to_go_decl(&self) -> String {
        let members = std::iter::once("gorm.Model".to_owned())
            .chain(self.fields.iter().map(|field| field.to_go_decl()))
            .map(|x| format!("\t{x}"))
            .join("\n");
        format!("type {} struct {{\n{}\n}}", self.name, members)
    }
}

pub fn render_model_go(model: &Model) -> String {
    format!(
        "package models\n\n{}\n\n{}\n",
        import_block(&[GORM_IMPORT]),
        model.to_go_decl()
    )
}

pub fn gen_model_go(schema: &Schema, mut writer: impl Write) -> eyre::Result<()> {
    write_banner(&mut writer, "model files", true)?;
    let models = schema.models();
    for model in &models {
        debug!(model = %model.name, fields = model.fields.len(), "rendering model");
        writeln!(writer)?;
        write!(writer, "{}", render_model_go(model))?;
    }
    info!(count = models.len(), "generated model files");
    Ok(())
}
