use crate::go::{import_block, local_import, write_banner, GIN_IMPORT};
use crate::schema::GenConfig;
use std::io::Write;
use tracing::info;

pub fn render_main_go(config: &GenConfig) -> String {
    let imports = [
        local_import(config, "config"),
        local_import(config, "routes"),
        GIN_IMPORT.to_owned(),
    ];
    format!(
        r#"package main

{imports}

func main() {{
	config.ConnectDB()

	router := gin.Default()
	routes.InitializeRoutes(router)

	router.Run(":{port}")
}}
"#,
        imports = import_block(&imports),
        port = config.port,
    )
}

pub fn gen_main_go(config: &GenConfig, mut writer: impl Write) -> eyre::Result<()> {
    write_banner(&mut writer, "main file", true)?;
    write!(writer, "{}", render_main_go(config))?;
    info!(port = config.port, "generated main file");
    Ok(())
}
