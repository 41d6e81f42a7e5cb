use crate::go::{import_block, local_import, write_banner, ToGo, GIN_IMPORT};
use crate::schema::{GenConfig, Route};
use itertools::Itertools;
use std::io::Write;
use tracing::info;

/// Registration line for one route; method and path are passed through as written.
pub fn route_registration(route: &Route) -> String {
    format!(
        "router.{}(\"{}\", {})",
        route.method,
        route.path,
        route.to_go_ref()
    )
}

pub fn render_routes_go(config: &GenConfig, routes: &[Route]) -> String {
    let imports = [local_import(config, "controllers"), GIN_IMPORT.to_owned()];
    let body = routes
        .iter()
        .map(|route| format!("\t{}\n", route_registration(route)))
        .join("");
    format!(
        "package routes\n\n{}\n\nfunc InitializeRoutes(router *gin.Engine) {{\n{}}}\n",
        import_block(&imports),
        body
    )
}

pub fn gen_routes_go(
    config: &GenConfig,
    routes: &[Route],
    mut writer: impl Write,
) -> eyre::Result<()> {
    write_banner(&mut writer, "route file", true)?;
    write!(writer, "{}", render_routes_go(config, routes))?;
    info!(count = routes.len(), "generated route file");
    Ok(())
}
