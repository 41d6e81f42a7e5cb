use clap::Parser;
use crud_gen::generate;
use crud_gen::loader::load_schema;
use eyre::*;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate a gin/gorm CRUD service from a YAML schema
#[derive(Parser, Debug)]
#[command(
    name = "crud-gen",
    version,
    about = "Generate model, controller, route and main files for a CRUD API."
)]
struct Cli {
    /// Path of the YAML document describing models and routes
    schema: PathBuf,
}

fn setup_logs() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| eyre!("Failed to install log subscriber: {err}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logs()?;

    let schema = load_schema(&args.schema)?;

    let stdout = io::stdout();
    generate(&schema, BufWriter::new(stdout.lock()))?;
    Ok(())
}
