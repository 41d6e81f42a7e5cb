use crate::schema::GenConfig;
use convert_case::{Case, Casing};
use itertools::Itertools;
use std::io::Write;

pub const GIN_IMPORT: &str = "github.com/gin-gonic/gin";
pub const GORM_IMPORT: &str = "gorm.io/gorm";

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Identifiers the generated controllers already use: imported packages,
/// the gin context and the bind/lookup error.
const GENERATED_NAMES: &[&str] = &["config", "models", "gin", "http", "c", "err"];

pub trait ToGo {
    fn to_go_ref(&self) -> String;
    fn to_go_decl(&self) -> String;
}

/// Local variable name holding one record of `model`.
pub fn go_var_name(model: &str) -> String {
    let name = model.to_case(Case::Camel);
    if GO_KEYWORDS.contains(&name.as_str()) || GENERATED_NAMES.contains(&name.as_str()) {
        format!("{name}Record")
    } else {
        name
    }
}

/// Import path of a package inside the generated module.
pub fn local_import(config: &GenConfig, package: &str) -> String {
    format!("{}/{}", config.module, package)
}

pub fn import_block<S: AsRef<str>>(imports: &[S]) -> String {
    match imports {
        [single] => format!("import \"{}\"", single.as_ref()),
        _ => format!(
            "import (\n{}\n)",
            imports
                .iter()
                .map(|x| format!("\t\"{}\"", x.as_ref()))
                .join("\n")
        ),
    }
}

/// Writes the progress box announcing a section, e.g. `| Generating route file... |`.
pub fn write_banner(mut writer: impl Write, title: &str, blank_after: bool) -> eyre::Result<()> {
    let text = format!(" Generating {title}... ");
    let rule = format!("+{}+", "-".repeat(text.len()));
    writeln!(writer)?;
    writeln!(writer, "{rule}")?;
    writeln!(writer, "|{text}|")?;
    writeln!(writer, "{rule}")?;
    if blank_after {
        writeln!(writer)?;
    }
    Ok(())
}
