//! Rules command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tokenlint_core::{resolve_rules, Config};

use crate::config_resolver;
use crate::OutputFormat;

/// Runs the rules command: shows the effective rule set after the
/// brand → project → global → built-in cascade.
pub fn run(
    project: Option<&str>,
    brand: Option<&str>,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let source = config_resolver::resolve(Path::new("."), config_path);
    let config = match source.path() {
        Some(p) => Config::from_file(p)
            .with_context(|| format!("failed to load config: {}", p.display()))?,
        None => Config::default(),
    };

    let rules = resolve_rules(&config, project, brand);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rules)?),
        OutputFormat::Text | OutputFormat::Compact => {
            let scope = match (project, brand) {
                (_, Some(b)) => format!("brand `{b}`"),
                (Some(p), None) => format!("project `{p}`"),
                (None, None) => "global".to_string(),
            };
            println!("# effective rules for {scope}");
            print!("{}", toml::to_string_pretty(&rules)?);
        }
    }

    Ok(())
}
