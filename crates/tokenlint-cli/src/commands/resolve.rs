//! Resolve command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tokenlint_core::{
    alias, resolve_brand_tokens, Config, ResolvedTokenSet, TokenValue,
};

use crate::config_resolver;
use crate::sources::FileTokenSource;
use crate::OutputFormat;

/// Runs the resolve command.
pub fn run(
    brand: &str,
    follow_aliases: bool,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let source = config_resolver::resolve(Path::new("."), config_path);
    let Some(path) = source.path() else {
        bail!("resolve needs a tokenlint.toml declaring brands and token documents; run `tokenlint init`");
    };

    let config =
        Config::from_file(path).with_context(|| format!("failed to load config: {}", path.display()))?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    let file_source = FileTokenSource::new(config, base_dir);

    let set = resolve_brand_tokens(&file_source, brand)
        .with_context(|| format!("failed to resolve brand `{brand}`"))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&set)?),
        OutputFormat::Text | OutputFormat::Compact => print_text(&set, follow_aliases),
    }

    Ok(())
}

fn print_text(set: &ResolvedTokenSet, follow_aliases: bool) {
    match &set.project {
        Some(project) => println!("brand `{}` (project `{project}`): {} token(s)", set.brand, set.len()),
        None => println!("brand `{}`: {} token(s)", set.brand, set.len()),
    }

    let flat = follow_aliases.then(|| set.to_tokens());

    for token in set.tokens() {
        let value = match &flat {
            Some(tokens) => rendered_value(&token.value, tokens),
            None => token.value.to_string(),
        };
        println!(
            "  {:<40} {:<28} [{}]",
            token.path, value, token.source_level
        );
    }
}

/// Renders a value, chasing alias chains to their final target.
fn rendered_value(value: &TokenValue, tokens: &[tokenlint_core::Token]) -> String {
    let Some(alias_path) = alias::extract_alias(value) else {
        return value.to_string();
    };
    let Some(start) = tokens.iter().find(|t| t.path == alias_path) else {
        return format!("{value} (broken)");
    };

    match alias::resolve_chain(start, tokens, None) {
        alias::Resolution::Resolved { token, .. } => format!("{} (via {})", token.value, alias_path),
        alias::Resolution::Broken { missing, .. } => format!("{value} (broken at {missing})"),
        alias::Resolution::CycleDetected { chain } => {
            format!("{value} (cycle: {})", chain.join(" → "))
        }
        alias::Resolution::DepthExceeded { .. } => format!("{value} (depth exceeded)"),
    }
}
