//! Check command implementation.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokenlint_core::{
    loader, resolve_rules, Config, Severity, Token, TokenScope, Validator,
};

use super::output;
use crate::config_resolver;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    fail_on: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let source = config_resolver::resolve(path, config_path);
    let config = match &source {
        config_resolver::ConfigSource::Default => Config::default(),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("failed to load config: {}", p.display()))?
        }
    };

    let files = discover_documents(path, &exclude)?;
    anyhow::ensure!(
        !files.is_empty(),
        "no token documents found under {} (expected *.tokens.json)",
        path.display()
    );

    tracing::info!("Checking {} document(s)", files.len());

    let mut tokens: Vec<Token> = Vec::new();
    for file in &files {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let parsed = loader::parse_document(&content, &TokenScope::Global)
            .with_context(|| format!("failed to parse {}", file.display()))?;
        tokens.extend(parsed);
    }

    let rules = resolve_rules(&config, None, None);
    let report = Validator::new(rules).validate_batch(&tokens);

    output::print(&report, format)?;

    let threshold = resolve_fail_on(fail_on.as_deref(), &config)?;
    if report.has_issues_at(threshold) {
        std::process::exit(1);
    }

    Ok(())
}

/// Resolves the failure threshold: flag > config > "error".
fn resolve_fail_on(flag: Option<&str>, config: &Config) -> Result<Severity> {
    let name = flag.or(config.fail_on.as_deref()).unwrap_or("error");
    name.parse().map_err(|e: String| anyhow::anyhow!(e))
}

/// Discovers token documents: a file is taken as-is, a directory is
/// walked (respecting .gitignore) for `*.tokens.json` files minus the
/// exclude patterns.
fn discover_documents(path: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in ignore::WalkBuilder::new(path).build() {
        let entry = entry?;
        let entry_path = entry.path();
        if !entry_path.is_file() || !is_token_document(entry_path) {
            continue;
        }
        if should_exclude(entry_path, exclude) {
            tracing::debug!("Excluding: {}", entry_path.display());
            continue;
        }
        files.push(entry_path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

fn is_token_document(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |name| {
            name.ends_with(".tokens.json") || name == "tokens.json"
        })
}

fn should_exclude(path: &Path, patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();

    for pattern in patterns {
        if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
            if glob_pattern.matches(&path_str) {
                return true;
            }
        }

        // Also check as substring for patterns like "**/legacy/**"
        let normalized = pattern.replace("**", "");
        if !normalized.is_empty() && path_str.contains(&normalized) {
            return true;
        }
    }

    false
}
