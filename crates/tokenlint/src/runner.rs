//! Runner for `cargo test` integration.
//!
//! Validates every token document declared in `tokenlint.toml` and
//! panics with a formatted report on failure, so a plain test function
//! can gate CI on token health.

use std::path::{Path, PathBuf};

use tokenlint_core::{
    loader, resolve_rules, BatchReport, BatchSummary, Config, Severity, Token, TokenReport,
    TokenScope, Validator,
};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["tokenlint.toml", ".tokenlint.toml"];

/// Runs token validation as part of `cargo test`.
///
/// Discovers the workspace root, loads the configuration and every
/// declared token document, and validates each scope's tokens with its
/// cascaded rule set against the combined set.
///
/// # Panics
///
/// Panics with a formatted report if findings at or above `fail_on`
/// severity are found, or if the configuration or a document cannot be
/// read.
pub fn run_check(config_path: Option<&str>, fail_on: Option<&str>) {
    let root = find_project_root();
    let content = read_config_content(&root, config_path);
    let config = parse_config(&content);
    let threshold = resolve_fail_on(fail_on, &config);

    let report = check_with_config(&root, &config);

    if report.has_issues_at(threshold) {
        let formatted = report.format_test_report(threshold);
        panic!("{formatted}");
    }
}

/// Loads and validates every token document a config declares.
///
/// Global, project, and brand documents are all loaded; each token is
/// validated with the rule set cascaded for its scope, using the full
/// combined set as the alias target so cross-scope references resolve.
///
/// # Panics
///
/// Panics if a declared document cannot be read or parsed.
#[must_use]
pub fn check_with_config(root: &Path, config: &Config) -> BatchReport {
    let mut tokens: Vec<Token> = Vec::new();

    for file in &config.files {
        tokens.extend(load_document(root, file, &TokenScope::Global));
    }
    for (project_id, project) in &config.projects {
        for file in &project.files {
            tokens.extend(load_document(root, file, &TokenScope::project(project_id)));
        }
    }
    for (brand_id, brand) in &config.brands {
        for file in &brand.files {
            tokens.extend(load_document(root, file, &TokenScope::brand(brand_id)));
        }
    }

    let mut results = Vec::with_capacity(tokens.len());
    let mut summary = BatchSummary {
        total: tokens.len(),
        ..BatchSummary::default()
    };

    for token in &tokens {
        let rules = match &token.scope {
            TokenScope::Global => resolve_rules(config, None, None),
            TokenScope::Project { project } => resolve_rules(config, Some(project), None),
            TokenScope::Brand { brand } => {
                let project = config.brands.get(brand).and_then(|b| b.project.clone());
                resolve_rules(config, project.as_deref(), Some(brand))
            }
        };

        let result = Validator::new(rules).validate_token(token, Some(&tokens));
        if result.valid {
            summary.valid += 1;
        } else {
            summary.invalid += 1;
        }
        if result.has_warnings() {
            summary.with_warnings += 1;
        }
        results.push(TokenReport {
            path: token.path.clone(),
            result,
        });
    }

    BatchReport { results, summary }
}

fn load_document(root: &Path, file: &Path, scope: &TokenScope) -> Vec<Token> {
    let path = if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    };
    let content = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!("tokenlint: failed to read {}: {e}", path.display());
    });
    loader::parse_document(&content, scope).unwrap_or_else(|e| {
        panic!("tokenlint: failed to parse {}: {e}", path.display());
    })
}

/// Reads the raw TOML content from the config file.
///
/// Returns an empty string if no config file is found.
fn read_config_content(root: &Path, explicit_path: Option<&str>) -> String {
    if let Some(path) = explicit_path {
        let full_path = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            root.join(path)
        };
        return std::fs::read_to_string(&full_path).unwrap_or_else(|e| {
            panic!(
                "tokenlint: failed to read config from {}: {e}",
                full_path.display()
            );
        });
    }

    for candidate in CONFIG_CANDIDATES {
        let path = root.join(candidate);
        if path.exists() {
            return std::fs::read_to_string(&path).unwrap_or_else(|e| {
                panic!("tokenlint: failed to read config from {}: {e}", path.display());
            });
        }
    }

    String::new()
}

/// Parses a `Config` from TOML content.
fn parse_config(content: &str) -> Config {
    if content.is_empty() {
        return Config::default();
    }
    Config::parse(content).unwrap_or_else(|e| {
        panic!("tokenlint: failed to parse config: {e}");
    })
}

/// Resolves the effective `fail_on` severity from arg > config > default.
fn resolve_fail_on(arg: Option<&str>, config: &Config) -> Severity {
    let name = arg.or(config.fail_on.as_deref()).unwrap_or("error");
    name.parse()
        .unwrap_or_else(|e: String| panic!("tokenlint: {e}"))
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the project root by looking for `Cargo.toml` from `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    // CARGO_MANIFEST_DIR points to the crate containing the test,
    // which may be a workspace member. Walk up to find workspace root.
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);

        let mut candidate = manifest_path.as_path();
        loop {
            let cargo_toml = candidate.join("Cargo.toml");
            if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
                return candidate.to_path_buf();
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }

        // No workspace root found — use manifest dir itself
        return manifest_path;
    }

    // Fallback: current directory
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
