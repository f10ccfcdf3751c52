//! Contrast command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tokenlint_core::{analyze_contrast, resolve_rules, Config, ContrastReport, TextSize};

use crate::config_resolver;
use crate::OutputFormat;

/// Runs the contrast command.
pub fn run(
    text: &str,
    background: &str,
    size: &str,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let size: TextSize = size.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let source = config_resolver::resolve(Path::new("."), config_path);
    let config = match source.path() {
        Some(p) => Config::from_file(p)
            .with_context(|| format!("failed to load config: {}", p.display()))?,
        None => Config::default(),
    };

    let policy = resolve_rules(&config, None, None).contrast;
    let report = analyze_contrast(text, background, size, &policy)
        .with_context(|| format!("cannot analyze `{text}` on `{background}`"))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text | OutputFormat::Compact => print_text(text, background, &report),
    }

    if !report.valid {
        std::process::exit(1);
    }

    Ok(())
}

fn print_text(text: &str, background: &str, report: &ContrastReport) {
    println!("`{text}` on `{background}`");
    println!(
        "  WCAG 2.1:  {:.2}:1  ({})",
        report.wcag.ratio, report.wcag.level
    );
    println!(
        "  APCA:      Lc {:+.1}  ({})",
        report.apca.lc, report.apca.band
    );
    println!("  polarity:  {}", report.recommended);

    for advisory in &report.advisories {
        println!("  advisory:  {}", advisory.message);
    }

    let verdict = if report.valid {
        "\x1b[32mpass\x1b[0m"
    } else {
        "\x1b[31mfail\x1b[0m"
    };
    println!("  result:    {verdict}");
}
