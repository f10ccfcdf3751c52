//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# tokenlint configuration

# Severity threshold for a non-zero exit code: error | warning | info
fail_on = "error"

# Global token documents, relative to this file
files = [
    "tokens/global.tokens.json",
]

# Global rule set. Unspecified fields take the built-in defaults.
[rules.naming]
enforce_kebab_case = true
min_segments = 2
# max_segments = 4
# require_description = true

[rules.types]
strict = true
allow_unknown_types = true

[rules.aliases]
forbid_cycles = true
require_resolvable = true
allow_cross_scope = true
# enforce_type_match = true

[rules.contrast]
require_wcag = true
wcag_level = "aa"
# require_apca = true
# apca_minimum = 60.0

# Projects and their brand-less documents
# [projects.web]
# files = ["tokens/web.tokens.json"]

# Brands override their project, which overrides global
# [brands.acme]
# project = "web"
# files = ["tokens/acme.tokens.json"]
#
# [brands.acme.rules.naming]
# require_description = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("tokenlint.toml");

    if config_path.exists() && !force {
        bail!(
            "configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created tokenlint.toml");
    println!("\nNext steps:");
    println!("  1. Edit tokenlint.toml to declare token documents and rules");
    println!("  2. Run: tokenlint check");

    Ok(())
}
