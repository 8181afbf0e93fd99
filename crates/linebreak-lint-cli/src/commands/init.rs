//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "linebreak-lint.toml";

const DEFAULT_CONFIG: &str = r#"# linebreak-lint configuration

[analyzer]
# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Respect .gitignore files
respect_gitignore = true

[rules.linebreak-between-statements]
enabled = true
# severity = "warning"  # Override default severity (error)

# Each entry is [requirement, previous, next]. Requirements: any, never,
# always, blankline. Types are names from `linebreak-lint list-types` or
# lists of them. When several entries match, the last one wins.
statements = [
    ["always", "*", "*"],
    ["blankline", ["const", "let", "var"], "*"],
    ["any", ["const", "let", "var"], ["const", "let", "var"]],
    ["blankline", "*", "return"],
    ["blankline", "directive", "*"],
    ["any", "directive", "directive"],
]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit the `statements` list to match your style");
    println!("  2. Run: linebreak-lint check --fix");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use linebreak_lint_core::{linebreaks, Config};
    use tempfile::TempDir;

    #[test]
    fn default_config_loads_a_policy() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        let rules = linebreaks::rules_from_config(&config).unwrap();
        assert_eq!(rules.len(), 1);

        let rule = linebreaks::LinebreakRule::from_config(&config.rules[linebreaks::NAME]).unwrap();
        assert_eq!(rule.policy().rules().len(), 6);
    }

    #[test]
    fn existing_file_needs_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
