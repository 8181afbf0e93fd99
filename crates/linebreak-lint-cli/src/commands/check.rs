//! Check command implementation.

use anyhow::{Context, Result};
use linebreak_lint_core::{
    apply_replacements, linebreaks, Analyzer, Config, LintResult, Severity,
};
use linebreak_lint_js::JavaScriptParser;
use std::path::Path;
use tracing::{info, warn};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags of `linebreak-lint check`.
pub struct CheckOptions {
    pub format: OutputFormat,
    pub fix: bool,
    pub exclude: Vec<String>,
    pub fail_on: Severity,
}

/// Runs the check command.
pub fn run(path: &Path, source: &ConfigSource, options: CheckOptions) -> Result<()> {
    let config = load_config(source)?;
    let analyzer = build_analyzer(path, &config, options.exclude)?;

    info!(
        "Checking {} with {} rule(s)",
        path.display(),
        analyzer.rule_count()
    );
    let mut result = analyzer.analyze().context("Analysis failed")?;

    if options.fix && apply_fixes(analyzer.base_dir(), &result)? > 0 {
        result = analyzer.analyze().context("Analysis after fixing failed")?;
    }

    super::output::print(&result, options.format, analyzer.base_dir())?;

    if result.has_violations_at(options.fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

fn build_analyzer(path: &Path, config: &Config, exclude: Vec<String>) -> Result<Analyzer> {
    let rules = linebreaks::rules_from_config(config).context("Invalid rule configuration")?;
    if rules.is_empty() {
        warn!(
            "No statement rules configured; add `statements` under [rules.{}]",
            linebreaks::NAME
        );
    }

    let mut builder = Analyzer::builder()
        .root(path)
        .parser(JavaScriptParser::new())
        .config(config.clone())
        .excludes(exclude);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    builder.build().context("Failed to build analyzer")
}

/// Writes the fixes of `result` to disk and returns how many files changed.
fn apply_fixes(base_dir: &Path, result: &LintResult) -> Result<usize> {
    let mut written = 0;
    for file in result.fixable_files() {
        let full = base_dir.join(file);
        let original = std::fs::read_to_string(&full)
            .with_context(|| format!("Failed to read {}", full.display()))?;
        let outcome = apply_replacements(&original, &result.replacements_for(file));
        if !outcome.is_changed() {
            continue;
        }
        std::fs::write(&full, &outcome.text)
            .with_context(|| format!("Failed to write {}", full.display()))?;
        info!(
            "Fixed {} ({} applied, {} skipped)",
            file.display(),
            outcome.applied,
            outcome.skipped
        );
        written += 1;
    }
    Ok(written)
}
