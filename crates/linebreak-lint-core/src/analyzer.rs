//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox, RuleError};
use crate::source::{ParseError, SourceParser};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while walking the directory tree.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        source: ParseError,
    },

    /// A rule found the source model malformed.
    #[error("Rule `{rule}` failed on {path}: {source}")]
    Rule {
        /// Rule name.
        rule: &'static str,
        /// File being checked.
        path: PathBuf,
        /// Underlying rule error.
        source: RuleError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// No source parser was registered.
    #[error("No source parser configured")]
    MissingParser,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    parser: Option<Box<dyn SourceParser>>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the parser producing the source model.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser is set, an exclude pattern is invalid,
    /// or the current directory cannot be read.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            parser,
            rules: self.rules,
            excludes,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    parser: Box<dyn SourceParser>,
    rules: Vec<RuleBox>,
    excludes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory violation paths are relative to.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(&self.root)
        } else {
            &self.root
        }
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, a rule finds a malformed
    /// source model, or a file fails to parse with `fail_on_parse_error` set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!(root = %self.root.display(), parser = self.parser.language_id(), "Starting analysis");

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.analyze_source(file_path, &content) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, source }) => {
                    warn!("Failed to parse {}: {}", path.display(), source);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, source });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Parses `content` and runs every enabled rule over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the content does not parse or a rule fails.
    pub fn analyze_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let source = self
            .parser
            .parse(content)
            .map_err(|source| AnalyzerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let ctx = FileContext::new(path, content, self.base_dir());
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &source).map_err(|source| AnalyzerError::Rule {
                rule: rule.name(),
                path: path.to_path_buf(),
                source,
            })?;
            violations.extend(self.apply_severity_override(rule.name(), rule_violations));
        }

        Ok(violations)
    }

    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all files the parser handles below the root.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let respect_gitignore = self.config.analyzer.respect_gitignore;
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(respect_gitignore)
            .git_exclude(respect_gitignore)
            .ignore(respect_gitignore);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !self.handles(path) {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.parser
                    .extensions()
                    .iter()
                    .any(|known| known.trim_start_matches('.') == ext)
            })
    }

    /// Checks if a path matches an exclude pattern, either relative to the
    /// base directory or as given.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(self.base_dir()).unwrap_or(path);
        self.excludes
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceFile, Span, SyntaxTree, TokenStore};

    struct NullParser;

    impl SourceParser for NullParser {
        fn language_id(&self) -> &'static str {
            "null"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".js", ".mjs"]
        }

        fn parse(&self, source: &str) -> Result<SourceFile, ParseError> {
            if source.contains('@') {
                return Err(ParseError::Syntax { line: 1, column: 1 });
            }
            Ok(SourceFile::new(
                source,
                TokenStore::default(),
                SyntaxTree::new(Span::default()),
            ))
        }
    }

    #[test]
    fn test_builder_requires_parser() {
        assert!(matches!(
            Analyzer::builder().root(".").build(),
            Err(AnalyzerError::MissingParser)
        ));

        let analyzer = Analyzer::builder()
            .root(".")
            .parser(NullParser)
            .build()
            .expect("Failed to build analyzer");
        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/repo")
            .parser(NullParser)
            .exclude("**/vendor/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/repo/node_modules/lib/a.js")));
        assert!(analyzer.should_exclude(Path::new("/repo/vendor/a.js")));
        assert!(analyzer.should_exclude(Path::new("/repo/app/dist/a.js")));
        assert!(!analyzer.should_exclude(Path::new("/repo/src/a.js")));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let result = Analyzer::builder()
            .parser(NullParser)
            .exclude("[")
            .build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_extension_filter() {
        let analyzer = Analyzer::builder()
            .root("/repo")
            .parser(NullParser)
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.handles(Path::new("a.js")));
        assert!(analyzer.handles(Path::new("a.mjs")));
        assert!(!analyzer.handles(Path::new("a.ts")));
        assert!(!analyzer.handles(Path::new("Makefile")));
    }

    #[test]
    fn test_parse_error_is_reported_with_path() {
        let analyzer = Analyzer::builder()
            .root("/repo")
            .parser(NullParser)
            .build()
            .expect("Failed to build analyzer");

        let err = analyzer
            .analyze_source(Path::new("/repo/a.js"), "@")
            .unwrap_err();
        assert_eq!(err.to_string(), "Parse error in /repo/a.js: syntax error at 1:1");
    }
}
