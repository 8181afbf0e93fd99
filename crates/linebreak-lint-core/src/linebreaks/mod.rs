//! Line breaks between adjacent statements, driven by TOML configuration.
//!
//! # Architecture
//!
//! ```text
//! [rules.linebreak-between-statements] statements = [...]
//!   ↓ serde (DTO layer)
//! config_dto::StatementsDto
//!   ↓ loader: validate + convert
//! Policy (ordered PolicyRule list)
//!   ↓ traverse::check() over a SourceFile
//! Vec<Report> → Vec<Violation>
//! ```
//!
//! Per adjacent pair, [`Policy::resolve`] picks a [`Requirement`],
//! [`count_linebreaks`] measures the layout and [`propose`] builds the fix.

pub mod classify;
pub mod config_dto;
pub mod count;
pub mod fix;
pub mod loader;
pub mod policy;
pub mod traverse;

pub use classify::{Keyword, StatementType, UnknownStatementType};
pub use count::{count_linebreaks, MAX_LINEBREAKS};
pub use fix::propose;
pub use loader::LoadError;
pub use policy::{Policy, PolicyRule, Requirement, TypeSpec, UnknownRequirement};
pub use traverse::{check, Report};

use crate::config::{Config, RuleConfig};
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox, RuleError};
use crate::source::SourceFile;
use crate::types::{Severity, Suggestion, Violation};

/// Rule code.
pub const CODE: &str = "LB001";

/// Rule name, also the key of its `[rules.*]` table.
pub const NAME: &str = "linebreak-between-statements";

/// Requires or forbids line breaks between adjacent statements.
#[derive(Debug, Clone, Default)]
pub struct LinebreakRule {
    policy: Policy,
    severity: Option<Severity>,
}

impl LinebreakRule {
    /// Creates a rule enforcing `policy`.
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            severity: None,
        }
    }

    /// Overrides the reported severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Builds the rule from its `[rules.linebreak-between-statements]` table.
    ///
    /// # Errors
    ///
    /// Returns an error if the `statements` option is invalid.
    pub fn from_config(config: &RuleConfig) -> Result<Self, LoadError> {
        Ok(Self {
            policy: loader::load_rule_config(config)?,
            severity: config.severity,
        })
    }

    /// The enforced policy.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    fn to_violation(
        &self,
        ctx: &FileContext,
        source: &SourceFile,
        report: Report,
    ) -> Result<Violation, RuleError> {
        let first = count::first_token(source, report.node)?;
        let location = ctx.location(&source.tokens()[first].span);
        let Report {
            requirement, fix, ..
        } = report;
        let suggestion = match fix {
            Some(fix) => Suggestion::with_fix(requirement.help(), fix),
            None => Suggestion::new(requirement.help()),
        };

        Ok(Violation::new(
            CODE,
            NAME,
            self.severity.unwrap_or_else(|| self.default_severity()),
            location,
            requirement.message(),
        )
        .with_suggestion(suggestion))
    }
}

impl Rule for LinebreakRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires or forbids line breaks between adjacent statements"
    }

    fn check(&self, ctx: &FileContext, source: &SourceFile) -> Result<Vec<Violation>, RuleError> {
        traverse::check(&self.policy, source)?
            .into_iter()
            .map(|report| self.to_violation(ctx, source, report))
            .collect()
    }
}

/// Creates the rules enabled by `config`.
///
/// Returns an empty vec when the rule is disabled or not configured.
///
/// # Errors
///
/// Returns an error if the rule configuration is invalid.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, LoadError> {
    if !config.is_rule_enabled(NAME) {
        return Ok(vec![]);
    }
    let Some(rule_config) = config.rules.get(NAME) else {
        return Ok(vec![]);
    };

    let rule = LinebreakRule::from_config(rule_config)?;
    if rule.policy.is_empty() {
        return Ok(vec![]);
    }
    Ok(vec![Box::new(rule)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use std::path::Path;

    fn rule(toml_str: &str) -> LinebreakRule {
        let config = Config::parse(toml_str).expect("valid TOML");
        LinebreakRule::from_config(config.rules.get(NAME).expect("rule table"))
            .expect("valid rule config")
    }

    #[test]
    fn violations_point_at_the_current_statement() {
        let rule = rule("[rules.linebreak-between-statements]\nstatements = [[\"always\", \"*\", \"*\"]]\n");
        let mut fx = Fixture::new("foo();  bar();");
        let root = fx.root();
        fx.expr(root, "foo();");
        fx.expr(root, "bar();");
        let source = fx.build();
        let ctx = FileContext::new(Path::new("a.js"), source.text(), Path::new("."));

        let violations = rule.check(&ctx, &source).unwrap();
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.code, CODE);
        assert_eq!(v.severity, Severity::Error);
        assert_eq!((v.location.line, v.location.column), (1, 9));
        assert_eq!(v.location.offset, 8);
        assert_eq!(v.message, "Expected one or more linebreaks before this statement.");
        assert_eq!(v.replacement().map(|r| r.start), Some(6));
        assert_eq!(
            v.suggestion.as_ref().map(|s| s.message.as_str()),
            Some(Requirement::Always.help())
        );
    }

    #[test]
    fn unfixable_violation_keeps_its_help() {
        let rule = rule(
            "[rules.linebreak-between-statements]\nseverity = \"warning\"\nstatements = [[\"never\", \"*\", \"*\"]]\n",
        );
        let mut fx = Fixture::new("foo();\n//comment\nfoo();");
        let root = fx.root();
        fx.expr(root, "foo();");
        fx.expr(root, "foo();");
        let source = fx.build();
        let ctx = FileContext::new(Path::new("a.js"), source.text(), Path::new("."));

        let violations = rule.check(&ctx, &source).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert!(violations[0].replacement().is_none());
        assert!(violations[0].suggestion.is_some());
    }

    #[test]
    fn rules_from_config_respects_enablement() {
        let config = Config::parse(
            "[rules.linebreak-between-statements]\nstatements = [[\"always\", \"*\", \"*\"]]\n",
        )
        .unwrap();
        assert_eq!(rules_from_config(&config).unwrap().len(), 1);

        let config = Config::parse(
            "[rules.linebreak-between-statements]\nenabled = false\nstatements = [[\"always\", \"*\", \"*\"]]\n",
        )
        .unwrap();
        assert!(rules_from_config(&config).unwrap().is_empty());

        assert!(rules_from_config(&Config::default()).unwrap().is_empty());
    }

    #[test]
    fn rules_from_config_propagates_load_errors() {
        let config = Config::parse(
            "[rules.linebreak-between-statements]\nstatements = [[\"always\", \"*\"]]\n",
        )
        .unwrap();
        assert!(matches!(
            rules_from_config(&config),
            Err(LoadError::Arity { index: 0, len: 2 })
        ));
    }
}
