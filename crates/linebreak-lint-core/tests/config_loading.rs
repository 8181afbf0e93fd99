//! Integration test: TOML config → rules → Analyzer → fixes on disk.
//!
//! Uses a minimal parser that understands `name();` statements only, so the
//! pipeline can be exercised without a real grammar.

use linebreak_lint_core::linebreaks::{self, Requirement};
use linebreak_lint_core::source::{
    NodeKind, Position, Span, StatementKind, SyntaxTree, Token, TokenKind, TokenStore,
};
use linebreak_lint_core::{
    apply_replacements, Analyzer, Config, LintResult, ParseError, SourceFile, SourceParser,
};
use std::path::Path;

struct CallParser;

impl SourceParser for CallParser {
    fn language_id(&self) -> &'static str {
        "calls"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".js"]
    }

    fn parse(&self, source: &str) -> Result<SourceFile, ParseError> {
        let position = |offset: usize| {
            let before = &source[..offset];
            let line = before.matches('\n').count() + 1;
            let column = offset - before.rfind('\n').map_or(0, |i| i + 1);
            Position::new(line, column)
        };
        let span = |start: usize, end: usize| Span::new(start, end, position(start), position(end));

        let mut tokens = Vec::new();
        let mut chars = source.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            if c.is_whitespace() {
                continue;
            }
            if c.is_alphanumeric() {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if !next.is_alphanumeric() {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token::new(TokenKind::Identifier, &source[start..end], span(start, end)));
            } else if "();".contains(c) {
                tokens.push(Token::new(TokenKind::Punctuator, c.to_string(), span(start, start + 1)));
            } else {
                let at = position(start);
                return Err(ParseError::Syntax {
                    line: at.line,
                    column: at.column + 1,
                });
            }
        }

        let mut tree = SyntaxTree::new(span(0, source.len()));
        let mut statement_start = None;
        for token in &tokens {
            let start = *statement_start.get_or_insert(token.span.start);
            if token.is_semicolon() {
                tree.push(
                    tree.root(),
                    NodeKind::Statement(StatementKind::Expression {
                        string_literal: false,
                    }),
                    span(start, token.span.end),
                );
                statement_start = None;
            }
        }

        Ok(SourceFile::new(source, TokenStore::new(tokens), tree))
    }
}

const CONFIG: &str = r#"
[rules.linebreak-between-statements]
severity = "warning"
statements = [["blankline", "*", "*"], ["never", "*", "expression"]]
"#;

fn analyze(root: &Path, config: &Config) -> LintResult {
    let mut builder = Analyzer::builder()
        .root(root)
        .parser(CallParser)
        .config(config.clone());
    for rule in linebreaks::rules_from_config(config).expect("rules should load") {
        builder = builder.rule_box(rule);
    }
    builder
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed")
}

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dir");
    }
    std::fs::write(path, content).expect("write fixture");
}

#[test]
fn later_rule_wins_and_fix_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::write(root.join("linebreak-lint.toml"), CONFIG).expect("write config");
    write(root, "src/a.js", "foo();\nbar();\n\nbaz();\n");
    write(root, "src/b.js", "foo();bar();\n");

    let config = Config::from_file(&root.join("linebreak-lint.toml")).expect("config");
    let result = analyze(root, &config);

    assert_eq!(result.files_checked, 2);
    assert_eq!(result.violations.len(), 2, "{:#?}", result.violations);
    assert!(result
        .violations
        .iter()
        .all(|v| v.message == Requirement::Never.message()));
    assert!(!result.has_errors());
    assert_eq!(result.fixable_files(), vec![Path::new("src/a.js")]);

    let original = std::fs::read_to_string(root.join("src/a.js")).expect("read");
    let outcome = apply_replacements(&original, &result.replacements_for(Path::new("src/a.js")));
    assert_eq!(outcome.text, "foo();bar();baz();\n");
    std::fs::write(root.join("src/a.js"), &outcome.text).expect("write fix");

    assert!(analyze(root, &config).violations.is_empty());
}

#[test]
fn disabled_rule_and_excludes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(root, "src/a.js", "foo();\nbar();\n");
    write(root, "node_modules/dep/index.js", "foo();\nbar();\n");
    write(root, "src/notes.txt", "not javascript");

    let config = Config::parse(CONFIG).expect("config");
    let result = analyze(root, &config);
    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);

    let disabled = Config::parse(&format!("{CONFIG}enabled = false\n")).expect("config");
    let result = analyze(root, &disabled);
    assert!(result.violations.is_empty());
}

#[test]
fn unparsable_files_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(root, "ok.js", "foo();bar();\n");
    write(root, "broken.js", "foo() + 1;\n");

    let config = Config::parse(
        "[rules.linebreak-between-statements]\nstatements = [[\"always\", \"*\", \"*\"]]\n",
    )
    .expect("config");
    let result = analyze(root, &config);
    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);
    assert!(result.has_errors());
}
