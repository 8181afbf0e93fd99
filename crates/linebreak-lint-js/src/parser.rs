//! JavaScript source model built from a Tree-sitter parse tree.

use linebreak_lint_core::source::{
    BraceOwner, NodeId, NodeKind, Position, SourceFile, Span, StatementKind, SyntaxTree, Token,
    TokenKind, TokenStore,
};
use linebreak_lint_core::{ParseError, SourceParser};
use tracing::debug;
use tree_sitter::{Language, Node, Parser, Point};

const LANGUAGE_ID: &str = "javascript";

/// Node kinds kept as a single token even though the grammar splits them.
const ATOMIC: &[&str] = &["string", "regex", "comment", "html_comment", "hash_bang_line"];

/// Node kinds that are comments rather than code.
const COMMENTS: &[&str] = &["comment", "html_comment", "hash_bang_line"];

/// Parses JavaScript (and JSX) into the linebreak-lint source model.
pub struct JavaScriptParser {
    language: Language,
}

impl JavaScriptParser {
    /// Creates a new JavaScript parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl Default for JavaScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for JavaScriptParser {
    fn language_id(&self) -> &'static str {
        LANGUAGE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".js", ".mjs", ".cjs", ".jsx"]
    }

    fn parse(&self, source: &str) -> Result<SourceFile, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                language: LANGUAGE_ID,
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();
        if root.has_error() {
            let at = first_error(root).map_or(root.start_position(), |n| n.start_position());
            return Err(ParseError::Syntax {
                line: at.row + 1,
                column: at.column + 1,
            });
        }

        let mut tokens = Vec::new();
        collect_tokens(root, source, &mut tokens);

        let program = Span::new(0, source.len(), Position::new(1, 0), end_position(source));
        let mut syntax = SyntaxTree::new(program);
        let program_id = syntax.root();
        mirror_children(root, program_id, &mut syntax);

        debug!(
            tokens = tokens.len(),
            nodes = syntax.len(),
            "built javascript source model"
        );
        Ok(SourceFile::new(source, TokenStore::new(tokens), syntax))
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

fn position(point: Point) -> Position {
    Position::new(point.row + 1, point.column)
}

fn span(node: &Node<'_>) -> Span {
    Span::new(
        node.start_byte(),
        node.end_byte(),
        position(node.start_position()),
        position(node.end_position()),
    )
}

fn end_position(source: &str) -> Position {
    let line = source.matches('\n').count() + 1;
    let column = source.len() - source.rfind('\n').map_or(0, |i| i + 1);
    Position::new(line, column)
}

fn collect_tokens(node: Node<'_>, source: &str, tokens: &mut Vec<Token>) {
    if node.start_byte() == node.end_byte() {
        return;
    }
    if node.child_count() == 0 || ATOMIC.contains(&node.kind()) {
        let text = source.get(node.start_byte()..node.end_byte()).unwrap_or_default();
        let mut token = Token::new(token_kind(&node, text), text, span(&node));
        if let Some(owner) = brace_owner(&node) {
            token = token.with_closes(owner);
        }
        tokens.push(token);
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_tokens(child, source, tokens);
    }
}

fn token_kind(node: &Node<'_>, text: &str) -> TokenKind {
    match node.kind() {
        "comment" | "html_comment" if text.starts_with("/*") => TokenKind::BlockComment,
        "comment" | "html_comment" | "hash_bang_line" => TokenKind::LineComment,
        "string" => TokenKind::String,
        "regex" => TokenKind::RegExp,
        "number" => TokenKind::Numeric,
        "string_fragment" | "escape_sequence" | "`" => TokenKind::Template,
        _ if node.is_named() => TokenKind::Identifier,
        kind if kind.chars().all(|c| c.is_ascii_alphabetic()) => TokenKind::Keyword,
        _ => TokenKind::Punctuator,
    }
}

fn brace_owner(node: &Node<'_>) -> Option<BraceOwner> {
    if node.is_named() || node.kind() != "}" {
        return None;
    }
    match node.parent()?.kind() {
        "statement_block" => Some(BraceOwner::Block),
        "switch_body" => Some(BraceOwner::Switch),
        "class_body" => Some(BraceOwner::Class),
        _ => None,
    }
}

/// Mirrors the named children of `node` under `parent`. Comments are tokens
/// only, and a `switch_body` is transparent so its clauses hang directly off
/// the switch statement.
fn mirror_children(node: Node<'_>, parent: NodeId, syntax: &mut SyntaxTree) {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    for child in children {
        if COMMENTS.contains(&child.kind()) {
            continue;
        }
        if child.kind() == "switch_body" {
            mirror_children(child, parent, syntax);
            continue;
        }
        let id = syntax.push(parent, node_kind(&child), span(&child));
        mirror_children(child, id, syntax);
    }
}

fn node_kind(node: &Node<'_>) -> NodeKind {
    let statement = match node.kind() {
        "statement_block" => StatementKind::Block,
        "empty_statement" => StatementKind::Empty,
        "expression_statement" => StatementKind::Expression {
            string_literal: is_string_literal_statement(node),
        },
        "if_statement" => StatementKind::If,
        "labeled_statement" => StatementKind::Labeled,
        "break_statement" => StatementKind::Break,
        "continue_statement" => StatementKind::Continue,
        "with_statement" => StatementKind::With,
        "switch_statement" => StatementKind::Switch,
        "return_statement" => StatementKind::Return,
        "throw_statement" => StatementKind::Throw,
        "try_statement" => StatementKind::Try,
        "while_statement" => StatementKind::While,
        "do_statement" => StatementKind::DoWhile,
        "for_statement" => StatementKind::For,
        "for_in_statement" => StatementKind::ForIn,
        "debugger_statement" => StatementKind::Debugger,
        "lexical_declaration" | "variable_declaration" => StatementKind::VariableDeclaration,
        "function_declaration" | "generator_function_declaration" => {
            StatementKind::FunctionDeclaration
        }
        "class_declaration" => StatementKind::ClassDeclaration,
        "import_statement" => StatementKind::Import,
        "export_statement" => StatementKind::Export,
        "switch_case" | "switch_default" => return NodeKind::SwitchCase,
        _ => return NodeKind::Other,
    };
    NodeKind::Statement(statement)
}

fn is_string_literal_statement(node: &Node<'_>) -> bool {
    let mut cursor = node.walk();
    let mut expressions = node
        .named_children(&mut cursor)
        .filter(|child| !COMMENTS.contains(&child.kind()));
    matches!(
        (expressions.next(), expressions.next()),
        (Some(only), None) if only.kind() == "string"
    )
}
