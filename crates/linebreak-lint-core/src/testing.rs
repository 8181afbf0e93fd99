//! Hand-built source models for unit tests.
//!
//! A tiny lexer splits ASCII snippets into tokens; statements are declared
//! explicitly by their text, so tests control the tree shape exactly.

use crate::source::{
    BraceOwner, NodeId, NodeKind, Position, SourceFile, Span, StatementKind, SyntaxTree, Token,
    TokenKind, TokenStore,
};

const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "do", "else",
    "export", "finally", "for", "function", "if", "import", "let", "new", "return", "switch",
    "throw", "try", "var", "while", "with",
];

pub(crate) struct Fixture {
    text: String,
    line_starts: Vec<usize>,
    tokens: Vec<Token>,
    tree: SyntaxTree,
}

impl Fixture {
    pub(crate) fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        let mut fixture = Self {
            text: text.to_string(),
            line_starts,
            tokens: Vec::new(),
            tree: SyntaxTree::new(Span::default()),
        };
        fixture.tree = SyntaxTree::new(fixture.span(0, text.len()));
        fixture.tokens = fixture.lex();
        fixture
    }

    pub(crate) fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Adds `snippet` as the next child of `parent`, located after the
    /// previous sibling (or at the parent's start).
    pub(crate) fn push(&mut self, parent: NodeId, kind: NodeKind, snippet: &str) -> NodeId {
        let parent_node = self.tree.node(parent).expect("parent exists");
        let from = parent_node
            .children
            .last()
            .and_then(|&c| self.tree.node(c))
            .map_or(parent_node.span.start, |c| c.span.end);
        let start = from
            + self.text[from..]
                .find(snippet)
                .unwrap_or_else(|| panic!("snippet {snippet:?} not found after {from}"));
        let span = self.span(start, start + snippet.len());

        let owner = match kind {
            NodeKind::Statement(StatementKind::Block) => Some(BraceOwner::Block),
            NodeKind::Statement(StatementKind::Switch) => Some(BraceOwner::Switch),
            NodeKind::Statement(StatementKind::ClassDeclaration) => Some(BraceOwner::Class),
            _ => None,
        };
        if let Some(owner) = owner {
            if let Some(brace) = self
                .tokens
                .iter_mut()
                .rev()
                .find(|t| span.contains(&t.span) && t.text == "}")
            {
                brace.closes = Some(owner);
            }
        }

        self.tree.push(parent, kind, span)
    }

    pub(crate) fn stmt(&mut self, parent: NodeId, kind: StatementKind, snippet: &str) -> NodeId {
        self.push(parent, NodeKind::Statement(kind), snippet)
    }

    pub(crate) fn expr(&mut self, parent: NodeId, snippet: &str) -> NodeId {
        self.stmt(
            parent,
            StatementKind::Expression {
                string_literal: false,
            },
            snippet,
        )
    }

    pub(crate) fn build(self) -> SourceFile {
        SourceFile::new(self.text, TokenStore::new(self.tokens), self.tree)
    }

    fn position(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&s| s <= offset);
        Position::new(line, offset - self.line_starts[line - 1])
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(start, end, self.position(start), self.position(end))
    }

    fn lex(&self) -> Vec<Token> {
        let text = self.text.as_str();
        let bytes = text.as_bytes();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i];
            let start = i;
            let kind = if c.is_ascii_whitespace() {
                i += 1;
                continue;
            } else if text[i..].starts_with("//") {
                i = text[i..].find('\n').map_or(text.len(), |n| i + n);
                TokenKind::LineComment
            } else if text[i..].starts_with("/*") {
                i = text[i + 2..]
                    .find("*/")
                    .map_or(text.len(), |n| i + 2 + n + 2);
                TokenKind::BlockComment
            } else if c == b'"' || c == b'\'' {
                i += 1;
                while i < bytes.len() && bytes[i] != c {
                    i += 1;
                }
                i = (i + 1).min(bytes.len());
                TokenKind::String
            } else if c.is_ascii_alphabetic() || c == b'_' || c == b'$' {
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'$')
                {
                    i += 1;
                }
                if KEYWORDS.contains(&&text[start..i]) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                }
            } else if c.is_ascii_digit() {
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                TokenKind::Numeric
            } else {
                i += 1;
                TokenKind::Punctuator
            };
            tokens.push(Token::new(kind, &text[start..i], self.span(start, i)));
        }

        tokens
    }
}
