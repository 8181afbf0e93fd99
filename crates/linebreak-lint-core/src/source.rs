//! Source model handed to the engine by a language adapter.
//!
//! The engine never parses text. A [`SourceParser`] implementation turns raw
//! source into a [`SourceFile`]: a flat, ordered token stream (comments
//! included) and an arena of syntax nodes tagged with a [`NodeKind`].

use std::fmt;
use std::ops::Index;

/// A line/column position.
///
/// Lines are 1-indexed, columns are 0-indexed byte offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Byte column within the line (0-indexed).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A byte range in the source together with its line/column bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Position of `start`.
    pub start_pos: Position,
    /// Position of `end`.
    pub end_pos: Position,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, start_pos: Position, end_pos: Position) -> Self {
        Self {
            start,
            end,
            start_pos,
            end_pos,
        }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` lies entirely within this span.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Reserved or contextual keyword (`if`, `let`, `function`, ...).
    Keyword,
    /// Identifiers and other named leaves.
    Identifier,
    /// Operators and delimiters.
    Punctuator,
    /// String literal.
    String,
    /// Piece of a template literal.
    Template,
    /// Numeric literal.
    Numeric,
    /// Regular expression literal.
    RegExp,
    /// `// ...` comment (also used for hashbang lines).
    LineComment,
    /// `/* ... */` comment.
    BlockComment,
}

impl TokenKind {
    /// Whether this kind is a comment.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

/// The body a closing brace belongs to, when it ends a block-like construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BraceOwner {
    /// A block statement or function body.
    Block,
    /// A `switch` body.
    Switch,
    /// A class body.
    Class,
}

/// A single token of the source, comments included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// Source text of the token.
    pub text: String,
    /// Location of the token.
    pub span: Span,
    /// Set on `}` tokens that close a block, switch or class body.
    pub closes: Option<BraceOwner>,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            closes: None,
        }
    }

    /// Marks this token as closing the given body.
    #[must_use]
    pub fn with_closes(mut self, owner: BraceOwner) -> Self {
        self.closes = Some(owner);
        self
    }

    /// Whether this token is a comment.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Whether this token is a `;` punctuator.
    #[must_use]
    pub fn is_semicolon(&self) -> bool {
        self.kind == TokenKind::Punctuator && self.text == ";"
    }
}

/// Ordered token stream with navigation helpers.
///
/// Indices handed out by the navigation methods are only meaningful for the
/// store that produced them.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: Vec<Token>,
}

impl TokenStore {
    /// Creates a store, ordering tokens by start offset.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        tokens.sort_by_key(|t| t.span.start);
        Self { tokens }
    }

    /// Number of tokens, comments included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over all tokens in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// First non-comment token lying inside `span`.
    #[must_use]
    pub fn first_in(&self, span: &Span) -> Option<usize> {
        let from = self.tokens.partition_point(|t| t.span.start < span.start);
        self.tokens[from..]
            .iter()
            .take_while(|t| t.span.end <= span.end)
            .position(|t| !t.is_comment())
            .map(|offset| from + offset)
    }

    /// Last non-comment token lying inside `span` that satisfies `accept`.
    #[must_use]
    pub fn last_in(&self, span: &Span, accept: impl Fn(&Token) -> bool) -> Option<usize> {
        let until = self.tokens.partition_point(|t| t.span.start < span.end);
        (0..until)
            .rev()
            .take_while(|&i| self.tokens[i].span.start >= span.start)
            .find(|&i| {
                let token = &self.tokens[i];
                token.span.end <= span.end && !token.is_comment() && accept(token)
            })
    }

    /// The token before `index`, optionally skipping comments.
    #[must_use]
    pub fn before(&self, index: usize, include_comments: bool) -> Option<usize> {
        (0..index.min(self.tokens.len()))
            .rev()
            .find(|&i| include_comments || !self.tokens[i].is_comment())
    }

    /// The token after `index`, optionally skipping comments.
    #[must_use]
    pub fn after(&self, index: usize, include_comments: bool) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| include_comments || !self.tokens[i].is_comment())
    }

    /// Tokens strictly between `from` and `to`, optionally skipping comments.
    pub fn between(
        &self,
        from: usize,
        to: usize,
        include_comments: bool,
    ) -> impl Iterator<Item = &Token> {
        let start = (from + 1).min(self.tokens.len());
        let end = to.clamp(start, self.tokens.len());
        self.tokens[start..end]
            .iter()
            .filter(move |t| include_comments || !t.is_comment())
    }
}

impl Index<usize> for TokenStore {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

/// Statement categories produced by the parsing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `{ ... }`
    Block,
    /// `;`
    Empty,
    /// An expression statement. `string_literal` is set when the whole
    /// expression is a plain string literal.
    Expression {
        /// The expression is a single string literal.
        string_literal: bool,
    },
    /// `if (...) ...`
    If,
    /// `label: ...`
    Labeled,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `with (...) ...`
    With,
    /// `switch (...) { ... }`
    Switch,
    /// `return`
    Return,
    /// `throw`
    Throw,
    /// `try { ... }`
    Try,
    /// `while (...) ...`
    While,
    /// `do ... while (...)`
    DoWhile,
    /// `for (...; ...; ...) ...`
    For,
    /// `for (... in ...)` and `for (... of ...)`
    ForIn,
    /// `debugger`
    Debugger,
    /// `var`, `let` and `const` declarations.
    VariableDeclaration,
    /// Function and generator declarations.
    FunctionDeclaration,
    /// `class Foo { ... }`
    ClassDeclaration,
    /// `import ...`
    Import,
    /// `export ...`
    Export,
}

/// Kind tag of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root of the tree.
    Program,
    /// A statement.
    Statement(StatementKind),
    /// A `case` or `default` clause of a switch statement.
    SwitchCase,
    /// Any other node (expressions, clauses, declarations parts, ...).
    Other,
}

impl NodeKind {
    /// Whether nodes of this kind directly hold an ordered list of statements
    /// (or of switch clauses). These containers open a scope during traversal.
    #[must_use]
    pub const fn is_statement_list(self) -> bool {
        matches!(
            self,
            Self::Program
                | Self::SwitchCase
                | Self::Statement(StatementKind::Block | StatementKind::Switch)
        )
    }

    /// Whether nodes of this kind take part in adjacency checks.
    #[must_use]
    pub const fn is_verifiable(self) -> bool {
        matches!(self, Self::Statement(_) | Self::SwitchCase)
    }
}

/// Index of a node in a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Kind tag.
    pub kind: NodeKind,
    /// Source range.
    pub span: Span,
    /// Parent node, `None` for the program root.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// Arena of syntax nodes rooted at a [`NodeKind::Program`] node.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    /// Creates a tree holding only the program root.
    #[must_use]
    pub fn new(program: Span) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Program,
                span: program,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The program root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(Node {
            kind,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

/// A parsed source file: text, tokens and syntax tree.
#[derive(Debug, Clone)]
pub struct SourceFile {
    text: String,
    tokens: TokenStore,
    tree: SyntaxTree,
}

impl SourceFile {
    /// Assembles a source file from its parts.
    #[must_use]
    pub fn new(text: impl Into<String>, tokens: TokenStore, tree: SyntaxTree) -> Self {
        Self {
            text: text.into(),
            tokens,
            tree,
        }
    }

    /// Original source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Token stream.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &SyntaxTree {
        &self.tree
    }
}

/// Errors produced by a [`SourceParser`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Loader error detail.
        message: String,
    },

    /// The parser returned no tree.
    #[error("parser produced no syntax tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line number (1-indexed).
        line: usize,
        /// Column number (1-indexed).
        column: usize,
    },
}

/// Language adapter producing the source model.
///
/// Implement this to teach the analyzer a new language.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"javascript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles (e.g., `&[".js", ".mjs"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into tokens and a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed.
    fn parse(&self, source: &str) -> Result<SourceFile, ParseError>;
}
