use std::fmt;

use crate::{
    error::RewriteError,
    sql::{
        SqlDialect, group,
        lexer::{self, Lexeme},
    },
};

/// Handle to a node in a [`TokenTree`]. Stays valid across every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Whitespace,
    Comment,
    Keyword,
    /// SELECT, INSERT, UPDATE, DELETE
    Dml,
    /// CREATE, ALTER, DROP
    Ddl,
    Name,
    String,
    Number,
    Placeholder,
    Punctuation,
    Operator,
    Comparison,
    Wildcard,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Statement,
    Parenthesis,
    /// Dotted name such as `t.id`
    Identifier,
    IdentifierList,
    Where,
    Comparison,
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Token(TokenType),
    Group(GroupKind),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    text: String,
    normalized: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed concrete syntax tree of one statement.
///
/// Leaves hold the exact source text, so serializing an untouched tree
/// reproduces the input byte for byte. Nodes that are removed stay in the
/// arena but are unreachable from the root.
#[derive(Debug, Clone)]
pub struct TokenTree {
    nodes: Vec<Node>,
    root: NodeId,
    dialect: SqlDialect,
}

impl TokenTree {
    pub fn parse(sql: &str, dialect: SqlDialect) -> Result<Self, RewriteError> {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            dialect,
        };
        tree.root = tree.build(sql)?;
        Ok(tree)
    }

    /// Parse `sql` into a detached Statement group inside this arena.
    pub fn parse_fragment(&mut self, sql: &str) -> Result<NodeId, RewriteError> {
        self.build(sql)
    }

    fn build(&mut self, sql: &str) -> Result<NodeId, RewriteError> {
        let lexemes = lexer::tokenize(sql, self.dialect)?;
        group::build(self, lexemes)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub(crate) fn push_token(&mut self, lexeme: Lexeme) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::Token(lexeme.ttype),
            text: lexeme.text,
            normalized: lexeme.normalized,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached leaf.
    pub fn new_token(&mut self, ttype: TokenType, text: &str) -> NodeId {
        self.push_token(Lexeme::new(ttype, text))
    }

    pub(crate) fn new_group(&mut self, kind: GroupKind, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::Group(kind),
            text: String::new(),
            normalized: String::new(),
            parent: None,
            children: Vec::new(),
        });
        self.set_children(id, children);
        id
    }

    pub(crate) fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        for &child in &children {
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes[id.0].children = children;
    }

    /// Take the children out of `id`. Their parent links are left stale until
    /// they are handed to [`Self::set_children`].
    pub(crate) fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        std::mem::take(&mut self.nodes[id.0].children)
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.nodes[id.0].parent = parent;
    }

    pub(crate) fn children_mut(&mut self, id: NodeId) -> &mut Vec<NodeId> {
        &mut self.nodes[id.0].children
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn token_type(&self, id: NodeId) -> Option<TokenType> {
        match self.kind(id) {
            NodeKind::Token(ttype) => Some(ttype),
            NodeKind::Group(_) => None,
        }
    }

    pub fn group_kind(&self, id: NodeId) -> Option<GroupKind> {
        match self.kind(id) {
            NodeKind::Group(kind) => Some(kind),
            NodeKind::Token(_) => None,
        }
    }

    pub fn is_group(&self, id: NodeId, kind: GroupKind) -> bool {
        self.kind(id) == NodeKind::Group(kind)
    }

    pub fn is_token(&self, id: NodeId, ttype: TokenType) -> bool {
        self.kind(id) == NodeKind::Token(ttype)
    }

    /// Source text of a leaf; empty for groups.
    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn normalized(&self, id: NodeId) -> &str {
        &self.nodes[id.0].normalized
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Whitespace and comments.
    pub fn is_trivia(&self, id: NodeId) -> bool {
        matches!(
            self.kind(id),
            NodeKind::Token(TokenType::Whitespace | TokenType::Comment)
        )
    }

    /// Keyword-like leaf whose upper-cased value is `word`.
    pub fn is_keyword(&self, id: NodeId, word: &str) -> bool {
        self.is_keyword_like(id) && self.normalized(id) == word
    }

    pub fn is_any_keyword(&self, id: NodeId, words: &[&str]) -> bool {
        self.is_keyword_like(id) && words.contains(&self.normalized(id))
    }

    fn is_keyword_like(&self, id: NodeId) -> bool {
        matches!(
            self.kind(id),
            NodeKind::Token(TokenType::Keyword | TokenType::Dml | TokenType::Ddl)
        )
    }

    pub fn is_punct(&self, id: NodeId, punct: &str) -> bool {
        self.is_token(id, TokenType::Punctuation) && self.text(id) == punct
    }

    /// All leaves below `id` in source order.
    pub fn leaves(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_leaves(id, &mut out);
        out
    }

    fn collect_leaves(&self, id: NodeId, out: &mut Vec<NodeId>) {
        match self.kind(id) {
            NodeKind::Token(_) => out.push(id),
            NodeKind::Group(_) => {
                for &child in self.children(id) {
                    self.collect_leaves(child, out);
                }
            }
        }
    }

    /// Serialize the subtree rooted at `id`.
    pub fn to_sql(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_sql(id, &mut out);
        out
    }

    fn write_sql(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Token(_) => out.push_str(self.text(id)),
            NodeKind::Group(_) => {
                for &child in self.children(id) {
                    self.write_sql(child, out);
                }
            }
        }
    }
}

impl fmt::Display for TokenTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql(self.root))
    }
}
