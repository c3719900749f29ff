use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the public API.
#[derive(Debug, Error)]
pub enum Error {
    /// A statement could not be rewritten; carries the offending SQL.
    #[error("failed to translate SQL '{sql}': {source}")]
    Translate {
        sql: String,
        #[source]
        source: RewriteError,
    },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised while rewriting a single statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// The statement's structure is not one the rewriter understands.
    #[error("unsupported SQL: {0}")]
    Unsupported(String),

    /// Unbalanced parentheses or unexpected tokens inside a tuple or predicate.
    #[error("malformed SQL: {0}")]
    Malformed(String),

    /// A clause the statement kind requires is absent.
    #[error("missing clause: {0}")]
    MissingClause(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Token tree invariant broken, e.g. a node is not a child of the expected parent.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RewriteError {
    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub(crate) fn missing(msg: impl Into<String>) -> Self {
        Self::MissingClause(msg.into())
    }

    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
