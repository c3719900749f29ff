pub mod group;
pub mod lexer;
pub mod nav;
pub mod tree;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sqlparser::dialect::{Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};

pub use crate::sql::{
    lexer::Lexeme,
    tree::{GroupKind, NodeId, NodeKind, TokenTree, TokenType},
};
use crate::error::RewriteError;

/// Tokenizer dialect used to lex statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    Generic,
    Sqlite,
    Postgres,
    Mysql,
}

impl SqlDialect {
    pub(crate) fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Mysql => Box::new(MySqlDialect {}),
        }
    }
}

/// Replace Trac-style `%s` placeholders with `?` so SQLite can bind them.
pub fn format_to_qmark(sql: &str, dialect: SqlDialect) -> Result<Cow<'_, str>, RewriteError> {
    if !sql.contains("%s") {
        return Ok(Cow::Borrowed(sql));
    }

    let converted = lexer::tokenize(sql, dialect)?
        .into_iter()
        .map(|lexeme| {
            if lexeme.ttype == TokenType::Placeholder && lexeme.text == "%s" {
                "?".to_string()
            } else {
                lexeme.text
            }
        })
        .collect();
    Ok(Cow::Owned(converted))
}
