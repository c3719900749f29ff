pub mod product;
pub mod sqlite;
pub mod translating;

pub use rusqlite::types::Value;

pub use crate::db::{
    product::{ProductConnection, ProductContext, ProductCursor},
    sqlite::{ContextMode, SqliteConnection, SqliteContext, SqliteCursor},
    translating::{TranslatingConnection, TranslatingCursor},
};
use crate::error::Result;

/// One result row, in column order.
pub type Row = Vec<Value>;

/// Statement executor with buffered results.
pub trait Cursor {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()>;

    /// Run `sql` once per parameter set.
    fn execute_many(&mut self, sql: &str, params: &[Vec<Value>]) -> Result<()>;

    fn fetch_one(&mut self) -> Result<Option<Row>>;

    fn fetch_all(&mut self) -> Result<Vec<Row>>;

    /// Rows changed by the last statement, when it changed any.
    fn row_count(&self) -> Option<usize>;
}

pub trait Connection {
    type Cursor<'c>: Cursor
    where
        Self: 'c;

    fn cursor(&self) -> Result<Self::Cursor<'_>>;

    /// `cursor()` followed by `execute`.
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Self::Cursor<'_>> {
        let mut cursor = self.cursor()?;
        cursor.execute(sql, params)?;
        Ok(cursor)
    }

    fn execute_many(&self, sql: &str, params: &[Vec<Value>]) -> Result<Self::Cursor<'_>> {
        let mut cursor = self.cursor()?;
        cursor.execute_many(sql, params)?;
        Ok(cursor)
    }
}

/// Scope around a unit of database work, such as a transaction.
pub trait DbContext {
    type Connection: Connection;

    fn run<R>(&self, f: impl FnOnce(&Self::Connection) -> Result<R>) -> Result<R>;
}
