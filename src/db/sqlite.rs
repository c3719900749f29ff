use std::{borrow::Cow, collections::VecDeque, path::Path};

use log::warn;
use rusqlite::params_from_iter;

use crate::{
    db::{Connection, Cursor, DbContext, Row, Value},
    error::{Error, Result},
    sql::{SqlDialect, format_to_qmark},
};

/// rusqlite connection speaking the [`Connection`] interface.
#[derive(Debug)]
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    pub fn new(conn: rusqlite::Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(rusqlite::Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(rusqlite::Connection::open_in_memory()?))
    }

    pub fn raw(&self) -> &rusqlite::Connection {
        &self.conn
    }
}

impl AsRef<rusqlite::Connection> for SqliteConnection {
    fn as_ref(&self) -> &rusqlite::Connection {
        &self.conn
    }
}

impl Connection for SqliteConnection {
    type Cursor<'c> = SqliteCursor<'c>;

    fn cursor(&self) -> Result<Self::Cursor<'_>> {
        Ok(SqliteCursor {
            conn: &self.conn,
            rows: VecDeque::new(),
            row_count: None,
        })
    }
}

/// Buffers the rows of the last query.
#[derive(Debug)]
pub struct SqliteCursor<'c> {
    conn: &'c rusqlite::Connection,
    rows: VecDeque<Row>,
    row_count: Option<usize>,
}

/// Accept Trac-style `%s` parameters alongside SQLite's own.
fn prepare_sql(sql: &str) -> Result<Cow<'_, str>> {
    format_to_qmark(sql, SqlDialect::Sqlite).map_err(|source| Error::Translate {
        sql: sql.to_string(),
        source,
    })
}

impl Cursor for SqliteCursor<'_> {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()> {
        self.rows.clear();
        self.row_count = None;

        let sql = prepare_sql(sql)?;
        let mut stmt = self.conn.prepare(&sql)?;
        let columns = stmt.column_count();
        if columns == 0 {
            self.row_count = Some(stmt.execute(params_from_iter(params))?);
            return Ok(());
        }

        self.rows = stmt
            .query_map(params_from_iter(params), |row| {
                (0..columns).map(|i| row.get::<_, Value>(i)).collect()
            })?
            .collect::<rusqlite::Result<VecDeque<Row>>>()?;
        Ok(())
    }

    fn execute_many(&mut self, sql: &str, params: &[Vec<Value>]) -> Result<()> {
        self.rows.clear();
        self.row_count = None;

        let sql = prepare_sql(sql)?;
        let mut stmt = self.conn.prepare(&sql)?;
        let mut changed = 0;
        for set in params {
            changed += stmt.execute(params_from_iter(set))?;
        }
        self.row_count = Some(changed);
        Ok(())
    }

    fn fetch_one(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        Ok(self.rows.drain(..).collect())
    }

    fn row_count(&self) -> Option<usize> {
        self.row_count
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContextMode {
    /// Statements run in autocommit mode.
    #[default]
    Query,
    /// `BEGIN` on entry, `COMMIT` on success, `ROLLBACK` on error.
    Transaction,
}

/// Query or transaction scope over any connection backed by rusqlite.
#[derive(Debug)]
pub struct SqliteContext<'a, C> {
    conn: &'a C,
    mode: ContextMode,
}

impl<'a, C> SqliteContext<'a, C> {
    pub fn query(conn: &'a C) -> Self {
        Self {
            conn,
            mode: ContextMode::Query,
        }
    }

    pub fn transaction(conn: &'a C) -> Self {
        Self {
            conn,
            mode: ContextMode::Transaction,
        }
    }

    pub fn mode(&self) -> ContextMode {
        self.mode
    }
}

impl<C: Connection + AsRef<rusqlite::Connection>> DbContext for SqliteContext<'_, C> {
    type Connection = C;

    /// In transaction mode, a context entered while a transaction is already
    /// open joins it; the outermost context commits or rolls back.
    fn run<R>(&self, f: impl FnOnce(&C) -> Result<R>) -> Result<R> {
        let raw = self.conn.as_ref();
        if self.mode == ContextMode::Query || !raw.is_autocommit() {
            return f(self.conn);
        }

        let tx = raw.unchecked_transaction()?;
        match f(self.conn) {
            Ok(value) => {
                // a failed COMMIT rolls back when `tx` drops
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback() {
                    warn!("rollback failed: {rollback}");
                }
                Err(err)
            }
        }
    }
}
