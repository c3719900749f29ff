use std::sync::Arc;

use crate::{
    cache::TranslationService,
    context::current_product,
    db::{Connection, Cursor, Row, Value},
    error::Result,
};

/// Connection whose cursors translate every statement for the innermost
/// product of the calling thread.
#[derive(Debug)]
pub struct TranslatingConnection<C> {
    inner: C,
    service: Arc<TranslationService>,
}

impl<C> TranslatingConnection<C> {
    pub fn new(inner: C, service: Arc<TranslationService>) -> Self {
        Self { inner, service }
    }

    pub fn service(&self) -> &Arc<TranslationService> {
        &self.service
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Connection> Connection for TranslatingConnection<C> {
    type Cursor<'c>
        = TranslatingCursor<'c, C::Cursor<'c>>
    where
        Self: 'c;

    fn cursor(&self) -> Result<Self::Cursor<'_>> {
        Ok(TranslatingCursor {
            inner: self.inner.cursor()?,
            service: &self.service,
        })
    }
}

impl<C: AsRef<rusqlite::Connection>> AsRef<rusqlite::Connection> for TranslatingConnection<C> {
    fn as_ref(&self) -> &rusqlite::Connection {
        self.inner.as_ref()
    }
}

#[derive(Debug)]
pub struct TranslatingCursor<'c, K> {
    inner: K,
    service: &'c TranslationService,
}

impl<K: Cursor> TranslatingCursor<'_, K> {
    fn translate(&self, sql: &str) -> Result<Arc<str>> {
        let product = current_product();
        self.service.translate_sql(product.as_ref(), sql)
    }
}

impl<K: Cursor> Cursor for TranslatingCursor<'_, K> {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()> {
        let sql = self.translate(sql)?;
        self.inner.execute(&sql, params)
    }

    fn execute_many(&mut self, sql: &str, params: &[Vec<Value>]) -> Result<()> {
        let sql = self.translate(sql)?;
        self.inner.execute_many(&sql, params)
    }

    fn fetch_one(&mut self) -> Result<Option<Row>> {
        self.inner.fetch_one()
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        self.inner.fetch_all()
    }

    fn row_count(&self) -> Option<usize> {
        self.inner.row_count()
    }
}
