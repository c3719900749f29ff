use crate::{
    context::{ProductPrefix, ProductScope},
    db::{Connection, Cursor, DbContext, Row, Value},
    error::Result,
};

/// Connection bound to one product. Every call runs inside a
/// [`ProductScope`] for that product.
#[derive(Debug)]
pub struct ProductConnection<'a, C> {
    inner: &'a C,
    product: Option<ProductPrefix>,
}

impl<'a, C> ProductConnection<'a, C> {
    pub fn new(inner: &'a C, product: Option<ProductPrefix>) -> Self {
        Self { inner, product }
    }

    pub fn product(&self) -> Option<&ProductPrefix> {
        self.product.as_ref()
    }
}

impl<C: Connection> Connection for ProductConnection<'_, C> {
    type Cursor<'c>
        = ProductCursor<C::Cursor<'c>>
    where
        Self: 'c;

    fn cursor(&self) -> Result<Self::Cursor<'_>> {
        let _scope = ProductScope::enter(self.product.clone());
        Ok(ProductCursor {
            inner: self.inner.cursor()?,
            product: self.product.clone(),
        })
    }
}

#[derive(Debug)]
pub struct ProductCursor<K> {
    inner: K,
    product: Option<ProductPrefix>,
}

impl<K> ProductCursor<K> {
    fn scope(&self) -> ProductScope {
        ProductScope::enter(self.product.clone())
    }
}

impl<K: Cursor> Cursor for ProductCursor<K> {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()> {
        let _scope = self.scope();
        self.inner.execute(sql, params)
    }

    fn execute_many(&mut self, sql: &str, params: &[Vec<Value>]) -> Result<()> {
        let _scope = self.scope();
        self.inner.execute_many(sql, params)
    }

    fn fetch_one(&mut self) -> Result<Option<Row>> {
        let _scope = self.scope();
        self.inner.fetch_one()
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        let _scope = self.scope();
        self.inner.fetch_all()
    }

    fn row_count(&self) -> Option<usize> {
        self.inner.row_count()
    }
}

/// Runs work from an inner [`DbContext`] on behalf of one product.
///
/// The product is the innermost one on this thread for the whole of
/// [`run`](Self::run), so nested contexts see the closest product.
#[derive(Debug)]
pub struct ProductContext<'d, D> {
    inner: &'d D,
    product: Option<ProductPrefix>,
}

impl<'d, D: DbContext> ProductContext<'d, D> {
    pub fn new(inner: &'d D, product: Option<ProductPrefix>) -> Self {
        Self { inner, product }
    }

    pub fn product(&self) -> Option<&ProductPrefix> {
        self.product.as_ref()
    }

    pub fn run<R>(&self, f: impl FnOnce(&ProductConnection<'_, D::Connection>) -> Result<R>) -> Result<R> {
        let _scope = ProductScope::enter(self.product.clone());
        self.inner
            .run(|conn| f(&ProductConnection::new(conn, self.product.clone())))
    }

    /// Execute one statement and return its rows.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.run(|conn| conn.execute(sql, params)?.fetch_all())
    }

    /// Execute one statement per parameter set and return the changed row count.
    pub fn execute_many(&self, sql: &str, params: &[Vec<Value>]) -> Result<Option<usize>> {
        self.run(|conn| Ok(conn.execute_many(sql, params)?.row_count()))
    }
}
