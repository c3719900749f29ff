use std::marker::PhantomData;

use crate::context::{self, Mark, ProductPrefix};

/// Makes a product the innermost one on this thread until dropped.
///
/// Dropping restores whatever was innermost when the scope was entered, so
/// an outer scope dropped early also ends every scope nested in it. A scope
/// ended that way does nothing when it is dropped later.
#[must_use = "the product is only active while the scope is alive"]
#[derive(Debug)]
pub struct ProductScope {
    mark: Mark,
    // tied to the thread's stack
    _not_send: PhantomData<*const ()>,
}

impl ProductScope {
    pub fn enter(product: Option<ProductPrefix>) -> Self {
        Self {
            mark: context::push(product),
            _not_send: PhantomData,
        }
    }
}

impl Drop for ProductScope {
    fn drop(&mut self) {
        context::release(self.mark);
    }
}
