pub mod product_stack;
pub mod scope;

use std::{cell::RefCell, fmt};

use serde::{Deserialize, Serialize};

pub use crate::context::{
    product_stack::{Mark, ProductStack},
    scope::ProductScope,
};

thread_local! {
    static PRODUCTS: RefCell<ProductStack> = RefCell::new(ProductStack::default());
}

/// Identifier of the product (tenant) a statement runs for.
///
/// The empty prefix is the global product: prefixed tables keep their bare
/// names, filtered views select rows whose product column is `''`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductPrefix(String);

impl ProductPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn global() -> Self {
        Self(String::new())
    }

    pub fn is_global(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductPrefix {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}

impl From<String> for ProductPrefix {
    fn from(prefix: String) -> Self {
        Self(prefix)
    }
}

/// Innermost product entered on this thread, if any.
pub fn current_product() -> Option<ProductPrefix> {
    PRODUCTS.with(|stack| stack.borrow().current().cloned())
}

/// Run `f` with `product` as the innermost product of this thread.
pub fn with_product<F, R>(product: Option<ProductPrefix>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _scope = ProductScope::enter(product);
    f()
}

fn push(product: Option<ProductPrefix>) -> Mark {
    PRODUCTS.with(|stack| stack.borrow_mut().push(product))
}

fn release(mark: Mark) {
    PRODUCTS.with(|stack| stack.borrow_mut().release(mark));
}
