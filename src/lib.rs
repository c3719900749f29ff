//! Multi-product SQL rewriting.
//!
//! Statements written for a single-tenant schema are rewritten so that they
//! only see and modify the rows of the current product: shared tables are
//! filtered by a product column, other tables are swapped for per-product
//! physical tables, and infrastructure tables are left alone.

pub mod cache;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod rewrite;
pub mod sql;
pub mod translate;

pub use crate::{
    cache::{CacheStats, TranslationCache, TranslationService},
    config::{SchemeKind, TableRules, TranslatorConfig},
    context::{ProductPrefix, ProductScope, current_product, with_product},
    error::{Error, Result, RewriteError},
    rewrite::{FilteredViewScheme, IsolationScheme, PrefixedTableScheme, TableClass},
    sql::SqlDialect,
    translate::SqlTranslator,
};
