use std::fmt::Debug;

use crate::config::TableRules;

/// Bucket a table falls into for the active scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableClass {
    /// Shared infrastructure table, left alone.
    Skip,
    /// Shared table filtered by the product column.
    Translate,
    /// Per-product physical table `"<product>_<name>"`.
    Prefix,
}

/// The points where the two product isolation strategies differ.
pub trait IsolationScheme: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, rules: &TableRules, table: &str) -> TableClass;

    /// Alias given to the filtered view that replaces a translate-set table.
    fn filtered_view_alias<'a>(&self, explicit: Option<&'a str>, table: &'a str, joined: bool) -> Option<&'a str>;

    /// Whether subselects in `JOIN ... ON` predicates are rewritten.
    fn rewrites_join_predicates(&self) -> bool;

    /// Whether a SELECT at the top of a statement must have a FROM clause.
    fn requires_from(&self) -> bool;

    fn prefixes_index_names(&self) -> bool;

    fn prefixes_constraint_names(&self) -> bool;
}

/// Skip, translate, or prefix. Filtered views are always aliased.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilteredViewScheme;

impl IsolationScheme for FilteredViewScheme {
    fn name(&self) -> &'static str {
        "filtered_view"
    }

    fn classify(&self, rules: &TableRules, table: &str) -> TableClass {
        if rules.is_skip(table) {
            TableClass::Skip
        } else if rules.is_translate(table) {
            TableClass::Translate
        } else {
            TableClass::Prefix
        }
    }

    fn filtered_view_alias<'a>(&self, explicit: Option<&'a str>, table: &'a str, _joined: bool) -> Option<&'a str> {
        Some(explicit.unwrap_or(table))
    }

    fn rewrites_join_predicates(&self) -> bool {
        true
    }

    fn requires_from(&self) -> bool {
        false
    }

    fn prefixes_index_names(&self) -> bool {
        true
    }

    fn prefixes_constraint_names(&self) -> bool {
        true
    }
}

/// Translate or prefix; the skip set is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixedTableScheme;

impl IsolationScheme for PrefixedTableScheme {
    fn name(&self) -> &'static str {
        "prefixed_table"
    }

    fn classify(&self, rules: &TableRules, table: &str) -> TableClass {
        if rules.is_translate(table) {
            TableClass::Translate
        } else {
            TableClass::Prefix
        }
    }

    fn filtered_view_alias<'a>(&self, explicit: Option<&'a str>, table: &'a str, joined: bool) -> Option<&'a str> {
        explicit.or(joined.then_some(table))
    }

    fn rewrites_join_predicates(&self) -> bool {
        false
    }

    fn requires_from(&self) -> bool {
        true
    }

    fn prefixes_index_names(&self) -> bool {
        false
    }

    fn prefixes_constraint_names(&self) -> bool {
        false
    }
}
