use std::{collections::HashSet, env, fs, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    rewrite::{FilteredViewScheme, IsolationScheme, PrefixedTableScheme},
    sql::SqlDialect,
};

/// Set to log every statement before and after translation.
pub const DEBUG_SQL_ENV: &str = "TENANTSQL_DEBUG_SQL";
/// Set to start the service with translation switched off.
pub const DISABLE_ENV: &str = "TENANTSQL_DISABLE";

const DEFAULT_SKIP_TABLES: &[&str] = &[
    "auth_cookie",
    "session",
    "session_attribute",
    "cache",
    "repository",
    "revision",
    "node_change",
    "bloodhound_product",
    "bloodhound_productresourcemap",
    "bloodhound_productconfig",
    "sqlite_master",
    "bloodhound_relations",
];

const DEFAULT_TRANSLATE_TABLES: &[&str] = &[
    "system",
    "ticket",
    "ticket_change",
    "ticket_custom",
    "attachment",
    "enum",
    "component",
    "milestone",
    "version",
    "permission",
    "wiki",
    "report",
];

/// Which product isolation strategy rewrites table references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    #[default]
    FilteredView,
    PrefixedTable,
}

impl SchemeKind {
    pub fn scheme(self) -> Arc<dyn IsolationScheme> {
        match self {
            Self::FilteredView => Arc::new(FilteredViewScheme),
            Self::PrefixedTable => Arc::new(PrefixedTableScheme),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslatorConfig {
    pub scheme: SchemeKind,
    pub dialect: SqlDialect,
    /// Column holding the product in shared tables.
    pub product_column: String,
    /// Tables shared by every product and never rewritten.
    pub skip_tables: Vec<String>,
    /// Shared tables filtered by the product column.
    pub translate_tables: Vec<String>,
    /// Maximum cached translations; 0 disables the cache.
    pub cache_capacity: usize,
    pub debug_sql: bool,
    /// Multi-product mode. When off, statements pass through untouched.
    pub enabled: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::default(),
            dialect: SqlDialect::default(),
            product_column: "product".to_string(),
            skip_tables: DEFAULT_SKIP_TABLES.iter().map(|t| t.to_string()).collect(),
            translate_tables: DEFAULT_TRANSLATE_TABLES.iter().map(|t| t.to_string()).collect(),
            cache_capacity: 1000,
            debug_sql: false,
            enabled: true,
        }
    }
}

impl TranslatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Apply `TENANTSQL_DEBUG_SQL` / `TENANTSQL_DISABLE` from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_switches(|name| env::var_os(name).is_some())
    }

    /// Apply the debug and disable switches reported as set by `is_set`.
    pub fn with_switches(mut self, is_set: impl Fn(&str) -> bool) -> Self {
        if is_set(DEBUG_SQL_ENV) {
            self.debug_sql = true;
        }
        if is_set(DISABLE_ENV) {
            self.enabled = false;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let column_ok = !self.product_column.is_empty()
            && self
                .product_column
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !column_ok {
            return Err(Error::Config(format!(
                "product column '{}' is not a plain identifier",
                self.product_column
            )));
        }

        let skip: HashSet<String> = self.skip_tables.iter().map(|t| t.to_ascii_lowercase()).collect();
        if let Some(table) = self
            .translate_tables
            .iter()
            .find(|t| skip.contains(&t.to_ascii_lowercase()))
        {
            return Err(Error::Config(format!(
                "table '{table}' is in both the skip and translate sets"
            )));
        }
        Ok(())
    }

    pub fn table_rules(&self) -> TableRules {
        TableRules::new(&self.skip_tables, &self.translate_tables, &self.product_column)
    }
}

/// Table classification sets and the product column, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRules {
    skip: HashSet<String>,
    translate: HashSet<String>,
    product_column: String,
}

impl TableRules {
    pub fn new<S: AsRef<str>>(skip: &[S], translate: &[S], product_column: &str) -> Self {
        let lower = |tables: &[S]| -> HashSet<String> {
            tables.iter().map(|t| t.as_ref().to_ascii_lowercase()).collect()
        };
        Self {
            skip: lower(skip),
            translate: lower(translate),
            product_column: product_column.to_string(),
        }
    }

    pub fn is_skip(&self, table: &str) -> bool {
        self.skip.contains(&table.to_ascii_lowercase())
    }

    pub fn is_translate(&self, table: &str) -> bool {
        self.translate.contains(&table.to_ascii_lowercase())
    }

    pub fn product_column(&self) -> &str {
        &self.product_column
    }
}
