use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use log::{debug, trace};
use parking_lot::Mutex;

use crate::{
    config::{TableRules, TranslatorConfig},
    context::ProductPrefix,
    error::Result,
    rewrite::IsolationScheme,
    sql::SqlDialect,
    translate::SqlTranslator,
};

#[derive(Debug)]
struct CacheEntry {
    sql: Arc<str>,
    last_used: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    /// product -> original SQL -> translation
    entries: HashMap<String, HashMap<String, CacheEntry>>,
    /// last_used -> (product, SQL), oldest first
    order: BTreeMap<u64, (String, String)>,
    clock: u64,
}

impl CacheState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn touch(&mut self, product: &str, sql: &str) -> Option<Arc<str>> {
        let now = self.tick();
        let entry = self.entries.get_mut(product)?.get_mut(sql)?;
        let key = self.order.remove(&entry.last_used)?;
        entry.last_used = now;
        self.order.insert(now, key);
        Some(Arc::clone(&entry.sql))
    }

    fn evict_one(&mut self) {
        let Some((_, (product, sql))) = self.order.pop_first() else {
            return;
        };
        if let Some(statements) = self.entries.get_mut(&product) {
            statements.remove(&sql);
            if statements.is_empty() {
                self.entries.remove(&product);
            }
        }
    }
}

/// Hit and miss counters of a [`TranslationCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

/// Bounded LRU of translated statements keyed by (product, SQL).
#[derive(Debug)]
pub struct TranslationCache {
    state: Mutex<CacheState>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TranslationCache {
    /// A capacity of 0 disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, product: &str, sql: &str) -> Option<Arc<str>> {
        let hit = self.state.lock().touch(product, sql);

        let counter = if hit.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        hit
    }

    pub fn insert(&self, product: &str, sql: &str, translated: Arc<str>) {
        if self.capacity == 0 {
            return;
        }
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let now = state.tick();

        let present = state
            .entries
            .get(product)
            .is_some_and(|statements| statements.contains_key(sql));
        if !present && state.len() >= self.capacity {
            state.evict_one();
        }

        let previous = state.entries.entry(product.to_string()).or_default().insert(
            sql.to_string(),
            CacheEntry {
                sql: translated,
                last_used: now,
            },
        );
        if let Some(previous) = previous {
            state.order.remove(&previous.last_used);
        }
        state.order.insert(now, (product.to_string(), sql.to_string()));
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order.clear();
    }

    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: self.len(),
        }
    }
}

/// Memoized translation shared by every connection of one database.
///
/// Owns the table rules, the isolation scheme and the cache. When the
/// service is disabled, or no product is given, SQL passes through as is.
#[derive(Debug)]
pub struct TranslationService {
    rules: Arc<TableRules>,
    scheme: Arc<dyn IsolationScheme>,
    dialect: SqlDialect,
    debug_sql: bool,
    enabled: AtomicBool,
    cache: TranslationCache,
}

impl TranslationService {
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        config.validate()?;
        let scheme = config.scheme.scheme();
        debug!(
            "translation service: {} scheme, product column '{}', enabled={}",
            scheme.name(),
            config.product_column,
            config.enabled
        );
        Ok(Self {
            rules: Arc::new(config.table_rules()),
            scheme,
            dialect: config.dialect,
            debug_sql: config.debug_sql,
            enabled: AtomicBool::new(config.enabled),
            cache: TranslationCache::new(config.cache_capacity),
        })
    }

    /// Build from `config` after applying the `TENANTSQL_DEBUG_SQL` and
    /// `TENANTSQL_DISABLE` environment switches.
    pub fn from_env(config: TranslatorConfig) -> Result<Self> {
        Self::new(&config.with_env_overrides())
    }

    pub fn scheme(&self) -> &dyn IsolationScheme {
        self.scheme.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Switch multi-product mode. Cached translations are dropped whenever
    /// the mode changes.
    pub fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::AcqRel) != enabled {
            debug!("multi-product translation {}", if enabled { "enabled" } else { "disabled" });
            self.cache.clear();
        }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn translator(&self, product: impl Into<ProductPrefix>) -> SqlTranslator {
        SqlTranslator::new(
            Arc::clone(&self.rules),
            Arc::clone(&self.scheme),
            self.dialect,
            product,
        )
    }

    pub fn translate_sql(&self, product: Option<&ProductPrefix>, sql: &str) -> Result<Arc<str>> {
        let Some(product) = product.filter(|_| self.is_enabled()) else {
            return Ok(Arc::from(sql));
        };

        if let Some(hit) = self.cache.get(product.as_str(), sql) {
            trace!("translation cache hit for product '{product}'");
            return Ok(hit);
        }
        trace!("translation cache miss for product '{product}'");

        let translated: Arc<str> = self.translator(product.clone()).translate(sql)?.into();
        if self.debug_sql {
            debug!("Original SQL: {sql}");
            debug!("SQL: {translated}");
        }
        self.cache.insert(product.as_str(), sql, Arc::clone(&translated));
        Ok(translated)
    }

    pub fn reset_cache(&self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }
}
