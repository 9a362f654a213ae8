//! Parsed-template cache
//!
//! Parsing is deterministic for a given template and tag pair, so the engine
//! stores the token tree under that pair and hands out shared copies.

use super::engine::Token;
use crate::config::Tags;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared, immutable token tree
pub type Tokens = Arc<[Token]>;

/// Cache key: template text plus the tags it was parsed with
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub template: String,
    pub tags: Tags,
}

impl CacheKey {
    pub fn new(template: impl Into<String>, tags: &Tags) -> Self {
        Self {
            template: template.into(),
            tags: tags.clone(),
        }
    }
}

/// Storage for parsed templates.
///
/// Implementations must be shareable across threads since the process-wide
/// default engine holds one.
pub trait TemplateCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Tokens>;

    fn set(&self, key: CacheKey, tokens: Tokens);

    fn clear(&self);
}

/// Unbounded in-memory cache
#[derive(Debug, Default)]
pub struct DefaultTemplateCache {
    entries: Mutex<HashMap<CacheKey, Tokens>>,
}

impl DefaultTemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached templates
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, Tokens>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl TemplateCache for DefaultTemplateCache {
    fn get(&self, key: &CacheKey) -> Option<Tokens> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: CacheKey, tokens: Tokens) {
        self.entries().insert(key, tokens);
    }

    fn clear(&self) {
        self.entries().clear();
    }
}

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl TemplateCache for NoCache {
    fn get(&self, _key: &CacheKey) -> Option<Tokens> {
        None
    }

    fn set(&self, _key: CacheKey, _tokens: Tokens) {}

    fn clear(&self) {}
}
