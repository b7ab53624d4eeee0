//! In-memory cache of successful responses
//!
//! Three stores (lookup, static, dynamic), each mapping a [`ReportKind`] to
//! the query key and the last successful body for that key. Entries are
//! replaced on every successful write and live as long as the client.

pub mod key;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::models::ReportKind;

pub use key::{CacheKey, ReportApi};

/// A cached body and when it was stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedReport {
    pub body: Value,
    pub stored_at: DateTime<Utc>,
}

type ReportStore = HashMap<ReportKind, HashMap<String, CachedReport>>;

/// Per-client report cache
#[derive(Debug, Default, Clone)]
pub struct ReportCache {
    stores: BTreeMap<ReportApi, ReportStore>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `body` under (api, kind, key), replacing any earlier entry.
    pub fn insert(
        &mut self,
        api: ReportApi,
        kind: ReportKind,
        key: impl Into<String>,
        body: Value,
    ) {
        let key = key.into();
        log::debug!("Caching {}/{}/{}", api, kind, key);
        self.stores
            .entry(api)
            .or_default()
            .entry(kind)
            .or_default()
            .insert(
                key,
                CachedReport {
                    body,
                    stored_at: Utc::now(),
                },
            );
    }

    pub fn get(&self, api: ReportApi, kind: ReportKind, key: &str) -> Option<&CachedReport> {
        self.stores.get(&api)?.get(&kind)?.get(key)
    }

    pub fn contains(&self, api: ReportApi, kind: ReportKind, key: &str) -> bool {
        self.get(api, kind, key).is_some()
    }

    /// Every cached entry, ordered by address
    pub fn iter(&self) -> std::vec::IntoIter<(CacheKey, &CachedReport)> {
        let mut entries: Vec<(CacheKey, &CachedReport)> = self
            .stores
            .iter()
            .flat_map(|(api, store)| {
                store.iter().flat_map(move |(kind, reports)| {
                    reports
                        .iter()
                        .map(move |(key, report)| (CacheKey::new(*api, *kind, key.clone()), report))
                })
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.stores
            .values()
            .flat_map(|store| store.values())
            .map(HashMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
