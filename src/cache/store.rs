//! Query cache storage.
//!
//! Three LRU families (lists, details, dropdowns) hold type-erased responses
//! keyed by [`QueryKey`]. A per-resource generation counter lets list views
//! notice that their data was invalidated after they last fetched.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use blogdesk_api_types::EntityId;
use lru::LruCache;
use metrics::counter;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::resource::ResourceKind;
use crate::infra::telemetry::{CACHE_HIT_TOTAL, CACHE_INVALIDATE_TOTAL, CACHE_MISS_TOTAL};

use super::config::CacheConfig;
use super::keys::{DetailKey, DropdownKey, ListKey, QueryKey};
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

#[derive(Clone)]
struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    stored_at: Instant,
}

impl Entry {
    fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            stored_at: Instant::now(),
        }
    }

    fn is_fresh(&self, max_age: Duration) -> bool {
        self.stored_at.elapsed() < max_age
    }
}

/// Session-scoped cache of admin API responses.
pub struct QueryCache {
    lists: RwLock<LruCache<ListKey, Entry>>,
    details: RwLock<LruCache<DetailKey, Entry>>,
    dropdowns: RwLock<LruCache<DropdownKey, Entry>>,
    generations: RwLock<HashMap<ResourceKind, u64>>,
    max_age: Duration,
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            lists: RwLock::new(LruCache::new(config.list_limit_non_zero())),
            details: RwLock::new(LruCache::new(config.detail_limit_non_zero())),
            dropdowns: RwLock::new(LruCache::new(config.dropdown_limit_non_zero())),
            generations: RwLock::new(HashMap::new()),
            max_age: config.max_age(),
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Returns a clone of the cached value when present, fresh and of type `T`.
    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &QueryKey) -> Option<T> {
        let entry = match key {
            QueryKey::List(key) => rw_write(&self.lists, SOURCE, "get.list").get(key).cloned(),
            QueryKey::Detail(key) => rw_write(&self.details, SOURCE, "get.detail")
                .get(key)
                .cloned(),
            QueryKey::Dropdown(key) => rw_write(&self.dropdowns, SOURCE, "get.dropdown")
                .get(key)
                .cloned(),
        };

        let value = entry
            .filter(|entry| entry.is_fresh(self.max_age))
            .and_then(|entry| entry.value.downcast_ref::<T>().cloned());

        let family = key.family();
        let kind = key.kind().path();
        if value.is_some() {
            counter!(CACHE_HIT_TOTAL, "family" => family, "resource" => kind).increment(1);
        } else {
            counter!(CACHE_MISS_TOTAL, "family" => family, "resource" => kind).increment(1);
        }
        value
    }

    pub fn put<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        self.insert(key, Entry::new(value));
    }

    /// Store `value` only if `key`'s resource was not invalidated since
    /// `generation` was read. Returns whether the entry was stored.
    pub fn put_if_current<T: Send + Sync + 'static>(
        &self,
        key: QueryKey,
        value: T,
        generation: u64,
    ) -> bool {
        let kind = key.kind();
        // Held across the insert; `invalidate` bumps the generation before
        // dropping entries.
        let generations = rw_read(&self.generations, SOURCE, "put_if_current.generation");
        let current = generations.get(&kind).copied().unwrap_or(0);
        if current != generation {
            debug!(
                target = SOURCE,
                resource = %kind,
                family = key.family(),
                fetched_at = generation,
                current,
                "dropping response fetched before invalidation"
            );
            return false;
        }
        self.insert(key, Entry::new(value));
        true
    }

    fn insert(&self, key: QueryKey, entry: Entry) {
        match key {
            QueryKey::List(key) => {
                rw_write(&self.lists, SOURCE, "put.list").put(key, entry);
            }
            QueryKey::Detail(key) => {
                rw_write(&self.details, SOURCE, "put.detail").put(key, entry);
            }
            QueryKey::Dropdown(key) => {
                rw_write(&self.dropdowns, SOURCE, "put.dropdown").put(key, entry);
            }
        }
    }

    // ========================================================================
    // Invalidation
    // ========================================================================

    /// Drop every list and dropdown entry of `kind` and bump its generation.
    ///
    /// Detail entries survive; writes discard the one record they touched
    /// through [`QueryCache::discard_detail`].
    pub fn invalidate(&self, kind: ResourceKind) -> u64 {
        let generation = {
            let mut generations = rw_write(&self.generations, SOURCE, "invalidate.generation");
            let slot = generations.entry(kind).or_insert(0);
            *slot += 1;
            *slot
        };

        let lists = {
            let mut lists = rw_write(&self.lists, SOURCE, "invalidate.lists");
            drop_matching(&mut lists, |key| key.kind == kind)
        };
        let dropdowns = {
            let mut dropdowns = rw_write(&self.dropdowns, SOURCE, "invalidate.dropdowns");
            drop_matching(&mut dropdowns, |key| key.kind == kind)
        };

        counter!(CACHE_INVALIDATE_TOTAL, "resource" => kind.path()).increment(1);
        debug!(
            target = SOURCE,
            resource = %kind,
            lists,
            dropdowns,
            generation,
            "invalidated resource queries"
        );
        generation
    }

    pub fn discard_detail(&self, kind: ResourceKind, id: EntityId) {
        rw_write(&self.details, SOURCE, "discard_detail").pop(&DetailKey { kind, id });
    }

    /// Number of invalidations of `kind` so far.
    pub fn generation(&self, kind: ResourceKind) -> u64 {
        rw_read(&self.generations, SOURCE, "generation")
            .get(&kind)
            .copied()
            .unwrap_or(0)
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Drop every entry. Generations keep counting so live views still refetch.
    pub fn clear(&self) {
        {
            let mut generations = rw_write(&self.generations, SOURCE, "clear.generations");
            for kind in ResourceKind::ALL {
                *generations.entry(kind).or_insert(0) += 1;
            }
        }
        rw_write(&self.lists, SOURCE, "clear.lists").clear();
        rw_write(&self.details, SOURCE, "clear.details").clear();
        rw_write(&self.dropdowns, SOURCE, "clear.dropdowns").clear();
    }

    pub fn len(&self) -> usize {
        rw_read(&self.lists, SOURCE, "len.lists").len()
            + rw_read(&self.details, SOURCE, "len.details").len()
            + rw_read(&self.dropdowns, SOURCE, "len.dropdowns").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn drop_matching<K, V>(cache: &mut LruCache<K, V>, matches: impl Fn(&K) -> bool) -> usize
where
    K: std::hash::Hash + Eq + Clone,
{
    let doomed: Vec<K> = cache
        .iter()
        .filter(|(key, _)| matches(key))
        .map(|(key, _)| key.clone())
        .collect();
    for key in &doomed {
        cache.pop(key);
    }
    doomed.len()
}

#[cfg(test)]
mod tests {
    use blogdesk_api_types::{ListPage, Tag};

    use super::*;

    fn page(names: &[&str]) -> ListPage<Tag> {
        ListPage {
            result: names
                .iter()
                .enumerate()
                .map(|(i, name)| Tag {
                    id: i as EntityId + 1,
                    name: (*name).to_string(),
                })
                .collect(),
            total: names.len() as u64,
        }
    }

    #[test]
    fn list_roundtrip_and_type_mismatch_misses() {
        let cache = QueryCache::new(&CacheConfig::default());
        let key = QueryKey::list(ResourceKind::Tags, 0, 25, "");
        assert!(cache.get::<ListPage<Tag>>(&key).is_none());

        cache.put(key.clone(), page(&["rust"]));
        let cached: ListPage<Tag> = cache.get(&key).expect("cached page");
        assert_eq!(cached.result[0].name, "rust");
        assert!(cache.get::<String>(&key).is_none());
    }

    #[test]
    fn invalidate_drops_only_lists_and_dropdowns_of_kind() {
        let cache = QueryCache::new(&CacheConfig::default());
        let tags = QueryKey::list(ResourceKind::Tags, 0, 25, "");
        let tag_options = QueryKey::dropdown(ResourceKind::Tags, "");
        let tag_detail = QueryKey::detail(ResourceKind::Tags, 1);
        let blogs = QueryKey::list(ResourceKind::Blogs, 0, 25, "");
        cache.put(tags.clone(), page(&["rust"]));
        cache.put(tag_options.clone(), Vec::<String>::new());
        cache.put(tag_detail.clone(), "detail".to_string());
        cache.put(blogs.clone(), page(&["other"]));

        assert_eq!(cache.generation(ResourceKind::Tags), 0);
        assert_eq!(cache.invalidate(ResourceKind::Tags), 1);

        assert!(cache.get::<ListPage<Tag>>(&tags).is_none());
        assert!(cache.get::<Vec<String>>(&tag_options).is_none());
        assert!(cache.get::<String>(&tag_detail).is_some());
        assert!(cache.get::<ListPage<Tag>>(&blogs).is_some());
        assert_eq!(cache.generation(ResourceKind::Tags), 1);
        assert_eq!(cache.generation(ResourceKind::Blogs), 0);

        cache.discard_detail(ResourceKind::Tags, 1);
        assert!(cache.get::<String>(&tag_detail).is_none());
    }

    #[test]
    fn put_if_current_rejects_responses_older_than_invalidation() {
        let cache = QueryCache::new(&CacheConfig::default());
        let key = QueryKey::list(ResourceKind::Tags, 0, 25, "");
        let before = cache.generation(ResourceKind::Tags);

        cache.invalidate(ResourceKind::Tags);
        assert!(!cache.put_if_current(key.clone(), page(&["stale"]), before));
        assert!(cache.get::<ListPage<Tag>>(&key).is_none());

        let now = cache.generation(ResourceKind::Tags);
        assert!(cache.put_if_current(key.clone(), page(&["fresh"]), now));
        let cached: ListPage<Tag> = cache.get(&key).expect("fresh page");
        assert_eq!(cached.result[0].name, "fresh");
    }

    #[test]
    fn lru_evicts_beyond_limit() {
        let cache = QueryCache::new(&CacheConfig {
            list_limit: 1,
            ..Default::default()
        });
        let first = QueryKey::list(ResourceKind::Tags, 0, 25, "");
        let second = QueryKey::list(ResourceKind::Tags, 1, 25, "");
        cache.put(first.clone(), page(&["a"]));
        cache.put(second.clone(), page(&["b"]));
        assert!(cache.get::<ListPage<Tag>>(&first).is_none());
        assert!(cache.get::<ListPage<Tag>>(&second).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_entries_miss() {
        let cache = QueryCache::new(&CacheConfig {
            max_age_secs: 60,
            ..Default::default()
        });
        let key = QueryKey::detail(ResourceKind::Blogs, 7);
        cache.put(key.clone(), 7_i64);
        assert_eq!(cache.get::<i64>(&key), Some(7));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get::<i64>(&key), None);
    }

    #[test]
    fn clear_empties_and_bumps_every_generation() {
        let cache = QueryCache::new(&CacheConfig::default());
        cache.put(QueryKey::detail(ResourceKind::Likes, 1), 1_i64);
        cache.clear();
        assert!(cache.is_empty());
        for kind in ResourceKind::ALL {
            assert_eq!(cache.generation(kind), 1);
        }
    }
}
