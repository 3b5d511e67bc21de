use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use time::{Duration, OffsetDateTime};

use spolu_domain::geo::LocationBucket;

use crate::model::RankedResultSet;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CacheKey {
	/// Normalized query text (trimmed, NFC, lowercased).
	pub text: String,
	pub bucket: LocationBucket,
}

#[derive(Clone, Debug)]
struct CacheEntry {
	value: RankedResultSet,
	created_at: OffsetDateTime,
	ttl: Duration,
}

impl CacheEntry {
	fn is_fresh(&self, now: OffsetDateTime) -> bool {
		now - self.created_at < self.ttl
	}
}

/// Memoizes fused result sets per `(query text, location bucket)` key. Shared
/// across sessions; clones share the underlying map. Racing writers on the
/// same key let the last one win.
#[derive(Clone)]
pub struct ResultCache {
	inner: Arc<Mutex<HashMap<CacheKey, CacheEntry>>>,
	max_entries: usize,
}

impl ResultCache {
	pub fn new(max_entries: usize) -> Self {
		Self { inner: Arc::new(Mutex::new(HashMap::new())), max_entries }
	}

	/// Returns a hit only while the entry is fresh. Expired entries are
	/// evicted lazily on access.
	pub fn get(&self, key: &CacheKey, now: OffsetDateTime) -> Option<RankedResultSet> {
		let mut entries = self.inner.lock();
		let Some(entry) = entries.get(key) else {
			return None;
		};

		if !entry.is_fresh(now) {
			entries.remove(key);

			return None;
		}

		Some(entry.value.clone())
	}

	/// Overwrites any existing entry for the key. When the cache is full, the
	/// oldest entry makes room.
	pub fn put(&self, key: CacheKey, value: RankedResultSet, ttl: Duration, now: OffsetDateTime) {
		let mut entries = self.inner.lock();

		if !entries.contains_key(&key) && entries.len() >= self.max_entries {
			entries.retain(|_, entry| entry.is_fresh(now));

			if entries.len() >= self.max_entries {
				let oldest = entries
					.iter()
					.min_by_key(|(_, entry)| entry.created_at)
					.map(|(key, _)| key.clone());

				if let Some(oldest) = oldest {
					entries.remove(&oldest);
				}
			}
		}

		entries.insert(key, CacheEntry { value, created_at: now, ttl });
	}

	pub fn len(&self) -> usize {
		self.inner.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{RankedResultSet, SearchQuery};

	fn sample_set(text: &str) -> RankedResultSet {
		RankedResultSet {
			query: SearchQuery::new(text),
			results: Vec::new(),
			generated_at_generation: 0,
		}
	}

	fn key(text: &str) -> CacheKey {
		CacheKey { text: text.to_string(), bucket: LocationBucket::Unknown }
	}

	#[test]
	fn expired_entries_are_misses() {
		let cache = ResultCache::new(8);
		let now = OffsetDateTime::UNIX_EPOCH;

		cache.put(key("praha"), sample_set("praha"), Duration::seconds(60), now);

		assert!(cache.get(&key("praha"), now + Duration::seconds(59)).is_some());
		assert!(cache.get(&key("praha"), now + Duration::seconds(60)).is_none());
		// The expired entry was evicted lazily.
		assert!(cache.is_empty());
	}

	#[test]
	fn put_overwrites_existing_entry() {
		let cache = ResultCache::new(8);
		let now = OffsetDateTime::UNIX_EPOCH;

		cache.put(key("praha"), sample_set("first"), Duration::seconds(60), now);
		cache.put(key("praha"), sample_set("second"), Duration::seconds(60), now);

		let hit = cache.get(&key("praha"), now).expect("expected hit");

		assert_eq!(hit.query.text, "second");
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn full_cache_evicts_oldest_entry() {
		let cache = ResultCache::new(2);
		let now = OffsetDateTime::UNIX_EPOCH;

		cache.put(key("a"), sample_set("a"), Duration::seconds(60), now);
		cache.put(key("b"), sample_set("b"), Duration::seconds(60), now + Duration::seconds(1));
		cache.put(key("c"), sample_set("c"), Duration::seconds(60), now + Duration::seconds(2));

		assert_eq!(cache.len(), 2);
		assert!(cache.get(&key("a"), now + Duration::seconds(3)).is_none());
		assert!(cache.get(&key("b"), now + Duration::seconds(3)).is_some());
		assert!(cache.get(&key("c"), now + Duration::seconds(3)).is_some());
	}
}
