use std::sync::Arc;

use parking_lot::Mutex;
use time::OffsetDateTime;

use crate::model::SourceKind;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntry {
	pub id: String,
	pub display_text: String,
	pub kind: SourceKind,
	pub timestamp: OffsetDateTime,
}

/// Bounded, most-recent-first selection history. Inserts deduplicate by id and
/// truncate under a single critical section, so concurrent recorders cannot
/// interleave between the dedup and the cap.
#[derive(Clone)]
pub struct HistoryStore {
	inner: Arc<Mutex<Vec<HistoryEntry>>>,
	max_entries: usize,
}

impl HistoryStore {
	pub fn new(max_entries: usize) -> Self {
		Self { inner: Arc::new(Mutex::new(Vec::new())), max_entries }
	}

	pub fn record(&self, entry: HistoryEntry) {
		let mut entries = self.inner.lock();

		entries.retain(|existing| existing.id != entry.id);
		entries.insert(0, entry);
		entries.truncate(self.max_entries);
	}

	pub fn recent(&self, count: usize) -> Vec<HistoryEntry> {
		let entries = self.inner.lock();

		entries.iter().take(count).cloned().collect()
	}

	pub fn entries(&self) -> Vec<HistoryEntry> {
		self.inner.lock().clone()
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

	fn entry(id: &str, text: &str) -> HistoryEntry {
		HistoryEntry {
			id: id.to_string(),
			display_text: text.to_string(),
			kind: SourceKind::Place,
			timestamp: OffsetDateTime::UNIX_EPOCH,
		}
	}

	#[test]
	fn keeps_most_recent_first_and_stays_bounded() {
		let store = HistoryStore::new(3);

		for i in 0..5 {
			store.record(entry(&format!("id_{i}"), &format!("text {i}")));
		}

		let entries = store.entries();

		assert_eq!(entries.len(), 3);
		assert_eq!(entries[0].id, "id_4");
		assert_eq!(entries[2].id, "id_2");
	}

	#[test]
	fn reinserting_an_id_moves_it_to_the_front() {
		let store = HistoryStore::new(5);

		store.record(entry("a", "first"));
		store.record(entry("b", "second"));
		store.record(entry("a", "first again"));

		let entries = store.entries();

		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].id, "a");
		assert_eq!(entries[0].display_text, "first again");
		assert_eq!(entries[1].id, "b");
	}
}
