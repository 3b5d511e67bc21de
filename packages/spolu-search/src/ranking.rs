use std::{cmp::Ordering, collections::HashSet};

use crate::model::SearchResult;

/// Fuses raw candidates into the final ordering: deduplicate by id, sort by
/// source priority then confidence, cap the length.
///
/// Candidates arrive concatenated in dispatch order (history, place, ride,
/// user), so keeping the first occurrence of a duplicated id also keeps the
/// highest-priority one. The sort is stable; equal-priority, equal-confidence
/// items retain their relative order.
pub fn merge(candidates: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
	let mut seen = HashSet::new();
	let mut unique: Vec<SearchResult> = Vec::with_capacity(candidates.len());

	for candidate in candidates {
		if seen.insert(candidate.id.clone()) {
			unique.push(candidate);
		}
	}

	unique.sort_by(|a, b| {
		a.kind
			.priority()
			.cmp(&b.kind.priority())
			.then_with(|| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal))
	});
	unique.truncate(limit);

	unique
}
