use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub search: Search,
	pub history: History,
	pub suggest: Suggest,
	pub cache: Cache,
	pub providers: Providers,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	pub debounce_ms: u64,
	pub provider_timeout_ms: u64,
	pub min_query_chars: usize,
	/// Minimum normalized Levenshtein similarity for a fuzzy match to count,
	/// applied to history entries and the built-in place fallback.
	pub min_similarity: f32,
}

#[derive(Debug, Deserialize)]
pub struct History {
	pub max_entries: usize,
	pub suggest_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct Suggest {
	pub popular_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct Cache {
	pub enabled: bool,
	pub ttl_secs: i64,
	pub max_entries: usize,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub place: PlaceProviderConfig,
	pub rides: ProviderConfig,
	pub users: ProviderConfig,
}

/// External place-autocomplete capability. An empty `api_base` means the
/// capability is unavailable and the built-in reference list is used instead.
#[derive(Debug, Deserialize)]
pub struct PlaceProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub country: String,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}
