use std::collections::HashSet;

use serde_json::Value;

use spolu_domain::geo::GeoPoint;

/// One independent origin of candidate results. The discriminant order is also
/// the ranking priority: history first, users last.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
	History,
	Place,
	Ride,
	User,
}

impl SourceKind {
	pub const ALL: [Self; 4] = [Self::History, Self::Place, Self::Ride, Self::User];

	pub fn priority(self) -> u8 {
		match self {
			Self::History => 0,
			Self::Place => 1,
			Self::Ride => 2,
			Self::User => 3,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::History => "history",
			Self::Place => "place",
			Self::Ride => "ride",
			Self::User => "user",
		}
	}
}

impl std::fmt::Display for SourceKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Symbolic icon tag for the caller's renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
	History,
	Place,
	Ride,
	User,
	Popular,
	CurrentLocation,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchQuery {
	pub text: String,
	pub origin_geo: Option<GeoPoint>,
	pub enabled_sources: HashSet<SourceKind>,
	pub result_limit: usize,
}

impl SearchQuery {
	pub const DEFAULT_RESULT_LIMIT: usize = 10;

	/// A query over all sources with the default result cap.
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			origin_geo: None,
			enabled_sources: SourceKind::ALL.into_iter().collect(),
			result_limit: Self::DEFAULT_RESULT_LIMIT,
		}
	}

	pub fn with_origin(mut self, origin: GeoPoint) -> Self {
		self.origin_geo = Some(origin);

		self
	}

	pub fn with_sources(mut self, sources: impl IntoIterator<Item = SourceKind>) -> Self {
		self.enabled_sources = sources.into_iter().collect();

		self
	}

	pub fn with_limit(mut self, limit: usize) -> Self {
		self.result_limit = limit;

		self
	}
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResult {
	/// Identity key for deduplication, globally unique across all sources.
	pub id: String,
	pub display_text: String,
	pub subtitle: Option<String>,
	pub kind: SourceKind,
	pub icon: Icon,
	pub confidence: f32,
	pub distance_km: Option<f64>,
	/// Opaque domain object carried through for the caller; ranking never
	/// inspects it.
	pub payload: Value,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankedResultSet {
	pub query: SearchQuery,
	pub results: Vec<SearchResult>,
	pub generated_at_generation: u64,
}

/// Externally supplied frequent destination, surfaced on the suggestions path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PopularDestination {
	pub id: String,
	pub label: String,
	#[serde(default)]
	pub ride_count: Option<u32>,
}
