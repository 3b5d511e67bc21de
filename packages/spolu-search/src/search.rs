use std::time::Duration as StdDuration;

use serde_json::Value;
use time::{Duration, OffsetDateTime};

use spolu_domain::{geo, text};
use spolu_providers::{PlaceCandidate, RideRecord, UserRecord};

use crate::{
	Error, SearchService,
	cache::CacheKey,
	model::{Icon, RankedResultSet, SearchQuery, SearchResult, SourceKind},
	ranking,
};

/// Built-in reference list used when the place capability is unavailable.
const FALLBACK_CITIES: [&str; 18] = [
	"Praha",
	"Brno",
	"Ostrava",
	"Plzeň",
	"Liberec",
	"Olomouc",
	"Ústí nad Labem",
	"České Budějovice",
	"Hradec Králové",
	"Pardubice",
	"Zlín",
	"Havířov",
	"Kladno",
	"Most",
	"Opava",
	"Frýdek-Místek",
	"Karviná",
	"Jihlava",
];

impl SearchService {
	/// Resolves one query into one ordered, deduplicated result set. Queries
	/// shorter than the minimum length get suggestions instead of a fan-out;
	/// everything else goes through the cache, then the enabled sources in
	/// parallel. A source that fails or times out contributes nothing and
	/// never aborts its siblings.
	pub async fn search(&self, query: &SearchQuery, generation: u64) -> RankedResultSet {
		if query.text.trim().chars().count() < self.cfg.search.min_query_chars {
			return self.suggestions(query, generation);
		}

		let now = OffsetDateTime::now_utc();
		let key = CacheKey {
			text: text::normalize_query(&query.text),
			bucket: geo::bucket(query.origin_geo),
		};

		if self.cfg.cache.enabled
			&& let Some(hit) = self.cache().get(&key, now)
		{
			tracing::debug!(query = %key.text, "Result cache hit.");

			return hit;
		}

		let deadline = StdDuration::from_millis(self.cfg.search.provider_timeout_ms);
		let (history, place, ride, user) = tokio::join!(
			self.history_candidates(query),
			self.place_candidates(query, deadline),
			self.ride_candidates(query, deadline),
			self.user_candidates(query, deadline),
		);
		// Dispatch order doubles as the dedup preference order.
		let mut candidates = history;

		candidates.extend(place);
		candidates.extend(ride);
		candidates.extend(user);

		let set = RankedResultSet {
			query: query.clone(),
			results: ranking::merge(candidates, query.result_limit),
			generated_at_generation: generation,
		};

		if self.cfg.cache.enabled {
			self.cache().put(key, set.clone(), Duration::seconds(self.cfg.cache.ttl_secs), now);
		}

		set
	}

	/// The short-query path: recent history, popular destinations, and a
	/// synthetic current-location entry. Never consults the cache.
	fn suggestions(&self, query: &SearchQuery, generation: u64) -> RankedResultSet {
		let mut candidates = Vec::new();

		for entry in self.history().recent(self.cfg.history.suggest_count) {
			candidates.push(SearchResult {
				id: entry.id,
				display_text: entry.display_text,
				subtitle: None,
				kind: SourceKind::History,
				icon: Icon::History,
				confidence: 1.0,
				distance_km: None,
				payload: Value::Null,
			});
		}
		for destination in self.popular.lock().iter().take(self.cfg.suggest.popular_count) {
			candidates.push(SearchResult {
				id: destination.id.clone(),
				display_text: destination.label.clone(),
				subtitle: destination.ride_count.map(|count| format!("{count} rides")),
				kind: SourceKind::Place,
				icon: Icon::Popular,
				confidence: 1.0,
				distance_km: None,
				payload: Value::Null,
			});
		}
		if let Some(origin) = query.origin_geo
			&& query.enabled_sources.contains(&SourceKind::Place)
		{
			candidates.push(SearchResult {
				id: "current_location".to_string(),
				display_text: "Current location".to_string(),
				subtitle: None,
				kind: SourceKind::Place,
				icon: Icon::CurrentLocation,
				confidence: 1.0,
				distance_km: None,
				payload: serde_json::json!({ "lat": origin.lat, "lng": origin.lng }),
			});
		}

		RankedResultSet {
			query: query.clone(),
			results: ranking::merge(candidates, query.result_limit),
			generated_at_generation: generation,
		}
	}

	async fn history_candidates(&self, query: &SearchQuery) -> Vec<SearchResult> {
		if !query.enabled_sources.contains(&SourceKind::History) {
			return Vec::new();
		}

		let min_similarity = self.cfg.search.min_similarity;

		self.history()
			.entries()
			.into_iter()
			.filter(|entry| text::similarity(&query.text, &entry.display_text) >= min_similarity)
			.map(|entry| {
				let confidence = text::confidence(&query.text, &entry.display_text);

				SearchResult {
					id: entry.id,
					display_text: entry.display_text,
					subtitle: None,
					kind: SourceKind::History,
					icon: Icon::History,
					confidence,
					distance_km: None,
					payload: Value::Null,
				}
			})
			.collect()
	}

	async fn place_candidates(&self, query: &SearchQuery, deadline: StdDuration) -> Vec<SearchResult> {
		if !query.enabled_sources.contains(&SourceKind::Place) {
			return Vec::new();
		}

		let cfg = &self.cfg.providers.place;

		if cfg.api_base.trim().is_empty() {
			return self.fallback_places(query);
		}

		let lookup = self.capabilities.place.suggest_places(cfg, &query.text, query.origin_geo);

		match tokio::time::timeout(deadline, lookup).await {
			Ok(Ok(candidates)) =>
				candidates.into_iter().map(|candidate| place_result(query, candidate)).collect(),
			Ok(Err(err)) => {
				tracing::warn!(error = %err, "Place lookup failed; using built-in city list.");

				self.fallback_places(query)
			},
			Err(_) => {
				let err = Error::SourceTimeout {
					kind: SourceKind::Place,
					deadline_ms: deadline.as_millis() as u64,
				};

				tracing::warn!(error = %err, "Place lookup timed out; using built-in city list.");

				self.fallback_places(query)
			},
		}
	}

	fn fallback_places(&self, query: &SearchQuery) -> Vec<SearchResult> {
		let min_similarity = self.cfg.search.min_similarity;

		FALLBACK_CITIES
			.iter()
			.filter(|city| text::similarity(&query.text, city) >= min_similarity)
			.map(|city| SearchResult {
				id: city.to_lowercase().replace(' ', "_"),
				display_text: (*city).to_string(),
				subtitle: Some("City in the Czech Republic".to_string()),
				kind: SourceKind::Place,
				icon: Icon::Place,
				confidence: text::confidence(&query.text, city),
				distance_km: None,
				payload: Value::Null,
			})
			.collect()
	}

	async fn ride_candidates(&self, query: &SearchQuery, deadline: StdDuration) -> Vec<SearchResult> {
		if !query.enabled_sources.contains(&SourceKind::Ride) {
			return Vec::new();
		}

		let cfg = &self.cfg.providers.rides;
		let outcome =
			match tokio::time::timeout(deadline, self.capabilities.rides.find_rides(cfg, &query.text))
				.await
			{
				Ok(Ok(rides)) => Ok(rides),
				Ok(Err(err)) =>
					Err(Error::SourceFailure { kind: SourceKind::Ride, message: err.to_string() }),
				Err(_) => Err(Error::SourceTimeout {
					kind: SourceKind::Ride,
					deadline_ms: deadline.as_millis() as u64,
				}),
			};

		match outcome {
			Ok(rides) => rides.into_iter().map(|record| ride_result(&query.text, record)).collect(),
			Err(err) => {
				tracing::warn!(error = %err, source = %SourceKind::Ride, "Source contributed no results.");

				Vec::new()
			},
		}
	}

	async fn user_candidates(&self, query: &SearchQuery, deadline: StdDuration) -> Vec<SearchResult> {
		if !query.enabled_sources.contains(&SourceKind::User) {
			return Vec::new();
		}

		let cfg = &self.cfg.providers.users;
		let outcome =
			match tokio::time::timeout(deadline, self.capabilities.users.find_users(cfg, &query.text))
				.await
			{
				Ok(Ok(users)) => Ok(users),
				Ok(Err(err)) =>
					Err(Error::SourceFailure { kind: SourceKind::User, message: err.to_string() }),
				Err(_) => Err(Error::SourceTimeout {
					kind: SourceKind::User,
					deadline_ms: deadline.as_millis() as u64,
				}),
			};

		match outcome {
			Ok(users) => users.into_iter().map(|record| user_result(&query.text, record)).collect(),
			Err(err) => {
				tracing::warn!(error = %err, source = %SourceKind::User, "Source contributed no results.");

				Vec::new()
			},
		}
	}
}

fn place_result(query: &SearchQuery, candidate: PlaceCandidate) -> SearchResult {
	let confidence = match candidate.rank {
		Some(rank) => rank.clamp(0.0, 1.0),
		None => text::confidence(&query.text, &candidate.label),
	};
	let distance_km = match (query.origin_geo, candidate.location) {
		(Some(origin), Some(location)) => Some(geo::haversine_km(origin, location)),
		_ => None,
	};
	let payload = serde_json::to_value(&candidate).unwrap_or(Value::Null);

	SearchResult {
		id: candidate.id,
		display_text: candidate.label,
		subtitle: None,
		kind: SourceKind::Place,
		icon: Icon::Place,
		confidence,
		distance_km,
		payload,
	}
}

fn ride_result(query_text: &str, ride: RideRecord) -> SearchResult {
	let confidence =
		text::confidence(query_text, &format!("{} {}", ride.from_location, ride.to_location));
	let driver = ride.driver_name.clone().unwrap_or_else(|| "Unknown driver".to_string());
	let subtitle = format!("{} • {} • {} Kč", ride.departure_time, driver, ride.price_per_person);
	let payload = serde_json::to_value(&ride).unwrap_or(Value::Null);

	SearchResult {
		id: format!("ride_{}", ride.id),
		display_text: format!("{} → {}", ride.from_location, ride.to_location),
		subtitle: Some(subtitle),
		kind: SourceKind::Ride,
		icon: Icon::Ride,
		confidence,
		distance_km: None,
		payload,
	}
}

fn user_result(query_text: &str, user: UserRecord) -> SearchResult {
	let confidence = text::confidence(query_text, &user.name);
	let rating = user.rating.unwrap_or(5.0);
	let subtitle = match user.phone.as_deref() {
		Some(phone) => format!("★ {rating:.1} • {phone}"),
		None => format!("★ {rating:.1}"),
	};
	let payload = serde_json::to_value(&user).unwrap_or(Value::Null);

	SearchResult {
		id: format!("user_{}", user.id),
		display_text: user.name,
		subtitle: Some(subtitle),
		kind: SourceKind::User,
		icon: Icon::User,
		confidence,
		distance_km: None,
		payload,
	}
}
