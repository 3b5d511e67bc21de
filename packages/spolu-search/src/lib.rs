pub mod cache;
pub mod error;
pub mod history;
pub mod model;
pub mod ranking;
pub mod search;
pub mod session;

use std::{future::Future, pin::Pin, sync::Arc};

use parking_lot::Mutex;
use time::OffsetDateTime;

use spolu_config::{Config, PlaceProviderConfig, ProviderConfig};
use spolu_domain::geo::GeoPoint;
use spolu_providers::{PlaceCandidate, RideRecord, UserRecord, place, ride, user};

pub use cache::{CacheKey, ResultCache};
pub use error::{Error, Result};
pub use history::{HistoryEntry, HistoryStore};
pub use model::{Icon, PopularDestination, RankedResultSet, SearchQuery, SearchResult, SourceKind};
pub use session::QuerySession;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait PlaceLookup
where
	Self: Send + Sync,
{
	fn suggest_places<'a>(
		&'a self,
		cfg: &'a PlaceProviderConfig,
		text: &'a str,
		origin: Option<GeoPoint>,
	) -> BoxFuture<'a, spolu_providers::Result<Vec<PlaceCandidate>>>;
}

pub trait RideDirectory
where
	Self: Send + Sync,
{
	fn find_rides<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, spolu_providers::Result<Vec<RideRecord>>>;
}

pub trait UserDirectory
where
	Self: Send + Sync,
{
	fn find_users<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, spolu_providers::Result<Vec<UserRecord>>>;
}

/// The external capabilities the engine consumes but does not implement.
#[derive(Clone)]
pub struct Capabilities {
	pub place: Arc<dyn PlaceLookup>,
	pub rides: Arc<dyn RideDirectory>,
	pub users: Arc<dyn UserDirectory>,
}

struct DefaultCapabilities;

impl PlaceLookup for DefaultCapabilities {
	fn suggest_places<'a>(
		&'a self,
		cfg: &'a PlaceProviderConfig,
		text: &'a str,
		origin: Option<GeoPoint>,
	) -> BoxFuture<'a, spolu_providers::Result<Vec<PlaceCandidate>>> {
		Box::pin(place::suggest(cfg, text, origin))
	}
}

impl RideDirectory for DefaultCapabilities {
	fn find_rides<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, spolu_providers::Result<Vec<RideRecord>>> {
		Box::pin(ride::find_rides(cfg, text))
	}
}

impl UserDirectory for DefaultCapabilities {
	fn find_users<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, spolu_providers::Result<Vec<UserRecord>>> {
		Box::pin(user::find_users(cfg, text))
	}
}

impl Capabilities {
	pub fn new(
		place: Arc<dyn PlaceLookup>,
		rides: Arc<dyn RideDirectory>,
		users: Arc<dyn UserDirectory>,
	) -> Self {
		Self { place, rides, users }
	}
}

impl Default for Capabilities {
	fn default() -> Self {
		let provider = Arc::new(DefaultCapabilities);

		Self { place: provider.clone(), rides: provider.clone(), users: provider }
	}
}

/// The search engine: fan-out, ranking, caching, and selection history behind
/// one `search` entry point. Shared across query sessions via `Arc`; the cache
/// and history store are injected so callers control their lifecycles.
pub struct SearchService {
	pub cfg: Config,
	pub capabilities: Capabilities,
	cache: ResultCache,
	history: HistoryStore,
	popular: Mutex<Vec<PopularDestination>>,
}

impl SearchService {
	pub fn new(cfg: Config, cache: ResultCache, history: HistoryStore) -> Self {
		Self::with_capabilities(cfg, cache, history, Capabilities::default())
	}

	pub fn with_capabilities(
		cfg: Config,
		cache: ResultCache,
		history: HistoryStore,
		capabilities: Capabilities,
	) -> Self {
		Self { cfg, capabilities, cache, history, popular: Mutex::new(Vec::new()) }
	}

	pub fn history(&self) -> &HistoryStore {
		&self.history
	}

	pub fn cache(&self) -> &ResultCache {
		&self.cache
	}

	/// Replaces the externally supplied popular-destination list surfaced on
	/// the suggestions path.
	pub fn set_popular(&self, destinations: Vec<PopularDestination>) {
		*self.popular.lock() = destinations;
	}

	/// The caller accepted a result; remember it. Routing to a ride page,
	/// chat, or map is the caller's responsibility.
	pub fn record_selection(&self, result: &SearchResult, now: OffsetDateTime) {
		self.history.record(HistoryEntry {
			id: result.id.clone(),
			display_text: result.display_text.clone(),
			kind: result.kind,
			timestamp: now,
		});
	}
}
