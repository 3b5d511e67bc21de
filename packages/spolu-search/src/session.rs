use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{SearchService, model::{RankedResultSet, SearchQuery}};

#[derive(Default)]
struct SessionState {
	/// Monotonically increasing id of the most recently fired query. A search
	/// may only deliver while its own generation is still the newest.
	generation: u64,
	/// Distinguishes the live debounce timer from aborted ones, closing the
	/// race between a timer firing and a newer submit replacing it.
	timer_seq: u64,
	pending: Option<JoinHandle<()>>,
	detached: bool,
}

/// Debounce and staleness control for one search input. Each submit restarts
/// the debounce timer; when a timer fires, the query goes through
/// [`SearchService::search`] and the result is delivered on the session's
/// channel only if no newer query fired in the meantime. Detaching (or
/// dropping) the session cancels the pending timer and silences every
/// in-flight search.
pub struct QuerySession {
	service: Arc<SearchService>,
	debounce: Duration,
	state: Arc<Mutex<SessionState>>,
	results: mpsc::UnboundedSender<RankedResultSet>,
}

impl QuerySession {
	pub fn new(service: Arc<SearchService>) -> (Self, mpsc::UnboundedReceiver<RankedResultSet>) {
		let debounce = Duration::from_millis(service.cfg.search.debounce_ms);

		Self::with_debounce(service, debounce)
	}

	pub fn with_debounce(
		service: Arc<SearchService>,
		debounce: Duration,
	) -> (Self, mpsc::UnboundedReceiver<RankedResultSet>) {
		let (results, receiver) = mpsc::unbounded_channel();
		let session = Self {
			service,
			debounce,
			state: Arc::new(Mutex::new(SessionState::default())),
			results,
		};

		(session, receiver)
	}

	/// Schedules the query behind the debounce timer, cancelling any timer
	/// still pending. An older query already past its timer keeps running;
	/// its result is discarded at delivery time once a newer one fires.
	pub fn submit(&self, query: SearchQuery) {
		let mut state = self.state.lock();

		if state.detached {
			return;
		}
		if let Some(pending) = state.pending.take() {
			pending.abort();
		}

		state.timer_seq += 1;

		let seq = state.timer_seq;
		let service = self.service.clone();
		let shared = self.state.clone();
		let results = self.results.clone();
		let debounce = self.debounce;

		state.pending = Some(tokio::spawn(async move {
			tokio::time::sleep(debounce).await;

			let fired = {
				let mut state = shared.lock();

				if state.detached || state.timer_seq != seq {
					return;
				}

				state.pending = None;
				state.generation += 1;
				state.generation
			};
			let set = service.search(&query, fired).await;
			let state = shared.lock();

			if state.generation == fired && !state.detached {
				let _ = results.send(set);
			}
		}));
	}

	/// Cancels the pending timer and makes every in-flight generation
	/// permanently stale.
	pub fn detach(&self) {
		let mut state = self.state.lock();

		if let Some(pending) = state.pending.take() {
			pending.abort();
		}

		state.detached = true;
		state.generation = state.generation.wrapping_add(1);
	}

	pub fn generation(&self) -> u64 {
		self.state.lock().generation
	}
}

impl Drop for QuerySession {
	fn drop(&mut self) {
		self.detach();
	}
}
