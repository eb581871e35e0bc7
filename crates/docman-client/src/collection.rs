// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cached resource collections.
//!
//! A [`Collection`] holds at most one snapshot of a backend listing. Snapshots
//! are swapped whole and shared as `Arc<Vec<T>>`; nothing edits a snapshot in
//! place. Mutations invalidate the collection so the next read re-fetches.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::Result;

pub struct Collection<T> {
	name: &'static str,
	snapshot: RwLock<Option<Arc<Vec<T>>>>,
	generation: AtomicU64,
}

impl<T> Collection<T> {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			snapshot: RwLock::new(None),
			generation: AtomicU64::new(0),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Current snapshot, without fetching.
	pub fn snapshot(&self) -> Option<Arc<Vec<T>>> {
		self
			.snapshot
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	/// Returns the cached snapshot or runs `fetch` and caches its result.
	///
	/// A fetch that completes after an [`invalidate`](Self::invalidate) is
	/// returned to its caller but not cached, so an invalidation is never
	/// undone by an older in-flight read. A failed fetch leaves the cache as it
	/// was.
	pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Arc<Vec<T>>>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<Vec<T>>>,
	{
		if let Some(items) = self.snapshot() {
			return Ok(items);
		}

		let generation = self.generation.load(Ordering::SeqCst);
		let items = Arc::new(fetch().await?);

		let mut slot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
		if self.generation.load(Ordering::SeqCst) == generation {
			*slot = Some(Arc::clone(&items));
			debug!(collection = self.name, items = items.len(), "Cached collection");
		} else {
			debug!(collection = self.name, "Discarded stale collection fetch");
		}
		Ok(items)
	}

	/// Drops the snapshot; the next read fetches again.
	pub fn invalidate(&self) {
		let mut slot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
		self.generation.fetch_add(1, Ordering::SeqCst);
		*slot = None;
		debug!(collection = self.name, "Invalidated collection");
	}
}

impl<T> std::fmt::Debug for Collection<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Collection")
			.field("name", &self.name)
			.field("cached", &self.snapshot().is_some())
			.finish()
	}
}
