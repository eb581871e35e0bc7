// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The signed-in context shared by every list and dispatcher.
//!
//! A [`Session`] is created signed out with an empty ability set. Signing in
//! resolves the identity's abilities; signing out discards the identity, the
//! abilities and every cached collection.
//!
//! Resolutions are ordered by an epoch counter that is bumped on every
//! identity change. A resolution only installs its ability set if the epoch
//! it started under is still current, so a slow response for a previous
//! identity can never overwrite the abilities of the current one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use docman_policy_core::{AbilitySet, UserId};
use futures::future::join_all;
use tracing::{debug, info, instrument};

use crate::api::PolicyApi;
use crate::collection::Collection;
use crate::error::{ClientError, Result};
use crate::gate::CachedAbilityGate;
use crate::model::{Category, Document, PermissionCheck, Role, User};
use crate::mutation::Dispatcher;
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::resolver::PermissionResolver;

/// Where the session is in its identity lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityStatus {
	SignedOut,
	/// Identity present, abilities still being resolved. Everything is denied.
	Loading,
	Ready,
}

/// Result of a sign-in or refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
	/// The resolved ability set was installed.
	Applied { rules: usize },
	/// The identity changed while resolving; the result was discarded.
	Superseded,
}

/// Cached collections held by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
	Categories,
	Documents,
	Roles,
	Users,
}

#[derive(Debug)]
struct IdentityState {
	identity: Option<UserId>,
	abilities: Arc<AbilitySet>,
	status: AbilityStatus,
}

impl IdentityState {
	fn signed_out() -> Self {
		Self {
			identity: None,
			abilities: Arc::new(AbilitySet::empty()),
			status: AbilityStatus::SignedOut,
		}
	}
}

pub struct Session {
	api: Arc<dyn PolicyApi>,
	resolver: PermissionResolver,
	state: RwLock<IdentityState>,
	epoch: AtomicU64,
	pub(crate) categories: Collection<Category>,
	pub(crate) documents: Collection<Document>,
	pub(crate) roles: Collection<Role>,
	pub(crate) users: Collection<User>,
	notifier: Arc<dyn Notifier>,
}

impl Session {
	/// Creates a signed-out session that reports notifications through tracing.
	pub fn new(api: Arc<dyn PolicyApi>) -> Self {
		Self::with_notifier(api, Arc::new(TracingNotifier))
	}

	pub fn with_notifier(api: Arc<dyn PolicyApi>, notifier: Arc<dyn Notifier>) -> Self {
		Self {
			resolver: PermissionResolver::new(Arc::clone(&api)),
			api,
			state: RwLock::new(IdentityState::signed_out()),
			epoch: AtomicU64::new(0),
			categories: Collection::new("categories"),
			documents: Collection::new("documents"),
			roles: Collection::new("roles"),
			users: Collection::new("users"),
			notifier,
		}
	}

	pub fn api(&self) -> &Arc<dyn PolicyApi> {
		&self.api
	}

	pub fn identity(&self) -> Option<UserId> {
		self.read_state().identity.clone()
	}

	pub fn status(&self) -> AbilityStatus {
		self.read_state().status
	}

	/// Gate over the abilities installed right now.
	pub fn gate(&self) -> CachedAbilityGate {
		CachedAbilityGate::new(Arc::clone(&self.read_state().abilities))
	}

	/// Switches to `identity` and resolves its abilities.
	///
	/// The previous identity's abilities and collections are dropped before
	/// resolution starts, so nothing is permitted while loading.
	#[instrument(skip(self), fields(user_id = %identity))]
	pub async fn sign_in(&self, identity: UserId) -> ResolutionOutcome {
		let epoch = {
			let mut state = self.write_state();
			let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
			state.identity = Some(identity.clone());
			state.abilities = Arc::new(AbilitySet::empty());
			state.status = AbilityStatus::Loading;
			epoch
		};
		self.clear_collections();
		info!("Signed in, resolving abilities");

		self.resolve_and_install(epoch, &identity).await
	}

	/// Re-resolves the current identity's abilities.
	///
	/// The installed abilities stay in effect until the new set arrives.
	#[instrument(skip(self))]
	pub async fn refresh_abilities(&self) -> Result<ResolutionOutcome> {
		let (epoch, identity) = {
			let mut state = self.write_state();
			let identity = state.identity.clone().ok_or(ClientError::NotSignedIn)?;
			let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
			state.status = AbilityStatus::Loading;
			(epoch, identity)
		};
		Ok(self.resolve_and_install(epoch, &identity).await)
	}

	/// Discards the identity, its abilities and every cached collection.
	pub fn sign_out(&self) {
		{
			let mut state = self.write_state();
			self.epoch.fetch_add(1, Ordering::SeqCst);
			*state = IdentityState::signed_out();
		}
		self.clear_collections();
		info!("Signed out");
	}

	async fn resolve_and_install(&self, epoch: u64, identity: &UserId) -> ResolutionOutcome {
		let abilities = self.resolver.resolve(identity).await;

		let mut state = self.write_state();
		if self.epoch.load(Ordering::SeqCst) != epoch {
			debug!(user_id = %identity, "Discarding superseded ability resolution");
			return ResolutionOutcome::Superseded;
		}
		let rules = abilities.len();
		state.abilities = Arc::new(abilities);
		state.status = AbilityStatus::Ready;
		info!(user_id = %identity, rules, "Abilities ready");
		ResolutionOutcome::Applied { rules }
	}

	// The identity is read inside the fetch, after the collection has pinned
	// its generation, so a sign-in racing the read can never leave the previous
	// identity's listing cached.

	pub async fn categories(&self) -> Result<Arc<Vec<Category>>> {
		self
			.categories
			.get_or_fetch(|| async move {
				let identity = self.require_identity()?;
				self.api.list_categories(&identity).await
			})
			.await
	}

	pub async fn documents(&self) -> Result<Arc<Vec<Document>>> {
		self
			.documents
			.get_or_fetch(|| async move {
				let identity = self.require_identity()?;
				self.api.list_documents(&identity).await
			})
			.await
	}

	pub async fn roles(&self) -> Result<Arc<Vec<Role>>> {
		self
			.roles
			.get_or_fetch(|| async move {
				let identity = self.require_identity()?;
				self.api.list_roles(&identity).await
			})
			.await
	}

	pub async fn users(&self) -> Result<Arc<Vec<User>>> {
		self
			.users
			.get_or_fetch(|| async move {
				let identity = self.require_identity()?;
				self.api.list_users(&identity).await
			})
			.await
	}

	pub fn invalidate(&self, key: CollectionKey) {
		match key {
			CollectionKey::Categories => self.categories.invalidate(),
			CollectionKey::Documents => self.documents.invalidate(),
			CollectionKey::Roles => self.roles.invalidate(),
			CollectionKey::Users => self.users.invalidate(),
		}
	}

	/// Asks the backend about each check concurrently.
	///
	/// These are live decisions and are not folded into the cached gate.
	/// Results are returned in input order; the first failure fails the batch.
	pub async fn check_permissions(&self, checks: &[PermissionCheck]) -> Result<Vec<bool>> {
		let identity = self.require_identity()?;
		join_all(
			checks
				.iter()
				.map(|check| self.api.check_permission(&identity, check)),
		)
		.await
		.into_iter()
		.collect()
	}

	/// Mutation entry points bound to this session.
	pub fn mutations(&self) -> Dispatcher<'_> {
		Dispatcher::new(self)
	}

	pub(crate) fn notify(&self, notification: Notification) {
		self.notifier.notify(notification);
	}

	pub(crate) fn require_identity(&self) -> Result<UserId> {
		self.identity().ok_or(ClientError::NotSignedIn)
	}

	fn clear_collections(&self) {
		for key in [
			CollectionKey::Categories,
			CollectionKey::Documents,
			CollectionKey::Roles,
			CollectionKey::Users,
		] {
			self.invalidate(key);
		}
	}

	fn read_state(&self) -> std::sync::RwLockReadGuard<'_, IdentityState> {
		self.state.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, IdentityState> {
		self.state.write().unwrap_or_else(PoisonError::into_inner)
	}
}
