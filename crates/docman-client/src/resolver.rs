// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turns an identity into an [`AbilitySet`].

use std::sync::Arc;

use docman_policy_core::{AbilitySet, UserId};
use tracing::{debug, instrument, warn};

use crate::api::PolicyApi;

/// Fetches an identity's relationships and builds its ability set.
///
/// Resolution never fails: a backend or network error leaves the caller with
/// an empty set, which denies everything. There is no retry; callers resolve
/// again on the next identity change or an explicit refresh.
#[derive(Clone)]
pub struct PermissionResolver {
	api: Arc<dyn PolicyApi>,
}

impl PermissionResolver {
	pub fn new(api: Arc<dyn PolicyApi>) -> Self {
		Self { api }
	}

	#[instrument(skip(self), fields(user_id = %identity))]
	pub async fn resolve(&self, identity: &UserId) -> AbilitySet {
		match self.api.list_relationships(identity).await {
			Ok(relationships) => {
				let abilities = AbilitySet::from_relationships(&relationships);
				debug!(
					relationships = relationships.len(),
					rules = abilities.len(),
					"Resolved abilities"
				);
				abilities
			}
			Err(e) => {
				warn!(error = %e, "Failed to fetch relationships, denying all actions");
				AbilitySet::empty()
			}
		}
	}
}
