// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The roles page: a role list and a paginated user table.

use std::sync::Arc;

use docman_policy_core::{Action, ResourceType};

use super::{Listable, RowAction};
use crate::gate::AbilityGate;
use crate::model::{Role, User, UserStatus};

/// Users shown per page.
pub const PAGE_SIZE: usize = 10;

impl Listable for Role {
	const RESOURCE_TYPE: ResourceType = ResourceType::Role;
	const ROW_ACTIONS: &'static [RowAction] = &[RowAction::Edit, RowAction::Delete];
	const EMPTY_MESSAGE: &'static str = "No roles found";

	fn id(&self) -> &str {
		&self.id
	}

	fn search_text(&self) -> &str {
		&self.name
	}
}

/// User table with search, role and status filters, and pagination.
///
/// Search matches name or email. Filters combine with search; `None` means
/// "all". Pages are numbered from 1.
#[derive(Debug, Clone)]
pub struct UserTable {
	users: Arc<Vec<User>>,
	search: String,
	role: Option<String>,
	status: Option<UserStatus>,
}

impl UserTable {
	pub fn new(users: Arc<Vec<User>>) -> Self {
		Self {
			users,
			search: String::new(),
			role: None,
			status: None,
		}
	}

	pub fn set_search(&mut self, search: impl Into<String>) {
		self.search = search.into();
	}

	pub fn set_role_filter(&mut self, role: Option<String>) {
		self.role = role;
	}

	pub fn set_status_filter(&mut self, status: Option<UserStatus>) {
		self.status = status;
	}

	pub fn source(&self) -> &Arc<Vec<User>> {
		&self.users
	}

	/// Every user passing search and filters, in source order.
	pub fn filtered(&self) -> Vec<&User> {
		let needle = self.search.to_lowercase();
		self
			.users
			.iter()
			.filter(|u| {
				needle.is_empty()
					|| u.name.to_lowercase().contains(&needle)
					|| u.email.to_lowercase().contains(&needle)
			})
			.filter(|u| self.role.as_ref().map_or(true, |r| u.role == *r))
			.filter(|u| self.status.map_or(true, |s| u.status == s))
			.collect()
	}

	pub fn page_count(&self) -> usize {
		self.filtered().len().div_ceil(PAGE_SIZE)
	}

	/// Users on page `page`. Page 0 and pages past the end are empty.
	pub fn page(&self, page: usize) -> Vec<&User> {
		let Some(offset) = page.checked_sub(1).and_then(|p| p.checked_mul(PAGE_SIZE)) else {
			return Vec::new();
		};
		self
			.filtered()
			.into_iter()
			.skip(offset)
			.take(PAGE_SIZE)
			.collect()
	}

	/// Whether the role selector may assign `role_id`.
	pub fn can_assign<G>(&self, gate: &G, role_id: &str) -> bool
	where
		G: AbilityGate + ?Sized,
	{
		gate.can(Action::Update, ResourceType::Role, Some(role_id))
	}
}
