// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! List view models.
//!
//! A [`ResourceList`] renders a snapshot it was handed plus local search text.
//! It never fetches and never edits the snapshot. Ordering and filtering other
//! than search are done by the caller before building the list (see
//! [`documents::sort_documents`] and [`documents::filter_documents`]).
//!
//! Every action control shown for a row is decided by the gate per item, so a
//! control the user may not use is simply absent.

pub mod categories;
pub mod documents;
pub mod users;

use std::sync::Arc;

use docman_policy_core::{Action, ResourceType};

use crate::gate::AbilityGate;

/// Per-row controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
	Edit,
	Delete,
	Share,
}

impl RowAction {
	pub fn action(&self) -> Action {
		match self {
			RowAction::Edit => Action::Update,
			RowAction::Delete => Action::Delete,
			RowAction::Share => Action::Share,
		}
	}
}

/// A record type that can be shown in a [`ResourceList`].
pub trait Listable {
	const RESOURCE_TYPE: ResourceType;
	/// Controls offered per row, before gating.
	const ROW_ACTIONS: &'static [RowAction];
	const EMPTY_MESSAGE: &'static str;

	fn id(&self) -> &str;

	/// Text the search box matches against.
	fn search_text(&self) -> &str;
}

/// One visible item with the controls the gate allows for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow<'a, T> {
	pub item: &'a T,
	pub actions: Vec<RowAction>,
}

impl<T> ListRow<'_, T> {
	pub fn allows(&self, action: RowAction) -> bool {
		self.actions.contains(&action)
	}
}

#[derive(Debug, Clone)]
pub struct ResourceList<T> {
	items: Arc<Vec<T>>,
	search: String,
}

impl<T: Listable> ResourceList<T> {
	pub fn new(items: Arc<Vec<T>>) -> Self {
		Self {
			items,
			search: String::new(),
		}
	}

	pub fn set_search(&mut self, search: impl Into<String>) {
		self.search = search.into();
	}

	pub fn search(&self) -> &str {
		&self.search
	}

	/// The snapshot this list was built from.
	pub fn source(&self) -> &Arc<Vec<T>> {
		&self.items
	}

	/// Items whose search text contains the search term, ignoring case, in
	/// source order. An empty term shows everything.
	pub fn visible(&self) -> Vec<&T> {
		let needle = self.search.to_lowercase();
		self
			.items
			.iter()
			.filter(|item| needle.is_empty() || item.search_text().to_lowercase().contains(&needle))
			.collect()
	}

	pub fn rows<G>(&self, gate: &G) -> Vec<ListRow<'_, T>>
	where
		G: AbilityGate + ?Sized,
	{
		self
			.visible()
			.into_iter()
			.map(|item| ListRow {
				item,
				actions: permitted_actions(gate, T::RESOURCE_TYPE, item.id(), T::ROW_ACTIONS),
			})
			.collect()
	}

	/// Whether to show the "new" control.
	pub fn create_allowed<G>(&self, gate: &G) -> bool
	where
		G: AbilityGate + ?Sized,
	{
		gate.can(Action::Create, T::RESOURCE_TYPE, None)
	}

	/// Message to show instead of rows, if nothing is visible.
	pub fn empty_message(&self) -> Option<&'static str> {
		self.visible().is_empty().then_some(T::EMPTY_MESSAGE)
	}
}

pub(crate) fn permitted_actions<G>(
	gate: &G,
	resource_type: ResourceType,
	id: &str,
	offered: &[RowAction],
) -> Vec<RowAction>
where
	G: AbilityGate + ?Sized,
{
	offered
		.iter()
		.copied()
		.filter(|a| gate.can(a.action(), resource_type, Some(id)))
		.collect()
}
