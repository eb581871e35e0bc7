// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document rows plus the sort and filter steps applied before listing.

use std::cmp::Ordering;

use docman_policy_core::ResourceType;

use super::{Listable, RowAction};
use crate::model::{Document, DocumentStatus};

impl Listable for Document {
	const RESOURCE_TYPE: ResourceType = ResourceType::Document;
	const ROW_ACTIONS: &'static [RowAction] =
		&[RowAction::Edit, RowAction::Delete, RowAction::Share];
	const EMPTY_MESSAGE: &'static str = "No documents found";

	fn id(&self) -> &str {
		&self.id
	}

	fn search_text(&self) -> &str {
		&self.title
	}
}

/// Sortable document columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSortKey {
	Title,
	Category,
	LastModified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
	Ascending,
	Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
	pub key: DocumentSortKey,
	pub direction: SortDirection,
}

impl SortState {
	/// State after clicking the `key` column header.
	///
	/// Clicking the current column flips the direction; any other column
	/// starts ascending.
	pub fn toggle(current: Option<SortState>, key: DocumentSortKey) -> SortState {
		match current {
			Some(state) if state.key == key => SortState {
				key,
				direction: match state.direction {
					SortDirection::Ascending => SortDirection::Descending,
					SortDirection::Descending => SortDirection::Ascending,
				},
			},
			_ => SortState {
				key,
				direction: SortDirection::Ascending,
			},
		}
	}
}

/// Returns a sorted copy. Ties keep their input order. Text columns compare
/// case-insensitively; documents never modified sort first when ascending.
pub fn sort_documents(documents: &[Document], sort: SortState) -> Vec<Document> {
	let mut sorted = documents.to_vec();
	sorted.sort_by(|a, b| {
		let ordering = compare(a, b, sort.key);
		match sort.direction {
			SortDirection::Ascending => ordering,
			SortDirection::Descending => ordering.reverse(),
		}
	});
	sorted
}

fn compare(a: &Document, b: &Document, key: DocumentSortKey) -> Ordering {
	match key {
		DocumentSortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
		DocumentSortKey::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
		DocumentSortKey::LastModified => a.last_modified.cmp(&b.last_modified),
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFilter {
	Category(String),
	Status(DocumentStatus),
}

impl DocumentFilter {
	pub fn matches(&self, document: &Document) -> bool {
		match self {
			DocumentFilter::Category(category) => document.category == *category,
			DocumentFilter::Status(status) => document.status == *status,
		}
	}
}

/// Returns the documents the filter keeps, in input order.
pub fn filter_documents(documents: &[Document], filter: &DocumentFilter) -> Vec<Document> {
	documents
		.iter()
		.filter(|d| filter.matches(d))
		.cloned()
		.collect()
}
