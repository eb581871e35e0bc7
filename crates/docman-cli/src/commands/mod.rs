// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod categories;
pub mod check;
pub mod dashboard;
pub mod documents;
pub mod roles;
pub mod users;

use clap::{Args, Subcommand, ValueEnum};
use docman_client::{DocumentSortKey, DocumentStatus, RowAction, UserStatus};
use docman_policy_core::{Action, RelationKind, ResourceType};

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
	/// List categories
	List {
		/// Only show categories whose name contains this text
		#[arg(short, long, default_value = "")]
		search: String,
	},
	/// Create a category
	Create {
		name: String,
		#[arg(short, long, default_value = "")]
		description: String,
	},
	/// Delete a category
	Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DocumentsCommand {
	/// List documents
	List {
		/// Only show documents whose title contains this text
		#[arg(short, long, default_value = "")]
		search: String,
		#[arg(long, value_enum)]
		sort: Option<SortColumn>,
		/// Sort descending (with --sort)
		#[arg(long, requires = "sort")]
		descending: bool,
		/// Only show documents in this category
		#[arg(long, conflicts_with = "status")]
		category: Option<String>,
		/// Only show documents with this status
		#[arg(long, value_enum)]
		status: Option<StatusArg>,
	},
	/// Create a document
	Create {
		title: String,
		#[arg(short, long)]
		category: String,
		#[arg(long, default_value = "Unknown")]
		author: String,
	},
	/// Delete a document
	Delete { id: String },
	/// Grant another user a relation on a document
	Share {
		id: String,
		/// User to share with
		#[arg(long)]
		with: String,
		#[arg(long, value_enum, default_value = "viewer")]
		relation: RelationArg,
	},
}

#[derive(Subcommand, Debug)]
pub enum RolesCommand {
	/// List roles
	List {
		#[arg(short, long, default_value = "")]
		search: String,
	},
	/// Create a role
	Create {
		name: String,
		#[arg(short, long, default_value = "")]
		description: String,
		/// Permission names, comma separated
		#[arg(short, long, value_delimiter = ',')]
		permissions: Vec<String>,
	},
	/// Rename or re-describe a role
	Update {
		id: String,
		#[arg(long)]
		name: Option<String>,
		#[arg(long)]
		description: Option<String>,
	},
	/// Delete a role
	Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
	/// List users, ten per page
	List {
		/// Match against name or email
		#[arg(short, long, default_value = "")]
		search: String,
		#[arg(long)]
		role: Option<String>,
		#[arg(long, value_enum)]
		status: Option<UserStatusArg>,
		#[arg(long, default_value_t = 1)]
		page: usize,
	},
	/// Assign a role to a user
	Assign {
		user: String,
		#[arg(long)]
		role: String,
	},
}

#[derive(Args, Debug)]
pub struct CheckArgs {
	/// Action to check, e.g. update
	pub action: Action,
	/// Resource type, e.g. Document
	pub resource_type: ResourceType,
	/// Resource ids to check
	#[arg(required = true)]
	pub ids: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SortColumn {
	Title,
	Category,
	LastModified,
}

impl From<SortColumn> for DocumentSortKey {
	fn from(column: SortColumn) -> Self {
		match column {
			SortColumn::Title => DocumentSortKey::Title,
			SortColumn::Category => DocumentSortKey::Category,
			SortColumn::LastModified => DocumentSortKey::LastModified,
		}
	}
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StatusArg {
	Draft,
	Published,
}

impl From<StatusArg> for DocumentStatus {
	fn from(status: StatusArg) -> Self {
		match status {
			StatusArg::Draft => DocumentStatus::Draft,
			StatusArg::Published => DocumentStatus::Published,
		}
	}
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum UserStatusArg {
	Active,
	Inactive,
}

impl From<UserStatusArg> for UserStatus {
	fn from(status: UserStatusArg) -> Self {
		match status {
			UserStatusArg::Active => UserStatus::Active,
			UserStatusArg::Inactive => UserStatus::Inactive,
		}
	}
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum RelationArg {
	Owner,
	Editor,
	Viewer,
}

impl From<RelationArg> for RelationKind {
	fn from(relation: RelationArg) -> Self {
		match relation {
			RelationArg::Owner => RelationKind::Owner,
			RelationArg::Editor => RelationKind::Editor,
			RelationArg::Viewer => RelationKind::Viewer,
		}
	}
}

/// `[edit, delete]`, or an empty string when nothing is permitted.
pub(crate) fn format_actions(actions: &[RowAction]) -> String {
	if actions.is_empty() {
		return String::new();
	}
	let names: Vec<&str> = actions
		.iter()
		.map(|a| match a {
			RowAction::Edit => "edit",
			RowAction::Delete => "delete",
			RowAction::Share => "share",
		})
		.collect();
	format!("[{}]", names.join(", "))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn formats_permitted_actions() {
		assert_eq!(format_actions(&[]), "");
		assert_eq!(
			format_actions(&[RowAction::Edit, RowAction::Share]),
			"[edit, share]"
		);
	}
}
