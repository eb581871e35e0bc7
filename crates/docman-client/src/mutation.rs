// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Gated create/update/delete operations.
//!
//! Every dispatcher method runs the same sequence:
//!
//! 1. validate the input ([`ClientError::Validation`]),
//! 2. require an identity ([`ClientError::NotSignedIn`]),
//! 3. ask the session's gate ([`ClientError::Forbidden`]),
//! 4. call the backend.
//!
//! Steps 1-3 never reach the network. On success the affected collection is
//! invalidated and a success notification is raised; on failure a destructive
//! notification is raised and cached collections are left exactly as they were.
//! A success status with an unreadable body still counts as success for the
//! cache and the notification, but the error is returned since no record came
//! back.

use docman_policy_core::{Action, RelationKind, ResourceType, UserId};
use tracing::{info, instrument, warn};

use crate::error::{ClientError, Result};
use crate::gate::AbilityGate;
use crate::model::{Category, Document, NewCategory, NewDocument, NewRelationship, NewRole, Role};
use crate::notify::Notification;
use crate::session::{CollectionKey, Session};

/// Success toast for a mutation.
struct Outcome {
	title: &'static str,
	description: &'static str,
	invalidates: Option<CollectionKey>,
}

pub struct Dispatcher<'a> {
	session: &'a Session,
}

impl<'a> Dispatcher<'a> {
	pub(crate) fn new(session: &'a Session) -> Self {
		Self { session }
	}

	#[instrument(skip(self, category), fields(name = %category.name))]
	pub async fn create_category(&self, category: NewCategory) -> Result<Category> {
		let category = NewCategory {
			name: required(&category.name, "Category name is required.")?,
			description: category.description.trim().to_string(),
		};
		let identity = self.authorize(
			Action::Create,
			ResourceType::Category,
			None,
			"Failed to create category.",
		)?;
		let result = self
			.session
			.api()
			.create_category(&identity, &category)
			.await;
		self.settle(
			result,
			Outcome {
				title: "Category Created",
				description: "The new category has been successfully created.",
				invalidates: Some(CollectionKey::Categories),
			},
			"Failed to create category.",
		)
	}

	#[instrument(skip(self))]
	pub async fn delete_category(&self, id: &str) -> Result<()> {
		let identity = self.authorize(
			Action::Delete,
			ResourceType::Category,
			Some(id),
			"Failed to delete category.",
		)?;
		let result = self.session.api().delete_category(&identity, id).await;
		self.settle(
			result,
			Outcome {
				title: "Category Deleted",
				description: "The category has been successfully deleted.",
				invalidates: Some(CollectionKey::Categories),
			},
			"Failed to delete category.",
		)
	}

	#[instrument(skip(self, document), fields(title = %document.title))]
	pub async fn create_document(&self, document: NewDocument) -> Result<Document> {
		let document = NewDocument {
			title: required(&document.title, "Document title is required.")?,
			category: required(&document.category, "Document category is required.")?,
			..document
		};
		let identity = self.authorize(
			Action::Create,
			ResourceType::Document,
			None,
			"Failed to create document.",
		)?;
		let result = self
			.session
			.api()
			.create_document(&identity, &document)
			.await;
		self.settle(
			result,
			Outcome {
				title: "Document Created",
				description: "The new document has been successfully created.",
				invalidates: Some(CollectionKey::Documents),
			},
			"Failed to create document.",
		)
	}

	#[instrument(skip(self))]
	pub async fn delete_document(&self, id: &str) -> Result<()> {
		let identity = self.authorize(
			Action::Delete,
			ResourceType::Document,
			Some(id),
			"Failed to delete document.",
		)?;
		let result = self.session.api().delete_document(&identity, id).await;
		self.settle(
			result,
			Outcome {
				title: "Document Deleted",
				description: "The document has been successfully deleted.",
				invalidates: Some(CollectionKey::Documents),
			},
			"Failed to delete document.",
		)
	}

	/// Grants `relation` on document `id` to `target`.
	///
	/// Only the target's abilities change, so no cached collection is touched.
	#[instrument(skip(self, target, relation), fields(target = %target, relation = %relation))]
	pub async fn share_document(&self, id: &str, target: &UserId, relation: RelationKind) -> Result<()> {
		let identity = self.authorize(
			Action::Share,
			ResourceType::Document,
			Some(id),
			"Failed to share document.",
		)?;
		let rel = NewRelationship::new(target, &relation, ResourceType::Document, id);
		let result = self.session.api().create_relationship(&identity, &rel).await;
		self.settle(
			result,
			Outcome {
				title: "Document Shared",
				description: "The document has been successfully shared.",
				invalidates: None,
			},
			"Failed to share document.",
		)
	}

	#[instrument(skip(self, role), fields(name = %role.name))]
	pub async fn create_role(&self, role: NewRole) -> Result<Role> {
		let role = NewRole {
			name: required(&role.name, "Role name is required.")?,
			..role
		};
		let identity =
			self.authorize(Action::Create, ResourceType::Role, None, "Failed to create role.")?;
		let result = self.session.api().create_role(&identity, &role).await;
		self.settle(
			result,
			Outcome {
				title: "Role Created",
				description: "The new role has been successfully created.",
				invalidates: Some(CollectionKey::Roles),
			},
			"Failed to create role.",
		)
	}

	#[instrument(skip(self, role), fields(role_id = %role.id))]
	pub async fn update_role(&self, role: Role) -> Result<Role> {
		let role = Role {
			name: required(&role.name, "Role name is required.")?,
			..role
		};
		let identity = self.authorize(
			Action::Update,
			ResourceType::Role,
			Some(&role.id),
			"Failed to update role.",
		)?;
		let result = self.session.api().update_role(&identity, &role).await;
		self.settle(
			result,
			Outcome {
				title: "Role Updated",
				description: "The role has been successfully updated.",
				invalidates: Some(CollectionKey::Roles),
			},
			"Failed to update role.",
		)
	}

	#[instrument(skip(self))]
	pub async fn delete_role(&self, id: &str) -> Result<()> {
		let identity =
			self.authorize(Action::Delete, ResourceType::Role, Some(id), "Failed to delete role.")?;
		let result = self.session.api().delete_role(&identity, id).await;
		self.settle(
			result,
			Outcome {
				title: "Role Deleted",
				description: "The role has been successfully deleted.",
				invalidates: Some(CollectionKey::Roles),
			},
			"Failed to delete role.",
		)
	}

	/// Gives `user_id` the role `role_id`. Requires `update` on that role.
	#[instrument(skip(self))]
	pub async fn assign_role(&self, user_id: &str, role_id: &str) -> Result<()> {
		let user_id = required(user_id, "A user must be selected.")?;
		let role_id = required(role_id, "A role must be selected.")?;
		let identity = self.authorize(
			Action::Update,
			ResourceType::Role,
			Some(&role_id),
			"Failed to update user role.",
		)?;
		let result = self
			.session
			.api()
			.assign_role(&identity, &user_id, &role_id)
			.await;
		self.settle(
			result,
			Outcome {
				title: "User Role Updated",
				description: "The user's role has been successfully updated.",
				invalidates: Some(CollectionKey::Users),
			},
			"Failed to update user role.",
		)
	}

	fn authorize(
		&self,
		action: Action,
		resource_type: ResourceType,
		instance: Option<&str>,
		failure: &str,
	) -> Result<UserId> {
		let identity = self.session.require_identity()?;
		if !self.session.gate().can(action, resource_type, instance) {
			warn!(
				user_id = %identity,
				%action,
				%resource_type,
				instance = instance.unwrap_or("*"),
				"Mutation denied by cached abilities"
			);
			self.session.notify(Notification::error(failure));
			return Err(ClientError::Forbidden {
				action,
				resource_type,
			});
		}
		Ok(identity)
	}

	fn settle<T>(&self, result: Result<T>, outcome: Outcome, failure: &str) -> Result<T> {
		match result {
			Ok(value) => {
				if let Some(key) = outcome.invalidates {
					self.session.invalidate(key);
				}
				info!(title = outcome.title, "Mutation succeeded");
				self
					.session
					.notify(Notification::success(outcome.title, outcome.description));
				Ok(value)
			}
			Err(e) if e.is_accepted() => {
				if let Some(key) = outcome.invalidates {
					self.session.invalidate(key);
				}
				warn!(error = %e, title = outcome.title, "Mutation accepted but response was unreadable");
				self
					.session
					.notify(Notification::success(outcome.title, outcome.description));
				Err(e)
			}
			Err(e) => {
				warn!(error = %e, "Mutation failed");
				self.session.notify(Notification::error(failure));
				Err(e)
			}
		}
	}
}

/// Trims `value`, rejecting it when blank.
fn required(value: &str, message: &str) -> Result<String> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err(ClientError::Validation(message.to_string()));
	}
	Ok(trimmed.to_string())
}
