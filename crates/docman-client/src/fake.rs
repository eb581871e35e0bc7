// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory [`PolicyApi`] for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docman_policy_core::{Relationship, UserId};
use tokio::sync::Notify;

use crate::api::PolicyApi;
use crate::error::{ClientError, Result};
use crate::model::{
	Category, Document, DocumentStatus, NewCategory, NewDocument, NewRelationship, NewRole,
	PermissionCheck, Role, User, UserStatus,
};

/// Pauses `list_relationships` for one identity until released.
#[derive(Clone, Default)]
pub(crate) struct Hold {
	pub started: Arc<Notify>,
	pub release: Arc<Notify>,
}

#[derive(Default)]
struct FakeState {
	relationships: HashMap<String, Vec<Relationship>>,
	holds: HashMap<String, Hold>,
	category_hold: Option<Hold>,
	categories_listed_for: Vec<String>,
	live_allowed: HashSet<String>,
	categories: Vec<Category>,
	documents: Vec<Document>,
	roles: Vec<Role>,
	users: Vec<User>,
	created_relationships: Vec<NewRelationship>,
	calls: Vec<String>,
	next_id: u64,
}

#[derive(Default)]
pub(crate) struct FakePolicyApi {
	state: Mutex<FakeState>,
	fail_relationships: AtomicBool,
	fail_mutations: AtomicBool,
}

impl FakePolicyApi {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_relationships(&self, user: &str, relationships: Vec<Relationship>) {
		self
			.state
			.lock()
			.unwrap()
			.relationships
			.insert(user.to_string(), relationships);
	}

	pub fn fail_relationships(&self, fail: bool) {
		self.fail_relationships.store(fail, Ordering::SeqCst);
	}

	pub fn fail_mutations(&self, fail: bool) {
		self.fail_mutations.store(fail, Ordering::SeqCst);
	}

	pub fn hold_relationships(&self, user: &str) -> Hold {
		let hold = Hold::default();
		self
			.state
			.lock()
			.unwrap()
			.holds
			.insert(user.to_string(), hold.clone());
		hold
	}

	/// Pauses the next `list_categories` call until released.
	pub fn hold_categories(&self) -> Hold {
		let hold = Hold::default();
		self.state.lock().unwrap().category_hold = Some(hold.clone());
		hold
	}

	/// Lets later `list_categories` calls through without pausing.
	pub fn release_categories(&self) {
		self.state.lock().unwrap().category_hold = None;
	}

	/// Identities `list_categories` was called with, in call order.
	pub fn listed_categories_for(&self) -> Vec<String> {
		self.state.lock().unwrap().categories_listed_for.clone()
	}

	pub fn allow_live(&self, resource_id: &str) {
		self
			.state
			.lock()
			.unwrap()
			.live_allowed
			.insert(resource_id.to_string());
	}

	pub fn add_category(&self, name: &str) {
		self.state.lock().unwrap().categories.push(Category {
			id: name.to_string(),
			name: name.to_string(),
			description: String::new(),
		});
	}

	pub fn add_document(&self, id: &str, title: &str, category: &str) {
		self.state.lock().unwrap().documents.push(Document {
			id: id.to_string(),
			title: title.to_string(),
			category: category.to_string(),
			created_at: None,
			last_modified: None,
			author: "Unknown".to_string(),
			status: DocumentStatus::Draft,
			owner: "Unknown".to_string(),
		});
	}

	pub fn add_role(&self, id: &str, name: &str) {
		self.state.lock().unwrap().roles.push(Role {
			id: id.to_string(),
			name: name.to_string(),
			description: String::new(),
			permissions: Vec::new(),
		});
	}

	pub fn add_user(&self, id: &str, name: &str, role: &str) {
		self.state.lock().unwrap().users.push(User {
			id: id.to_string(),
			name: name.to_string(),
			email: format!("{id}@example.com"),
			role: role.to_string(),
			last_login: None,
			status: UserStatus::Active,
		});
	}

	pub fn calls(&self) -> Vec<String> {
		self.state.lock().unwrap().calls.clone()
	}

	pub fn count_calls(&self, name: &str) -> usize {
		self.calls().iter().filter(|c| c.as_str() == name).count()
	}

	pub fn created_relationships(&self) -> Vec<NewRelationship> {
		self.state.lock().unwrap().created_relationships.clone()
	}

	fn record(&self, name: &str) {
		self.state.lock().unwrap().calls.push(name.to_string());
	}

	fn mutation(&self, name: &str) -> Result<()> {
		self.record(name);
		if self.fail_mutations.load(Ordering::SeqCst) {
			return Err(ClientError::ServerError {
				status: 500,
				message: "backend unavailable".to_string(),
			});
		}
		Ok(())
	}

	fn next_id(&self, prefix: &str) -> String {
		let mut state = self.state.lock().unwrap();
		state.next_id += 1;
		format!("{prefix}_{}", state.next_id)
	}
}

#[async_trait]
impl PolicyApi for FakePolicyApi {
	async fn list_relationships(&self, identity: &UserId) -> Result<Vec<Relationship>> {
		self.record("list_relationships");
		let hold = self.state.lock().unwrap().holds.get(identity.as_str()).cloned();
		if let Some(hold) = hold {
			hold.started.notify_one();
			hold.release.notified().await;
		}
		if self.fail_relationships.load(Ordering::SeqCst) {
			return Err(ClientError::ServerError {
				status: 503,
				message: "policy service down".to_string(),
			});
		}
		Ok(self
			.state
			.lock()
			.unwrap()
			.relationships
			.get(identity.as_str())
			.cloned()
			.unwrap_or_default())
	}

	async fn create_relationship(&self, _identity: &UserId, rel: &NewRelationship) -> Result<()> {
		self.mutation("create_relationship")?;
		self.state.lock().unwrap().created_relationships.push(rel.clone());
		Ok(())
	}

	async fn check_permission(&self, _identity: &UserId, check: &PermissionCheck) -> Result<bool> {
		self.record("check_permission");
		Ok(self.state.lock().unwrap().live_allowed.contains(&check.resource_id))
	}

	async fn list_categories(&self, identity: &UserId) -> Result<Vec<Category>> {
		self.record("list_categories");
		let hold = {
			let mut state = self.state.lock().unwrap();
			state.categories_listed_for.push(identity.to_string());
			state.category_hold.clone()
		};
		if let Some(hold) = hold {
			hold.started.notify_one();
			hold.release.notified().await;
		}
		Ok(self.state.lock().unwrap().categories.clone())
	}

	async fn create_category(&self, _identity: &UserId, category: &NewCategory) -> Result<Category> {
		self.mutation("create_category")?;
		let created = Category {
			id: category.name.clone(),
			name: category.name.clone(),
			description: category.description.clone(),
		};
		self.state.lock().unwrap().categories.push(created.clone());
		Ok(created)
	}

	async fn delete_category(&self, _identity: &UserId, id: &str) -> Result<()> {
		self.mutation("delete_category")?;
		self.state.lock().unwrap().categories.retain(|c| c.id != id);
		Ok(())
	}

	async fn list_documents(&self, _identity: &UserId) -> Result<Vec<Document>> {
		self.record("list_documents");
		Ok(self.state.lock().unwrap().documents.clone())
	}

	async fn create_document(&self, _identity: &UserId, document: &NewDocument) -> Result<Document> {
		self.mutation("create_document")?;
		let created = Document {
			id: self.next_id("doc"),
			title: document.title.clone(),
			category: document.category.clone(),
			created_at: None,
			last_modified: None,
			author: document.author.clone(),
			status: document.status,
			owner: document.owner.clone(),
		};
		self.state.lock().unwrap().documents.push(created.clone());
		Ok(created)
	}

	async fn delete_document(&self, _identity: &UserId, id: &str) -> Result<()> {
		self.mutation("delete_document")?;
		self.state.lock().unwrap().documents.retain(|d| d.id != id);
		Ok(())
	}

	async fn list_users(&self, _identity: &UserId) -> Result<Vec<User>> {
		self.record("list_users");
		Ok(self.state.lock().unwrap().users.clone())
	}

	async fn assign_role(&self, _identity: &UserId, user_id: &str, role_id: &str) -> Result<()> {
		self.mutation("assign_role")?;
		let mut state = self.state.lock().unwrap();
		let role_name = state
			.roles
			.iter()
			.find(|r| r.id == role_id)
			.map(|r| r.name.clone())
			.unwrap_or_else(|| role_id.to_string());
		match state.users.iter_mut().find(|u| u.id == user_id) {
			Some(user) => {
				user.role = role_name;
				Ok(())
			}
			None => Err(ClientError::NotFound {
				resource: "user",
				id: user_id.to_string(),
			}),
		}
	}

	async fn list_roles(&self, _identity: &UserId) -> Result<Vec<Role>> {
		self.record("list_roles");
		Ok(self.state.lock().unwrap().roles.clone())
	}

	async fn create_role(&self, _identity: &UserId, role: &NewRole) -> Result<Role> {
		self.mutation("create_role")?;
		let created = Role {
			id: self.next_id("role"),
			name: role.name.clone(),
			description: role.description.clone(),
			permissions: role.permissions.clone(),
		};
		self.state.lock().unwrap().roles.push(created.clone());
		Ok(created)
	}

	async fn update_role(&self, _identity: &UserId, role: &Role) -> Result<Role> {
		self.mutation("update_role")?;
		let mut state = self.state.lock().unwrap();
		match state.roles.iter_mut().find(|r| r.id == role.id) {
			Some(existing) => {
				*existing = role.clone();
				Ok(role.clone())
			}
			None => Err(ClientError::NotFound {
				resource: "role",
				id: role.id.clone(),
			}),
		}
	}

	async fn delete_role(&self, _identity: &UserId, id: &str) -> Result<()> {
		self.mutation("delete_role")?;
		self.state.lock().unwrap().roles.retain(|r| r.id != id);
		Ok(())
	}
}
