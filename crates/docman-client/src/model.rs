// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource records and their backend wire forms.
//!
//! The backend speaks in terms of policy-service resources (`key`, `resource`,
//! `tenant`). The records below are what the client works with; the `*Record`
//! structs describe what arrives on the wire and convert into them.

use std::fmt;

use chrono::{DateTime, Utc};
use docman_policy_core::{Action, RelationKind, ResourceType, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

const UNCATEGORIZED: &str = "Uncategorized";
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
	#[default]
	Draft,
	Published,
}

impl fmt::Display for DocumentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DocumentStatus::Draft => f.write_str("draft"),
			DocumentStatus::Published => f.write_str("published"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
	pub id: String,
	pub title: String,
	pub category: String,
	pub created_at: Option<DateTime<Utc>>,
	pub last_modified: Option<DateTime<Utc>>,
	pub author: String,
	pub status: DocumentStatus,
	pub owner: String,
}

impl Document {
	/// Last-modified date as shown in document tables, e.g. `Jan 5, 2024`.
	pub fn last_modified_label(&self) -> String {
		self
			.last_modified
			.map(|t| t.format("%b %-d, %Y").to_string())
			.unwrap_or_else(|| "-".to_string())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
	#[default]
	Active,
	Inactive,
	/// Any status this client does not know about.
	#[serde(other)]
	Unknown,
}

impl fmt::Display for UserStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UserStatus::Active => f.write_str("active"),
			UserStatus::Inactive => f.write_str("inactive"),
			UserStatus::Unknown => f.write_str("unknown"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: String,
	pub name: String,
	pub email: String,
	pub role: String,
	pub last_login: Option<DateTime<Utc>>,
	pub status: UserStatus,
}

// Request payloads

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewCategory {
	pub name: String,
	#[serde(skip_serializing_if = "String::is_empty")]
	pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewDocument {
	pub title: String,
	pub category: String,
	pub author: String,
	pub status: DocumentStatus,
	pub owner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewRole {
	pub name: String,
	pub description: String,
	pub permissions: Vec<String>,
}

/// Grants `relation` on `resource_type:resource_key` to `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRelationship {
	pub user_id: String,
	pub relation: String,
	pub resource_type: String,
	pub resource_key: String,
}

impl NewRelationship {
	pub fn new(
		user_id: &UserId,
		relation: &RelationKind,
		resource_type: ResourceType,
		resource_key: impl Into<String>,
	) -> Self {
		Self {
			user_id: user_id.to_string(),
			relation: relation.to_string(),
			resource_type: resource_type.to_string(),
			resource_key: resource_key.into(),
		}
	}
}

/// A single live permission question for the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionCheck {
	pub action: Action,
	pub resource_type: ResourceType,
	pub resource_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PermissionCheckResponse {
	pub allowed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignRoleRequest<'a> {
	pub role_id: &'a str,
}

// Wire records

/// Category as listed by the policy backend: the resource key doubles as id and name.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoryRecord {
	#[serde(alias = "name")]
	pub key: String,
	#[serde(default)]
	pub description: Option<String>,
}

impl From<CategoryRecord> for Category {
	fn from(record: CategoryRecord) -> Self {
		Category {
			id: record.key.clone(),
			name: record.key,
			description: record.description.unwrap_or_default(),
		}
	}
}

/// Document as listed by the policy backend: `key` is the title, `resource` the category.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DocumentRecord {
	pub id: String,
	pub key: String,
	#[serde(default)]
	pub resource: Option<String>,
	#[serde(default)]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub updated_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub tenant: Option<String>,
}

impl From<DocumentRecord> for Document {
	fn from(record: DocumentRecord) -> Self {
		Document {
			id: record.id,
			title: record.key,
			category: record
				.resource
				.filter(|r| !r.is_empty())
				.unwrap_or_else(|| UNCATEGORIZED.to_string()),
			created_at: record.created_at,
			last_modified: record.updated_at,
			author: UNKNOWN.to_string(),
			status: DocumentStatus::Draft,
			owner: record.tenant.unwrap_or_else(|| UNKNOWN.to_string()),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserRecord {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub role: String,
	#[serde(default)]
	pub status: UserStatus,
	#[serde(default)]
	pub created_at: Option<DateTime<Utc>>,
}

impl From<UserRecord> for User {
	fn from(record: UserRecord) -> Self {
		User {
			id: record.id,
			name: record.name,
			email: record.email,
			role: record.role,
			last_login: record.created_at,
			status: record.status,
		}
	}
}

/// Reads the `{"data": [...]}` envelope of the users listing.
///
/// A missing or non-array `data` field means no users.
pub(crate) fn parse_users(body: &Value) -> Result<Vec<User>> {
	let Some(data) = body.get("data").filter(|d| d.is_array()) else {
		return Ok(Vec::new());
	};
	let records: Vec<UserRecord> = serde_json::from_value(data.clone())?;
	Ok(records.into_iter().map(User::from).collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn category_record_uses_key_as_id_and_name() {
		let record: CategoryRecord = serde_json::from_value(json!({"key": "finance"})).unwrap();
		let category = Category::from(record);
		assert_eq!(category.id, "finance");
		assert_eq!(category.name, "finance");
		assert_eq!(category.description, "");
	}

	#[test]
	fn document_record_fills_defaults() {
		let record: DocumentRecord = serde_json::from_value(json!({
			"id": "doc_1",
			"key": "Q1 Report",
			"created_at": "2024-01-15T10:00:00Z",
			"updated_at": "2024-01-20T10:30:00Z"
		}))
		.unwrap();
		let doc = Document::from(record);
		assert_eq!(doc.title, "Q1 Report");
		assert_eq!(doc.category, "Uncategorized");
		assert_eq!(doc.author, "Unknown");
		assert_eq!(doc.owner, "Unknown");
		assert_eq!(doc.status, DocumentStatus::Draft);
		assert_eq!(doc.last_modified_label(), "Jan 20, 2024");
	}

	#[test]
	fn document_record_keeps_resource_and_tenant() {
		let record: DocumentRecord = serde_json::from_value(json!({
			"id": "doc_2",
			"key": "Handbook",
			"resource": "hr",
			"tenant": "acme"
		}))
		.unwrap();
		let doc = Document::from(record);
		assert_eq!(doc.category, "hr");
		assert_eq!(doc.owner, "acme");
		assert_eq!(doc.last_modified_label(), "-");
	}

	#[test]
	fn users_envelope_tolerates_missing_data() {
		assert!(parse_users(&json!({})).unwrap().is_empty());
		assert!(parse_users(&json!({"data": {"id": "x"}})).unwrap().is_empty());
	}

	#[test]
	fn users_take_last_login_from_created_at() {
		let users = parse_users(&json!({
			"data": [{
				"id": "u1",
				"name": "Jane Smith",
				"email": "jane@example.com",
				"role": "Editor",
				"status": "inactive",
				"created_at": "2024-01-10T00:00:00Z"
			}]
		}))
		.unwrap();
		assert_eq!(users.len(), 1);
		assert_eq!(users[0].status, UserStatus::Inactive);
		assert!(users[0].last_login.is_some());
	}

	#[test]
	fn unknown_user_status_does_not_drop_the_listing() {
		let users = parse_users(&json!({
			"data": [
				{"id": "u1", "status": "pending"},
				{"id": "u2", "status": "active"}
			]
		}))
		.unwrap();
		assert_eq!(users.len(), 2);
		assert_eq!(users[0].status, UserStatus::Unknown);
		assert_eq!(users[1].status, UserStatus::Active);
	}

	#[test]
	fn new_relationship_serializes_camel_case() {
		let user = UserId::new("u1").unwrap();
		let rel = NewRelationship::new(&user, &RelationKind::Viewer, ResourceType::Document, "d1");
		assert_eq!(
			serde_json::to_value(&rel).unwrap(),
			json!({"userId": "u1", "relation": "viewer", "resourceType": "Document", "resourceKey": "d1"})
		);
	}
}
