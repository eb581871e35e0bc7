// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Relationships declared by the policy backend.
//!
//! The backend reports each relationship with an `object` string of the form
//! `Type:id` (for example `Category:finance`) and a `relation` name. Entries
//! that cannot be understood are dropped rather than failing the whole list:
//! a partially readable response still yields the rules it can support, and
//! an unreadable one yields none.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ResourceType;

/// The named role a user holds on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
	Owner,
	Editor,
	Viewer,
	/// A relation this client has no mapping for. Grants nothing.
	#[serde(untagged)]
	Other(String),
}

impl RelationKind {
	pub fn parse(s: &str) -> Self {
		match s {
			"owner" => RelationKind::Owner,
			"editor" => RelationKind::Editor,
			"viewer" => RelationKind::Viewer,
			other => RelationKind::Other(other.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			RelationKind::Owner => "owner",
			RelationKind::Editor => "editor",
			RelationKind::Viewer => "viewer",
			RelationKind::Other(s) => s,
		}
	}
}

impl fmt::Display for RelationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A backend-declared association between the current user and a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
	pub resource_type: ResourceType,
	pub resource_id: String,
	pub relation: RelationKind,
}

impl Relationship {
	pub fn new(
		resource_type: ResourceType,
		resource_id: impl Into<String>,
		relation: RelationKind,
	) -> Self {
		Self {
			resource_type,
			resource_id: resource_id.into(),
			relation,
		}
	}
}

/// Splits a `Type:id` object reference.
///
/// The type part must be a non-empty run of word characters naming a known
/// resource type and the id part must be non-empty. Everything after the first
/// colon belongs to the id, so `Document:a:b` refers to document `a:b`.
pub fn parse_object(object: &str) -> Option<(ResourceType, &str)> {
	let (ty, id) = object.split_once(':')?;
	if ty.is_empty() || id.is_empty() {
		return None;
	}
	if !ty.chars().all(|c| c.is_alphanumeric() || c == '_') {
		return None;
	}
	let resource_type = ty.parse().ok()?;
	Some((resource_type, id))
}

/// Extracts relationships from a `get-user-relationships` response body.
///
/// Expects `{"relationships": [{"relation": "...", "object": "Type:id"}, ...]}`.
/// A body without a `relationships` array yields an empty list; individual
/// entries without a string `relation` and a parseable `object` are skipped.
pub fn parse_relationships(body: &Value) -> Vec<Relationship> {
	let Some(entries) = body.get("relationships").and_then(Value::as_array) else {
		return Vec::new();
	};

	entries
		.iter()
		.filter_map(|entry| {
			let relation = entry.get("relation")?.as_str()?;
			let object = entry.get("object")?.as_str()?;
			let (resource_type, resource_id) = parse_object(object)?;
			Some(Relationship::new(
				resource_type,
				resource_id,
				RelationKind::parse(relation),
			))
		})
		.collect()
}
