// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity, action and resource type definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Opaque identifier of the signed-in user, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
	/// Creates a user id, rejecting blank input.
	pub fn new(id: impl Into<String>) -> Result<Self, PolicyError> {
		let id = id.into();
		if id.trim().is_empty() {
			return Err(PolicyError::EmptyUserId);
		}
		Ok(Self(id))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for UserId {
	type Err = PolicyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

/// Resource types a rule can be scoped to.
///
/// `All` is a wildcard subject: a rule on `All` applies to every type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceType {
	Category,
	Document,
	Role,
	#[serde(rename = "all")]
	All,
}

impl ResourceType {
	pub fn as_str(&self) -> &'static str {
		match self {
			ResourceType::Category => "Category",
			ResourceType::Document => "Document",
			ResourceType::Role => "Role",
			ResourceType::All => "all",
		}
	}

	/// Returns true if a rule scoped to `self` applies to resources of type `other`.
	pub fn covers(&self, other: ResourceType) -> bool {
		*self == ResourceType::All || *self == other
	}
}

impl fmt::Display for ResourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ResourceType {
	type Err = PolicyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Category" => Ok(ResourceType::Category),
			"Document" => Ok(ResourceType::Document),
			"Role" => Ok(ResourceType::Role),
			"all" => Ok(ResourceType::All),
			other => Err(PolicyError::UnknownResourceType(other.to_string())),
		}
	}
}

/// Operations a user may attempt on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
	/// Every action, including ones added later.
	Manage,
	Create,
	Read,
	Update,
	Delete,
	Share,
}

impl Action {
	/// Concrete actions, excluding the `Manage` wildcard.
	pub const CONCRETE: [Action; 5] = [
		Action::Create,
		Action::Read,
		Action::Update,
		Action::Delete,
		Action::Share,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Action::Manage => "manage",
			Action::Create => "create",
			Action::Read => "read",
			Action::Update => "update",
			Action::Delete => "delete",
			Action::Share => "share",
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Action {
	type Err = PolicyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"manage" => Ok(Action::Manage),
			"create" => Ok(Action::Create),
			"read" => Ok(Action::Read),
			"update" => Ok(Action::Update),
			"delete" => Ok(Action::Delete),
			"share" => Ok(Action::Share),
			other => Err(PolicyError::UnknownAction(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_id_rejects_blank() {
		assert_eq!(UserId::new(""), Err(PolicyError::EmptyUserId));
		assert_eq!(UserId::new("   "), Err(PolicyError::EmptyUserId));
		assert_eq!(UserId::new("user_2abc").unwrap().as_str(), "user_2abc");
	}

	#[test]
	fn resource_type_round_trips_through_str() {
		for ty in [
			ResourceType::Category,
			ResourceType::Document,
			ResourceType::Role,
			ResourceType::All,
		] {
			assert_eq!(ty.as_str().parse::<ResourceType>().unwrap(), ty);
		}
		assert!(matches!(
			"category".parse::<ResourceType>(),
			Err(PolicyError::UnknownResourceType(_))
		));
	}

	#[test]
	fn all_covers_every_type() {
		assert!(ResourceType::All.covers(ResourceType::Document));
		assert!(ResourceType::Category.covers(ResourceType::Category));
		assert!(!ResourceType::Category.covers(ResourceType::Document));
		assert!(!ResourceType::Document.covers(ResourceType::All));
	}

	#[test]
	fn action_serializes_lowercase() {
		assert_eq!(serde_json::to_string(&Action::Update).unwrap(), "\"update\"");
		assert_eq!("share".parse::<Action>().unwrap(), Action::Share);
		assert!("publish".parse::<Action>().is_err());
	}
}
