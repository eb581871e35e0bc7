// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ability rules derived from relationships.
//!
//! The mapping from relation to actions is fixed:
//!
//! | Relation | Actions |
//! |----------|---------|
//! | owner    | manage (every action) |
//! | editor   | read, update |
//! | viewer   | read |
//!
//! Each relationship contributes at most one rule, scoped to the related
//! instance. Type-level questions ("may this user create any Category?") are
//! answered by ignoring instance scopes; instance-level questions require the
//! scope to match.

use serde::{Deserialize, Serialize};

use crate::relationship::{RelationKind, Relationship};
use crate::types::{Action, ResourceType};

/// A single permission fact: `actions` are allowed on `resource_type`,
/// optionally only for the instance with id `instance`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityRule {
	pub actions: Vec<Action>,
	pub resource_type: ResourceType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub instance: Option<String>,
}

impl AbilityRule {
	/// Derives the rule a relationship grants, if any.
	pub fn for_relationship(rel: &Relationship) -> Option<Self> {
		let actions = match &rel.relation {
			RelationKind::Owner => vec![Action::Manage],
			RelationKind::Editor => vec![Action::Read, Action::Update],
			RelationKind::Viewer => vec![Action::Read],
			RelationKind::Other(_) => return None,
		};
		Some(Self {
			actions,
			resource_type: rel.resource_type,
			instance: Some(rel.resource_id.clone()),
		})
	}

	pub fn allows_action(&self, action: Action) -> bool {
		self.actions.contains(&Action::Manage) || self.actions.contains(&action)
	}

	/// Returns true if this rule permits `action` on `resource_type`.
	///
	/// With `instance == None` the rule's own instance scope is ignored.
	pub fn matches(&self, action: Action, resource_type: ResourceType, instance: Option<&str>) -> bool {
		if !self.resource_type.covers(resource_type) || !self.allows_action(action) {
			return false;
		}
		match (instance, self.instance.as_deref()) {
			(None, _) => true,
			(Some(_), None) => true,
			(Some(wanted), Some(scoped)) => wanted == scoped,
		}
	}
}

/// All ability rules for one identity.
///
/// Built wholesale from a relationship list and never edited afterwards; a new
/// relationship list produces a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySet {
	rules: Vec<AbilityRule>,
}

impl AbilitySet {
	/// The deny-everything set.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn from_relationships(relationships: &[Relationship]) -> Self {
		Self {
			rules: relationships
				.iter()
				.filter_map(AbilityRule::for_relationship)
				.collect(),
		}
	}

	/// Returns true if any rule permits the action. Absence of a rule is denial.
	pub fn can(&self, action: Action, resource_type: ResourceType, instance: Option<&str>) -> bool {
		self
			.rules
			.iter()
			.any(|rule| rule.matches(action, resource_type, instance))
	}

	pub fn rules(&self) -> &[AbilityRule] {
		&self.rules
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn rel(ty: ResourceType, id: &str, kind: RelationKind) -> Relationship {
		Relationship::new(ty, id, kind)
	}

	#[test]
	fn owner_can_do_everything_on_type() {
		let set = AbilitySet::from_relationships(&[rel(
			ResourceType::Category,
			"X",
			RelationKind::Owner,
		)]);

		for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
			assert!(set.can(action, ResourceType::Category, None), "{action}");
		}
		assert!(!set.can(Action::Read, ResourceType::Document, None));
	}

	#[test]
	fn viewer_can_only_read() {
		let set = AbilitySet::from_relationships(&[rel(
			ResourceType::Category,
			"X",
			RelationKind::Viewer,
		)]);

		assert!(set.can(Action::Read, ResourceType::Category, None));
		for action in [Action::Create, Action::Update, Action::Delete, Action::Share] {
			assert!(!set.can(action, ResourceType::Category, None), "{action}");
		}
	}

	#[test]
	fn editor_reads_and_updates() {
		let set = AbilitySet::from_relationships(&[rel(
			ResourceType::Document,
			"d1",
			RelationKind::Editor,
		)]);

		assert!(set.can(Action::Read, ResourceType::Document, Some("d1")));
		assert!(set.can(Action::Update, ResourceType::Document, Some("d1")));
		assert!(!set.can(Action::Delete, ResourceType::Document, Some("d1")));
	}

	#[test]
	fn instance_checks_respect_scope() {
		let set = AbilitySet::from_relationships(&[rel(
			ResourceType::Document,
			"d1",
			RelationKind::Owner,
		)]);

		assert!(set.can(Action::Delete, ResourceType::Document, Some("d1")));
		assert!(!set.can(Action::Delete, ResourceType::Document, Some("d2")));
	}

	#[test]
	fn all_subject_applies_to_every_type() {
		let set =
			AbilitySet::from_relationships(&[rel(ResourceType::All, "*", RelationKind::Viewer)]);

		assert!(set.can(Action::Read, ResourceType::Category, None));
		assert!(set.can(Action::Read, ResourceType::Role, None));
		assert!(!set.can(Action::Update, ResourceType::Role, None));
	}

	#[test]
	fn unknown_relation_grants_nothing() {
		let set = AbilitySet::from_relationships(&[rel(
			ResourceType::Category,
			"X",
			RelationKind::Other("approver".to_string()),
		)]);

		assert!(set.is_empty());
	}

	fn arb_resource_type() -> impl Strategy<Value = ResourceType> {
		prop_oneof![
			Just(ResourceType::Category),
			Just(ResourceType::Document),
			Just(ResourceType::Role),
			Just(ResourceType::All),
		]
	}

	fn arb_relation() -> impl Strategy<Value = RelationKind> {
		prop_oneof![
			Just(RelationKind::Owner),
			Just(RelationKind::Editor),
			Just(RelationKind::Viewer),
			"[a-z]{3,8}".prop_map(|s| RelationKind::parse(&s)),
		]
	}

	fn arb_relationship() -> impl Strategy<Value = Relationship> {
		(arb_resource_type(), "[a-z0-9]{1,6}", arb_relation())
			.prop_map(|(ty, id, kind)| Relationship::new(ty, id, kind))
	}

	fn arb_action() -> impl Strategy<Value = Action> {
		prop_oneof![
			Just(Action::Manage),
			Just(Action::Create),
			Just(Action::Read),
			Just(Action::Update),
			Just(Action::Delete),
			Just(Action::Share),
		]
	}

	proptest! {
		#[test]
		fn rebuilding_is_deterministic(rels in prop::collection::vec(arb_relationship(), 0..20)) {
			let a = AbilitySet::from_relationships(&rels);
			let b = AbilitySet::from_relationships(&rels);
			prop_assert_eq!(a, b);
		}

		#[test]
		fn empty_set_denies_everything(
			action in arb_action(),
			ty in arb_resource_type(),
			instance in proptest::option::of("[a-z0-9]{1,6}"),
		) {
			let set = AbilitySet::empty();
			prop_assert!(!set.can(action, ty, instance.as_deref()));
		}

		#[test]
		fn viewers_never_write(
			ids in prop::collection::vec("[a-z0-9]{1,6}", 1..10),
			ty in arb_resource_type(),
		) {
			let rels: Vec<_> = ids
				.iter()
				.map(|id| Relationship::new(ty, id.clone(), RelationKind::Viewer))
				.collect();
			let set = AbilitySet::from_relationships(&rels);
			prop_assert!(set.can(Action::Read, ty, None));
			for action in [Action::Create, Action::Update, Action::Delete, Action::Share] {
				prop_assert!(!set.can(action, ty, None));
			}
		}
	}
}
