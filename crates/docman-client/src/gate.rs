// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Synchronous permission queries.

use std::sync::Arc;

use docman_policy_core::{AbilitySet, Action, ResourceType};

/// Answers "may the current user do `action` on this resource?".
///
/// `instance == None` asks about the type as a whole. Denial is `false`,
/// never an error.
pub trait AbilityGate: Send + Sync {
	fn can(&self, action: Action, resource_type: ResourceType, instance: Option<&str>) -> bool;
}

/// Gate backed by a resolved [`AbilitySet`] snapshot.
///
/// The snapshot is fixed at construction; a later sign-in or refresh does not
/// change what an existing gate answers. Ask the session for a fresh gate.
#[derive(Debug, Clone, Default)]
pub struct CachedAbilityGate {
	abilities: Arc<AbilitySet>,
}

impl CachedAbilityGate {
	pub fn new(abilities: Arc<AbilitySet>) -> Self {
		Self { abilities }
	}

	/// A gate that denies everything.
	pub fn denied() -> Self {
		Self::default()
	}

	pub fn abilities(&self) -> &AbilitySet {
		&self.abilities
	}
}

impl AbilityGate for CachedAbilityGate {
	fn can(&self, action: Action, resource_type: ResourceType, instance: Option<&str>) -> bool {
		self.abilities.can(action, resource_type, instance)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use docman_policy_core::{RelationKind, Relationship};

	#[test]
	fn denied_gate_refuses_everything() {
		let gate = CachedAbilityGate::denied();
		for action in Action::CONCRETE {
			assert!(!gate.can(action, ResourceType::Category, None));
			assert!(!gate.can(action, ResourceType::Document, Some("d1")));
		}
	}

	#[test]
	fn type_level_check_ignores_instance_scope() {
		let set = AbilitySet::from_relationships(&[Relationship::new(
			ResourceType::Document,
			"d1",
			RelationKind::Editor,
		)]);
		let gate = CachedAbilityGate::new(Arc::new(set));

		assert!(gate.can(Action::Update, ResourceType::Document, None));
		assert!(gate.can(Action::Update, ResourceType::Document, Some("d1")));
		assert!(!gate.can(Action::Update, ResourceType::Document, Some("d2")));
	}

	#[test]
	fn gate_works_through_trait_object() {
		let set = AbilitySet::from_relationships(&[Relationship::new(
			ResourceType::Role,
			"admin",
			RelationKind::Viewer,
		)]);
		let gate: Box<dyn AbilityGate> = Box::new(CachedAbilityGate::new(Arc::new(set)));
		assert!(gate.can(Action::Read, ResourceType::Role, Some("admin")));
		assert!(!gate.can(Action::Delete, ResourceType::Role, Some("admin")));
	}
}
