// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the docman permission model.
//!
//! This crate holds the pure, I/O-free half of client-side authorization:
//!
//! - [`UserId`]: the opaque identity of the signed-in user
//! - [`Relationship`]: a backend-declared association between that user and a resource
//! - [`AbilityRule`] / [`AbilitySet`]: the permission facts derived from relationships
//!
//! The backend remains the policy authority. An [`AbilitySet`] is a cached,
//! synchronously queryable projection of what the backend declared, used to
//! decide which action controls a front end should offer.
//!
//! # Example
//!
//! ```
//! use docman_policy_core::{AbilitySet, Action, RelationKind, Relationship, ResourceType};
//!
//! let rels = vec![Relationship::new(ResourceType::Category, "finance", RelationKind::Viewer)];
//! let abilities = AbilitySet::from_relationships(&rels);
//!
//! assert!(abilities.can(Action::Read, ResourceType::Category, None));
//! assert!(!abilities.can(Action::Delete, ResourceType::Category, None));
//! ```

pub mod ability;
pub mod error;
pub mod relationship;
pub mod types;

pub use ability::{AbilityRule, AbilitySet};
pub use error::{PolicyError, Result};
pub use relationship::{parse_object, parse_relationships, RelationKind, Relationship};
pub use types::{Action, ResourceType, UserId};
