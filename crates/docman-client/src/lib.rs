// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document management client SDK.
//!
//! This crate talks to the docman policy backend and gates every user-facing
//! action on the signed-in user's abilities.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use docman_client::{HttpPolicyApi, NewCategory, ResourceList, Session};
//! use docman_policy_core::UserId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpPolicyApi::builder()
//!         .base_url("https://docs.example.com")
//!         .build()?;
//!     let session = Session::new(Arc::new(api));
//!
//!     // Resolve abilities for the identity issued by the identity provider.
//!     session.sign_in(UserId::new("user_2abc")?).await;
//!
//!     // Render categories with only the controls this user may use.
//!     let list = ResourceList::new(session.categories().await?);
//!     let gate = session.gate();
//!     for row in list.rows(&gate) {
//!         println!("{} {:?}", row.item.name, row.actions);
//!     }
//!
//!     // Mutations are gated, then invalidate the cached list on success.
//!     if list.create_allowed(&gate) {
//!         session
//!             .mutations()
//!             .create_category(NewCategory {
//!                 name: "Finance".to_string(),
//!                 description: String::new(),
//!             })
//!             .await?;
//!     }
//!
//!     session.sign_out();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod collection;
pub mod dashboard;
pub mod error;
pub mod gate;
pub mod lists;
pub mod model;
pub mod mutation;
pub mod notify;
pub mod resolver;
pub mod session;

#[cfg(test)]
mod fake;

pub use api::{HttpPolicyApi, HttpPolicyApiBuilder, PolicyApi};
pub use collection::Collection;
pub use dashboard::DashboardSummary;
pub use error::{ClientError, Result};
pub use gate::{AbilityGate, CachedAbilityGate};
pub use lists::documents::{
	filter_documents, sort_documents, DocumentFilter, DocumentSortKey, SortDirection, SortState,
};
pub use lists::users::{UserTable, PAGE_SIZE};
pub use lists::{ListRow, Listable, ResourceList, RowAction};
pub use model::{
	Category, Document, DocumentStatus, NewCategory, NewDocument, NewRelationship, NewRole,
	PermissionCheck, Role, User, UserStatus,
};
pub use mutation::Dispatcher;
pub use notify::{Notification, NotificationKind, NotificationLog, Notifier, TracingNotifier};
pub use resolver::PermissionResolver;
pub use session::{AbilityStatus, CollectionKey, ResolutionOutcome, Session};
