// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Serialize;

use crate::error::Result;
use crate::session::Session;

/// Totals shown on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
	pub total_categories: usize,
	pub total_documents: usize,
	pub total_users: usize,
}

impl DashboardSummary {
	/// Loads the three collections concurrently, through the session cache.
	pub async fn load(session: &Session) -> Result<Self> {
		let (categories, documents, users) =
			futures::try_join!(session.categories(), session.documents(), session.users())?;
		Ok(Self {
			total_categories: categories.len(),
			total_documents: documents.len(),
			total_users: users.len(),
		})
	}
}
