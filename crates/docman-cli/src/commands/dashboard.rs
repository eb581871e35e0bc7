// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::Result;
use docman_client::{DashboardSummary, Session};

pub async fn run(session: &Session) -> Result<()> {
	let summary = DashboardSummary::load(session).await?;
	println!("Total categories: {}", summary.total_categories);
	println!("Total documents:  {}", summary.total_documents);
	println!("Total users:      {}", summary.total_users);
	Ok(())
}
