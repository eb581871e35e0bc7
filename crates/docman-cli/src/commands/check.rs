// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::Result;
use docman_client::{PermissionCheck, Session};

use super::CheckArgs;

/// Live decisions from the backend, one line per id.
pub async fn run(session: &Session, args: CheckArgs) -> Result<()> {
	let checks: Vec<PermissionCheck> = args
		.ids
		.iter()
		.map(|id| PermissionCheck {
			action: args.action,
			resource_type: args.resource_type,
			resource_id: id.clone(),
		})
		.collect();

	let results = session.check_permissions(&checks).await?;
	for (check, allowed) in checks.iter().zip(results) {
		println!(
			"{} {}:{} {}",
			check.action,
			check.resource_type,
			check.resource_id,
			if allowed { "allowed" } else { "denied" }
		);
	}
	Ok(())
}

/// Prints the cached ability rules as JSON.
pub fn abilities(session: &Session) -> Result<()> {
	let gate = session.gate();
	println!("{}", serde_json::to_string_pretty(gate.abilities().rules())?);
	Ok(())
}
