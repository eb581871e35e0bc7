// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::Result;
use docman_client::{Session, UserTable};

use super::UsersCommand;

pub async fn run(session: &Session, cmd: UsersCommand) -> Result<()> {
	match cmd {
		UsersCommand::List {
			search,
			role,
			status,
			page,
		} => {
			let mut table = UserTable::new(session.users().await?);
			table.set_search(search);
			table.set_role_filter(role);
			table.set_status_filter(status.map(Into::into));

			let users = table.page(page);
			if users.is_empty() {
				println!("No users found");
				return Ok(());
			}
			for user in users {
				let last_login = user
					.last_login
					.map(|t| t.format("%Y-%m-%d").to_string())
					.unwrap_or_else(|| "-".to_string());
				println!(
					"{:<12} {:<24} {:<32} {:<12} {:<10} {}",
					user.id, user.name, user.email, user.role, user.status, last_login
				);
			}
			println!("page {page} of {}", table.page_count());
		}
		UsersCommand::Assign { user, role } => {
			session.mutations().assign_role(&user, &role).await?;
			println!("Assigned role {role} to {user}");
		}
	}
	Ok(())
}
