// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::{Context, Result};
use docman_client::{NewRole, ResourceList, Session};

use super::{format_actions, RolesCommand};

pub async fn run(session: &Session, cmd: RolesCommand) -> Result<()> {
	match cmd {
		RolesCommand::List { search } => {
			let mut list = ResourceList::new(session.roles().await?);
			list.set_search(search);
			let gate = session.gate();

			if list.create_allowed(&gate) {
				println!("(you can create roles)");
			}
			if let Some(message) = list.empty_message() {
				println!("{message}");
				return Ok(());
			}
			for row in list.rows(&gate) {
				println!(
					"{:<12} {:<20} {:<40} {}",
					row.item.id,
					row.item.name,
					row.item.permissions.join(","),
					format_actions(&row.actions)
				);
			}
		}
		RolesCommand::Create {
			name,
			description,
			permissions,
		} => {
			let role = session
				.mutations()
				.create_role(NewRole {
					name,
					description,
					permissions,
				})
				.await?;
			println!("Created role {} ({})", role.name, role.id);
		}
		RolesCommand::Update {
			id,
			name,
			description,
		} => {
			let mut role = session
				.roles()
				.await?
				.iter()
				.find(|r| r.id == id)
				.cloned()
				.with_context(|| format!("no role with id {id}"))?;
			if let Some(name) = name {
				role.name = name;
			}
			if let Some(description) = description {
				role.description = description;
			}
			let role = session.mutations().update_role(role).await?;
			println!("Updated role {}", role.id);
		}
		RolesCommand::Delete { id } => {
			session.mutations().delete_role(&id).await?;
			println!("Deleted role {id}");
		}
	}
	Ok(())
}
