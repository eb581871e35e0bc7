// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::Result;
use docman_client::{NewCategory, ResourceList, Session};

use super::{format_actions, CategoriesCommand};

pub async fn run(session: &Session, cmd: CategoriesCommand) -> Result<()> {
	match cmd {
		CategoriesCommand::List { search } => {
			let mut list = ResourceList::new(session.categories().await?);
			list.set_search(search);
			let gate = session.gate();

			if list.create_allowed(&gate) {
				println!("(you can create categories)");
			}
			if let Some(message) = list.empty_message() {
				println!("{message}");
				return Ok(());
			}
			for row in list.rows(&gate) {
				println!(
					"{:<24} {:<40} {}",
					row.item.name,
					row.item.description,
					format_actions(&row.actions)
				);
			}
		}
		CategoriesCommand::Create { name, description } => {
			let category = session
				.mutations()
				.create_category(NewCategory { name, description })
				.await?;
			println!("Created category {}", category.id);
		}
		CategoriesCommand::Delete { id } => {
			session.mutations().delete_category(&id).await?;
			println!("Deleted category {id}");
		}
	}
	Ok(())
}
