// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use anyhow::{Context, Result};
use docman_client::{
	filter_documents, sort_documents, Document, DocumentFilter, DocumentStatus, NewDocument,
	ResourceList, Session, SortDirection, SortState,
};
use docman_policy_core::UserId;

use super::{format_actions, DocumentsCommand};

pub async fn run(session: &Session, cmd: DocumentsCommand) -> Result<()> {
	match cmd {
		DocumentsCommand::List {
			search,
			sort,
			descending,
			category,
			status,
		} => {
			let mut documents: Vec<Document> = session.documents().await?.to_vec();

			let filter = match (category, status) {
				(Some(category), _) => Some(DocumentFilter::Category(category)),
				(None, Some(status)) => Some(DocumentFilter::Status(status.into())),
				(None, None) => None,
			};
			if let Some(filter) = filter {
				documents = filter_documents(&documents, &filter);
			}
			if let Some(column) = sort {
				let state = SortState {
					key: column.into(),
					direction: if descending {
						SortDirection::Descending
					} else {
						SortDirection::Ascending
					},
				};
				documents = sort_documents(&documents, state);
			}

			let mut list = ResourceList::new(Arc::new(documents));
			list.set_search(search);
			let gate = session.gate();

			if list.create_allowed(&gate) {
				println!("(you can create documents)");
			}
			if let Some(message) = list.empty_message() {
				println!("{message}");
				return Ok(());
			}
			for row in list.rows(&gate) {
				let doc = row.item;
				println!(
					"{:<12} {:<32} {:<16} {:<10} {:<14} {}",
					doc.id,
					doc.title,
					doc.category,
					doc.status,
					doc.last_modified_label(),
					format_actions(&row.actions)
				);
			}
		}
		DocumentsCommand::Create {
			title,
			category,
			author,
		} => {
			let owner = session
				.identity()
				.map(|id| id.to_string())
				.unwrap_or_default();
			let document = session
				.mutations()
				.create_document(NewDocument {
					title,
					category,
					author,
					status: DocumentStatus::Draft,
					owner,
				})
				.await?;
			println!("Created document {}", document.id);
		}
		DocumentsCommand::Delete { id } => {
			session.mutations().delete_document(&id).await?;
			println!("Deleted document {id}");
		}
		DocumentsCommand::Share { id, with, relation } => {
			let target = UserId::new(with).context("invalid user to share with")?;
			session
				.mutations()
				.share_document(&id, &target, relation.into())
				.await?;
			println!("Shared document {id} with {target}");
		}
	}
	Ok(())
}
