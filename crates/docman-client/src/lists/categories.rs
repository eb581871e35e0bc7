// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use docman_policy_core::ResourceType;

use super::{Listable, RowAction};
use crate::model::Category;

impl Listable for Category {
	const RESOURCE_TYPE: ResourceType = ResourceType::Category;
	const ROW_ACTIONS: &'static [RowAction] = &[RowAction::Edit, RowAction::Delete];
	const EMPTY_MESSAGE: &'static str = "No categories found";

	fn id(&self) -> &str {
		&self.id
	}

	fn search_text(&self) -> &str {
		&self.name
	}
}
