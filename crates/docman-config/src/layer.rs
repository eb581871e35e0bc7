// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration merged across sources.

use serde::Deserialize;

use crate::sections::{ApiConfigLayer, LoggingConfigLayer};

/// One source's view of the configuration. Unset sections stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocmanConfigLayer {
	#[serde(default)]
	pub api: Option<ApiConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl DocmanConfigLayer {
	/// Overlays `other` on top of `self`; values set in `other` win.
	pub fn merge(&mut self, other: DocmanConfigLayer) {
		if let Some(api) = other.api {
			self.api.get_or_insert_with(Default::default).merge(api);
		}
		if let Some(logging) = other.logging {
			self
				.logging
				.get_or_insert_with(Default::default)
				.merge(logging);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn merge_keeps_base_sections_when_overlay_is_empty() {
		let mut base = DocmanConfigLayer {
			api: Some(ApiConfigLayer {
				base_url: Some("http://a".to_string()),
				timeout_secs: None,
			}),
			logging: None,
		};
		base.merge(DocmanConfigLayer::default());
		assert_eq!(base.api.unwrap().base_url.as_deref(), Some("http://a"));
	}

	#[test]
	fn merge_overlays_fields_individually() {
		let mut base = DocmanConfigLayer {
			api: Some(ApiConfigLayer {
				base_url: Some("http://a".to_string()),
				timeout_secs: Some(10),
			}),
			logging: None,
		};
		base.merge(DocmanConfigLayer {
			api: Some(ApiConfigLayer {
				base_url: None,
				timeout_secs: Some(3),
			}),
			logging: None,
		});
		let api = base.api.unwrap();
		assert_eq!(api.base_url.as_deref(), Some("http://a"));
		assert_eq!(api.timeout_secs, Some(3));
	}
}
