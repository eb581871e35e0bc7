// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Header carrying the signed-in user's id on every backend request.
pub const IDENTITY_HEADER: &str = "user-id";

/// Creates a new HTTP client builder with the standard docman User-Agent header.
///
/// # Example
/// ```ignore
/// let client = docman_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a builder with the standard User-Agent and a request timeout.
pub fn builder_with_timeout(timeout: Duration) -> ClientBuilder {
	builder().timeout(timeout)
}

/// Returns the standard docman User-Agent string.
///
/// Format: `docman/{version}/{os}-{arch}`
pub fn user_agent() -> String {
	format!(
		"docman/{}/{}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
