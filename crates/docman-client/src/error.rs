// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the docman client SDK.

use docman_policy_core::{Action, ResourceType};
use thiserror::Error;

/// Client SDK errors.
///
/// Authorization denial is not an error for queries: the ability gate answers
/// `false`. Only mutation dispatchers turn a denial into [`ClientError::Forbidden`].
#[derive(Debug, Error)]
pub enum ClientError {
	/// Base URL is missing or cannot carry API paths.
	#[error("invalid base URL")]
	InvalidBaseUrl,

	/// HTTP request failed before a response was received.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Server returned an error response.
	#[error("server error ({status}): {message}")]
	ServerError { status: u16, message: String },

	/// The addressed resource does not exist on the backend.
	#[error("{resource} not found: {id}")]
	NotFound { resource: &'static str, id: String },

	/// No identity is present; gated operations are not attempted.
	#[error("not signed in")]
	NotSignedIn,

	/// The cached abilities do not permit the mutation.
	#[error("not permitted to {action} {resource_type}")]
	Forbidden {
		action: Action,
		resource_type: ResourceType,
	},

	/// Input rejected before any request was sent.
	#[error("validation failed: {0}")]
	Validation(String),

	/// Response body did not have the expected shape.
	#[error("unexpected response body: {0}")]
	Deserialize(String),
}

impl ClientError {
	/// Returns true for failures a user may reasonably retry by hand
	/// (network trouble, rate limiting, server-side faults).
	pub fn is_transient(&self) -> bool {
		match self {
			ClientError::RequestFailed(e) => e.is_timeout() || e.is_connect() || e.is_request(),
			ClientError::ServerError { status, .. } => {
				matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
			}
			_ => false,
		}
	}

	/// Returns true when the backend answered with a success status but the
	/// body could not be read. The request itself took effect.
	pub fn is_accepted(&self) -> bool {
		matches!(self, ClientError::Deserialize(_))
	}
}

impl From<serde_json::Error> for ClientError {
	fn from(e: serde_json::Error) -> Self {
		ClientError::Deserialize(e.to_string())
	}
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
