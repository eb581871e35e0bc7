// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors raised while parsing permission model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
	#[error("user id must not be empty")]
	EmptyUserId,

	#[error("unknown action: {0}")]
	UnknownAction(String),

	#[error("unknown resource type: {0}")]
	UnknownResourceType(String),
}

pub type Result<T> = std::result::Result<T, PolicyError>;
