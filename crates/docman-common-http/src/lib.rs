// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for docman.
//!
//! This crate provides:
//! - A pre-configured HTTP client builder with a consistent User-Agent header
//! - The header name used to carry the caller's identity to the policy backend

mod client;

pub use client::{builder, builder_with_timeout, user_agent, IDENTITY_HEADER};
