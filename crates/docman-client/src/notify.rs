// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User-visible notifications raised by mutations.

use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
	Success,
	/// A failure the user should see; local state was left unchanged.
	Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	pub title: String,
	pub description: String,
	pub kind: NotificationKind,
}

impl Notification {
	pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
			kind: NotificationKind::Success,
		}
	}

	pub fn error(description: impl Into<String>) -> Self {
		Self {
			title: "Error".to_string(),
			description: description.into(),
			kind: NotificationKind::Destructive,
		}
	}
}

/// Sink for notifications. Front ends render them as toasts or log lines.
pub trait Notifier: Send + Sync {
	fn notify(&self, notification: Notification);
}

/// Emits notifications as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
	fn notify(&self, n: Notification) {
		match n.kind {
			NotificationKind::Success => info!(title = %n.title, "{}", n.description),
			NotificationKind::Destructive => warn!(title = %n.title, "{}", n.description),
		}
	}
}

/// Keeps notifications in memory until drained.
#[derive(Debug, Default)]
pub struct NotificationLog {
	entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn entries(&self) -> Vec<Notification> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}

	pub fn drain(&self) -> Vec<Notification> {
		std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
	}
}

impl Notifier for NotificationLog {
	fn notify(&self, notification: Notification) {
		self
			.entries
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(notification);
	}
}
