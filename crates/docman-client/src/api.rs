// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy backend API.
//!
//! [`PolicyApi`] is the seam between the client and the backend; the session,
//! resolver and dispatchers only ever talk to it. [`HttpPolicyApi`] is the
//! production implementation over `reqwest`. Every request carries the
//! caller's identity in the [`IDENTITY_HEADER`] header.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use docman_common_http::IDENTITY_HEADER;
use docman_config::ApiConfig;
use docman_policy_core::{parse_relationships, Relationship, UserId};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::error::{ClientError, Result};
use crate::model::{
	parse_users, AssignRoleRequest, Category, CategoryRecord, Document, DocumentRecord,
	NewCategory, NewDocument, NewRelationship, NewRole, PermissionCheck, PermissionCheckResponse,
	Role, User,
};

/// Operations offered by the policy backend.
#[async_trait]
pub trait PolicyApi: Send + Sync {
	async fn list_relationships(&self, identity: &UserId) -> Result<Vec<Relationship>>;
	async fn create_relationship(&self, identity: &UserId, rel: &NewRelationship) -> Result<()>;
	/// Live, per-instance decision from the backend.
	async fn check_permission(&self, identity: &UserId, check: &PermissionCheck) -> Result<bool>;

	async fn list_categories(&self, identity: &UserId) -> Result<Vec<Category>>;
	async fn create_category(&self, identity: &UserId, category: &NewCategory) -> Result<Category>;
	async fn delete_category(&self, identity: &UserId, id: &str) -> Result<()>;

	async fn list_documents(&self, identity: &UserId) -> Result<Vec<Document>>;
	async fn create_document(&self, identity: &UserId, document: &NewDocument) -> Result<Document>;
	async fn delete_document(&self, identity: &UserId, id: &str) -> Result<()>;

	async fn list_users(&self, identity: &UserId) -> Result<Vec<User>>;
	async fn assign_role(&self, identity: &UserId, user_id: &str, role_id: &str) -> Result<()>;

	async fn list_roles(&self, identity: &UserId) -> Result<Vec<Role>>;
	async fn create_role(&self, identity: &UserId, role: &NewRole) -> Result<Role>;
	async fn update_role(&self, identity: &UserId, role: &Role) -> Result<Role>;
	async fn delete_role(&self, identity: &UserId, id: &str) -> Result<()>;
}

/// Builder for constructing an [`HttpPolicyApi`].
pub struct HttpPolicyApiBuilder {
	base_url: Option<String>,
	timeout: Duration,
}

impl HttpPolicyApiBuilder {
	pub fn new() -> Self {
		Self {
			base_url: None,
			timeout: Duration::from_secs(docman_config::DEFAULT_TIMEOUT_SECS),
		}
	}

	/// Sets the base URL of the backend, e.g. `https://docs.example.com`.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets the HTTP request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn build(self) -> Result<HttpPolicyApi> {
		let raw = self.base_url.ok_or(ClientError::InvalidBaseUrl)?;
		let base_url = Url::parse(raw.trim_end_matches('/')).map_err(|_| ClientError::InvalidBaseUrl)?;
		if base_url.cannot_be_a_base() {
			return Err(ClientError::InvalidBaseUrl);
		}

		let http_client = docman_common_http::builder_with_timeout(self.timeout)
			.build()
			.map_err(ClientError::RequestFailed)?;

		info!(base_url = %base_url, "Policy API client initialized");

		Ok(HttpPolicyApi {
			inner: Arc::new(HttpPolicyApiInner {
				base_url,
				http_client,
			}),
		})
	}
}

impl Default for HttpPolicyApiBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct HttpPolicyApiInner {
	base_url: Url,
	http_client: Client,
}

/// [`PolicyApi`] over HTTP.
#[derive(Clone)]
pub struct HttpPolicyApi {
	inner: Arc<HttpPolicyApiInner>,
}

impl HttpPolicyApi {
	pub fn builder() -> HttpPolicyApiBuilder {
		HttpPolicyApiBuilder::new()
	}

	pub fn from_config(config: &ApiConfig) -> Result<Self> {
		Self::builder()
			.base_url(config.base_url.clone())
			.timeout(config.timeout())
			.build()
	}

	/// Joins percent-encoded path segments onto the base URL.
	fn endpoint(&self, segments: &[&str]) -> Result<Url> {
		let mut url = self.inner.base_url.clone();
		url
			.path_segments_mut()
			.map_err(|_| ClientError::InvalidBaseUrl)?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}

	fn policies(&self, rest: &[&str]) -> Result<Url> {
		let mut segments = vec!["api", "policies"];
		segments.extend_from_slice(rest);
		self.endpoint(&segments)
	}

	/// Sends a request with the identity header and maps non-success statuses.
	///
	/// `target` names the addressed resource so that a 404 becomes
	/// [`ClientError::NotFound`]; collection-level calls pass `None`.
	async fn send(
		&self,
		request: RequestBuilder,
		identity: &UserId,
		target: Option<(&'static str, &str)>,
	) -> Result<Response> {
		let response = request
			.header(IDENTITY_HEADER, identity.as_str())
			.send()
			.await?;

		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}

		if status == StatusCode::NOT_FOUND {
			if let Some((resource, id)) = target {
				return Err(ClientError::NotFound {
					resource,
					id: id.to_string(),
				});
			}
		}

		let status = status.as_u16();
		let message = response.text().await.unwrap_or_default();
		error!(status, message = %message, "Policy backend request failed");
		Err(ClientError::ServerError { status, message })
	}

	async fn get_json<T: DeserializeOwned>(&self, url: Url, identity: &UserId) -> Result<T> {
		debug!(url = %url, "GET");
		let response = self
			.send(self.inner.http_client.get(url), identity, None)
			.await?;
		read_json(response).await
	}
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
	let bytes = response.bytes().await?;
	Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl PolicyApi for HttpPolicyApi {
	async fn list_relationships(&self, identity: &UserId) -> Result<Vec<Relationship>> {
		let url = self.policies(&["get-user-relationships"])?;
		let body: Value = self.get_json(url, identity).await?;
		Ok(parse_relationships(&body))
	}

	async fn create_relationship(&self, identity: &UserId, rel: &NewRelationship) -> Result<()> {
		let url = self.policies(&["create-relationship"])?;
		debug!(url = %url, relation = %rel.relation, resource_key = %rel.resource_key, "POST");
		self
			.send(self.inner.http_client.post(url).json(rel), identity, None)
			.await?;
		Ok(())
	}

	async fn check_permission(&self, identity: &UserId, check: &PermissionCheck) -> Result<bool> {
		let url = self.policies(&["check-permission"])?;
		debug!(
			url = %url,
			action = %check.action,
			resource_type = %check.resource_type,
			resource_id = %check.resource_id,
			"POST"
		);
		let response = self
			.send(self.inner.http_client.post(url).json(check), identity, None)
			.await?;
		let body: PermissionCheckResponse = read_json(response).await?;
		Ok(body.allowed)
	}

	async fn list_categories(&self, identity: &UserId) -> Result<Vec<Category>> {
		let url = self.policies(&["categories"])?;
		let records: Vec<CategoryRecord> = self.get_json(url, identity).await?;
		Ok(records.into_iter().map(Category::from).collect())
	}

	async fn create_category(&self, identity: &UserId, category: &NewCategory) -> Result<Category> {
		let url = self.policies(&["categories"])?;
		debug!(url = %url, name = %category.name, "POST");
		let response = self
			.send(self.inner.http_client.post(url).json(category), identity, None)
			.await?;
		let record: CategoryRecord = read_json(response).await?;
		Ok(record.into())
	}

	async fn delete_category(&self, identity: &UserId, id: &str) -> Result<()> {
		let url = self.policies(&["categories", id])?;
		debug!(url = %url, "DELETE");
		self
			.send(self.inner.http_client.delete(url), identity, Some(("category", id)))
			.await?;
		Ok(())
	}

	async fn list_documents(&self, identity: &UserId) -> Result<Vec<Document>> {
		let url = self.policies(&["documents"])?;
		let records: Vec<DocumentRecord> = self.get_json(url, identity).await?;
		Ok(records.into_iter().map(Document::from).collect())
	}

	async fn create_document(&self, identity: &UserId, document: &NewDocument) -> Result<Document> {
		let url = self.policies(&["documents"])?;
		debug!(url = %url, title = %document.title, "POST");
		let response = self
			.send(self.inner.http_client.post(url).json(document), identity, None)
			.await?;
		let record: DocumentRecord = read_json(response).await?;
		Ok(record.into())
	}

	async fn delete_document(&self, identity: &UserId, id: &str) -> Result<()> {
		let url = self.policies(&["documents", id])?;
		debug!(url = %url, "DELETE");
		self
			.send(self.inner.http_client.delete(url), identity, Some(("document", id)))
			.await?;
		Ok(())
	}

	async fn list_users(&self, identity: &UserId) -> Result<Vec<User>> {
		let url = self.policies(&["users"])?;
		let body: Value = self.get_json(url, identity).await?;
		parse_users(&body)
	}

	async fn assign_role(&self, identity: &UserId, user_id: &str, role_id: &str) -> Result<()> {
		let url = self.policies(&["users", user_id, "assign-role"])?;
		debug!(url = %url, role_id, "POST");
		self
			.send(
				self.inner
					.http_client
					.post(url)
					.json(&AssignRoleRequest { role_id }),
				identity,
				Some(("user", user_id)),
			)
			.await?;
		Ok(())
	}

	async fn list_roles(&self, identity: &UserId) -> Result<Vec<Role>> {
		let url = self.policies(&["list-roles"])?;
		self.get_json(url, identity).await
	}

	async fn create_role(&self, identity: &UserId, role: &NewRole) -> Result<Role> {
		let url = self.policies(&["create-role"])?;
		debug!(url = %url, name = %role.name, "POST");
		let response = self
			.send(self.inner.http_client.post(url).json(role), identity, None)
			.await?;
		read_json(response).await
	}

	async fn update_role(&self, identity: &UserId, role: &Role) -> Result<Role> {
		let url = self.policies(&["update-role", role.id.as_str()])?;
		debug!(url = %url, "PUT");
		let response = self
			.send(
				self.inner.http_client.put(url).json(role),
				identity,
				Some(("role", &role.id)),
			)
			.await?;
		read_json(response).await
	}

	async fn delete_role(&self, identity: &UserId, id: &str) -> Result<()> {
		let url = self.policies(&["delete-role", id])?;
		debug!(url = %url, "DELETE");
		self
			.send(self.inner.http_client.delete(url), identity, Some(("role", id)))
			.await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_requires_base_url() {
		let result = HttpPolicyApiBuilder::new().build();
		assert!(matches!(result, Err(ClientError::InvalidBaseUrl)));
	}

	#[test]
	fn test_builder_rejects_unparseable_url() {
		let result = HttpPolicyApi::builder().base_url("not a url").build();
		assert!(matches!(result, Err(ClientError::InvalidBaseUrl)));
	}

	#[test]
	fn test_builder_rejects_non_base_url() {
		let result = HttpPolicyApi::builder().base_url("mailto:ops@example.com").build();
		assert!(matches!(result, Err(ClientError::InvalidBaseUrl)));
	}

	#[test]
	fn test_endpoint_joins_and_encodes_segments() {
		let api = HttpPolicyApi::builder()
			.base_url("https://docs.example.com/")
			.build()
			.unwrap();
		let url = api.policies(&["categories", "q1 reports/2024"]).unwrap();
		assert_eq!(
			url.as_str(),
			"https://docs.example.com/api/policies/categories/q1%20reports%2F2024"
		);
	}

	#[test]
	fn test_endpoint_keeps_base_path_prefix() {
		let api = HttpPolicyApi::builder()
			.base_url("https://example.com/docman")
			.build()
			.unwrap();
		let url = api.policies(&["list-roles"]).unwrap();
		assert_eq!(url.as_str(), "https://example.com/docman/api/policies/list-roles");
	}

	#[test]
	fn test_from_config() {
		let config = ApiConfig {
			base_url: "http://localhost:3000".to_string(),
			timeout_secs: 5,
		};
		assert!(HttpPolicyApi::from_config(&config).is_ok());
	}
}
