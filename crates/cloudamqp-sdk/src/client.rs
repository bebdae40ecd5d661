// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! CloudAmqpClient for the CloudAMQP customer API.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::config::SdkConfig;
use crate::error::{Result, SdkError};
use crate::types::{
    ApiKeyRotated, DiskResizeRequest, ErrorBody, Instance, InstanceAction, InstanceCreateRequest,
    InstanceCreated, InstanceId, InstanceUpdateRequest, Node, Plugin, RabbitMqConfig, TeamMember,
};
use crate::wait::{WaitOptions, wait_until_ready};

/// Client for the CloudAMQP customer API.
///
/// Every call authenticates with the account API key from [`SdkConfig`] using
/// HTTP basic auth (empty user, key as password). Calls are independent; the
/// client keeps no state between them besides the connection pool.
pub struct CloudAmqpClient {
    http: reqwest::Client,
    config: SdkConfig,
}

impl CloudAmqpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SdkConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SdkError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(SdkConfig::from_env()?)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.config.base_url, path))
            .basic_auth("", Some(&self.config.api_key))
    }

    /// Send a request and turn non-2xx responses into [`SdkError::Api`].
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SdkError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if body.trim().is_empty() {
            return Err(SdkError::UnexpectedResponse("empty response body".to_string()));
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn transport_error(&self, err: reqwest::Error) -> SdkError {
        if err.is_timeout() {
            SdkError::Timeout(self.config.request_timeout.as_millis() as u64)
        } else {
            SdkError::from(err)
        }
    }

    // =========================================================================
    // Instances
    // =========================================================================

    /// List all instances on the account.
    #[instrument(skip(self))]
    pub async fn list_instances(&self) -> Result<Vec<Instance>> {
        debug!("Listing instances");
        self.send_json(self.request(Method::GET, "/instances")).await
    }

    /// Get a single instance.
    #[instrument(skip(self))]
    pub async fn get_instance(&self, id: InstanceId) -> Result<Instance> {
        debug!("Getting instance");
        self.send_json(self.request(Method::GET, &instance_path(id)))
            .await
            .map_err(|e| not_found_as_instance(e, id))
    }

    /// Create a new instance. Provisioning continues after this returns; see
    /// [`CloudAmqpClient::wait_for_instance_ready`].
    #[instrument(skip(self, request), fields(name = %request.name, plan = %request.plan, region = %request.region))]
    pub async fn create_instance(
        &self,
        request: &InstanceCreateRequest,
    ) -> Result<InstanceCreated> {
        info!("Creating instance");

        if request.name.trim().is_empty() {
            return Err(SdkError::InvalidInput("instance name is required".to_string()));
        }

        let created: InstanceCreated = self
            .send_json(
                self.request(Method::POST, "/instances")
                    .form(&request.form_fields()),
            )
            .await?;

        info!(instance_id = created.id, "Instance created");
        Ok(created)
    }

    /// Update name, plan or tags of an instance.
    #[instrument(skip(self, request))]
    pub async fn update_instance(
        &self,
        id: InstanceId,
        request: &InstanceUpdateRequest,
    ) -> Result<()> {
        info!("Updating instance");

        if request.is_empty() {
            return Err(SdkError::InvalidInput(
                "nothing to update: set at least one of name, plan or tags".to_string(),
            ));
        }

        self.send(
            self.request(Method::PUT, &instance_path(id))
                .form(&request.form_fields()),
        )
        .await
        .map_err(|e| not_found_as_instance(e, id))?;
        Ok(())
    }

    /// Delete an instance.
    #[instrument(skip(self))]
    pub async fn delete_instance(&self, id: InstanceId) -> Result<()> {
        info!("Deleting instance");
        self.send(self.request(Method::DELETE, &instance_path(id)))
            .await
            .map_err(|e| not_found_as_instance(e, id))?;
        Ok(())
    }

    /// Add disk to every node of an instance.
    #[instrument(skip(self, request), fields(extra_disk_size = request.extra_disk_size))]
    pub async fn resize_disk(&self, id: InstanceId, request: &DiskResizeRequest) -> Result<()> {
        info!("Resizing instance disk");

        if request.extra_disk_size == 0 {
            return Err(SdkError::InvalidInput(
                "extra disk size must be greater than 0".to_string(),
            ));
        }

        self.send(
            self.request(Method::PUT, &format!("{}/disk", instance_path(id)))
                .json(request),
        )
        .await
        .map_err(|e| not_found_as_instance(e, id))?;
        Ok(())
    }

    /// Run a lifecycle action on the nodes of an instance.
    ///
    /// An empty `nodes` slice targets every node.
    #[instrument(skip(self, action, nodes), fields(action = %action, nodes = nodes.len()))]
    pub async fn perform_action(
        &self,
        id: InstanceId,
        action: InstanceAction,
        nodes: &[String],
    ) -> Result<()> {
        info!("Performing instance action");

        let mut builder = self.request(
            Method::POST,
            &format!("{}/actions/{}", instance_path(id), action.as_str()),
        );
        if !nodes.is_empty() {
            builder = builder.json(&serde_json::json!({ "nodes": nodes }));
        }

        self.send(builder)
            .await
            .map_err(|e| not_found_as_instance(e, id))?;
        Ok(())
    }

    // =========================================================================
    // Instance resources
    // =========================================================================

    /// Get all RabbitMQ configuration settings of an instance.
    #[instrument(skip(self))]
    pub async fn get_rabbitmq_config(&self, id: InstanceId) -> Result<RabbitMqConfig> {
        debug!("Getting RabbitMQ configuration");
        self.send_json(self.request(Method::GET, &format!("{}/config", instance_path(id))))
            .await
    }

    /// Update one or more RabbitMQ configuration settings.
    #[instrument(skip(self, settings), fields(settings = settings.len()))]
    pub async fn update_rabbitmq_config(
        &self,
        id: InstanceId,
        settings: &RabbitMqConfig,
    ) -> Result<()> {
        info!("Updating RabbitMQ configuration");
        self.send(
            self.request(Method::PUT, &format!("{}/config", instance_path(id)))
                .json(settings),
        )
        .await?;
        Ok(())
    }

    /// List the broker nodes of an instance.
    #[instrument(skip(self))]
    pub async fn list_nodes(&self, id: InstanceId) -> Result<Vec<Node>> {
        debug!("Listing nodes");
        self.send_json(self.request(Method::GET, &format!("{}/nodes", instance_path(id))))
            .await
    }

    /// List the RabbitMQ plugins of an instance.
    #[instrument(skip(self))]
    pub async fn list_plugins(&self, id: InstanceId) -> Result<Vec<Plugin>> {
        debug!("Listing plugins");
        self.send_json(self.request(Method::GET, &format!("{}/plugins", instance_path(id))))
            .await
    }

    /// Start rotation of the RabbitMQ user password.
    #[instrument(skip(self))]
    pub async fn rotate_password(&self, id: InstanceId) -> Result<()> {
        info!("Rotating instance password");
        self.send(self.request(
            Method::POST,
            &format!("{}/account/rotate-password", instance_path(id)),
        ))
        .await?;
        Ok(())
    }

    /// Rotate the instance-level API key.
    #[instrument(skip(self))]
    pub async fn rotate_instance_api_key(&self, id: InstanceId) -> Result<()> {
        info!("Rotating instance API key");
        self.send(self.request(
            Method::POST,
            &format!("{}/account/rotate-apikey", instance_path(id)),
        ))
        .await?;
        Ok(())
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// List the members of the account's team.
    #[instrument(skip(self))]
    pub async fn list_team_members(&self) -> Result<Vec<TeamMember>> {
        debug!("Listing team members");
        self.send_json(self.request(Method::GET, "/team")).await
    }

    /// Replace the account API key with a new one carrying the same permissions.
    ///
    /// The key this client was built with stops working once this succeeds.
    #[instrument(skip(self))]
    pub async fn rotate_api_key(&self) -> Result<ApiKeyRotated> {
        info!("Rotating account API key");
        self.send_json(self.request(Method::POST, "/api-keys/rotate"))
            .await
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Block until the instance reports ready.
    ///
    /// Fetches once immediately, then every `options.poll_interval` until ready
    /// or `options.timeout` has passed.
    #[instrument(skip(self, options), fields(timeout_secs = options.timeout.as_secs()))]
    pub async fn wait_for_instance_ready(
        &self,
        id: InstanceId,
        options: WaitOptions,
    ) -> Result<Instance> {
        wait_until_ready(|| self.get_instance(id), options).await
    }
}

fn instance_path(id: InstanceId) -> String {
    format!("/instances/{}", id)
}

fn not_found_as_instance(err: SdkError, id: InstanceId) -> SdkError {
    match err {
        SdkError::Api { status: 404, .. } => SdkError::InstanceNotFound(id),
        other => other,
    }
}

/// Pick the most useful message from an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
    {
        return message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_error() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"error":"Invalid plan"}"#),
            "Invalid plan"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"Invalid region"}"#),
            "Invalid region"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body_then_reason() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "  upstream down \n"),
            "upstream down"
        );
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, ""), "Unauthorized");
    }

    #[test]
    fn test_not_found_maps_to_instance() {
        let err = SdkError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert!(matches!(
            not_found_as_instance(err, 7),
            SdkError::InstanceNotFound(7)
        ));

        let err = SdkError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(matches!(
            not_found_as_instance(err, 7),
            SdkError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_config_reflects_builder() {
        let config = SdkConfig::new("old-key")
            .with_api_key("new-key")
            .with_base_url("http://localhost:9000/api/");
        let client = CloudAmqpClient::new(config).unwrap();

        assert_eq!(client.config().api_key, "new-key");
        assert_eq!(client.config().base_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_error_message_with_error_and_message() {
        assert_eq!(
            error_message(
                StatusCode::BAD_REQUEST,
                r#"{"error":"Invalid plan","message":"Bad request"}"#
            ),
            "Invalid plan"
        );
    }

    #[test]
    fn test_new_rejects_empty_key() {
        assert!(matches!(
            CloudAmqpClient::new(SdkConfig::new("")),
            Err(SdkError::Config(_))
        ));
    }
}
