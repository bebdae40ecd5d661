// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Request and response types for the customer API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Numeric instance identifier.
pub type InstanceId = i64;

/// RabbitMQ configuration settings keyed by setting name.
pub type RabbitMqConfig = BTreeMap<String, serde_json::Value>;

/// Anything the readiness poller can inspect.
pub trait Readiness {
    /// Whether the resource has finished provisioning.
    fn is_ready(&self) -> bool;
}

/// A hosted instance as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Instance ID.
    pub id: InstanceId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Subscription plan, e.g. `bunny-1`.
    #[serde(default)]
    pub plan: String,
    /// Hosting region, e.g. `amazon-web-services::us-east-1`.
    #[serde(default)]
    pub region: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// AMQP connection URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Instance-level API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apikey: Option<String>,
    /// Whether provisioning has finished.
    #[serde(default)]
    pub ready: bool,
    /// RabbitMQ version reported by the nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmq_version: Option<String>,
    /// External hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname_external: Option<String>,
}

impl Readiness for Instance {
    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Parameters for creating an instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceCreateRequest {
    pub name: String,
    pub plan: String,
    pub region: String,
    pub tags: Vec<String>,
    pub vpc_subnet: Option<String>,
}

impl InstanceCreateRequest {
    /// Create a request with the required fields.
    pub fn new(
        name: impl Into<String>,
        plan: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            plan: plan.into(),
            region: region.into(),
            tags: Vec::new(),
            vpc_subnet: None,
        }
    }

    /// Set tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Place the instance in a dedicated VPC subnet.
    pub fn with_vpc_subnet(mut self, subnet: impl Into<String>) -> Self {
        self.vpc_subnet = Some(subnet.into());
        self
    }

    /// Form fields in the order the API documents them.
    pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("plan", self.plan.clone()),
            ("region", self.region.clone()),
        ];
        fields.extend(self.tags.iter().map(|t| ("tags[]", t.clone())));
        if let Some(subnet) = &self.vpc_subnet {
            fields.push(("vpc_subnet", subnet.clone()));
        }
        fields
    }
}

/// Response to a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceCreated {
    pub id: InstanceId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub apikey: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Parameters for updating an instance. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstanceUpdateRequest {
    pub name: Option<String>,
    pub plan: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl InstanceUpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the instance.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Change plan (triggers a resize).
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    /// Replace all tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.plan.is_none() && self.tags.is_none()
    }

    pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(plan) = &self.plan {
            fields.push(("plan", plan.clone()));
        }
        if let Some(tags) = &self.tags {
            fields.extend(tags.iter().map(|t| ("tags[]", t.clone())));
        }
        fields
    }
}

/// Extra disk to add to every node of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiskResizeRequest {
    /// Disk in GB on top of the plan's disk.
    pub extra_disk_size: u64,
    /// Allow a restart when the disk cannot grow online.
    pub allow_downtime: bool,
}

impl DiskResizeRequest {
    pub fn new(extra_disk_size: u64) -> Self {
        Self {
            extra_disk_size,
            allow_downtime: false,
        }
    }

    pub fn with_allow_downtime(mut self, allow: bool) -> Self {
        self.allow_downtime = allow;
        self
    }
}

/// Lifecycle operation on the nodes of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceAction {
    Restart,
    Stop,
    Start,
    Reboot,
}

impl InstanceAction {
    /// Path segment used by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceAction::Restart => "restart",
            InstanceAction::Stop => "stop",
            InstanceAction::Start => "start",
            InstanceAction::Reboot => "reboot",
        }
    }
}

impl std::fmt::Display for InstanceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A broker node of an instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub configured: bool,
    #[serde(default)]
    pub running: bool,
    /// Disk size in GB.
    #[serde(default)]
    pub disk_size: u64,
    /// Extra disk added on top of the plan's disk, in GB.
    #[serde(default)]
    pub additional_disk_size: u64,
    #[serde(default)]
    pub rabbitmq_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl Node {
    /// Total disk in GB.
    pub fn total_disk_size(&self) -> u64 {
        self.disk_size + self.additional_disk_size
    }
}

/// A RabbitMQ plugin on an instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
}

/// A member of the account's team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub tfa_auth_enabled: bool,
}

/// Response to an account API key rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyRotated {
    #[serde(alias = "api_key")]
    pub apikey: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error body shape used by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// `error`, falling back to `message`.
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|e| !e.is_empty())
            .or(self.message.filter(|m| !m.is_empty()))
    }
}
