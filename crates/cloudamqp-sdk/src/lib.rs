// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! CloudAMQP SDK
//!
//! Async client for the CloudAMQP customer API.
//!
//! # Coverage
//!
//! - Instance lifecycle (create, list, get, update, delete, disk resize, restart/stop/start/reboot)
//! - Instance resources (RabbitMQ configuration, nodes, plugins, account rotation)
//! - Account (team members, API key rotation)
//! - Readiness polling after provisioning
//!
//! # Example
//!
//! ```no_run
//! use cloudamqp_sdk::{CloudAmqpClient, InstanceCreateRequest, SdkConfig, WaitOptions};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CloudAmqpClient::new(SdkConfig::new("my-api-key"))?;
//!
//! let request = InstanceCreateRequest::new("orders", "bunny-1", "amazon-web-services::us-east-1")
//!     .with_tags(["prod"]);
//! let created = client.create_instance(&request).await?;
//!
//! let instance = client
//!     .wait_for_instance_ready(created.id, WaitOptions::new(Duration::from_secs(600)))
//!     .await?;
//! println!("{} is ready at {:?}", instance.name, instance.url);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod types;
pub mod wait;

pub use client::CloudAmqpClient;
pub use config::{DEFAULT_BASE_URL, SdkConfig};
pub use error::{Result, SdkError};
pub use types::{
    ApiKeyRotated, DiskResizeRequest, Instance, InstanceAction, InstanceCreateRequest,
    InstanceCreated, InstanceId, InstanceUpdateRequest, Node, Plugin, RabbitMqConfig, Readiness,
    TeamMember,
};
pub use wait::{MIN_POLL_INTERVAL, WaitOptions, wait_until_ready};
