// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Command handlers.
//!
//! Handlers write their results to the given sink; progress and diagnostics go
//! through `tracing` to stderr.

pub mod instance;
pub mod instance_account;
pub mod instance_actions;
pub mod instance_config;
pub mod instance_nodes;
pub mod instance_plugins;
pub mod rotate_key;
pub mod team;

use std::io::Write;

use anyhow::{Context, Result};
use cloudamqp_sdk::{CloudAmqpClient, SdkConfig};
use serde::Serialize;

use crate::cli::{Cli, Command, TeamCommand};
use crate::credentials::{API_KEY_ENV, ApiKeyStore, resolve_api_key};

/// Resolve credentials, build the client and run the selected command.
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let store = ApiKeyStore::default_location()?;
    let api_key = resolve_api_key(std::env::var(API_KEY_ENV).ok(), &store)
        .context("failed to get API key")?;

    let config = SdkConfig::new(api_key).with_base_url(cli.api_url);
    let client = CloudAmqpClient::new(config).context("failed to create API client")?;

    execute(&client, &store, cli.command, out).await
}

/// Run a parsed command against an existing client.
pub async fn execute(
    client: &CloudAmqpClient,
    store: &ApiKeyStore,
    command: Command,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Instance(cmd) => instance::run(client, cmd, out).await,
        Command::Team(TeamCommand::List) => team::list(client, out).await,
        Command::RotateKey => rotate_key::run(client, store, out).await,
    }
}

pub(crate) fn print_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to format response")?;
    writeln!(out, "{}", json)?;
    Ok(())
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}
