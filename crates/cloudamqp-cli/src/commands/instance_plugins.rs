// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `instance plugins` commands.

use std::io::Write;

use anyhow::{Context, Result};
use cloudamqp_sdk::{CloudAmqpClient, InstanceId};

use super::yes_no;
use crate::cli::PluginsCommand;
use crate::table::TablePrinter;

pub async fn run(client: &CloudAmqpClient, cmd: PluginsCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        PluginsCommand::List(args) => list(client, args.id, out).await,
    }
}

pub async fn list(client: &CloudAmqpClient, id: InstanceId, out: &mut dyn Write) -> Result<()> {
    let plugins = client
        .list_plugins(id)
        .await
        .context("failed to list plugins")?;

    if plugins.is_empty() {
        writeln!(out, "No plugins found.")?;
        return Ok(());
    }

    let mut table = TablePrinter::new(&mut *out, ["NAME", "VERSION", "ENABLED"]);
    for plugin in &plugins {
        table.add_row([
            plugin.name.clone(),
            plugin.version.clone(),
            yes_no(plugin.enabled).to_string(),
        ])?;
    }
    table.print()?;
    Ok(())
}
