// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `instance nodes` commands.

use std::io::Write;

use anyhow::{Context, Result};
use cloudamqp_sdk::{CloudAmqpClient, InstanceId};

use super::yes_no;
use crate::cli::NodesCommand;
use crate::table::TablePrinter;

pub async fn run(client: &CloudAmqpClient, cmd: NodesCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        NodesCommand::List(args) => list(client, args.id, out).await,
    }
}

pub async fn list(client: &CloudAmqpClient, id: InstanceId, out: &mut dyn Write) -> Result<()> {
    let nodes = client.list_nodes(id).await.context("failed to list nodes")?;

    if nodes.is_empty() {
        writeln!(out, "No nodes found.")?;
        return Ok(());
    }

    let mut table = TablePrinter::new(
        &mut *out,
        ["NAME", "CONFIGURED", "RUNNING", "DISK_SIZE", "RABBITMQ_VERSION"],
    );
    for node in &nodes {
        table.add_row([
            node.name.clone(),
            yes_no(node.configured).to_string(),
            yes_no(node.running).to_string(),
            format!("{} GB", node.total_disk_size()),
            node.rabbitmq_version.clone(),
        ])?;
    }
    table.print()?;
    Ok(())
}
