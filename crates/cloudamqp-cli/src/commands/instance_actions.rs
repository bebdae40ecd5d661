// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `instance actions` commands.

use std::io::Write;

use anyhow::{Context, Result};
use cloudamqp_sdk::CloudAmqpClient;

use crate::cli::ActionsCommand;

pub async fn run(client: &CloudAmqpClient, cmd: ActionsCommand, out: &mut dyn Write) -> Result<()> {
    let (action, args) = cmd.into_parts();

    client
        .perform_action(args.id, action, &args.nodes)
        .await
        .with_context(|| format!("failed to {} instance", action))?;

    if args.nodes.is_empty() {
        writeln!(out, "Requested {}: {}", action, args.id)?;
    } else {
        writeln!(out, "Requested {}: {} ({})", action, args.id, args.nodes.join(", "))?;
    }
    Ok(())
}
