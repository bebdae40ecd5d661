// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `instance account` commands.

use std::io::Write;

use anyhow::{Context, Result};
use cloudamqp_sdk::CloudAmqpClient;

use crate::cli::AccountCommand;

pub async fn run(client: &CloudAmqpClient, cmd: AccountCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        AccountCommand::RotatePassword(args) => {
            client
                .rotate_password(args.id)
                .await
                .context("failed to rotate password")?;
            writeln!(out, "Password rotation started: {}", args.id)?;
        }
        AccountCommand::RotateApikey(args) => {
            client
                .rotate_instance_api_key(args.id)
                .await
                .context("failed to rotate instance API key")?;
            writeln!(out, "API key rotated: {}", args.id)?;
        }
    }
    Ok(())
}
