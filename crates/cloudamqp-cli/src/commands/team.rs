// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `team` commands.

use std::io::Write;

use anyhow::{Context, Result};
use cloudamqp_sdk::CloudAmqpClient;

use super::yes_no;
use crate::table::TablePrinter;

pub async fn list(client: &CloudAmqpClient, out: &mut dyn Write) -> Result<()> {
    let members = client
        .list_team_members()
        .await
        .context("failed to list team members")?;

    if members.is_empty() {
        writeln!(out, "No team members found.")?;
        return Ok(());
    }

    let mut table = TablePrinter::new(&mut *out, ["EMAIL", "ROLES", "2FA"]);
    for member in &members {
        table.add_row([
            member.email.clone(),
            member.roles.join(","),
            yes_no(member.tfa_auth_enabled).to_string(),
        ])?;
    }
    table.print()?;
    Ok(())
}
