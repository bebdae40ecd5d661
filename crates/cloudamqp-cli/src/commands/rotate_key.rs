// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `rotate-key` command.

use std::io::Write;

use anyhow::{Context, Result};
use cloudamqp_sdk::CloudAmqpClient;
use tracing::{info, warn};

use super::print_json;
use crate::credentials::ApiKeyStore;

/// Rotate the account key, print the response and save the new key.
///
/// A failed save is logged, not returned.
pub async fn run(client: &CloudAmqpClient, store: &ApiKeyStore, out: &mut dyn Write) -> Result<()> {
    let rotated = client
        .rotate_api_key()
        .await
        .context("failed to rotate API key")?;
    print_json(out, &rotated)?;

    match store.save(&rotated.apikey) {
        Ok(()) => info!(path = %store.path().display(), "Saved new API key"),
        Err(e) => warn!("Could not save new API key: {:#}", e),
    }
    Ok(())
}
