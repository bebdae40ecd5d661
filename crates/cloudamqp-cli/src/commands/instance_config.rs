// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `instance config` commands.

use std::io::Write;

use anyhow::{Context, Result, anyhow};
use cloudamqp_sdk::{CloudAmqpClient, InstanceId, RabbitMqConfig};
use serde_json::Value;

use super::print_json;
use crate::cli::ConfigCommand;

pub async fn run(client: &CloudAmqpClient, cmd: ConfigCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        ConfigCommand::List(args) => list(client, args.id, out).await,
        ConfigCommand::Get { id, setting } => get(client, id, &setting, out).await,
        ConfigCommand::Set { id, setting, value } => set(client, id, &setting, &value, out).await,
    }
}

pub async fn list(client: &CloudAmqpClient, id: InstanceId, out: &mut dyn Write) -> Result<()> {
    let config = client
        .get_rabbitmq_config(id)
        .await
        .context("failed to get configuration")?;
    print_json(out, &config)
}

/// Print `{setting: value}` for one setting.
pub async fn get(
    client: &CloudAmqpClient,
    id: InstanceId,
    setting: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let config = client
        .get_rabbitmq_config(id)
        .await
        .context("failed to get configuration")?;

    let value = config
        .get(setting)
        .cloned()
        .ok_or_else(|| anyhow!("setting '{}' not found", setting))?;

    let mut single = RabbitMqConfig::new();
    single.insert(setting.to_string(), value);
    print_json(out, &single)
}

pub async fn set(
    client: &CloudAmqpClient,
    id: InstanceId,
    setting: &str,
    raw_value: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let mut update = RabbitMqConfig::new();
    update.insert(setting.to_string(), parse_setting_value(raw_value));

    client
        .update_rabbitmq_config(id, &update)
        .await
        .context("failed to update configuration")?;
    writeln!(out, "Updated: {}", setting)?;
    Ok(())
}

/// Turn a command-line value into JSON.
///
/// `true`, `false` and `null` match case-insensitively; then integers, then
/// finite floats. Anything else stays a string.
pub fn parse_setting_value(raw: &str) -> Value {
    match raw.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Some(n) = raw
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
    {
        return Value::Number(n);
    }

    Value::String(raw.to_string())
}
