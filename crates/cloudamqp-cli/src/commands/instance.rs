// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `instance` commands.

use std::io::Write;

use anyhow::{Context, Result};
use cloudamqp_sdk::{
    CloudAmqpClient, DiskResizeRequest, InstanceCreateRequest, InstanceId, InstanceUpdateRequest,
    WaitOptions,
};

use super::{
    instance_account, instance_actions, instance_config, instance_nodes, instance_plugins,
    print_json,
};
use crate::cli::{CreateArgs, InstanceCommand, ResizeDiskArgs, UpdateArgs, WaitArgs};
use crate::table::TablePrinter;

pub async fn run(client: &CloudAmqpClient, cmd: InstanceCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        InstanceCommand::Create(args) => create(client, args, out).await,
        InstanceCommand::List => list(client, out).await,
        InstanceCommand::Get(args) => get(client, args.id, out).await,
        InstanceCommand::Update(args) => update(client, args, out).await,
        InstanceCommand::Delete(args) => delete(client, args.id, out).await,
        InstanceCommand::ResizeDisk(args) => resize_disk(client, args, out).await,
        InstanceCommand::Actions(cmd) => instance_actions::run(client, cmd, out).await,
        InstanceCommand::Config(cmd) => instance_config::run(client, cmd, out).await,
        InstanceCommand::Nodes(cmd) => instance_nodes::run(client, cmd, out).await,
        InstanceCommand::Plugins(cmd) => instance_plugins::run(client, cmd, out).await,
        InstanceCommand::Account(cmd) => instance_account::run(client, cmd, out).await,
    }
}

pub async fn create(client: &CloudAmqpClient, args: CreateArgs, out: &mut dyn Write) -> Result<()> {
    let mut request =
        InstanceCreateRequest::new(args.name, args.plan, args.region).with_tags(args.tags);
    if let Some(subnet) = args.vpc_subnet {
        request = request.with_vpc_subnet(subnet);
    }

    let created = client
        .create_instance(&request)
        .await
        .context("failed to create instance")?;
    print_json(out, &created)?;

    wait_if_requested(client, created.id, &args.wait).await
}

pub async fn list(client: &CloudAmqpClient, out: &mut dyn Write) -> Result<()> {
    let instances = client
        .list_instances()
        .await
        .context("failed to list instances")?;

    if instances.is_empty() {
        writeln!(out, "No instances found.")?;
        return Ok(());
    }

    let mut table = TablePrinter::new(&mut *out, ["ID", "NAME", "PLAN", "REGION", "TAGS"]);
    for instance in &instances {
        table.add_row([
            instance.id.to_string(),
            instance.name.clone(),
            instance.plan.clone(),
            instance.region.clone(),
            instance.tags.join(","),
        ])?;
    }
    table.print()?;
    Ok(())
}

pub async fn get(client: &CloudAmqpClient, id: InstanceId, out: &mut dyn Write) -> Result<()> {
    let instance = client
        .get_instance(id)
        .await
        .context("failed to get instance")?;
    print_json(out, &instance)
}

pub async fn update(client: &CloudAmqpClient, args: UpdateArgs, out: &mut dyn Write) -> Result<()> {
    let mut request = InstanceUpdateRequest::new();
    if let Some(name) = args.name {
        request = request.with_name(name);
    }
    if let Some(plan) = args.plan {
        request = request.with_plan(plan);
    }
    if !args.tags.is_empty() {
        request = request.with_tags(args.tags);
    }

    client
        .update_instance(args.id, &request)
        .await
        .context("failed to update instance")?;
    writeln!(out, "Updated: {}", args.id)?;

    wait_if_requested(client, args.id, &args.wait).await
}

pub async fn delete(client: &CloudAmqpClient, id: InstanceId, out: &mut dyn Write) -> Result<()> {
    client
        .delete_instance(id)
        .await
        .context("failed to delete instance")?;
    writeln!(out, "Deleted: {}", id)?;
    Ok(())
}

pub async fn resize_disk(
    client: &CloudAmqpClient,
    args: ResizeDiskArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let request = DiskResizeRequest::new(args.disk_size).with_allow_downtime(args.allow_downtime);

    client
        .resize_disk(args.id, &request)
        .await
        .context("failed to resize disk")?;
    writeln!(out, "Disk resize started: {}", args.id)?;

    wait_if_requested(client, args.id, &args.wait).await
}

async fn wait_if_requested(client: &CloudAmqpClient, id: InstanceId, wait: &WaitArgs) -> Result<()> {
    if !wait.wait {
        return Ok(());
    }

    client
        .wait_for_instance_ready(id, WaitOptions::new(wait.wait_timeout))
        .await
        .with_context(|| format!("instance {} did not become ready", id))?;
    Ok(())
}
