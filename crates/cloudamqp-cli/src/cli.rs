// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Command-line arguments.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use cloudamqp_sdk::{DEFAULT_BASE_URL, InstanceAction, InstanceId};

/// Default for `--wait-timeout`.
pub const DEFAULT_WAIT_TIMEOUT: &str = "15m";

#[derive(Debug, Parser)]
#[command(
    name = "cloudamqp",
    version,
    about = "Manage CloudAMQP instances from the command line",
    after_help = "The API key is read from CLOUDAMQP_APIKEY, then from ~/.cloudamqprc."
)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// CloudAMQP API base URL
    #[arg(long, env = "CLOUDAMQP_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage instances
    #[command(subcommand)]
    Instance(InstanceCommand),

    /// Manage team members
    #[command(subcommand)]
    Team(TeamCommand),

    /// Rotate the account API key and save the new one
    RotateKey,
}

#[derive(Debug, Subcommand)]
pub enum InstanceCommand {
    /// Create a new instance
    Create(CreateArgs),

    /// List all instances
    List,

    /// Show details of an instance
    Get(IdArgs),

    /// Change name, plan or tags of an instance
    Update(UpdateArgs),

    /// Delete an instance
    Delete(IdArgs),

    /// Add disk to every node of an instance
    ResizeDisk(ResizeDiskArgs),

    /// Read and change RabbitMQ configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Inspect instance nodes
    #[command(subcommand)]
    Nodes(NodesCommand),

    /// Restart, stop, start or reboot nodes
    #[command(subcommand)]
    Actions(ActionsCommand),

    /// Inspect RabbitMQ plugins
    #[command(subcommand)]
    Plugins(PluginsCommand),

    /// Rotate instance credentials
    #[command(subcommand)]
    Account(AccountCommand),
}

#[derive(Debug, Clone, Args)]
pub struct IdArgs {
    /// Instance ID
    #[arg(long)]
    pub id: InstanceId,
}

/// Flags shared by commands that can block until provisioning is done.
#[derive(Debug, Clone, Args)]
pub struct WaitArgs {
    /// Wait for the instance to be ready before returning
    #[arg(long)]
    pub wait: bool,

    /// How long to wait, e.g. 90s, 15m, 1h30m
    #[arg(long, value_parser = parse_duration, default_value = DEFAULT_WAIT_TIMEOUT)]
    pub wait_timeout: Duration,
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Instance name
    #[arg(long)]
    pub name: String,

    /// Subscription plan, e.g. bunny-1
    #[arg(long)]
    pub plan: String,

    /// Region, e.g. amazon-web-services::us-east-1
    #[arg(long)]
    pub region: String,

    /// Tags, repeat the flag or separate with commas
    #[arg(long = "tags", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// VPC subnet in CIDR notation
    #[arg(long)]
    pub vpc_subnet: Option<String>,

    #[command(flatten)]
    pub wait: WaitArgs,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Instance ID
    #[arg(long)]
    pub id: InstanceId,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New plan
    #[arg(long)]
    pub plan: Option<String>,

    /// Replacement tags
    #[arg(long = "tags", value_delimiter = ',')]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub wait: WaitArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ResizeDiskArgs {
    /// Instance ID
    #[arg(long)]
    pub id: InstanceId,

    /// Extra disk in GB on top of the plan's disk
    #[arg(long)]
    pub disk_size: u64,

    /// Allow downtime if the disk cannot grow online
    #[arg(long)]
    pub allow_downtime: bool,

    #[command(flatten)]
    pub wait: WaitArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ActionArgs {
    /// Instance ID
    #[arg(long)]
    pub id: InstanceId,

    /// Node names, repeat the flag or separate with commas. Defaults to all nodes.
    #[arg(long = "nodes", value_delimiter = ',')]
    pub nodes: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum ActionsCommand {
    /// Restart RabbitMQ
    Restart(ActionArgs),

    /// Stop RabbitMQ
    Stop(ActionArgs),

    /// Start RabbitMQ
    Start(ActionArgs),

    /// Reboot the servers
    Reboot(ActionArgs),
}

impl ActionsCommand {
    pub fn into_parts(self) -> (InstanceAction, ActionArgs) {
        match self {
            ActionsCommand::Restart(args) => (InstanceAction::Restart, args),
            ActionsCommand::Stop(args) => (InstanceAction::Stop, args),
            ActionsCommand::Start(args) => (InstanceAction::Start, args),
            ActionsCommand::Reboot(args) => (InstanceAction::Reboot, args),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show all settings
    List(IdArgs),

    /// Show a single setting
    Get {
        #[arg(long)]
        id: InstanceId,

        /// Setting name, e.g. rabbit.heartbeat
        setting: String,
    },

    /// Change a single setting
    Set {
        #[arg(long)]
        id: InstanceId,

        /// Setting name
        setting: String,

        /// New value. true, false, null and numbers are sent as JSON values.
        value: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum NodesCommand {
    /// List nodes of an instance
    List(IdArgs),
}

#[derive(Debug, Subcommand)]
pub enum PluginsCommand {
    /// List plugins of an instance
    List(IdArgs),
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Rotate the RabbitMQ password
    RotatePassword(IdArgs),

    /// Rotate the instance API key
    RotateApikey(IdArgs),
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// List team members
    List,
}

/// Parse durations such as `90s`, `15m`, `1h30m` or bare seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("duration is empty".to_string());
    }
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(format!("invalid duration '{}': unknown unit '{}'", input, c)),
        };
        if digits.is_empty() {
            return Err(format!("invalid duration '{}': missing number before '{}'", input, c));
        }
        let n: u64 = digits
            .parse()
            .map_err(|e| format!("invalid duration '{}': {}", input, e))?;
        total = n
            .checked_mul(unit)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| format!("invalid duration '{}': too large", input))?;
        digits.clear();
    }

    if !digits.is_empty() {
        return Err(format!("invalid duration '{}': missing unit after {}", input, digits));
    }
    Ok(Duration::from_secs(total))
}
