// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! CloudAMQP command-line client.
//!
//! The `cloudamqp` binary is a thin wrapper around [`commands::run`]; the
//! modules are public so handlers can be driven against a test server.

pub mod cli;
pub mod commands;
pub mod credentials;
pub mod table;
