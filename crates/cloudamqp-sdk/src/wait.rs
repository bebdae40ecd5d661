// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Readiness polling.
//!
//! [`wait_until_ready`] fetches a snapshot once, then on a fixed tick until the
//! snapshot reports ready or the deadline passes. A failed fetch aborts the wait
//! at once; it is never retried.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

use crate::error::{Result, SdkError};
use crate::types::Readiness;

/// Time between two status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// How long the CLI waits for provisioning unless told otherwise.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Shortest accepted poll interval.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

// Stand-in deadline for timeouts too large to add to an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Options for [`wait_until_ready`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Give up once this much time has passed since the wait began.
    pub timeout: Duration,
    /// Delay between fetches after the first one.
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT_TIMEOUT)
    }
}

impl WaitOptions {
    /// Wait up to `timeout`, polling every [`DEFAULT_POLL_INTERVAL`].
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll interval. Values below [`MIN_POLL_INTERVAL`] are
    /// raised to it.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }
}

/// Poll `fetch` until its snapshot is ready.
///
/// Returns the first ready snapshot. Fails with [`SdkError::StatusCheck`] as
/// soon as a fetch fails, or with [`SdkError::WaitTimeout`] once
/// `options.timeout` has elapsed without a ready snapshot.
pub async fn wait_until_ready<T, F, Fut>(mut fetch: F, options: WaitOptions) -> Result<T>
where
    T: Readiness,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let poll_interval = options.poll_interval.max(MIN_POLL_INTERVAL);
    let deadline = tokio::time::sleep_until(instant_after(started, options.timeout));
    tokio::pin!(deadline);

    let snapshot = fetch().await.map_err(status_check_failed)?;
    if snapshot.is_ready() {
        return Ok(snapshot);
    }

    info!(
        timeout_secs = options.timeout.as_secs(),
        "Waiting for instance to be ready..."
    );

    let mut ticker =
        tokio::time::interval_at(instant_after(started, poll_interval), poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = &mut deadline => {
                return Err(SdkError::WaitTimeout {
                    elapsed: round_to_seconds(started.elapsed()),
                });
            }

            _ = ticker.tick() => {
                let snapshot = fetch().await.map_err(status_check_failed)?;
                let elapsed = round_to_seconds(started.elapsed());

                if snapshot.is_ready() {
                    info!(elapsed_secs = elapsed.as_secs(), "Instance is ready");
                    return Ok(snapshot);
                }

                info!(elapsed_secs = elapsed.as_secs(), "Still waiting...");
            }
        }
    }
}

/// `start + d`, capped far in the future instead of overflowing.
fn instant_after(start: Instant, d: Duration) -> Instant {
    start
        .checked_add(d)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

fn status_check_failed(err: SdkError) -> SdkError {
    SdkError::StatusCheck(Box::new(err))
}

/// Round to the nearest whole second, halves rounding up.
pub fn round_to_seconds(d: Duration) -> Duration {
    Duration::from_secs(((d.as_millis() + 500) / 1000) as u64)
}
