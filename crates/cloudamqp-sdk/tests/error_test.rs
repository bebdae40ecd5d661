// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error type tests for cloudamqp-sdk.

use std::error::Error as _;
use std::time::Duration;

use cloudamqp_sdk::SdkError;

#[test]
fn test_config_error_display() {
    let err = SdkError::Config("missing key".to_string());
    assert!(err.to_string().contains("configuration error"));
    assert!(err.to_string().contains("missing key"));
}

#[test]
fn test_connection_error_display() {
    let err = SdkError::Connection("connection refused".to_string());
    assert!(err.to_string().contains("connection error"));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_timeout_error_display() {
    let err = SdkError::Timeout(5000);
    assert!(err.to_string().contains("timed out"));
    assert!(err.to_string().contains("5000"));
}

#[test]
fn test_api_error_display() {
    let err = SdkError::Api {
        status: 422,
        message: "Invalid plan".to_string(),
    };
    let display = err.to_string();
    assert!(display.contains("API error"));
    assert!(display.contains("422"));
    assert!(display.contains("Invalid plan"));
    assert_eq!(err.status(), Some(422));
}

#[test]
fn test_instance_not_found_error_display() {
    let err = SdkError::InstanceNotFound(1234);
    assert_eq!(err.to_string(), "instance not found: 1234");
    assert_eq!(err.status(), Some(404));
}

#[test]
fn test_status_check_wraps_cause() {
    let err = SdkError::StatusCheck(Box::new(SdkError::Connection("reset".to_string())));
    assert_eq!(
        err.to_string(),
        "failed to check instance status: connection error: reset"
    );

    let source = err.source().expect("cause should be kept");
    assert!(source.to_string().contains("reset"));
    assert_eq!(err.status(), None);
}

#[test]
fn test_status_check_passes_through_status() {
    let err = SdkError::StatusCheck(Box::new(SdkError::InstanceNotFound(5)));
    assert_eq!(err.status(), Some(404));
}

#[test]
fn test_wait_timeout_display_uses_whole_seconds() {
    let err = SdkError::WaitTimeout {
        elapsed: Duration::from_secs(901),
    };
    assert_eq!(
        err.to_string(),
        "timeout after 901s waiting for instance to be ready"
    );
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SdkError>();
}

#[test]
fn test_from_serde_json_error() {
    let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
    let sdk_err: SdkError = json_err.into();
    assert!(matches!(sdk_err, SdkError::Serialization(_)));
}
