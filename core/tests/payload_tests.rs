/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the payload registry

extern crate core as jumper_core;

use entity::action_data::ActionKind;
use jumper_core::payload::{PayloadInput, PayloadView};

#[test]
fn test_payload_input_tag_dispatch() {
    let python: PayloadInput =
        serde_json::from_str(r#"{"type":"Python","code":"print('hi')"}"#).unwrap();
    assert_eq!(python.kind(), ActionKind::Python);

    let cmd: PayloadInput =
        serde_json::from_str(r#"{"type":"WindowsCMD","code":"dir"}"#).unwrap();
    assert_eq!(cmd.kind(), ActionKind::WindowsCmd);

    let link: PayloadInput =
        serde_json::from_str(r#"{"type":"Link","url":"https://example.com"}"#).unwrap();
    assert_eq!(link.kind(), ActionKind::Link);
}

#[test]
fn test_payload_input_unknown_tag_rejected() {
    let result = serde_json::from_str::<PayloadInput>(r#"{"type":"Bash","code":"ls"}"#);
    assert!(result.is_err());

    let result = serde_json::from_str::<PayloadInput>(r#"{"code":"ls"}"#);
    assert!(result.is_err());
}

#[test]
fn test_payload_input_validation() {
    let empty = PayloadInput::Python {
        code: "   ".to_string(),
    };
    assert!(empty.validate().is_err());

    let ok = PayloadInput::WindowsCmd {
        code: "dir".to_string(),
    };
    assert!(ok.validate().is_ok());

    let bad_url = PayloadInput::Link {
        url: "not a url".to_string(),
    };
    assert!(bad_url.validate().is_err());

    let bad_scheme = PayloadInput::Link {
        url: "ftp://example.com".to_string(),
    };
    assert!(bad_scheme.validate().is_err());

    let good_url = PayloadInput::Link {
        url: "https://example.com/launch".to_string(),
    };
    assert!(good_url.validate().is_ok());
}

#[test]
fn test_payload_input_snapshot_fields() {
    let python = PayloadInput::Python {
        code: "print('hi')".to_string(),
    };
    let snapshot = python.snapshot();
    assert_eq!(snapshot.code.as_deref(), Some("print('hi')"));
    assert!(snapshot.url.is_none());

    let link = PayloadInput::Link {
        url: "https://example.com".to_string(),
    };
    let snapshot = link.snapshot();
    assert!(snapshot.code.is_none());
    assert_eq!(snapshot.url.as_deref(), Some("https://example.com"));
}

#[test]
fn test_payload_view_kind_only_omits_contents() {
    let view = PayloadView::kind_only(ActionKind::Python);
    let json = serde_json::to_string(&view).unwrap();

    assert!(json.contains(r#""type":"Python""#));
    assert!(!json.contains("code"));
    assert!(!json.contains("url"));
}

#[test]
fn test_payload_view_serializes_tag_names() {
    let view = PayloadView::from_fields(ActionKind::WindowsCmd, Some("dir".to_string()), None);
    let json = serde_json::to_string(&view).unwrap();

    assert!(json.contains(r#""type":"WindowsCMD""#));
    assert!(json.contains(r#""code":"dir""#));
}
