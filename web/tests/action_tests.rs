/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use core::payload::PayloadInput;
use web::endpoints::actions::*;

#[test]
fn test_make_action_request_serialization() {
    let request = MakeActionRequest {
        name: "deploy".to_string(),
        description: "Deploy the thing".to_string(),
        is_active: Some(true),
        is_public: Some(false),
        payload: PayloadInput::Python {
            code: "print('hi')".to_string(),
        },
        users: Some(vec!["alice".to_string()]),
        groups: None,
        roles: None,
        change_reason: Some("initial import".to_string()),
    };

    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains("deploy"));
    assert!(json.contains(r#""type":"Python""#));
    assert!(json.contains("alice"));
    assert!(json.contains("initial import"));
}

#[test]
fn test_patch_action_request_partial_body() {
    let request: PatchActionRequest =
        serde_json::from_str(r#"{"description":"new text"}"#).unwrap();

    assert!(request.name.is_none());
    assert_eq!(request.description.as_deref(), Some("new text"));
    assert!(request.payload.is_none());
    assert!(request.users.is_none());
    assert!(request.change_reason.is_none());
}

#[test]
fn test_search_query_parses_optional_params() {
    let params: SearchQuery = serde_json::from_str(r#"{"query":"alice ops","limit":5}"#).unwrap();
    assert_eq!(params.query.as_deref(), Some("alice ops"));
    assert_eq!(params.limit, Some(5));

    let params: SearchQuery = serde_json::from_str(r#"{}"#).unwrap();
    assert!(params.query.is_none());
    assert!(params.limit.is_none());
}

#[test]
fn test_list_query_limit_is_optional() {
    let params: ListQuery = serde_json::from_str(r#"{"limit":100}"#).unwrap();
    assert_eq!(params.limit, Some(100));

    let params: ListQuery = serde_json::from_str(r#"{}"#).unwrap();
    assert!(params.limit.is_none());
}

#[test]
fn test_search_response_shape() {
    let response = SearchResponse {
        users: vec![],
        groups: vec![],
        roles: vec![],
    };

    let json = serde_json::to_string(&response).unwrap();
    assert_eq!(json, r#"{"users":[],"groups":[],"roles":[]}"#);
}

#[test]
fn test_patch_action_request_with_payload() {
    let request: PatchActionRequest = serde_json::from_str(
        r#"{"payload":{"type":"Link","url":"https://example.com"},"change_reason":"moved host"}"#,
    )
    .unwrap();

    assert!(matches!(
        request.payload,
        Some(PayloadInput::Link { .. })
    ));
    assert_eq!(request.change_reason.as_deref(), Some("moved host"));
}
