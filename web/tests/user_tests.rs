/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use chrono::NaiveDate;
use entity::user::SystemRole;
use entity::*;
use uuid::Uuid;
use web::endpoints::users::*;

fn naive_date() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn test_user_response_from_model() {
    let model = user::Model {
        id: Uuid::new_v4(),
        username: "alice".to_owned(),
        name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        password: None,
        system_role: SystemRole::UserManager,
        is_active: true,
        profile_picture: Some("users/alice.png".to_owned()),
        created_at: naive_date(),
        updated_at: naive_date(),
        last_login_at: naive_date(),
    };

    let response = UserResponse::from(&model);

    assert_eq!(response.username, "alice");
    assert_eq!(response.system_role, "UserManager");
    assert!(response.has_profile_picture);

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains(r#""system_role":"UserManager""#));
    assert!(!json.contains("password"));
}

#[test]
fn test_patch_user_request_partial_body() {
    let request: PatchUserRequest = serde_json::from_str(r#"{"is_active":false}"#).unwrap();

    assert!(request.name.is_none());
    assert!(request.email.is_none());
    assert!(request.system_role.is_none());
    assert_eq!(request.is_active, Some(false));
}

#[test]
fn test_make_managed_user_request_serialization() {
    let request = MakeManagedUserRequest {
        username: "bob".to_string(),
        name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
        password: None,
        system_role: Some("ActionManager".to_string()),
    };

    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains("bob@example.com"));
    assert!(json.contains("ActionManager"));
}
