/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for user entity

use chrono::NaiveDate;
use entity::user::SystemRole;
use entity::*;
use sea_orm::{entity::prelude::*, DatabaseBackend, MockDatabase};
use uuid::Uuid;

fn naive_date() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_user_entity_basic() -> Result<(), DbErr> {
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: user_id,
            username: "testuser".to_owned(),
            name: "Test User".to_owned(),
            email: "test@example.com".to_owned(),
            password: Some("hashed_password".to_owned()),
            system_role: SystemRole::User,
            is_active: true,
            profile_picture: None,
            created_at: naive_date(),
            updated_at: naive_date(),
            last_login_at: naive_date(),
        }]])
        .into_connection();

    let result = user::Entity::find_by_id(user_id).one(&db).await?;

    assert!(result.is_some());
    let user = result.unwrap();
    assert_eq!(user.username, "testuser");
    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.system_role, SystemRole::User);
    assert!(user.is_active);

    Ok(())
}

#[tokio::test]
async fn test_user_entity_oidc_account_has_no_password() -> Result<(), DbErr> {
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: user_id,
            username: "oidcuser".to_owned(),
            name: "OIDC User".to_owned(),
            email: "oidc@example.com".to_owned(),
            password: None,
            system_role: SystemRole::Admin,
            is_active: true,
            profile_picture: Some("users/profile_pictures/x.png".to_owned()),
            created_at: naive_date(),
            updated_at: naive_date(),
            last_login_at: naive_date(),
        }]])
        .into_connection();

    let user = user::Entity::find_by_id(user_id).one(&db).await?.unwrap();

    assert!(user.password.is_none());
    assert_eq!(user.system_role, SystemRole::Admin);
    assert!(user.profile_picture.is_some());

    Ok(())
}

#[tokio::test]
async fn test_user_preferences_entity() -> Result<(), DbErr> {
    let user_id = Uuid::new_v4();
    let preferences_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_preferences::Model {
            id: preferences_id,
            user: user_id,
            disable_default_background: true,
            background_image: None,
        }]])
        .into_connection();

    let preferences = user_preferences::Entity::find_by_id(preferences_id)
        .one(&db)
        .await?
        .unwrap();

    assert_eq!(preferences.user, user_id);
    assert!(preferences.disable_default_background);
    assert!(preferences.background_image.is_none());

    Ok(())
}
