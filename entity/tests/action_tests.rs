/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for action entities and their payload rows

use chrono::NaiveDate;
use entity::action_data::ActionKind;
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
async fn test_action_entity_basic() -> Result<(), DbErr> {
    let action_id = Uuid::new_v4();
    let data_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![action::Model {
            id: action_id,
            name: "deploy".to_owned(),
            description: "Deploy the thing".to_owned(),
            is_active: true,
            is_public: false,
            thumbnail: None,
            data: data_id,
            created_by: None,
            created_at: naive_date(),
            updated_at: naive_date(),
        }]])
        .into_connection();

    let action = action::Entity::find_by_id(action_id).one(&db).await?.unwrap();

    assert_eq!(action.name, "deploy");
    assert_eq!(action.data, data_id);
    assert!(action.is_active);
    assert!(!action.is_public);

    Ok(())
}

#[tokio::test]
async fn test_action_data_entity() -> Result<(), DbErr> {
    let data_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![action_data::Model {
            id: data_id,
            kind: ActionKind::Python,
            code: Some("print('hi')".to_owned()),
            url: None,
            updated_at: naive_date(),
        }]])
        .into_connection();

    let data = action_data::Entity::find_by_id(data_id)
        .one(&db)
        .await?
        .unwrap();

    assert_eq!(data.kind, ActionKind::Python);
    assert_eq!(data.code.as_deref(), Some("print('hi')"));
    assert!(data.url.is_none());

    Ok(())
}

#[tokio::test]
async fn test_action_data_version_entity() -> Result<(), DbErr> {
    let data_id = Uuid::new_v4();
    let version_id = Uuid::new_v4();
    let editor_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![action_data_version::Model {
            id: version_id,
            data: data_id,
            position: 3,
            code: Some("print('v3')".to_owned()),
            url: None,
            changed_at: naive_date(),
            edited_by: Some(editor_id),
            change_reason: Some("fixed typo".to_owned()),
        }]])
        .into_connection();

    let version = action_data_version::Entity::find_by_id(version_id)
        .one(&db)
        .await?
        .unwrap();

    assert_eq!(version.data, data_id);
    assert_eq!(version.position, 3);
    assert_eq!(version.edited_by, Some(editor_id));
    assert_eq!(version.change_reason.as_deref(), Some("fixed typo"));

    Ok(())
}

#[tokio::test]
async fn test_action_link_entities() -> Result<(), DbErr> {
    let action_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let link_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![action_user::Model {
            id: link_id,
            action: action_id,
            user: user_id,
        }]])
        .into_connection();

    let link = action_user::Entity::find_by_id(link_id)
        .one(&db)
        .await?
        .unwrap();

    assert_eq!(link.action, action_id);
    assert_eq!(link.user, user_id);

    Ok(())
}
