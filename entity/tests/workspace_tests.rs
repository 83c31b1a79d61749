/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for workspace and system info entities

use chrono::NaiveDate;
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
async fn test_workspace_entity_basic() -> Result<(), DbErr> {
    let workspace_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![workspace::Model {
            id: workspace_id,
            name: "ops".to_owned(),
            description: "Operations workspace".to_owned(),
            is_active: true,
            is_public: true,
            created_by: None,
            created_at: naive_date(),
            updated_at: naive_date(),
        }]])
        .into_connection();

    let workspace = workspace::Entity::find_by_id(workspace_id)
        .one(&db)
        .await?
        .unwrap();

    assert_eq!(workspace.name, "ops");
    assert!(workspace.is_public);

    Ok(())
}

#[tokio::test]
async fn test_system_info_entity() -> Result<(), DbErr> {
    let info_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![system_info::Model {
            id: info_id,
            allow_action_workspaces: false,
            default_background_image: Some("system/default-background.png".to_owned()),
        }]])
        .into_connection();

    let info = system_info::Entity::find_by_id(info_id)
        .one(&db)
        .await?
        .unwrap();

    assert!(!info.allow_action_workspaces);
    assert!(info.default_background_image.is_some());

    Ok(())
}

#[tokio::test]
async fn test_group_entity_external_id() -> Result<(), DbErr> {
    let group_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![group::Model {
            id: group_id,
            name: "scim-admins".to_owned(),
            external_id: Some("scim:42".to_owned()),
            created_at: naive_date(),
        }]])
        .into_connection();

    let group = group::Entity::find_by_id(group_id).one(&db).await?.unwrap();

    assert_eq!(group.external_id.as_deref(), Some("scim:42"));

    Ok(())
}
