/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the versioned payload store

extern crate core as jumper_core;

use chrono::NaiveDate;
use entity::action_data::ActionKind;
use entity::user::SystemRole;
use entity::*;
use jumper_core::history::{
    list_versions, save_payload, snapshot_as_of, version_numbers, PayloadSnapshot,
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

fn naive_date() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

fn make_data(data_id: Uuid) -> action_data::Model {
    action_data::Model {
        id: data_id,
        kind: ActionKind::Python,
        code: Some("print('hi')".to_owned()),
        url: None,
        updated_at: naive_date(),
    }
}

fn make_version(
    data_id: Uuid,
    position: i64,
    edited_by: Option<Uuid>,
    change_reason: Option<&str>,
) -> action_data_version::Model {
    action_data_version::Model {
        id: Uuid::new_v4(),
        data: data_id,
        position,
        code: Some(format!("print('v{}')", position)),
        url: None,
        changed_at: naive_date(),
        edited_by,
        change_reason: change_reason.map(str::to_owned),
    }
}

#[test]
fn test_version_numbers_decrement_from_total() {
    assert_eq!(version_numbers(5, 3), vec![5, 4, 3]);
    assert_eq!(version_numbers(2, 2), vec![2, 1]);
    assert_eq!(version_numbers(1, 1), vec![1]);
}

#[test]
fn test_version_numbers_empty_page() {
    assert_eq!(version_numbers(10, 0), Vec::<u64>::new());
    assert_eq!(version_numbers(0, 0), Vec::<u64>::new());
}

#[test]
fn test_version_numbers_never_underflow() {
    assert_eq!(version_numbers(1, 3), vec![1, 0, 0]);
}

#[test]
fn test_payload_snapshot_equality() {
    let a = PayloadSnapshot {
        code: Some("x".to_owned()),
        url: None,
    };
    let b = PayloadSnapshot {
        code: Some("x".to_owned()),
        url: None,
    };
    let c = PayloadSnapshot {
        code: Some("y".to_owned()),
        url: None,
    };

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_payload_snapshot_from_models() {
    let data = action_data::Model {
        id: Uuid::new_v4(),
        kind: ActionKind::Link,
        code: None,
        url: Some("https://example.com".to_owned()),
        updated_at: naive_date(),
    };

    let version = action_data_version::Model {
        id: Uuid::new_v4(),
        data: data.id,
        position: 1,
        code: None,
        url: Some("https://example.com".to_owned()),
        changed_at: naive_date(),
        edited_by: None,
        change_reason: None,
    };

    assert_eq!(PayloadSnapshot::from(&data), PayloadSnapshot::from(&version));
}

#[test]
fn test_save_payload_suppresses_unchanged_write() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let data_id = Uuid::new_v4();

        let current = action_data::Model {
            id: data_id,
            kind: ActionKind::Python,
            code: Some("print('hi')".to_owned()),
            url: None,
            updated_at: naive_date(),
        };

        let last_version = action_data_version::Model {
            id: Uuid::new_v4(),
            data: data_id,
            position: 4,
            code: Some("print('hi')".to_owned()),
            url: None,
            changed_at: naive_date(),
            edited_by: None,
            change_reason: Some("updated".to_owned()),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![current]])
            .append_query_results([vec![last_version]])
            .into_connection();

        let next = PayloadSnapshot {
            code: Some("print('hi')".to_owned()),
            url: None,
        };

        let written = save_payload(&db, data_id, next, None, None).await.unwrap();

        assert!(!written);

        Ok(())
    })
}

#[test]
fn test_save_payload_missing_row_is_an_error() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<action_data::Model>::new()])
            .into_connection();

        let next = PayloadSnapshot {
            code: Some("x".to_owned()),
            url: None,
        };

        let result = save_payload(&db, Uuid::new_v4(), next, None, None).await;

        assert!(result.is_err());

        Ok(())
    })
}

#[test]
fn test_list_versions_numbers_from_all_time_total() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let data_id = Uuid::new_v4();
        let gone_editor = Uuid::new_v4();

        let alive_editor = user::Model {
            id: Uuid::new_v4(),
            username: "editor".to_owned(),
            name: "Editor".to_owned(),
            email: "editor@example.com".to_owned(),
            password: None,
            system_role: SystemRole::ActionManager,
            is_active: true,
            profile_picture: None,
            created_at: naive_date(),
            updated_at: naive_date(),
            last_login_at: naive_date(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![make_data(data_id)]])
            .append_query_results([vec![count_row(6)]])
            .append_query_results([vec![
                make_version(data_id, 6, Some(gone_editor), Some("rewrote handler")),
                make_version(data_id, 2, Some(alive_editor.id), Some("created")),
            ]])
            .append_query_results([vec![alive_editor.clone()]])
            .into_connection();

        let entries = list_versions(&db, data_id, 10).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].number, 6);
        assert_eq!(entries[1].number, 5);
        assert_eq!(entries[0].kind, ActionKind::Python);
        assert_eq!(entries[0].change_reason.as_deref(), Some("rewrote handler"));

        // the editing account is gone, attribution degrades instead of failing
        assert!(entries[0].edited_by.is_none());

        let editor = entries[1].edited_by.as_ref().unwrap();
        assert_eq!(editor.id, alive_editor.id);
        assert_eq!(editor.name, "editor");

        Ok(())
    })
}

#[test]
fn test_list_versions_suppressed_saves_leave_no_gap() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let data_id = Uuid::new_v4();

        // three saves, one suppressed as unchanged: two stored versions
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![make_data(data_id)]])
            .append_query_results([vec![count_row(2)]])
            .append_query_results([vec![
                make_version(data_id, 2, None, Some("updated")),
                make_version(data_id, 1, None, Some("created")),
            ]])
            .into_connection();

        let entries = list_versions(&db, data_id, 10).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].number, 2);
        assert_eq!(entries[1].number, 1);
        assert!(entries.iter().all(|e| e.edited_by.is_none()));

        Ok(())
    })
}

#[test]
fn test_list_versions_missing_payload_is_an_error() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<action_data::Model>::new()])
            .into_connection();

        let result = list_versions(&db, Uuid::new_v4(), 10).await;

        assert!(result.is_err());

        Ok(())
    })
}

#[test]
fn test_snapshot_as_of_returns_latest_before_cutoff() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let data_id = Uuid::new_v4();

        let version = action_data_version::Model {
            id: Uuid::new_v4(),
            data: data_id,
            position: 2,
            code: Some("old".to_owned()),
            url: None,
            changed_at: naive_date(),
            edited_by: None,
            change_reason: Some("updated".to_owned()),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![version.clone()]])
            .into_connection();

        let found = snapshot_as_of(&db, data_id, naive_date()).await.unwrap();

        assert_eq!(found, Some(version));

        Ok(())
    })
}
