/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the membership resolver

extern crate core as jumper_core;

use chrono::NaiveDate;
use entity::user::SystemRole;
use entity::*;
use jumper_core::membership::{
    can_access_action, is_last_admin, links_match, visible_action_ids, MembershipScope,
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

fn naive_date() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn make_user(system_role: SystemRole, is_active: bool) -> user::Model {
    user::Model {
        id: Uuid::new_v4(),
        username: "testuser".to_owned(),
        name: "Test User".to_owned(),
        email: "test@example.com".to_owned(),
        password: None,
        system_role,
        is_active,
        profile_picture: None,
        created_at: naive_date(),
        updated_at: naive_date(),
        last_login_at: naive_date(),
    }
}

#[test]
fn test_links_match_direct_user() {
    let user_id = Uuid::new_v4();
    let scope = MembershipScope::empty(user_id);

    assert!(links_match(&scope, &[user_id], &[], &[]));
    assert!(!links_match(&scope, &[Uuid::new_v4()], &[], &[]));
}

#[test]
fn test_links_match_via_group_and_role() {
    let group_id = Uuid::new_v4();
    let role_id = Uuid::new_v4();

    let mut scope = MembershipScope::empty(Uuid::new_v4());
    scope.groups.insert(group_id);
    scope.roles.insert(role_id);

    assert!(links_match(&scope, &[], &[group_id], &[]));
    assert!(links_match(&scope, &[], &[], &[role_id]));
    assert!(links_match(&scope, &[], &[Uuid::new_v4(), group_id], &[]));
    assert!(!links_match(&scope, &[], &[Uuid::new_v4()], &[Uuid::new_v4()]));
}

#[test]
fn test_links_match_empty_everything() {
    let scope = MembershipScope::empty(Uuid::new_v4());

    assert!(!links_match(&scope, &[], &[], &[]));
}

#[test]
fn test_scope_load_reaches_roles_through_groups() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let user = make_user(SystemRole::User, true);
        let group_id = Uuid::new_v4();
        let direct_role = Uuid::new_v4();
        let group_role = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_group::Model {
                id: Uuid::new_v4(),
                user: user.id,
                group: group_id,
            }]])
            .append_query_results([vec![role_user::Model {
                id: Uuid::new_v4(),
                role: direct_role,
                user: user.id,
            }]])
            .append_query_results([vec![role_group::Model {
                id: Uuid::new_v4(),
                role: group_role,
                group: group_id,
            }]])
            .into_connection();

        let scope = MembershipScope::load(&db, &user).await.unwrap();

        assert_eq!(scope.user, user.id);
        assert!(scope.groups.contains(&group_id));
        assert!(scope.roles.contains(&direct_role));
        assert!(scope.roles.contains(&group_role));

        Ok(())
    })
}

#[test]
fn test_scope_load_without_groups_skips_group_roles() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let user = make_user(SystemRole::User, true);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user_group::Model>::new()])
            .append_query_results([Vec::<role_user::Model>::new()])
            .into_connection();

        let scope = MembershipScope::load(&db, &user).await.unwrap();

        assert!(scope.groups.is_empty());
        assert!(scope.roles.is_empty());

        Ok(())
    })
}

#[test]
fn test_visible_action_ids_deduplicates_paths() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let user_id = Uuid::new_v4();
        let group_id = Uuid::new_v4();
        let role_id = Uuid::new_v4();
        let shared_action = Uuid::new_v4();
        let role_action = Uuid::new_v4();

        let mut scope = MembershipScope::empty(user_id);
        scope.groups.insert(group_id);
        scope.roles.insert(role_id);

        // The same action is reachable directly and through the group.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![action_user::Model {
                id: Uuid::new_v4(),
                action: shared_action,
                user: user_id,
            }]])
            .append_query_results([vec![action_group::Model {
                id: Uuid::new_v4(),
                action: shared_action,
                group: group_id,
            }]])
            .append_query_results([vec![action_role::Model {
                id: Uuid::new_v4(),
                action: role_action,
                role: role_id,
            }]])
            .into_connection();

        let ids = visible_action_ids(&db, &scope).await.unwrap();

        let expected: HashSet<Uuid> = [shared_action, role_action].into_iter().collect();
        assert_eq!(ids, expected);

        Ok(())
    })
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[test]
fn test_is_last_admin_ignores_non_admins() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let user = make_user(SystemRole::UserManager, true);

        // No query results appended: a non-admin must not hit the db.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        assert!(!is_last_admin(&db, &user).await.unwrap());

        Ok(())
    })
}

#[test]
fn test_is_last_admin_true_when_no_other_active_admin() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let user = make_user(SystemRole::Admin, true);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(0)]])
            .into_connection();

        assert!(is_last_admin(&db, &user).await.unwrap());

        Ok(())
    })
}

#[test]
fn test_is_last_admin_false_when_another_admin_remains() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let user = make_user(SystemRole::Admin, true);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(1)]])
            .into_connection();

        assert!(!is_last_admin(&db, &user).await.unwrap());

        Ok(())
    })
}

#[test]
fn test_can_access_action_public_short_circuits() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let user = make_user(SystemRole::User, true);

        let action = action::Model {
            id: Uuid::new_v4(),
            name: "public-action".to_owned(),
            description: String::new(),
            is_active: true,
            is_public: true,
            thumbnail: None,
            data: Uuid::new_v4(),
            created_by: None,
            created_at: naive_date(),
            updated_at: naive_date(),
        };

        // No query results appended: the public check must not hit the db.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        assert!(can_access_action(&db, &user, &action).await.unwrap());

        Ok(())
    })
}

#[test]
fn test_can_access_action_inactive_user_denied() -> Result<(), DbErr> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let user = make_user(SystemRole::Admin, false);

        let action = action::Model {
            id: Uuid::new_v4(),
            name: "public-action".to_owned(),
            description: String::new(),
            is_active: true,
            is_public: true,
            thumbnail: None,
            data: Uuid::new_v4(),
            created_by: None,
            created_at: naive_date(),
            updated_at: naive_date(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        assert!(!can_access_action(&db, &user, &action).await.unwrap());

        Ok(())
    })
}
