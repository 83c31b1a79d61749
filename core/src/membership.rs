/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Membership-based authorization resolver.
//!
//! A resource (action or workspace) is visible to a user when it is public
//! or reachable through any of four relations: direct user link, group
//! link, role link, or a role reached via one of the user's groups. The
//! resolver materializes the user's reachable group and role id sets once
//! per request and tests resources against those sets.

use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use std::collections::HashSet;
use uuid::Uuid;

use super::types::*;
use entity::user::SystemRole;

/// The transitive membership of one user: their groups, plus every role
/// reachable directly or through one of those groups.
#[derive(Debug, Clone)]
pub struct MembershipScope {
    pub user: Uuid,
    pub groups: HashSet<Uuid>,
    pub roles: HashSet<Uuid>,
}

impl MembershipScope {
    pub fn empty(user: Uuid) -> Self {
        Self {
            user,
            groups: HashSet::new(),
            roles: HashSet::new(),
        }
    }

    pub async fn load(db: &DatabaseConnection, user: &MUser) -> Result<Self> {
        let groups: HashSet<Uuid> = EUserGroup::find()
            .filter(CUserGroup::User.eq(user.id))
            .all(db)
            .await
            .context("Failed to query user groups")?
            .into_iter()
            .map(|ug| ug.group)
            .collect();

        let mut roles: HashSet<Uuid> = ERoleUser::find()
            .filter(CRoleUser::User.eq(user.id))
            .all(db)
            .await
            .context("Failed to query user roles")?
            .into_iter()
            .map(|ru| ru.role)
            .collect();

        if !groups.is_empty() {
            let group_roles = ERoleGroup::find()
                .filter(CRoleGroup::Group.is_in(groups.iter().copied().collect::<Vec<_>>()))
                .all(db)
                .await
                .context("Failed to query group roles")?;

            roles.extend(group_roles.into_iter().map(|rg| rg.role));
        }

        Ok(Self {
            user: user.id,
            groups,
            roles,
        })
    }
}

/// Pure form of the visibility predicate: does the scope reach any of the
/// resource's direct user, group, or role links?
pub fn links_match(scope: &MembershipScope, users: &[Uuid], groups: &[Uuid], roles: &[Uuid]) -> bool {
    users.contains(&scope.user)
        || groups.iter().any(|g| scope.groups.contains(g))
        || roles.iter().any(|r| scope.roles.contains(r))
}

/// Ids of every action reachable through the scope's membership links.
/// Deduplicated; a resource reachable via several paths appears once.
pub async fn visible_action_ids(
    db: &DatabaseConnection,
    scope: &MembershipScope,
) -> Result<HashSet<Uuid>> {
    let mut ids: HashSet<Uuid> = EActionUser::find()
        .filter(CActionUser::User.eq(scope.user))
        .all(db)
        .await
        .context("Failed to query action users")?
        .into_iter()
        .map(|au| au.action)
        .collect();

    if !scope.groups.is_empty() {
        let by_group = EActionGroup::find()
            .filter(CActionGroup::Group.is_in(scope.groups.iter().copied().collect::<Vec<_>>()))
            .all(db)
            .await
            .context("Failed to query action groups")?;

        ids.extend(by_group.into_iter().map(|ag| ag.action));
    }

    if !scope.roles.is_empty() {
        let by_role = EActionRole::find()
            .filter(CActionRole::Role.is_in(scope.roles.iter().copied().collect::<Vec<_>>()))
            .all(db)
            .await
            .context("Failed to query action roles")?;

        ids.extend(by_role.into_iter().map(|ar| ar.action));
    }

    Ok(ids)
}

pub async fn visible_workspace_ids(
    db: &DatabaseConnection,
    scope: &MembershipScope,
) -> Result<HashSet<Uuid>> {
    let mut ids: HashSet<Uuid> = EWorkspaceUser::find()
        .filter(CWorkspaceUser::User.eq(scope.user))
        .all(db)
        .await
        .context("Failed to query workspace users")?
        .into_iter()
        .map(|wu| wu.workspace)
        .collect();

    if !scope.groups.is_empty() {
        let by_group = EWorkspaceGroup::find()
            .filter(CWorkspaceGroup::Group.is_in(scope.groups.iter().copied().collect::<Vec<_>>()))
            .all(db)
            .await
            .context("Failed to query workspace groups")?;

        ids.extend(by_group.into_iter().map(|wg| wg.workspace));
    }

    if !scope.roles.is_empty() {
        let by_role = EWorkspaceRole::find()
            .filter(CWorkspaceRole::Role.is_in(scope.roles.iter().copied().collect::<Vec<_>>()))
            .all(db)
            .await
            .context("Failed to query workspace roles")?;

        ids.extend(by_role.into_iter().map(|wr| wr.workspace));
    }

    Ok(ids)
}

/// Actions for the "mine" view: reachable or public, and active. Ordered
/// by name; ordering beyond that is up to the caller.
pub async fn list_mine_active(
    db: &DatabaseConnection,
    scope: &MembershipScope,
) -> Result<Vec<MAction>> {
    let ids = visible_action_ids(db, scope).await?;

    EAction::find()
        .filter(
            Condition::all().add(CAction::IsActive.eq(true)).add(
                Condition::any()
                    .add(CAction::Id.is_in(ids.into_iter().collect::<Vec<_>>()))
                    .add(CAction::IsPublic.eq(true)),
            ),
        )
        .order_by_asc(CAction::Name)
        .all(db)
        .await
        .context("Failed to query visible actions")
}

/// Actions visible to the scope regardless of is_active. Backs the
/// management listing for non-admin callers.
pub async fn list_all_visible(
    db: &DatabaseConnection,
    scope: &MembershipScope,
) -> Result<Vec<MAction>> {
    let ids = visible_action_ids(db, scope).await?;

    EAction::find()
        .filter(
            Condition::any()
                .add(CAction::Id.is_in(ids.into_iter().collect::<Vec<_>>()))
                .add(CAction::IsPublic.eq(true)),
        )
        .order_by_asc(CAction::Name)
        .all(db)
        .await
        .context("Failed to query visible actions")
}

pub async fn list_visible_workspaces(
    db: &DatabaseConnection,
    scope: &MembershipScope,
) -> Result<Vec<MWorkspace>> {
    let ids = visible_workspace_ids(db, scope).await?;

    EWorkspace::find()
        .filter(
            Condition::any()
                .add(CWorkspace::Id.is_in(ids.into_iter().collect::<Vec<_>>()))
                .add(CWorkspace::IsPublic.eq(true)),
        )
        .order_by_asc(CWorkspace::Name)
        .all(db)
        .await
        .context("Failed to query visible workspaces")
}

/// Single-object access predicate for an action. No side effects; missing
/// link rows count as absent, never as an error.
pub async fn can_access_action(
    db: &DatabaseConnection,
    user: &MUser,
    action: &MAction,
) -> Result<bool> {
    if !user.is_active {
        return Ok(false);
    }

    if action.is_public {
        return Ok(true);
    }

    let scope = MembershipScope::load(db, user).await?;

    let users: Vec<Uuid> = EActionUser::find()
        .filter(CActionUser::Action.eq(action.id))
        .all(db)
        .await
        .context("Failed to query action users")?
        .into_iter()
        .map(|au| au.user)
        .collect();

    let groups: Vec<Uuid> = EActionGroup::find()
        .filter(CActionGroup::Action.eq(action.id))
        .all(db)
        .await
        .context("Failed to query action groups")?
        .into_iter()
        .map(|ag| ag.group)
        .collect();

    let roles: Vec<Uuid> = EActionRole::find()
        .filter(CActionRole::Action.eq(action.id))
        .all(db)
        .await
        .context("Failed to query action roles")?
        .into_iter()
        .map(|ar| ar.role)
        .collect();

    Ok(links_match(&scope, &users, &groups, &roles))
}

pub async fn can_access_workspace(
    db: &DatabaseConnection,
    user: &MUser,
    workspace: &MWorkspace,
) -> Result<bool> {
    if !user.is_active {
        return Ok(false);
    }

    if workspace.is_public {
        return Ok(true);
    }

    let scope = MembershipScope::load(db, user).await?;

    let users: Vec<Uuid> = EWorkspaceUser::find()
        .filter(CWorkspaceUser::Workspace.eq(workspace.id))
        .all(db)
        .await
        .context("Failed to query workspace users")?
        .into_iter()
        .map(|wu| wu.user)
        .collect();

    let groups: Vec<Uuid> = EWorkspaceGroup::find()
        .filter(CWorkspaceGroup::Workspace.eq(workspace.id))
        .all(db)
        .await
        .context("Failed to query workspace groups")?
        .into_iter()
        .map(|wg| wg.group)
        .collect();

    let roles: Vec<Uuid> = EWorkspaceRole::find()
        .filter(CWorkspaceRole::Workspace.eq(workspace.id))
        .all(db)
        .await
        .context("Failed to query workspace roles")?
        .into_iter()
        .map(|wr| wr.role)
        .collect();

    Ok(links_match(&scope, &users, &groups, &roles))
}

/// Admin is the system role, or membership in the configured admin group.
pub async fn is_admin(
    db: &DatabaseConnection,
    admin_group: Option<&str>,
    user: &MUser,
) -> Result<bool> {
    if user.system_role == SystemRole::Admin {
        return Ok(true);
    }

    let Some(group_name) = admin_group else {
        return Ok(false);
    };

    let Some(group) = EGroup::find()
        .filter(CGroup::Name.eq(group_name))
        .one(db)
        .await
        .context("Failed to query admin group")?
    else {
        return Ok(false);
    };

    let membership = EUserGroup::find()
        .filter(
            Condition::all()
                .add(CUserGroup::User.eq(user.id))
                .add(CUserGroup::Group.eq(group.id)),
        )
        .one(db)
        .await
        .context("Failed to query admin group membership")?;

    Ok(membership.is_some())
}

pub async fn is_action_manager(
    db: &DatabaseConnection,
    admin_group: Option<&str>,
    user: &MUser,
) -> Result<bool> {
    if user.system_role == SystemRole::ActionManager {
        return Ok(true);
    }

    is_admin(db, admin_group, user).await
}

pub async fn is_user_manager(
    db: &DatabaseConnection,
    admin_group: Option<&str>,
    user: &MUser,
) -> Result<bool> {
    if user.system_role == SystemRole::UserManager {
        return Ok(true);
    }

    is_admin(db, admin_group, user).await
}

/// True when no other active user holds the admin system role. Deleting
/// or downgrading such a user must be rejected by the caller.
pub async fn is_last_admin(db: &DatabaseConnection, user: &MUser) -> Result<bool> {
    if user.system_role != SystemRole::Admin {
        return Ok(false);
    }

    let others = EUser::find()
        .filter(
            Condition::all()
                .add(CUser::SystemRole.eq(SystemRole::Admin))
                .add(CUser::IsActive.eq(true))
                .add(CUser::Id.ne(user.id)),
        )
        .count(db)
        .await
        .context("Failed to count admin users")?;

    Ok(others == 0)
}
