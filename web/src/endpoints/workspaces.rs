/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use core::database::{
    get_group_by_name, get_role_by_name, get_system_info, get_user_by_username,
    get_workspace_by_name,
};
use core::input::{validate_description, validate_display_name};
use core::membership::{
    can_access_workspace, is_action_manager, is_admin, list_visible_workspaces, MembershipScope,
};
use core::types::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeWorkspaceRequest {
    pub name: String,
    pub description: String,
    pub is_public: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchWorkspaceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WorkspaceUserRequest {
    pub user: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WorkspaceGroupRequest {
    pub group: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WorkspaceRoleRequest {
    pub role: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WorkspaceResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub is_public: bool,
}

impl From<&MWorkspace> for WorkspaceResponse {
    fn from(workspace: &MWorkspace) -> Self {
        Self {
            id: workspace.id,
            name: workspace.name.clone(),
            description: workspace.description.clone(),
            is_active: workspace.is_active,
            is_public: workspace.is_public,
        }
    }
}

async fn require_action_manager(state: &ServerState, user: &MUser) -> WebResult<()> {
    if !is_action_manager(&state.db, state.cli.admin_group.as_deref(), user).await? {
        return Err(WebError::insufficient_permissions());
    }

    Ok(())
}

/// Resolves a workspace the caller is allowed to see. Managers bypass the
/// resolver; everyone else gets NotFound for anything out of reach, so the
/// route does not leak existence.
async fn get_accessible_workspace(
    state: &ServerState,
    user: &MUser,
    name: &str,
) -> WebResult<MWorkspace> {
    let workspace = get_workspace_by_name(&state.db, name)
        .await?
        .ok_or_else(|| WebError::not_found("Workspace"))?;

    if is_action_manager(&state.db, state.cli.admin_group.as_deref(), user).await? {
        return Ok(workspace);
    }

    let info = get_system_info(&state.db).await?;

    if !info.allow_action_workspaces {
        return Err(WebError::not_found("Workspace"));
    }

    if !can_access_workspace(&state.db, user, &workspace).await? {
        return Err(WebError::not_found("Workspace"));
    }

    Ok(workspace)
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    let workspaces = if is_admin(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        EWorkspace::find()
            .order_by_asc(CWorkspace::Name)
            .all(&state.db)
            .await?
    } else {
        let info = get_system_info(&state.db).await?;

        if !info.allow_action_workspaces {
            Vec::new()
        } else {
            let scope = MembershipScope::load(&state.db, &user).await?;
            list_visible_workspaces(&state.db, &scope).await?
        }
    };

    let workspaces: ListResponse = workspaces
        .iter()
        .map(|w| ListItem {
            id: w.id,
            name: w.name.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: workspaces,
    };

    Ok(Json(res))
}

pub async fn put(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<MakeWorkspaceRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    if !is_admin(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        return Err(WebError::insufficient_permissions());
    }

    validate_display_name(&body.name).map_err(WebError::Validation)?;
    validate_description(&body.description).map_err(WebError::Validation)?;

    if get_workspace_by_name(&state.db, &body.name)
        .await?
        .is_some()
    {
        return Err(WebError::already_exists("Workspace"));
    }

    let now = Utc::now().naive_utc();

    let workspace = AWorkspace {
        id: Set(Uuid::new_v4()),
        name: Set(body.name.clone()),
        description: Set(body.description.clone()),
        is_active: Set(true),
        is_public: Set(body.is_public.unwrap_or(false)),
        created_by: Set(Some(user.id)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let workspace = workspace.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: workspace.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn get_workspace(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(workspace): Path<String>,
) -> WebResult<Json<BaseResponse<WorkspaceResponse>>> {
    let workspace = get_accessible_workspace(&state, &user, &workspace).await?;

    let res = BaseResponse {
        error: false,
        message: WorkspaceResponse::from(&workspace),
    };

    Ok(Json(res))
}

pub async fn patch_workspace(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(workspace): Path<String>,
    Json(body): Json<PatchWorkspaceRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let workspace = get_workspace_by_name(&state.db, &workspace)
        .await?
        .ok_or_else(|| WebError::not_found("Workspace"))?;

    let mut aworkspace: AWorkspace = workspace.into();

    if let Some(name) = body.name {
        validate_display_name(&name).map_err(WebError::Validation)?;

        if get_workspace_by_name(&state.db, &name).await?.is_some() {
            return Err(WebError::already_exists("Workspace"));
        }

        aworkspace.name = Set(name);
    }

    if let Some(description) = body.description {
        validate_description(&description).map_err(WebError::Validation)?;
        aworkspace.description = Set(description);
    }

    if let Some(is_active) = body.is_active {
        aworkspace.is_active = Set(is_active);
    }

    if let Some(is_public) = body.is_public {
        aworkspace.is_public = Set(is_public);
    }

    aworkspace.updated_at = Set(Utc::now().naive_utc());
    let workspace = aworkspace.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: workspace.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_workspace(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(workspace): Path<String>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let workspace = get_workspace_by_name(&state.db, &workspace)
        .await?
        .ok_or_else(|| WebError::not_found("Workspace"))?;

    workspace.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Workspace deleted".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_workspace_users(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(workspace): Path<String>,
    Json(body): Json<WorkspaceUserRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let workspace = get_workspace_by_name(&state.db, &workspace)
        .await?
        .ok_or_else(|| WebError::not_found("Workspace"))?;

    let target = get_user_by_username(&state.db, &body.user)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    let link = EWorkspaceUser::find()
        .filter(
            Condition::all()
                .add(CWorkspaceUser::Workspace.eq(workspace.id))
                .add(CWorkspaceUser::User.eq(target.id)),
        )
        .one(&state.db)
        .await?;

    if link.is_some() {
        return Err(WebError::already_exists("Workspace membership"));
    }

    let link = AWorkspaceUser {
        id: Set(Uuid::new_v4()),
        workspace: Set(workspace.id),
        user: Set(target.id),
    };

    link.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "User added to workspace".to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_workspace_users(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(workspace): Path<String>,
    Json(body): Json<WorkspaceUserRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let workspace = get_workspace_by_name(&state.db, &workspace)
        .await?
        .ok_or_else(|| WebError::not_found("Workspace"))?;

    let target = get_user_by_username(&state.db, &body.user)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    let link = EWorkspaceUser::find()
        .filter(
            Condition::all()
                .add(CWorkspaceUser::Workspace.eq(workspace.id))
                .add(CWorkspaceUser::User.eq(target.id)),
        )
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::BadRequest("User not in workspace".to_string()))?;

    link.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "User removed from workspace".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_workspace_groups(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(workspace): Path<String>,
    Json(body): Json<WorkspaceGroupRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let workspace = get_workspace_by_name(&state.db, &workspace)
        .await?
        .ok_or_else(|| WebError::not_found("Workspace"))?;

    let group = get_group_by_name(&state.db, &body.group)
        .await?
        .ok_or_else(|| WebError::not_found("Group"))?;

    let link = EWorkspaceGroup::find()
        .filter(
            Condition::all()
                .add(CWorkspaceGroup::Workspace.eq(workspace.id))
                .add(CWorkspaceGroup::Group.eq(group.id)),
        )
        .one(&state.db)
        .await?;

    if link.is_some() {
        return Err(WebError::already_exists("Workspace membership"));
    }

    let link = AWorkspaceGroup {
        id: Set(Uuid::new_v4()),
        workspace: Set(workspace.id),
        group: Set(group.id),
    };

    link.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Group added to workspace".to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_workspace_groups(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(workspace): Path<String>,
    Json(body): Json<WorkspaceGroupRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let workspace = get_workspace_by_name(&state.db, &workspace)
        .await?
        .ok_or_else(|| WebError::not_found("Workspace"))?;

    let group = get_group_by_name(&state.db, &body.group)
        .await?
        .ok_or_else(|| WebError::not_found("Group"))?;

    let link = EWorkspaceGroup::find()
        .filter(
            Condition::all()
                .add(CWorkspaceGroup::Workspace.eq(workspace.id))
                .add(CWorkspaceGroup::Group.eq(group.id)),
        )
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::BadRequest("Group not in workspace".to_string()))?;

    link.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Group removed from workspace".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_workspace_roles(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(workspace): Path<String>,
    Json(body): Json<WorkspaceRoleRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let workspace = get_workspace_by_name(&state.db, &workspace)
        .await?
        .ok_or_else(|| WebError::not_found("Workspace"))?;

    let role = get_role_by_name(&state.db, &body.role)
        .await?
        .ok_or_else(|| WebError::not_found("Role"))?;

    let link = EWorkspaceRole::find()
        .filter(
            Condition::all()
                .add(CWorkspaceRole::Workspace.eq(workspace.id))
                .add(CWorkspaceRole::Role.eq(role.id)),
        )
        .one(&state.db)
        .await?;

    if link.is_some() {
        return Err(WebError::already_exists("Workspace membership"));
    }

    let link = AWorkspaceRole {
        id: Set(Uuid::new_v4()),
        workspace: Set(workspace.id),
        role: Set(role.id),
    };

    link.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Role added to workspace".to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_workspace_roles(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(workspace): Path<String>,
    Json(body): Json<WorkspaceRoleRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let workspace = get_workspace_by_name(&state.db, &workspace)
        .await?
        .ok_or_else(|| WebError::not_found("Workspace"))?;

    let role = get_role_by_name(&state.db, &body.role)
        .await?
        .ok_or_else(|| WebError::not_found("Role"))?;

    let link = EWorkspaceRole::find()
        .filter(
            Condition::all()
                .add(CWorkspaceRole::Workspace.eq(workspace.id))
                .add(CWorkspaceRole::Role.eq(role.id)),
        )
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::BadRequest("Role not in workspace".to_string()))?;

    link.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Role removed from workspace".to_string(),
    };

    Ok(Json(res))
}
