/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use core::database::{get_group_by_name, get_role_by_name, get_user_by_username};
use core::input::{validate_description, validate_display_name};
use core::membership::is_user_manager;
use core::types::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeRoleRequest {
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchRoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RoleUserRequest {
    pub user: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RoleGroupRequest {
    pub group: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub users: ListResponse,
    pub groups: ListResponse,
}

async fn require_user_manager(state: &ServerState, user: &MUser) -> WebResult<()> {
    if !is_user_manager(&state.db, state.cli.admin_group.as_deref(), user).await? {
        return Err(WebError::insufficient_permissions());
    }

    Ok(())
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    require_user_manager(&state, &user).await?;

    let roles = ERole::find()
        .order_by_asc(CRole::Name)
        .all(&state.db)
        .await?;

    let roles: ListResponse = roles
        .iter()
        .map(|r| ListItem {
            id: r.id,
            name: r.name.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: roles,
    };

    Ok(Json(res))
}

pub async fn put(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<MakeRoleRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    validate_display_name(&body.name).map_err(WebError::Validation)?;
    validate_description(&body.description).map_err(WebError::Validation)?;

    if get_role_by_name(&state.db, &body.name).await?.is_some() {
        return Err(WebError::already_exists("Role"));
    }

    let now = Utc::now().naive_utc();

    let role = ARole {
        id: Set(Uuid::new_v4()),
        name: Set(body.name.clone()),
        description: Set(body.description.clone()),
        created_by: Set(Some(user.id)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let role = role.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: role.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn get_role(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(role): Path<String>,
) -> WebResult<Json<BaseResponse<RoleResponse>>> {
    require_user_manager(&state, &user).await?;

    let role = get_role_by_name(&state.db, &role)
        .await?
        .ok_or_else(|| WebError::not_found("Role"))?;

    let user_ids: Vec<Uuid> = ERoleUser::find()
        .filter(CRoleUser::Role.eq(role.id))
        .all(&state.db)
        .await?
        .iter()
        .map(|ru| ru.user)
        .collect();

    let users: ListResponse = if user_ids.is_empty() {
        Vec::new()
    } else {
        EUser::find()
            .filter(CUser::Id.is_in(user_ids))
            .order_by_asc(CUser::Username)
            .all(&state.db)
            .await?
            .iter()
            .map(|u| ListItem {
                id: u.id,
                name: u.username.clone(),
            })
            .collect()
    };

    let group_ids: Vec<Uuid> = ERoleGroup::find()
        .filter(CRoleGroup::Role.eq(role.id))
        .all(&state.db)
        .await?
        .iter()
        .map(|rg| rg.group)
        .collect();

    let groups: ListResponse = if group_ids.is_empty() {
        Vec::new()
    } else {
        EGroup::find()
            .filter(CGroup::Id.is_in(group_ids))
            .order_by_asc(CGroup::Name)
            .all(&state.db)
            .await?
            .iter()
            .map(|g| ListItem {
                id: g.id,
                name: g.name.clone(),
            })
            .collect()
    };

    let res = BaseResponse {
        error: false,
        message: RoleResponse {
            id: role.id,
            name: role.name,
            description: role.description,
            users,
            groups,
        },
    };

    Ok(Json(res))
}

pub async fn patch_role(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(role): Path<String>,
    Json(body): Json<PatchRoleRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let role = get_role_by_name(&state.db, &role)
        .await?
        .ok_or_else(|| WebError::not_found("Role"))?;

    let mut arole: ARole = role.into();

    if let Some(name) = body.name {
        validate_display_name(&name).map_err(WebError::Validation)?;

        if get_role_by_name(&state.db, &name).await?.is_some() {
            return Err(WebError::already_exists("Role"));
        }

        arole.name = Set(name);
    }

    if let Some(description) = body.description {
        validate_description(&description).map_err(WebError::Validation)?;
        arole.description = Set(description);
    }

    arole.updated_at = Set(Utc::now().naive_utc());
    let role = arole.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: role.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_role(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(role): Path<String>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let role = get_role_by_name(&state.db, &role)
        .await?
        .ok_or_else(|| WebError::not_found("Role"))?;

    role.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Role deleted".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_role_users(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(role): Path<String>,
    Json(body): Json<RoleUserRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let role = get_role_by_name(&state.db, &role)
        .await?
        .ok_or_else(|| WebError::not_found("Role"))?;

    let target = get_user_by_username(&state.db, &body.user)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    let link = ERoleUser::find()
        .filter(
            Condition::all()
                .add(CRoleUser::Role.eq(role.id))
                .add(CRoleUser::User.eq(target.id)),
        )
        .one(&state.db)
        .await?;

    if link.is_some() {
        return Err(WebError::already_exists("Role membership"));
    }

    let link = ARoleUser {
        id: Set(Uuid::new_v4()),
        role: Set(role.id),
        user: Set(target.id),
    };

    link.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "User added to role".to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_role_users(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(role): Path<String>,
    Json(body): Json<RoleUserRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let role = get_role_by_name(&state.db, &role)
        .await?
        .ok_or_else(|| WebError::not_found("Role"))?;

    let target = get_user_by_username(&state.db, &body.user)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    let link = ERoleUser::find()
        .filter(
            Condition::all()
                .add(CRoleUser::Role.eq(role.id))
                .add(CRoleUser::User.eq(target.id)),
        )
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::BadRequest("User not in role".to_string()))?;

    link.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "User removed from role".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_role_groups(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(role): Path<String>,
    Json(body): Json<RoleGroupRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let role = get_role_by_name(&state.db, &role)
        .await?
        .ok_or_else(|| WebError::not_found("Role"))?;

    let group = get_group_by_name(&state.db, &body.group)
        .await?
        .ok_or_else(|| WebError::not_found("Group"))?;

    let link = ERoleGroup::find()
        .filter(
            Condition::all()
                .add(CRoleGroup::Role.eq(role.id))
                .add(CRoleGroup::Group.eq(group.id)),
        )
        .one(&state.db)
        .await?;

    if link.is_some() {
        return Err(WebError::already_exists("Role membership"));
    }

    let link = ARoleGroup {
        id: Set(Uuid::new_v4()),
        role: Set(role.id),
        group: Set(group.id),
    };

    link.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Group added to role".to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_role_groups(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(role): Path<String>,
    Json(body): Json<RoleGroupRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let role = get_role_by_name(&state.db, &role)
        .await?
        .ok_or_else(|| WebError::not_found("Role"))?;

    let group = get_group_by_name(&state.db, &body.group)
        .await?
        .ok_or_else(|| WebError::not_found("Group"))?;

    let link = ERoleGroup::find()
        .filter(
            Condition::all()
                .add(CRoleGroup::Role.eq(role.id))
                .add(CRoleGroup::Group.eq(group.id)),
        )
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::BadRequest("Group not in role".to_string()))?;

    link.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Group removed from role".to_string(),
    };

    Ok(Json(res))
}
