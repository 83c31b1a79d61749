/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use core::database::{get_group_by_name, get_user_by_username};
use core::input::validate_display_name;
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
pub struct MakeGroupRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchGroupRequest {
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GroupMemberRequest {
    pub user: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GroupResponse {
    pub id: Uuid,
    pub name: String,
    pub managed: bool,
    pub users: ListResponse,
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

    let groups = EGroup::find()
        .order_by_asc(CGroup::Name)
        .all(&state.db)
        .await?;

    let groups: ListResponse = groups
        .iter()
        .map(|g| ListItem {
            id: g.id,
            name: g.name.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: groups,
    };

    Ok(Json(res))
}

pub async fn put(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<MakeGroupRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    validate_display_name(&body.name).map_err(WebError::Validation)?;

    if get_group_by_name(&state.db, &body.name).await?.is_some() {
        return Err(WebError::already_exists("Group"));
    }

    let group = AGroup {
        id: Set(Uuid::new_v4()),
        name: Set(body.name.clone()),
        external_id: Set(None),
        created_at: Set(Utc::now().naive_utc()),
    };

    let group = group.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: group.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn get_group(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(group): Path<String>,
) -> WebResult<Json<BaseResponse<GroupResponse>>> {
    require_user_manager(&state, &user).await?;

    let group = get_group_by_name(&state.db, &group)
        .await?
        .ok_or_else(|| WebError::not_found("Group"))?;

    let memberships = EUserGroup::find()
        .filter(CUserGroup::Group.eq(group.id))
        .all(&state.db)
        .await?;

    let member_ids: Vec<Uuid> = memberships.iter().map(|m| m.user).collect();

    let users: ListResponse = if member_ids.is_empty() {
        Vec::new()
    } else {
        EUser::find()
            .filter(CUser::Id.is_in(member_ids))
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

    let res = BaseResponse {
        error: false,
        message: GroupResponse {
            id: group.id,
            name: group.name,
            managed: group.external_id.is_some(),
            users,
        },
    };

    Ok(Json(res))
}

pub async fn patch_group(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(group): Path<String>,
    Json(body): Json<PatchGroupRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let group = get_group_by_name(&state.db, &group)
        .await?
        .ok_or_else(|| WebError::not_found("Group"))?;

    if group.external_id.is_some() {
        return Err(WebError::Conflict(
            "Group is externally managed".to_string(),
        ));
    }

    let mut agroup: AGroup = group.into();

    if let Some(name) = body.name {
        validate_display_name(&name).map_err(WebError::Validation)?;

        if get_group_by_name(&state.db, &name).await?.is_some() {
            return Err(WebError::already_exists("Group"));
        }

        agroup.name = Set(name);
    }

    let group = agroup.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: group.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_group(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(group): Path<String>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let group = get_group_by_name(&state.db, &group)
        .await?
        .ok_or_else(|| WebError::not_found("Group"))?;

    group.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Group deleted".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_group_users(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(group): Path<String>,
    Json(body): Json<GroupMemberRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let group = get_group_by_name(&state.db, &group)
        .await?
        .ok_or_else(|| WebError::not_found("Group"))?;

    let target = get_user_by_username(&state.db, &body.user)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    let membership = EUserGroup::find()
        .filter(
            Condition::all()
                .add(CUserGroup::Group.eq(group.id))
                .add(CUserGroup::User.eq(target.id)),
        )
        .one(&state.db)
        .await?;

    if membership.is_some() {
        return Err(WebError::already_exists("Group membership"));
    }

    let membership = AUserGroup {
        id: Set(Uuid::new_v4()),
        user: Set(target.id),
        group: Set(group.id),
    };

    membership.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "User added to group".to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_group_users(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(group): Path<String>,
    Json(body): Json<GroupMemberRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_user_manager(&state, &user).await?;

    let group = get_group_by_name(&state.db, &group)
        .await?
        .ok_or_else(|| WebError::not_found("Group"))?;

    let target = get_user_by_username(&state.db, &body.user)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    let membership = EUserGroup::find()
        .filter(
            Condition::all()
                .add(CUserGroup::Group.eq(group.id))
                .add(CUserGroup::User.eq(target.id)),
        )
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::BadRequest("User not in group".to_string()))?;

    membership.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "User removed from group".to_string(),
    };

    Ok(Json(res))
}
