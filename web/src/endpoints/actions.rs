/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use axum::{Extension, Json};
use chrono::Utc;
use core::consts::{
    DEFAULT_CHANGE_REASON, LIST_PAGE_SIZE, MAX_PAGE_SIZE, SEARCH_RESULT_LIMIT, VERSION_LIST_LIMIT,
};
use core::database::get_action_by_name;
use core::history::{save_payload, VersionEntry};
use core::input::{validate_action_name, validate_description};
use core::membership::{
    can_access_action, is_action_manager, list_all_visible, list_mine_active, MembershipScope,
};
use core::payload::{PayloadInput, PayloadView};
use core::storage::FileStore;
use core::types::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::{image_response, read_image_upload};

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeActionRequest {
    pub name: String,
    pub description: String,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
    pub payload: PayloadInput,
    pub users: Option<Vec<String>>,
    pub groups: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
    pub change_reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchActionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
    pub payload: Option<PayloadInput>,
    pub users: Option<Vec<String>>,
    pub groups: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
    pub change_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ListQuery {
    pub limit: Option<u64>,
}

#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub limit: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SearchResponse {
    pub users: ListResponse,
    pub groups: ListResponse,
    pub roles: ListResponse,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ActionResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub is_public: bool,
    pub has_thumbnail: bool,
    pub payload: PayloadView,
}

async fn require_action_manager(state: &ServerState, user: &MUser) -> WebResult<()> {
    if !is_action_manager(&state.db, state.cli.admin_group.as_deref(), user).await? {
        return Err(WebError::insufficient_permissions());
    }

    Ok(())
}

async fn resolve_user_ids(state: &ServerState, names: &[String]) -> WebResult<Vec<Uuid>> {
    let users = EUser::find()
        .filter(CUser::Username.is_in(names.to_vec()))
        .all(&state.db)
        .await?;

    if users.len() != names.len() {
        return Err(WebError::not_found("User"));
    }

    Ok(users.into_iter().map(|u| u.id).collect())
}

async fn resolve_group_ids(state: &ServerState, names: &[String]) -> WebResult<Vec<Uuid>> {
    let groups = EGroup::find()
        .filter(CGroup::Name.is_in(names.to_vec()))
        .all(&state.db)
        .await?;

    if groups.len() != names.len() {
        return Err(WebError::not_found("Group"));
    }

    Ok(groups.into_iter().map(|g| g.id).collect())
}

async fn resolve_role_ids(state: &ServerState, names: &[String]) -> WebResult<Vec<Uuid>> {
    let roles = ERole::find()
        .filter(CRole::Name.is_in(names.to_vec()))
        .all(&state.db)
        .await?;

    if roles.len() != names.len() {
        return Err(WebError::not_found("Role"));
    }

    Ok(roles.into_iter().map(|r| r.id).collect())
}

async fn insert_links<C: ConnectionTrait>(
    db: &C,
    action: Uuid,
    users: &[Uuid],
    groups: &[Uuid],
    roles: &[Uuid],
) -> Result<(), sea_orm::DbErr> {
    for user in users {
        AActionUser {
            id: Set(Uuid::new_v4()),
            action: Set(action),
            user: Set(*user),
        }
        .insert(db)
        .await?;
    }

    for group in groups {
        AActionGroup {
            id: Set(Uuid::new_v4()),
            action: Set(action),
            group: Set(*group),
        }
        .insert(db)
        .await?;
    }

    for role in roles {
        AActionRole {
            id: Set(Uuid::new_v4()),
            action: Set(action),
            role: Set(*role),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Query(params): Query<ListQuery>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    let limit = params.limit.unwrap_or(LIST_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let actions = if is_action_manager(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        EAction::find()
            .order_by_asc(CAction::Name)
            .limit(limit)
            .all(&state.db)
            .await?
    } else {
        let scope = MembershipScope::load(&state.db, &user).await?;
        let mut visible = list_all_visible(&state.db, &scope).await?;
        visible.truncate(limit as usize);
        visible
    };

    let actions: ListResponse = actions
        .iter()
        .map(|a| ListItem {
            id: a.id,
            name: a.name.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: actions,
    };

    Ok(Json(res))
}

pub async fn get_mine(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    let scope = MembershipScope::load(&state.db, &user).await?;
    let actions = list_mine_active(&state.db, &scope).await?;

    let actions: ListResponse = actions
        .iter()
        .map(|a| ListItem {
            id: a.id,
            name: a.name.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: actions,
    };

    Ok(Json(res))
}

pub async fn search(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Query(params): Query<SearchQuery>,
) -> WebResult<Json<BaseResponse<SearchResponse>>> {
    require_action_manager(&state, &user).await?;

    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| WebError::BadRequest("query param is required".to_string()))?;

    let limit = params.limit.unwrap_or(SEARCH_RESULT_LIMIT).min(MAX_PAGE_SIZE);

    // Every term must match, each against any of the entity's text fields.
    let mut user_filter = Condition::all();
    let mut group_filter = Condition::all();
    let mut role_filter = Condition::all();

    for term in query.split_whitespace() {
        user_filter = user_filter.add(
            Condition::any()
                .add(CUser::Username.contains(term))
                .add(CUser::Name.contains(term))
                .add(CUser::Email.contains(term)),
        );
        group_filter = group_filter.add(CGroup::Name.contains(term));
        role_filter = role_filter.add(
            Condition::any()
                .add(CRole::Name.contains(term))
                .add(CRole::Description.contains(term)),
        );
    }

    let users: ListResponse = EUser::find()
        .filter(user_filter)
        .order_by_asc(CUser::Username)
        .limit(limit)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|u| ListItem {
            id: u.id,
            name: u.username,
        })
        .collect();

    let groups: ListResponse = EGroup::find()
        .filter(group_filter)
        .order_by_asc(CGroup::Name)
        .limit(limit)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|g| ListItem {
            id: g.id,
            name: g.name,
        })
        .collect();

    let roles: ListResponse = ERole::find()
        .filter(role_filter)
        .order_by_asc(CRole::Name)
        .limit(limit)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|r| ListItem {
            id: r.id,
            name: r.name,
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: SearchResponse {
            users,
            groups,
            roles,
        },
    };

    Ok(Json(res))
}

pub async fn put(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<MakeActionRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    validate_action_name(&body.name).map_err(WebError::Validation)?;
    validate_description(&body.description).map_err(WebError::Validation)?;
    body.payload.validate().map_err(WebError::Validation)?;

    if get_action_by_name(&state.db, &body.name).await?.is_some() {
        return Err(WebError::already_exists("Action"));
    }

    let users = match &body.users {
        Some(names) => resolve_user_ids(&state, names).await?,
        None => Vec::new(),
    };
    let groups = match &body.groups {
        Some(names) => resolve_group_ids(&state, names).await?,
        None => Vec::new(),
    };
    let roles = match &body.roles {
        Some(names) => resolve_role_ids(&state, names).await?,
        None => Vec::new(),
    };

    let snapshot = body.payload.snapshot();
    let now = Utc::now().naive_utc();
    let reason = body
        .change_reason
        .clone()
        .unwrap_or_else(|| "created".to_string());

    let txn = state
        .db
        .begin()
        .await
        .map_err(WebError::Database)?;

    let data = AActionData {
        id: Set(Uuid::new_v4()),
        kind: Set(body.payload.kind()),
        code: Set(snapshot.code.clone()),
        url: Set(snapshot.url.clone()),
        updated_at: Set(now),
    };

    let data = data.insert(&txn).await?;

    let version = AActionDataVersion {
        id: Set(Uuid::new_v4()),
        data: Set(data.id),
        position: Set(1),
        code: Set(snapshot.code),
        url: Set(snapshot.url),
        changed_at: Set(now),
        edited_by: Set(Some(user.id)),
        change_reason: Set(Some(reason)),
    };

    version.insert(&txn).await?;

    let action = AAction {
        id: Set(Uuid::new_v4()),
        name: Set(body.name.clone()),
        description: Set(body.description.clone()),
        is_active: Set(body.is_active.unwrap_or(false)),
        is_public: Set(body.is_public.unwrap_or(false)),
        thumbnail: Set(None),
        data: Set(data.id),
        created_by: Set(Some(user.id)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let action = action.insert(&txn).await?;

    insert_links(&txn, action.id, &users, &groups, &roles).await?;

    txn.commit().await.map_err(WebError::Database)?;

    let res = BaseResponse {
        error: false,
        message: action.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn get_action(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(action): Path<String>,
) -> WebResult<Json<BaseResponse<ActionResponse>>> {
    let action = get_action_by_name(&state.db, &action)
        .await?
        .ok_or_else(|| WebError::not_found("Action"))?;

    if !is_action_manager(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        if !action.is_active || !can_access_action(&state.db, &user, &action).await? {
            return Err(WebError::not_found("Action"));
        }
    }

    let data = EActionData::find_by_id(action.data)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Action payload"))?;

    let res = BaseResponse {
        error: false,
        message: ActionResponse {
            id: action.id,
            name: action.name,
            description: action.description,
            is_active: action.is_active,
            is_public: action.is_public,
            has_thumbnail: action.thumbnail.is_some(),
            payload: PayloadView::from_fields(data.kind, data.code, data.url),
        },
    };

    Ok(Json(res))
}

pub async fn patch_action(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(action): Path<String>,
    Json(body): Json<PatchActionRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let action = get_action_by_name(&state.db, &action)
        .await?
        .ok_or_else(|| WebError::not_found("Action"))?;

    let data = EActionData::find_by_id(action.data)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Action payload"))?;

    // The payload type is fixed at creation.
    if let Some(payload) = &body.payload {
        if payload.kind() != data.kind {
            return Err(WebError::payload_kind_immutable());
        }

        payload.validate().map_err(WebError::Validation)?;
    }

    if let Some(name) = &body.name {
        validate_action_name(name).map_err(WebError::Validation)?;

        if name != &action.name && get_action_by_name(&state.db, name).await?.is_some() {
            return Err(WebError::already_exists("Action"));
        }
    }

    if let Some(description) = &body.description {
        validate_description(description).map_err(WebError::Validation)?;
    }

    let users = match &body.users {
        Some(names) => Some(resolve_user_ids(&state, names).await?),
        None => None,
    };
    let groups = match &body.groups {
        Some(names) => Some(resolve_group_ids(&state, names).await?),
        None => None,
    };
    let roles = match &body.roles {
        Some(names) => Some(resolve_role_ids(&state, names).await?),
        None => None,
    };

    let action_id = action.id;
    let data_id = action.data;

    let txn = state
        .db
        .begin()
        .await
        .map_err(WebError::Database)?;

    let mut aaction: AAction = action.into();

    if let Some(name) = body.name {
        aaction.name = Set(name);
    }

    if let Some(description) = body.description {
        aaction.description = Set(description);
    }

    if let Some(is_active) = body.is_active {
        aaction.is_active = Set(is_active);
    }

    if let Some(is_public) = body.is_public {
        aaction.is_public = Set(is_public);
    }

    aaction.updated_at = Set(Utc::now().naive_utc());
    aaction.update(&txn).await?;

    if let Some(users) = users {
        EActionUser::delete_many()
            .filter(CActionUser::Action.eq(action_id))
            .exec(&txn)
            .await?;

        insert_links(&txn, action_id, &users, &[], &[]).await?;
    }

    if let Some(groups) = groups {
        EActionGroup::delete_many()
            .filter(CActionGroup::Action.eq(action_id))
            .exec(&txn)
            .await?;

        insert_links(&txn, action_id, &[], &groups, &[]).await?;
    }

    if let Some(roles) = roles {
        EActionRole::delete_many()
            .filter(CActionRole::Action.eq(action_id))
            .exec(&txn)
            .await?;

        insert_links(&txn, action_id, &[], &[], &roles).await?;
    }

    if let Some(payload) = body.payload {
        let reason = body
            .change_reason
            .unwrap_or_else(|| DEFAULT_CHANGE_REASON.to_string());

        save_payload(
            &txn,
            data_id,
            payload.snapshot(),
            Some(user.id),
            Some(reason),
        )
        .await?;
    }

    txn.commit().await.map_err(WebError::Database)?;

    let res = BaseResponse {
        error: false,
        message: action_id.to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_action(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(action): Path<String>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let action = get_action_by_name(&state.db, &action)
        .await?
        .ok_or_else(|| WebError::not_found("Action"))?;

    let thumbnail = action.thumbnail.clone();
    let data_id = action.data;
    let action_id = action.id;

    let txn = state
        .db
        .begin()
        .await
        .map_err(WebError::Database)?;

    // Link rows cascade from the action; version rows cascade from the
    // payload row.
    EAction::delete_by_id(action_id).exec(&txn).await?;
    EActionData::delete_by_id(data_id).exec(&txn).await?;

    txn.commit().await.map_err(WebError::Database)?;

    if let Some(thumbnail) = thumbnail {
        state.files.delete(&thumbnail).await?;
    }

    let res = BaseResponse {
        error: false,
        message: "Action deleted".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_action_versions(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(action): Path<String>,
) -> WebResult<Json<BaseResponse<Vec<VersionEntry>>>> {
    require_action_manager(&state, &user).await?;

    let action = get_action_by_name(&state.db, &action)
        .await?
        .ok_or_else(|| WebError::not_found("Action"))?;

    let versions = core::history::list_versions(&state.db, action.data, VERSION_LIST_LIMIT).await?;

    let res = BaseResponse {
        error: false,
        message: versions,
    };

    Ok(Json(res))
}

pub async fn post_action_thumbnail(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(action): Path<String>,
    multipart: Multipart,
) -> WebResult<Json<BaseResponse<String>>> {
    require_action_manager(&state, &user).await?;

    let action = get_action_by_name(&state.db, &action)
        .await?
        .ok_or_else(|| WebError::not_found("Action"))?;

    let (extension, bytes) = read_image_upload(multipart, state.cli.max_upload_bytes).await?;

    let name = FileStore::thumbnail_name(action.id, &format!("{}.{}", Uuid::new_v4(), extension));
    state.files.save(&name, &bytes).await?;

    if let Some(old) = &action.thumbnail {
        state.files.delete(old).await?;
    }

    let mut aaction: AAction = action.into();
    aaction.thumbnail = Set(Some(name));
    aaction.updated_at = Set(Utc::now().naive_utc());
    aaction.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Thumbnail updated".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_action_thumbnail(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(action): Path<String>,
) -> WebResult<Response> {
    let action = get_action_by_name(&state.db, &action)
        .await?
        .ok_or_else(|| WebError::not_found("Action"))?;

    if !is_action_manager(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        if !action.is_active || !can_access_action(&state.db, &user, &action).await? {
            return Err(WebError::not_found("Action"));
        }
    }

    let name = action
        .thumbnail
        .as_ref()
        .ok_or_else(|| WebError::not_found("Thumbnail"))?;

    let bytes = state
        .files
        .read(name)
        .await
        .map_err(|_| WebError::not_found("Thumbnail"))?;

    Ok(image_response(name, bytes))
}
