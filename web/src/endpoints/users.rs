/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::{Extension, Json};
use chrono::Utc;
use core::database::{get_or_create_preferences, get_user_by_username};
use core::input::{validate_email, validate_password, validate_username};
use core::membership::{is_admin, is_last_admin, is_user_manager};
use core::storage::FileStore;
use core::types::*;
use entity::user::SystemRole;
use password_auth::generate_hash;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::{image_response, read_image_upload};

#[derive(Serialize, Deserialize, Debug)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub system_role: String,
    pub is_active: bool,
    pub has_profile_picture: bool,
}

impl From<&MUser> for UserResponse {
    fn from(user: &MUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            system_role: user.system_role.tag().to_string(),
            is_active: user.is_active,
            has_profile_picture: user.profile_picture.is_some(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchSelfRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeManagedUserRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub system_role: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub system_role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PreferencesResponse {
    pub disable_default_background: bool,
    pub has_background_image: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchPreferencesRequest {
    pub disable_default_background: Option<bool>,
}

pub async fn get(
    _state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<UserResponse>>> {
    let res = BaseResponse {
        error: false,
        message: UserResponse::from(&user),
    };

    Ok(Json(res))
}

pub async fn patch(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<PatchSelfRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    let mut auser: AUser = user.clone().into();

    if let Some(name) = body.name {
        auser.name = Set(name);
    }

    if let Some(email) = body.email {
        validate_email(&email).map_err(WebError::Validation)?;

        let existing = EUser::find()
            .filter(
                Condition::all()
                    .add(CUser::Email.eq(email.clone()))
                    .add(CUser::Id.ne(user.id)),
            )
            .one(&state.db)
            .await?;

        if existing.is_some() {
            return Err(WebError::already_exists("Email"));
        }

        auser.email = Set(email);
    }

    if let Some(password) = body.password {
        validate_password(&password).map_err(WebError::Validation)?;
        auser.password = Set(Some(generate_hash(password)));
    }

    auser.updated_at = Set(Utc::now().naive_utc());
    let user = auser.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: user.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn post_picture(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    multipart: Multipart,
) -> WebResult<Json<BaseResponse<String>>> {
    let (extension, bytes) = read_image_upload(multipart, state.cli.max_upload_bytes).await?;

    let name = FileStore::profile_picture_name(&extension);
    state.files.save(&name, &bytes).await?;

    if let Some(old) = &user.profile_picture {
        state.files.delete(old).await?;
    }

    let mut auser: AUser = user.into();
    auser.profile_picture = Set(Some(name));
    auser.updated_at = Set(Utc::now().naive_utc());
    auser.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Profile picture updated".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_picture(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Response> {
    let name = user
        .profile_picture
        .as_ref()
        .ok_or_else(|| WebError::not_found("Profile picture"))?;

    let bytes = state
        .files
        .read(name)
        .await
        .map_err(|_| WebError::not_found("Profile picture"))?;

    Ok(image_response(name, bytes))
}

pub async fn delete_picture(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<String>>> {
    if let Some(old) = &user.profile_picture {
        state.files.delete(old).await?;
    }

    let mut auser: AUser = user.into();
    auser.profile_picture = Set(None);
    auser.updated_at = Set(Utc::now().naive_utc());
    auser.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Profile picture removed".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_preferences(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<PreferencesResponse>>> {
    let preferences = get_or_create_preferences(&state.db, user.id).await?;

    let res = BaseResponse {
        error: false,
        message: PreferencesResponse {
            disable_default_background: preferences.disable_default_background,
            has_background_image: preferences.background_image.is_some(),
        },
    };

    Ok(Json(res))
}

pub async fn patch_preferences(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<PatchPreferencesRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    let preferences = get_or_create_preferences(&state.db, user.id).await?;

    let mut apreferences: AUserPreferences = preferences.into();

    if let Some(disable) = body.disable_default_background {
        apreferences.disable_default_background = Set(disable);
    }

    apreferences.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Preferences updated".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_preferences_background(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    multipart: Multipart,
) -> WebResult<Json<BaseResponse<String>>> {
    let (extension, bytes) = read_image_upload(multipart, state.cli.max_upload_bytes).await?;

    let preferences = get_or_create_preferences(&state.db, user.id).await?;

    let name = FileStore::background_name(user.id, &extension);
    state.files.save(&name, &bytes).await?;

    if let Some(old) = &preferences.background_image {
        state.files.delete(old).await?;
    }

    let mut apreferences: AUserPreferences = preferences.into();
    apreferences.background_image = Set(Some(name));
    apreferences.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Background image updated".to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_preferences_background(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<String>>> {
    let preferences = get_or_create_preferences(&state.db, user.id).await?;

    if let Some(old) = &preferences.background_image {
        state.files.delete(old).await?;
    }

    let mut apreferences: AUserPreferences = preferences.into();
    apreferences.background_image = Set(None);
    apreferences.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Background image removed".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_users(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    if !is_user_manager(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        return Err(WebError::insufficient_permissions());
    }

    let users = EUser::find()
        .order_by_asc(CUser::Username)
        .all(&state.db)
        .await?;

    let users: ListResponse = users
        .iter()
        .map(|u| ListItem {
            id: u.id,
            name: u.username.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: users,
    };

    Ok(Json(res))
}

pub async fn put_users(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<MakeManagedUserRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    if !is_user_manager(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        return Err(WebError::insufficient_permissions());
    }

    validate_username(&body.username).map_err(WebError::Validation)?;
    validate_email(&body.email).map_err(WebError::Validation)?;

    let system_role = match &body.system_role {
        Some(tag) => SystemRole::from_tag(tag)
            .ok_or_else(|| WebError::BadRequest(format!("Unknown system role: {}", tag)))?,
        None => SystemRole::User,
    };

    // Only an admin may mint another admin.
    if system_role == SystemRole::Admin
        && !is_admin(&state.db, state.cli.admin_group.as_deref(), &user).await?
    {
        return Err(WebError::insufficient_permissions());
    }

    let password = match &body.password {
        Some(password) => {
            validate_password(password).map_err(WebError::Validation)?;
            Some(generate_hash(password))
        }
        None => None,
    };

    let existing = EUser::find()
        .filter(
            Condition::any()
                .add(CUser::Username.eq(body.username.clone()))
                .add(CUser::Email.eq(body.email.clone())),
        )
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(WebError::already_exists("User"));
    }

    let now = Utc::now().naive_utc();

    let new_user = AUser {
        id: Set(Uuid::new_v4()),
        username: Set(body.username.clone()),
        name: Set(body.name.clone()),
        email: Set(body.email.clone()),
        password: Set(password),
        system_role: Set(system_role),
        is_active: Set(true),
        profile_picture: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        last_login_at: Set(now),
    };

    let new_user = new_user.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: new_user.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn get_user(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(username): Path<String>,
) -> WebResult<Json<BaseResponse<UserResponse>>> {
    if !is_user_manager(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        return Err(WebError::insufficient_permissions());
    }

    let target = get_user_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    let res = BaseResponse {
        error: false,
        message: UserResponse::from(&target),
    };

    Ok(Json(res))
}

pub async fn patch_user(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(username): Path<String>,
    Json(body): Json<PatchUserRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    if !is_user_manager(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        return Err(WebError::insufficient_permissions());
    }

    let target = get_user_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    let system_role = match &body.system_role {
        Some(tag) => Some(
            SystemRole::from_tag(tag)
                .ok_or_else(|| WebError::BadRequest(format!("Unknown system role: {}", tag)))?,
        ),
        None => None,
    };

    // Granting or revoking the admin role needs admin privileges.
    if let Some(role) = system_role {
        if (role == SystemRole::Admin || target.system_role == SystemRole::Admin)
            && role != target.system_role
            && !is_admin(&state.db, state.cli.admin_group.as_deref(), &user).await?
        {
            return Err(WebError::insufficient_permissions());
        }
    }

    let downgrades_admin = system_role.is_some_and(|r| r != SystemRole::Admin)
        && target.system_role == SystemRole::Admin;
    let deactivates = body.is_active == Some(false) && target.is_active;

    if (downgrades_admin || deactivates) && is_last_admin(&state.db, &target).await? {
        return Err(WebError::last_admin());
    }

    let mut atarget: AUser = target.into();

    if let Some(name) = body.name {
        atarget.name = Set(name);
    }

    if let Some(email) = body.email {
        validate_email(&email).map_err(WebError::Validation)?;
        atarget.email = Set(email);
    }

    if let Some(role) = system_role {
        atarget.system_role = Set(role);
    }

    if let Some(is_active) = body.is_active {
        atarget.is_active = Set(is_active);
    }

    atarget.updated_at = Set(Utc::now().naive_utc());
    let target = atarget.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: target.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_user(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(username): Path<String>,
) -> WebResult<Json<BaseResponse<String>>> {
    if !is_user_manager(&state.db, state.cli.admin_group.as_deref(), &user).await? {
        return Err(WebError::insufficient_permissions());
    }

    let target = get_user_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    if is_last_admin(&state.db, &target).await? {
        return Err(WebError::last_admin());
    }

    let picture = target.profile_picture.clone();

    // Link rows cascade; version attribution degrades to null.
    target.delete(&state.db).await?;

    if let Some(picture) = picture {
        state.files.delete(&picture).await?;
    }

    let res = BaseResponse {
        error: false,
        message: "User deleted".to_string(),
    };

    Ok(Json(res))
}
