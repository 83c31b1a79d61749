/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::auth::{encode_jwt, oidc_login_create, oidc_login_verify, update_last_login};
use crate::error::{WebError, WebResult};
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use core::input::{validate_email, validate_password, validate_username};
use core::types::*;
use entity::user::SystemRole;
use password_auth::{generate_hash, verify_password};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeLoginRequest {
    pub loginname: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeUserRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn post_register(
    state: State<Arc<ServerState>>,
    Json(body): Json<MakeUserRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    if state.cli.oidc_required || state.cli.disable_registration {
        return Err(WebError::registration_disabled());
    }

    validate_username(&body.username).map_err(WebError::Validation)?;
    validate_email(&body.email).map_err(WebError::Validation)?;
    validate_password(&body.password).map_err(WebError::Validation)?;

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

    let user = AUser {
        id: Set(Uuid::new_v4()),
        username: Set(body.username.clone()),
        name: Set(body.name.clone()),
        email: Set(body.email.clone()),
        password: Set(Some(generate_hash(body.password.clone()))),
        system_role: Set(SystemRole::User),
        is_active: Set(true),
        profile_picture: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        last_login_at: Set(now),
    };

    let user = user.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: user.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn post_login(
    state: State<Arc<ServerState>>,
    Json(body): Json<MakeLoginRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    if state.cli.oidc_required {
        return Err(WebError::oidc_required());
    }

    let user = EUser::find()
        .filter(
            Condition::any()
                .add(CUser::Username.eq(body.loginname.clone()))
                .add(CUser::Email.eq(body.loginname.clone())),
        )
        .one(&state.db)
        .await?
        .ok_or_else(WebError::invalid_credentials)?;

    if !user.is_active {
        return Err(WebError::account_disabled());
    }

    let user_password = user.password.clone().ok_or_else(WebError::oidc_required)?;

    verify_password(body.password, &user_password)
        .map_err(|_| WebError::invalid_credentials())?;

    let token = encode_jwt(&state, user.id).map_err(|_| WebError::failed_to_generate_token())?;

    update_last_login(&state, user).await?;

    let res = BaseResponse {
        error: false,
        message: token,
    };

    Ok(Json(res))
}

pub async fn post_logout(
    _state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<String>>> {
    // Tokens are stateless; expiry is the only revocation.
    let res = BaseResponse {
        error: false,
        message: "Logout Successfully".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_oidc_login(
    state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<String>>> {
    if !state.cli.oidc_enabled {
        return Err(WebError::oidc_disabled());
    }

    let authorize_url = oidc_login_create(&state)
        .await
        .map_err(|e| WebError::Authentication(e.to_string()))?;

    let res = BaseResponse {
        error: false,
        message: authorize_url.to_string(),
    };

    Ok(Json(res))
}

pub async fn post_oidc_callback(
    state: State<Arc<ServerState>>,
    Query(query): Query<HashMap<String, String>>,
) -> WebResult<Json<BaseResponse<String>>> {
    let code = query
        .get("code")
        .ok_or_else(|| WebError::BadRequest("Invalid OIDC Code".to_string()))?;

    let user: MUser = oidc_login_verify(&state, code.to_string())
        .await
        .map_err(|e| WebError::Authentication(e.to_string()))?;

    if !user.is_active {
        return Err(WebError::account_disabled());
    }

    let token = encode_jwt(&state, user.id).map_err(|_| WebError::failed_to_generate_token())?;

    update_last_login(&state, user).await?;

    let res = BaseResponse {
        error: false,
        message: token,
    };

    Ok(Json(res))
}
