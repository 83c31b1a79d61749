/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Multipart, State};
use axum::response::Response;
use axum::{Extension, Json};
use core::database::{get_or_create_preferences, get_system_info};
use core::membership::is_admin;
use core::storage::FileStore;
use core::types::*;
use sea_orm::ActiveValue::Set;
use sea_orm::ActiveModelTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{image_response, read_image_upload};

#[derive(Serialize, Deserialize, Debug)]
pub struct SystemResponse {
    pub allow_action_workspaces: bool,
    pub has_default_background: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchSystemRequest {
    pub allow_action_workspaces: Option<bool>,
}

async fn require_admin(state: &ServerState, user: &MUser) -> WebResult<()> {
    if !is_admin(&state.db, state.cli.admin_group.as_deref(), user).await? {
        return Err(WebError::insufficient_permissions());
    }

    Ok(())
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<SystemResponse>>> {
    let info = get_system_info(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: SystemResponse {
            allow_action_workspaces: info.allow_action_workspaces,
            has_default_background: info.default_background_image.is_some(),
        },
    };

    Ok(Json(res))
}

pub async fn patch(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<PatchSystemRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_admin(&state, &user).await?;

    let info = get_system_info(&state.db).await?;

    let mut ainfo: ASystemInfo = info.into();

    if let Some(allow) = body.allow_action_workspaces {
        ainfo.allow_action_workspaces = Set(allow);
    }

    ainfo.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "System settings updated".to_string(),
    };

    Ok(Json(res))
}

/// The effective background for the calling user: their own image when set,
/// else the system default unless they opted out.
pub async fn get_background(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Response> {
    let preferences = get_or_create_preferences(&state.db, user.id).await?;

    let name = if let Some(own) = &preferences.background_image {
        own.clone()
    } else if preferences.disable_default_background {
        return Err(WebError::not_found("Background image"));
    } else {
        let info = get_system_info(&state.db).await?;

        info.default_background_image
            .ok_or_else(|| WebError::not_found("Background image"))?
    };

    let bytes = state
        .files
        .read(&name)
        .await
        .map_err(|_| WebError::not_found("Background image"))?;

    Ok(image_response(&name, bytes))
}

pub async fn put_background(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    multipart: Multipart,
) -> WebResult<Json<BaseResponse<String>>> {
    require_admin(&state, &user).await?;

    let (extension, bytes) = read_image_upload(multipart, state.cli.max_upload_bytes).await?;

    let info = get_system_info(&state.db).await?;

    let name = FileStore::default_background_name(&extension);
    state.files.save(&name, &bytes).await?;

    if let Some(old) = &info.default_background_image {
        if old != &name {
            state.files.delete(old).await?;
        }
    }

    let mut ainfo: ASystemInfo = info.into();
    ainfo.default_background_image = Set(Some(name));
    ainfo.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Default background updated".to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_background(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<String>>> {
    require_admin(&state, &user).await?;

    let info = get_system_info(&state.db).await?;

    if let Some(old) = &info.default_background_image {
        state.files.delete(old).await?;
    }

    let mut ainfo: ASystemInfo = info.into();
    ainfo.default_background_image = Set(None);
    ainfo.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Default background removed".to_string(),
    };

    Ok(Json(res))
}
