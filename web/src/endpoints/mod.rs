/*
* SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
*
* SPDX-License-Identifier: AGPL-3.0-only
*/

pub mod actions;
pub mod auth;
pub mod groups;
pub mod roles;
pub mod system;
pub mod users;
pub mod workspaces;

use crate::error::{WebError, WebResult};
use axum::extract::{Json, Multipart};
use axum::response::{IntoResponse, Response};
use core::input::validate_image_filename;
use core::types::BaseResponse;

/// Pulls the first file field out of a multipart upload and returns its
/// lowercased extension and bytes. Non-file fields are skipped.
pub(crate) async fn read_image_upload(
    mut multipart: Multipart,
    max_bytes: usize,
) -> WebResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(format!("Invalid upload: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|f| f.to_string()) else {
            continue;
        };

        validate_image_filename(&filename).map_err(WebError::Validation)?;

        let extension = filename
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| WebError::BadRequest(format!("Invalid upload: {}", e)))?;

        if bytes.len() > max_bytes {
            return Err(WebError::upload_too_large());
        }

        if bytes.is_empty() {
            return Err(WebError::BadRequest("Uploaded file is empty".to_string()));
        }

        return Ok((extension, bytes.to_vec()));
    }

    Err(WebError::BadRequest("No file in upload".to_string()))
}

pub(crate) fn image_content_type(name: &str) -> &'static str {
    if name.to_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

pub(crate) fn image_response(name: &str, bytes: Vec<u8>) -> Response {
    (
        [(axum::http::header::CONTENT_TYPE, image_content_type(name))],
        bytes,
    )
        .into_response()
}

pub async fn handle_404() -> WebError {
    WebError::NotFound("Not Found".to_string())
}

pub async fn get_health() -> WebResult<Json<BaseResponse<String>>> {
    let res = BaseResponse {
        error: false,
        message: "200 ALIVE".to_string(),
    };

    Ok(Json(res))
}
