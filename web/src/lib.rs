/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod auth;
pub mod endpoints;
pub mod error;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core::types::ServerState;
use std::sync::Arc;

pub async fn serve_web(state: Arc<ServerState>) -> std::io::Result<()> {
    let server_url = format!("{}:{}", state.cli.ip, state.cli.port);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route(
            "/api/user",
            get(endpoints::users::get).patch(endpoints::users::patch),
        )
        .route(
            "/api/user/picture",
            post(endpoints::users::post_picture)
                .get(endpoints::users::get_picture)
                .delete(endpoints::users::delete_picture),
        )
        .route(
            "/api/user/preferences",
            get(endpoints::users::get_preferences).patch(endpoints::users::patch_preferences),
        )
        .route(
            "/api/user/preferences/background",
            post(endpoints::users::post_preferences_background)
                .delete(endpoints::users::delete_preferences_background),
        )
        .route(
            "/api/users",
            get(endpoints::users::get_users).put(endpoints::users::put_users),
        )
        .route(
            "/api/users/{user}",
            get(endpoints::users::get_user)
                .patch(endpoints::users::patch_user)
                .delete(endpoints::users::delete_user),
        )
        .route(
            "/api/groups",
            get(endpoints::groups::get).put(endpoints::groups::put),
        )
        .route(
            "/api/groups/{group}",
            get(endpoints::groups::get_group)
                .patch(endpoints::groups::patch_group)
                .delete(endpoints::groups::delete_group),
        )
        .route(
            "/api/groups/{group}/users",
            post(endpoints::groups::post_group_users).delete(endpoints::groups::delete_group_users),
        )
        .route(
            "/api/roles",
            get(endpoints::roles::get).put(endpoints::roles::put),
        )
        .route(
            "/api/roles/{role}",
            get(endpoints::roles::get_role)
                .patch(endpoints::roles::patch_role)
                .delete(endpoints::roles::delete_role),
        )
        .route(
            "/api/roles/{role}/users",
            post(endpoints::roles::post_role_users).delete(endpoints::roles::delete_role_users),
        )
        .route(
            "/api/roles/{role}/groups",
            post(endpoints::roles::post_role_groups).delete(endpoints::roles::delete_role_groups),
        )
        .route(
            "/api/workspaces",
            get(endpoints::workspaces::get).put(endpoints::workspaces::put),
        )
        .route(
            "/api/workspaces/{workspace}",
            get(endpoints::workspaces::get_workspace)
                .patch(endpoints::workspaces::patch_workspace)
                .delete(endpoints::workspaces::delete_workspace),
        )
        .route(
            "/api/workspaces/{workspace}/users",
            post(endpoints::workspaces::post_workspace_users)
                .delete(endpoints::workspaces::delete_workspace_users),
        )
        .route(
            "/api/workspaces/{workspace}/groups",
            post(endpoints::workspaces::post_workspace_groups)
                .delete(endpoints::workspaces::delete_workspace_groups),
        )
        .route(
            "/api/workspaces/{workspace}/roles",
            post(endpoints::workspaces::post_workspace_roles)
                .delete(endpoints::workspaces::delete_workspace_roles),
        )
        .route(
            "/api/actions",
            get(endpoints::actions::get).put(endpoints::actions::put),
        )
        .route("/api/actions/mine", get(endpoints::actions::get_mine))
        .route("/api/actions/search", get(endpoints::actions::search))
        .route(
            "/api/actions/{action}",
            get(endpoints::actions::get_action)
                .patch(endpoints::actions::patch_action)
                .delete(endpoints::actions::delete_action),
        )
        .route(
            "/api/actions/{action}/versions",
            get(endpoints::actions::get_action_versions),
        )
        .route(
            "/api/actions/{action}/thumbnail",
            post(endpoints::actions::post_action_thumbnail)
                .get(endpoints::actions::get_action_thumbnail),
        )
        .route(
            "/api/system",
            get(endpoints::system::get).patch(endpoints::system::patch),
        )
        .route(
            "/api/system/background",
            get(endpoints::system::get_background)
                .put(endpoints::system::put_background)
                .delete(endpoints::system::delete_background),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::authorize,
        ))
        .route("/api/auth/register", post(endpoints::auth::post_register))
        .route("/api/auth/login", post(endpoints::auth::post_login))
        .route("/api/auth/logout", post(endpoints::auth::post_logout))
        .route("/api/auth/oidc/login", get(endpoints::auth::get_oidc_login))
        .route(
            "/api/auth/oidc/callback",
            post(endpoints::auth::post_oidc_callback),
        )
        .route("/api/health", get(endpoints::get_health))
        .fallback(endpoints::handle_404)
        .layer(DefaultBodyLimit::max(state.cli.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    axum::serve(listener, app).await
}
