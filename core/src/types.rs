/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::input::{greater_than_zero, port_in_range};
use super::storage::FileStore;
use clap::Parser;
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "Jumper", display_name = "Jumper", bin_name = "jumper-server", author = "Wavelens", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "JUMPER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "JUMPER_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "JUMPER_PORT", value_parser = port_in_range, default_value_t = 3000)]
    pub port: u16,
    #[arg(long, env = "JUMPER_SERVE_URL", default_value = "http://127.0.0.1:8000")]
    pub serve_url: String,
    #[arg(long, env = "JUMPER_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "JUMPER_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "JUMPER_JWT_SECRET_FILE")]
    pub jwt_secret_file: String,
    #[arg(long, env = "JUMPER_FILE_STORE_PATH", default_value = "./files")]
    pub file_store_path: String,
    #[arg(long, env = "JUMPER_MAX_UPLOAD_BYTES", value_parser = greater_than_zero::<usize>, default_value = "5242880")]
    pub max_upload_bytes: usize,
    #[arg(long, env = "JUMPER_DISABLE_REGISTRATION", default_value = "false")]
    pub disable_registration: bool,
    #[arg(long, env = "JUMPER_ADMIN_GROUP")]
    pub admin_group: Option<String>,
    #[arg(long, env = "JUMPER_INITIAL_ADMIN_EMAIL")]
    pub initial_admin_email: Option<String>,
    #[arg(long, env = "JUMPER_INITIAL_ADMIN_PASSWORD_FILE")]
    pub initial_admin_password_file: Option<String>,
    #[arg(long, env = "JUMPER_OIDC_ENABLED", default_value = "false")]
    pub oidc_enabled: bool,
    #[arg(long, env = "JUMPER_OIDC_REQUIRED", default_value = "false")]
    pub oidc_required: bool,
    #[arg(long, env = "JUMPER_OIDC_CLIENT_ID")]
    pub oidc_client_id: Option<String>,
    #[arg(long, env = "JUMPER_OIDC_CLIENT_SECRET_FILE")]
    pub oidc_client_secret_file: Option<String>,
    #[arg(long, env = "JUMPER_OIDC_SCOPES")]
    pub oidc_scopes: Option<String>,
    #[arg(long, env = "JUMPER_OIDC_DISCOVERY_URL")]
    pub oidc_discovery_url: Option<String>,
    #[arg(long, env = "JUMPER_REPORT_ERRORS", default_value = "false")]
    pub report_errors: bool,
}

#[derive(Debug)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub files: FileStore,
    pub cli: Cli,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    pub id: Uuid,
    pub name: String,
}

pub type ListResponse = Vec<ListItem>;

pub type EAction = action::Entity;
pub type EActionData = action_data::Entity;
pub type EActionDataVersion = action_data_version::Entity;
pub type EActionGroup = action_group::Entity;
pub type EActionRole = action_role::Entity;
pub type EActionUser = action_user::Entity;
pub type EGroup = group::Entity;
pub type ERole = role::Entity;
pub type ERoleGroup = role_group::Entity;
pub type ERoleUser = role_user::Entity;
pub type ESystemInfo = system_info::Entity;
pub type EUser = user::Entity;
pub type EUserGroup = user_group::Entity;
pub type EUserPreferences = user_preferences::Entity;
pub type EWorkspace = workspace::Entity;
pub type EWorkspaceGroup = workspace_group::Entity;
pub type EWorkspaceRole = workspace_role::Entity;
pub type EWorkspaceUser = workspace_user::Entity;

pub type MAction = action::Model;
pub type MActionData = action_data::Model;
pub type MActionDataVersion = action_data_version::Model;
pub type MActionGroup = action_group::Model;
pub type MActionRole = action_role::Model;
pub type MActionUser = action_user::Model;
pub type MGroup = group::Model;
pub type MRole = role::Model;
pub type MRoleGroup = role_group::Model;
pub type MRoleUser = role_user::Model;
pub type MSystemInfo = system_info::Model;
pub type MUser = user::Model;
pub type MUserGroup = user_group::Model;
pub type MUserPreferences = user_preferences::Model;
pub type MWorkspace = workspace::Model;
pub type MWorkspaceGroup = workspace_group::Model;
pub type MWorkspaceRole = workspace_role::Model;
pub type MWorkspaceUser = workspace_user::Model;

pub type AAction = action::ActiveModel;
pub type AActionData = action_data::ActiveModel;
pub type AActionDataVersion = action_data_version::ActiveModel;
pub type AActionGroup = action_group::ActiveModel;
pub type AActionRole = action_role::ActiveModel;
pub type AActionUser = action_user::ActiveModel;
pub type AGroup = group::ActiveModel;
pub type ARole = role::ActiveModel;
pub type ARoleGroup = role_group::ActiveModel;
pub type ARoleUser = role_user::ActiveModel;
pub type ASystemInfo = system_info::ActiveModel;
pub type AUser = user::ActiveModel;
pub type AUserGroup = user_group::ActiveModel;
pub type AUserPreferences = user_preferences::ActiveModel;
pub type AWorkspace = workspace::ActiveModel;
pub type AWorkspaceGroup = workspace_group::ActiveModel;
pub type AWorkspaceRole = workspace_role::ActiveModel;
pub type AWorkspaceUser = workspace_user::ActiveModel;

pub type CAction = action::Column;
pub type CActionData = action_data::Column;
pub type CActionDataVersion = action_data_version::Column;
pub type CActionGroup = action_group::Column;
pub type CActionRole = action_role::Column;
pub type CActionUser = action_user::Column;
pub type CGroup = group::Column;
pub type CRole = role::Column;
pub type CRoleGroup = role_group::Column;
pub type CRoleUser = role_user::Column;
pub type CSystemInfo = system_info::Column;
pub type CUser = user::Column;
pub type CUserGroup = user_group::Column;
pub type CUserPreferences = user_preferences::Column;
pub type CWorkspace = workspace::Column;
pub type CWorkspaceGroup = workspace_group::Column;
pub type CWorkspaceRole = workspace_role::Column;
pub type CWorkspaceUser = workspace_user::Column;
