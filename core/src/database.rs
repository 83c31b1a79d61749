/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use chrono::Utc;
use migration::Migrator;
use password_auth::generate_hash;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter,
};
use sea_orm_migration::prelude::*;
use std::time::Duration;
use tracing::log::LevelFilter;
use uuid::Uuid;

use super::consts::SYSTEM_INFO_ID;
use super::input::load_secret;
use super::types::*;
use entity::user::SystemRole;

pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let db_url = if let Some(file) = &cli.database_url_file {
        std::fs::read_to_string(file).context("Failed to read database url from file")?
    } else if let Some(url) = &cli.database_url {
        url.clone()
    } else {
        anyhow::bail!("No database url provided")
    };

    let mut opt = ConnectOptions::new(db_url);

    // Only enable SQL logging at debug level
    if cli.log_level == "debug" {
        opt.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8));

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    update_db(&db, cli).await.context("Failed to update database")?;
    Ok(db)
}

async fn update_db(db: &DatabaseConnection, cli: &Cli) -> Result<()> {
    if ESystemInfo::find_by_id(SYSTEM_INFO_ID)
        .one(db)
        .await
        .context("Failed to query system info")?
        .is_none()
    {
        let asystem_info = ASystemInfo {
            id: Set(SYSTEM_INFO_ID),
            allow_action_workspaces: Set(false),
            default_background_image: Set(None),
        };

        asystem_info
            .insert(db)
            .await
            .context("Failed to seed system info")?;
    }

    let admins = EUser::find()
        .filter(
            Condition::all()
                .add(CUser::SystemRole.eq(SystemRole::Admin))
                .add(CUser::IsActive.eq(true)),
        )
        .count(db)
        .await
        .context("Failed to count admin users")?;

    if admins == 0 {
        if let (Some(email), Some(password_file)) =
            (&cli.initial_admin_email, &cli.initial_admin_password_file)
        {
            let now = Utc::now().naive_utc();

            let aadmin = AUser {
                id: Set(Uuid::new_v4()),
                username: Set("admin".to_string()),
                name: Set("Administrator".to_string()),
                email: Set(email.clone()),
                password: Set(Some(generate_hash(load_secret(password_file)))),
                system_role: Set(SystemRole::Admin),
                is_active: Set(true),
                profile_picture: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                last_login_at: Set(now),
            };

            aadmin
                .insert(db)
                .await
                .context("Failed to create initial admin user")?;

            tracing::info!("Created initial admin user {}", email);
        } else {
            tracing::warn!("No active admin user exists and no initial admin configured");
        }
    }

    Ok(())
}

/// The single system flags row. Handlers load it here, at one well-defined
/// point, instead of holding a cached global.
pub async fn get_system_info(db: &DatabaseConnection) -> Result<MSystemInfo> {
    ESystemInfo::find_by_id(SYSTEM_INFO_ID)
        .one(db)
        .await
        .context("Failed to query system info")?
        .context("System info row missing")
}

pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<MUser>> {
    EUser::find()
        .filter(CUser::Username.eq(username))
        .one(db)
        .await
        .context("Failed to query user")
}

pub async fn get_group_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<MGroup>> {
    EGroup::find()
        .filter(CGroup::Name.eq(name))
        .one(db)
        .await
        .context("Failed to query group")
}

pub async fn get_role_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<MRole>> {
    ERole::find()
        .filter(CRole::Name.eq(name))
        .one(db)
        .await
        .context("Failed to query role")
}

pub async fn get_action_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<MAction>> {
    EAction::find()
        .filter(CAction::Name.eq(name))
        .one(db)
        .await
        .context("Failed to query action")
}

pub async fn get_workspace_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<MWorkspace>> {
    EWorkspace::find()
        .filter(CWorkspace::Name.eq(name))
        .one(db)
        .await
        .context("Failed to query workspace")
}

/// Preferences are created lazily on first access.
pub async fn get_or_create_preferences(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<MUserPreferences> {
    if let Some(preferences) = EUserPreferences::find()
        .filter(CUserPreferences::User.eq(user_id))
        .one(db)
        .await
        .context("Failed to query user preferences")?
    {
        return Ok(preferences);
    }

    let apreferences = AUserPreferences {
        id: Set(Uuid::new_v4()),
        user: Set(user_id),
        disable_default_background: Set(false),
        background_image: Set(None),
    };

    apreferences
        .insert(db)
        .await
        .context("Failed to create user preferences")
}
