/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum SystemRole {
    #[sea_orm(num_value = 0)]
    User,
    #[sea_orm(num_value = 1)]
    UserManager,
    #[sea_orm(num_value = 2)]
    ActionManager,
    #[sea_orm(num_value = 3)]
    Admin,
}

impl SystemRole {
    pub fn tag(&self) -> &'static str {
        match self {
            SystemRole::User => "User",
            SystemRole::UserManager => "UserManager",
            SystemRole::ActionManager => "ActionManager",
            SystemRole::Admin => "Admin",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "User" => Some(SystemRole::User),
            "UserManager" => Some(SystemRole::UserManager),
            "ActionManager" => Some(SystemRole::ActionManager),
            "Admin" => Some(SystemRole::Admin),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub system_role: SystemRole,
    pub is_active: bool,
    pub profile_picture: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub last_login_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
