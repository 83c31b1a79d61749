/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminator for the payload variant an action carries. Immutable
/// after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum ActionKind {
    #[sea_orm(num_value = 0)]
    Python,
    #[sea_orm(num_value = 1)]
    WindowsCmd,
    #[sea_orm(num_value = 2)]
    Link,
}

impl ActionKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ActionKind::Python => "Python",
            ActionKind::WindowsCmd => "WindowsCMD",
            ActionKind::Link => "Link",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Python" => Some(ActionKind::Python),
            "WindowsCMD" => Some(ActionKind::WindowsCmd),
            "Link" => Some(ActionKind::Link),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "action_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub kind: ActionKind,
    pub code: Option<String>,
    pub url: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
