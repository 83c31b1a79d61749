/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored snapshot of an action payload. `position` is monotonic per
/// payload, starting at 1 for the initial version.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "action_data_version")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub data: Uuid,
    pub position: i64,
    pub code: Option<String>,
    pub url: Option<String>,
    pub changed_at: NaiveDateTime,
    pub edited_by: Option<Uuid>,
    pub change_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::action_data::Entity",
        from = "Column::Data",
        to = "super::action_data::Column::Id"
    )]
    Data,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::EditedBy",
        to = "super::user::Column::Id"
    )]
    EditedBy,
}

impl ActiveModelBehavior for ActiveModel {}
