/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionData::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActionData::Kind)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActionData::Code).text())
                    .col(ColumnDef::new(ActionData::Url).string())
                    .col(
                        ColumnDef::new(ActionData::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionData::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActionData {
    Table,
    Id,
    Kind,
    Code,
    Url,
    UpdatedAt,
}
