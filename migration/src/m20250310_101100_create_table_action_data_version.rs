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
                    .table(ActionDataVersion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionDataVersion::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActionDataVersion::Data).uuid().not_null())
                    .col(
                        ColumnDef::new(ActionDataVersion::Position)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActionDataVersion::Code).text())
                    .col(ColumnDef::new(ActionDataVersion::Url).string())
                    .col(
                        ColumnDef::new(ActionDataVersion::ChangedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActionDataVersion::EditedBy).uuid())
                    .col(ColumnDef::new(ActionDataVersion::ChangeReason).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-action_data_version-data")
                            .from(ActionDataVersion::Table, ActionDataVersion::Data)
                            .to(ActionData::Table, ActionData::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-action_data_version-edited_by")
                            .from(ActionDataVersion::Table, ActionDataVersion::EditedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-action_data_version-data-position")
                    .table(ActionDataVersion::Table)
                    .col(ActionDataVersion::Data)
                    .col(ActionDataVersion::Position)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionDataVersion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActionDataVersion {
    Table,
    Id,
    Data,
    Position,
    Code,
    Url,
    ChangedAt,
    EditedBy,
    ChangeReason,
}

#[derive(DeriveIden)]
enum ActionData {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
