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
                    .table(Action::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Action::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Action::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Action::Description).string().not_null())
                    .col(
                        ColumnDef::new(Action::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Action::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Action::Thumbnail).string())
                    .col(ColumnDef::new(Action::Data).uuid().not_null())
                    .col(ColumnDef::new(Action::CreatedBy).uuid())
                    .col(ColumnDef::new(Action::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Action::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-action-data")
                            .from(Action::Table, Action::Data)
                            .to(ActionData::Table, ActionData::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-action-created_by")
                            .from(Action::Table, Action::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Action::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Action {
    Table,
    Id,
    Name,
    Description,
    IsActive,
    IsPublic,
    Thumbnail,
    Data,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
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
