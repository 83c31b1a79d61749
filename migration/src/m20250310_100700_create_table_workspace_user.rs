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
                    .table(WorkspaceUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkspaceUser::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkspaceUser::Workspace).uuid().not_null())
                    .col(ColumnDef::new(WorkspaceUser::User).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-workspace_user-workspace")
                            .from(WorkspaceUser::Table, WorkspaceUser::Workspace)
                            .to(Workspace::Table, Workspace::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-workspace_user-user")
                            .from(WorkspaceUser::Table, WorkspaceUser::User)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkspaceUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WorkspaceUser {
    Table,
    Id,
    Workspace,
    User,
}

#[derive(DeriveIden)]
enum Workspace {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
