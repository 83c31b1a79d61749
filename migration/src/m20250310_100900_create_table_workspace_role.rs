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
                    .table(WorkspaceRole::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkspaceRole::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkspaceRole::Workspace).uuid().not_null())
                    .col(ColumnDef::new(WorkspaceRole::Role).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-workspace_role-workspace")
                            .from(WorkspaceRole::Table, WorkspaceRole::Workspace)
                            .to(Workspace::Table, Workspace::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-workspace_role-role")
                            .from(WorkspaceRole::Table, WorkspaceRole::Role)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkspaceRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WorkspaceRole {
    Table,
    Id,
    Workspace,
    Role,
}

#[derive(DeriveIden)]
enum Workspace {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Role {
    Table,
    Id,
}
