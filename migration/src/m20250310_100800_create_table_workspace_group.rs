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
                    .table(WorkspaceGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkspaceGroup::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkspaceGroup::Workspace).uuid().not_null())
                    .col(ColumnDef::new(WorkspaceGroup::Group).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-workspace_group-workspace")
                            .from(WorkspaceGroup::Table, WorkspaceGroup::Workspace)
                            .to(Workspace::Table, Workspace::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-workspace_group-group")
                            .from(WorkspaceGroup::Table, WorkspaceGroup::Group)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkspaceGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WorkspaceGroup {
    Table,
    Id,
    Workspace,
    Group,
}

#[derive(DeriveIden)]
enum Workspace {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Group {
    Table,
    Id,
}
