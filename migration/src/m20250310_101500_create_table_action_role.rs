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
                    .table(ActionRole::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionRole::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActionRole::Action).uuid().not_null())
                    .col(ColumnDef::new(ActionRole::Role).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-action_role-action")
                            .from(ActionRole::Table, ActionRole::Action)
                            .to(Action::Table, Action::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-action_role-role")
                            .from(ActionRole::Table, ActionRole::Role)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActionRole {
    Table,
    Id,
    Action,
    Role,
}

#[derive(DeriveIden)]
enum Action {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Role {
    Table,
    Id,
}
