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
                    .table(ActionUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionUser::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActionUser::Action).uuid().not_null())
                    .col(ColumnDef::new(ActionUser::User).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-action_user-action")
                            .from(ActionUser::Table, ActionUser::Action)
                            .to(Action::Table, Action::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-action_user-user")
                            .from(ActionUser::Table, ActionUser::User)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActionUser {
    Table,
    Id,
    Action,
    User,
}

#[derive(DeriveIden)]
enum Action {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
