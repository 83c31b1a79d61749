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
                    .table(RoleUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoleUser::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoleUser::Role).uuid().not_null())
                    .col(ColumnDef::new(RoleUser::User).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-role_user-role")
                            .from(RoleUser::Table, RoleUser::Role)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-role_user-user")
                            .from(RoleUser::Table, RoleUser::User)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoleUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoleUser {
    Table,
    Id,
    Role,
    User,
}

#[derive(DeriveIden)]
enum Role {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
