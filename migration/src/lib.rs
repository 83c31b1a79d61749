/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20250310_100000_create_table_user;
mod m20250310_100100_create_table_group;
mod m20250310_100200_create_table_user_group;
mod m20250310_100300_create_table_role;
mod m20250310_100400_create_table_role_user;
mod m20250310_100500_create_table_role_group;
mod m20250310_100600_create_table_workspace;
mod m20250310_100700_create_table_workspace_user;
mod m20250310_100800_create_table_workspace_group;
mod m20250310_100900_create_table_workspace_role;
mod m20250310_101000_create_table_action_data;
mod m20250310_101100_create_table_action_data_version;
mod m20250310_101200_create_table_action;
mod m20250310_101300_create_table_action_user;
mod m20250310_101400_create_table_action_group;
mod m20250310_101500_create_table_action_role;
mod m20250310_101600_create_table_user_preferences;
mod m20250310_101700_create_table_system_info;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_100000_create_table_user::Migration),
            Box::new(m20250310_100100_create_table_group::Migration),
            Box::new(m20250310_100200_create_table_user_group::Migration),
            Box::new(m20250310_100300_create_table_role::Migration),
            Box::new(m20250310_100400_create_table_role_user::Migration),
            Box::new(m20250310_100500_create_table_role_group::Migration),
            Box::new(m20250310_100600_create_table_workspace::Migration),
            Box::new(m20250310_100700_create_table_workspace_user::Migration),
            Box::new(m20250310_100800_create_table_workspace_group::Migration),
            Box::new(m20250310_100900_create_table_workspace_role::Migration),
            Box::new(m20250310_101000_create_table_action_data::Migration),
            Box::new(m20250310_101100_create_table_action_data_version::Migration),
            Box::new(m20250310_101200_create_table_action::Migration),
            Box::new(m20250310_101300_create_table_action_user::Migration),
            Box::new(m20250310_101400_create_table_action_group::Migration),
            Box::new(m20250310_101500_create_table_action_role::Migration),
            Box::new(m20250310_101600_create_table_user_preferences::Migration),
            Box::new(m20250310_101700_create_table_system_info::Migration),
        ]
    }
}
