/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod action;
pub mod action_data;
pub mod action_data_version;
pub mod action_group;
pub mod action_role;
pub mod action_user;
pub mod group;
pub mod role;
pub mod role_group;
pub mod role_user;
pub mod system_info;
pub mod user;
pub mod user_group;
pub mod user_preferences;
pub mod workspace;
pub mod workspace_group;
pub mod workspace_role;
pub mod workspace_user;
