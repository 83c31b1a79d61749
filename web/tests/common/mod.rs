/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use core::storage::FileStore;
use core::types::*;
use entity::*;
use sea_orm::{DatabaseBackend, MockDatabase};
use std::sync::Arc;

pub fn create_mock_cli() -> Cli {
    Cli {
        log_level: "debug".to_string(),
        ip: "127.0.0.1".to_string(),
        port: 3000,
        serve_url: "http://127.0.0.1:8000".to_string(),
        database_url: Some("mock://test".to_string()),
        database_url_file: None,
        jwt_secret_file: "test_jwt".to_string(),
        file_store_path: std::env::temp_dir()
            .join("jumper-test-files")
            .display()
            .to_string(),
        max_upload_bytes: 5242880,
        disable_registration: false,
        admin_group: None,
        initial_admin_email: None,
        initial_admin_password_file: None,
        oidc_enabled: false,
        oidc_required: false,
        oidc_client_id: None,
        oidc_client_secret_file: None,
        oidc_scopes: None,
        oidc_discovery_url: None,
        report_errors: false,
    }
}

#[allow(dead_code)]
pub fn create_mock_state() -> Arc<ServerState> {
    let cli = create_mock_cli();
    let files = FileStore::new(&cli.file_store_path).unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();

    Arc::new(ServerState { db, files, cli })
}
