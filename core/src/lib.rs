/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod consts;
pub mod database;
pub mod history;
pub mod input;
pub mod membership;
pub mod payload;
pub mod storage;
pub mod types;

use anyhow::{Context, Result};
use clap::Parser;
use database::connect_db;
use std::sync::Arc;
use storage::FileStore;
use types::*;

pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub async fn init_state(cli: Cli) -> Result<Arc<ServerState>> {
    tracing::info!("Starting Jumper Server on {}:{}", cli.ip, cli.port);

    let db = connect_db(&cli).await?;
    let files = FileStore::new(&cli.file_store_path).context("Failed to open file store")?;

    Ok(Arc::new(ServerState { db, files, cli }))
}
