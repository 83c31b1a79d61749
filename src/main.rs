/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Result;
use jumper_core::{init_state, parse_cli};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> Result<()> {
    let cli = parse_cli();

    let filter =
        EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = init_state(cli).await?;

    let _sentry_guard = if state.cli.report_errors {
        Some(sentry::init(sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    } else {
        None
    };

    web::serve_web(Arc::clone(&state)).await?;

    Ok(())
}
