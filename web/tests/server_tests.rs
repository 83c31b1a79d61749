/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use tower_http::cors::{Any, CorsLayer};

#[test]
fn test_middleware_configuration() {
    let state = common::create_mock_state();

    assert_eq!(state.cli.port, 3000);
    assert!(!state.cli.oidc_enabled);

    // CORS configuration creation must not panic
    let _cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
}
