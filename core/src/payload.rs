/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Closed set of payload variants an action can carry.
//!
//! The serde `type` tag doubles as the discriminator registry: an unknown
//! tag fails deserialization before anything touches the database. Adding
//! a payload type means adding a variant here and a mapping in
//! [`ActionKind`].

use serde::{Deserialize, Serialize};

use super::history::PayloadSnapshot;
use super::input::validate_link_url;
use entity::action_data::ActionKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PayloadInput {
    Python { code: String },
    #[serde(rename = "WindowsCMD")]
    WindowsCmd { code: String },
    Link { url: String },
}

impl PayloadInput {
    pub fn kind(&self) -> ActionKind {
        match self {
            PayloadInput::Python { .. } => ActionKind::Python,
            PayloadInput::WindowsCmd { .. } => ActionKind::WindowsCmd,
            PayloadInput::Link { .. } => ActionKind::Link,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            PayloadInput::Python { code } | PayloadInput::WindowsCmd { code } => {
                if code.trim().is_empty() {
                    return Err("Code cannot be empty".to_string());
                }
                Ok(())
            }
            PayloadInput::Link { url } => validate_link_url(url),
        }
    }

    pub fn snapshot(&self) -> PayloadSnapshot {
        match self {
            PayloadInput::Python { code } | PayloadInput::WindowsCmd { code } => PayloadSnapshot {
                code: Some(code.clone()),
                url: None,
            },
            PayloadInput::Link { url } => PayloadSnapshot {
                code: None,
                url: Some(url.clone()),
            },
        }
    }
}

/// Display form of a stored payload, tagged like [`PayloadInput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadView {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PayloadView {
    pub fn from_fields(kind: ActionKind, code: Option<String>, url: Option<String>) -> Self {
        Self {
            kind: kind.tag().to_string(),
            code,
            url,
        }
    }

    /// The type-only form used by listings that must not leak payload
    /// contents.
    pub fn kind_only(kind: ActionKind) -> Self {
        Self {
            kind: kind.tag().to_string(),
            code: None,
            url: None,
        }
    }
}
