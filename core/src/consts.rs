/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::ops::RangeInclusive;
use uuid::{uuid, Uuid};

pub const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

/// The single system_info row lives at this id.
pub const SYSTEM_INFO_ID: Uuid = uuid!("00000000-0000-0000-0000-000000000001");

/// How many history entries the versions endpoint returns.
pub const VERSION_LIST_LIMIT: u64 = 10;

/// How many list entries a collection endpoint returns when the client
/// does not pass a limit.
pub const LIST_PAGE_SIZE: u64 = 25;

/// Hard cap on any client-supplied limit.
pub const MAX_PAGE_SIZE: u64 = 1000;

/// How many matches per entity the search endpoint returns by default.
pub const SEARCH_RESULT_LIMIT: u64 = 10;

pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Reason attached to payload versions written through the API when the
/// client does not supply one. Versions without any reason are treated as
/// incidental writes and hidden from listings.
pub const DEFAULT_CHANGE_REASON: &str = "updated";
