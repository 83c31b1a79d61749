/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Versioned store for action payloads.
//!
//! Every save is compared field-by-field against the last stored version;
//! an unchanged save writes nothing. Real changes append a version row and
//! update the current payload row inside one transaction. Writer
//! serialization relies on the database transaction; there is no
//! optimistic concurrency token.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::types::*;
use entity::action_data::ActionKind;

/// The tracked fields of a payload. Metadata (timestamps, identity) is
/// excluded from change detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadSnapshot {
    pub code: Option<String>,
    pub url: Option<String>,
}

impl From<&MActionData> for PayloadSnapshot {
    fn from(data: &MActionData) -> Self {
        Self {
            code: data.code.clone(),
            url: data.url.clone(),
        }
    }
}

impl From<&MActionDataVersion> for PayloadSnapshot {
    fn from(version: &MActionDataVersion) -> Self {
        Self {
            code: version.code.clone(),
            url: version.url.clone(),
        }
    }
}

/// One entry of a reconstructed version history, enriched for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntry {
    pub number: u64,
    pub kind: ActionKind,
    pub code: Option<String>,
    pub url: Option<String>,
    pub changed_at: NaiveDateTime,
    pub edited_by: Option<ListItem>,
    pub change_reason: Option<String>,
}

/// Derived version numbers for a page of entries, most recent first. The
/// newest entry carries the all-time total.
pub fn version_numbers(total: u64, returned: usize) -> Vec<u64> {
    (0..returned as u64).map(|i| total.saturating_sub(i)).collect()
}

/// Saves a payload if any tracked field changed since the last stored
/// version. Returns `false` for a suppressed no-op write. A payload that
/// has no version yet is always written (initial version, position 1).
///
/// The caller must guarantee `data_id` refers to an existing payload row;
/// a missing row fails the whole save.
pub async fn save_payload<C>(
    db: &C,
    data_id: Uuid,
    next: PayloadSnapshot,
    editor: Option<Uuid>,
    reason: Option<String>,
) -> Result<bool>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await.context("Failed to start transaction")?;

    let current = EActionData::find_by_id(data_id)
        .one(&txn)
        .await
        .context("Failed to query payload")?
        .context("Payload row missing for versioned save")?;

    let last = EActionDataVersion::find()
        .filter(CActionDataVersion::Data.eq(data_id))
        .order_by_desc(CActionDataVersion::Position)
        .one(&txn)
        .await
        .context("Failed to query last payload version")?;

    let position = match &last {
        Some(prev) => {
            if PayloadSnapshot::from(prev) == next {
                txn.rollback()
                    .await
                    .context("Failed to end transaction")?;
                return Ok(false);
            }
            prev.position + 1
        }
        None => 1,
    };

    let now = Utc::now().naive_utc();

    let version = AActionDataVersion {
        id: Set(Uuid::new_v4()),
        data: Set(data_id),
        position: Set(position),
        code: Set(next.code.clone()),
        url: Set(next.url.clone()),
        changed_at: Set(now),
        edited_by: Set(editor),
        change_reason: Set(reason),
    };

    version
        .insert(&txn)
        .await
        .context("Failed to insert payload version")?;

    let mut adata: AActionData = current.into();
    adata.code = Set(next.code);
    adata.url = Set(next.url);
    adata.updated_at = Set(now);
    adata
        .update(&txn)
        .await
        .context("Failed to update payload")?;

    txn.commit().await.context("Failed to commit payload save")?;

    Ok(true)
}

/// Ordered version history for a payload, most recent first, capped at
/// `limit`. Versions without a change reason are incidental writes and are
/// excluded; numbering still derives from the all-time total. Editor
/// attribution degrades to `None` when the editing account is gone.
pub async fn list_versions(
    db: &DatabaseConnection,
    data_id: Uuid,
    limit: u64,
) -> Result<Vec<VersionEntry>> {
    let data = EActionData::find_by_id(data_id)
        .one(db)
        .await
        .context("Failed to query payload")?
        .context("Payload row missing for version listing")?;

    let total = EActionDataVersion::find()
        .filter(CActionDataVersion::Data.eq(data_id))
        .count(db)
        .await
        .context("Failed to count payload versions")?;

    let versions = EActionDataVersion::find()
        .filter(
            sea_orm::Condition::all()
                .add(CActionDataVersion::Data.eq(data_id))
                .add(CActionDataVersion::ChangeReason.is_not_null()),
        )
        .order_by_desc(CActionDataVersion::Position)
        .limit(limit)
        .all(db)
        .await
        .context("Failed to query payload versions")?;

    let editor_ids: Vec<Uuid> = versions.iter().filter_map(|v| v.edited_by).collect();

    let editors: HashMap<Uuid, String> = if editor_ids.is_empty() {
        HashMap::new()
    } else {
        EUser::find()
            .filter(CUser::Id.is_in(editor_ids))
            .all(db)
            .await
            .context("Failed to resolve version editors")?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect()
    };

    let numbers = version_numbers(total, versions.len());

    Ok(versions
        .into_iter()
        .zip(numbers)
        .map(|(v, number)| VersionEntry {
            number,
            kind: data.kind,
            code: v.code,
            url: v.url,
            changed_at: v.changed_at,
            edited_by: v.edited_by.and_then(|id| {
                editors.get(&id).map(|name| ListItem {
                    id,
                    name: name.clone(),
                })
            }),
            change_reason: v.change_reason,
        })
        .collect())
}

/// Point-in-time reconstruction: the latest version whose change time is
/// at or before `at`.
pub async fn snapshot_as_of(
    db: &DatabaseConnection,
    data_id: Uuid,
    at: NaiveDateTime,
) -> Result<Option<MActionDataVersion>> {
    EActionDataVersion::find()
        .filter(
            sea_orm::Condition::all()
                .add(CActionDataVersion::Data.eq(data_id))
                .add(CActionDataVersion::ChangedAt.lte(at)),
        )
        .order_by_desc(CActionDataVersion::Position)
        .one(db)
        .await
        .context("Failed to query payload snapshot")
}
