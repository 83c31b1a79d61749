/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Local-disk file store for thumbnails, profile pictures, and background
//! images. Handlers receive this as a narrow service through the server
//! state instead of inheriting file behavior.

use anyhow::{bail, Context, Result};
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

#[derive(Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: &str) -> Result<Self> {
        std::fs::create_dir_all(base).context("Failed to create file store directory")?;

        Ok(Self {
            base: PathBuf::from(base),
        })
    }

    /// Relative names may contain subdirectories but never parent or root
    /// components.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let rel = Path::new(name);

        for component in rel.components() {
            match component {
                Component::Normal(_) => {}
                _ => bail!("Invalid file name: {}", name),
            }
        }

        Ok(self.base.join(rel))
    }

    pub async fn save(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.resolve(name)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create file directory")?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .context("Failed to write file")
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;

        tokio::fs::read(&path).await.context("Failed to read file")
    }

    /// Removing a file that is already gone is not an error.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let path = self.resolve(name)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to delete file"),
        }
    }

    pub fn thumbnail_name(action: Uuid, filename: &str) -> String {
        format!("thumbnails/{}/{}", action, filename)
    }

    pub fn profile_picture_name(extension: &str) -> String {
        format!("users/profile_pictures/{}.{}", Uuid::new_v4(), extension)
    }

    pub fn background_name(user: Uuid, extension: &str) -> String {
        format!("user-background/{}/{}.{}", user, Uuid::new_v4(), extension)
    }

    pub fn default_background_name(extension: &str) -> String {
        format!("system/default-background.{}", extension)
    }
}
