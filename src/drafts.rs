//! Draft persistence for unfinished or failed sends.
//!
//! CHANGELOG:
//! - 01/14/2026 - Initial implementation (Claude)

use crate::form::FormValues;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub values: FormValues,
    pub saved_at: DateTime<Utc>,
}

/// One draft slot on disk.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

pub fn default_draft_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wolfies-send")
        .join("draft.json")
}

impl DraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when there is no draft.
    pub fn load(&self) -> Result<Option<Draft>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read draft: {:?}", self.path))?;
        let draft = serde_json::from_str(&content).with_context(|| "Failed to parse draft JSON")?;
        Ok(Some(draft))
    }

    pub fn save(&self, values: &FormValues) -> Result<Draft> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let draft = Draft {
            values: values.clone(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&draft)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write draft: {:?}", self.path))?;
        Ok(draft)
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove draft: {:?}", self.path))?;
        }
        Ok(())
    }
}
