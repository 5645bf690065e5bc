// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic per-item file operations on a single queue directory.

use std::fs;
use std::path::{Path, PathBuf};

use sq_core::queue_item::{QueueDepth, QueueItem, QueueName, Status};
use tracing::warn;

use crate::error::QueueError;

const TMP_PREFIX: &str = ".tmp-";
const CLAIMED_INFIX: &str = ".claimed-";

/// Owns one queue directory plus its `completed/` and `failed/` subdirectories.
///
/// All mutating operations commit via rename-within-the-same-directory so
/// a reader never observes a torn write. Malformed item files are skipped
/// by `list` (never wedge the pipeline on one bad file) but surfaced by `get`.
pub struct QueueStore {
    name: QueueName,
    dir: PathBuf,
}

impl QueueStore {
    /// Open (creating if needed) the queue directory and its terminal
    /// subdirectories, then run the startup reconciliation pass.
    pub fn new(name: QueueName, dir: impl Into<PathBuf>) -> Result<Self, QueueError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| QueueError::io(&dir, e))?;
        let completed = dir.join("completed");
        let failed = dir.join("failed");
        fs::create_dir_all(&completed).map_err(|e| QueueError::io(&completed, e))?;
        fs::create_dir_all(&failed).map_err(|e| QueueError::io(&failed, e))?;

        let store = Self { name, dir };
        store.reconcile_terminal_residue(&completed, &failed);
        Ok(store)
    }

    pub fn name(&self) -> QueueName {
        self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn completed_dir(&self) -> PathBuf {
        self.dir.join("completed")
    }

    fn failed_dir(&self) -> PathBuf {
        self.dir.join("failed")
    }

    /// Remove top-level residue for any id that already has a file under
    /// `completed/` or `failed/` — terminal-directory presence wins.
    fn reconcile_terminal_residue(&self, completed: &Path, failed: &Path) {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(".json") || file_name.contains(TMP_PREFIX) {
                continue;
            }
            let Some(id) = id_from_filename(file_name) else {
                warn!(file = file_name, "skipping malformed queue filename during recovery");
                continue;
            };
            if completed.join(format!("{id}.json")).exists() || failed.join(format!("{id}.json")).exists() {
                if let Err(e) = fs::remove_file(&path) {
                    warn!(file = %path.display(), error = %e, "failed to remove reconciled residue");
                }
            }
        }
    }

    /// Enumerate top-level `.json` files, decode, skip malformed entries,
    /// and sort by priority rank then ascending creation time.
    pub fn list(&self) -> Result<Vec<QueueItem>, QueueError> {
        let mut items = Vec::new();
        let entries = fs::read_dir(&self.dir).map_err(|e| QueueError::io(&self.dir, e))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(".json") || file_name.contains(TMP_PREFIX) {
                continue;
            }
            match read_item(&path) {
                Ok(item) => items.push(item),
                Err(_) => continue,
            }
        }
        items.sort_by(|a, b| a.priority.rank().cmp(&b.priority.rank()).then(a.created_at.cmp(&b.created_at)));
        Ok(items)
    }

    pub fn count(&self) -> Result<QueueDepth, QueueError> {
        let items = self.list()?;
        let pending = items.iter().filter(|i| i.status == Status::Pending).count();
        let claimed = items.iter().filter(|i| i.status == Status::InProgress).count();
        Ok(QueueDepth { name: self.name, pending, claimed, total: items.len() })
    }

    /// Fast path tries `{id}.json`; falls back to scanning for the embedded id,
    /// so a caller can retrieve claimed items too.
    pub fn get(&self, id: &str) -> Result<QueueItem, QueueError> {
        let fast = self.dir.join(format!("{id}.json"));
        if fast.exists() {
            if let Ok(item) = read_item(&fast) {
                return Ok(item);
            }
        }
        if let Some(path) = self.find_item_path(id)? {
            return read_item(&path);
        }
        Err(QueueError::NotFound { id: id.to_string() })
    }

    fn find_item_path(&self, id: &str) -> Result<Option<PathBuf>, QueueError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| QueueError::io(&self.dir, e))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(".json") || file_name.contains(TMP_PREFIX) {
                continue;
            }
            if let Ok(item) = read_item(&path) {
                if item.id == id {
                    return Ok(Some(path));
                }
            }
        }
        Ok(None)
    }

    /// Serialize to a temp file in the same directory, fsync-by-close,
    /// rename to `{id}.json`. Any failure removes the temp file.
    pub fn push(&self, item: &QueueItem) -> Result<(), QueueError> {
        let dest = self.dir.join(format!("{}.json", item.id));
        self.write_atomic(&dest, item)
    }

    fn write_atomic(&self, dest: &Path, item: &QueueItem) -> Result<(), QueueError> {
        let tmp = self.dir.join(format!("{TMP_PREFIX}{}-{}", item.id, uuid::Uuid::new_v4()));
        let result = (|| -> Result<(), QueueError> {
            let json = serde_json::to_vec_pretty(item)?;
            let mut file = fs::File::create(&tmp).map_err(|e| QueueError::io(&tmp, e))?;
            use std::io::Write as _;
            file.write_all(&json).map_err(|e| QueueError::io(&tmp, e))?;
            file.sync_all().map_err(|e| QueueError::io(&tmp, e))?;
            drop(file);
            fs::rename(&tmp, dest).map_err(|e| QueueError::io(dest, e))?;
            Ok(())
        })();
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    /// Precondition: item is currently `pending`. Rewrites the file in
    /// place, then renames it to the claimed filename — the rename is
    /// the commit point for claim visibility.
    pub fn claim(&self, id: &str, worker: &str) -> Result<QueueItem, QueueError> {
        let path = self.dir.join(format!("{id}.json"));
        let mut item = read_item(&path).map_err(|_| QueueError::NotFound { id: id.to_string() })?;
        if item.status != Status::Pending {
            return Err(QueueError::NotPending { id: id.to_string() });
        }
        item.status = Status::InProgress;
        item.claimed_by = Some(worker.to_string());

        let json = serde_json::to_vec_pretty(&item)?;
        {
            use std::io::Write as _;
            let mut file = fs::File::create(&path).map_err(|e| QueueError::io(&path, e))?;
            file.write_all(&json).map_err(|e| QueueError::io(&path, e))?;
            file.sync_all().map_err(|e| QueueError::io(&path, e))?;
        }
        let claimed_path = self.dir.join(format!("{id}{CLAIMED_INFIX}{worker}.json"));
        fs::rename(&path, &claimed_path).map_err(|e| QueueError::io(&claimed_path, e))?;
        Ok(item)
    }

    /// Locate the item (pending or claimed), set status completed, write
    /// to `completed/{id}.json`, then remove the source. Not atomic across
    /// directories; the startup recovery pass resolves any crash residue.
    pub fn complete(&self, id: &str) -> Result<QueueItem, QueueError> {
        let path = self.find_item_path(id)?.ok_or_else(|| QueueError::NotFound { id: id.to_string() })?;
        let mut item = read_item(&path)?;
        item.status = Status::Completed;
        let dest = self.completed_dir().join(format!("{id}.json"));
        self.write_atomic(&dest, &item)?;
        fs::remove_file(&path).map_err(|e| QueueError::io(&path, e))?;
        Ok(item)
    }

    /// As `complete`, but to `failed/`, wrapping the payload as
    /// `{ original_payload, failure_reason }`.
    pub fn fail(&self, id: &str, reason: &str) -> Result<QueueItem, QueueError> {
        let path = self.find_item_path(id)?.ok_or_else(|| QueueError::NotFound { id: id.to_string() })?;
        let mut item = read_item(&path)?;
        item.status = Status::Failed;
        item.payload = serde_json::json!({
            "original_payload": item.payload,
            "failure_reason": reason,
        });
        let dest = self.failed_dir().join(format!("{id}.json"));
        self.write_atomic(&dest, &item)?;
        fs::remove_file(&path).map_err(|e| QueueError::io(&path, e))?;
        Ok(item)
    }
}

fn read_item(path: &Path) -> Result<QueueItem, QueueError> {
    let text = fs::read_to_string(path).map_err(|e| QueueError::io(path, e))?;
    let item: QueueItem = serde_json::from_str(&text)?;
    Ok(item)
}

/// Extract the id portion of a queue item filename: `{id}.json` or
/// `{id}.claimed-{worker}.json`.
fn id_from_filename(file_name: &str) -> Option<String> {
    if let Some(idx) = file_name.find(CLAIMED_INFIX) {
        Some(file_name[..idx].to_string())
    } else {
        file_name.strip_suffix(".json").map(|s| s.to_string())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
