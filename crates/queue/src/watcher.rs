// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem-event stream over the four queue directories, debounced and
//! classified into [`QueueEvent`]s.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use sq_core::queue_item::{QueueEvent, QueueEventType, QueueName};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::QueueError;
use crate::store::QueueStore;

const TMP_PREFIX: &str = ".tmp-";
const CLAIMED_INFIX: &str = ".claimed-";
const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Raw, already-classified event observed on one queue directory, prior to
/// debouncing and item enrichment.
#[derive(Debug, Clone)]
struct RawEvent {
    queue: QueueName,
    event_type: QueueEventType,
    id: String,
}

/// Wraps one filesystem watcher over the four queue directories,
/// instantiating one [`QueueStore`] per directory for enrichment.
pub struct QueueWatcher {
    stores: HashMap<QueueName, Arc<QueueStore>>,
    debounce: Duration,
}

impl QueueWatcher {
    pub fn new(stores: HashMap<QueueName, Arc<QueueStore>>) -> Self {
        Self { stores, debounce: DEFAULT_DEBOUNCE }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start watching. Returns the outbound event channel; cancelling
    /// `cancel` terminates the loop and closes the channel.
    pub fn watch(self, cancel: CancellationToken) -> Result<mpsc::Receiver<QueueEvent>, QueueError> {
        let (out_tx, out_rx) = mpsc::channel(256);
        let (raw_tx, mut raw_rx) = mpsc::unbounded_channel::<RawEvent>();

        let queue_by_dir: HashMap<std::path::PathBuf, QueueName> =
            self.stores.iter().map(|(name, store)| (store.dir().to_path_buf(), *name)).collect();

        let mut watcher: RecommendedWatcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "queue watcher backend error");
                    return;
                }
            };
            for raw in classify(&event, &queue_by_dir) {
                let _ = raw_tx.send(raw);
            }
        })
        .map_err(QueueError::from)?;

        for store in self.stores.values() {
            watcher.watch(store.dir(), RecursiveMode::NonRecursive).map_err(QueueError::from)?;
        }

        let stores = self.stores;
        let debounce = self.debounce;
        tokio::spawn(async move {
            // Keep the watcher alive for the lifetime of the loop.
            let _watcher = watcher;
            let mut pending: HashMap<QueueName, RawEvent> = HashMap::new();
            let mut window_open = false;
            let sleep = tokio::time::sleep(debounce);
            tokio::pin!(sleep);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    maybe_raw = raw_rx.recv() => {
                        match maybe_raw {
                            Some(raw) => {
                                // First event's classification wins per window.
                                pending.entry(raw.queue).or_insert(raw);
                                if !window_open {
                                    window_open = true;
                                    sleep.as_mut().reset(tokio::time::Instant::now() + debounce);
                                }
                            }
                            None => break,
                        }
                    }
                    _ = &mut sleep, if window_open => {
                        window_open = false;
                        let batch: Vec<RawEvent> = pending.drain().map(|(_, v)| v).collect();
                        for raw in batch {
                            let item = stores.get(&raw.queue).and_then(|store| store.get(&raw.id).ok());
                            let event = QueueEvent {
                                queue: raw.queue,
                                event_type: raw.event_type,
                                item,
                                time: Utc::now(),
                            };
                            tokio::select! {
                                _ = cancel.cancelled() => return,
                                send_result = out_tx.send(event) => {
                                    if send_result.is_err() {
                                        return;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        Ok(out_rx)
    }
}

fn classify(event: &Event, queue_by_dir: &HashMap<std::path::PathBuf, QueueName>) -> Vec<RawEvent> {
    let mut out = Vec::new();
    // A `Both` rename carries both halves of the move as [from, to]; the
    // "from" half must classify as Removed even though its own file kind
    // looks like a create/write from the "to" half's perspective.
    let rename_from_index = matches!(event.kind, EventKind::Modify(ModifyKind::Name(RenameMode::Both))).then_some(0);

    for (index, path) in event.paths.iter().enumerate() {
        let Some(parent) = path.parent() else { continue };
        let Some(&queue) = queue_by_dir.get(parent) else { continue };
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else { continue };
        if !file_name.ends_with(".json") || file_name.contains(TMP_PREFIX) {
            continue;
        }
        let Some(id) = id_from_filename(file_name) else { continue };
        let is_claimed_name = file_name.contains(CLAIMED_INFIX);

        let event_type = if Some(index) == rename_from_index {
            QueueEventType::Removed
        } else {
            match event.kind {
                EventKind::Create(_) => {
                    if is_claimed_name {
                        QueueEventType::Claimed
                    } else {
                        QueueEventType::Added
                    }
                }
                EventKind::Remove(_) => QueueEventType::Removed,
                EventKind::Modify(ModifyKind::Name(RenameMode::From)) => QueueEventType::Removed,
                EventKind::Modify(_) => {
                    if is_claimed_name {
                        QueueEventType::Claimed
                    } else {
                        QueueEventType::Added
                    }
                }
                _ => continue,
            }
        };
        out.push(RawEvent { queue, event_type, id });
    }
    out
}

fn id_from_filename(file_name: &str) -> Option<String> {
    if let Some(idx) = file_name.find(CLAIMED_INFIX) {
        Some(file_name[..idx].to_string())
    } else {
        file_name.strip_suffix(".json").map(|s| s.to_string())
    }
}

/// Exposed for tests that want to exercise classification without a live
/// filesystem watcher.
#[allow(dead_code)]
fn classify_path_for_test(path: &Path, kind: EventKind, queue_by_dir: &HashMap<std::path::PathBuf, QueueName>) -> Vec<RawEvent> {
    classify(&Event::new(kind).add_path(path.to_path_buf()), queue_by_dir)
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
