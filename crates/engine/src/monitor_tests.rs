use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use sq_adapters::FakeSessionAdapter;
use sq_core::paths::Paths;
use sq_core::worker::{WorkerState, WorkerType};
use sq_prompt::PromptVars;
use tokio::sync::mpsc;

use crate::manager::WorkerManager;

use super::PaneMonitor;

async fn started_manager() -> (tempfile::TempDir, Arc<WorkerManager<FakeSessionAdapter>>, FakeSessionAdapter) {
    let dir = tempfile::tempdir().unwrap();
    let paths = Paths::new(dir.path());
    std::fs::create_dir_all(paths.prompts_dir()).unwrap();
    for worker in WorkerType::ALL {
        std::fs::write(paths.prompt_file(worker), "mission").unwrap();
    }
    let adapter = FakeSessionAdapter::new();
    let manager = Arc::new(WorkerManager::new(adapter.clone(), paths, "sigma-quant"));
    manager.start(WorkerType::Researcher, PromptVars::default()).await.unwrap();
    (dir, manager, adapter)
}

#[tokio::test]
async fn session_complete_marker_sets_worker_idle_and_notifies() {
    let (_dir, manager, adapter) = started_manager().await;
    let pane = manager.pane_for(WorkerType::Researcher).unwrap();
    adapter.set_output(&pane, vec!["doing work".to_string(), "SESSION_COMPLETE".to_string()]);

    let monitor = PaneMonitor::new(Arc::clone(&manager), Duration::from_millis(10), Duration::from_secs(60));
    let (tx, mut rx) = mpsc::channel(4);
    let mut trackers = HashMap::new();
    monitor.tick(&mut trackers, &tx).await;

    let states = manager.worker_states();
    let researcher = states.iter().find(|w| w.worker_type == WorkerType::Researcher).unwrap();
    assert_eq!(researcher.state, WorkerState::Idle);
    assert_eq!(researcher.sessions_run, 1);

    let update = rx.try_recv().unwrap();
    assert_eq!(update.state, WorkerState::Idle);
}

#[tokio::test]
async fn unchanged_terminal_marker_does_not_reapply_on_subsequent_ticks() {
    let (_dir, manager, adapter) = started_manager().await;
    let pane = manager.pane_for(WorkerType::Researcher).unwrap();
    adapter.set_output(&pane, vec!["doing work".to_string(), "SESSION_COMPLETE".to_string()]);

    let monitor = PaneMonitor::new(Arc::clone(&manager), Duration::from_millis(10), Duration::from_secs(60));
    let (tx, mut rx) = mpsc::channel(4);
    let mut trackers = HashMap::new();

    monitor.tick(&mut trackers, &tx).await;
    monitor.tick(&mut trackers, &tx).await;
    monitor.tick(&mut trackers, &tx).await;

    let states = manager.worker_states();
    let researcher = states.iter().find(|w| w.worker_type == WorkerType::Researcher).unwrap();
    assert_eq!(researcher.sessions_run, 1, "the same observation must not be applied more than once");

    assert!(rx.try_recv().is_ok(), "first tick notifies");
    assert!(rx.try_recv().is_err(), "later ticks with the same effect must not notify again");
}

#[tokio::test]
async fn error_marker_sets_last_error() {
    let (_dir, manager, adapter) = started_manager().await;
    let pane = manager.pane_for(WorkerType::Researcher).unwrap();
    adapter.set_output(&pane, vec!["[ERROR] disk full".to_string()]);

    let monitor = PaneMonitor::new(Arc::clone(&manager), Duration::from_millis(10), Duration::from_secs(60));
    let (tx, _rx) = mpsc::channel(4);
    let mut trackers = HashMap::new();
    monitor.tick(&mut trackers, &tx).await;

    let states = manager.worker_states();
    let researcher = states.iter().find(|w| w.worker_type == WorkerType::Researcher).unwrap();
    assert_eq!(researcher.state, WorkerState::Error);
    assert_eq!(researcher.last_error.as_deref(), Some("[ERROR] disk full"));
}

#[tokio::test]
async fn unchanged_buffer_past_threshold_emits_stale_error() {
    let (_dir, manager, adapter) = started_manager().await;
    let pane = manager.pane_for(WorkerType::Researcher).unwrap();
    adapter.set_output(&pane, vec!["nothing special".to_string()]);

    let monitor = PaneMonitor::new(Arc::clone(&manager), Duration::from_millis(10), Duration::from_millis(1));
    let (tx, _rx) = mpsc::channel(4);
    let mut trackers = HashMap::new();

    monitor.tick(&mut trackers, &tx).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    monitor.tick(&mut trackers, &tx).await;

    let states = manager.worker_states();
    let researcher = states.iter().find(|w| w.worker_type == WorkerType::Researcher).unwrap();
    assert_eq!(researcher.state, WorkerState::Error);
}

#[tokio::test]
async fn no_update_when_buffer_has_no_marker_and_is_not_stale() {
    let (_dir, manager, adapter) = started_manager().await;
    let pane = manager.pane_for(WorkerType::Researcher).unwrap();
    adapter.set_output(&pane, vec!["nothing special".to_string()]);

    let monitor = PaneMonitor::new(Arc::clone(&manager), Duration::from_millis(10), Duration::from_secs(60));
    let (tx, mut rx) = mpsc::channel(4);
    let mut trackers = HashMap::new();
    monitor.tick(&mut trackers, &tx).await;

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn tick_skips_workers_without_a_live_session() {
    let dir = tempfile::tempdir().unwrap();
    let paths = Paths::new(dir.path());
    let manager = Arc::new(WorkerManager::new(FakeSessionAdapter::new(), paths, "sigma-quant"));
    let monitor = PaneMonitor::new(Arc::clone(&manager), Duration::from_millis(10), Duration::from_secs(60));
    let (tx, _rx) = mpsc::channel(4);
    let mut trackers = HashMap::new();

    monitor.tick(&mut trackers, &tx).await;
}
