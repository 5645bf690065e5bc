use sq_adapters::FakeSessionAdapter;
use sq_core::paths::Paths;
use sq_core::worker::{WorkerState, WorkerType};
use sq_prompt::PromptVars;

use super::WorkerManager;

fn fixture() -> (tempfile::TempDir, Paths) {
    let dir = tempfile::tempdir().unwrap();
    let paths = Paths::new(dir.path());
    std::fs::create_dir_all(paths.prompts_dir()).unwrap();
    for worker in WorkerType::ALL {
        std::fs::write(paths.prompt_file(worker), format!("mission for {worker}")).unwrap();
    }
    (dir, paths)
}

#[tokio::test]
async fn start_creates_session_and_grid_on_first_call() {
    let (_dir, paths) = fixture();
    let adapter = FakeSessionAdapter::new();
    let manager = WorkerManager::new(adapter.clone(), paths, "sigma-quant");

    manager.start(WorkerType::Researcher, PromptVars::default()).await.unwrap();

    let calls = adapter.calls();
    assert!(calls.iter().any(|c| matches!(c, sq_adapters::SessionCall::Spawn { name, .. } if name == "sigma-quant")));
}

#[tokio::test]
async fn start_sets_worker_state_to_running() {
    let (_dir, paths) = fixture();
    let manager = WorkerManager::new(FakeSessionAdapter::new(), paths, "sigma-quant");

    manager.start(WorkerType::Converter, PromptVars::default()).await.unwrap();

    let states = manager.worker_states();
    let converter = states.iter().find(|w| w.worker_type == WorkerType::Converter).unwrap();
    assert_eq!(converter.state, WorkerState::Running);
    assert!(converter.started_at.is_some());
}

#[tokio::test]
async fn starting_an_already_running_worker_is_an_error() {
    let (_dir, paths) = fixture();
    let manager = WorkerManager::new(FakeSessionAdapter::new(), paths, "sigma-quant");

    manager.start(WorkerType::Optimizer, PromptVars::default()).await.unwrap();
    let result = manager.start(WorkerType::Optimizer, PromptVars::default()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn start_without_a_mission_prompt_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let paths = Paths::new(dir.path());
    let manager = WorkerManager::new(FakeSessionAdapter::new(), paths, "sigma-quant");

    let result = manager.start(WorkerType::Researcher, PromptVars::default()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn start_all_starts_every_worker() {
    let (_dir, paths) = fixture();
    let manager = WorkerManager::new(FakeSessionAdapter::new(), paths, "sigma-quant");

    manager.start_all(|_| PromptVars::default()).await.unwrap();

    let states = manager.worker_states();
    assert!(states.iter().all(|w| w.state == WorkerState::Running));
}

#[tokio::test]
async fn stop_marks_worker_stopped() {
    let (_dir, paths) = fixture();
    let manager = WorkerManager::new(FakeSessionAdapter::new(), paths, "sigma-quant");

    manager.start(WorkerType::Backtester, PromptVars::default()).await.unwrap();
    manager.stop(WorkerType::Backtester).await.unwrap();

    let states = manager.worker_states();
    let backtester = states.iter().find(|w| w.worker_type == WorkerType::Backtester).unwrap();
    assert_eq!(backtester.state, WorkerState::Stopped);
}

#[tokio::test]
async fn shutdown_stops_all_and_kills_the_session() {
    let (_dir, paths) = fixture();
    let adapter = FakeSessionAdapter::new();
    let manager = WorkerManager::new(adapter.clone(), paths, "sigma-quant");

    manager.start_all(|_| PromptVars::default()).await.unwrap();
    manager.shutdown().await.unwrap();

    let calls = adapter.calls();
    assert!(calls.iter().any(|c| matches!(c, sq_adapters::SessionCall::Kill { id } if id == "sigma-quant")));
    assert!(manager.worker_states().iter().all(|w| w.state == WorkerState::Stopped));
}

#[tokio::test]
async fn worker_states_returns_a_snapshot_for_all_four_workers() {
    let (_dir, paths) = fixture();
    let manager = WorkerManager::new(FakeSessionAdapter::new(), paths, "sigma-quant");

    let states = manager.worker_states();

    assert_eq!(states.len(), 4);
}
