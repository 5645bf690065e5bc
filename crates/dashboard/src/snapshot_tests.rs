use std::collections::HashMap;
use std::sync::Arc;

use sq_adapters::FakeSessionAdapter;
use sq_core::paths::Paths;
use sq_core::priority::Priority;
use sq_core::queue_item::QueueName;
use sq_engine::WorkerManager;
use sq_queue::{PipelineView, QueueStore};

use super::capture;

fn fixture() -> (tempfile::TempDir, Paths) {
    let dir = tempfile::tempdir().unwrap();
    let paths = Paths::new(dir.path());
    for sub in ["good", "under_review", "rejected", "prop_firm_ready"] {
        std::fs::create_dir_all(paths.output_dir().join("strategies").join(sub)).unwrap();
    }
    (dir, paths)
}

fn empty_pipeline(paths: &Paths) -> PipelineView {
    let mut stores = HashMap::new();
    for queue in QueueName::ALL {
        stores.insert(queue, Arc::new(QueueStore::new(queue, paths.queue_dir(queue)).unwrap()));
    }
    PipelineView::new(stores)
}

#[test]
fn strategy_counts_reflect_json_files_only() {
    let (_dir, paths) = fixture();
    std::fs::write(paths.strategies_good().join("a.json"), "{}").unwrap();
    std::fs::write(paths.strategies_good().join("b.json"), "{}").unwrap();
    std::fs::write(paths.strategies_good().join("notes.txt"), "ignored").unwrap();

    let manager = WorkerManager::new(FakeSessionAdapter::new(), paths.clone(), "sigma-quant");
    let pipeline = empty_pipeline(&paths);

    let snapshot = capture(&manager, &pipeline, &paths).unwrap();

    assert_eq!(snapshot.strategies.good, 2);
    assert_eq!(snapshot.strategies.under_review, 0);
}

#[test]
fn includes_all_four_worker_states() {
    let (_dir, paths) = fixture();
    let manager = WorkerManager::new(FakeSessionAdapter::new(), paths.clone(), "sigma-quant");
    let pipeline = empty_pipeline(&paths);

    let snapshot = capture(&manager, &pipeline, &paths).unwrap();

    assert_eq!(snapshot.workers.len(), 4);
}

#[test]
fn includes_queue_depths_for_all_four_queues() {
    let (_dir, paths) = fixture();
    let manager = WorkerManager::new(FakeSessionAdapter::new(), paths.clone(), "sigma-quant");
    let pipeline = empty_pipeline(&paths);
    let store = QueueStore::new(QueueName::Hypotheses, paths.queue_dir(QueueName::Hypotheses)).unwrap();
    store
        .push(sq_core::queue_item::QueueItem::new("h1", "tester", Priority::High, serde_json::json!({})))
        .unwrap();

    let snapshot = capture(&manager, &pipeline, &paths).unwrap();

    assert_eq!(snapshot.queues.len(), 4);
    let hypotheses = snapshot.queues.iter().find(|d| d.name == QueueName::Hypotheses).unwrap();
    assert_eq!(hypotheses.pending, 1);
}
