use super::*;
use crate::worker::WorkerType;

#[test]
fn queue_dir_joins_queue_name() {
    let paths = Paths::new("/proj");
    assert_eq!(paths.queue_dir(QueueName::ToConvert), Path::new("/proj/queues/to-convert"));
}

#[test]
fn prompt_file_uses_worker_name() {
    let paths = Paths::new("/proj");
    assert_eq!(paths.prompt_file(WorkerType::Backtester), Path::new("/proj/prompts/backtester.md"));
}

#[test]
fn strategies_subdirs_are_distinct() {
    let paths = Paths::new("/proj");
    let dirs = [
        paths.strategies_good(),
        paths.strategies_under_review(),
        paths.strategies_rejected(),
        paths.strategies_prop_firm_ready(),
    ];
    for (i, a) in dirs.iter().enumerate() {
        for b in &dirs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn profile_file_passes_through_absolute_paths() {
    let paths = Paths::new("/proj");
    let abs = Path::new("/elsewhere/profile.json");
    assert_eq!(paths.profile_file(abs), abs);
}
