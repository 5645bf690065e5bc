use super::*;
use std::path::Path;

#[tokio::test]
async fn spawn_and_send_are_no_ops() {
    let adapter = NoOpSessionAdapter::new();
    let id = adapter.spawn("any", Path::new("/tmp"), "cmd", &[]).await.unwrap();
    assert_eq!(id, "noop");
    adapter.send(&id, "input").await.unwrap();
    assert!(!adapter.is_alive(&id).await.unwrap());
}

#[tokio::test]
async fn layout_grid_2x2_succeeds_without_a_real_session() {
    let adapter = NoOpSessionAdapter::new();
    let panes = adapter.layout_grid_2x2("session").await.unwrap();
    assert_eq!(panes.len(), 4);
}
