// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box end-to-end scenarios driving the `sigmaq` binary against a
//! fixture project on disk.

mod support;

use support::Project;

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// S1: four empty queue dirs report zero items.
#[test]
fn s1_empty_queues_report_no_items() {
    let project = Project::complete();
    for queue in ["hypotheses", "to-convert", "to-backtest", "to-optimize"] {
        let output = project.sigmaq().args(["queue", "list", queue]).output().unwrap();
        assert!(output.status.success());
        assert!(stdout_of(&output).contains("No items"), "queue {queue} should be empty");
    }
}

/// S2: push then claim renames the item file and flips status to in_progress.
#[test]
fn s2_push_then_claim_renames_file_to_claimed() {
    let project = Project::complete();

    let push = project
        .sigmaq()
        .args(["queue", "push", "hypotheses", "high", r#"{"text":"hello"}"#])
        .output()
        .unwrap();
    assert!(push.status.success(), "{}", stdout_of(&push));

    let list = project.sigmaq().args(["queue", "list", "hypotheses", "-o", "json"]).output().unwrap();
    let items: serde_json::Value = serde_json::from_slice(&list.stdout).unwrap();
    let id = items[0]["id"].as_str().unwrap().to_string();
    assert_eq!(items[0]["status"], "pending");

    let claim = project
        .sigmaq()
        .args(["queue", "claim", "hypotheses", &id, "backtester"])
        .output()
        .unwrap();
    assert!(claim.status.success(), "{}", stdout_of(&claim));

    let claimed_file = project.queue_dir("hypotheses").join(format!("{id}.claimed-backtester.json"));
    assert!(claimed_file.exists(), "expected claimed file at {}", claimed_file.display());
    let content: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&claimed_file).unwrap()).unwrap();
    assert_eq!(content["status"], "in_progress");
    assert_eq!(content["claimed_by"], "backtester");
}

/// S3: failing an item wraps its payload with the failure reason under `failed/`.
#[test]
fn s3_fail_wraps_payload_in_failed_dir() {
    let project = Project::complete();

    let push = project
        .sigmaq()
        .args(["queue", "push", "to-backtest", "medium", r#"{"n":1}"#])
        .output()
        .unwrap();
    assert!(push.status.success());

    let list = project.sigmaq().args(["queue", "list", "to-backtest", "-o", "json"]).output().unwrap();
    let items: serde_json::Value = serde_json::from_slice(&list.stdout).unwrap();
    let id = items[0]["id"].as_str().unwrap().to_string();

    let fail = project
        .sigmaq()
        .args(["queue", "fail", "to-backtest", &id, "bad-data"])
        .output()
        .unwrap();
    assert!(fail.status.success(), "{}", stdout_of(&fail));

    let failed_file = project.queue_dir("to-backtest").join("failed").join(format!("{id}.json"));
    let content: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&failed_file).unwrap()).unwrap();
    assert_eq!(content["payload"]["failure_reason"], "bad-data");
    assert_eq!(content["payload"]["original_payload"]["n"], 1);
}

/// S4: listing sorts high priority first, then medium, then low.
#[test]
fn s4_list_sorts_by_priority_then_time() {
    let project = Project::complete();

    for (priority, payload) in [("low", r#"{"k":"a"}"#), ("high", r#"{"k":"b"}"#), ("medium", r#"{"k":"c"}"#)] {
        let push = project.sigmaq().args(["queue", "push", "hypotheses", priority, payload]).output().unwrap();
        assert!(push.status.success());
    }

    let list = project.sigmaq().args(["queue", "list", "hypotheses", "-o", "json"]).output().unwrap();
    let items: serde_json::Value = serde_json::from_slice(&list.stdout).unwrap();
    let priorities: Vec<&str> = items.as_array().unwrap().iter().map(|i| i["priority"].as_str().unwrap()).collect();
    assert_eq!(priorities, vec!["high", "medium", "low"]);
}

/// S6: a missing config.json fails the health report's config-json probe.
#[test]
fn s6_missing_config_fails_health_report() {
    let project = Project::complete();
    project.remove_config();

    let output = project.sigmaq().args(["health", "-o", "json"]).output().unwrap();
    assert!(!output.status.success(), "health should exit non-zero when unhealthy");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["healthy"], false);
    let config_probe = report["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["name"] == "config.json")
        .expect("config.json probe present");
    assert_eq!(config_probe["status"], "fail");
}

/// A complete fixture should already be healthy end to end, modulo the
/// host-dependent system probes (python, tmux, git, llm CLI).
#[test]
fn health_reports_pass_for_config_and_project_probes_on_a_complete_fixture() {
    let project = Project::complete();
    let output = project.sigmaq().args(["health", "--category", "project", "-o", "json"]).output().unwrap();
    assert!(output.status.success(), "{}", stdout_of(&output));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["healthy"], true);
    assert_eq!(report["failed"], 0);
}
