// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box test harness: builds a complete project fixture on disk and
//! drives the `sigmaq` binary against it via `assert_cmd`.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

const WORKER_PROMPTS: &[&str] = &["researcher", "converter", "backtester", "optimizer"];

pub struct Project {
    dir: TempDir,
}

impl Project {
    /// A complete, healthy project fixture: config, active profile, all
    /// four mission prompts, the four queue dirs, output dirs, and a `.env`
    /// with the mandatory key present.
    pub fn complete() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path();

        std::fs::write(
            root.join("config.json"),
            serde_json::json!({
                "activeProfile": "profiles/default.json",
                "workers": {},
                "session_name": "test-session",
                "tmux_bin": "true",
            })
            .to_string(),
        )
        .unwrap();

        std::fs::create_dir_all(root.join("profiles")).unwrap();
        std::fs::write(
            root.join("profiles/default.json"),
            serde_json::json!({
                "profileId": "default",
                "marketType": "backtest",
                "dataProvider": "sample",
                "symbols": ["EURUSD"],
            })
            .to_string(),
        )
        .unwrap();

        std::fs::create_dir_all(root.join("prompts")).unwrap();
        for name in WORKER_PROMPTS {
            std::fs::write(root.join("prompts").join(format!("{name}.md")), format!("# {name} mission")).unwrap();
        }

        for queue in ["hypotheses", "to-convert", "to-backtest", "to-optimize"] {
            std::fs::create_dir_all(root.join("queues").join(queue)).unwrap();
        }

        for dir_path in [
            "output/strategies/good",
            "output/strategies/under_review",
            "output/strategies/rejected",
            "output/strategies/prop_firm_ready",
            "output/indicators",
            "output/backtests",
            "output/research-logs",
        ] {
            std::fs::create_dir_all(root.join(dir_path)).unwrap();
        }

        std::fs::create_dir_all(root.join("data")).unwrap();
        std::fs::write(root.join("data/sample.csv"), "t,open,close\n").unwrap();
        std::fs::create_dir_all(root.join("agents")).unwrap();
        std::fs::write(root.join("agents/researcher.md"), "# agent").unwrap();
        std::fs::create_dir_all(root.join("skills")).unwrap();
        std::fs::write(root.join("skills/backtest.md"), "# skill").unwrap();
        std::fs::write(root.join(".env"), "ANTHROPIC_API_KEY=test-key\n").unwrap();

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn queue_dir(&self, queue: &str) -> PathBuf {
        self.root().join("queues").join(queue)
    }

    pub fn remove_config(&self) {
        std::fs::remove_file(self.root().join("config.json")).unwrap();
    }

    /// Build a `sigmaq` invocation rooted at this project via `SIGMAQ_PROJECT_ROOT`.
    pub fn sigmaq(&self) -> Command {
        let mut cmd = Command::cargo_bin("sigmaq").expect("sigmaq binary");
        cmd.env("SIGMAQ_PROJECT_ROOT", self.root());
        cmd.env("NO_COLOR", "1");
        cmd
    }
}
