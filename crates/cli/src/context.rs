// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolves the project root into the handful of shared values every
//! command needs: paths, config, active profile, and session naming.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use sq_adapters::TmuxAdapter;
use sq_core::config::{ConfigFile, GlobalConfig, Profile};
use sq_core::paths::Paths;
use sq_prompt::PromptVars;

pub struct Context {
    pub paths: Paths,
    pub config: GlobalConfig,
    pub profile: Profile,
}

impl Context {
    pub fn load() -> Result<Self> {
        let root = crate::env::project_root().context("resolving project root")?;
        let paths = Paths::new(root);
        let file = ConfigFile::load(&paths.config_file())
            .with_context(|| format!("loading {}", paths.config_file().display()))?;
        let profile_path = paths.profile_file(&file.active_profile);
        let profile = Profile::load(&profile_path)
            .with_context(|| format!("loading active profile {}", profile_path.display()))?;
        let config = GlobalConfig::from_file(file);
        Ok(Self { paths, config, profile })
    }

    /// Like [`Self::load`], but never fails on a missing or malformed
    /// `config.json` / active profile — health checks must be able to run
    /// (and report those as failing probes) on a broken project.
    pub fn load_for_health() -> Result<Self> {
        let root = crate::env::project_root().context("resolving project root")?;
        let paths = Paths::new(root);
        let file = ConfigFile::load(&paths.config_file()).unwrap_or_else(|_| ConfigFile {
            active_profile: PathBuf::from("profiles/default.json"),
            workers: Default::default(),
            queues: None,
            session_name: None,
            tmux_bin: None,
        });
        let profile_path = paths.profile_file(&file.active_profile);
        let profile = Profile::load(&profile_path).unwrap_or_else(|_| Profile {
            profile_id: String::new(),
            market_type: String::new(),
            rest: HashMap::new(),
        });
        let config = GlobalConfig::from_file(file);
        Ok(Self { paths, config, profile })
    }

    /// `SIGMAQ_SESSION_NAME` overrides `config.json`'s `session_name`,
    /// which overrides the `sigma-quant` default.
    pub fn session_name(&self) -> String {
        if let Ok(name) = std::env::var("SIGMAQ_SESSION_NAME") {
            return name;
        }
        self.config.read().session_name().to_string()
    }

    pub fn tmux_adapter(&self) -> TmuxAdapter {
        if let Ok(bin) = std::env::var("SIGMAQ_TMUX_BIN") {
            return TmuxAdapter::with_bin(bin);
        }
        let bin = self.config.read().tmux_bin().to_string();
        TmuxAdapter::with_bin(bin)
    }

    /// Build the canonical prompt variables for this project's active profile.
    pub fn prompt_vars(&self) -> PromptVars {
        let cost_model = self
            .profile
            .rest
            .get("costs")
            .map(|v| v.to_string())
            .unwrap_or_default();
        PromptVars {
            profile: self.profile.profile_id.clone(),
            data_dir: self.paths.data_dir().display().to_string(),
            cost_model,
            market_type: self.profile.market_type.clone(),
            extra: HashMap::new(),
        }
    }
}
