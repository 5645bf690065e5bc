// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loads a worker's mission prompt and substitutes `{{UPPERCASE_KEY}}` template variables.

use std::collections::HashMap;

use sq_core::paths::Paths;
use sq_core::worker::WorkerType;

use crate::error::PromptError;

/// The four canonical substitution variables, plus any caller-supplied extras.
#[derive(Debug, Clone, Default)]
pub struct PromptVars {
    pub profile: String,
    pub data_dir: String,
    pub cost_model: String,
    pub market_type: String,
    pub extra: HashMap<String, String>,
}

impl PromptVars {
    fn into_map(self) -> HashMap<String, String> {
        let mut map = self.extra;
        map.insert("PROFILE".to_string(), self.profile);
        map.insert("DATA_DIR".to_string(), self.data_dir);
        map.insert("COST_MODEL".to_string(), self.cost_model);
        map.insert("MARKET_TYPE".to_string(), self.market_type);
        map
    }
}

/// Loads and resolves the mission prompt for `worker` from the prompts directory.
pub fn resolve(paths: &Paths, worker: WorkerType, vars: PromptVars) -> Result<String, PromptError> {
    let path = paths.prompt_file(worker);
    let template = std::fs::read_to_string(&path).map_err(|source| PromptError::Read { path, source })?;
    Ok(substitute(&template, &vars.into_map()))
}

/// Plain string replacement of every `{{KEY}}` occurrence found in `vars`.
/// Keys absent from `vars` are left untouched in the output.
fn substitute(template: &str, vars: &HashMap<String, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}

/// Worker types whose mission prompt file is missing. The Manager checks
/// this is empty before starting any worker.
pub fn all_prompts_exist(paths: &Paths) -> Vec<WorkerType> {
    WorkerType::ALL.into_iter().filter(|wt| !paths.prompt_file(*wt).exists()).collect()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
