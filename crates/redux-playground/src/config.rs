//! Playground configuration
//!
//! Configuration loaded from .redux-playground.toml file.

use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".redux-playground.toml";

/// One scripted call of a bound action creator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScriptStep {
    /// Name of the action creator, e.g. "increment" or "add"
    pub action: String,
    #[serde(default)]
    pub amount: Option<i64>,
}

impl ScriptStep {
    fn new(action: &str, amount: Option<i64>) -> Self {
        Self {
            action: action.to_string(),
            amount,
        }
    }
}

/// Playground configuration loaded from .redux-playground.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaygroundConfig {
    /// Log filter, e.g. "info" or "redux_core=trace"; RUST_LOG overrides it
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Middleware to install, outermost first
    #[serde(default = "default_middleware")]
    pub middleware: Vec<String>,

    /// Largest amount the "limit" middleware lets through for "add"
    #[serde(default = "default_max_step")]
    pub max_step: i64,

    #[serde(default = "default_script")]
    pub script: Vec<ScriptStep>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_middleware() -> Vec<String> {
    ["logging", "plain-guard", "limit", "double"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_step() -> i64 {
    10
}

fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::new("increment", None),
        ScriptStep::new("increment", None),
        ScriptStep::new("add", Some(5)),
        ScriptStep::new("add", Some(50)),
        ScriptStep::new("double", None),
        ScriptStep::new("decrement", None),
    ]
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            middleware: default_middleware(),
            max_step: default_max_step(),
            script: default_script(),
        }
    }
}

impl PlaygroundConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded playground config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default playground config");
        Self::default()
    }
}

/// Read the config file from the current directory or, failing that, $HOME
fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    let home_config = env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))?;
    let content = std::fs::read_to_string(&home_config).ok()?;
    log::debug!("Loaded config from {}", home_config.display());
    Some(content)
}
