//! Presentation configuration
//!
//! Loaded from TOML, optionally overridden by `MODAL_*` environment variables.

use crate::errors::{ModalError, ModalResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`ModalConfig::animated`]
pub const ENV_ANIMATED: &str = "MODAL_ANIMATED";

/// How coordinators present and tear down their surfaces
///
/// A surface still on screen after its terminal outcome is always dismissed;
/// only the animation is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModalConfig {
    /// Animate both presentation and dismissal
    pub animated: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self { animated: true }
    }
}

impl ModalConfig {
    /// Configuration without animations, handy for tests and scripted hosts
    pub fn immediate() -> Self {
        Self { animated: false }
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> ModalResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> ModalResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ModalError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `MODAL_*` environment overrides
    pub fn merge_with_env(&mut self) -> ModalResult<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply overrides from an explicit set of variables
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> ModalResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            if key.as_ref() == ENV_ANIMATED {
                self.animated = parse_flag(ENV_ANIMATED, value.as_ref())?;
            }
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> ModalResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ModalError::config(format!(
            "{key} expects a boolean, got '{other}'"
        ))),
    }
}
